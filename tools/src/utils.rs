use anyhow::{Context, Result};
use std::{io::stdin, path::Path};
use walkdir::{DirEntry, WalkDir};

pub fn iter_files<'a, I>(
    paths: I,
    recursive: bool,
    extensions: &'a [&'static str],
) -> impl Iterator<Item = DirEntry> + 'a
where
    I: IntoIterator + 'a,
    <I as IntoIterator>::Item: AsRef<Path>,
{
    paths
        .into_iter()
        .flat_map(move |path| {
            let mut walk_dir = WalkDir::new(path.as_ref());
            if !recursive {
                walk_dir = walk_dir.max_depth(1);
            }

            walk_dir
        })
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.file_type().is_file()
                && !is_hidden(entry)
                && extensions
                    .iter()
                    .any(|extension| has_extension(entry.path(), extension))
        })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Does the path have this extension? Old DOS files are usually upper case, so case is ignored.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    match path.extension() {
        Some(ext) => ext.to_string_lossy().eq_ignore_ascii_case(extension),
        None => false,
    }
}

/// Ask whether an existing file may be overwritten
///
/// Returns `true` if the path doesn't exist yet, or the user agreed to overwrite it.
pub fn check_for_overwrite(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }

    loop {
        println!(
            "{} already exists. Do you want to overwrite it? Y/n",
            path.to_string_lossy()
        );

        let mut line = String::new();
        stdin()
            .read_line(&mut line)
            .context("Could not read terminal input")?;

        match line.trim_end() {
            "Y" => return Ok(true),
            "n" => return Ok(false),
            _ => (),
        }
    }
}

/// The file name of a path, for use in messages and titles
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
