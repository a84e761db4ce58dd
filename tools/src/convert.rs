//! The `convert` subcommand

use crate::utils::{check_for_overwrite, file_name, iter_files};
use anyhow::{bail, Context, Error, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::error;
use ultxmf::{
    convert::{convert as convert_module, convert_with_pans},
    xmf::XmfModule,
};

/// Arguments for the `convert` subcommand
#[derive(Args)]
#[clap(author, version, about = "Convert .xmf modules to .ult", long_about = None)]
pub struct ConvertArgs {
    /// The .xmf files, or folders containing them, that should be converted
    paths: Vec<PathBuf>,

    /// Search folders recursively
    #[clap(short, long)]
    recursive: bool,

    /// The destination folder for the converted modules. Defaults to next to the source.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing files without asking
    #[clap(short, long)]
    force: bool,

    /// Comma-separated track pan positions (0-15), used instead of the module's own
    #[clap(long)]
    pan: Option<String>,
}

/// Convert .xmf modules to .ult
///
/// A module that fails to convert is reported and skipped, the other modules are still
/// converted.
pub fn convert(args: ConvertArgs) -> Result<()> {
    if args.paths.is_empty() {
        println!("No paths provided to convert");
        return Ok(());
    }

    let pans = args
        .pan
        .as_deref()
        .map(parse_pans)
        .transpose()
        .context("Invalid pan positions")?;

    let mut found = 0;
    let mut failed = 0;

    for entry in iter_files(&args.paths, args.recursive, &["xmf"]) {
        let source = entry.path();
        let destination = destination(source, args.output.as_deref());
        found += 1;

        match convert_file(source, &destination, pans.as_deref(), args.force) {
            Ok(true) => println!("{} => {}", file_name(source), destination.to_string_lossy()),
            Ok(false) => println!("Skipped {}", file_name(source)),
            Err(err) => {
                failed += 1;
                error!(path = %source.display(), "Could not convert: {err:#}");
            }
        }
    }

    if found == 0 {
        println!("No .xmf files found");
    }

    if failed > 0 {
        bail!("{failed} of {found} modules could not be converted");
    }

    Ok(())
}

/// Load, convert and save a single module
///
/// Returns `false` if the user chose not to overwrite an existing destination.
fn convert_file(
    source: &Path,
    destination: &Path,
    pans: Option<&[u8]>,
    force: bool,
) -> Result<bool> {
    if !force && !check_for_overwrite(destination)? {
        return Ok(false);
    }

    let xmf = XmfModule::from_path(source).context("Could not read the XMF module")?;

    let title = file_name(source);
    let ult = match pans {
        Some(pans) => convert_with_pans(xmf, &title, pans),
        None => convert_module(xmf, &title),
    }
    .context("Could not convert the module")?;

    ult.to_path(destination).context(format!(
        "Could not write the ULT module to {}",
        destination.to_string_lossy()
    ))?;

    Ok(true)
}

/// Where the converted version of a module should be written
fn destination(source: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(folder) => {
            let stem = source.file_stem().unwrap_or_default().to_string_lossy();
            folder.join(format!("{stem}.ult"))
        }
        None => source.with_extension("ult"),
    }
}

fn parse_pans(list: &str) -> Result<Vec<u8>> {
    list.split(',')
        .map(|pan| {
            let pan = pan.trim();
            match pan.parse::<u8>() {
                Ok(value @ 0..=15) => Ok(value),
                _ => Err(Error::msg(format!("{pan:?} is not a pan position (0-15)"))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use ultxmf::ult::UltModule;

    /// The smallest possible XMF module: one channel, one empty section, one 2-byte sample
    fn xmf_bytes() -> Vec<u8> {
        let mut bytes = vec![0];

        let mut entry = [0; 16];
        entry[9] = 2;
        entry[14..16].copy_from_slice(&8000u16.to_le_bytes());
        bytes.extend_from_slice(&entry);
        bytes.extend(vec![0; 255 * 16]);

        bytes.push(0);
        bytes.extend(vec![0xFF; 255]);

        bytes.extend_from_slice(&[0, 0, 8]);
        bytes.extend(vec![0; 64 * 6]);
        bytes.extend_from_slice(&[0x10, 0xF0]);
        bytes
    }

    #[test]
    fn destinations() {
        assert_eq!(
            destination(Path::new("music/MAIN3.XMF"), None),
            Path::new("music/MAIN3.ult")
        );
        assert_eq!(
            destination(Path::new("music/MAIN3.XMF"), Some(Path::new("out"))),
            Path::new("out/MAIN3.ult")
        );
    }

    #[test]
    fn pans() {
        assert_eq!(parse_pans("0, 15,7").unwrap(), [0, 15, 7]);
        assert!(parse_pans("16").is_err());
        assert!(parse_pans("left").is_err());
    }

    #[test]
    fn converts_and_keeps_going() {
        let folder = tempfile::tempdir().unwrap();
        fs::write(folder.path().join("GOOD.XMF"), xmf_bytes()).unwrap();
        fs::write(folder.path().join("BAD.XMF"), [0; 10]).unwrap();

        let output = folder.path().join("out");
        let args = ConvertArgs {
            paths: vec![folder.path().to_owned()],
            recursive: false,
            output: Some(output.clone()),
            force: true,
            pan: None,
        };

        assert!(convert(args).is_err());

        let ult = UltModule::from_path(output.join("GOOD.ult")).unwrap();
        assert_eq!(ult.title.trimmed(), "GOOD.XMF");
        assert_eq!(ult.tracks.len(), 1);
        assert_eq!(ult.tracks[0].pan, 8);
        assert_eq!(ult.samples[0].data, [0x10, 0xF0]);

        // Nothing, not even a partial file, is written for the broken module
        assert!(!output.join("BAD.ult").exists());
        assert_eq!(fs::read_dir(&output).unwrap().count(), 1);
    }
}
