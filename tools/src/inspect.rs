use crate::utils::{file_name, has_extension, iter_files};
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use ultxmf::{
    ult::{UltModule, MAGIC},
    xmf::XmfModule,
};

#[derive(Args)]
#[clap(
    author,
    version,
    about = "Inspect .ult and .xmf modules, or entire directories of them",
    long_about = None
)]
pub struct InspectArgs {
    /// The path(s) to inspect
    paths: Vec<PathBuf>,

    /// Search the folder recursively
    #[clap(short, long)]
    recursive: bool,
}

pub fn inspect(args: &InspectArgs) -> Result<()> {
    let paths: Vec<_> = iter_files(&args.paths, args.recursive, &["ult", "xmf"])
        .map(|entry| entry.into_path())
        .collect();

    if let Some((last, rest)) = paths.split_last() {
        for path in rest {
            print(path)?;
            println!();
        }

        print(last)?;
    }

    Ok(())
}

fn print(path: &Path) -> Result<()> {
    if has_extension(path, "ult") {
        let module = UltModule::from_path(path).context("Reading the ULT module failed")?;
        print_ult(path, &module);
    } else {
        let module = XmfModule::from_path(path).context("Reading the XMF module failed")?;
        print_xmf(path, &module);
    }

    Ok(())
}

fn print_ult(path: &Path, module: &UltModule) {
    println!("== {} ==", file_name(path));
    println!("Magic: {}", String::from_utf8_lossy(MAGIC));
    println!("Version: {}", module.version);
    println!("Title: {}", module.title.trimmed());

    for text in &module.texts {
        println!("  {}", text.trimmed());
    }

    println!("# of samples: {}", module.samples.len());
    for (index, sample) in module.samples.iter().enumerate() {
        println!(
            "  [{index:03}] {} | {} | {:08X} - {:08X} | FT {:>6} | Freq {:>6} | {}",
            sample.name,
            sample.dos_name,
            sample.data_start,
            sample.data_end,
            sample.finetune,
            sample.frequency,
            sample.flags
        );
    }

    println!("# tracks: {}", module.tracks.len());
    println!("# patterns: {}", module.pattern_count);
}

fn print_xmf(path: &Path, module: &XmfModule) {
    let notes = module
        .sections
        .iter()
        .flat_map(|section| section.rows.iter().flatten())
        .filter(|instruction| !instruction.is_empty())
        .count();

    println!("{}", file_name(path));
    println!("  Version: {}", module.version);
    println!("  Sample entries: {}", module.samples.len());
    println!("  Sample count (for music): {}", module.channel_count());
    println!("  Section count: {}", module.sections.len());
    println!("  Sections played: {}", module.order.len());
    println!("  Instructions: {notes}");
    println!("  Sample registry:");

    for (index, sample) in module.samples.iter().enumerate() {
        println!(
            "    [{index:03}] Length: {:>6}, P1: {:>3}, Control: {}, Frequency: {}",
            sample.len(),
            sample.param,
            sample.voice_control,
            sample.frequency
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ultxmf::{
        convert::convert,
        xmf::{section::Section, XmfModule},
    };

    #[test]
    fn inspects_folders() {
        let folder = tempfile::tempdir().unwrap();

        let xmf = XmfModule {
            version: 1,
            samples: Vec::new(),
            order: vec![0],
            control_flags: vec![8; 4],
            sections: vec![Section::new(4)],
        };
        convert(xmf, "SONG.XMF")
            .unwrap()
            .to_path(folder.path().join("SONG.ULT"))
            .unwrap();

        let args = InspectArgs {
            paths: vec![folder.path().to_owned()],
            recursive: false,
        };
        assert!(inspect(&args).is_ok());

        std::fs::write(folder.path().join("BROKEN.XMF"), [0; 3]).unwrap();
        assert!(inspect(&args).is_err());
    }
}
