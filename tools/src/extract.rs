//! The `extract` subcommand

use crate::utils::{check_for_overwrite, file_name, iter_files};
use anyhow::{bail, Context, Result};
use clap::Args;
use std::{
    fs::{create_dir_all, File},
    path::{Path, PathBuf},
};
use tracing::error;
use ultxmf::xmf::XmfModule;
use wav::{header::WAV_FORMAT_PCM, BitDepth, Header};

/// The sample rate used when none is given
pub const DEFAULT_RATE: u32 = 22050;

#[derive(Args)]
#[clap(
    author,
    version,
    about = "Export the samples of .xmf modules as .wav files",
    long_about = None
)]
pub struct ExtractArgs {
    /// The .xmf files, or folders containing them, whose samples should be exported
    paths: Vec<PathBuf>,

    /// Search folders recursively
    #[clap(short, long)]
    recursive: bool,

    /// The destination folder for the .wav files. Defaults to next to the source.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// The sample rate written into every .wav file
    #[clap(long, default_value_t = DEFAULT_RATE)]
    rate: u32,

    /// Overwrite existing files without asking
    #[clap(short, long)]
    force: bool,
}

pub fn extract(args: ExtractArgs) -> Result<()> {
    let mut found = 0;
    let mut failed = 0;

    for entry in iter_files(&args.paths, args.recursive, &["xmf"]) {
        let source = entry.path();
        found += 1;

        println!("Processing {}", file_name(source));
        if let Err(err) = extract_file(source, &args) {
            failed += 1;
            error!(path = %source.display(), "Could not extract samples: {err:#}");
        }
    }

    if found == 0 {
        println!("No .xmf files found");
    }

    if failed > 0 {
        bail!("The samples of {failed} of {found} modules could not be exported");
    }

    Ok(())
}

fn extract_file(source: &Path, args: &ExtractArgs) -> Result<()> {
    let module = XmfModule::from_path(source).context("Could not read the XMF module")?;

    let folder = match &args.output {
        Some(folder) => folder.clone(),
        None => source.parent().unwrap_or_else(|| Path::new(".")).to_owned(),
    };
    create_dir_all(&folder).context("Could not create the output folder")?;

    for (index, sample) in module.samples.iter().enumerate() {
        let destination = folder.join(format!("{}_{:03}.wav", file_name(source), index + 1));

        if !args.force && !check_for_overwrite(&destination)? {
            continue;
        }

        write_wav(&destination, &sample.data, args.rate)?;
        println!(
            "  {:03} => {} ({} bytes)",
            index + 1,
            file_name(&destination),
            sample.len()
        );
    }

    Ok(())
}

fn write_wav(path: &Path, data: &[u8], rate: u32) -> Result<()> {
    let mut writer = File::create(path).context("Could not create output file")?;

    wav::write(
        Header::new(WAV_FORMAT_PCM, 1, rate, 8),
        &BitDepth::Eight(to_unsigned_pcm(data)),
        &mut writer,
    )
    .context("Could not write to output file")
}

/// Convert signed 8-bit PCM to the unsigned samples WAV expects, padded to an even length
pub fn to_unsigned_pcm(data: &[u8]) -> Vec<u8> {
    let mut pcm: Vec<_> = data.iter().map(|byte| byte.wrapping_add(0x80)).collect();

    if pcm.len() % 2 != 0 {
        pcm.push(0x80);
    }

    pcm
}
