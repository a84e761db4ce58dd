use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ultxmf_tools::convert::{convert, ConvertArgs};
use ultxmf_tools::extract::{extract, ExtractArgs};
use ultxmf_tools::inspect::{inspect, InspectArgs};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
enum Cli {
    Convert(ConvertArgs),
    Inspect(InspectArgs),
    Extract(ExtractArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse_from(wild::args()) {
        Cli::Convert(args) => convert(args),
        Cli::Inspect(args) => inspect(&args),
        Cli::Extract(args) => extract(args),
    }
}
