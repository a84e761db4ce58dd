//! # ULT/XMF Tools
//!
//! [Imperium Galactica](https://en.wikipedia.org/wiki/Imperium_Galactica) stores its music as
//! `.xmf` modules, a format written directly for the Gravis Ultrasound that no regular tracker
//! can open. This crate provides a command-line utility that converts them to UltraTracker
//! `.ult` modules, dumps the contents of both formats, and exports the raw XMF samples as
//! `.wav` files.
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=debug`) for more detail about what happens while loading
//! and converting.
//!
//! ## Convert
//!
//! ```console
//! ultxmf-tools-convert 0.1.0
//! Convert .xmf modules to .ult
//!
//! USAGE:
//!     ultxmf-tools convert [OPTIONS] [PATHS]...
//!
//! ARGS:
//!     <PATHS>...    The .xmf files, or folders containing them, that should be converted
//!
//! OPTIONS:
//!     -f, --force              Overwrite existing files without asking
//!     -h, --help               Print help information
//!     -o, --output <OUTPUT>    The destination folder for the converted modules
//!         --pan <PAN>          Comma-separated track pan positions (0-15)
//!     -r, --recursive          Search folders recursively
//!     -V, --version            Print version information
//! ```
//!
//! ### Example
//!
//! ```console
//! 4ntler@mbp > ultxmf-tools convert -o ult music/
//! MAIN1.XMF => ult/MAIN1.ult
//! MAIN2.XMF => ult/MAIN2.ult
//! MAIN3.XMF => ult/MAIN3.ult
//! ```
//!
//! ## Inspect
//!
//! ```console
//! ultxmf-tools-inspect 0.1.0
//! Inspect .ult and .xmf modules, or entire directories of them
//!
//! USAGE:
//!     ultxmf-tools inspect [OPTIONS] [PATHS]...
//!
//! ARGS:
//!     <PATHS>...    The path(s) to inspect
//!
//! OPTIONS:
//!     -h, --help         Print help information
//!     -r, --recursive    Search the folder recursively
//!     -V, --version      Print version information
//! ```
//!
//! ### Example
//!
//! ```console
//! 4ntler@mbp > ultxmf-tools inspect ult/MAIN3.ult
//! == MAIN3.ult ==
//! Magic: MAS_UTrack_
//! Version: V004
//! Title: MAIN3.XMF
//!   Converted from XMF with ultxmf
//!   Imperium Galactica music
//! # of samples: 2
//!   [000] Sample 1                         | SMP001.RAW   | 00000000 - 00001F40 | FT      0 | Freq   8363 |  8 Bit|Once|Forward|Increasing
//!   [001] Sample 2                         | SMP002.RAW   | 00001F40 - 00003E80 | FT      0 | Freq   8363 |  8 Bit|Loop|Forward|Increasing
//! # tracks: 8
//! # patterns: 12
//! ```
//!
//! ## Extract
//!
//! ```console
//! ultxmf-tools-extract 0.1.0
//! Export the samples of .xmf modules as .wav files
//!
//! USAGE:
//!     ultxmf-tools extract [OPTIONS] [PATHS]...
//!
//! ARGS:
//!     <PATHS>...    The .xmf files, or folders containing them, whose samples should be exported
//!
//! OPTIONS:
//!     -f, --force              Overwrite existing files without asking
//!     -h, --help               Print help information
//!     -o, --output <OUTPUT>    The destination folder for the .wav files
//!         --rate <RATE>        The sample rate written into every .wav file [default: 22050]
//!     -r, --recursive          Search folders recursively
//!     -V, --version            Print version information
//! ```

pub mod convert;
pub mod extract;
pub mod inspect;
pub(crate) mod utils;
