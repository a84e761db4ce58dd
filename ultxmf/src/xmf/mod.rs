//! Imperium Galactica `.xmf` module handling
//!
//! XMF modules were written for the Gravis Ultrasound. Unlike ULT, nothing is compressed:
//! the file is a fixed-size sample registry, a section play order, and then every section
//! as a plain matrix of instructions, followed by the PCM data of every registered sample.

pub mod registry;
pub mod section;

use crate::io::{read_array, read_biased_count, read_byte, read_vec};
use registry::XmfSample;
use section::Section;
use std::{
    fs::File,
    io::{self, BufReader, ErrorKind, Read},
    path::Path,
};
use thiserror::Error;
use tracing::debug;

/// The number of bytes reserved for the section order, whatever its actual length
pub const ORDER_LEN: usize = 256;

/// Terminates the section order
pub const END_OF_ORDER: u8 = 0xFF;

/// A full, in-memory XMF module
///
/// ```no_run
/// # use ultxmf::xmf::XmfModule;
/// let module = XmfModule::from_path("MAIN3.XMF")?;
/// println!("{} samples, {} sections", module.samples.len(), module.sections.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmfModule {
    pub version: u8,

    /// The registry entries that hold sample data, in registry order
    pub samples: Vec<XmfSample>,

    /// The order in which sections are played
    pub order: Vec<u8>,

    /// One byte per channel, whose purpose is unknown. They are taken to be pan positions
    /// when converting.
    pub control_flags: Vec<u8>,

    pub sections: Vec<Section>,
}

impl XmfModule {
    /// The number of instruction columns in every row
    ///
    /// On disk, this is stored as the module's sample count.
    pub fn channel_count(&self) -> usize {
        self.control_flags.len()
    }

    /// Deserialize a module from an arbitrary I/O reader
    pub fn from_reader<R>(mut reader: R) -> Result<Self, FromReaderError>
    where
        R: Read,
    {
        let version = read_byte(&mut reader)?;

        let mut samples = Vec::new();
        for slot in 0..XmfSample::SLOTS {
            let sample = XmfSample::entry_from_reader(&mut reader)?;
            if sample.is_empty() {
                debug!(slot, "Skipping empty registry slot");
            } else {
                samples.push(sample);
            }
        }

        let order = parse_order(&read_array::<_, ORDER_LEN>(&mut reader)?);

        let channel_count = read_biased_count(&mut reader)?;
        let section_count = read_biased_count(&mut reader)?;
        let control_flags = read_vec(&mut reader, channel_count)?;

        debug!(
            version,
            samples = samples.len(),
            order = order.len(),
            channels = channel_count,
            sections = section_count,
            "Reading XMF sections"
        );

        let sections = (0..section_count)
            .map(|_| Section::from_reader(&mut reader, channel_count))
            .collect::<io::Result<Vec<_>>>()?;

        for sample in &mut samples {
            sample.data = read_vec(&mut reader, sample.len())?;
        }

        Ok(Self {
            version,
            samples,
            order,
            control_flags,
            sections,
        })
    }

    /// Deserialize a module from a path on disk
    pub fn from_path<P>(path: P) -> Result<Self, FromPathError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        let module = Self::from_reader(BufReader::new(file))?;

        Ok(module)
    }
}

/// Extract the section order from its fixed-size, [`END_OF_ORDER`]-terminated table
///
/// Everything from the first terminator onward is ignored, even if it looks like valid
/// section indices.
pub fn parse_order(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .take_while(|byte| **byte != END_OF_ORDER)
        .copied()
        .collect()
}

/// Errors that might be returned from [`XmfModule::from_reader()`]
#[derive(Debug, Error)]
pub enum FromReaderError {
    /// The input ended before a fixed-size field was complete
    #[error("The module data ended unexpectedly")]
    Truncated,

    /// Any other failure that has to do with I/O
    #[error("Something failed with I/O")]
    Io(#[source] io::Error),
}

impl From<io::Error> for FromReaderError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            ErrorKind::UnexpectedEof => Self::Truncated,
            _ => Self::Io(error),
        }
    }
}

/// Errors that might be returned from [`XmfModule::from_path()`]
#[derive(Debug, Error)]
pub enum FromPathError {
    /// Opening the file itself failed
    #[error("Opening the file failed")]
    FileOpen(#[from] io::Error),

    /// Deserialization failed
    #[error("Reading the module from file failed")]
    Read(#[from] FromReaderError),
}
