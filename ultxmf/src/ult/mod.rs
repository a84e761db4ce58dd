//! UltraTracker `.ult` module handling
//!
//! A ULT module consists of a header (magic, version, title and song texts), sample
//! descriptors, a pattern order table, per-track pan positions and run-length coded
//! pattern data, followed by the raw PCM data of every sample.
//!
//! Only the `V004` revision of the layout is supported.

pub mod cell;
pub mod sample;
pub mod serde;

use self::serde::{compress_track, decompress_track, DecompressError};
use crate::{
    io::{
        bias_count, read_array, read_biased_count, read_byte, read_vec, write_byte,
        MAX_BIASED_COUNT,
    },
    text::Text,
};
use cell::Track;
use sample::UltSample;
use std::{
    fs::{create_dir_all, File},
    io::{self, BufReader, BufWriter, ErrorKind, Read, Write},
    ops::RangeInclusive,
    path::Path,
};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// The magic bytes every ULT file starts with
pub const MAGIC: &[u8; 11] = b"MAS_UTrack_";

/// The latest revision of the format, which is the only one written
pub const VERSION_V004: &[u8; 4] = b"V004";

/// The number of entries in the pattern order table
pub const ORDERS_LEN: usize = 256;

/// Marks an unused slot in the pattern order table
pub const NO_PATTERN: u8 = 0xFF;

/// A full, in-memory UltraTracker module
///
/// ```no_run
/// # use ultxmf::ult::UltModule;
/// // Load a module from a path on disk
/// let module = UltModule::from_path("MAIN3.ULT")?;
/// println!("{} tracks, {} patterns", module.tracks.len(), module.pattern_count);
///
/// // And write it back out
/// module.to_path("MAIN3_COPY.ULT")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UltModule {
    /// The format revision tag (e.g. `V004`)
    pub version: Text<4>,

    pub title: Text<32>,

    /// Free-form lines of text that accompany the song
    pub texts: Vec<Text<32>>,

    pub samples: Vec<UltSample>,

    /// The order in which patterns are played, [`NO_PATTERN`] marking unused slots
    pub orders: [u8; ORDERS_LEN],

    /// The number of patterns each track holds cells for
    pub pattern_count: usize,

    /// The channels of the module, each with their own pan position and cells
    pub tracks: Vec<Track>,
}

impl UltModule {
    /// The range of track and pattern counts the format can represent
    pub const COUNT_RANGE: RangeInclusive<usize> = 1..=MAX_BIASED_COUNT;

    /// The maximal number of song texts or samples in a module
    pub const LIST_CAPACITY: usize = u8::MAX as usize;

    /// Deserialize a module from an arbitrary I/O reader
    pub fn from_reader<R>(mut reader: R) -> Result<Self, FromReaderError>
    where
        R: Read,
    {
        let magic: [u8; 11] = read_array(&mut reader)?;
        if &magic != MAGIC {
            return Err(FromReaderError::InvalidMagic);
        }

        let version = Text::from_bytes(read_array(&mut reader)?);
        let title = Text::from_bytes(read_array(&mut reader)?);

        let text_count = read_byte(&mut reader)?;
        let texts = (0..text_count)
            .map(|_| read_array(&mut reader).map(Text::from_bytes))
            .collect::<Result<Vec<_>, _>>()?;

        let sample_count = read_byte(&mut reader)? as usize;
        let mut samples = (0..sample_count)
            .map(|index| UltSample::header_from_reader(&mut reader, index))
            .collect::<Result<Vec<_>, _>>()?;

        let orders = read_array(&mut reader)?;
        let track_count = read_biased_count(&mut reader)?;
        let pattern_count = read_biased_count(&mut reader)?;
        let pans = read_vec(&mut reader, track_count)?;

        debug!(
            version = %version,
            samples = sample_count,
            tracks = track_count,
            patterns = pattern_count,
            "Reading ULT pattern data"
        );

        let cell_count = pattern_count * Track::ROWS_PER_PATTERN;
        let mut tracks = Vec::with_capacity(track_count);
        for (index, pan) in pans.into_iter().enumerate() {
            let cells = decompress_track(&mut reader, cell_count).map_err(|error| match error {
                DecompressError::Io(error) => FromReaderError::from(error),
                DecompressError::RunOverflow { run, remaining } => FromReaderError::RunOverflow {
                    track: index,
                    run,
                    remaining,
                },
            })?;

            tracks.push(Track { pan, cells });
        }

        for sample in &mut samples {
            // Headers with a negative length were rejected earlier
            let len = sample.len().unwrap_or_default();
            sample.data = read_vec(&mut reader, len)?;
        }

        Ok(Self {
            version,
            title,
            texts,
            samples,
            orders,
            pattern_count,
            tracks,
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

    /// Check that the module can be represented on disk
    ///
    /// This is done by [`to_writer()`](Self::to_writer) before anything is written, so a
    /// failed check never produces partial output.
    pub fn check(&self) -> Result<(), ToWriterError> {
        check_count("song text", self.texts.len(), 0..=Self::LIST_CAPACITY)?;
        check_count("sample", self.samples.len(), 0..=Self::LIST_CAPACITY)?;
        check_count("track", self.tracks.len(), Self::COUNT_RANGE)?;
        check_count("pattern", self.pattern_count, Self::COUNT_RANGE)?;

        for (index, sample) in self.samples.iter().enumerate() {
            sample.check(index)?;
        }

        let expected = self.pattern_count * Track::ROWS_PER_PATTERN;
        for (index, track) in self.tracks.iter().enumerate() {
            if track.cells.len() != expected {
                return Err(ToWriterError::TrackLength {
                    track: index,
                    expected,
                    actual: track.cells.len(),
                });
            }
        }

        Ok(())
    }

    /// Serialize the module to an arbitrary I/O writer
    pub fn to_writer<W>(&self, mut writer: W) -> Result<(), ToWriterError>
    where
        W: Write,
    {
        self.check()?;

        writer.write_all(MAGIC)?;
        writer.write_all(self.version.bytes())?;
        writer.write_all(self.title.bytes())?;

        write_byte(self.texts.len() as u8, &mut writer)?;
        for text in &self.texts {
            writer.write_all(text.bytes())?;
        }

        write_byte(self.samples.len() as u8, &mut writer)?;
        for sample in &self.samples {
            sample.header_to_writer(&mut writer)?;
        }

        writer.write_all(&self.orders)?;

        // Both counts were range-checked above
        write_byte(bias_count(self.tracks.len()).unwrap_or_default(), &mut writer)?;
        write_byte(bias_count(self.pattern_count).unwrap_or_default(), &mut writer)?;

        for track in &self.tracks {
            write_byte(track.pan, &mut writer)?;
        }

        for track in &self.tracks {
            compress_track(&track.cells, &mut writer)?;
        }

        for sample in &self.samples {
            writer.write_all(&sample.data)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Serialize the module to a path on disk
    ///
    /// The module is written to a temporary file next to the destination first, which is
    /// only moved into place once everything has been written. If anything fails, the
    /// destination is left untouched.
    pub fn to_path<P>(&self, path: P) -> Result<(), ToWriterError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let folder = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        create_dir_all(folder)?;

        let mut file = NamedTempFile::new_in(folder)?;
        self.to_writer(BufWriter::new(file.as_file_mut()))?;
        file.persist(path).map_err(io::Error::from)?;

        Ok(())
    }
}

fn check_count(
    field: &'static str,
    count: usize,
    range: RangeInclusive<usize>,
) -> Result<(), ToWriterError> {
    if range.contains(&count) {
        Ok(())
    } else {
        Err(ToWriterError::CountOutOfRange {
            field,
            count,
            range,
        })
    }
}

/// Errors that might be returned from [`UltModule::from_reader()`]
#[derive(Debug, Error)]
pub enum FromReaderError {
    /// The file doesn't start with [`MAGIC`]
    #[error("The file is not an UltraTracker module")]
    InvalidMagic,

    /// The input ended before a fixed-size field was complete
    #[error("The module data ended unexpectedly")]
    Truncated,

    /// A sample descriptor's end offset lies before its start offset
    #[error("Sample {index} ends ({end:#X}) before it starts ({start:#X})")]
    InvalidSampleRange { index: usize, start: u32, end: u32 },

    /// A repeated cell would run past the end of its track
    #[error("A run of {run} cells in track {track} overflows the track ({remaining} cells left)")]
    RunOverflow {
        track: usize,
        run: usize,
        remaining: usize,
    },

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

/// Errors that might be returned from [`UltModule::from_path()`]
#[derive(Debug, Error)]
pub enum FromPathError {
    /// Opening the file itself failed
    #[error("Opening the file failed")]
    FileOpen(#[from] io::Error),

    /// Deserialization failed
    #[error("Reading the module from file failed")]
    Read(#[from] FromReaderError),
}

/// Errors that might be returned from [`UltModule::to_writer()`] and [`UltModule::to_path()`]
#[derive(Debug, Error)]
pub enum ToWriterError {
    /// A count falls outside of what its field on disk can store
    #[error("The {field} count {count} is outside of the storable range {range:?}")]
    CountOutOfRange {
        field: &'static str,
        count: usize,
        range: RangeInclusive<usize>,
    },

    /// A sample descriptor's end offset lies before its start offset
    #[error("Sample {index} ends ({end:#X}) before it starts ({start:#X})")]
    InvalidSampleRange { index: usize, start: u32, end: u32 },

    /// A sample's PCM data doesn't match the length its descriptor claims
    #[error("Sample {index} should hold {expected} bytes of data, but holds {actual}")]
    SampleLength {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A track doesn't hold exactly one cell per row of every pattern
    #[error("Track {track} should hold {expected} cells, but holds {actual}")]
    TrackLength {
        track: usize,
        expected: usize,
        actual: usize,
    },

    /// Any failure that has to do with I/O
    #[error("Something failed with I/O")]
    Io(#[from] io::Error),
}
