//! ULT sample descriptors

use super::{FromReaderError, ToWriterError};
use crate::{
    io::{read_array, read_byte, read_u16_le, read_u32_le, write_byte},
    text::Text,
    voice::VoiceControl,
};
use std::io::{Read, Write};

/// A sample descriptor plus its PCM data
///
/// The data range (`data_start..data_end`) describes where the sample lived in GUS memory;
/// only its length matters for the file layout. The PCM data itself is stored after all
/// pattern data, in descriptor order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UltSample {
    pub name: Text<32>,

    /// The 8.3 file name the sample was imported from
    pub dos_name: Text<12>,

    pub loop_start: u32,
    pub loop_end: u32,
    pub data_start: u32,
    pub data_end: u32,
    pub volume: u8,
    pub flags: VoiceControl,
    pub frequency: u16,
    pub finetune: u16,

    /// Raw PCM, `data_end - data_start` bytes
    pub data: Vec<u8>,
}

impl UltSample {
    /// The number of bytes a descriptor takes up on disk
    pub const HEADER_LEN: usize = 66;

    /// The length of the PCM data according to the descriptor
    ///
    /// Returns [`None`] if the end offset lies before the start offset.
    pub fn len(&self) -> Option<usize> {
        self.data_end
            .checked_sub(self.data_start)
            .map(|len| len as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Read a descriptor, leaving the PCM data empty
    pub(crate) fn header_from_reader<R>(mut reader: R, index: usize) -> Result<Self, FromReaderError>
    where
        R: Read,
    {
        let sample = Self {
            name: Text::from_bytes(read_array(&mut reader)?),
            dos_name: Text::from_bytes(read_array(&mut reader)?),
            loop_start: read_u32_le(&mut reader)?,
            loop_end: read_u32_le(&mut reader)?,
            data_start: read_u32_le(&mut reader)?,
            data_end: read_u32_le(&mut reader)?,
            volume: read_byte(&mut reader)?,
            flags: VoiceControl(read_byte(&mut reader)?),
            frequency: read_u16_le(&mut reader)?,
            finetune: read_u16_le(&mut reader)?,
            data: Vec::new(),
        };

        if sample.len().is_none() {
            return Err(FromReaderError::InvalidSampleRange {
                index,
                start: sample.data_start,
                end: sample.data_end,
            });
        }

        Ok(sample)
    }

    /// Check that the descriptor's range matches the PCM data
    pub(crate) fn check(&self, index: usize) -> Result<(), ToWriterError> {
        match self.len() {
            None => Err(ToWriterError::InvalidSampleRange {
                index,
                start: self.data_start,
                end: self.data_end,
            }),
            Some(len) if len != self.data.len() => Err(ToWriterError::SampleLength {
                index,
                expected: len,
                actual: self.data.len(),
            }),
            Some(_) => Ok(()),
        }
    }

    pub(crate) fn header_to_writer<W>(&self, mut writer: W) -> std::io::Result<()>
    where
        W: Write,
    {
        writer.write_all(self.name.bytes())?;
        writer.write_all(self.dos_name.bytes())?;
        writer.write_all(&self.loop_start.to_le_bytes())?;
        writer.write_all(&self.loop_end.to_le_bytes())?;
        writer.write_all(&self.data_start.to_le_bytes())?;
        writer.write_all(&self.data_end.to_le_bytes())?;
        write_byte(self.volume, &mut writer)?;
        write_byte(self.flags.0, &mut writer)?;
        writer.write_all(&self.frequency.to_le_bytes())?;
        writer.write_all(&self.finetune.to_le_bytes())
    }
}
