//! The XMF sample registry

use crate::{
    io::{read_byte, read_u16_le, read_uint_le},
    voice::VoiceControl,
};
use std::io::{Read, Result};

/// The width in bytes of the packed offsets in a registry entry
const OFFSET_WIDTH: usize = 3;

/// A sample registry entry plus its PCM data
///
/// The offsets are addresses in GUS memory, stored as packed 24-bit little-endian integers.
/// Only entries that span at least one byte are kept when a module is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmfSample {
    /// Where playback starts, relative to `start_offset`
    pub playback_shift: u32,

    /// Shifts `start_offset`
    pub start_shift: u32,

    /// Where the sample is loaded into GUS memory
    pub start_offset: u32,

    /// One past the last byte of the sample in GUS memory
    pub end_offset: u32,

    /// Used as the sample volume
    pub param: u8,

    pub voice_control: VoiceControl,
    pub frequency: u16,

    /// Raw, signed PCM
    pub data: Vec<u8>,
}

impl XmfSample {
    /// The number of registry slots in every module
    pub const SLOTS: usize = 256;

    /// The number of bytes an entry takes up on disk
    pub const LEN: usize = 16;

    /// The length of the sample, zero if the end lies before the start
    pub fn len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a registry entry, leaving the PCM data empty
    pub(crate) fn entry_from_reader<R>(mut reader: R) -> Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            playback_shift: read_uint_le(&mut reader, OFFSET_WIDTH)?,
            start_shift: read_uint_le(&mut reader, OFFSET_WIDTH)?,
            start_offset: read_uint_le(&mut reader, OFFSET_WIDTH)?,
            end_offset: read_uint_le(&mut reader, OFFSET_WIDTH)?,
            param: read_byte(&mut reader)?,
            voice_control: VoiceControl(read_byte(&mut reader)?),
            frequency: read_u16_le(&mut reader)?,
            data: Vec::new(),
        })
    }
}
