//! Sections: the XMF equivalent of patterns

use crate::io::read_array;
use std::io::{Read, Result};

/// One of the two effects of an [`Instruction`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Effect {
    pub code: u8,
    pub param: u8,
}

impl Effect {
    /// Sets the volume of the playing note
    pub const SET_VOLUME: u8 = 0x0C;

    /// Sets the global volume (as in Fast Tracker II)
    pub const SET_GLOBAL_VOLUME: u8 = 0x10;

    pub fn new(code: u8, param: u8) -> Self {
        Self { code, param }
    }
}

/// A single note/sample/effects record in a section row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub note: u8,
    pub sample: u8,
    pub effects: [Effect; 2],
}

impl Instruction {
    /// The number of bytes an instruction takes up on disk
    pub const LEN: usize = 6;

    /// Parse an instruction from its on-disk representation
    ///
    /// Both effect codes come first, followed by the parameters in reverse order.
    pub fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        let [note, sample, code_1, code_2, param_2, param_1] = bytes;

        Self {
            note,
            sample,
            effects: [Effect::new(code_1, param_1), Effect::new(code_2, param_2)],
        }
    }

    /// Does the instruction do nothing at all?
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 64 rows of instructions, one per channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub rows: Vec<Vec<Instruction>>,
}

impl Section {
    /// The number of rows in every section
    pub const ROWS: usize = 64;

    /// A section of empty instructions
    pub fn new(channel_count: usize) -> Self {
        Self {
            rows: vec![vec![Instruction::default(); channel_count]; Self::ROWS],
        }
    }

    pub(crate) fn from_reader<R>(mut reader: R, channel_count: usize) -> Result<Self>
    where
        R: Read,
    {
        let rows = (0..Self::ROWS)
            .map(|_| {
                (0..channel_count)
                    .map(|_| read_array(&mut reader).map(Instruction::from_bytes))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<_>>()?;

        Ok(Self { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, ErrorKind};

    #[test]
    fn reversed_params() {
        let instruction = Instruction::from_bytes([60, 1, 0x10, 0x0C, 0x20, 0x0A]);

        assert_eq!(instruction.note, 60);
        assert_eq!(instruction.sample, 1);
        assert_eq!(
            instruction.effects,
            [
                Effect::new(Effect::SET_GLOBAL_VOLUME, 0x0A),
                Effect::new(Effect::SET_VOLUME, 0x20)
            ]
        );
        assert!(!instruction.is_empty());
        assert!(Instruction::from_bytes([0; 6]).is_empty());
    }

    #[test]
    fn section() {
        let mut bytes = vec![0; Section::ROWS * 2 * Instruction::LEN];
        bytes[Instruction::LEN] = 48;
        bytes[Instruction::LEN * 4] = 50;

        let section = Section::from_reader(Cursor::new(bytes), 2).unwrap();
        assert_eq!(section.rows.len(), Section::ROWS);
        assert!(section.rows.iter().all(|row| row.len() == 2));
        assert_eq!(section.rows[0][1].note, 48);
        assert_eq!(section.rows[2][0].note, 50);
    }

    #[test]
    fn truncated() {
        let bytes = vec![0; Section::ROWS * Instruction::LEN - 1];

        assert_eq!(
            Section::from_reader(Cursor::new(bytes), 1).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }
}
