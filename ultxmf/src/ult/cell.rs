//! Pattern cells and the tracks they make up

use crate::u4;

/// A single effect slot: a 4-bit command and its parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    pub command: u4,
    pub param: u8,
}

impl Effect {
    /// The command that sets the note volume
    pub const SET_VOLUME: u8 = 0x0C;

    pub fn new(command: u4, param: u8) -> Self {
        Self { command, param }
    }

    /// The "no effect" effect
    pub fn none() -> Self {
        Self::new(u4::new(0), 0)
    }
}

/// One note/sample/effects record, at a specific row in a specific track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub note: u8,
    pub sample: u8,
    pub effects: [Effect; 2],
}

impl Cell {
    /// The number of bytes a cell takes up uncompressed
    pub const LEN: usize = 5;

    pub fn new(note: u8, sample: u8, effects: [Effect; 2]) -> Self {
        Self {
            note,
            sample,
            effects,
        }
    }

    /// A cell without note, sample or effects
    pub fn empty() -> Self {
        Self::new(0, 0, [Effect::none(); 2])
    }

    /// Parse a cell from its on-disk representation
    ///
    /// Both effect commands share the third byte (first effect in the high nibble), and the
    /// parameters follow in reverse order: second effect first.
    pub fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        let [note, sample, commands, param_2, param_1] = bytes;

        Self {
            note,
            sample,
            effects: [
                Effect::new(u4::new(commands >> 4), param_1),
                Effect::new(u4::new(commands & 0x0F), param_2),
            ],
        }
    }

    /// Serialize the cell to its on-disk representation
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let [first, second] = self.effects;
        let commands = (u8::from(first.command) << 4) | u8::from(second.command);

        [self.note, self.sample, commands, second.param, first.param]
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

/// A single channel of pattern data, spanning every pattern in the module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Stereo position of the track (0 = left, 15 = right)
    pub pan: u8,

    /// `pattern_count * ROWS_PER_PATTERN` cells, pattern after pattern
    pub cells: Vec<Cell>,
}

impl Track {
    /// The number of rows in every pattern
    pub const ROWS_PER_PATTERN: usize = 64;

    /// Construct a track of empty cells
    pub fn new(pan: u8, pattern_count: usize) -> Self {
        Self {
            pan,
            cells: vec![Cell::empty(); pattern_count * Self::ROWS_PER_PATTERN],
        }
    }

    /// Look up the cell at a specific pattern and row
    pub fn cell(&self, pattern: usize, row: usize) -> Option<&Cell> {
        if row >= Self::ROWS_PER_PATTERN {
            return None;
        }

        self.cells.get(pattern * Self::ROWS_PER_PATTERN + row)
    }
}
