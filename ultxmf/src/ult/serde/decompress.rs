use super::REPEAT_BYTE;
use crate::{
    io::{read_array, read_byte},
    ult::cell::Cell,
};
use std::io::{self, Read};
use thiserror::Error;

/// Decompress exactly `cell_count` cells of a single track
pub fn decompress_track<R>(
    mut reader: R,
    cell_count: usize,
) -> Result<Vec<Cell>, DecompressError>
where
    R: Read,
{
    let mut cells = Vec::with_capacity(cell_count);

    while cells.len() < cell_count {
        let (cell, run) = decompress_run(&mut reader)?;

        let remaining = cell_count - cells.len();
        if run > remaining {
            return Err(DecompressError::RunOverflow { run, remaining });
        }

        cells.resize(cells.len() + run, cell);
    }

    Ok(cells)
}

/// Read a single, possibly repeated, cell
fn decompress_run<R>(mut reader: R) -> io::Result<(Cell, usize)>
where
    R: Read,
{
    let mut first = read_byte(&mut reader)?;
    let mut run = 1;

    if first == REPEAT_BYTE {
        // A repeat count of zero still produces a single cell
        run = read_byte(&mut reader)?.max(1) as usize;
        first = read_byte(&mut reader)?;
    }

    let [b1, b2, b3, b4] = read_array(&mut reader)?;

    Ok((Cell::from_bytes([first, b1, b2, b3, b4]), run))
}

/// An error describing what could go wrong decompressing a track
#[derive(Debug, Error)]
pub enum DecompressError {
    /// A repeated cell would run past the end of the track
    #[error("A run of {run} cells overflows the track, which only has {remaining} cells left")]
    RunOverflow { run: usize, remaining: usize },

    /// Any failure that has to do with I/O
    #[error("Something failed with I/O")]
    Io(#[from] io::Error),
}
