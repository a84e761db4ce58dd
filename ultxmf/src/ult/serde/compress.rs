use crate::ult::cell::Cell;
use std::io::{Result, Write};

/// Compress the cells of a single track
///
/// Cells are always written out literally, one 5-byte record each, so no repeat markers are
/// ever produced. The result is larger than it needs to be, but any ULT loader reads it.
/// Cells whose note is [`REPEAT_BYTE`](super::REPEAT_BYTE) are written as-is too, and will be
/// misread as a repeat marker.
pub fn compress_track<'a, I, W>(cells: I, mut writer: W) -> Result<()>
where
    I: IntoIterator<Item = &'a Cell>,
    W: Write,
{
    for cell in cells {
        writer.write_all(&cell.to_bytes())?;
    }

    Ok(())
}
