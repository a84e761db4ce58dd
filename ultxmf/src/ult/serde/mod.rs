//! Run-length coding of ULT track data
//!
//! Every track is stored as a stream of 5-byte cells. A run of identical cells can be
//! collapsed by prefixing a cell with [`REPEAT_BYTE`] and a repeat count. Because the marker
//! takes the place of the note byte, a cell whose note is `0xFC` can't be stored literally;
//! the format simply has no way to tell the two apart.

mod compress;
mod decompress;

pub use compress::compress_track;
pub use decompress::{DecompressError, decompress_track};

/// Marks the start of a repeated cell
pub const REPEAT_BYTE: u8 = 0xFC;
