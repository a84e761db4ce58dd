//! Byte-level reading and writing primitives shared by the codecs

use std::{
    io::{Error, ErrorKind, Read, Result, Write},
    slice,
};

/// The largest count a biased (`count - 1`) byte can represent
pub const MAX_BIASED_COUNT: usize = u8::MAX as usize + 1;

pub fn read_byte<R>(mut reader: R) -> Result<u8>
where
    R: Read,
{
    let mut byte = 0;
    reader.read_exact(slice::from_mut(&mut byte))?;
    Ok(byte)
}

pub fn read_array<R, const N: usize>(mut reader: R) -> Result<[u8; N]>
where
    R: Read,
{
    let mut bytes = [0; N];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

pub fn read_vec<R>(mut reader: R, len: usize) -> Result<Vec<u8>>
where
    R: Read,
{
    let mut bytes = vec![0; len];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

/// Read an unsigned integer of `width` bytes (at most 4), stored little-endian
pub fn read_uint_le<R>(mut reader: R, width: usize) -> Result<u32>
where
    R: Read,
{
    debug_assert!(width <= 4);

    let mut bytes = [0; 4];
    reader.read_exact(&mut bytes[..width])?;
    Ok(u32::from_le_bytes(bytes))
}

/// Write the `width` low bytes of an unsigned integer, little-endian
///
/// Fails with [`ErrorKind::InvalidInput`] if the value does not fit in `width` bytes.
pub fn write_uint_le<W>(value: u32, width: usize, mut writer: W) -> Result<()>
where
    W: Write,
{
    debug_assert!(width <= 4);

    if width < 4 && value >> (width * 8) != 0 {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("{value} does not fit in {width} bytes"),
        ));
    }

    writer.write_all(&value.to_le_bytes()[..width])
}

pub fn read_u16_le<R>(reader: R) -> Result<u16>
where
    R: Read,
{
    read_array(reader).map(u16::from_le_bytes)
}

pub fn read_u32_le<R>(reader: R) -> Result<u32>
where
    R: Read,
{
    read_array(reader).map(u32::from_le_bytes)
}

pub fn write_byte<W>(value: u8, mut writer: W) -> Result<()>
where
    W: Write,
{
    writer.write_all(slice::from_ref(&value))
}

/// Read a count that is stored on disk as `count - 1`
pub fn read_biased_count<R>(reader: R) -> Result<usize>
where
    R: Read,
{
    read_byte(reader).map(|byte| byte as usize + 1)
}

/// Encode a count as `count - 1`, or [`None`] if it falls outside `1..=256`
pub fn bias_count(count: usize) -> Option<u8> {
    count.checked_sub(1).and_then(|biased| u8::try_from(biased).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn uint_24() {
        assert_eq!(
            read_uint_le(Cursor::new([0x56, 0x34, 0x12, 0xFF]), 3).unwrap(),
            0x123456
        );

        let mut dest = Vec::new();
        write_uint_le(0x123456, 3, &mut dest).unwrap();
        assert_eq!(dest, [0x56, 0x34, 0x12]);

        assert_eq!(
            write_uint_le(0x1000000, 3, Vec::new()).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn uint_leaves_the_rest_of_the_stream() {
        let mut reader = Cursor::new([1, 0, 0, 2]);
        assert_eq!(read_uint_le(&mut reader, 3).unwrap(), 1);
        assert_eq!(read_byte(&mut reader).unwrap(), 2);
    }

    #[test]
    fn truncated() {
        assert_eq!(
            read_uint_le(Cursor::new([1, 2]), 3).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
        assert_eq!(
            read_array::<_, 4>(Cursor::new([1, 2])).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn biased_counts() {
        assert_eq!(read_biased_count(Cursor::new([0])).unwrap(), 1);
        assert_eq!(read_biased_count(Cursor::new([0xFF])).unwrap(), 256);

        assert_eq!(bias_count(1), Some(0));
        assert_eq!(bias_count(MAX_BIASED_COUNT), Some(0xFF));
        assert_eq!(bias_count(0), None);
        assert_eq!(bias_count(257), None);
    }
}
