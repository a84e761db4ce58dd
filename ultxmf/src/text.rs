//! Fixed-width, space-padded text fields
use std::fmt;

/// A fixed-width text field, as found in UltraTracker headers and sample descriptors
///
/// ULT stores titles, song texts and sample names as raw byte arrays of a fixed width. There
/// is no null termination: whatever bytes make up the field are its characters, and unused
/// space is conventionally filled with spaces (`0x20`). [`Text`] keeps those bytes exactly
/// as they are on disk, so a field read from a file is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Text<N> {
    /// The byte used to fill up the unused tail of a field
    pub const PADDING: u8 = 0x20;

    /// Construct a field from a string, truncating it to `N` bytes or padding it with spaces
    ///
    /// Characters are stored one byte each (Latin-1), any character that doesn't fit in a
    /// single byte is replaced with `?`.
    pub fn new(text: &str) -> Self {
        let mut bytes = [Self::PADDING; N];
        for (dest, c) in bytes.iter_mut().zip(text.chars()) {
            *dest = u8::try_from(c).unwrap_or(b'?');
        }

        Self { bytes }
    }

    /// Wrap raw field bytes, without any interpretation
    pub fn from_bytes(bytes: [u8; N]) -> Self {
        Self { bytes }
    }

    /// Gain access to the underlying bytes that make up the field
    pub fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// The field contents with trailing padding stripped
    pub fn trimmed(&self) -> String {
        self.to_string()
            .trim_end_matches(|c| c == Self::PADDING as char || c == '\0')
            .to_owned()
    }
}

impl<const N: usize> Default for Text<N> {
    fn default() -> Self {
        Self {
            bytes: [Self::PADDING; N],
        }
    }
}

impl<const N: usize> fmt::Display for Text<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.bytes
            .iter()
            .try_for_each(|byte| write!(f, "{}", *byte as char))
    }
}

impl<const N: usize> From<&str> for Text<N> {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_with_spaces() {
        let text = Text::<8>::new("MAIN");
        assert_eq!(text.bytes(), b"MAIN    ");
        assert_eq!(text.trimmed(), "MAIN");
    }

    #[test]
    fn truncates() {
        let long = "x".repeat(40);
        let text = Text::<32>::new(&long);
        assert_eq!(text.bytes(), &[b'x'; 32]);
    }

    #[test]
    fn keeps_raw_bytes() {
        let text = Text::from_bytes(*b"AB\0\0");
        assert_eq!(text.bytes(), b"AB\0\0");
        assert_eq!(text.to_string(), "AB\0\0");
        assert_eq!(text.trimmed(), "AB");
    }

    #[test]
    fn latin1() {
        let text = Text::<3>::new("é€");
        assert_eq!(text.bytes(), &[0xE9, b'?', Text::<3>::PADDING]);
    }

    #[test]
    fn default() {
        assert_eq!(Text::<4>::default().bytes(), b"    ");
    }
}
