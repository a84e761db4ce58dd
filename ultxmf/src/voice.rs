//! Gravis Ultrasound voice control bits
//!
//! Both XMF and ULT were written with the GUS in mind, and store the card's voice control
//! register verbatim as their per-sample flag byte.
use std::fmt;

/// The voice control byte of a sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VoiceControl(pub u8);

impl VoiceControl {
    pub const STOPPED: u8 = 0x01;
    pub const STOP: u8 = 0x02;
    pub const DATA_16_BIT: u8 = 0x04;
    pub const LOOP: u8 = 0x08;
    pub const BIDIRECTIONAL: u8 = 0x10;
    pub const IRQ: u8 = 0x20;
    pub const BACKWARDS: u8 = 0x40;
    pub const IRQ_PENDING: u8 = 0x80;

    fn is_set(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    /// Is the sample data made up of 16-bit words instead of bytes?
    pub fn is_16_bit(self) -> bool {
        self.is_set(Self::DATA_16_BIT)
    }

    pub fn is_looped(self) -> bool {
        self.is_set(Self::LOOP)
    }

    /// Does a looped sample ping-pong instead of jumping back to the loop start?
    pub fn is_bidirectional(self) -> bool {
        self.is_set(Self::BIDIRECTIONAL)
    }

    pub fn is_backwards(self) -> bool {
        self.is_set(Self::BACKWARDS)
    }
}

impl fmt::Display for VoiceControl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            if self.is_16_bit() { "16 Bit" } else { " 8 Bit" },
            if self.is_looped() { "Loop" } else { "Once" },
            if self.is_bidirectional() {
                "BiDi"
            } else {
                "Forward"
            },
            if self.is_backwards() {
                "Decreasing"
            } else {
                "Increasing"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits() {
        let flags = VoiceControl(VoiceControl::LOOP | VoiceControl::BIDIRECTIONAL);
        assert!(flags.is_looped());
        assert!(flags.is_bidirectional());
        assert!(!flags.is_16_bit());
        assert!(!flags.is_backwards());

        assert_eq!(flags.to_string(), " 8 Bit|Loop|BiDi|Increasing");
    }
}
