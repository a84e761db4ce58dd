//! Emulating XMF's global volume in ULT
//!
//! ULT has no global volume effect. Instead, every channel remembers the last global volume
//! it was given and scales its subsequent set-volume effects accordingly.

use crate::xmf::section::{Effect, Instruction};

/// The global volume at which set-volume effects are left as they are
pub const FULL_GLOBAL_VOLUME: u8 = 15;

/// Remap a single effect, given the channel's current global volume
///
/// Returns the channel's (possibly updated) global volume together with the effect that
/// should be emitted in place of the original one.
pub fn remap_effect(global_volume: u8, effect: Effect) -> (u8, Effect) {
    match effect.code {
        Effect::SET_GLOBAL_VOLUME => (effect.param, Effect::default()),
        Effect::SET_VOLUME => (
            global_volume,
            Effect::new(Effect::SET_VOLUME, scale_volume(effect.param, global_volume)),
        ),
        _ => (global_volume, effect),
    }
}

/// Remap both effects of an instruction, one after the other
pub fn remap_instruction(global_volume: u8, instruction: Instruction) -> (u8, Instruction) {
    let mut instruction = instruction;

    let global_volume = instruction
        .effects
        .iter_mut()
        .fold(global_volume, |global_volume, effect| {
            let (global_volume, remapped) = remap_effect(global_volume, *effect);
            *effect = remapped;
            global_volume
        });

    (global_volume, instruction)
}

/// `volume * global_volume / 15`, rounded to the nearest integer (halves up) and saturated
pub fn scale_volume(volume: u8, global_volume: u8) -> u8 {
    let doubled = 2 * volume as u32 * global_volume as u32;
    let divisor = 2 * FULL_GLOBAL_VOLUME as u32;
    let scaled = (doubled + FULL_GLOBAL_VOLUME as u32) / divisor;

    scaled.min(u8::MAX as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_volume_is_swallowed() {
        let (global_volume, effect) =
            remap_effect(0, Effect::new(Effect::SET_GLOBAL_VOLUME, 10));

        assert_eq!(global_volume, 10);
        assert_eq!(effect, Effect::default());
    }

    #[test]
    fn volume_is_scaled() {
        let (global_volume, effect) = remap_effect(10, Effect::new(Effect::SET_VOLUME, 15));

        assert_eq!(global_volume, 10);
        assert_eq!(effect, Effect::new(Effect::SET_VOLUME, 10));
    }

    #[test]
    fn volume_without_global_volume_is_silenced() {
        let (_, effect) = remap_effect(0, Effect::new(Effect::SET_VOLUME, 0x40));
        assert_eq!(effect.param, 0);
    }

    #[test]
    fn other_effects_pass_through() {
        let effect = Effect::new(0x0F, 0x06);
        assert_eq!(remap_effect(7, effect), (7, effect));
    }

    #[test]
    fn both_slots_share_the_global_volume() {
        let instruction = Instruction {
            note: 60,
            sample: 1,
            effects: [
                Effect::new(Effect::SET_GLOBAL_VOLUME, 5),
                Effect::new(Effect::SET_VOLUME, 30),
            ],
        };

        let (global_volume, remapped) = remap_instruction(15, instruction);
        assert_eq!(global_volume, 5);
        assert_eq!(remapped.note, 60);
        assert_eq!(remapped.sample, 1);
        assert_eq!(
            remapped.effects,
            [Effect::default(), Effect::new(Effect::SET_VOLUME, 10)]
        );
    }

    #[test]
    fn rounding() {
        assert_eq!(scale_volume(15, 10), 10);
        assert_eq!(scale_volume(7, 1), 0);
        assert_eq!(scale_volume(8, 1), 1);
        assert_eq!(scale_volume(3, 5), 1);
        assert_eq!(scale_volume(0x40, FULL_GLOBAL_VOLUME), 0x40);
        assert_eq!(scale_volume(u8::MAX, u8::MAX), u8::MAX);
    }
}
