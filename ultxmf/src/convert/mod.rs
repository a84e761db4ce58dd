//! Converting XMF modules to ULT
//!
//! Every XMF channel becomes a ULT track and every section a pattern, in the same order. The
//! section play order carries over as the pattern order, and the registered samples become
//! ULT samples with their PCM data moved over as-is.

pub mod effect;

use crate::{
    io::MAX_BIASED_COUNT,
    text::Text,
    u4,
    ult::{
        cell::{Cell, Effect as UltEffect, Track},
        sample::UltSample,
        UltModule, NO_PATTERN, ORDERS_LEN, VERSION_V004,
    },
    xmf::{
        registry::XmfSample,
        section::{Effect as XmfEffect, Instruction, Section},
        XmfModule,
    },
};
use effect::remap_instruction;
use thiserror::Error;
use tracing::warn;

/// The song texts every converted module carries
pub const SONG_TEXTS: [&str; 2] = [
    "Converted from XMF with ultxmf",
    "Imperium Galactica music",
];

/// Convert an XMF module, using its control flags as track pan positions
///
/// ```no_run
/// # use ultxmf::{convert::convert, xmf::XmfModule};
/// let xmf = XmfModule::from_path("MAIN3.XMF")?;
/// let ult = convert(xmf, "MAIN3.XMF")?;
/// ult.to_path("MAIN3.ULT")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn convert(xmf: XmfModule, title: &str) -> Result<UltModule, ConvertError> {
    let pans = xmf.control_flags.clone();
    convert_with_pans(xmf, title, &pans)
}

/// Convert an XMF module, taking track pan positions from `pans`
///
/// Track `n` is panned to `pans[n]`, extra values are ignored.
pub fn convert_with_pans(
    xmf: XmfModule,
    title: &str,
    pans: &[u8],
) -> Result<UltModule, ConvertError> {
    let track_count = xmf.channel_count();
    let pattern_count = xmf.sections.len();

    for (field, count) in [("track", track_count), ("pattern", pattern_count)] {
        if count == 0 {
            return Err(ConvertError::Empty { field });
        }
    }

    check_capacity("track", track_count, MAX_BIASED_COUNT)?;
    check_capacity("pattern", pattern_count, MAX_BIASED_COUNT)?;
    check_capacity("pattern order", xmf.order.len(), ORDERS_LEN)?;
    check_capacity("sample", xmf.samples.len(), UltModule::LIST_CAPACITY)?;

    if pans.len() < track_count {
        return Err(ConvertError::PanTable {
            expected: track_count,
            actual: pans.len(),
        });
    }

    let mut orders = [NO_PATTERN; ORDERS_LEN];
    orders[..xmf.order.len()].copy_from_slice(&xmf.order);

    let tracks = translate_sections(&xmf.sections, track_count)?
        .into_iter()
        .zip(pans)
        .map(|(cells, pan)| Track { pan: *pan, cells })
        .collect();

    let samples = xmf
        .samples
        .into_iter()
        .enumerate()
        .map(|(index, sample)| convert_sample(index + 1, sample))
        .collect();

    Ok(UltModule {
        version: Text::from_bytes(*VERSION_V004),
        title: Text::new(title),
        texts: SONG_TEXTS.iter().map(|text| Text::new(text)).collect(),
        samples,
        orders,
        pattern_count,
        tracks,
    })
}

/// Turn the XMF instruction matrix into per-track cell lists
///
/// Sections are walked in the order they are stored in (not the order they are played in),
/// row after row, carrying every track's global volume along the way.
pub fn translate_sections(
    sections: &[Section],
    track_count: usize,
) -> Result<Vec<Vec<Cell>>, ConvertError> {
    let mut global_volumes = vec![0; track_count];
    let cell_count = sections.len() * Track::ROWS_PER_PATTERN;
    let mut tracks = vec![Vec::with_capacity(cell_count); track_count];

    for (section_index, section) in sections.iter().enumerate() {
        if section.rows.len() != Section::ROWS {
            return Err(ConvertError::SectionLength {
                section: section_index,
                actual: section.rows.len(),
            });
        }

        for (row_index, row) in section.rows.iter().enumerate() {
            if row.len() != track_count {
                return Err(ConvertError::RowWidth {
                    section: section_index,
                    row: row_index,
                    expected: track_count,
                    actual: row.len(),
                });
            }

            for (track, instruction) in row.iter().enumerate() {
                let (global_volume, instruction) =
                    remap_instruction(global_volumes[track], *instruction);
                global_volumes[track] = global_volume;

                let position = Position {
                    section: section_index,
                    row: row_index,
                    track,
                };
                tracks[track].push(to_cell(instruction, position));
            }
        }
    }

    Ok(tracks)
}

#[derive(Debug, Clone, Copy)]
struct Position {
    section: usize,
    row: usize,
    track: usize,
}

fn to_cell(instruction: Instruction, position: Position) -> Cell {
    let [first, second] = instruction.effects;

    Cell::new(
        instruction.note,
        instruction.sample,
        [to_ult_effect(first, position), to_ult_effect(second, position)],
    )
}

fn to_ult_effect(effect: XmfEffect, position: Position) -> UltEffect {
    if effect.code <= 0x0F {
        UltEffect::new(u4::new(effect.code), effect.param)
    } else {
        warn!(
            code = effect.code,
            param = effect.param,
            section = position.section,
            row = position.row,
            track = position.track,
            "Dropping an effect that doesn't fit in a ULT cell"
        );
        UltEffect::none()
    }
}

fn convert_sample(number: usize, sample: XmfSample) -> UltSample {
    UltSample {
        name: Text::new(&format!("Sample {number}")),
        dos_name: Text::new(&format!("SMP{number:03}.RAW")),
        loop_start: sample.playback_shift,
        loop_end: sample.start_shift,
        data_start: sample.start_offset,
        data_end: sample.end_offset,
        volume: sample.param,
        flags: sample.voice_control,
        frequency: sample.frequency,
        finetune: 0,
        data: sample.data,
    }
}

fn check_capacity(field: &'static str, count: usize, capacity: usize) -> Result<(), ConvertError> {
    if count > capacity {
        Err(ConvertError::CapacityExceeded {
            field,
            count,
            capacity,
        })
    } else {
        Ok(())
    }
}

/// An error describing what could go wrong converting an [`XmfModule`] to an [`UltModule`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// More items than the ULT format has room for
    #[error("The module has {count} {field}s, but ULT can hold at most {capacity}")]
    CapacityExceeded {
        field: &'static str,
        count: usize,
        capacity: usize,
    },

    /// ULT needs at least one track and one pattern
    #[error("The module has no {field}s")]
    Empty { field: &'static str },

    /// The pan source doesn't cover every track
    #[error("Expected a pan position for each of the {expected} tracks, got {actual}")]
    PanTable { expected: usize, actual: usize },

    /// A section doesn't have exactly [`Section::ROWS`] rows
    #[error("Section {section} has {actual} rows")]
    SectionLength { section: usize, actual: usize },

    /// A row doesn't have one instruction per channel
    #[error("Row {row} of section {section} has {actual} instructions instead of {expected}")]
    RowWidth {
        section: usize,
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::VoiceControl;
    use std::io::Cursor;

    fn sample(start: u32, end: u32, frequency: u16) -> XmfSample {
        XmfSample {
            playback_shift: 1,
            start_shift: 2,
            start_offset: start,
            end_offset: end,
            param: 0xF0,
            voice_control: VoiceControl(VoiceControl::LOOP),
            frequency,
            data: vec![0x55; (end - start) as usize],
        }
    }

    fn xmf(channel_count: usize, section_count: usize) -> XmfModule {
        XmfModule {
            version: 1,
            samples: vec![sample(0, 4, 8000)],
            order: vec![0],
            control_flags: vec![7; channel_count],
            sections: vec![Section::new(channel_count); section_count],
        }
    }

    fn instruction(effects: [XmfEffect; 2]) -> Instruction {
        Instruction {
            note: 0,
            sample: 0,
            effects,
        }
    }

    #[test]
    fn single_note() {
        let mut xmf = xmf(1, 1);
        xmf.sections[0].rows[0][0] = Instruction {
            note: 60,
            sample: 1,
            effects: Default::default(),
        };

        let ult = convert(xmf, "SONG.XMF").unwrap();

        assert_eq!(ult.tracks.len(), 1);
        assert_eq!(ult.pattern_count, 1);
        assert_eq!(ult.orders[0], 0);
        assert!(ult.orders[1..].iter().all(|order| *order == NO_PATTERN));
        assert_eq!(ult.tracks[0].cells.len(), Track::ROWS_PER_PATTERN);
        assert_eq!(ult.tracks[0].cells[0].to_bytes(), [60, 1, 0, 0, 0]);
        assert!(ult.tracks[0].cells[1..].iter().all(|cell| *cell == Cell::empty()));

        assert_eq!(ult.title.trimmed(), "SONG.XMF");
        assert_eq!(ult.version.bytes(), VERSION_V004);
        assert_eq!(ult.texts.len(), 2);

        assert_eq!(ult.samples.len(), 1);
        assert_eq!(ult.samples[0].len(), Some(4));
        assert_eq!(ult.samples[0].frequency, 8000);

        // The result survives a trip through the file format
        let mut bytes = Vec::new();
        ult.to_writer(&mut bytes).unwrap();
        assert_eq!(UltModule::from_reader(Cursor::new(bytes)).unwrap(), ult);
    }

    #[test]
    fn samples() {
        let mut xmf = xmf(1, 1);
        xmf.samples.push(sample(0x10, 0x13, 22050));

        let ult = convert(xmf, "SONG.XMF").unwrap();
        let sample = &ult.samples[1];

        assert_eq!(sample.name.trimmed(), "Sample 2");
        assert_eq!(sample.dos_name.trimmed(), "SMP002.RAW");
        assert_eq!(sample.loop_start, 1);
        assert_eq!(sample.loop_end, 2);
        assert_eq!(sample.data_start, 0x10);
        assert_eq!(sample.data_end, 0x13);
        assert_eq!(sample.volume, 0xF0);
        assert!(sample.flags.is_looped());
        assert_eq!(sample.finetune, 0);
        assert_eq!(sample.frequency, 22050);
        assert_eq!(sample.data, [0x55; 3]);
    }

    #[test]
    fn global_volume_carries_over_rows_and_sections() {
        let mut xmf = xmf(2, 2);
        xmf.sections[0].rows[0][0] =
            instruction([XmfEffect::new(XmfEffect::SET_GLOBAL_VOLUME, 10), XmfEffect::default()]);
        xmf.sections[1].rows[5][0] =
            instruction([XmfEffect::default(), XmfEffect::new(XmfEffect::SET_VOLUME, 15)]);
        xmf.sections[1].rows[5][1] =
            instruction([XmfEffect::new(XmfEffect::SET_VOLUME, 15), XmfEffect::default()]);

        let ult = convert(xmf, "SONG.XMF").unwrap();

        let swallowed = ult.tracks[0].cells[0];
        assert_eq!(swallowed.effects, [UltEffect::none(); 2]);

        let scaled = ult.tracks[0].cells[Track::ROWS_PER_PATTERN + 5];
        assert_eq!(
            scaled.effects,
            [UltEffect::none(), UltEffect::new(u4::new(0xC), 10)]
        );

        // The other track never received a global volume
        let silenced = ult.tracks[1].cells[Track::ROWS_PER_PATTERN + 5];
        assert_eq!(silenced.effects[0], UltEffect::new(u4::new(0xC), 0));
    }

    #[test]
    fn unrepresentable_effects_are_dropped() {
        let mut xmf = xmf(1, 1);
        xmf.sections[0].rows[0][0] =
            instruction([XmfEffect::new(0x21, 3), XmfEffect::new(0x0A, 4)]);

        let ult = convert(xmf, "SONG.XMF").unwrap();
        assert_eq!(
            ult.tracks[0].cells[0].effects,
            [UltEffect::none(), UltEffect::new(u4::new(0xA), 4)]
        );
    }

    #[test]
    fn order_and_pans() {
        let mut xmf = xmf(3, 2);
        xmf.order = vec![1, 0, 1];

        let ult = convert_with_pans(xmf, "SONG.XMF", &[1, 2, 3, 4, 5]).unwrap();

        assert_eq!(&ult.orders[..4], &[1, 0, 1, NO_PATTERN]);
        assert_eq!(ult.pattern_count, 2);
        assert_eq!(
            ult.tracks.iter().map(|track| track.pan).collect::<Vec<_>>(),
            [1, 2, 3]
        );
    }

    #[test]
    fn short_pan_table() {
        assert_eq!(
            convert_with_pans(xmf(3, 1), "SONG.XMF", &[1, 2]),
            Err(ConvertError::PanTable {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn capacity() {
        let mut too_many_samples = xmf(1, 1);
        too_many_samples.samples = vec![sample(0, 1, 8000); 256];
        assert_eq!(
            convert(too_many_samples, "SONG.XMF"),
            Err(ConvertError::CapacityExceeded {
                field: "sample",
                count: 256,
                capacity: 255
            })
        );

        assert_eq!(
            convert(xmf(1, 257), "SONG.XMF"),
            Err(ConvertError::CapacityExceeded {
                field: "pattern",
                count: 257,
                capacity: 256
            })
        );

        assert_eq!(
            convert(xmf(0, 1), "SONG.XMF"),
            Err(ConvertError::Empty { field: "track" })
        );

        let mut long_order = xmf(1, 1);
        long_order.order = vec![0; 300];
        assert!(matches!(
            convert(long_order, "SONG.XMF"),
            Err(ConvertError::CapacityExceeded {
                field: "pattern order",
                ..
            })
        ));
    }

    #[test]
    fn ragged_rows() {
        let mut xmf = xmf(2, 1);
        xmf.sections[0].rows[3].pop();

        assert_eq!(
            convert(xmf, "SONG.XMF"),
            Err(ConvertError::RowWidth {
                section: 0,
                row: 3,
                expected: 2,
                actual: 1
            })
        );
    }
}
