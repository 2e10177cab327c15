//! Static catalog of the effect presets reachable through the selector.
//!
//! Titles and parameter labels are not stored on the external program
//! memories, so they have to be listed here, in the order the bank-select
//! lines address them: the chip's internal programs first, then the two
//! EEPROM pages.

/// Presets addressable by the 3-bit select code within one ROM map.
pub const SELECT_COUNT: usize = 8;

/// ROM maps: internal programs plus two EEPROM pages.
pub const MAP_COUNT: usize = 3;

/// All presets reachable by cycling the selector.
pub const PRESET_COUNT: usize = SELECT_COUNT * MAP_COUNT;

/// Names displayed for one preset.
#[derive(Debug, Clone, Copy)]
pub struct Names {
    pub title: &'static str,
    pub params: [&'static str; 3],
}

const fn names(title: &'static str, params: [&'static str; 3]) -> Names {
    Names { title, params }
}

pub static PRESETS: [Names; PRESET_COUNT] = [
    // Internal programs.
    names("ChorusReverb", ["Reverb Mix", "Chorus Rate", "Chorus Mix"]),
    names("FlangrReverb", ["Reverb Mix", "Flanger Rate", "Flanger Mix"]),
    names("Tremolo-rev", ["Reverb Mix", "Tremolo Rate", "Tremolo Mix"]),
    names("Pitch shift", ["Pitch Semi", "------------", "------------"]),
    names("Pitch-echo", ["Pitch Shift", "Echo Delay", "Echo Mix"]),
    names("Test", ["------------", "------------", "------------"]),
    names("Reverb 1", ["Reverb Time", "HF Filter", "LF Filter"]),
    names("Reverb 2", ["Reverb Time", "HF Filter", "LF Filter"]),
    // EEPROM page A.
    names("Echo Reverb", ["Delay", "Repeat", "Reverb"]),
    names("Rv+Flnge+LP", ["Reverb", "Flanger", "LPF"]),
    names("Rv+Pitch+LP", ["Reverb", "Pitch", "Filter"]),
    names("ShimmerRvOct", ["Shimmer", "Time", "Damping"]),
    names("ShimmerValLv", ["Shimmer", "Time", "Damping"]),
    names("SnglTapeEcRv", ["Time", "Feedback", "Damping"]),
    names("DualTapeEcRv", ["DlayTime", "Feedback", "Damping"]),
    names("RoomReverb", ["DlayTime", "Damping", "Feedback"]),
    // EEPROM page B, not programmed yet.
    names("EEPROM B", ["P1", "P2", "P3"]),
    names("EEPROM B", ["P1", "P2", "P3"]),
    names("EEPROM B", ["P1", "P2", "P3"]),
    names("EEPROM B", ["P1", "P2", "P3"]),
    names("EEPROM B", ["P1", "P2", "P3"]),
    names("EEPROM B", ["P1", "P2", "P3"]),
    names("EEPROM B", ["P1", "P2", "P3"]),
    names("EEPROM B", ["P1", "P2", "P3"]),
];

/// Names displayed in the CV assignment view.
pub static SETTINGS: Names = names("CV Assignment", ["Mode", "Dest Pot", "Depth"]);

/// Display names of the CV blend modes, indexed by the mode parameter.
pub static CV_MODE_NAMES: [&str; 3] = ["off", "bipolar", "unipolar"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_has_a_title() {
        for preset in &PRESETS {
            assert!(!preset.title.is_empty());
        }
    }
}
