//! Selection of the active preset and the physical bank-select lines.

use crate::catalog::{PRESET_COUNT, SELECT_COUNT};
use crate::log;
use crate::mapping;

/// External program memory addressed by the ROM map lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RomMap {
    Internal,
    EepromA,
    EepromB,
}

impl RomMap {
    /// The map a preset index belongs to.
    pub fn of_preset(index: usize) -> Self {
        match index / SELECT_COUNT {
            0 => Self::Internal,
            1 => Self::EepromA,
            _ => Self::EepromB,
        }
    }

    /// Levels of the (t0, rom1, rom2) lines. The selected memory is the
    /// one whose line is pulled low.
    pub fn lines(self) -> [bool; 3] {
        match self {
            Self::Internal => [false, true, true],
            Self::EepromA => [true, false, true],
            Self::EepromB => [true, true, false],
        }
    }

    /// Single letter shown in front of the preset code on the display.
    pub fn letter(self) -> &'static str {
        match self {
            Self::Internal => "R",
            Self::EepromA => "A",
            Self::EepromB => "B",
        }
    }
}

/// Owner of the active preset index and the bank-select outputs.
///
/// The index wraps around instead of saturating. Line levels are reported
/// for rewriting only when they actually change, so the relays and the
/// ROM-select multiplexer never chatter on redundant updates.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Selector {
    index: usize,
    written_code: Option<u8>,
    written_map: Option<RomMap>,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector {
    pub fn new() -> Self {
        Self {
            index: 0,
            written_code: None,
            written_map: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        self.index = mapping::constrain_cyclic(self.index as i32 + 1, 0, PRESET_COUNT as i32 - 1)
            as usize;
        log::info!("Selected preset={:?}", self.index);
    }

    pub fn previous(&mut self) {
        self.index = mapping::constrain_cyclic(self.index as i32 - 1, 0, PRESET_COUNT as i32 - 1)
            as usize;
        log::info!("Selected preset={:?}", self.index);
    }

    /// 3-bit code driving the program-select lines.
    pub fn select_code(&self) -> u8 {
        (self.index % SELECT_COUNT) as u8
    }

    pub fn rom_map(&self) -> RomMap {
        RomMap::of_preset(self.index)
    }

    /// Lines that need rewriting this tick, if any.
    ///
    /// Marks the returned levels as written, so a line group is reported
    /// at most once per actual change.
    pub fn reconcile(&mut self) -> (Option<u8>, Option<RomMap>) {
        let code = self.select_code();
        let map = self.rom_map();

        let code = if self.written_code != Some(code) {
            self.written_code = Some(code);
            Some(code)
        } else {
            None
        };
        let map = if self.written_map != Some(map) {
            self.written_map = Some(map);
            Some(map)
        } else {
            None
        };

        (code, map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_stepping_past_the_last_preset_it_wraps_to_the_first() {
        let mut selector = Selector::new();

        for _ in 0..PRESET_COUNT - 1 {
            selector.next();
        }
        assert_eq!(selector.index(), PRESET_COUNT - 1);

        selector.next();
        assert_eq!(selector.index(), 0);
    }

    #[test]
    fn when_stepping_back_from_the_first_preset_it_wraps_to_the_last() {
        let mut selector = Selector::new();
        selector.previous();
        assert_eq!(selector.index(), PRESET_COUNT - 1);
    }

    #[test]
    fn when_reconciled_the_first_time_both_line_groups_are_written() {
        let mut selector = Selector::new();
        let (code, map) = selector.reconcile();
        assert_eq!(code, Some(0));
        assert_eq!(map, Some(RomMap::Internal));
    }

    #[test]
    fn when_nothing_changed_no_lines_are_rewritten() {
        let mut selector = Selector::new();
        selector.reconcile();
        assert_eq!(selector.reconcile(), (None, None));
    }

    #[test]
    fn when_stepping_within_a_map_only_the_code_lines_are_rewritten() {
        let mut selector = Selector::new();
        selector.reconcile();

        selector.next();
        assert_eq!(selector.reconcile(), (Some(1), None));
    }

    #[test]
    fn when_crossing_a_map_boundary_both_line_groups_are_rewritten() {
        let mut selector = Selector::new();
        selector.reconcile();

        for _ in 0..SELECT_COUNT {
            selector.next();
        }
        assert_eq!(selector.reconcile(), (Some(0), Some(RomMap::EepromA)));
    }

    #[test]
    fn when_maps_are_addressed_exactly_one_line_sits_low() {
        for map in [RomMap::Internal, RomMap::EepromA, RomMap::EepromB] {
            let low = map.lines().iter().filter(|level| !**level).count();
            assert_eq!(low, 1);
        }
    }

    #[test]
    fn when_presets_are_walked_the_map_follows_the_index() {
        assert_eq!(RomMap::of_preset(0), RomMap::Internal);
        assert_eq!(RomMap::of_preset(7), RomMap::Internal);
        assert_eq!(RomMap::of_preset(8), RomMap::EepromA);
        assert_eq!(RomMap::of_preset(16), RomMap::EepromB);
        assert_eq!(RomMap::of_preset(23), RomMap::EepromB);
    }
}
