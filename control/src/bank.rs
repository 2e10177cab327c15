//! Parameter memory of all presets, with soft takeover and CV blend.

use crate::catalog::PRESET_COUNT;
use crate::log;
use crate::mapping;
use crate::settings::{CvAssignment, CvMode};
use crate::ADC_MAX_VALUE;

/// Parameter slots controlled by the three pots.
pub const SLOT_COUNT: usize = 3;

/// Default range top of preset parameters.
pub const VALUE_MAX: u8 = 127;

/// How a parameter presents itself on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Format {
    /// Label only, the value stays hidden.
    Plain,
    /// Label with the numeric value.
    Numeric,
    /// Label with the name of the selected option.
    Named,
}

impl Format {
    pub fn to_bits(self) -> u8 {
        match self {
            Self::Plain => 0,
            Self::Numeric => 1,
            Self::Named => 2,
        }
    }

    pub fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Self::Plain,
            2 => Self::Named,
            _ => Self::Numeric,
        }
    }
}

/// One stored parameter of a (preset, slot) pair.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Parameter {
    pub value: u8,
    pub min: u8,
    pub max: u8,
    pub format: Format,
}

impl Parameter {
    pub fn new(min: u8, max: u8, format: Format) -> Self {
        Self {
            value: min,
            min,
            max,
            format,
        }
    }

    /// Map an ADC-spanned reading into this parameter's range.
    pub fn from_adc(&self, reading: u16) -> u8 {
        let mapped = mapping::map(
            i32::from(reading),
            0,
            i32::from(ADC_MAX_VALUE),
            i32::from(self.min),
            i32::from(self.max),
        );
        mapped.clamp(i32::from(self.min), i32::from(self.max)) as u8
    }

    /// Map the stored value back onto the ADC/PWM span.
    pub fn to_level(&self) -> u16 {
        mapping::map(
            i32::from(self.value),
            i32::from(self.min),
            i32::from(self.max),
            0,
            i32::from(ADC_MAX_VALUE),
        ) as u16
    }

    fn clamped(&self, value: i32) -> u8 {
        value.clamp(i32::from(self.min), i32::from(self.max)) as u8
    }
}

/// Parameter store of all presets.
///
/// Each preset owns three parameters. Only the active preset is ever
/// updated, and only through soft takeover or the CV blend: a pot does not
/// drive its slot until its position crosses the stored value, so changing
/// presets never makes parameters jump.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bank {
    presets: [[Parameter; SLOT_COUNT]; PRESET_COUNT],
    unlocked: [bool; SLOT_COUNT],
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

impl Bank {
    pub fn new() -> Self {
        Self {
            presets: [[Parameter::new(0, VALUE_MAX, Format::Numeric); SLOT_COUNT]; PRESET_COUNT],
            unlocked: [false; SLOT_COUNT],
        }
    }

    /// Re-arm soft takeover on all slots.
    ///
    /// Call whenever the active preset or the UI mode changes. Stored
    /// values are left untouched, the pots merely lose control until they
    /// cross them again.
    pub fn rearm(&mut self) {
        self.unlocked = [false; SLOT_COUNT];
    }

    /// Reconcile the active preset's parameters with this tick's inputs.
    pub fn update(
        &mut self,
        preset: usize,
        pots: [u16; 3],
        cv: u16,
        assignment: &CvAssignment,
    ) {
        for slot in 0..SLOT_COUNT {
            let parameter = &mut self.presets[preset][slot];
            let pot_mapped = parameter.from_adc(pots[slot]);

            if pot_mapped == parameter.value && !self.unlocked[slot] {
                log::info!("Pot takes over slot={:?}", slot);
                self.unlocked[slot] = true;
            }
            if self.unlocked[slot] {
                parameter.value = pot_mapped;
            }

            // Once assigned with a non-zero depth, the CV drives the slot
            // regardless of the takeover latch.
            if assignment.targets(slot) {
                let depth = u32::from(assignment.depth);
                let cv_scaled = (u32::from(cv) * depth / 100) as u16;
                let cv_mapped = i32::from(parameter.from_adc(cv_scaled));
                let pot_mapped = i32::from(pot_mapped);
                parameter.value = match assignment.mode {
                    CvMode::Off => unreachable!("targets() rules the off mode out"),
                    CvMode::Bipolar => parameter.clamped(pot_mapped + cv_mapped),
                    CvMode::Unipolar => {
                        // Recenter the modulation around its half-depth
                        // point so it can swing below the pot as well.
                        let half = (u32::from(ADC_MAX_VALUE) * depth / 100 / 2) as u16;
                        let half_mapped = i32::from(parameter.from_adc(half));
                        parameter.clamped(pot_mapped + cv_mapped - half_mapped)
                    }
                };
            }
        }
    }

    /// PWM levels of the given preset, derived from the stored values.
    pub fn levels(&self, preset: usize) -> [u16; 3] {
        let parameters = &self.presets[preset];
        [
            parameters[0].to_level(),
            parameters[1].to_level(),
            parameters[2].to_level(),
        ]
    }

    pub fn parameters(&self, preset: usize) -> &[Parameter; SLOT_COUNT] {
        &self.presets[preset]
    }

    pub fn is_unlocked(&self, slot: usize) -> bool {
        self.unlocked[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_cv() -> CvAssignment {
        CvAssignment {
            mode: CvMode::Off,
            target: 2,
            depth: 50,
        }
    }

    fn cv(mode: CvMode, target: u8, depth: u8) -> CvAssignment {
        CvAssignment {
            mode,
            target,
            depth,
        }
    }

    #[test]
    fn when_pot_sits_away_from_stored_value_the_value_stays_frozen() {
        let mut bank = Bank::new();
        bank.presets[0][0].value = 63;

        for _ in 0..100 {
            bank.update(0, [4000, 0, 0], 0, &no_cv());
        }

        assert_eq!(bank.parameters(0)[0].value, 63);
        assert!(!bank.is_unlocked(0));
    }

    #[test]
    fn when_pot_crosses_stored_value_it_takes_over() {
        let mut bank = Bank::new();
        bank.presets[0][0].value = 63;

        // Half of the ADC span maps onto 63 of the 0..=127 range.
        bank.update(0, [2048, 0, 0], 0, &no_cv());
        assert!(bank.is_unlocked(0));

        bank.update(0, [4095, 0, 0], 0, &no_cv());
        assert_eq!(bank.parameters(0)[0].value, 127);
    }

    #[test]
    fn when_unlocked_the_value_tracks_the_pot_every_tick() {
        let mut bank = Bank::new();

        bank.update(0, [0, 0, 0], 0, &no_cv());
        assert!(bank.is_unlocked(0));

        for pot in [100, 700, 1500, 3000, 4095] {
            bank.update(0, [pot, 0, 0], 0, &no_cv());
            let expected = bank.parameters(0)[0].from_adc(pot);
            assert_eq!(bank.parameters(0)[0].value, expected);
        }
    }

    #[test]
    fn when_rearmed_the_value_is_kept_but_the_pot_loses_control() {
        let mut bank = Bank::new();

        bank.update(0, [0, 0, 0], 0, &no_cv());
        bank.update(0, [2048, 0, 0], 0, &no_cv());
        assert_eq!(bank.parameters(0)[0].value, 63);

        bank.rearm();
        bank.update(0, [4095, 0, 0], 0, &no_cv());
        assert_eq!(bank.parameters(0)[0].value, 63);
        assert!(!bank.is_unlocked(0));
    }

    #[test]
    fn when_other_preset_is_updated_the_stored_values_do_not_mix() {
        let mut bank = Bank::new();

        bank.update(0, [0, 0, 0], 0, &no_cv());
        bank.update(0, [4095, 0, 0], 0, &no_cv());
        assert_eq!(bank.parameters(0)[0].value, 127);

        bank.rearm();
        bank.update(1, [0, 0, 0], 0, &no_cv());
        bank.update(1, [1024, 0, 0], 0, &no_cv());

        assert_eq!(bank.parameters(0)[0].value, 127);
        assert_eq!(bank.parameters(1)[0].value, 31);
    }

    #[test]
    fn when_cv_is_off_it_has_no_effect() {
        let mut bank = Bank::new();

        bank.update(0, [0, 0, 0], 4095, &no_cv());
        bank.update(0, [2048, 2048, 2048], 4095, &no_cv());

        assert_eq!(bank.parameters(0)[2].value, 63);
    }

    #[test]
    fn when_cv_depth_is_zero_it_has_no_effect() {
        let mut bank = Bank::new();

        bank.update(0, [0, 0, 0], 4095, &cv(CvMode::Bipolar, 2, 0));
        bank.update(0, [2048, 2048, 2048], 4095, &cv(CvMode::Bipolar, 2, 0));

        assert_eq!(bank.parameters(0)[2].value, 63);
    }

    #[test]
    fn when_cv_blends_bipolar_it_adds_on_top_of_the_pot() {
        let mut bank = Bank::new();

        bank.update(0, [1024, 0, 0], 2048, &cv(CvMode::Bipolar, 0, 100));

        // Pot maps to 31, CV maps to 63.
        assert_eq!(bank.parameters(0)[0].value, 94);
    }

    #[test]
    fn when_cv_blends_bipolar_it_writes_even_while_latched() {
        let mut bank = Bank::new();
        bank.presets[0][0].value = 100;

        bank.update(0, [1024, 0, 0], 0, &cv(CvMode::Bipolar, 0, 100));

        // The takeover latch never fired, yet the targeted slot follows.
        assert!(!bank.is_unlocked(0));
        assert_eq!(bank.parameters(0)[0].value, 31);
    }

    #[test]
    fn when_cv_blends_unipolar_it_swings_around_the_pot() {
        let mut bank = Bank::new();

        // At full depth the half point maps onto 63: a CV in the middle of
        // its span leaves the pot value alone.
        bank.update(0, [2048, 0, 0], 2048, &cv(CvMode::Unipolar, 0, 100));
        assert_eq!(bank.parameters(0)[0].value, 63);

        // Above the half point it pushes the value up.
        bank.update(0, [2048, 0, 0], 4095, &cv(CvMode::Unipolar, 0, 100));
        assert!(bank.parameters(0)[0].value > 63);

        // Below the half point it pulls the value down.
        bank.update(0, [2048, 0, 0], 0, &cv(CvMode::Unipolar, 0, 100));
        assert!(bank.parameters(0)[0].value < 63);
    }

    #[test]
    fn when_cv_blend_overflows_the_range_it_is_clamped() {
        let mut bank = Bank::new();

        for cv_value in [0, 1000, 2000, 3000, 4095] {
            for pot in [0, 2048, 4095] {
                for mode in [CvMode::Bipolar, CvMode::Unipolar] {
                    bank.update(0, [pot, 0, 0], cv_value, &cv(mode, 0, 100));
                    let parameter = bank.parameters(0)[0];
                    assert!(parameter.value >= parameter.min);
                    assert!(parameter.value <= parameter.max);
                }
            }
        }
    }

    #[test]
    fn when_cv_targets_another_slot_this_one_is_left_alone() {
        let mut bank = Bank::new();

        bank.update(0, [0, 0, 0], 0, &no_cv());
        bank.update(0, [2048, 2048, 2048], 4095, &cv(CvMode::Bipolar, 1, 100));

        assert_eq!(bank.parameters(0)[0].value, 63);
        assert_eq!(bank.parameters(0)[2].value, 63);
        assert!(bank.parameters(0)[1].value > 63);
    }

    #[test]
    fn when_levels_are_derived_they_span_the_full_pwm_range() {
        let mut bank = Bank::new();

        bank.update(0, [0, 0, 0], 0, &no_cv());
        assert_eq!(bank.levels(0), [0, 0, 0]);

        bank.update(0, [4095, 4095, 4095], 0, &no_cv());
        assert_eq!(bank.levels(0), [4095, 4095, 4095]);
    }

    #[test]
    fn when_level_is_derived_it_follows_the_stored_value_not_the_pot() {
        let mut bank = Bank::new();
        bank.presets[0][0].value = 63;

        bank.update(0, [4095, 0, 0], 0, &no_cv());

        // The pot is parked at the top but never crossed the stored value.
        assert_eq!(bank.levels(0)[0], 2031);
    }
}
