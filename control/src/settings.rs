//! Global CV assignment, edited like any other parameter trio.

use crate::bank::{Format, Parameter};
use crate::log;

/// How the control voltage blends into its target slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CvMode {
    Off,
    Bipolar,
    Unipolar,
}

impl CvMode {
    pub fn to_bits(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Bipolar => 1,
            Self::Unipolar => 2,
        }
    }

    /// Out-of-range codes fall back to the safe mode.
    pub fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Self::Bipolar,
            2 => Self::Unipolar,
            _ => Self::Off,
        }
    }
}

/// Where and how deep the control voltage modulates.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CvAssignment {
    pub mode: CvMode,
    /// Targeted parameter slot, always within 0..=2.
    pub target: u8,
    /// Modulation depth in percent, 0..=100.
    pub depth: u8,
}

impl CvAssignment {
    /// Whether the assignment currently modulates the given slot.
    pub fn targets(&self, slot: usize) -> bool {
        self.mode != CvMode::Off && self.depth > 0 && usize::from(self.target) == slot
    }
}

/// Editor of the CV assignment.
///
/// The assignment is held as three parameters with the same soft-takeover
/// behavior as preset slots, so entering the settings view never changes
/// anything until a pot crosses the stored value. Invalid targets cannot
/// be dialed in: the parameter range itself is clamped to the valid slots.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    parameters: [Parameter; 3],
    unlocked: [bool; 3],
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    pub fn new() -> Self {
        let mut mode = Parameter::new(0, 2, Format::Named);
        let mut target = Parameter::new(0, 2, Format::Numeric);
        let mut depth = Parameter::new(0, 100, Format::Numeric);
        mode.value = CvMode::Off.to_bits();
        target.value = 2;
        depth.value = 50;
        Self {
            parameters: [mode, target, depth],
            unlocked: [false; 3],
        }
    }

    /// Re-arm soft takeover on the editor, keeping the stored assignment.
    pub fn rearm(&mut self) {
        self.unlocked = [false; 3];
    }

    /// Reconcile the assignment with this tick's pot readings.
    pub fn update(&mut self, pots: [u16; 3]) {
        for (slot, parameter) in self.parameters.iter_mut().enumerate() {
            let pot_mapped = parameter.from_adc(pots[slot]);
            if pot_mapped == parameter.value && !self.unlocked[slot] {
                log::info!("Pot takes over setting={:?}", slot);
                self.unlocked[slot] = true;
            }
            if self.unlocked[slot] {
                parameter.value = pot_mapped;
            }
        }
    }

    pub fn assignment(&self) -> CvAssignment {
        CvAssignment {
            mode: CvMode::from_bits(self.parameters[0].value),
            target: self.parameters[1].value,
            depth: self.parameters[2].value,
        }
    }

    pub fn parameters(&self) -> &[Parameter; 3] {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_created_it_defaults_to_a_silent_assignment() {
        let settings = Settings::new();
        let assignment = settings.assignment();
        assert_eq!(assignment.mode, CvMode::Off);
        assert_eq!(assignment.target, 2);
        assert_eq!(assignment.depth, 50);
        assert!(!assignment.targets(2));
    }

    #[test]
    fn when_pot_has_not_crossed_the_value_nothing_changes() {
        let mut settings = Settings::new();

        for _ in 0..100 {
            settings.update([4095, 0, 4095]);
        }

        let assignment = settings.assignment();
        assert_eq!(assignment.mode, CvMode::Off);
        assert_eq!(assignment.target, 2);
        assert_eq!(assignment.depth, 50);
    }

    #[test]
    fn when_pot_crosses_the_value_the_assignment_follows() {
        let mut settings = Settings::new();

        // The depth parameter stores 50, half of the ADC span crosses it.
        settings.update([0, 4095, 2048]);
        settings.update([0, 4095, 4095]);

        let assignment = settings.assignment();
        assert_eq!(assignment.mode, CvMode::Off);
        assert_eq!(assignment.depth, 100);
    }

    #[test]
    fn when_mode_pot_is_turned_up_it_walks_the_modes() {
        let mut settings = Settings::new();

        settings.update([0, 4095, 0]);
        assert_eq!(settings.assignment().mode, CvMode::Off);

        settings.update([2048, 4095, 0]);
        assert_eq!(settings.assignment().mode, CvMode::Bipolar);

        settings.update([4095, 4095, 0]);
        assert_eq!(settings.assignment().mode, CvMode::Unipolar);
    }

    #[test]
    fn when_target_is_dialed_it_never_leaves_the_valid_slots() {
        let mut settings = Settings::new();

        settings.update([0, 4095, 0]);
        for pot in (0..=4095).step_by(64) {
            settings.update([0, pot, 0]);
            assert!(settings.assignment().target <= 2);
        }
    }

    #[test]
    fn when_rearmed_the_pots_lose_control_until_they_cross_again() {
        let mut settings = Settings::new();

        settings.update([0, 4095, 2048]);
        settings.update([0, 4095, 0]);
        assert_eq!(settings.assignment().depth, 0);

        settings.rearm();
        settings.update([0, 4095, 4095]);
        assert_eq!(settings.assignment().depth, 0);

        settings.update([0, 4095, 0]);
        settings.update([0, 4095, 3000]);
        assert_eq!(
            settings.assignment().depth,
            settings.parameters()[2].from_adc(3000)
        );
    }
}
