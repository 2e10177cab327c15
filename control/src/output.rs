//! Desired state of output peripherals.

use crate::selector::RomMap;

/// What the hardware binding should do after one control tick.
///
/// PWM duties are restated every tick even when unchanged; the select and
/// ROM line levels are present only when they must actually be rewritten.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DesiredOutput {
    /// Duty level per parameter slot, 0..=4095.
    pub pwm: [u16; 3],
    /// 3-bit program select code to write, if it changed.
    pub select_code: Option<u8>,
    /// ROM map lines to write, if the map changed.
    pub rom_map: Option<RomMap>,
    /// Scope acquisition to perform before the next tick.
    pub scan: Option<ScanRequest>,
}

/// Acquisition the control loop asks the hardware to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanRequest {
    /// Acquire a full sweep of CV samples, pausing the given number of
    /// microseconds between them.
    Sweep { delay_us: u16 },
    /// Acquire a single CV sample for the slow rolling buffer.
    Single,
}
