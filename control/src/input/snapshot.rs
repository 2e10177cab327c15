//! Structures used to pass the current state of hardware peripherals.

/// The current state of all input peripherals.
///
/// `Snapshot` is meant to be passed from the hardware binding to the
/// control crate once per tick. It carries raw data with one exception:
/// analog values are already burst-averaged by the caller, since only the
/// hardware side can pace the sixteen conversions of one burst.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Burst-averaged pot readings, 0..=4095.
    pub pots: [u16; 3],
    /// Burst-averaged control voltage reading, 0..=4095.
    pub cv: u16,
    /// True while the respective button is physically pressed.
    pub buttons: [bool; 2],
}
