use crate::system::hal::gpio;

/// The two push-buttons, active low through pull-ups.
///
/// Debouncing happens in the control crate; this only reports the raw
/// levels.
pub struct Buttons {
    pins: Pins,
}

pub struct Pins {
    pub button_up: Pin,
    pub button_down: Pin,
}

pub type Pin = gpio::ErasedPin<gpio::Input>;

impl Buttons {
    pub fn new(pins: Pins) -> Self {
        Self { pins }
    }

    /// True while the respective button is physically pressed.
    pub fn sample(&self) -> [bool; 2] {
        [self.pins.button_up.is_low(), self.pins.button_down.is_low()]
    }
}
