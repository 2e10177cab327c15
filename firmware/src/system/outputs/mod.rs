//! Abstraction of all output peripherals except the display.

mod pwm;
mod select;

use lagoon_control::DesiredOutput;

pub use pwm::{Channels as PwmChannels, PwmOutputs};
pub use select::{Line, RomLines, SelectLines};

pub struct Outputs {
    pub pwm: PwmOutputs,
    pub select: SelectLines,
    pub rom: RomLines,
}

pub struct Config {
    pub pwm: PwmChannels,
    pub select: [Line; 3],
    pub rom: [Line; 3],
}

impl Outputs {
    pub fn new(config: Config) -> Self {
        Self {
            pwm: PwmOutputs::new(config.pwm),
            select: SelectLines::new(config.select),
            rom: RomLines::new(config.rom),
        }
    }

    /// Drive the peripherals into the state the control tick asked for.
    pub fn apply(&mut self, desired: &DesiredOutput) {
        self.pwm.set(desired.pwm);
        if let Some(code) = desired.select_code {
            self.select.write(code);
        }
        if let Some(map) = desired.rom_map {
            self.rom.write(map);
        }
    }
}
