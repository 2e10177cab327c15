use crate::system::hal::gpio;

use lagoon_control::selector::RomMap;

pub type Line = gpio::ErasedPin<gpio::Output>;

/// The three lines carrying the 3-bit program select code.
pub struct SelectLines {
    lines: [Line; 3],
}

impl SelectLines {
    pub fn new(lines: [Line; 3]) -> Self {
        Self { lines }
    }

    pub fn write(&mut self, code: u8) {
        for (bit, line) in self.lines.iter_mut().enumerate() {
            line.set_state((code & (1 << bit) != 0).into());
        }
    }
}

/// The three lines choosing which program memory is active.
///
/// The control crate reports these only on change, which keeps the
/// attached relays from chattering.
pub struct RomLines {
    lines: [Line; 3],
}

impl RomLines {
    pub fn new(lines: [Line; 3]) -> Self {
        Self { lines }
    }

    pub fn write(&mut self, map: RomMap) {
        for (level, line) in map.lines().iter().zip(self.lines.iter_mut()) {
            line.set_state((*level).into());
        }
    }
}
