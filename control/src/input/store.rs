//! Process all input peripherals over time.

use super::button::{Button, Event};
use super::channel::Channel;
use super::snapshot::Snapshot;

/// Stateful store of raw inputs.
///
/// This struct turns the raw snapshot into a set of abstracted
/// peripherals, providing smoothing for the analog channels and debounced
/// events for the buttons.
///
/// Note that despite all its attributes being public, they should only be
/// read from.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Store {
    pub pots: [Channel; 3],
    pub cv: Channel,
    pub buttons: [Button; 2],
}

impl Store {
    /// Feed one tick worth of raw state into the peripherals.
    ///
    /// Returns the event reported by each button this tick.
    pub fn update(&mut self, snapshot: Snapshot, now: u32) -> [Option<Event>; 2] {
        for (pot, value) in self.pots.iter_mut().zip(snapshot.pots) {
            pot.update(value);
        }
        self.cv.update(snapshot.cv);
        [
            self.buttons[0].update(snapshot.buttons[0], now),
            self.buttons[1].update(snapshot.buttons[1], now),
        ]
    }

    /// Prime the peripherals before the first real tick.
    ///
    /// Run this a few times during startup so the analog filters settle
    /// near the actual pot positions and the button registers reflect a
    /// stable idle line, without any events leaking out.
    pub fn warm_up(&mut self, snapshot: Snapshot) {
        let mut idle = snapshot;
        idle.buttons = [false; 2];
        let _ = self.update(idle, 0);
    }

    /// Smoothed pot readings of this tick.
    pub fn pot_values(&self) -> [u16; 3] {
        [
            self.pots[0].value(),
            self.pots[1].value(),
            self.pots[2].value(),
        ]
    }
}
