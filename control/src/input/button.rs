//! Debouncing of push-buttons and hold gesture detection.

use crate::log;

/// How long the line must sit low before a press counts as a hold.
pub const DEFAULT_HOLD_TICKS: u32 = 500;

// Level patterns of the 8-sample shift register. The buttons are wired
// active low with a pull-up, so an idle line shifts in ones.
const PATTERN_PRESSED: u8 = 0xF0;
const PATTERN_RELEASED: u8 = 0x0F;
const PATTERN_HELD_DOWN: u8 = 0x00;

/// Discrete event reported by a single poll of the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The line went from a stable high to a stable low.
    Pressed,
    /// The line went back to a stable high before the hold threshold.
    Released,
    /// The line keeps sitting low past the hold threshold.
    Holding,
    /// The line went back high after a confirmed hold. Fires exactly once
    /// per press-hold-release gesture.
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum HoldStage {
    Idle,
    Waiting(u32),
    Held,
}

/// Use this to turn a noisy digital line into a clean event stream.
///
/// An 8-bit shift register absorbs contact chatter. Edges are only
/// reported on the two four-sample transition patterns, so a single-tick
/// glitch can never produce an event. While a hold is confirmed, edge
/// detection is suppressed so that one physical gesture cannot yield both
/// a long press and a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    register: u8,
    stage: HoldStage,
    hold_ticks: u32,
}

impl Default for Button {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_TICKS)
    }
}

impl Button {
    pub fn new(hold_ticks: u32) -> Self {
        Self {
            // Warm start on an idle pulled-up line, as if the register had
            // already been fed a stable high for eight polls.
            register: 0xFF,
            stage: HoldStage::Idle,
            hold_ticks,
        }
    }

    /// Shift in one raw line level and report what happened.
    ///
    /// `down` is the debounce input: true while the button is physically
    /// pressed. `now` is the current tick count; one poll per tick.
    pub fn update(&mut self, down: bool, now: u32) -> Option<Event> {
        self.register = (self.register << 1) | u8::from(!down);

        if self.stage == HoldStage::Held {
            return match self.register {
                PATTERN_RELEASED => {
                    self.stage = HoldStage::Idle;
                    Some(Event::LongPress)
                }
                PATTERN_HELD_DOWN => Some(Event::Holding),
                _ => None,
            };
        }

        match self.register {
            PATTERN_PRESSED => {
                self.stage = HoldStage::Idle;
                Some(Event::Pressed)
            }
            PATTERN_RELEASED => {
                self.stage = HoldStage::Idle;
                Some(Event::Released)
            }
            PATTERN_HELD_DOWN => {
                match self.stage {
                    HoldStage::Idle => self.stage = HoldStage::Waiting(now),
                    HoldStage::Waiting(since) if now.wrapping_sub(since) >= self.hold_ticks => {
                        log::info!("Hold confirmed");
                        self.stage = HoldStage::Held;
                    }
                    _ => (),
                }
                None
            }
            _ => None,
        }
    }
}
