//! The central state machine tying all controls together.

use crate::bank::Bank;
use crate::frame::{Frame, ParamView, ScopeFrame};
use crate::input::button::Event;
use crate::input::snapshot::Snapshot;
use crate::input::store::Store as Input;
use crate::log;
use crate::output::{DesiredOutput, ScanRequest};
use crate::scope::{Scope, SWEEP_LEN};
use crate::selector::Selector;
use crate::settings::Settings;

/// The page the user interface currently operates in.
///
/// A long press on either button advances to the next mode. What a short
/// press does depends on the mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Presets,
    Scope,
    Settings,
}

impl Mode {
    pub fn next(self) -> Self {
        match self {
            Self::Presets => Self::Scope,
            Self::Scope => Self::Settings,
            Self::Settings => Self::Presets,
        }
    }

    pub fn to_bits(self) -> u8 {
        match self {
            Self::Presets => 0,
            Self::Scope => 1,
            Self::Settings => 2,
        }
    }

    pub fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Self::Scope,
            2 => Self::Settings,
            _ => Self::Presets,
        }
    }
}

/// The main store of peripheral abstractions and module state.
///
/// This struct is the central piece of the control crate. It takes a
/// `Snapshot` of raw inputs once per tick, passes it to the peripheral
/// abstractions, runs the mode state machine and reports the desired state
/// of the output peripherals.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Store {
    input: Input,
    bank: Bank,
    settings: Settings,
    selector: Selector,
    scope: Scope,
    mode: Mode,
    ticks: u32,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prime the input peripherals before the first real tick.
    pub fn warm_up(&mut self, snapshot: Snapshot) {
        self.input.warm_up(snapshot);
    }

    /// Process one tick worth of input. Called every millisecond.
    pub fn apply_input_snapshot(&mut self, snapshot: Snapshot) -> DesiredOutput {
        self.ticks = self.ticks.wrapping_add(1);
        let [event_up, event_down] = self.input.update(snapshot, self.ticks);
        self.handle_button(true, event_up);
        self.handle_button(false, event_down);

        let pots = self.input.pot_values();
        match self.mode {
            Mode::Presets => self.bank.update(
                self.selector.index(),
                pots,
                self.input.cv.value(),
                &self.settings.assignment(),
            ),
            Mode::Settings => self.settings.update(pots),
            // Pots are detached while the scope owns the screen.
            Mode::Scope => (),
        }

        let (select_code, rom_map) = self.selector.reconcile();
        DesiredOutput {
            pwm: self.bank.levels(self.selector.index()),
            select_code,
            rom_map,
            scan: self.requested_scan(),
        }
    }

    fn handle_button(&mut self, is_up_button: bool, event: Option<Event>) {
        match event {
            Some(Event::LongPress) => self.enter(self.mode.next()),
            Some(Event::Released) => match self.mode {
                Mode::Presets => {
                    if is_up_button {
                        self.selector.next();
                    } else {
                        self.selector.previous();
                    }
                    self.bank.rearm();
                }
                Mode::Scope => {
                    if is_up_button {
                        self.scope.double_delay();
                    } else {
                        self.scope.halve_delay();
                    }
                }
                Mode::Settings => (),
            },
            _ => (),
        }
    }

    fn enter(&mut self, mode: Mode) {
        log::info!("Entering mode={:?}", mode);
        self.mode = mode;
        self.bank.rearm();
        self.settings.rearm();
    }

    fn requested_scan(&self) -> Option<ScanRequest> {
        if self.mode != Mode::Scope {
            return None;
        }
        Some(if self.scope.is_slow() {
            ScanRequest::Single
        } else {
            ScanRequest::Sweep {
                delay_us: self.scope.scan_delay(),
            }
        })
    }

    /// Digest a completed fast sweep.
    pub fn ingest_sweep(&mut self, samples: &[u16; SWEEP_LEN]) {
        self.scope.ingest_sweep(samples);
    }

    /// Digest a single slow-mode sample.
    pub fn ingest_slow_sample(&mut self, sample: u16) {
        self.scope.ingest_slow_sample(sample);
    }

    /// Scalar display state of this tick.
    pub fn frame(&self) -> Frame {
        let params = match self.mode {
            Mode::Settings => self.settings.parameters(),
            _ => self.bank.parameters(self.selector.index()),
        };
        Frame {
            mode: self.mode,
            preset: self.selector.index() as u8,
            params: [
                ParamView::from(params[0]),
                ParamView::from(params[1]),
                ParamView::from(params[2]),
            ],
            pots: self.input.pot_values(),
        }
    }

    /// Scope display state after the latest acquisition.
    pub fn scope_frame(&self) -> ScopeFrame {
        let (range_min, range_max) = self.scope.range();
        ScopeFrame {
            samples: *self.scope.samples(),
            draw_len: self.scope.draw_len(),
            trigger: self.scope.trigger(),
            range_min,
            range_max,
            average: self.scope.average(),
            scan_delay: self.scope.scan_delay(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn preset_index(&self) -> usize {
        self.selector.index()
    }
}
