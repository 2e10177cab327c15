//! Lock-free handover of display state between the two loops.
//!
//! The control loop is the single writer, the display loop the single
//! reader. Every field is an independent relaxed atomic: neither side ever
//! blocks, and a read racing a write yields at most a one-frame-stale or
//! mixed view, never corruption. This is the whole synchronization
//! contract; do not add locking on top of it, the control loop must never
//! wait for the display.

use core::sync::atomic::{AtomicU16, AtomicU8, AtomicUsize, Ordering::Relaxed};

use crate::bank::Format;
use crate::scope::SWEEP_LEN;
use crate::store::Mode;

/// One parameter as the display needs it.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParamView {
    pub value: u8,
    pub min: u8,
    pub max: u8,
    pub format: Format,
}

impl Default for ParamView {
    fn default() -> Self {
        Self {
            value: 0,
            min: 0,
            max: 127,
            format: Format::Numeric,
        }
    }
}

impl From<crate::bank::Parameter> for ParamView {
    fn from(parameter: crate::bank::Parameter) -> Self {
        Self {
            value: parameter.value,
            min: parameter.min,
            max: parameter.max,
            format: parameter.format,
        }
    }
}

/// Scalar display state of one control tick.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub mode: Mode,
    pub preset: u8,
    /// Parameters of the page the UI currently shows.
    pub params: [ParamView; 3],
    /// Smoothed pot positions for the position indicators, 0..=4095.
    pub pots: [u16; 3],
}

/// Scope display state, published separately since it only changes when an
/// acquisition completes.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScopeFrame {
    pub samples: [u16; SWEEP_LEN],
    pub draw_len: usize,
    pub trigger: usize,
    pub range_min: u16,
    pub range_max: u16,
    pub average: u16,
    pub scan_delay: u16,
}

impl Default for ScopeFrame {
    fn default() -> Self {
        Self {
            samples: [0; SWEEP_LEN],
            draw_len: 0,
            trigger: 10,
            range_min: 0,
            range_max: crate::ADC_MAX_VALUE,
            average: 0,
            scan_delay: 100,
        }
    }
}

/// The shared slot both loops agree on.
///
/// Lives in a `static`; see the module documentation for the writer and
/// reader roles.
pub struct SharedFrame {
    mode: AtomicU8,
    preset: AtomicU8,
    param_value: [AtomicU8; 3],
    param_min: [AtomicU8; 3],
    param_max: [AtomicU8; 3],
    param_format: [AtomicU8; 3],
    pots: [AtomicU16; 3],
    scope_samples: [AtomicU16; SWEEP_LEN],
    scope_draw_len: AtomicUsize,
    scope_trigger: AtomicUsize,
    scope_range_min: AtomicU16,
    scope_range_max: AtomicU16,
    scope_average: AtomicU16,
    scope_scan_delay: AtomicU16,
}

impl Default for SharedFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedFrame {
    pub const fn new() -> Self {
        const U8_ZERO: AtomicU8 = AtomicU8::new(0);
        const U16_ZERO: AtomicU16 = AtomicU16::new(0);
        Self {
            mode: AtomicU8::new(0),
            preset: AtomicU8::new(0),
            param_value: [U8_ZERO; 3],
            param_min: [U8_ZERO; 3],
            param_max: [U8_ZERO; 3],
            param_format: [U8_ZERO; 3],
            pots: [U16_ZERO; 3],
            scope_samples: [U16_ZERO; SWEEP_LEN],
            scope_draw_len: AtomicUsize::new(0),
            scope_trigger: AtomicUsize::new(10),
            scope_range_min: AtomicU16::new(0),
            scope_range_max: AtomicU16::new(crate::ADC_MAX_VALUE),
            scope_average: AtomicU16::new(0),
            scope_scan_delay: AtomicU16::new(100),
        }
    }

    /// Publish the scalar state of this tick. Control loop only.
    pub fn publish(&self, frame: &Frame) {
        self.mode.store(frame.mode.to_bits(), Relaxed);
        self.preset.store(frame.preset, Relaxed);
        for i in 0..3 {
            self.param_value[i].store(frame.params[i].value, Relaxed);
            self.param_min[i].store(frame.params[i].min, Relaxed);
            self.param_max[i].store(frame.params[i].max, Relaxed);
            self.param_format[i].store(frame.params[i].format.to_bits(), Relaxed);
            self.pots[i].store(frame.pots[i], Relaxed);
        }
    }

    /// Publish the outcome of a scope acquisition. Control loop only.
    pub fn publish_scope(&self, scope: &ScopeFrame) {
        for (slot, sample) in self.scope_samples.iter().zip(scope.samples) {
            slot.store(sample, Relaxed);
        }
        self.scope_draw_len.store(scope.draw_len, Relaxed);
        self.scope_trigger.store(scope.trigger, Relaxed);
        self.scope_range_min.store(scope.range_min, Relaxed);
        self.scope_range_max.store(scope.range_max, Relaxed);
        self.scope_average.store(scope.average, Relaxed);
        self.scope_scan_delay.store(scope.scan_delay, Relaxed);
    }

    /// Load the scalar state. Display loop only.
    pub fn load(&self) -> Frame {
        let mut frame = Frame {
            mode: Mode::from_bits(self.mode.load(Relaxed)),
            preset: self.preset.load(Relaxed),
            params: [ParamView::default(); 3],
            pots: [0; 3],
        };
        for i in 0..3 {
            frame.params[i] = ParamView {
                value: self.param_value[i].load(Relaxed),
                min: self.param_min[i].load(Relaxed),
                max: self.param_max[i].load(Relaxed),
                format: Format::from_bits(self.param_format[i].load(Relaxed)),
            };
            frame.pots[i] = self.pots[i].load(Relaxed);
        }
        frame
    }

    /// Load the scope state. Display loop only.
    pub fn load_scope(&self) -> ScopeFrame {
        let mut scope = ScopeFrame {
            samples: [0; SWEEP_LEN],
            draw_len: self.scope_draw_len.load(Relaxed),
            trigger: self.scope_trigger.load(Relaxed),
            range_min: self.scope_range_min.load(Relaxed),
            range_max: self.scope_range_max.load(Relaxed),
            average: self.scope_average.load(Relaxed),
            scan_delay: self.scope_scan_delay.load(Relaxed),
        };
        for (sample, slot) in scope.samples.iter_mut().zip(&self.scope_samples) {
            *sample = slot.load(Relaxed);
        }
        scope
    }
}
