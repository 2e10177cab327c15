//! Smoothing of analog channel readings.

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::ADC_MAX_VALUE;

// The coefficient sits slightly above 1 - 0.95 to make up for the loss
// caused by the truncating integer average of the raw burst.
const SMOOTHING_KEPT: f32 = 0.95;
const SMOOTHING_GAIN: f32 = 0.05044;

/// Abstraction of one analog input.
///
/// The hardware binding feeds it one burst-averaged sample per tick. The
/// channel applies an exponential filter on top and keeps the last
/// unfiltered sample around for consumers that need an instantaneous
/// reading, such as the oscilloscope.
///
/// Updating mutates the filter, so a caller that needs a stable reading
/// across multiple consumers within one tick must cache the result.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    filtered: f32,
    last_sample: u16,
}

impl Channel {
    pub fn update(&mut self, sample: u16) {
        self.last_sample = sample;
        self.filtered = self.filtered * SMOOTHING_KEPT + f32::from(sample) * SMOOTHING_GAIN;
    }

    /// Smoothed reading, clamped into the ADC span.
    pub fn value(&self) -> u16 {
        (self.filtered.round() as u16).min(ADC_MAX_VALUE)
    }

    /// The most recent sample, without smoothing.
    pub fn raw(&self) -> u16 {
        self.last_sample
    }
}
