//! Oscilloscope acquisition, ranging and trigger alignment for the CV
//! input.

use crate::log;
use crate::mapping;
use crate::ADC_MAX_VALUE;

/// Samples acquired by one fast sweep.
pub const SWEEP_LEN: usize = 200;

/// Samples collected in the slow, one-per-call mode.
pub const SLOW_LEN: usize = 100;

/// Inter-sample delay bounds, in microseconds.
pub const SCAN_DELAY_MIN_US: u16 = 25;
pub const SCAN_DELAY_MAX_US: u16 = 12800;

/// Trigger point used whenever no rising edge is found.
pub const DEFAULT_TRIGGER: usize = 10;

// The displayed range is stretched past the measured extremes by this
// margin, rounded down to tens.
const RANGE_MARGIN: i32 = 20;

/// State of the oscilloscope view.
///
/// The acquisition itself is paced by the hardware binding; this struct
/// decides which kind of acquisition is due, digests the acquired samples
/// and keeps the derived figures for rendering.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scope {
    scan_delay: u16,
    buffer: [u16; SWEEP_LEN],
    slow_index: usize,
    draw_len: usize,
    average: u16,
    range_min: u16,
    range_max: u16,
    trigger: usize,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            scan_delay: 100,
            buffer: [0; SWEEP_LEN],
            slow_index: 0,
            draw_len: SLOW_LEN,
            average: 0,
            range_min: 0,
            range_max: ADC_MAX_VALUE,
            trigger: DEFAULT_TRIGGER,
        }
    }

    pub fn scan_delay(&self) -> u16 {
        self.scan_delay
    }

    /// Whether the scope currently collects one sample per call instead of
    /// sweeping.
    pub fn is_slow(&self) -> bool {
        self.scan_delay >= SCAN_DELAY_MAX_US
    }

    pub fn double_delay(&mut self) {
        self.scan_delay = mapping::constrain_cyclic(
            i32::from(self.scan_delay) << 1,
            i32::from(SCAN_DELAY_MIN_US),
            i32::from(SCAN_DELAY_MAX_US),
        ) as u16;
        log::info!("Scan delay={:?}us", self.scan_delay);
    }

    pub fn halve_delay(&mut self) {
        self.scan_delay = mapping::constrain_cyclic(
            i32::from(self.scan_delay) >> 1,
            i32::from(SCAN_DELAY_MIN_US),
            i32::from(SCAN_DELAY_MAX_US),
        ) as u16;
        log::info!("Scan delay={:?}us", self.scan_delay);
    }

    /// Digest one full fast sweep.
    ///
    /// Computes the average, stretches the display range slightly past the
    /// measured extremes, and searches the first rising edge through the
    /// buffer midpoint to phase-align the drawn waveform.
    pub fn ingest_sweep(&mut self, samples: &[u16; SWEEP_LEN]) {
        self.buffer = *samples;
        self.draw_len = SLOW_LEN;

        let mut min = ADC_MAX_VALUE;
        let mut max = 0;
        let mut sum: u32 = 0;
        for sample in self.buffer {
            sum += u32::from(sample);
            min = min.min(sample);
            max = max.max(sample);
        }
        self.average = (sum / SWEEP_LEN as u32) as u16;

        self.range_min = ((i32::from(min) - RANGE_MARGIN) / 10 * 10).max(0) as u16;
        self.range_max =
            ((i32::from(max) + RANGE_MARGIN) / 10 * 10).min(i32::from(ADC_MAX_VALUE)) as u16;

        self.trigger = DEFAULT_TRIGGER;
        let threshold = (max + min) >> 1;
        for i in 9..110 {
            if self.buffer[i - 1] < threshold && self.buffer[i] >= threshold {
                self.trigger = i;
                break;
            }
        }
    }

    /// Collect one sample of the slow mode's rolling buffer.
    ///
    /// The display range stays fixed at the full ADC span and no edge is
    /// searched; once the rolling buffer fills up it starts over empty.
    pub fn ingest_slow_sample(&mut self, sample: u16) {
        self.buffer[self.slow_index] = sample;
        self.slow_index += 1;
        if self.slow_index >= SLOW_LEN {
            self.buffer = [0; SWEEP_LEN];
            self.slow_index = 0;
        }
        self.draw_len = self.slow_index;

        self.range_min = 0;
        self.range_max = ADC_MAX_VALUE;
        let sum: u32 = self.buffer.iter().map(|sample| u32::from(*sample)).sum();
        self.average = (sum / SWEEP_LEN as u32) as u16;
        self.trigger = DEFAULT_TRIGGER;
    }

    pub fn samples(&self) -> &[u16; SWEEP_LEN] {
        &self.buffer
    }

    /// How many x positions of the waveform are valid for drawing.
    pub fn draw_len(&self) -> usize {
        self.draw_len
    }

    pub fn trigger(&self) -> usize {
        self.trigger
    }

    pub fn range(&self) -> (u16, u16) {
        (self.range_min, self.range_max)
    }

    pub fn average(&self) -> u16 {
        self.average
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_sweep(low: u16, high: u16, edge: usize) -> [u16; SWEEP_LEN] {
        let mut samples = [low; SWEEP_LEN];
        for sample in samples.iter_mut().skip(edge) {
            *sample = high;
        }
        samples
    }

    #[test]
    fn when_sweep_has_a_rising_edge_the_trigger_lands_on_it() {
        let mut scope = Scope::new();
        scope.ingest_sweep(&square_sweep(100, 3000, 42));
        assert_eq!(scope.trigger(), 42);
    }

    #[test]
    fn when_sweep_has_no_rising_edge_the_trigger_falls_back() {
        let mut scope = Scope::new();
        scope.ingest_sweep(&[1000; SWEEP_LEN]);
        assert_eq!(scope.trigger(), DEFAULT_TRIGGER);
    }

    #[test]
    fn when_the_edge_sits_outside_the_search_window_the_trigger_falls_back() {
        let mut scope = Scope::new();
        scope.ingest_sweep(&square_sweep(100, 3000, 150));
        assert_eq!(scope.trigger(), DEFAULT_TRIGGER);
    }

    #[test]
    fn when_sweep_is_digested_the_range_stretches_to_round_tens() {
        let mut scope = Scope::new();
        scope.ingest_sweep(&square_sweep(100, 3000, 42));

        // 100 - 20 and 3000 + 20, rounded down to tens.
        assert_eq!(scope.range(), (80, 3020));
    }

    #[test]
    fn when_sweep_touches_the_span_edges_the_range_is_clamped() {
        let mut scope = Scope::new();
        scope.ingest_sweep(&square_sweep(5, ADC_MAX_VALUE, 42));

        let (min, max) = scope.range();
        assert_eq!(min, 0);
        assert_eq!(max, ADC_MAX_VALUE);
    }

    #[test]
    fn when_sweep_is_digested_the_average_covers_the_whole_buffer() {
        let mut scope = Scope::new();
        let mut samples = [1000; SWEEP_LEN];
        for sample in samples.iter_mut().skip(100) {
            *sample = 3000;
        }
        scope.ingest_sweep(&samples);
        assert_eq!(scope.average(), 2000);
    }

    #[test]
    fn when_slow_samples_arrive_the_fill_level_walks_up_and_wraps() {
        let mut scope = Scope::new();

        for expected in 1..SLOW_LEN {
            scope.ingest_slow_sample(500);
            assert_eq!(scope.draw_len(), expected);
        }

        // The buffer is full now; the next sample starts over.
        scope.ingest_slow_sample(500);
        assert_eq!(scope.draw_len(), 0);
        assert!(scope.samples().iter().all(|sample| *sample == 0));
    }

    #[test]
    fn when_in_slow_mode_the_range_spans_the_full_scale() {
        let mut scope = Scope::new();
        scope.ingest_sweep(&square_sweep(100, 3000, 42));

        scope.ingest_slow_sample(2000);
        assert_eq!(scope.range(), (0, ADC_MAX_VALUE));
        assert_eq!(scope.trigger(), DEFAULT_TRIGGER);
    }

    #[test]
    fn when_delay_is_doubled_past_the_maximum_it_wraps_to_the_minimum() {
        let mut scope = Scope::new();

        while !scope.is_slow() {
            scope.double_delay();
        }
        assert_eq!(scope.scan_delay(), SCAN_DELAY_MAX_US);

        scope.double_delay();
        assert_eq!(scope.scan_delay(), SCAN_DELAY_MIN_US);
    }

    #[test]
    fn when_delay_is_halved_below_the_minimum_it_wraps_to_the_maximum() {
        let mut scope = Scope::new();

        scope.halve_delay();
        scope.halve_delay();
        assert_eq!(scope.scan_delay(), SCAN_DELAY_MIN_US);

        scope.halve_delay();
        assert_eq!(scope.scan_delay(), SCAN_DELAY_MAX_US);
    }
}
