//! Abstraction of all input peripherals.
//!
//! All analog inputs run through a single shared ADC; each read is a burst
//! of sixteen conversions averaged down to one sample, so the control
//! crate always receives values with most of the conversion noise already
//! gone.

mod buttons;
mod cv;
mod pots;

use nb::block;

use crate::system::hal::adc::{Adc, Enabled};
use crate::system::hal::pac::ADC1;

use lagoon_control::scope::SWEEP_LEN;
use lagoon_control::Snapshot;

pub use buttons::{Buttons, Pins as ButtonsPins};
pub use cv::{Cv, Pin as CvPin};
pub use pots::{Pins as PotsPins, Pots};

const BURST_LEN: u32 = 16;
// The lowest few counts are dominated by ground offset, measured on the
// actual hardware.
const OFFSET_FLOOR: u32 = 16;

pub struct Inputs {
    pub pots: Pots,
    pub cv: Cv,
    pub buttons: Buttons,
    adc: Adc<ADC1, Enabled>,
}

pub struct Config {
    pub pots: PotsPins,
    pub cv: CvPin,
    pub buttons: ButtonsPins,
    pub adc: Adc<ADC1, Enabled>,
}

impl Inputs {
    pub fn new(config: Config) -> Self {
        Self {
            pots: Pots::new(config.pots),
            cv: Cv::new(config.cv),
            buttons: Buttons::new(config.buttons),
            adc: config.adc,
        }
    }

    /// Read all peripherals once, for one control tick.
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot {
            pots: self.pots.sample(&mut self.adc),
            cv: self.cv.sample(&mut self.adc),
            buttons: self.buttons.sample(),
        }
    }

    /// One instantaneous CV sample for the scope's slow mode.
    pub fn sample_cv(&mut self) -> u16 {
        self.cv.sample(&mut self.adc)
    }

    /// Synchronously acquire a full scope sweep of the CV input, pausing
    /// `delay_us` microseconds between samples.
    pub fn acquire_sweep(&mut self, samples: &mut [u16; SWEEP_LEN], delay_us: u16) {
        for sample in samples.iter_mut() {
            *sample = self.cv.sample(&mut self.adc);
            cortex_m::asm::delay(u32::from(delay_us) * (super::CORE_CLOCK_HZ / 1_000_000));
        }
    }
}

/// Burst-read one analog pin: sixteen conversions averaged, minus the
/// offset floor, clamped at zero.
pub(crate) fn burst_read<PIN>(adc: &mut Adc<ADC1, Enabled>, pin: &mut PIN) -> u16
where
    PIN: embedded_hal::adc::Channel<ADC1, ID = u8>,
{
    let mut sum: u32 = 0;
    for _ in 0..BURST_LEN {
        adc.start_conversion(pin);
        let sample: u32 = block!(adc.read_sample()).unwrap_or_default();
        sum += sample;
    }
    ((sum / BURST_LEN).saturating_sub(OFFSET_FLOOR)) as u16
}
