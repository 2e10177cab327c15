use crate::system::hal::adc::{Adc, Enabled};
use crate::system::hal::gpio;
use crate::system::hal::pac::ADC1;

use super::burst_read;

pub struct Cv {
    pin: Pin,
}

pub type Pin = gpio::gpioc::PC0<gpio::Analog>;

impl Cv {
    pub fn new(pin: Pin) -> Self {
        Self { pin }
    }

    pub fn sample(&mut self, adc: &mut Adc<ADC1, Enabled>) -> u16 {
        burst_read(adc, &mut self.pin)
    }
}
