use crate::system::hal::adc::{Adc, Enabled};
use crate::system::hal::gpio;
use crate::system::hal::pac::ADC1;

use super::burst_read;

pub struct Pots {
    pins: Pins,
}

pub struct Pins {
    pub pot_1: Pot1Pin,
    pub pot_2: Pot2Pin,
    pub pot_3: Pot3Pin,
}

pub type Pot1Pin = gpio::gpioa::PA7<gpio::Analog>;
pub type Pot2Pin = gpio::gpioa::PA6<gpio::Analog>;
pub type Pot3Pin = gpio::gpioa::PA2<gpio::Analog>;

impl Pots {
    pub fn new(pins: Pins) -> Self {
        Self { pins }
    }

    pub fn sample(&mut self, adc: &mut Adc<ADC1, Enabled>) -> [u16; 3] {
        [
            burst_read(adc, &mut self.pins.pot_1),
            burst_read(adc, &mut self.pins.pot_2),
            burst_read(adc, &mut self.pins.pot_3),
        ]
    }
}
