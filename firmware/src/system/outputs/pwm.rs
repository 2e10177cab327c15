use embedded_hal::PwmPin;

use crate::system::hal::pac::TIM3;
use crate::system::hal::pwm::{ActiveHigh, ComplementaryImpossible, Pwm, C1, C2, C3};

use lagoon_control::ADC_MAX_VALUE;

pub type Channel1 = Pwm<TIM3, C1, ComplementaryImpossible, ActiveHigh, ActiveHigh>;
pub type Channel2 = Pwm<TIM3, C2, ComplementaryImpossible, ActiveHigh, ActiveHigh>;
pub type Channel3 = Pwm<TIM3, C3, ComplementaryImpossible, ActiveHigh, ActiveHigh>;
pub type Channels = (Channel1, Channel2, Channel3);

/// The three analog-equivalent control outputs towards the effects chip.
///
/// Levels use the same 0..=4095 span as the ADC inputs; they are rescaled
/// onto whatever duty resolution the timer ended up with.
pub struct PwmOutputs {
    channels: Channels,
}

impl PwmOutputs {
    pub fn new(mut channels: Channels) -> Self {
        set_level(&mut channels.0, 0);
        set_level(&mut channels.1, 0);
        set_level(&mut channels.2, 0);
        channels.0.enable();
        channels.1.enable();
        channels.2.enable();
        Self { channels }
    }

    pub fn set(&mut self, levels: [u16; 3]) {
        set_level(&mut self.channels.0, levels[0]);
        set_level(&mut self.channels.1, levels[1]);
        set_level(&mut self.channels.2, levels[2]);
    }
}

fn set_level<P>(channel: &mut P, level: u16)
where
    P: PwmPin<Duty = u16>,
{
    let max = u32::from(channel.get_max_duty());
    let duty = u32::from(level) * max / u32::from(ADC_MAX_VALUE);
    channel.set_duty(duty as u16);
}
