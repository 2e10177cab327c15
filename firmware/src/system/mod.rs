//! Binding of the control crate to the board peripherals.

pub mod display;
pub mod inputs;
pub mod outputs;

pub use daisy::hal;

use daisy::led::LedUser;
use hal::adc::{AdcSampleTime, Resolution};
use hal::delay::DelayFromCountDownTimer;
use hal::pac::CorePeripherals;
use hal::pac::Peripherals as DevicePeripherals;
use hal::prelude::*;
use systick_monotonic::Systick;

use display::Display;
use inputs::{ButtonsPins, Config as InputsConfig, Inputs, PotsPins};
use outputs::{Config as OutputsConfig, Outputs};

pub const CORE_CLOCK_HZ: u32 = 480_000_000;

pub struct System {
    pub mono: Systick<1000>,
    pub status_led: LedUser,
    pub inputs: Inputs,
    pub outputs: Outputs,
    pub display: Display,
}

impl System {
    /// Initialize the system abstraction.
    ///
    /// # Panics
    ///
    /// The system can be initialized only once. It panics otherwise.
    #[must_use]
    pub fn init(mut cp: CorePeripherals, dp: DevicePeripherals) -> Self {
        enable_cache(&mut cp);

        let board = daisy::Board::take().unwrap();
        let ccdr = daisy::board_freeze_clocks!(board, dp);
        let pins = daisy::board_split_gpios!(board, ccdr, dp);

        let mut delay = DelayFromCountDownTimer::new(dp.TIM2.timer(
            100.Hz(),
            ccdr.peripheral.TIM2,
            &ccdr.clocks,
        ));

        let adc_1 = {
            let (mut adc_1, _adc_2) = hal::adc::adc12(
                dp.ADC1,
                dp.ADC2,
                &mut delay,
                ccdr.peripheral.ADC12,
                &ccdr.clocks,
            );
            // Native resolution of the controller: pots, CV, PWM duties
            // and the parameter engine all speak 0..=4095.
            adc_1.set_resolution(Resolution::TWELVEBIT);
            adc_1.set_sample_time(AdcSampleTime::T_16);
            adc_1.enable()
        };

        let mono = Systick::new(cp.SYST, CORE_CLOCK_HZ);
        let status_led = daisy::board_split_leds!(pins).USER;

        let inputs = Inputs::new(InputsConfig {
            pots: PotsPins {
                pot_1: pins.GPIO.PIN_C4.into_analog(),
                pot_2: pins.GPIO.PIN_C2.into_analog(),
                pot_3: pins.GPIO.PIN_C3.into_analog(),
            },
            cv: pins.GPIO.PIN_C7.into_analog(),
            buttons: ButtonsPins {
                button_up: pins.GPIO.PIN_B10.into_pull_up_input().erase(),
                button_down: pins.GPIO.PIN_D9.into_pull_up_input().erase(),
            },
            adc: adc_1,
        });

        let outputs = Outputs::new(OutputsConfig {
            pwm: dp.TIM3.pwm(
                (
                    pins.GPIO.PIN_B5.into_alternate(),
                    pins.GPIO.PIN_B6.into_alternate(),
                    pins.GPIO.PIN_B9.into_alternate(),
                ),
                31_250.Hz(),
                ccdr.peripheral.TIM3,
                &ccdr.clocks,
            ),
            select: [
                pins.GPIO.PIN_A8.into_push_pull_output().erase(),
                pins.GPIO.PIN_A3.into_push_pull_output().erase(),
                pins.GPIO.PIN_A2.into_push_pull_output().erase(),
            ],
            rom: [
                pins.GPIO.PIN_D1.into_push_pull_output().erase(),
                pins.GPIO.PIN_D2.into_push_pull_output().erase(),
                pins.GPIO.PIN_D3.into_push_pull_output().erase(),
            ],
        });

        let display = {
            let scl = pins.GPIO.PIN_B8.into_alternate().set_open_drain();
            let sda = pins.GPIO.PIN_B7.into_alternate().set_open_drain();
            let i2c = dp.I2C1.i2c(
                (scl, sda),
                400.kHz(),
                ccdr.peripheral.I2C1,
                &ccdr.clocks,
            );
            Display::new(i2c)
        };

        Self {
            mono,
            status_led,
            inputs,
            outputs,
            display,
        }
    }
}

/// AN5212: Improve application performance when fetching instruction and
/// data, from both internal and external memories.
fn enable_cache(cp: &mut CorePeripherals) {
    cp.SCB.enable_icache();
    // NOTE: This requires cache management around all use of DMA.
    cp.SCB.enable_dcache(&mut cp.CPUID);
}
