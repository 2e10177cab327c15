#![no_std]
#![no_main]

use lagoon_firmware as _; // Panic handler.

#[defmt_test::tests]
mod tests {
    use lagoon_firmware::system::inputs::Inputs;
    use lagoon_firmware::system::System;
    use lagoon_firmware::testlib::sample_until_button_is_pressed;

    #[init]
    fn init() -> Inputs {
        let cp = cortex_m::Peripherals::take().unwrap();
        let dp = daisy::pac::Peripherals::take().unwrap();
        System::init(cp, dp).inputs
    }

    #[test]
    fn up_button_detects_press(inputs: &mut Inputs) {
        defmt::info!("Press the up button");
        sample_until_button_is_pressed(inputs, 0);
        defmt::info!("OK");
    }

    #[test]
    fn down_button_detects_press(inputs: &mut Inputs) {
        defmt::info!("Press the down button");
        sample_until_button_is_pressed(inputs, 1);
        defmt::info!("OK");
    }
}
