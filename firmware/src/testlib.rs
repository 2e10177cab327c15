use crate::system::inputs::Inputs;
use crate::system::CORE_CLOCK_HZ;

/// Block until the given button goes from released to pressed.
pub fn sample_until_button_is_pressed(inputs: &mut Inputs, button: usize) {
    let mut was_down = inputs.buttons.sample()[button];
    loop {
        let is_down = inputs.buttons.sample()[button];
        if !was_down && is_down {
            break;
        }
        was_down = is_down;
        cortex_m::asm::delay(CORE_CLOCK_HZ / 1000);
    }
}
