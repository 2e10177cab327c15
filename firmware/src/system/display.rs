//! SSD1306 OLED behind the control crate's drawing surface.

use embedded_graphics::mono_font::ascii::{FONT_6X13, FONT_8X13_BOLD};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::system::hal::i2c::I2c;
use crate::system::hal::pac::I2C1;

use lagoon_control::view::Surface;

type Oled = Ssd1306<
    I2CInterface<I2c<I2C1>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

pub struct Display {
    oled: Oled,
}

impl Display {
    /// # Panics
    ///
    /// Panics when the OLED does not respond during initialization.
    pub fn new(i2c: I2c<I2C1>) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut oled = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate180)
            .into_buffered_graphics_mode();
        oled.init().unwrap();
        Self { oled }
    }

    /// Send the drawn buffer over I2C. Errors are dropped, the next frame
    /// repaints everything anyway.
    pub fn flush(&mut self) {
        self.oled.flush().ok();
    }
}

fn stroke() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(BinaryColor::On, 1)
}

impl Surface for Display {
    fn clear(&mut self) {
        self.oled.clear(BinaryColor::Off).ok();
    }

    fn draw_title(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyle::new(&FONT_8X13_BOLD, BinaryColor::On);
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.oled)
            .ok();
    }

    fn draw_str(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyle::new(&FONT_6X13, BinaryColor::On);
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.oled)
            .ok();
    }

    fn draw_frame(&mut self, x: i32, y: i32, width: u32, height: u32) {
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(stroke())
            .draw(&mut self.oled)
            .ok();
    }

    fn draw_box(&mut self, x: i32, y: i32, width: u32, height: u32) {
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.oled)
            .ok();
    }

    fn draw_hline(&mut self, x: i32, y: i32, length: u32) {
        self.draw_line(x, y, x + length as i32 - 1, y);
    }

    fn draw_vline(&mut self, x: i32, y: i32, length: u32) {
        self.draw_line(x, y, x, y + length as i32 - 1);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(stroke())
            .draw(&mut self.oled)
            .ok();
    }

    fn draw_triangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32) {
        Triangle::new(Point::new(x0, y0), Point::new(x1, y1), Point::new(x2, y2))
            .into_styled(stroke())
            .draw(&mut self.oled)
            .ok();
    }
}
