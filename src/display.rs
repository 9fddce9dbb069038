//! SSD1306 OLED adapter.
//!
//! One framebuffer, overwritten wholesale per message; every call flushes
//! synchronously over I2C before returning.

use embedded_graphics::{
    mono_font::{MonoTextStyleBuilder, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use esp_hal::{
    gpio::AnyPin,
    i2c::master::{Config as I2cConfig, I2c},
    peripherals::I2C1,
    time::Rate,
};
use ssd1306::{I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*};

pub const DISPLAY_WIDTH: i32 = 128;
pub const DISPLAY_HEIGHT: i32 = 64;
pub const GLYPH_WIDTH: i32 = 6;
pub const GLYPH_HEIGHT: i32 = 10;

/// Top-left coordinates that center a fixed-width-glyph message, clamped
/// to zero when the message is wider or taller than the display.
pub fn calculate_position(
    message: &str,
    display_width: i32,
    display_height: i32,
    glyph_width: i32,
    glyph_height: i32,
) -> (i32, i32) {
    let text_width = message.len() as i32 * glyph_width;

    let x = (display_width - text_width) / 2;
    let y = (display_height - glyph_height) / 2;

    (x.max(0), y.max(0))
}

type OledDriver<'a> = Ssd1306<
    I2CInterface<I2c<'a, esp_hal::Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

pub struct Oled<'a> {
    display: OledDriver<'a>,
}

impl<'a> Oled<'a> {
    pub fn new<SDA, SCL>(i2c_periph: I2C1<'a>, sda: SDA, scl: SCL) -> Self
    where
        SDA: Into<AnyPin<'a>>,
        SCL: Into<AnyPin<'a>>,
    {
        let i2c = I2c::new(
            i2c_periph,
            I2cConfig::default().with_frequency(Rate::from_khz(400)),
        )
        .unwrap()
        .with_sda(sda.into())
        .with_scl(scl.into());

        let interface = I2CDisplayInterface::new(i2c);
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self { display }
    }

    pub fn init(&mut self) -> Result<(), &'static str> {
        self.display.init().map_err(|_| "display init failed")
    }

    /// Clear the framebuffer, draw `message` centered at scale 1 and
    /// flush to the panel.
    pub fn display_message(&mut self, message: &str) -> Result<(), &'static str> {
        self.display.clear_buffer();

        let (x, y) = calculate_position(
            message,
            DISPLAY_WIDTH,
            DISPLAY_HEIGHT,
            GLYPH_WIDTH,
            GLYPH_HEIGHT,
        );

        let style = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(BinaryColor::On)
            .build();

        Text::with_baseline(message, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.display)
            .map_err(|_| "failed to draw text")?;

        self.display.flush().map_err(|_| "display flush failed")
    }
}
