//! RGB status LED, one color per temperature band.

use esp_hal::gpio::{AnyPin, Level, Output, OutputConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedColor {
    Red,
    Green,
    Blue,
}

/// Map a temperature to the status color.
///
/// Thresholds at 30 and 20 degrees, exclusive on the high side; no
/// hysteresis, so a reading oscillating around a threshold flickers.
pub fn color_for_temperature(temperature: f32) -> LedColor {
    if temperature > 30.0 {
        LedColor::Red
    } else if temperature > 20.0 {
        LedColor::Green
    } else {
        LedColor::Blue
    }
}

pub struct RgbLed<'a> {
    red: Output<'a>,
    green: Output<'a>,
    blue: Output<'a>,
}

impl<'a> RgbLed<'a> {
    pub fn new<R, G, B>(red: R, green: G, blue: B) -> Self
    where
        R: Into<AnyPin<'a>>,
        G: Into<AnyPin<'a>>,
        B: Into<AnyPin<'a>>,
    {
        Self {
            red: Output::new(red.into(), Level::Low, OutputConfig::default()),
            green: Output::new(green.into(), Level::Low, OutputConfig::default()),
            blue: Output::new(blue.into(), Level::Low, OutputConfig::default()),
        }
    }

    pub fn show(&mut self, color: LedColor) {
        self.red
            .set_level(Level::from(color == LedColor::Red));
        self.green
            .set_level(Level::from(color == LedColor::Green));
        self.blue
            .set_level(Level::from(color == LedColor::Blue));
    }

    pub fn update(&mut self, temperature: f32) {
        self.show(color_for_temperature(temperature));
    }
}
