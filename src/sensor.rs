//! Temperature sensor on ADC1.
//!
//! One oneshot sample per reading, no filtering and no history. An
//! anomalous raw value simply yields an out-of-range temperature.

use esp_hal::{
    analog::adc::{Adc, AdcConfig, AdcPin, Attenuation},
    peripherals::{ADC1, GPIO4},
};

const ADC_REFERENCE_VOLTS: f32 = 3.3;
const ADC_RESOLUTION: f32 = 4096.0; // 12-bit

/// Convert a raw 12-bit ADC sample to degrees Celsius.
///
/// Affine voltage-to-temperature formula from the sensor documentation,
/// followed by the board's empirical scale/offset correction.
pub fn raw_to_celsius(raw: u16) -> f32 {
    let voltage = raw as f32 * ADC_REFERENCE_VOLTS / ADC_RESOLUTION;
    let temperature = 27.0 - (voltage - 0.706) / 0.001721;
    0.527 * (temperature - 32.0)
}

pub struct TempSensor<'a> {
    adc: Adc<'a, ADC1<'a>, esp_hal::Blocking>,
    pin: AdcPin<GPIO4<'a>, ADC1<'a>>,
}

impl<'a> TempSensor<'a> {
    pub fn new(adc_periph: ADC1<'a>, pin: GPIO4<'a>) -> Self {
        let mut adc_config = AdcConfig::new();
        let pin = adc_config.enable_pin(pin, Attenuation::_11dB);
        let adc = Adc::new(adc_periph, adc_config);

        Self { adc, pin }
    }

    /// Take one sample and convert it.
    pub fn read_celsius(&mut self) -> Result<f32, &'static str> {
        let raw = self
            .adc
            .read_oneshot(&mut self.pin)
            .map_err(|_| "ADC read failed")?;

        Ok(raw_to_celsius(raw))
    }
}
