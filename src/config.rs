//! Compile-time configuration.
//!
//! Secrets are injected by `build.rs` from the build environment or a
//! local `.env` file (see `.env.example`); everything else is a plain
//! constant. There is no runtime configuration surface.

pub const WIFI_SSID: &str = env!("THERMOLINK_WIFI_SSID");
pub const WIFI_PASSWORD: &str = env!("THERMOLINK_WIFI_PASSWORD");

/// ThingSpeak write key, sent as the `api_key` query parameter.
pub const API_KEY: &str = env!("THERMOLINK_API_KEY");

pub const UPLOAD_HOST: &str = "api.thingspeak.com";
pub const UPLOAD_PORT: u16 = 80;

/// Period of the automatic upload ticker.
pub const UPLOAD_PERIOD_MS: u64 = 15_000;

/// Settle delay after a falling edge on the (active-low) send button.
pub const BUTTON_DEBOUNCE_MS: u64 = 200;

/// Wi-Fi join attempts before giving up until the next reboot.
pub const WIFI_JOIN_ATTEMPTS: u32 = 5;

/// Delay between Wi-Fi join attempts.
pub const WIFI_JOIN_RETRY_DELAY_MS: u64 = 500;
