#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;

use thermolink::{
    display::calculate_position,
    leds::{LedColor, color_for_temperature},
    net::{UploadError, format_request},
    sensor::raw_to_celsius,
};

esp_bootloader_esp_idf::esp_app_desc!();

// Test result tracking
struct TestResults {
    passed: u32,
    failed: u32,
    total: u32,
}

impl TestResults {
    fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
            total: 0,
        }
    }

    fn assert(&mut self, condition: bool, test_name: &str) {
        self.total += 1;
        if condition {
            self.passed += 1;
            esp_println::println!("  ✓ {}", test_name);
        } else {
            self.failed += 1;
            esp_println::println!("  ✗ {} FAILED", test_name);
        }
    }

    fn assert_eq<T: PartialEq + core::fmt::Debug>(&mut self, left: T, right: T, test_name: &str) {
        self.total += 1;
        if left == right {
            self.passed += 1;
            esp_println::println!("  ✓ {}", test_name);
        } else {
            self.failed += 1;
            esp_println::println!("  ✗ {} FAILED: {:?} != {:?}", test_name, left, right);
        }
    }

    fn assert_close(&mut self, value: f32, expected: f32, tolerance: f32, test_name: &str) {
        self.total += 1;
        if (value - expected).abs() < tolerance {
            self.passed += 1;
            esp_println::println!("  ✓ {}", test_name);
        } else {
            self.failed += 1;
            esp_println::println!(
                "  ✗ {} FAILED: {:.2} not close to {:.2} (tolerance: {:.2})",
                test_name,
                value,
                expected,
                tolerance
            );
        }
    }

    fn print_summary(&self) {
        esp_println::println!("\n==========================================");
        esp_println::println!("Test Summary:");
        esp_println::println!("  Total:  {}", self.total);
        esp_println::println!("  Passed: {}", self.passed);
        esp_println::println!("  Failed: {}", self.failed);
        if self.failed == 0 {
            esp_println::println!("\n✓ ALL TESTS PASSED!");
        } else {
            esp_println::println!("\n✗ SOME TESTS FAILED");
        }
        esp_println::println!("==========================================");
    }
}

fn test_sensor_conversion(results: &mut TestResults) {
    esp_println::println!("\n[TEST] Sensor Conversion Tests");

    // Hand-computed reference points for the affine formula:
    // raw=2048 -> 1.65 V -> 27 - (1.65-0.706)/0.001721 = -521.518,
    // then 0.527 * (-521.518 - 32) = -291.70
    results.assert_close(raw_to_celsius(2048), -291.70, 0.1, "midscale reference point");

    // raw=0 -> 0 V -> 27 + 0.706/0.001721 = 437.227,
    // then 0.527 * (437.227 - 32) = 213.55
    results.assert_close(raw_to_celsius(0), 213.55, 0.1, "zero-scale reference point");

    // Conversion stays finite over the whole 12-bit range
    results.assert(raw_to_celsius(0).is_finite(), "raw=0 is finite");
    results.assert(raw_to_celsius(4095).is_finite(), "raw=4095 is finite");

    // Monotonic: a higher raw sample means a lower temperature
    results.assert(
        raw_to_celsius(3000) < raw_to_celsius(1000),
        "conversion is decreasing in raw",
    );
}

fn test_text_centering(results: &mut TestResults) {
    esp_println::println!("\n[TEST] Text Centering Tests");

    // 3 glyphs of 6x8 on a 128x64 panel: x = (128 - 18) / 2
    results.assert_eq(
        calculate_position("ABC", 128, 64, 6, 8),
        (55, 28),
        "short message is centered",
    );

    // Message exactly as wide as the display sits at x == 0
    results.assert_eq(
        calculate_position("0123456789ABCDEF", 96, 64, 6, 8),
        (0, 28),
        "exact-width message at x=0",
    );

    // Oversized message clamps both coordinates to zero
    results.assert_eq(
        calculate_position("this message is far too wide for the panel", 128, 64, 6, 70),
        (0, 0),
        "oversized message clamps to origin",
    );

    // Empty message centers horizontally on the full width
    results.assert_eq(
        calculate_position("", 128, 64, 6, 8),
        (64, 28),
        "empty message",
    );
}

fn test_led_thresholds(results: &mut TestResults) {
    esp_println::println!("\n[TEST] LED Threshold Tests");

    results.assert_eq(color_for_temperature(35.0), LedColor::Red, "hot is red");
    results.assert_eq(color_for_temperature(25.0), LedColor::Green, "mild is green");
    results.assert_eq(color_for_temperature(10.0), LedColor::Blue, "cold is blue");

    // Thresholds are exclusive on the high side
    results.assert_eq(
        color_for_temperature(30.0),
        LedColor::Green,
        "exactly 30.0 is green",
    );
    results.assert_eq(
        color_for_temperature(20.0),
        LedColor::Blue,
        "exactly 20.0 is blue",
    );
    results.assert_eq(
        color_for_temperature(30.001),
        LedColor::Red,
        "just above 30.0 is red",
    );
}

fn test_request_format(results: &mut TestResults) {
    esp_println::println!("\n[TEST] Upload Request Tests");

    let request = format_request("ABC123", 23.456, "api.example.com");
    results.assert_eq(
        request.as_str(),
        "GET /update?api_key=ABC123&field1=23.46 HTTP/1.1\r\nHost: api.example.com\r\nConnection: close\r\n\r\n",
        "request bytes with two-decimal rounding",
    );

    let negative = format_request("KEY", -5.0, "host");
    results.assert(
        negative.as_str().contains("field1=-5.00"),
        "negative reading keeps two decimals",
    );
}

fn test_status_messages(results: &mut TestResults) {
    esp_println::println!("\n[TEST] Upload Status Message Tests");

    // Texts shown on the OLED when an upload attempt dies
    results.assert_eq(
        UploadError::DnsFailed.message(),
        "DNS not resolved",
        "dns failure text",
    );
    results.assert_eq(
        UploadError::ConnectFailed.message(),
        "TCP connect error",
        "connect failure text",
    );
    results.assert_eq(
        UploadError::ConnectionLost.message(),
        "Connection lost",
        "reset-before-response text",
    );
}

#[esp_rtos::main]
async fn main(_spawner: Spawner) {
    esp_println::logger::init_logger_from_env();
    let peripherals = esp_hal::init(esp_hal::Config::default());

    esp_println::println!("=== Thermolink Self-Test ===");

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let mut results = TestResults::new();

    test_sensor_conversion(&mut results);
    test_text_centering(&mut results);
    test_led_thresholds(&mut results);
    test_request_format(&mut results);
    test_status_messages(&mut results);

    results.print_summary();

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
