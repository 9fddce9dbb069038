#![no_std]
#![no_main]

use core::fmt::Write;

use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_net::Runner;
use embassy_time::{Duration, Ticker, Timer};
use esp_backtrace as _;
use esp_hal::{
    gpio::{Input, InputConfig, Pull},
    timer::timg::TimerGroup,
};
use esp_radio::wifi::WifiDevice;

use thermolink::{
    config,
    display::Oled,
    leds::RgbLed,
    net::Uploader,
    sensor::TempSensor,
    wifi,
};

esp_bootloader_esp_idf::esp_app_desc!();

#[embassy_executor::task]
async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// One read-display-upload cycle, shared by the timer and button paths.
async fn telemetry_cycle(
    sensor: &mut TempSensor<'_>,
    oled: &mut Oled<'_>,
    leds: &mut RgbLed<'_>,
    uploader: &mut Uploader<'_>,
) {
    let temperature = match sensor.read_celsius() {
        Ok(value) => value,
        Err(e) => {
            esp_println::println!("[SENSOR] {}", e);
            return;
        }
    };

    leds.update(temperature);

    let mut line = heapless::String::<32>::new();
    let _ = write!(line, "Temp: {:.2} C", temperature);
    let _ = oled.display_message(line.as_str());
    esp_println::println!("[SENSOR] {}", line.as_str());

    match uploader.upload(temperature).await {
        Ok(()) => {
            let _ = oled.display_message("Data sent!");
            esp_println::println!("[NET] upload delivered");
        }
        Err(e) => {
            let _ = oled.display_message(e.message());
            esp_println::println!(
                "[NET] upload failed: {} (phase {:?})",
                e.message(),
                uploader.phase()
            );
        }
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) {
    esp_println::logger::init_logger_from_env();
    let peripherals = esp_hal::init(esp_hal::Config::default());

    esp_println::println!("=== Thermolink ===");

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 72 * 1024);

    // Initialize RTOS timer for embassy
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let mut oled = Oled::new(peripherals.I2C1, peripherals.GPIO2, peripherals.GPIO1);
    if let Err(e) = oled.init() {
        esp_println::println!("[ERROR] {}", e);
    }

    let mut leds = RgbLed::new(peripherals.GPIO13, peripherals.GPIO12, peripherals.GPIO11);
    let mut sensor = TempSensor::new(peripherals.ADC1, peripherals.GPIO4);

    // Send button, active low with pull-up.
    let mut button = Input::new(
        peripherals.GPIO5,
        InputConfig::default().with_pull(Pull::Up),
    );

    // Radio init failure is the one fatal error: report it and halt.
    let (mut controller, stack, runner) = match wifi::init(peripherals.WIFI) {
        Ok(parts) => parts,
        Err(e) => {
            esp_println::println!("[ERROR] {}", e);
            let _ = oled.display_message("Wi-Fi radio failure");
            loop {
                Timer::after(Duration::from_secs(1)).await;
            }
        }
    };

    if let Err(e) = spawner.spawn(net_task(runner)) {
        esp_println::println!("[ERROR] Failed to spawn task: {:?}", e);
    }

    if wifi::join(&mut controller, &mut oled).await.is_ok() {
        stack.wait_config_up().await;
        esp_println::println!("[NET] DHCP lease acquired");
    }

    let mut uploader = Uploader::new(stack);
    let mut ticker = Ticker::every(Duration::from_millis(config::UPLOAD_PERIOD_MS));

    loop {
        match select(ticker.next(), button.wait_for_falling_edge()).await {
            Either::First(()) => {
                telemetry_cycle(&mut sensor, &mut oled, &mut leds, &mut uploader).await;
            }
            Either::Second(()) => {
                // Debounce delay - wait for button to stabilize
                Timer::after(Duration::from_millis(config::BUTTON_DEBOUNCE_MS)).await;

                if button.is_low() {
                    telemetry_cycle(&mut sensor, &mut oled, &mut leds, &mut uploader).await;
                }
            }
        }
    }
}
