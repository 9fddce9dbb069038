//! Wi-Fi bring-up: radio init, station config and the bounded join loop.

use alloc::{boxed::Box, string::String};

use embassy_net::{Runner, Stack, StackResources};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{ClientConfig, Config as WifiConfig, ModeConfig, WifiController, WifiDevice};
use static_cell::StaticCell;

use crate::{config, display::Oled};

const STACK_SOCKETS: usize = 4;

/// Initialize the radio and build the network stack (DHCPv4).
///
/// A failure here is fatal for the firmware; the caller reports it and
/// halts instead of entering the main loop.
pub fn init(
    wifi: esp_hal::peripherals::WIFI<'static>,
) -> Result<
    (
        WifiController<'static>,
        Stack<'static>,
        Runner<'static, WifiDevice<'static>>,
    ),
    &'static str,
> {
    static RESOURCES: StaticCell<StackResources<STACK_SOCKETS>> = StaticCell::new();

    // Leaked so the controller and interfaces can live in 'static tasks.
    let radio = Box::leak(Box::new(esp_radio::init().map_err(|_| "radio init failed")?));
    let (controller, interfaces) =
        esp_radio::wifi::new(radio, wifi, WifiConfig::default()).map_err(|_| "wifi init failed")?;

    let rng = esp_hal::rng::Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    let (stack, runner) = embassy_net::new(
        interfaces.sta,
        embassy_net::Config::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        seed,
    );

    Ok((controller, stack, runner))
}

/// Join the configured network, showing progress on the OLED.
///
/// Fixed budget of five attempts with a growing `*` indicator between
/// them. On exhaustion the system still enters the main loop; every
/// upload then fails at DNS until the network comes back.
pub async fn join(
    controller: &mut WifiController<'static>,
    oled: &mut Oled<'_>,
) -> Result<(), &'static str> {
    let client = ClientConfig::default()
        .with_ssid(String::from(config::WIFI_SSID))
        .with_password(String::from(config::WIFI_PASSWORD));

    controller
        .set_config(&ModeConfig::Client(client))
        .map_err(|_| "wifi config rejected")?;
    controller
        .start_async()
        .await
        .map_err(|_| "wifi start failed")?;

    let mut loading_step = 0;
    for _ in 0..config::WIFI_JOIN_ATTEMPTS {
        let mut message = heapless::String::<32>::new();
        let _ = message.push_str("Joining Wi-Fi");
        for _ in 0..loading_step {
            let _ = message.push('*');
        }
        let _ = oled.display_message(message.as_str());

        if controller.connect_async().await.is_ok() {
            let _ = oled.display_message("Wi-Fi connected!");
            return Ok(());
        }

        loading_step = (loading_step + 1) % 4;
        Timer::after(Duration::from_millis(config::WIFI_JOIN_RETRY_DELAY_MS)).await;
    }

    let _ = oled.display_message("Wi-Fi join failed");
    Err("wifi join failed")
}
