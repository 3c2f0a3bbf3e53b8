//! WiFi station and network stack tasks

use embassy_net::Runner;
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{
    ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent, WifiStaState,
};
use log::{error, info, warn};

use crate::station::{WIFI_PASSWORD, WIFI_SSID};

/// Back-off after a failed or lost connection
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Connection task - keeps the station associated
///
/// Starts the radio in client mode and reconnects whenever the access
/// point drops us.
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    info!("Connection task started");

    loop {
        if matches!(esp_radio::wifi::sta_state(), WifiStaState::Connected) {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("WiFi disconnected");
            Timer::after(RECONNECT_DELAY).await;
        }

        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = ClientConfig::default()
                .with_ssid(WIFI_SSID.into())
                .with_password(WIFI_PASSWORD.into());

            if let Err(e) = controller.set_config(&ModeConfig::Client(client_config)) {
                error!("WiFi set_config failed: {:?}", e);
                Timer::after(RECONNECT_DELAY).await;
                continue;
            }
            if let Err(e) = controller.start_async().await {
                error!("WiFi start failed: {:?}", e);
                Timer::after(RECONNECT_DELAY).await;
                continue;
            }
            info!("WiFi started, connecting to '{}'", WIFI_SSID);
        }

        match controller.connect_async().await {
            Ok(()) => info!("WiFi connected to '{}'", WIFI_SSID),
            Err(e) => {
                warn!("WiFi connect failed: {:?}", e);
                Timer::after(RECONNECT_DELAY).await;
            }
        }
    }
}

/// Network task - drives the embassy-net stack
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    info!("Net task started");
    runner.run().await
}
