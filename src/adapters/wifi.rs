//! WiFi station-mode bring-up (device only).
//!
//! The bridge treats connectivity as an external collaborator: this
//! module connects once at boot and exposes link state for the status
//! LED. Reconnection after a drop is handled by the ESP-IDF WiFi driver
//! configuration, not by the bridge core.

use anyhow::Result;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::info;

use crate::config::BridgeConfig;

/// Station link handle. Kept alive for the life of the process.
pub struct WifiLink {
    wifi: BlockingWifi<EspWifi<'static>>,
}

impl WifiLink {
    /// Bring the station up and block until it has an IP.
    pub fn connect(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
        config: &BridgeConfig,
    ) -> Result<Self> {
        let mut wifi = BlockingWifi::wrap(
            EspWifi::new(modem, sysloop.clone(), Some(nvs))?,
            sysloop,
        )?;

        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: config.wifi_ssid.as_str().try_into().unwrap_or_default(),
            password: config.wifi_password.as_str().try_into().unwrap_or_default(),
            auth_method: AuthMethod::WPA2Personal,
            ..Default::default()
        }))?;

        wifi.start()?;
        wifi.connect()?;
        wifi.wait_netif_up()?;
        info!("wifi connected, ssid '{}'", config.wifi_ssid);

        Ok(Self { wifi })
    }

    pub fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }
}
