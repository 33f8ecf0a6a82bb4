//! System configuration parameters.
//!
//! All tunable parameters for the pin bridge: polling cadence and the
//! transport endpoint. Values are compiled-in defaults; a deployment
//! overrides them before flashing.

use serde::{Deserialize, Serialize};

/// Core bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    // --- Polling cadence ---
    /// Digital change-detection pass interval (milliseconds).
    pub digital_poll_interval_ms: u32,
    /// Analog change-detection pass interval (milliseconds).
    /// Slower than digital: quantisation already suppresses jitter, so
    /// the analog set tolerates a coarser cadence.
    pub analog_poll_interval_ms: u32,

    // --- WiFi ---
    /// Station SSID.
    pub wifi_ssid: String,
    /// Station passphrase.
    pub wifi_password: String,

    // --- WebSocket endpoint ---
    /// Gateway host name.
    pub ws_host: String,
    /// Gateway port.
    pub ws_port: u16,
    /// Request path.
    pub ws_path: String,
    /// Use TLS (`wss://`) for the channel.
    pub ws_tls: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            // Polling — digital twice as fast as analog
            digital_poll_interval_ms: 250,
            analog_poll_interval_ms: 500,

            // WiFi — placeholders, overridden per deployment
            wifi_ssid: String::from("your_wifi_network_name"),
            wifi_password: String::from("your_wifi_password"),

            // WebSocket gateway
            ws_host: String::from("host.to.your.aws.api.gateway.websockets"),
            ws_port: 443,
            ws_path: String::from("/dev"),
            ws_tls: true,
        }
    }
}

impl BridgeConfig {
    /// Full WebSocket URL for the configured endpoint.
    pub fn ws_url(&self) -> String {
        let scheme = if self.ws_tls { "wss" } else { "ws" };
        format!("{}://{}:{}{}", scheme, self.ws_host, self.ws_port, self.ws_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = BridgeConfig::default();
        assert!(c.digital_poll_interval_ms > 0);
        assert!(c.analog_poll_interval_ms > 0);
        assert!(c.ws_port > 0);
        assert!(c.ws_path.starts_with('/'));
    }

    #[test]
    fn digital_polls_twice_as_fast_as_analog() {
        let c = BridgeConfig::default();
        assert_eq!(c.analog_poll_interval_ms, 2 * c.digital_poll_interval_ms);
    }

    #[test]
    fn serde_roundtrip() {
        let c = BridgeConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: BridgeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.digital_poll_interval_ms, c2.digital_poll_interval_ms);
        assert_eq!(c.ws_host, c2.ws_host);
        assert_eq!(c.ws_tls, c2.ws_tls);
    }

    #[test]
    fn ws_url_schemes() {
        let mut c = BridgeConfig::default();
        assert!(c.ws_url().starts_with("wss://"));
        c.ws_tls = false;
        assert!(c.ws_url().starts_with("ws://"));
    }
}
