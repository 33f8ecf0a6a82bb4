//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                      |
//! |------------|--------------|----------------------------------|
//! | `hardware` | GpioPort     | ESP32 GPIO matrix + ADC1         |
//! | `ws`       | MessageSink  | WebSocket client (TLS)           |
//! | `wifi`     | —            | ESP-IDF WiFi STA bring-up        |
//!
//! `hardware` and `ws` carry in-memory simulations on non-device
//! targets so the wiring can be exercised by host tests; `wifi` is
//! device-only.

pub mod hardware;
pub mod ws;

#[cfg(feature = "espidf")]
pub mod wifi;
