//! Inbound commands to the bridge service.
//!
//! These represent actions requested by the remote controller, produced
//! by the validating decode in [`protocol::decode`](crate::protocol::decode).
//! The enum is closed: adding or removing a command kind is a
//! compile-time-checked change across the dispatcher.

use super::ports::PinMode;

/// Commands the remote peer can send into the bridge core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Configure a pin's direction/pull.
    PinMode { pin: u8, mode: PinMode },

    /// Drive a digital output pin.
    DigitalWrite { pin: u8, value: i32 },

    /// Sample a digital pin and echo the value back.
    DigitalRead { pin: u8 },

    /// Start watching a pin for digital level changes.
    DigitalListenAdd { pin: u8 },

    /// Stop watching a pin for digital level changes.
    DigitalListenRemove { pin: u8 },

    /// Start watching a pin for quantised analog level changes.
    AnalogListenAdd { pin: u8 },

    /// Stop watching a pin for quantised analog level changes.
    AnalogListenRemove { pin: u8 },
}
