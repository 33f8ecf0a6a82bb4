//! Validating decode: raw bytes → typed [`Command`].
//!
//! The checks run in a fixed order and short-circuit on the first
//! failure, because the remote controller distinguishes failures by the
//! error string alone:
//!
//! 1. JSON parse — failure carries the parser's diagnostic text.
//! 2. `type` present and a string.
//! 3. `type == "cmd"` (the only supported message type).
//! 4. `body` is an object.
//! 5. `body.type` names a known command kind.
//! 6. Kind-specific field validation (`pinMode` only).
//!
//! `pin` and `value` are tolerated as absent and default to 0, and
//! `pin` is narrowed to `u8` with wrap-around (a controller sending
//! `"pin":300` addresses pin 44, as the reference device did); the
//! hardware adapter owns range checking.

use core::fmt;

use serde_json::Value;

use crate::app::commands::Command;
use crate::app::ports::PinMode;

/// Why an inbound message was rejected.
///
/// `Display` yields the exact wire string sent back in the error
/// envelope — do not reword without versioning the protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Top-level JSON was malformed; carries the parser diagnostic.
    Malformed(String),
    /// `type` field missing or not a string.
    InvalidTypeFormat,
    /// `type` is a string but not `"cmd"`.
    UnsupportedMessageType,
    /// `body` missing or not an object.
    InvalidCommandBody,
    /// `body.type` missing, not a string, or unrecognised.
    UnsupportedCommand,
    /// `pinMode` with a missing or non-string `mode`.
    InvalidModeType,
    /// `pinMode` with a mode string outside the three literals.
    InvalidModeValue,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(diag) => write!(f, "{diag}"),
            Self::InvalidTypeFormat => write!(f, "invalid message type format"),
            Self::UnsupportedMessageType => write!(f, "unsupported message type"),
            Self::InvalidCommandBody => write!(f, "invalid command body"),
            Self::UnsupportedCommand => write!(f, "unsupported command type"),
            Self::InvalidModeType => write!(f, "invalid pinMode mode type"),
            Self::InvalidModeValue => write!(f, "invalid pinMode mode value"),
        }
    }
}

/// Decode one raw inbound message into a [`Command`].
pub fn decode(raw: &[u8]) -> Result<Command, DecodeError> {
    let doc: Value =
        serde_json::from_slice(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let msg_type = doc
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::InvalidTypeFormat)?;

    if msg_type != "cmd" {
        return Err(DecodeError::UnsupportedMessageType);
    }

    let body = doc
        .get("body")
        .and_then(Value::as_object)
        .ok_or(DecodeError::InvalidCommandBody)?;

    let kind = body
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::UnsupportedCommand)?;

    let pin = body.get("pin").and_then(Value::as_i64).unwrap_or(0) as u8;

    match kind {
        "pinMode" => {
            let mode = body
                .get("mode")
                .and_then(Value::as_str)
                .ok_or(DecodeError::InvalidModeType)?;
            if !matches!(mode, "input" | "input_pullup" | "output") {
                return Err(DecodeError::InvalidModeValue);
            }
            Ok(Command::PinMode {
                pin,
                mode: PinMode::from_wire(mode),
            })
        }
        "digitalWrite" => {
            let value = body.get("value").and_then(Value::as_i64).unwrap_or(0) as i32;
            Ok(Command::DigitalWrite { pin, value })
        }
        "digitalRead" => Ok(Command::DigitalRead { pin }),
        "digitalListenAdd" => Ok(Command::DigitalListenAdd { pin }),
        "digitalListenRemove" => Ok(Command::DigitalListenRemove { pin }),
        "analogListenAdd" => Ok(Command::AnalogListenAdd { pin }),
        "analogListenRemove" => Ok(Command::AnalogListenRemove { pin }),
        _ => Err(DecodeError::UnsupportedCommand),
    }
}
