//! Outbound response envelopes.
//!
//! Every message the bridge emits is wrapped in the same outer shape:
//!
//! ```text
//! {"action":"msg","type":"status","body":"ok"}
//! {"action":"msg","type":"error","body":"<message>"}
//! {"action":"msg","type":"output","body":<int>}
//! {"action":"msg","type":"pinChange","body":{"pin":<int>,"value":<int>}}
//! ```
//!
//! Serialisation goes through serde rather than hand-assembled buffers,
//! so the output is well-formed by construction.

use log::warn;
use serde::Serialize;

use crate::app::ports::MessageSink;

/// The `type`/`body` pair of a response envelope.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", content = "body", rename_all = "camelCase")]
pub enum Payload {
    /// Command acknowledged.
    Status(&'static str),
    /// Command or message rejected; body is the human-readable reason.
    Error(String),
    /// Result of a read command.
    Output(i32),
    /// A watched pin's value changed.
    PinChange { pin: u8, value: i32 },
}

/// A complete outbound envelope (`action` is always `"msg"`).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Envelope {
    action: &'static str,
    #[serde(flatten)]
    payload: Payload,
}

impl Envelope {
    fn new(payload: Payload) -> Self {
        Self {
            action: "msg",
            payload,
        }
    }

    /// `{"action":"msg","type":"status","body":"ok"}`
    pub fn ok() -> Self {
        Self::new(Payload::Status("ok"))
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::new(Payload::Error(reason.into()))
    }

    pub fn output(value: i32) -> Self {
        Self::new(Payload::Output(value))
    }

    pub fn pin_change(pin: u8, value: i32) -> Self {
        Self::new(Payload::PinChange { pin, value })
    }

    /// Serialise and push through the sink.
    ///
    /// Serialisation of these shapes cannot realistically fail; if it
    /// ever does, the envelope is dropped with a log rather than taking
    /// the bridge down.
    pub fn send_to(&self, sink: &mut impl MessageSink) {
        match serde_json::to_string(self) {
            Ok(text) => sink.send_text(&text),
            Err(e) => warn!("dropping unserialisable envelope: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(env: &Envelope) -> String {
        serde_json::to_string(env).unwrap()
    }

    #[test]
    fn status_shape_is_byte_stable() {
        assert_eq!(
            json(&Envelope::ok()),
            r#"{"action":"msg","type":"status","body":"ok"}"#
        );
    }

    #[test]
    fn error_shape_carries_reason() {
        assert_eq!(
            json(&Envelope::error("unsupported command type")),
            r#"{"action":"msg","type":"error","body":"unsupported command type"}"#
        );
    }

    #[test]
    fn output_shape_carries_integer() {
        assert_eq!(
            json(&Envelope::output(1)),
            r#"{"action":"msg","type":"output","body":1}"#
        );
    }

    #[test]
    fn pin_change_shape_nests_pin_and_value() {
        assert_eq!(
            json(&Envelope::pin_change(5, 1)),
            r#"{"action":"msg","type":"pinChange","body":{"pin":5,"value":1}}"#
        );
    }
}
