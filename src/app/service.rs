//! Bridge service — the hexagonal core.
//!
//! [`BridgeService`] owns the change watcher and ties the protocol
//! pipeline together: one inbound message in, exactly one envelope out,
//! at most one hardware side effect per dispatch. All I/O flows through
//! port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!   GpioPort ◀── ┌────────────────────────┐
//!                │      BridgeService      │ ──▶ MessageSink
//!   GpioPort ──▶ │  decode · dispatch ·    │
//!                │  change watcher         │
//!                └────────────────────────┘
//! ```

use log::{debug, warn};

use crate::protocol::decode::decode;
use crate::protocol::envelope::Envelope;
use crate::watch::ChangeWatcher;

use super::commands::Command;
use super::ports::{GpioPort, MessageSink};

/// The bridge service orchestrates command handling and change polling.
pub struct BridgeService {
    watcher: ChangeWatcher,
}

impl BridgeService {
    pub fn new() -> Self {
        Self {
            watcher: ChangeWatcher::new(),
        }
    }

    // ── Inbound message handling ──────────────────────────────

    /// Handle one complete inbound message from the transport.
    ///
    /// Emits exactly one envelope: a success/output envelope after
    /// dispatch, or an error envelope when any validation stage rejects
    /// the message. Rejections are non-fatal; the bridge keeps serving.
    pub fn handle_message(
        &mut self,
        raw: &[u8],
        gpio: &mut impl GpioPort,
        sink: &mut impl MessageSink,
    ) {
        match decode(raw) {
            Ok(cmd) => self.dispatch(cmd, gpio, sink),
            Err(e) => {
                warn!("rejected inbound message: {e}");
                Envelope::error(e.to_string()).send_to(sink);
            }
        }
    }

    fn dispatch(&mut self, cmd: Command, gpio: &mut impl GpioPort, sink: &mut impl MessageSink) {
        debug!("dispatching {cmd:?}");
        match cmd {
            Command::PinMode { pin, mode } => {
                gpio.set_mode(pin, mode);
                Envelope::ok().send_to(sink);
            }
            Command::DigitalWrite { pin, value } => {
                gpio.write_digital(pin, value);
                Envelope::ok().send_to(sink);
            }
            Command::DigitalRead { pin } => {
                let value = gpio.read_digital(pin);
                Envelope::output(value).send_to(sink);
            }
            Command::DigitalListenAdd { pin } => {
                if self.watcher.watch_digital(pin) {
                    Envelope::ok().send_to(sink);
                } else {
                    warn!("digital listener table full, pin {pin} not watched");
                    Envelope::error("listener table full").send_to(sink);
                }
            }
            Command::DigitalListenRemove { pin } => {
                self.watcher.unwatch_digital(pin);
                Envelope::ok().send_to(sink);
            }
            Command::AnalogListenAdd { pin } => {
                if self.watcher.watch_analog(pin) {
                    Envelope::ok().send_to(sink);
                } else {
                    warn!("analog listener table full, pin {pin} not watched");
                    Envelope::error("listener table full").send_to(sink);
                }
            }
            Command::AnalogListenRemove { pin } => {
                self.watcher.unwatch_analog(pin);
                Envelope::ok().send_to(sink);
            }
        }
    }

    // ── Periodic polling (driven by the scheduler) ────────────

    /// Digital change-detection pass.
    pub fn poll_digital(&mut self, gpio: &mut impl GpioPort, sink: &mut impl MessageSink) {
        self.watcher.poll_digital(gpio, sink);
    }

    /// Analog change-detection pass.
    pub fn poll_analog(&mut self, gpio: &mut impl GpioPort, sink: &mut impl MessageSink) {
        self.watcher.poll_analog(gpio, sink);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Subscription state, for diagnostics and tests.
    pub fn watcher(&self) -> &ChangeWatcher {
        &self.watcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::PinMode;

    struct NullGpio;
    impl GpioPort for NullGpio {
        fn set_mode(&mut self, _pin: u8, _mode: PinMode) {}
        fn write_digital(&mut self, _pin: u8, _value: i32) {}
        fn read_digital(&mut self, _pin: u8) -> i32 {
            0
        }
        fn read_analog(&mut self, _pin: u8) -> i32 {
            0
        }
    }

    struct CollectSink(Vec<String>);
    impl MessageSink for CollectSink {
        fn send_text(&mut self, text: &str) {
            self.0.push(text.to_owned());
        }
    }

    #[test]
    fn listen_add_tracks_subscription() {
        let mut svc = BridgeService::new();
        let mut sink = CollectSink(Vec::new());
        svc.handle_message(
            br#"{"type":"cmd","body":{"type":"digitalListenAdd","pin":7}}"#,
            &mut NullGpio,
            &mut sink,
        );
        assert_eq!(svc.watcher().digital_count(), 1);
        assert_eq!(
            sink.0,
            vec![r#"{"action":"msg","type":"status","body":"ok"}"#]
        );
    }

    #[test]
    fn every_message_yields_exactly_one_envelope() {
        let mut svc = BridgeService::new();
        let mut sink = CollectSink(Vec::new());
        let messages: [&[u8]; 4] = [
            br#"{"type":"cmd","body":{"type":"digitalRead","pin":1}}"#,
            br#"{"type":"cmd","body":{"type":"nope"}}"#,
            b"garbage",
            br#"{"type":"cmd","body":{"type":"analogListenRemove","pin":1}}"#,
        ];
        for msg in messages {
            svc.handle_message(msg, &mut NullGpio, &mut sink);
        }
        assert_eq!(sink.0.len(), messages.len());
    }
}
