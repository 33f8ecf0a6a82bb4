//! Property tests for protocol and watcher robustness.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets. On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use pinbridge::app::ports::{GpioPort, MessageSink, PinMode};
use pinbridge::app::service::BridgeService;
use pinbridge::protocol::decode::decode;
use pinbridge::watch::{ChangeWatcher, MAX_LISTENERS, quantize};
use proptest::prelude::*;

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

struct CountingSink(usize);
impl MessageSink for CountingSink {
    fn send_text(&mut self, _text: &str) {
        self.0 += 1;
    }
}

proptest! {
    /// Arbitrary bytes must never panic the handler, and must always
    /// produce exactly one outbound envelope.
    #[test]
    fn arbitrary_input_yields_exactly_one_envelope(
        raw in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let mut svc = BridgeService::new();
        let mut sink = CountingSink(0);
        svc.handle_message(&raw, &mut NullGpio, &mut sink);
        prop_assert_eq!(sink.0, 1);
    }

    /// Arbitrary JSON-ish command strings decode without panicking.
    #[test]
    fn arbitrary_text_never_panics_decoder(s in ".*") {
        let _ = decode(s.as_bytes());
    }

    /// Quantised levels stay within the wire scale for the full 12-bit
    /// ADC range, and quantisation is monotone.
    #[test]
    fn quantize_range_and_monotonicity(raw in 0i32..=4095) {
        let level = quantize(raw);
        prop_assert!((1..=100).contains(&level));
        prop_assert!(quantize(raw + 1) >= level);
    }

    /// The subscription set behaves like a set: after any sequence of
    /// add/remove operations its contents match a model `HashSet`.
    #[test]
    fn subscriptions_match_set_model(
        ops in proptest::collection::vec((any::<bool>(), 0u8..MAX_LISTENERS as u8), 0..64),
    ) {
        let mut watcher = ChangeWatcher::new();
        let mut model = std::collections::HashSet::new();
        for (add, pin) in ops {
            if add {
                prop_assert!(watcher.watch_digital(pin));
                let _ = model.insert(pin);
            } else {
                watcher.unwatch_digital(pin);
                let _ = model.remove(&pin);
            }
        }
        prop_assert_eq!(watcher.digital_count(), model.len());
    }
}
