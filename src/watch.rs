//! Change watcher — pin subscriptions and polling passes.
//!
//! Two independent subscription sets (digital, analog) map a pin to its
//! last observed value. On each pass the watcher re-samples every
//! subscribed pin and emits a `pinChange` envelope for pins whose value
//! moved, then records the new value. The digital and analog passes are
//! symmetric; only the sampling differs (analog readings are quantised
//! to suppress ADC jitter).
//!
//! Both sets live in fixed-capacity maps — no heap, bounded worst-case
//! pass time. Iteration order across pins is unspecified.

use heapless::FnvIndexMap;

use crate::app::ports::{GpioPort, MessageSink};
use crate::protocol::envelope::Envelope;

/// Maximum watched pins per set. Power of 2 (index-map requirement).
pub const MAX_LISTENERS: usize = 32;

/// Last-value sentinel stored at subscription time.
///
/// `-1` is outside both observable domains (digital 0/1, quantised
/// analog 1..=100), so the first poll after subscribing always sees a
/// difference and notifies the controller of the initial value.
const UNSEEN: i32 = -1;

/// Quantise a raw ADC reading into the wire-protocol level scale.
///
/// The divisor and offset map a 0–4095 reading onto roughly 1–100 and
/// are fixed for compatibility with existing controllers.
pub fn quantize(raw: i32) -> i32 {
    raw / 41 + 1
}

/// Subscription state plus the polling passes that consume it.
pub struct ChangeWatcher {
    digital: FnvIndexMap<u8, i32, MAX_LISTENERS>,
    analog: FnvIndexMap<u8, i32, MAX_LISTENERS>,
}

impl ChangeWatcher {
    pub fn new() -> Self {
        Self {
            digital: FnvIndexMap::new(),
            analog: FnvIndexMap::new(),
        }
    }

    // ── Subscription management ───────────────────────────────

    /// Watch a pin for digital changes. Re-watching an already watched
    /// pin overwrites its entry (re-arming the initial notification).
    /// Returns `false` only when the table is full.
    pub fn watch_digital(&mut self, pin: u8) -> bool {
        self.digital.insert(pin, UNSEEN).is_ok()
    }

    /// Stop watching a pin for digital changes. No-op if not watched.
    pub fn unwatch_digital(&mut self, pin: u8) {
        let _ = self.digital.remove(&pin);
    }

    /// Watch a pin for quantised analog changes.
    pub fn watch_analog(&mut self, pin: u8) -> bool {
        self.analog.insert(pin, UNSEEN).is_ok()
    }

    /// Stop watching a pin for analog changes. No-op if not watched.
    pub fn unwatch_analog(&mut self, pin: u8) {
        let _ = self.analog.remove(&pin);
    }

    /// Number of pins in the digital set.
    pub fn digital_count(&self) -> usize {
        self.digital.len()
    }

    /// Number of pins in the analog set.
    pub fn analog_count(&self) -> usize {
        self.analog.len()
    }

    // ── Polling passes ────────────────────────────────────────

    /// Re-sample every digitally watched pin; emit one `pinChange` per
    /// pin whose level moved since the last pass.
    pub fn poll_digital(&mut self, gpio: &mut impl GpioPort, sink: &mut impl MessageSink) {
        for (&pin, last) in self.digital.iter_mut() {
            let value = gpio.read_digital(pin);
            if value != *last {
                Envelope::pin_change(pin, value).send_to(sink);
                *last = value;
            }
        }
    }

    /// Analog counterpart of [`poll_digital`](Self::poll_digital);
    /// change detection runs on the quantised level, not the raw reading.
    pub fn poll_analog(&mut self, gpio: &mut impl GpioPort, sink: &mut impl MessageSink) {
        for (&pin, last) in self.analog.iter_mut() {
            let level = quantize(gpio.read_analog(pin));
            if level != *last {
                Envelope::pin_change(pin, level).send_to(sink);
                *last = level;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_reference_points() {
        assert_eq!(quantize(0), 1);
        assert_eq!(quantize(40), 1);
        assert_eq!(quantize(41), 2);
        assert_eq!(quantize(410), 11);
        assert_eq!(quantize(4095), 100);
    }

    #[test]
    fn watch_is_idempotent() {
        let mut w = ChangeWatcher::new();
        assert!(w.watch_digital(5));
        assert!(w.watch_digital(5));
        assert_eq!(w.digital_count(), 1);
    }

    #[test]
    fn unwatch_absent_pin_is_noop() {
        let mut w = ChangeWatcher::new();
        w.unwatch_digital(9);
        w.unwatch_analog(9);
        assert_eq!(w.digital_count(), 0);
        assert_eq!(w.analog_count(), 0);
    }

    #[test]
    fn sets_are_independent() {
        let mut w = ChangeWatcher::new();
        assert!(w.watch_digital(3));
        assert!(w.watch_analog(3));
        w.unwatch_digital(3);
        assert_eq!(w.digital_count(), 0);
        assert_eq!(w.analog_count(), 1);
    }

    #[test]
    fn table_full_is_reported() {
        let mut w = ChangeWatcher::new();
        for pin in 0..MAX_LISTENERS as u8 {
            assert!(w.watch_digital(pin));
        }
        assert!(!w.watch_digital(MAX_LISTENERS as u8));
        // Re-watching an existing pin still succeeds at capacity.
        assert!(w.watch_digital(0));
        assert_eq!(w.digital_count(), MAX_LISTENERS);
    }
}
