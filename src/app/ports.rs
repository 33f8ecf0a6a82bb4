//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BridgeService (domain)
//! ```
//!
//! Driven adapters (GPIO hardware, WebSocket transport, scheduler wiring)
//! implement these traits. The [`BridgeService`](super::service::BridgeService)
//! consumes them via generics, so the domain core never touches hardware or
//! the network directly.

// ───────────────────────────────────────────────────────────────
// Pin mode
// ───────────────────────────────────────────────────────────────

/// Configurable direction/pull for a GPIO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    InputPullup,
    Output,
}

impl PinMode {
    /// Map a wire-protocol mode string onto a [`PinMode`].
    ///
    /// Anything that is not `"output"` or `"input_pullup"` falls back to
    /// [`PinMode::Input`]. The protocol decoder has already rejected mode
    /// strings outside the three supported literals, so in practice only
    /// those three reach this mapping.
    pub fn from_wire(mode: &str) -> Self {
        match mode {
            "output" => Self::Output,
            "input_pullup" => Self::InputPullup,
            _ => Self::Input,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Pin I/O port: the domain calls this to touch physical pins.
///
/// Calls are infallible by contract — the adapter is expected to be
/// silently tolerant of out-of-range pins, matching the behaviour of the
/// underlying SoC GPIO matrix. Range checking is not a core concern.
pub trait GpioPort {
    /// Configure a pin's direction and pull.
    fn set_mode(&mut self, pin: u8, mode: PinMode);

    /// Drive a digital output pin (0 = low, non-zero = high).
    fn write_digital(&mut self, pin: u8, value: i32);

    /// Sample a digital pin. Returns 0 or 1.
    fn read_digital(&mut self, pin: u8) -> i32;

    /// Sample an analog pin. Returns the raw ADC reading.
    fn read_analog(&mut self, pin: u8) -> i32;
}

// ───────────────────────────────────────────────────────────────
// Message sink port (driven adapter: domain → remote peer)
// ───────────────────────────────────────────────────────────────

/// Outbound text-message port. Every envelope the bridge produces goes
/// through here; adapters decide where it lands (WebSocket frame, serial
/// log, test buffer).
///
/// Infallible: a sink that cannot deliver (link down, buffer full) logs
/// and drops — the bridge itself never fails on emission.
pub trait MessageSink {
    fn send_text(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the main loop)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the scheduler invokes when a schedule fires.
///
/// This decouples the [`Scheduler`](crate::scheduler::Scheduler) from the
/// polling passes. The main loop implements this by forwarding labelled
/// fires to the change watcher, but the scheduler itself knows nothing
/// about pins or envelopes.
pub trait SchedulerDelegate {
    /// Called when a periodic schedule fires.
    ///
    /// * `label` — the human-readable label of the schedule that fired.
    fn on_schedule_fired(&mut self, label: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_mode_mapping() {
        assert_eq!(PinMode::from_wire("output"), PinMode::Output);
        assert_eq!(PinMode::from_wire("input_pullup"), PinMode::InputPullup);
        assert_eq!(PinMode::from_wire("input"), PinMode::Input);
    }

    #[test]
    fn unrecognised_mode_falls_back_to_input() {
        assert_eq!(PinMode::from_wire("bogus"), PinMode::Input);
        assert_eq!(PinMode::from_wire(""), PinMode::Input);
    }
}
