//! Fuzz the full inbound path: arbitrary bytes through decode and
//! dispatch must never panic, and must always emit exactly one envelope.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinbridge::app::ports::{GpioPort, MessageSink, PinMode};
use pinbridge::app::service::BridgeService;

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

fuzz_target!(|data: &[u8]| {
    let mut svc = BridgeService::new();
    let mut sink = CountingSink(0);
    svc.handle_message(data, &mut NullGpio, &mut sink);
    assert_eq!(sink.0, 1);
});
