//! PinBridge firmware — device entry point.
//!
//! Hexagonal wiring:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                     │
//! │                                                            │
//! │  GpioAdapter      WsLink            WifiLink               │
//! │  (GpioPort)       (MessageSink +    (STA bring-up)         │
//! │                    inbound queue)                          │
//! │                                                            │
//! │  ────────────── Port Trait Boundary ──────────────         │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │        BridgeService (pure logic)                │      │
//! │  │  decode · dispatch · change watcher              │      │
//! │  └──────────────────────────────────────────────────┘      │
//! │                                                            │
//! │  Scheduler (delegate-driven polling cadence)               │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The main loop serialises everything onto one timeline: drain queued
//! inbound frames, tick the scheduler (which runs the polling passes),
//! mirror link state on the status LED, sleep.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{info, warn};

use pinbridge::adapters::hardware::GpioAdapter;
use pinbridge::adapters::wifi::WifiLink;
use pinbridge::adapters::ws::WsLink;
use pinbridge::app::ports::{GpioPort, PinMode, SchedulerDelegate};
use pinbridge::app::service::BridgeService;
use pinbridge::config::BridgeConfig;
use pinbridge::scheduler::{Schedule, Scheduler};

/// On-board LED, mirrors WiFi link state.
const STATUS_LED_PIN: u8 = 2;

/// Main-loop sleep per iteration; also the scheduler tick granularity.
const LOOP_TICK_MS: u32 = 10;

// ── Scheduler delegate ────────────────────────────────────────
//
// Bridges the scheduler (which knows nothing about pins or envelopes)
// to the watcher's polling passes.

struct PollDelegate<'a> {
    service: &'a mut BridgeService,
    gpio: &'a mut GpioAdapter,
    sink: &'a mut WsLink,
}

impl SchedulerDelegate for PollDelegate<'_> {
    fn on_schedule_fired(&mut self, label: &str) {
        match label {
            "digital-poll" => self.service.poll_digital(self.gpio, self.sink),
            "analog-poll" => self.service.poll_analog(self.gpio, self.sink),
            other => warn!("unknown schedule '{other}' fired"),
        }
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("pinbridge v{}", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let config = BridgeConfig::default();

    // ── 2. Connectivity ───────────────────────────────────────
    let wifi = WifiLink::connect(peripherals.modem, sysloop, nvs, &config)?;
    let mut ws = WsLink::connect(&config.ws_url())?;

    // ── 3. Core + polling cadence ─────────────────────────────
    let mut gpio = GpioAdapter::new();
    gpio.set_mode(STATUS_LED_PIN, PinMode::Output);

    let mut service = BridgeService::new();

    let mut sched = Scheduler::new();
    sched.add(Schedule {
        label: "digital-poll",
        interval_ms: config.digital_poll_interval_ms,
        enabled: true,
    });
    sched.add(Schedule {
        label: "analog-poll",
        interval_ms: config.analog_poll_interval_ms,
        enabled: true,
    });

    // ── 4. Main loop ──────────────────────────────────────────
    loop {
        while let Some(frame) = ws.try_recv() {
            service.handle_message(frame.as_bytes(), &mut gpio, &mut ws);
        }

        {
            let mut delegate = PollDelegate {
                service: &mut service,
                gpio: &mut gpio,
                sink: &mut ws,
            };
            sched.tick(LOOP_TICK_MS, &mut delegate);
        }

        gpio.write_digital(STATUS_LED_PIN, i32::from(wifi.is_connected()));
        FreeRtos::delay_ms(LOOP_TICK_MS);
    }
}
