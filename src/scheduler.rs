//! Cooperative periodic scheduler.
//!
//! The scheduler notifies a [`SchedulerDelegate`] when a schedule
//! fires; the main loop implements the delegate to run the matching
//! polling pass. Everything executes on the single main-loop timeline,
//! so a fired callback always runs to completion before the next
//! inbound message or poll is processed.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Main loop tick                       │
//! │                                                          │
//! │  drain inbound ──▶ BridgeService.handle_message()        │
//! │                                                          │
//! │  Scheduler.tick(elapsed) ──▶ SchedulerDelegate           │
//! │        "digital-poll" ──▶ BridgeService.poll_digital()   │
//! │        "analog-poll"  ──▶ BridgeService.poll_analog()    │
//! └──────────────────────────────────────────────────────────┘
//! ```

use log::info;

use crate::app::ports::SchedulerDelegate;

/// Maximum number of concurrent schedules (stack-allocated).
const MAX_SCHEDULES: usize = 4;

/// A single periodic schedule.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Human-readable label (e.g. "digital-poll").
    pub label: &'static str,
    /// Fire every `interval_ms` milliseconds.
    pub interval_ms: u32,
    /// Whether this schedule is currently enabled.
    pub enabled: bool,
}

/// Internal bookkeeping for a live schedule.
#[derive(Debug, Clone)]
struct ScheduleEntry {
    schedule: Schedule,
    /// Milliseconds accumulated since the last fire.
    elapsed_ms: u32,
}

/// The scheduler engine.
///
/// Intentionally decoupled from the bridge service: when a schedule
/// fires it invokes the [`SchedulerDelegate`] callback rather than
/// touching pins or envelopes itself, which keeps it independently
/// testable.
pub struct Scheduler {
    slots: [Option<ScheduleEntry>; MAX_SCHEDULES],
    enabled: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            slots: [None, None, None, None],
            enabled: true,
        }
    }

    /// Add a schedule. Returns the slot index, or `None` if full.
    pub fn add(&mut self, schedule: Schedule) -> Option<usize> {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                info!("scheduler: added '{}' at slot {}", schedule.label, i);
                *slot = Some(ScheduleEntry {
                    schedule,
                    elapsed_ms: 0,
                });
                return Some(i);
            }
        }
        None // All slots full.
    }

    /// Remove a schedule by slot index.
    pub fn remove(&mut self, slot: usize) {
        if slot < MAX_SCHEDULES {
            if let Some(entry) = &self.slots[slot] {
                info!(
                    "scheduler: removed '{}' from slot {}",
                    entry.schedule.label, slot
                );
            }
            self.slots[slot] = None;
        }
    }

    /// Enable or disable the entire scheduler.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Advance all schedules by `elapsed_ms` and fire those whose
    /// interval elapsed. Call once per main-loop iteration.
    ///
    /// A schedule fires at most once per tick; the overshoot carries
    /// into the next interval so the long-run cadence stays accurate.
    pub fn tick(&mut self, elapsed_ms: u32, delegate: &mut dyn SchedulerDelegate) {
        if !self.enabled {
            return;
        }

        for slot in self.slots.iter_mut().flatten() {
            if !slot.schedule.enabled {
                continue;
            }
            slot.elapsed_ms += elapsed_ms;
            if slot.elapsed_ms >= slot.schedule.interval_ms {
                slot.elapsed_ms -= slot.schedule.interval_ms;
                delegate.on_schedule_fired(slot.schedule.label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FireLog(Vec<&'static str>);
    impl SchedulerDelegate for FireLog {
        fn on_schedule_fired(&mut self, label: &str) {
            // Labels are 'static in practice; tests only compare text.
            match label {
                "digital-poll" => self.0.push("digital-poll"),
                "analog-poll" => self.0.push("analog-poll"),
                other => panic!("unexpected label {other}"),
            }
        }
    }

    fn poll_schedules() -> Scheduler {
        let mut s = Scheduler::new();
        s.add(Schedule {
            label: "digital-poll",
            interval_ms: 250,
            enabled: true,
        });
        s.add(Schedule {
            label: "analog-poll",
            interval_ms: 500,
            enabled: true,
        });
        s
    }

    #[test]
    fn fires_once_per_interval() {
        let mut s = poll_schedules();
        let mut log = FireLog(Vec::new());

        for _ in 0..25 {
            s.tick(10, &mut log); // 250 ms total
        }
        assert_eq!(log.0, vec!["digital-poll"]);

        for _ in 0..25 {
            s.tick(10, &mut log); // 500 ms total
        }
        assert_eq!(log.0, vec!["digital-poll", "digital-poll", "analog-poll"]);
    }

    #[test]
    fn overshoot_carries_into_next_interval() {
        let mut s = Scheduler::new();
        s.add(Schedule {
            label: "digital-poll",
            interval_ms: 250,
            enabled: true,
        });
        let mut log = FireLog(Vec::new());

        s.tick(300, &mut log); // fires, 50 ms carried
        s.tick(200, &mut log); // 250 ms accumulated — fires again
        assert_eq!(log.0.len(), 2);
    }

    #[test]
    fn disabled_schedule_never_fires() {
        let mut s = Scheduler::new();
        s.add(Schedule {
            label: "digital-poll",
            interval_ms: 100,
            enabled: false,
        });
        let mut log = FireLog(Vec::new());
        s.tick(1000, &mut log);
        assert!(log.0.is_empty());
    }

    #[test]
    fn global_disable_pauses_everything() {
        let mut s = poll_schedules();
        let mut log = FireLog(Vec::new());
        s.set_enabled(false);
        s.tick(10_000, &mut log);
        assert!(log.0.is_empty());
    }

    #[test]
    fn slots_are_bounded() {
        let mut s = Scheduler::new();
        for _ in 0..4 {
            assert!(
                s.add(Schedule {
                    label: "digital-poll",
                    interval_ms: 100,
                    enabled: true,
                })
                .is_some()
            );
        }
        assert!(
            s.add(Schedule {
                label: "analog-poll",
                interval_ms: 100,
                enabled: true,
            })
            .is_none()
        );
        s.remove(2);
        assert_eq!(
            s.add(Schedule {
                label: "analog-poll",
                interval_ms: 100,
                enabled: true,
            }),
            Some(2)
        );
    }
}
