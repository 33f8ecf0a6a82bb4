//! PinBridge firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by the `espidf`
//! feature within each module; the protocol handler, change watcher and
//! scheduler build and test on any host target.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod protocol;
pub mod scheduler;
pub mod watch;

pub mod adapters;
