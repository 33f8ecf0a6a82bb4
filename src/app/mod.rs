//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the pin bridge: command
//! dispatch and change-notification bookkeeping. All interaction with
//! hardware and the message channel happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals or a live WebSocket.

pub mod commands;
pub mod ports;
pub mod service;
