//! Wire protocol — JSON command envelopes in, response envelopes out.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    Protocol Stack                         │
//! │                                                           │
//! │  ┌───────────┐   ┌──────────┐   ┌─────────────────────┐   │
//! │  │ Transport │──▶│  decode  │──▶│ BridgeService       │   │
//! │  │ (text)    │   │ (staged  │   │ (dispatch)          │   │
//! │  └───────────┘   │  checks) │   └──────────┬──────────┘   │
//! │       ▲          └──────────┘              │              │
//! │       │                                    ▼              │
//! │       │                          ┌──────────────────┐     │
//! │       └──────────────────────────│ envelope (encode)│     │
//! │                                  └──────────────────┘     │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Every inbound message produces exactly one outbound envelope; decode
//! failures become error envelopes carrying the strings the remote
//! controller matches on, so the exact texts here are wire-compatibility
//! constants.

pub mod decode;
pub mod envelope;
