//! WebSocket transport adapter.
//!
//! Implements [`MessageSink`] over a persistent WebSocket client and
//! exposes the inbound side as a drainable queue: the ESP-IDF client
//! delivers frames on its own task, so text frames are handed off
//! through a channel and consumed by the main loop. That keeps command
//! handling on the single core timeline — the transport callback never
//! runs bridge logic itself.
//!
//! Connection lifecycle (TLS handshake, reconnect backoff) is the
//! ESP-IDF client's concern; this adapter only reflects link state and
//! drops outbound envelopes with a log while the link is down.

use crate::app::ports::MessageSink;

#[cfg(feature = "espidf")]
mod esp {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc::{Receiver, Sender, channel};
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::Result;
    use esp_idf_svc::io::EspIOError;
    use esp_idf_svc::ws::client::{
        EspWebSocketClient, EspWebSocketClientConfig, WebSocketEvent, WebSocketEventType,
    };
    use esp_idf_svc::ws::FrameType;
    use log::{info, warn};

    pub struct WsLink {
        client: EspWebSocketClient<'static>,
        inbound: Receiver<String>,
        connected: Arc<AtomicBool>,
    }

    impl WsLink {
        /// Open the WebSocket client against `url` and start receiving.
        pub fn connect(url: &str) -> Result<Self> {
            let (tx, inbound): (Sender<String>, Receiver<String>) = channel();
            let connected = Arc::new(AtomicBool::new(false));
            let link_state = Arc::clone(&connected);

            let config = EspWebSocketClientConfig {
                ..Default::default()
            };

            let client = EspWebSocketClient::new(
                url,
                &config,
                Duration::from_secs(10),
                move |event: &core::result::Result<WebSocketEvent<'_>, EspIOError>| match event {
                    Ok(ev) => match ev.event_type {
                        WebSocketEventType::Connected => {
                            info!("ws connected");
                            link_state.store(true, Ordering::Relaxed);
                        }
                        WebSocketEventType::Disconnected => {
                            info!("ws disconnected");
                            link_state.store(false, Ordering::Relaxed);
                        }
                        WebSocketEventType::Text(text) => {
                            // Main loop drains this; a send failure
                            // means we are shutting down.
                            let _ = tx.send(text.to_string());
                        }
                        _ => {}
                    },
                    Err(e) => warn!("ws event error: {e}"),
                },
            )?;

            Ok(Self {
                client,
                inbound,
                connected,
            })
        }

        pub fn is_connected(&self) -> bool {
            self.connected.load(Ordering::Relaxed)
        }

        /// Next queued inbound text frame, if any.
        pub fn try_recv(&mut self) -> Option<String> {
            self.inbound.try_recv().ok()
        }

        pub fn send_text(&mut self, text: &str) {
            if let Err(e) = self.client.send(FrameType::Text(false), text.as_bytes()) {
                warn!("ws send failed, dropping frame: {e}");
            }
        }
    }
}

#[cfg(feature = "espidf")]
pub use esp::WsLink;

/// Host simulation: outbound frames are captured, inbound frames are
/// injected by tests.
#[cfg(not(feature = "espidf"))]
pub struct WsLink {
    sent: Vec<String>,
    inbound: std::collections::VecDeque<String>,
    connected: bool,
}

#[cfg(not(feature = "espidf"))]
impl WsLink {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            inbound: std::collections::VecDeque::new(),
            connected: true,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Next queued inbound text frame, if any.
    pub fn try_recv(&mut self) -> Option<String> {
        self.inbound.pop_front()
    }

    /// Queue a frame as if the peer had sent it.
    pub fn inject_inbound(&mut self, text: &str) {
        self.inbound.push_back(text.to_owned());
    }

    /// Frames captured from the bridge, oldest first.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    pub fn send_text(&mut self, text: &str) {
        self.sent.push(text.to_owned());
    }
}

impl MessageSink for WsLink {
    fn send_text(&mut self, text: &str) {
        WsLink::send_text(self, text);
    }
}
