/// Feedback websocket
///
/// Clients connect to `GET /feedback` and exchange JSON text frames of the
/// form `{"event": "...", "data": ...}`. A `feedback` event is logged and
/// answered on the same socket with a `feedback_response` carrying a fixed
/// acknowledgment. Nothing is stored and nothing is relayed to other clients.

use crate::app::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Inbound event name
pub const FEEDBACK_EVENT: &str = "feedback";

/// Outbound event name
pub const FEEDBACK_RESPONSE_EVENT: &str = "feedback_response";

/// Acknowledgment sent for every feedback event
pub const FEEDBACK_ACK: &str = "Feedback received successfully. Thank you for your input!";

/// A named event with an arbitrary payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,

    #[serde(default)]
    pub data: serde_json::Value,
}

/// Connection bookkeeping for the feedback socket
#[derive(Debug, Clone, Default)]
pub struct FeedbackNotifier {
    connections: Arc<AtomicUsize>,
}

impl FeedbackNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sockets currently open
    pub fn active_connections(&self) -> usize {
        self.connections.load(Ordering::Relaxed)
    }
}

/// Computes the reply to one inbound text frame, if any
pub fn respond(text: &str) -> Option<Envelope> {
    let envelope: Envelope = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unparseable frame");
            return None;
        }
    };

    if envelope.event != FEEDBACK_EVENT {
        tracing::debug!(event = %envelope.event, "Ignoring unknown event");
        return None;
    }

    tracing::info!(payload = %envelope.data, "Received feedback");

    Some(Envelope {
        event: FEEDBACK_RESPONSE_EVENT.to_string(),
        data: serde_json::Value::String(FEEDBACK_ACK.to_string()),
    })
}

/// Upgrades the request to the feedback websocket
pub async fn feedback_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_connection(socket, state.feedback))
}

async fn handle_connection(mut socket: WebSocket, notifier: FeedbackNotifier) {
    let count = notifier.connections.fetch_add(1, Ordering::Relaxed) + 1;
    tracing::info!(active = count, "Feedback socket opened");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let Some(reply) = respond(&text) else {
                    continue;
                };

                match serde_json::to_string(&reply) {
                    Ok(json) => {
                        if socket.send(Message::Text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "Failed to encode reply"),
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    let count = notifier.connections.fetch_sub(1, Ordering::Relaxed) - 1;
    tracing::info!(active = count, "Feedback socket closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feedback_is_acknowledged() {
        let frame = json!({ "event": "feedback", "data": { "rating": 5, "text": "nice" } });

        let reply = respond(&frame.to_string()).expect("Feedback should be answered");
        assert_eq!(reply.event, FEEDBACK_RESPONSE_EVENT);
        assert_eq!(reply.data, json!(FEEDBACK_ACK));
    }

    #[test]
    fn test_feedback_without_payload() {
        let reply = respond(r#"{"event":"feedback"}"#).expect("Feedback should be answered");
        assert_eq!(reply.event, FEEDBACK_RESPONSE_EVENT);
    }

    #[test]
    fn test_other_frames_ignored() {
        assert!(respond(r#"{"event":"client_connected","data":{"connected":true}}"#).is_none());
        assert!(respond("not json").is_none());
        assert!(respond(r#"{"data":1}"#).is_none());
    }

    #[test]
    fn test_notifier_starts_empty() {
        assert_eq!(FeedbackNotifier::new().active_connections(), 0);
    }
}
