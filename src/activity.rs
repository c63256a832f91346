//! Live Activity notification payloads.
//!
//! APNs expects the Live Activity state nested under `aps`, with the
//! activity id at the top level:
//!
//! ```json
//! {
//!   "aps": {
//!     "event": "update",
//!     "timestamp": 1700000000,
//!     "content-state": {
//!       "status": "approved",
//!       "responseTime": "2023-11-14T22:13:20Z",
//!       "respondedBy": "Jane Doe"
//!     }
//!   },
//!   "activity-id": "abc-123"
//! }
//! ```
//!
//! Field names must match what the app's `ActivityAttributes.ContentState`
//! decodes, so they are fixed here by serde attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status values the app's widget knows how to render.
///
/// [`build_payload`] does not enforce membership; an unknown value is
/// delivered as-is and the device will fail to decode the state.
pub const KNOWN_STATUSES: &[&str] = &["approved", "rejected", "cancelled", "finished"];

/// Whether `status` is one of [`KNOWN_STATUSES`].
pub fn is_known_status(status: &str) -> bool {
    KNOWN_STATUSES.contains(&status)
}

/// Live Activity event type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveActivityEvent {
    /// Replace the activity's content state.
    #[default]
    Update,
    /// Replace the content state and end the activity.
    End,
}

impl std::fmt::Display for LiveActivityEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Update => f.write_str("update"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Mutable device-side state of the Live Activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentState {
    /// Request status, e.g. `approved`.
    pub status: String,
    /// When the responder acted.
    #[serde(rename = "responseTime")]
    pub response_time: DateTime<Utc>,
    /// Name of the staff member who responded.
    #[serde(rename = "respondedBy")]
    pub responded_by: String,
}

/// The `aps` dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aps {
    /// Event type.
    pub event: LiveActivityEvent,
    /// Unix seconds; APNs drops updates older than the last one delivered.
    pub timestamp: i64,
    /// New content state.
    #[serde(rename = "content-state")]
    pub content_state: ContentState,
}

/// Full request body for one Live Activity push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Apple-reserved dictionary.
    pub aps: Aps,
    /// Activity the update targets.
    #[serde(rename = "activity-id")]
    pub activity_id: String,
}

impl NotificationPayload {
    /// Overrides the event type.
    pub fn with_event(mut self, event: LiveActivityEvent) -> Self {
        self.aps.event = event;
        self
    }
}

/// Builds an `update` payload stamped with the current time.
pub fn build_payload(
    status: &str,
    response_time: DateTime<Utc>,
    responder_name: &str,
    activity_id: &str,
) -> NotificationPayload {
    NotificationPayload {
        aps: Aps {
            event: LiveActivityEvent::Update,
            timestamp: Utc::now().timestamp(),
            content_state: ContentState {
                status: status.to_string(),
                response_time,
                responded_by: responder_name.to_string(),
            },
        },
        activity_id: activity_id.to_string(),
    }
}

/// JSON-encodes the payload. Output is deterministic for a given payload.
pub fn serialize(payload: &NotificationPayload) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(payload)
}
