//! Session event definitions
//!
//! Events emitted to session listeners after every selection change, and
//! when an incoming vector is rejected.

use chrono::Utc;
use serde::Serialize;
use types::errors::VectorError;
use types::ids::SessionId;
use types::macro_vector::MacroVector;
use uuid::Uuid;

/// Event emitted by a calculator session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEvent {
    pub event_id: Uuid,
    pub session_id: SessionId,
    pub kind: SessionEventKind,
    /// Canonical vector after the event
    pub vector: String,
    /// Macro vector of the live selection after the event
    pub macro_vector: MacroVector,
    /// Unix nanos
    pub timestamp: i64,
}

/// Session event classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionEventKind {
    /// Selection returned to catalog defaults
    Reset,
    /// A single metric was assigned directly
    MetricSet { code: String, value: String },
    /// A decoded vector was committed
    VectorApplied { metrics: usize },
    /// A vector was refused; the selection is unchanged
    VectorRejected { code: String, reason: String },
    /// Scores recomputed without a selection change
    Recomputed,
}

impl SessionEvent {
    pub fn new(
        session_id: SessionId,
        kind: SessionEventKind,
        vector: String,
        macro_vector: MacroVector,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            session_id,
            kind,
            vector,
            macro_vector,
            timestamp: now_nanos(),
        }
    }

    /// Whether the event reflects a change of the live selection
    pub fn changes_selection(&self) -> bool {
        matches!(
            self.kind,
            SessionEventKind::Reset
                | SessionEventKind::MetricSet { .. }
                | SessionEventKind::VectorApplied { .. }
        )
    }
}

/// Build the kind of a rejection event from the decode error
pub fn rejection(err: &VectorError) -> SessionEventKind {
    SessionEventKind::VectorRejected {
        code: err.code().to_string(),
        reason: err.to_string(),
    }
}

fn now_nanos() -> i64 {
    let now = Utc::now();
    now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp_micros() * 1_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv() -> MacroVector {
        MacroVector::new([0, 0, 2, 2, 0, 1])
    }

    #[test]
    fn test_event_has_unique_id() {
        let e1 = SessionEvent::new(SessionId::new(), SessionEventKind::Reset, "a".into(), mv());
        let e2 = SessionEvent::new(SessionId::new(), SessionEventKind::Reset, "b".into(), mv());
        assert_ne!(e1.event_id, e2.event_id);
        assert!(e1.timestamp > 0);
    }

    #[test]
    fn test_rejection_event_does_not_change_selection() {
        let err = VectorError::MalformedPrefix {
            found: "CVSS:3.1".into(),
        };
        let event = SessionEvent::new(SessionId::new(), rejection(&err), "CVSS:4.0".into(), mv());
        assert!(!event.changes_selection());
        match event.kind {
            SessionEventKind::VectorRejected { code, .. } => assert_eq!(code, "MALFORMED_PREFIX"),
            other => panic!("Expected VectorRejected, got {:?}", other),
        }
    }

    #[test]
    fn test_metric_set_changes_selection() {
        let event = SessionEvent::new(
            SessionId::new(),
            SessionEventKind::MetricSet {
                code: "AV".into(),
                value: "L".into(),
            },
            "CVSS:4.0/AV:L".into(),
            mv(),
        );
        assert!(event.changes_selection());
    }

    #[test]
    fn test_event_json_shape() {
        let event = SessionEvent::new(
            SessionId::new(),
            SessionEventKind::VectorApplied { metrics: 11 },
            "CVSS:4.0".into(),
            mv(),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"]["type"], "VECTOR_APPLIED");
        assert_eq!(json["kind"]["metrics"], 11);
        assert_eq!(json["macro_vector"], "002201");
    }
}
