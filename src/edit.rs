//! Edit session tracking. A record moves `Viewing -> Editing` on entry, back to
//! `Viewing` on a successful save or on cancel, and stays `Editing` with an
//! error after a failed save. Drafts are separate buffers, so the store only
//! changes when a save is confirmed.

use crate::record::{Field, RecordId, UserDraft, UserRecord};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
    pub snapshot: UserRecord,
    pub draft: UserDraft,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RowState {
    Viewing,
    Editing { error: Option<String> },
}

#[derive(Clone, Debug, Default)]
pub struct EditTracker {
    sessions: HashMap<RecordId, EditSession>,
}

impl EditTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters edit mode for `record`, snapshotting it. Re-entering keeps the
    /// current draft.
    pub fn begin(&mut self, record: &UserRecord) -> &UserDraft {
        &self
            .sessions
            .entry(record.id)
            .or_insert_with(|| EditSession {
                snapshot: record.clone(),
                draft: record.to_draft(),
                error: None,
            })
            .draft
    }

    /// Updates one draft field; returns `false` if the record is not being edited.
    pub fn set_field(&mut self, id: RecordId, field: Field, value: impl Into<String>) -> bool {
        match self.sessions.get_mut(&id) {
            Some(session) => {
                session.draft.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Discards the draft and returns the pre-edit snapshot.
    pub fn cancel(&mut self, id: RecordId) -> Option<UserRecord> {
        self.sessions.remove(&id).map(|session| session.snapshot)
    }

    /// Ends the session after a confirmed save or a delete.
    pub fn finish(&mut self, id: RecordId) -> Option<EditSession> {
        self.sessions.remove(&id)
    }

    /// Records a failed save; the session stays in edit mode.
    pub fn fail(&mut self, id: RecordId, message: impl Into<String>) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.error = Some(message.into());
        }
    }

    #[must_use]
    pub fn draft(&self, id: RecordId) -> Option<&UserDraft> {
        self.sessions.get(&id).map(|session| &session.draft)
    }

    #[must_use]
    pub fn state(&self, id: RecordId) -> RowState {
        match self.sessions.get(&id) {
            Some(session) => RowState::Editing {
                error: session.error.clone(),
            },
            None => RowState::Viewing,
        }
    }

    #[must_use]
    pub fn is_editing(&self, id: RecordId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        UserRecord::from_draft(
            RecordId::Remote(1),
            UserDraft {
                first_name: "Leanne".to_string(),
                last_name: "Graham".to_string(),
                email: "Sincere@april.biz".to_string(),
                company: "Romaguera-Crona".to_string(),
                phone: None,
            },
        )
    }

    #[test]
    fn cancel_returns_pre_edit_snapshot() {
        let mut tracker = EditTracker::new();
        let original = record();
        tracker.begin(&original);

        for field in Field::ALL {
            assert!(tracker.set_field(original.id, field, "changed"));
        }
        assert_eq!(
            tracker.draft(original.id).map(|d| d.email.as_str()),
            Some("changed")
        );

        assert_eq!(tracker.cancel(original.id), Some(original.clone()));
        assert_eq!(tracker.state(original.id), RowState::Viewing);
        assert_eq!(tracker.draft(original.id), None);
    }

    #[test]
    fn begin_twice_keeps_draft() {
        let mut tracker = EditTracker::new();
        let original = record();
        tracker.begin(&original);
        tracker.set_field(original.id, Field::Company, "Deckow-Crist");

        let draft = tracker.begin(&original);
        assert_eq!(draft.company, "Deckow-Crist");
    }

    #[test]
    fn failure_keeps_editing_with_error() {
        let mut tracker = EditTracker::new();
        let original = record();
        tracker.begin(&original);
        tracker.fail(original.id, "Request failed (500): Request failed.");

        assert_eq!(
            tracker.state(original.id),
            RowState::Editing {
                error: Some("Request failed (500): Request failed.".to_string())
            }
        );
    }

    #[test]
    fn set_field_without_session_is_rejected() {
        let mut tracker = EditTracker::new();
        assert!(!tracker.set_field(RecordId::Remote(4), Field::Email, "x@example.com"));
        assert!(!tracker.is_editing(RecordId::Remote(4)));
    }
}
