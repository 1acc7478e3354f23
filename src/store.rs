use crate::record::{RecordId, UserDraft, UserRecord};
use std::collections::HashSet;
use tracing::warn;

/// Ordered in-memory collection of user records.
///
/// Each mutation is a single in-place change; readers take a [`snapshot`].
///
/// [`snapshot`]: CollectionStore::snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionStore {
    records: Vec<UserRecord>,
}

impl CollectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every record with the given list, keeping its order and length.
    pub fn replace_all(&mut self, records: Vec<UserRecord>) {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                warn!("server listed user {} more than once", record.id);
            }
        }
        self.records = records;
    }

    /// Appends a new record and returns the id it was stored under.
    ///
    /// The server-echoed id is used when present and not already taken.
    /// Otherwise the record gets a fresh local id, so ids stay unique.
    pub fn add(&mut self, echoed: Option<u64>, draft: UserDraft) -> RecordId {
        let id = match echoed.map(RecordId::Remote) {
            Some(id) if !self.contains(id) => id,
            Some(id) => {
                warn!("server echoed id {id} which is already in use, assigning a local id");
                self.fresh_local_id()
            }
            None => {
                warn!("server echoed no id, assigning a local id");
                self.fresh_local_id()
            }
        };
        self.records.push(UserRecord::from_draft(id, draft));
        id
    }

    fn fresh_local_id(&self) -> RecordId {
        loop {
            let id = RecordId::new_local();
            if !self.contains(id) {
                return id;
            }
        }
    }

    /// Overwrites every record with the same id in place and returns the first
    /// previous value. Absent ids are a no-op.
    pub fn replace(&mut self, record: UserRecord) -> Option<UserRecord> {
        let mut previous = None;
        for slot in self.records.iter_mut().filter(|r| r.id == record.id) {
            let old = std::mem::replace(slot, record.clone());
            previous.get_or_insert(old);
        }
        previous
    }

    /// Drops every record with `id`, keeping the order of the rest, and
    /// returns what was removed.
    pub fn remove(&mut self, id: RecordId) -> Vec<UserRecord> {
        let mut removed = Vec::new();
        self.records.retain(|r| {
            if r.id == id {
                removed.push(r.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<UserRecord> {
        self.records.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, first: &str) -> UserRecord {
        UserRecord::from_draft(
            RecordId::Remote(id),
            UserDraft {
                first_name: first.to_string(),
                last_name: "Test".to_string(),
                email: format!("{}@example.com", first.to_lowercase()),
                company: "Acme".to_string(),
                phone: None,
            },
        )
    }

    #[test]
    fn replace_all_keeps_length_even_with_duplicates() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![record(1, "A"), record(1, "A2"), record(2, "B")]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn add_trusts_echoed_id() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![record(1, "A"), record(2, "B")]);

        let id = store.add(Some(99), record(0, "C").to_draft());
        assert_eq!(id, RecordId::Remote(99));
        assert_eq!(store.len(), 3);
        assert_eq!(store.iter().last().map(|r| r.id), Some(RecordId::Remote(99)));
    }

    #[test]
    fn add_never_reuses_a_taken_id() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![record(1, "A"), record(2, "B"), record(4, "D")]);

        // Count-based assignment would pick 4 here and collide.
        let first = store.add(Some(4), record(0, "E").to_draft());
        let second = store.add(None, record(0, "F").to_draft());

        assert!(matches!(first, RecordId::Local(_)));
        assert!(matches!(second, RecordId::Local(_)));
        assert_ne!(first, second);
        assert_eq!(
            store.get(RecordId::Remote(4)).map(|r| r.first_name.as_str()),
            Some("D")
        );
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn replace_is_in_place_and_noop_when_absent() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![record(1, "A"), record(2, "B"), record(3, "C")]);

        let previous = store.replace(record(2, "Bee"));
        assert_eq!(previous.map(|r| r.first_name), Some("B".to_string()));
        let order: Vec<_> = store.iter().map(|r| r.first_name.clone()).collect();
        assert_eq!(order, ["A", "Bee", "C"]);

        assert_eq!(store.replace(record(9, "Z")), None);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn remove_keeps_order() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![record(1, "A"), record(2, "B"), record(3, "C")]);

        assert_eq!(store.remove(RecordId::Remote(2)).len(), 1);
        assert!(store.remove(RecordId::Remote(2)).is_empty());
        let ids: Vec<_> = store.iter().map(|r| r.id).collect();
        assert_eq!(ids, [RecordId::Remote(1), RecordId::Remote(3)]);
    }

    #[test]
    fn duplicate_ids_are_removed_and_replaced_together() {
        let mut store = CollectionStore::new();
        store.replace_all(vec![record(1, "A"), record(2, "B"), record(1, "A2")]);

        let previous = store.replace(record(1, "Ann"));
        assert_eq!(previous.map(|r| r.first_name), Some("A".to_string()));
        let names: Vec<_> = store.iter().map(|r| r.first_name.clone()).collect();
        assert_eq!(names, ["Ann", "B", "Ann"]);

        let removed = store.remove(RecordId::Remote(1));
        assert_eq!(removed.len(), 2);
        assert!(!store.contains(RecordId::Remote(1)));
        let ids: Vec<_> = store.iter().map(|r| r.id).collect();
        assert_eq!(ids, [RecordId::Remote(2)]);
    }
}
