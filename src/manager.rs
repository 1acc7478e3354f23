//! The user manager: one collection store, its edit sessions and the error
//! channel, reconciled against a [`RemoteGateway`].
//!
//! Local state changes only after the gateway confirms a call. The state mutex
//! is never held across a gateway call, so several operations may be in flight
//! at once; whichever response resolves last wins, except that an update which
//! resolves after its record was deleted does not bring it back. Once
//! [`UserManager::teardown`] runs, late responses are dropped without touching
//! state.

use crate::{
    config::ManagerConfig,
    edit::{EditTracker, RowState},
    error::{GatewayError, ManagerError},
    error_channel::ErrorChannel,
    gateway::RemoteGateway,
    record::{Field, RecordId, RemoteUser, UserDraft, UserRecord},
    store::CollectionStore,
};
use serde::Serialize;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard, PoisonError,
};
use tracing::{debug, info, instrument, warn};

/// A record together with its edit state, as rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Row {
    #[serde(flatten)]
    pub record: UserRecord,
    pub state: RowState,
}

#[derive(Debug)]
struct State {
    store: CollectionStore,
    edits: EditTracker,
    errors: ErrorChannel,
}

impl State {
    fn fetch_failed(&mut self, message: String) -> ManagerError {
        warn!("{message}");
        self.errors.raise(message.clone());
        ManagerError::FetchFailed(message)
    }
}

#[derive(Debug)]
pub struct UserManager<G> {
    gateway: G,
    state: Mutex<State>,
    mounted: AtomicBool,
}

impl<G: RemoteGateway> UserManager<G> {
    #[must_use]
    pub fn new(gateway: G, config: &ManagerConfig) -> Self {
        Self {
            gateway,
            state: Mutex::new(State {
                store: CollectionStore::new(),
                edits: EditTracker::new(),
                errors: ErrorChannel::new(config.error_ttl),
            }),
            mounted: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_mounted(&self) -> Result<(), ManagerError> {
        if self.mounted.load(Ordering::Acquire) {
            Ok(())
        } else {
            debug!("dropping response after teardown");
            Err(ManagerError::TornDown)
        }
    }

    /// Stops all state updates. Responses that resolve afterwards are ignored.
    pub fn teardown(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Populates the store from the remote list. On failure the store keeps
    /// its previous contents.
    ///
    /// # Errors
    /// `FetchFailed` on gateway failure, `TornDown` after teardown.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize, ManagerError> {
        self.ensure_mounted()?;
        let result = self.gateway.list().await;
        self.ensure_mounted()?;

        let mut state = self.state();
        match result {
            Ok(users) => {
                let records: Vec<UserRecord> = users.into_iter().map(into_record).collect();
                let count = records.len();
                state.store.replace_all(records);
                state.edits.clear();
                state.errors.clear();
                info!("loaded {count} users");
                Ok(count)
            }
            Err(err) => Err(state.fetch_failed(format!("Failed to load users: {err}"))),
        }
    }

    /// Creates a user remotely and appends it once the server confirms.
    ///
    /// # Errors
    /// `Invalid` for a draft missing required fields, `FetchFailed` on gateway
    /// failure, `TornDown` after teardown.
    #[instrument(skip(self, draft))]
    pub async fn add(&self, draft: UserDraft) -> Result<RecordId, ManagerError> {
        self.ensure_mounted()?;
        if let Err(err) = draft.validate() {
            self.state().errors.raise(err.to_string());
            return Err(err.into());
        }

        let result = self.gateway.create(&draft).await;
        self.ensure_mounted()?;

        let mut state = self.state();
        match result {
            Ok(echo) => {
                let fields = draft.reconcile(&echo);
                let id = state.store.add(echo.id, fields);
                state.errors.clear();
                info!("added user {id}");
                Ok(id)
            }
            Err(err) => Err(state.fetch_failed(format!("Failed to add user: {err}"))),
        }
    }

    /// Enters edit mode for a record and returns its draft.
    ///
    /// # Errors
    /// `UnknownRecord` if the id is not in the store.
    pub fn begin_edit(&self, id: RecordId) -> Result<UserDraft, ManagerError> {
        let mut state = self.state();
        let record = state
            .store
            .get(id)
            .cloned()
            .ok_or(ManagerError::UnknownRecord(id))?;
        Ok(state.edits.begin(&record).clone())
    }

    /// Types into one field of the draft. The stored record is not touched.
    ///
    /// # Errors
    /// `NotEditing` if the record has no open edit session.
    pub fn set_field(
        &self,
        id: RecordId,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), ManagerError> {
        if self.state().edits.set_field(id, field, value) {
            Ok(())
        } else {
            Err(ManagerError::NotEditing(id))
        }
    }

    /// Leaves edit mode and discards the draft. Returns the pre-edit values.
    ///
    /// # Errors
    /// `NotEditing` if the record has no open edit session.
    pub fn cancel_edit(&self, id: RecordId) -> Result<UserRecord, ManagerError> {
        self.state()
            .edits
            .cancel(id)
            .ok_or(ManagerError::NotEditing(id))
    }

    /// Sends the draft and, on success, replaces the stored record with the
    /// server echo merged over the draft. On failure the record stays in edit
    /// mode with the error attached and the store is unchanged.
    ///
    /// Records with a local id are unknown to the server and are saved
    /// locally without a network call.
    ///
    /// # Errors
    /// `NotEditing`, `Invalid`, `FetchFailed`, `TornDown`, or `UnknownRecord`
    /// when the record was deleted while the update was in flight.
    #[instrument(skip(self))]
    pub async fn save_edit(&self, id: RecordId) -> Result<UserRecord, ManagerError> {
        self.ensure_mounted()?;
        let draft = {
            let mut state = self.state();
            let draft = state
                .edits
                .draft(id)
                .cloned()
                .ok_or(ManagerError::NotEditing(id))?;
            if let Err(err) = draft.validate() {
                let message = err.to_string();
                state.edits.fail(id, message.clone());
                state.errors.raise(message);
                return Err(err.into());
            }
            draft
        };

        let result = match id.remote() {
            Some(remote_id) => self.gateway.update(remote_id, &draft).await,
            None => {
                debug!("user {id} has a local id, saving without a remote call");
                Ok(RemoteUser::default())
            }
        };
        self.ensure_mounted()?;

        let mut state = self.state();
        match result {
            Ok(echo) => {
                let record = UserRecord::from_draft(id, draft.reconcile(&echo));
                state.edits.finish(id);
                if state.store.replace(record.clone()).is_none() {
                    warn!("user {id} was removed before its update resolved");
                    return Err(ManagerError::UnknownRecord(id));
                }
                state.errors.clear();
                info!("updated user {id}");
                Ok(record)
            }
            Err(err) => {
                let message = format!("Failed to update user {id}: {err}");
                state.edits.fail(id, message.clone());
                Err(state.fetch_failed(message))
            }
        }
    }

    /// Deletes a record remotely and removes it once the server confirms.
    ///
    /// # Errors
    /// `UnknownRecord`, `FetchFailed`, `TornDown`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> Result<(), ManagerError> {
        self.ensure_mounted()?;
        let known = self.state().store.contains(id);
        if !known {
            return Err(ManagerError::UnknownRecord(id));
        }

        let result: Result<(), GatewayError> = match id.remote() {
            Some(remote_id) => self.gateway.delete(remote_id).await,
            None => {
                debug!("user {id} has a local id, deleting without a remote call");
                Ok(())
            }
        };
        self.ensure_mounted()?;

        let mut state = self.state();
        match result {
            Ok(()) => {
                state.store.remove(id);
                state.edits.finish(id);
                state.errors.clear();
                info!("deleted user {id}");
                Ok(())
            }
            Err(err) => Err(state.fetch_failed(format!("Failed to delete user {id}: {err}"))),
        }
    }

    #[must_use]
    pub fn records(&self) -> Vec<UserRecord> {
        self.state().store.snapshot()
    }

    #[must_use]
    pub fn record(&self, id: RecordId) -> Option<UserRecord> {
        self.state().store.get(id).cloned()
    }

    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        let state = self.state();
        state
            .store
            .iter()
            .map(|record| Row {
                record: record.clone(),
                state: state.edits.state(record.id),
            })
            .collect()
    }

    #[must_use]
    pub fn draft(&self, id: RecordId) -> Option<UserDraft> {
        self.state().edits.draft(id).cloned()
    }

    #[must_use]
    pub fn row_state(&self, id: RecordId) -> RowState {
        self.state().edits.state(id)
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state().errors.current().map(ToString::to_string)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state().store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state().store.is_empty()
    }
}

fn into_record(user: RemoteUser) -> UserRecord {
    let id = user.id.map_or_else(RecordId::new_local, RecordId::Remote);
    UserRecord::from_draft(id, user.into_draft())
}
