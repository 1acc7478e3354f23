//! In-process gateway for manager and shell tests. Behaves like the public
//! fixture backend: every create echoes the same synthetic id, nothing is
//! persisted between calls.

#![allow(dead_code, clippy::unwrap_used)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::Notify;
use usermgr::{
    config::ManagerConfig,
    error::GatewayError,
    gateway::RemoteGateway,
    manager::UserManager,
    record::{RemoteUser, UserDraft},
};

/// Id the fixture backend echoes for every create.
pub const FIXTURE_CREATE_ID: u64 = 11;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Create,
    Update,
    Delete,
}

#[derive(Debug)]
pub struct FakeGateway {
    users: Mutex<Vec<RemoteUser>>,
    create_id: Mutex<Option<u64>>,
    update_echo: Mutex<Option<RemoteUser>>,
    failures: Mutex<HashMap<Op, GatewayError>>,
    delays: Mutex<HashMap<Op, Duration>>,
    gate: Mutex<Option<Arc<Notify>>>,
    calls: Mutex<Vec<(Op, Option<u64>)>>,
}

impl FakeGateway {
    pub fn new(users: Vec<RemoteUser>) -> Self {
        Self {
            users: Mutex::new(users),
            create_id: Mutex::new(Some(FIXTURE_CREATE_ID)),
            update_echo: Mutex::new(None),
            failures: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            gate: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Id echoed by the next creates; `None` echoes no id at all.
    pub fn echo_create_id(&self, id: Option<u64>) {
        *self.create_id.lock().unwrap() = id;
    }

    /// Overrides the update echo, e.g. to simulate server-side normalization.
    pub fn echo_update(&self, echo: RemoteUser) {
        *self.update_echo.lock().unwrap() = Some(echo);
    }

    /// Every call of `op` fails with `err` until cleared.
    pub fn fail(&self, op: Op, err: GatewayError) {
        self.failures.lock().unwrap().insert(op, err);
    }

    pub fn recover(&self, op: Op) {
        self.failures.lock().unwrap().remove(&op);
    }

    pub fn delay(&self, op: Op, delay: Duration) {
        self.delays.lock().unwrap().insert(op, delay);
    }

    /// Every call waits for a notification before resolving.
    pub fn gate(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    pub fn calls(&self) -> Vec<(Op, Option<u64>)> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, op: Op, id: Option<u64>) -> Result<(), GatewayError> {
        let (delay, gate) = {
            self.calls.lock().unwrap().push((op, id));
            let delay = self.delays.lock().unwrap().get(&op).copied();
            let gate = self.gate.lock().unwrap().clone();
            (delay, gate)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match self.failures.lock().unwrap().get(&op).cloned() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl RemoteGateway for FakeGateway {
    async fn list(&self) -> Result<Vec<RemoteUser>, GatewayError> {
        self.enter(Op::List, None).await?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create(&self, draft: &UserDraft) -> Result<RemoteUser, GatewayError> {
        self.enter(Op::Create, None).await?;
        let id = *self.create_id.lock().unwrap();
        Ok(echo(id, draft))
    }

    async fn update(&self, id: u64, draft: &UserDraft) -> Result<RemoteUser, GatewayError> {
        self.enter(Op::Update, Some(id)).await?;
        let overridden = self.update_echo.lock().unwrap().clone();
        Ok(overridden.unwrap_or_else(|| echo(Some(id), draft)))
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        self.enter(Op::Delete, Some(id)).await
    }
}

pub fn echo(id: Option<u64>, draft: &UserDraft) -> RemoteUser {
    RemoteUser {
        id,
        first_name: Some(draft.first_name.clone()),
        last_name: Some(draft.last_name.clone()),
        email: Some(draft.email.clone()),
        company: Some(draft.company.clone()),
        phone: draft.phone.clone(),
    }
}

pub fn remote(id: u64, first: &str, last: &str) -> RemoteUser {
    RemoteUser {
        id: Some(id),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        email: Some(format!("{}@example.com", first.to_lowercase())),
        company: Some("Romaguera-Crona".to_string()),
        phone: None,
    }
}

pub fn draft(first: &str, last: &str) -> UserDraft {
    UserDraft {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        company: "Analytical Engines".to_string(),
        phone: None,
    }
}

/// Five fixture users with ids 1..=5.
pub fn five_users() -> Vec<RemoteUser> {
    vec![
        remote(1, "Leanne", "Graham"),
        remote(2, "Ervin", "Howell"),
        remote(3, "Clementine", "Bauch"),
        remote(4, "Patricia", "Lebsack"),
        remote(5, "Chelsey", "Dietrich"),
    ]
}

pub async fn mounted(users: Vec<RemoteUser>) -> UserManager<FakeGateway> {
    let manager = UserManager::new(FakeGateway::new(users), &ManagerConfig::default());
    manager.load().await.unwrap();
    manager
}
