use crate::application_port::{Lookup, ResolveError};
use crate::domain_model::{UserId, UserRecord};
use crate::domain_port::UserStore;
use chrono::Utc;
use std::sync::Mutex;

/// In-memory store for tests and the `fake` backend. Records which lookup
/// path each call took so callers can assert on routing, and can be switched
/// into a failing mode to simulate backend outages.
#[derive(Debug, Default)]
pub struct FakeUserStore {
    records: Vec<UserRecord>,
    failure: Option<String>,
    calls: Mutex<Vec<Lookup>>,
}

impl FakeUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: UserRecord) {
        self.records.push(record);
    }

    /// Makes every lookup fail with `ResolveError::Store(message)`.
    pub fn fail_with(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<Lookup> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    fn record_call(&self, lookup: Lookup) {
        self.calls.lock().expect("calls lock poisoned").push(lookup);
    }
}

#[async_trait::async_trait]
impl UserStore for FakeUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, ResolveError> {
        self.record_call(Lookup::Username);
        if let Some(message) = &self.failure {
            return Err(ResolveError::Store(message.clone()));
        }
        Ok(self.records.iter().find(|r| r.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, ResolveError> {
        self.record_call(Lookup::Email);
        if let Some(message) = &self.failure {
            return Err(ResolveError::Store(message.clone()));
        }
        Ok(self.records.iter().find(|r| r.email == email).cloned())
    }
}

/// Deterministic record for seeding. The id derives from the username so
/// repeated runs agree.
pub fn fake_record(username: &str, email: &str) -> UserRecord {
    let user_id = UserId(uuid::Uuid::new_v5(
        &uuid::Uuid::NAMESPACE_OID,
        username.as_bytes(),
    ));

    UserRecord {
        user_id,
        username: username.to_string(),
        email: email.to_string(),
        password_hash: format!("fake-hash:{}", username),
        enabled: true,
        locked: false,
        authorities: vec!["ROLE_USER".to_string()],
        created_at: Utc::now(),
    }
}
