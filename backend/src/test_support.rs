//! In-memory adapters for integration tests.
//!
//! Compiled for unit tests and behind the `test-support` feature so suites
//! under `tests/` can drive the real services without PostgreSQL.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    AccessCodeRepository, CredentialHashError, CredentialHasher, PatientRepository,
    PhysicianRepository, StoreError, UserAccountRepository,
};
use crate::domain::{
    NewUserAccount, Patient, PatientDraft, PatientId, PatientOrder, PatientSearch, Physician,
    PhysicianDraft, Role, StoredCredentials, UserAccount, UserId,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fixed code table.
#[derive(Debug, Default)]
pub struct InMemoryAccessCodes {
    codes: HashMap<String, Role>,
}

impl InMemoryAccessCodes {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = (S, Role)>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(|(code, role)| (code.into(), role)).collect(),
        }
    }
}

#[async_trait]
impl AccessCodeRepository for InMemoryAccessCodes {
    async fn find_role(&self, code: &str) -> Result<Option<Role>, StoreError> {
        Ok(self.codes.get(code).copied())
    }
}

/// Account store enforcing username uniqueness like the database constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserAccounts {
    rows: Mutex<Vec<StoredCredentials>>,
}

impl InMemoryUserAccounts {
    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserAccountRepository for InMemoryUserAccounts {
    async fn create(&self, account: &NewUserAccount) -> Result<UserAccount, StoreError> {
        let mut rows = lock(&self.rows);
        if rows.iter().any(|row| row.account.username == account.username) {
            return Err(StoreError::conflict(format!(
                "username {} already exists",
                account.username
            )));
        }
        let next_id = i32::try_from(rows.len() + 1).map_err(|err| StoreError::query(err.to_string()))?;
        let created = UserAccount {
            id: UserId::new(next_id),
            username: account.username.clone(),
            role: account.role,
        };
        rows.push(StoredCredentials {
            account: created.clone(),
            password_hash: account.password_hash.clone(),
        });
        Ok(created)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, StoreError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|row| row.account.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<UserAccount>, StoreError> {
        Ok(lock(&self.rows).iter().map(|row| row.account.clone()).collect())
    }
}

#[derive(Debug, Default)]
struct PatientTable {
    rows: Vec<Patient>,
    next_id: i32,
}

impl PatientTable {
    fn insert(&mut self, draft: &PatientDraft) -> Patient {
        self.next_id += 1;
        let patient = draft.clone().with_id(PatientId::new(self.next_id));
        self.rows.push(patient.clone());
        patient
    }
}

/// Patient store with serial identifiers that are never reused.
#[derive(Debug, Default)]
pub struct InMemoryPatients {
    table: Mutex<PatientTable>,
}

impl InMemoryPatients {
    /// Snapshot of every stored row in id order.
    pub fn rows(&self) -> Vec<Patient> {
        lock(&self.table).rows.clone()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatients {
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, StoreError> {
        Ok(lock(&self.table).insert(draft))
    }

    async fn list(&self, order: PatientOrder) -> Result<Vec<Patient>, StoreError> {
        let mut rows = self.rows();
        if order == PatientOrder::HeartRateDescending {
            rows.sort_by(|a, b| b.heart_rate.cmp(&a.heart_rate).then(a.id.cmp(&b.id)));
        }
        Ok(rows)
    }

    async fn search(
        &self,
        search: &PatientSearch,
        limit: Option<i64>,
    ) -> Result<Vec<Patient>, StoreError> {
        let cap = limit.and_then(|l| usize::try_from(l).ok()).unwrap_or(usize::MAX);
        Ok(self
            .rows()
            .into_iter()
            .filter(|patient| search.matches(patient))
            .take(cap)
            .collect())
    }

    async fn find(&self, id: PatientId) -> Result<Option<Patient>, StoreError> {
        Ok(lock(&self.table).rows.iter().find(|p| p.id == id).cloned())
    }

    async fn find_first_by_name(&self, name: &str) -> Result<Option<Patient>, StoreError> {
        Ok(lock(&self.table).rows.iter().find(|p| p.name == name).cloned())
    }

    async fn update(&self, id: PatientId, draft: &PatientDraft) -> Result<bool, StoreError> {
        let mut table = lock(&self.table);
        let Some(row) = table.rows.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        *row = draft.clone().with_id(id);
        Ok(true)
    }

    async fn delete(&self, id: PatientId) -> Result<usize, StoreError> {
        let mut table = lock(&self.table);
        let before = table.rows.len();
        table.rows.retain(|p| p.id != id);
        Ok(before - table.rows.len())
    }

    async fn insert_batch(&self, drafts: &[PatientDraft]) -> Result<usize, StoreError> {
        let mut table = lock(&self.table);
        for draft in drafts {
            table.insert(draft);
        }
        Ok(drafts.len())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPhysicians {
    rows: Mutex<Vec<Physician>>,
}

#[async_trait]
impl PhysicianRepository for InMemoryPhysicians {
    async fn create(&self, draft: &PhysicianDraft) -> Result<Physician, StoreError> {
        let mut rows = lock(&self.rows);
        let id = i32::try_from(rows.len() + 1).map_err(|err| StoreError::query(err.to_string()))?;
        let physician = Physician {
            id,
            name: draft.name().to_owned(),
            specialty: draft.specialty().to_owned(),
        };
        rows.push(physician.clone());
        Ok(physician)
    }

    async fn list(&self) -> Result<Vec<Physician>, StoreError> {
        Ok(lock(&self.rows).clone())
    }
}

/// Reversible stand-in for Argon2 so tests stay fast. Never use outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainCredentialHasher;

const PLAIN_PREFIX: &str = "plain$";

impl CredentialHasher for PlainCredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialHashError> {
        Ok(format!("{PLAIN_PREFIX}{password}"))
    }

    fn verify(&self, password: &str, encoded: &str) -> Result<bool, CredentialHashError> {
        let stored = encoded
            .strip_prefix(PLAIN_PREFIX)
            .ok_or_else(|| CredentialHashError::malformed_hash("missing plain$ prefix"))?;
        Ok(stored == password)
    }
}
