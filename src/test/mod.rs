//! In-memory stand-ins for the Postgres-backed store, directory and cache, plus route-test fixtures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    HttpMessage,
};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::api::error;
use crate::configs::CacheStore;
use crate::modules::{
    account::{repository::AccountDirectory, schema::AccountEntity},
    friendship::{
        pair::{DirectedPair, UserPair},
        repository::FriendshipStore,
        schema::{FriendshipEntity, FriendshipStatus},
    },
};
use crate::utils::{Claims, SessionRole};

/// Header carrying the acting user id in route tests.
pub const ACTING_USER: &str = "x-acting-user";

/// Route-test replacement for `authentication`: trusts the `ACTING_USER` header
/// instead of verifying a bearer token.
pub async fn act_as<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, actix_web::Error>
where
    B: MessageBody + 'static,
{
    let acting_user = req
        .headers()
        .get(ACTING_USER)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| Uuid::parse_str(h).ok());

    if let Some(sub) = acting_user {
        req.extensions_mut().insert(Claims::new(&sub, SessionRole::Authenticated, 3600));
    }

    next.call(req).await
}

/// Inserts a row into the local `profiles` mirror.
pub async fn insert_profile(pool: &sqlx::PgPool, username: &str) -> Uuid {
    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO profiles (id, username, display_name) VALUES ($1, $2, $2)")
        .bind(id)
        .bind(username)
        .execute(pool)
        .await
        .unwrap();
    id
}

/// Strictly increasing timestamps so "newest first" is deterministic.
#[derive(Default)]
struct Clock(i64);

impl Clock {
    fn tick(&mut self) -> DateTime<Utc> {
        self.0 += 1;
        DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(self.0)
    }
}

#[derive(Default)]
struct StoreState {
    rows: Vec<FriendshipEntity>,
    clock: Clock,
}

#[derive(Default)]
pub struct MemoryFriendshipStore {
    state: Mutex<StoreState>,
    unavailable: AtomicBool,
    conflict_next_insert: AtomicBool,
}

impl MemoryFriendshipStore {
    pub fn rows(&self) -> Vec<FriendshipEntity> {
        self.state.lock().unwrap().rows.clone()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Simulates losing the race against a concurrent insert for the same pair.
    pub fn fail_next_insert_with_conflict(&self) {
        self.conflict_next_insert.store(true, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), error::SystemError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(error::SystemError::store_unavailable("memory store offline"));
        }
        Ok(())
    }
}

fn in_pair(row: &FriendshipEntity, pair: &UserPair) -> bool {
    pair.contains(&row.requester_id) && pair.contains(&row.addressee_id)
}

fn involves(row: &FriendshipEntity, user_id: &Uuid) -> bool {
    row.requester_id == *user_id || row.addressee_id == *user_id
}

fn newest_first(mut rows: Vec<FriendshipEntity>) -> Vec<FriendshipEntity> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

#[async_trait::async_trait]
impl FriendshipStore for MemoryFriendshipStore {
    async fn insert_pending(
        &self,
        parties: &DirectedPair,
    ) -> Result<FriendshipEntity, error::SystemError> {
        self.check_available()?;
        if self.conflict_next_insert.swap(false, Ordering::SeqCst) {
            return Err(error::SystemError::Conflict(None));
        }

        let mut state = self.state.lock().unwrap();
        let pair = parties.pair();
        if state.rows.iter().any(|r| in_pair(r, &pair) && r.status.is_active()) {
            return Err(error::SystemError::Conflict(None));
        }

        let friendship = FriendshipEntity {
            id: Uuid::now_v7(),
            requester_id: parties.requester(),
            addressee_id: parties.addressee(),
            status: FriendshipStatus::Pending,
            created_at: state.clock.tick(),
        };
        state.rows.push(friendship.clone());
        Ok(friendship)
    }

    async fn find_active(
        &self,
        pair: &UserPair,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        self.check_available()?;
        let state = self.state.lock().unwrap();
        Ok(state.rows.iter().find(|r| in_pair(r, pair) && r.status.is_active()).cloned())
    }

    async fn update_pending_status(
        &self,
        friendship_id: &Uuid,
        addressee_id: &Uuid,
        status: FriendshipStatus,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();
        let row = state.rows.iter_mut().find(|r| {
            r.id == *friendship_id
                && r.addressee_id == *addressee_id
                && r.status == FriendshipStatus::Pending
        });

        Ok(row.map(|r| {
            r.status = status;
            r.clone()
        }))
    }

    async fn delete_accepted(&self, pair: &UserPair) -> Result<u64, error::SystemError> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();
        let before = state.rows.len();
        state.rows.retain(|r| !(in_pair(r, pair) && r.status == FriendshipStatus::Accepted));
        Ok((before - state.rows.len()) as u64)
    }

    async fn count_accepted(&self, user_id: &Uuid) -> Result<i64, error::SystemError> {
        self.check_available()?;
        let state = self.state.lock().unwrap();
        let count = state
            .rows
            .iter()
            .filter(|r| r.status == FriendshipStatus::Accepted && involves(r, user_id))
            .count();
        Ok(count as i64)
    }

    async fn list_pending_to(
        &self,
        addressee_id: &Uuid,
    ) -> Result<Vec<FriendshipEntity>, error::SystemError> {
        self.check_available()?;
        let state = self.state.lock().unwrap();
        let rows = state
            .rows
            .iter()
            .filter(|r| r.addressee_id == *addressee_id && r.status == FriendshipStatus::Pending)
            .cloned()
            .collect();
        Ok(newest_first(rows))
    }

    async fn list_accepted_for(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendshipEntity>, error::SystemError> {
        self.check_available()?;
        let state = self.state.lock().unwrap();
        let rows = state
            .rows
            .iter()
            .filter(|r| r.status == FriendshipStatus::Accepted && involves(r, user_id))
            .cloned()
            .collect();
        Ok(newest_first(rows))
    }

    async fn list_counterparts(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        self.check_available()?;
        let state = self.state.lock().unwrap();
        let mut ids: Vec<Uuid> =
            state.rows.iter().filter_map(|r| r.counterpart_of(user_id)).collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

#[derive(Default)]
struct DirectoryState {
    accounts: Vec<AccountEntity>,
    clock: Clock,
}

#[derive(Default)]
pub struct MemoryAccountDirectory {
    state: Mutex<DirectoryState>,
}

impl MemoryAccountDirectory {
    /// Registers an account; later calls produce more recent accounts.
    pub fn add(&self, username: &str) -> Uuid {
        let mut state = self.state.lock().unwrap();
        let id = Uuid::now_v7();
        let created_at = state.clock.tick();
        state.accounts.push(AccountEntity {
            id,
            username: Some(username.to_string()),
            display_name: Some(format!("{} display", username)),
            profile_picture_url: None,
            bio: None,
            created_at,
        });
        id
    }

    pub fn rename(&self, id: &Uuid, username: &str) {
        self.update(id, |a| a.username = Some(username.to_string()));
    }

    pub fn set_bio(&self, id: &Uuid, bio: &str) {
        self.update(id, |a| a.bio = Some(bio.to_string()));
    }

    fn update(&self, id: &Uuid, change: impl FnOnce(&mut AccountEntity)) {
        let mut state = self.state.lock().unwrap();
        let account = state.accounts.iter_mut().find(|a| a.id == *id).unwrap();
        change(account);
    }
}

fn matches_query(account: &AccountEntity, query: &str) -> bool {
    let query = query.to_lowercase();
    [&account.username, &account.display_name]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
}

#[async_trait::async_trait]
impl AccountDirectory for MemoryAccountDirectory {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AccountEntity>, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state.accounts.iter().find(|a| a.id == *id).cloned())
    }

    async fn find_id_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Uuid>, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state.accounts.iter().find(|a| a.username.as_deref() == Some(username)).map(|a| a.id))
    }

    async fn find_many_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<AccountEntity>, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state.accounts.iter().filter(|a| ids.contains(&a.id)).cloned().collect())
    }

    async fn search(
        &self,
        query: &str,
        exclude_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<AccountEntity>, error::SystemError> {
        let state = self.state.lock().unwrap();
        let mut found: Vec<AccountEntity> = state
            .accounts
            .iter()
            .filter(|a| a.id != *exclude_id && matches_query(a, query))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.username.cmp(&b.username));
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn list_recent(
        &self,
        exclude_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<AccountEntity>, error::SystemError> {
        let state = self.state.lock().unwrap();
        let mut recent: Vec<AccountEntity> =
            state.accounts.iter().filter(|a| a.id != *exclude_id).cloned().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit as usize);
        Ok(recent)
    }
}

/// Cache without expiry; entries live as long as the test.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    unavailable: AtomicBool,
}

impl MemoryCache {
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), error::SystemError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(error::SystemError::store_unavailable("memory cache offline"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CacheStore for MemoryCache {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, error::SystemError> {
        self.check_available()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        _expiration: u64,
    ) -> Result<(), error::SystemError> {
        self.check_available()?;
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}
