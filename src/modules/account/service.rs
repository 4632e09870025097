use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::configs::CacheStore;
use crate::modules::account::model::{AccountResponse, AccountSummary};
use crate::modules::account::repository::AccountDirectory;

#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn AccountDirectory + Send + Sync>,
    cache: Option<Arc<dyn CacheStore + Send + Sync>>,
    cache_ttl: u64,
}

fn cache_key(id: &Uuid) -> String {
    format!("account:id:{}", id)
}

impl AccountService {
    pub fn with_dependencies(
        repo: Arc<dyn AccountDirectory + Send + Sync>,
        cache: Option<Arc<dyn CacheStore + Send + Sync>>,
        cache_ttl: u64,
    ) -> Self {
        info!("AccountService initialized (cache enabled: {})", cache.is_some());
        AccountService { repo, cache, cache_ttl }
    }

    async fn cached(&self, id: &Uuid) -> Option<AccountResponse> {
        let cache = self.cache.as_ref()?;
        match cache.get_bytes(&cache_key(id)).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(account) => Some(account),
                Err(e) => {
                    warn!("Discarding unreadable cache entry for account {}: {}", id, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Account cache read failed for {}: {}", id, e);
                None
            }
        }
    }

    async fn store_cached(&self, account: &AccountResponse) {
        let Some(cache) = &self.cache else {
            return;
        };

        let result = match serde_json::to_vec(account) {
            Ok(bytes) => cache.set_bytes(&cache_key(&account.id), bytes, self.cache_ttl).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            warn!("Account cache write failed for {}: {}", account.id, e);
        }
    }

    pub async fn get_by_id(&self, id: &Uuid) -> Result<AccountResponse, error::SystemError> {
        if let Some(account) = self.cached(id).await {
            info!("Account {} found in cache", id);
            return Ok(account);
        }

        let account = self
            .repo
            .find_by_id(id)
            .await?
            .map(AccountResponse::from)
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        self.store_cached(&account).await;
        Ok(account)
    }

    /// The username is resolved against the directory on every call; only the
    /// account behind the id is served from cache.
    pub async fn get_by_username(&self, username: &str) -> Result<AccountResponse, error::SystemError> {
        let id = self
            .repo
            .find_id_by_username(username)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        self.get_by_id(&id).await
    }

    pub async fn search(
        &self,
        viewer_id: Uuid,
        query: &str,
        limit: i64,
    ) -> Result<Vec<AccountSummary>, error::SystemError> {
        let accounts = self.repo.search(query.trim(), &viewer_id, limit).await?;
        Ok(accounts.into_iter().map(AccountSummary::from).collect())
    }

    pub async fn list_recent(
        &self,
        viewer_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AccountSummary>, error::SystemError> {
        let accounts = self.repo.list_recent(&viewer_id, limit).await?;
        Ok(accounts.into_iter().map(AccountSummary::from).collect())
    }
}
