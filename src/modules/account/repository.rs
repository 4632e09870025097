use uuid::Uuid;

use crate::{api::error, modules::account::schema::AccountEntity};

/// Read-only view of the account directory owned by the auth provider.
#[async_trait::async_trait]
pub trait AccountDirectory {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AccountEntity>, error::SystemError>;

    /// Usernames can change, so callers resolve them to ids on every lookup.
    async fn find_id_by_username(&self, username: &str) -> Result<Option<Uuid>, error::SystemError>;

    /// Unknown ids are skipped, order is unspecified.
    async fn find_many_by_ids(&self, ids: &[Uuid])
    -> Result<Vec<AccountEntity>, error::SystemError>;

    /// Search accounts by username or display name (case-insensitive, partial match)
    async fn search(
        &self,
        query: &str,
        exclude_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<AccountEntity>, error::SystemError>;

    async fn list_recent(
        &self,
        exclude_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<AccountEntity>, error::SystemError>;
}
