use uuid::Uuid;

use crate::api::error;
use crate::modules::friendship::pair::{DirectedPair, UserPair};
use crate::modules::friendship::schema::{FriendshipEntity, FriendshipStatus};

/// Persistent store of friendship rows.
///
/// Every method is a single read or write; none of them retry.
#[async_trait::async_trait]
pub trait FriendshipStore {
    /// Inserts a pending row. Fails with `Conflict` when the pair already
    /// has a pending or accepted row.
    async fn insert_pending(
        &self,
        parties: &DirectedPair,
    ) -> Result<FriendshipEntity, error::SystemError>;

    async fn find_active(
        &self,
        pair: &UserPair,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// Sets `status` only if the row is still pending and addressed to
    /// `addressee_id`; returns `None` otherwise.
    async fn update_pending_status(
        &self,
        friendship_id: &Uuid,
        addressee_id: &Uuid,
        status: FriendshipStatus,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// Returns the number of rows removed.
    async fn delete_accepted(&self, pair: &UserPair) -> Result<u64, error::SystemError>;

    async fn count_accepted(&self, user_id: &Uuid) -> Result<i64, error::SystemError>;

    /// Newest first.
    async fn list_pending_to(
        &self,
        addressee_id: &Uuid,
    ) -> Result<Vec<FriendshipEntity>, error::SystemError>;

    /// Newest first.
    async fn list_accepted_for(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendshipEntity>, error::SystemError>;

    /// Everyone sharing a row of any status with `user_id`.
    async fn list_counterparts(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError>;
}
