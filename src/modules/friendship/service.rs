use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        account::{model::AccountSummary, repository::AccountDirectory},
        friendship::{
            model::{Decision, FriendshipView, PendingRequest},
            pair::{DirectedPair, UserPair},
            repository::FriendshipStore,
            schema::{FriendshipEntity, FriendshipStatus},
        },
    },
};

/// Owns the friendship state machine.
///
/// The acting user is always an explicit argument; the manager never reads
/// session state itself.
pub struct RelationshipManager<R, A>
where
    R: FriendshipStore + Send + Sync,
    A: AccountDirectory + Send + Sync,
{
    store: Arc<R>,
    accounts: Arc<A>,
}

impl<R, A> Clone for RelationshipManager<R, A>
where
    R: FriendshipStore + Send + Sync,
    A: AccountDirectory + Send + Sync,
{
    fn clone(&self) -> Self {
        RelationshipManager { store: self.store.clone(), accounts: self.accounts.clone() }
    }
}

impl<R, A> RelationshipManager<R, A>
where
    R: FriendshipStore + Send + Sync,
    A: AccountDirectory + Send + Sync,
{
    pub fn with_dependencies(store: Arc<R>, accounts: Arc<A>) -> Self {
        RelationshipManager { store, accounts }
    }

    pub async fn send_request(
        &self,
        requester_id: Uuid,
        addressee_id: Uuid,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let parties = DirectedPair::new(requester_id, addressee_id)?;

        if let Some(existing) = self.store.find_active(&parties.pair()).await? {
            return Err(match existing.status {
                FriendshipStatus::Accepted => {
                    error::SystemError::duplicate_relationship("Users are already friends")
                }
                _ => error::SystemError::duplicate_relationship("Friend request already exists"),
            });
        }

        // A concurrent request for the same pair can still slip past the check
        // above; the store's unique index turns it into a conflict.
        let friendship = self.store.insert_pending(&parties).await.map_err(|e| match e {
            error::SystemError::Conflict(_) => {
                error::SystemError::duplicate_relationship("Friend request already exists")
            }
            other => other,
        })?;

        info!("Friend request {} sent from {} to {}", friendship.id, requester_id, addressee_id);
        Ok(friendship)
    }

    pub async fn respond_to_request(
        &self,
        friendship_id: Uuid,
        responder_id: Uuid,
        decision: Decision,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let friendship = self
            .store
            .update_pending_status(&friendship_id, &responder_id, decision.target_status())
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

        info!("Friend request {} answered with {:?} by {}", friendship_id, decision, responder_id);
        Ok(friendship)
    }

    pub async fn unfriend(&self, user_id: Uuid, other_user_id: Uuid) -> Result<(), error::SystemError> {
        let Ok(pair) = UserPair::new(user_id, other_user_id) else {
            return Err(error::SystemError::not_found("Friendship not found"));
        };

        let removed = self.store.delete_accepted(&pair).await?;
        if removed == 0 {
            return Err(error::SystemError::not_found("Friendship not found"));
        }

        info!("{} unfriended {}", user_id, other_user_id);
        Ok(())
    }

    pub async fn get_status(
        &self,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<FriendshipView, error::SystemError> {
        let Ok(pair) = UserPair::new(user_id, other_user_id) else {
            return Ok(FriendshipView::none());
        };

        let friendship = self.store.find_active(&pair).await?;
        Ok(FriendshipView::for_viewer(friendship.as_ref(), &user_id))
    }

    pub async fn count_friends(&self, user_id: Uuid) -> Result<i64, error::SystemError> {
        self.store.count_accepted(&user_id).await
    }

    pub async fn list_pending_incoming(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PendingRequest>, error::SystemError> {
        let requests = self.store.list_pending_to(&user_id).await?;
        let requester_ids: Vec<Uuid> = requests.iter().map(|r| r.requester_id).collect();
        let summaries = self.resolve_summaries(&requester_ids).await?;

        Ok(requests
            .into_iter()
            .map(|friendship| {
                let requester = summaries
                    .get(&friendship.requester_id)
                    .cloned()
                    .unwrap_or_else(|| AccountSummary::unknown(friendship.requester_id));
                PendingRequest { friendship, requester }
            })
            .collect())
    }

    pub async fn list_friends(&self, user_id: Uuid) -> Result<Vec<AccountSummary>, error::SystemError> {
        let friendships = self.store.list_accepted_for(&user_id).await?;
        let friend_ids: Vec<Uuid> =
            friendships.iter().filter_map(|f| f.counterpart_of(&user_id)).collect();
        let mut summaries = self.resolve_summaries(&friend_ids).await?;

        Ok(friend_ids
            .into_iter()
            .map(|id| summaries.remove(&id).unwrap_or_else(|| AccountSummary::unknown(id)))
            .collect())
    }

    pub async fn related_user_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>, error::SystemError> {
        let ids = self.store.list_counterparts(&user_id).await?;
        Ok(ids.into_iter().collect())
    }

    async fn resolve_summaries(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, AccountSummary>, error::SystemError> {
        let accounts = self.accounts.find_many_by_ids(ids).await?;
        Ok(accounts.into_iter().map(|a| (a.id, AccountSummary::from(a))).collect())
    }
}
