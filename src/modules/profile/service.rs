use futures_util::future::try_join_all;
use uuid::Uuid;

use crate::{
    api::error,
    constants::{SEARCH_DEFAULT_LIMIT, SUGGESTION_LIMIT, SUGGESTION_POOL_SIZE},
    modules::{
        account::{model::AccountSummary, repository::AccountDirectory, service::AccountService},
        friendship::{
            model::FriendshipView, repository::FriendshipStore, service::RelationshipManager,
        },
        profile::model::{ProfileView, UserCard},
    },
};

/// Read models for the profile, search and suggestion pages.
pub struct ProfileService<R, A>
where
    R: FriendshipStore + Send + Sync,
    A: AccountDirectory + Send + Sync,
{
    accounts: AccountService,
    relationships: RelationshipManager<R, A>,
}

impl<R, A> Clone for ProfileService<R, A>
where
    R: FriendshipStore + Send + Sync,
    A: AccountDirectory + Send + Sync,
{
    fn clone(&self) -> Self {
        ProfileService { accounts: self.accounts.clone(), relationships: self.relationships.clone() }
    }
}

impl<R, A> ProfileService<R, A>
where
    R: FriendshipStore + Send + Sync,
    A: AccountDirectory + Send + Sync,
{
    pub fn with_dependencies(
        accounts: AccountService,
        relationships: RelationshipManager<R, A>,
    ) -> Self {
        ProfileService { accounts, relationships }
    }

    pub async fn profile(
        &self,
        viewer_id: Uuid,
        username: &str,
    ) -> Result<ProfileView, error::SystemError> {
        let profile = self.accounts.get_by_username(username).await?;

        let (friendship, friend_count) = tokio::try_join!(
            self.relationships.get_status(viewer_id, profile.id),
            self.relationships.count_friends(profile.id),
        )?;

        let is_own_profile = profile.id == viewer_id;
        Ok(ProfileView { profile, friendship, friend_count, is_own_profile })
    }

    pub async fn search(
        &self,
        viewer_id: Uuid,
        query: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<UserCard>, error::SystemError> {
        let query = query.map(str::trim).unwrap_or_default();
        if query.is_empty() {
            return self.suggestions(viewer_id).await;
        }

        let accounts = self
            .accounts
            .search(viewer_id, query, limit.unwrap_or(SEARCH_DEFAULT_LIMIT))
            .await?;
        self.with_status(viewer_id, accounts).await
    }

    /// Recent accounts the viewer has no relationship row with at all.
    pub async fn suggestions(&self, viewer_id: Uuid) -> Result<Vec<UserCard>, error::SystemError> {
        let (related, recent) = tokio::try_join!(
            self.relationships.related_user_ids(viewer_id),
            self.accounts.list_recent(viewer_id, SUGGESTION_POOL_SIZE),
        )?;

        Ok(recent
            .into_iter()
            .filter(|account| !related.contains(&account.id))
            .take(SUGGESTION_LIMIT)
            .map(|account| UserCard::new(account, FriendshipView::none()))
            .collect())
    }

    async fn with_status(
        &self,
        viewer_id: Uuid,
        accounts: Vec<AccountSummary>,
    ) -> Result<Vec<UserCard>, error::SystemError> {
        let views =
            try_join_all(accounts.iter().map(|a| self.relationships.get_status(viewer_id, a.id)))
                .await?;

        Ok(accounts
            .into_iter()
            .zip(views)
            .map(|(account, view)| UserCard::new(account, view))
            .collect())
    }
}
