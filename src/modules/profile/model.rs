use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::{
    account::model::{AccountResponse, AccountSummary},
    friendship::model::{FriendshipView, RelationStatus},
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub profile: AccountResponse,
    pub friendship: FriendshipView,
    pub friend_count: i64,
    pub is_own_profile: bool,
}

/// Search result row: an account plus how the viewer relates to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCard {
    #[serde(flatten)]
    pub account: AccountSummary,
    pub friendship_status: RelationStatus,
    pub is_requester: bool,
}

impl UserCard {
    pub fn new(account: AccountSummary, view: FriendshipView) -> Self {
        UserCard { account, friendship_status: view.status, is_requester: view.is_requester }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(max = 100, message = "Search query is too long"))]
    pub q: Option<String>,
    #[validate(range(min = 1, max = 50, message = "Limit must be between 1 and 50"))]
    pub limit: Option<i64>,
}
