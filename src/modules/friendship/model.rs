use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::{
    account::model::AccountSummary,
    friendship::{
        pair::Role,
        schema::{FriendshipEntity, FriendshipStatus},
    },
};

/// Status of a relationship as seen by one of its parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationStatus {
    None,
    /// The viewer owes a response.
    Pending,
    /// The viewer is waiting on the other party.
    PendingSent,
    Accepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipView {
    pub status: RelationStatus,
    pub is_requester: bool,
}

impl FriendshipView {
    pub fn none() -> Self {
        FriendshipView { status: RelationStatus::None, is_requester: false }
    }

    /// Projects a stored row onto `viewer_id`. Rejected rows and rows the
    /// viewer is not part of read as `none`.
    pub fn for_viewer(friendship: Option<&FriendshipEntity>, viewer_id: &Uuid) -> Self {
        let Some(friendship) = friendship else {
            return Self::none();
        };
        let Some(role) = friendship.role_of(viewer_id) else {
            return Self::none();
        };
        let is_requester = role == Role::Requester;

        let status = match (friendship.status, role) {
            (FriendshipStatus::Accepted, _) => RelationStatus::Accepted,
            (FriendshipStatus::Pending, Role::Requester) => RelationStatus::PendingSent,
            (FriendshipStatus::Pending, Role::Addressee) => RelationStatus::Pending,
            (FriendshipStatus::Rejected, _) => return Self::none(),
        };

        FriendshipView { status, is_requester }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Decline,
}

impl Decision {
    pub fn target_status(self) -> FriendshipStatus {
        match self {
            Decision::Accept => FriendshipStatus::Accepted,
            Decision::Decline => FriendshipStatus::Rejected,
        }
    }
}

/// Incoming request joined with the requester's profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequest {
    #[serde(flatten)]
    pub friendship: FriendshipEntity,
    pub requester: AccountSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestBody {
    pub addressee_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendCountResponse {
    pub count: i64,
}
