use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

use crate::modules::friendship::pair::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "friendship_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FriendshipStatus {
    /// Pending and accepted rows block a new request for the same pair.
    pub fn is_active(self) -> bool {
        matches!(self, FriendshipStatus::Pending | FriendshipStatus::Accepted)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipEntity {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub addressee_id: Uuid,
    pub status: FriendshipStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FriendshipEntity {
    pub fn role_of(&self, user_id: &Uuid) -> Option<Role> {
        if self.requester_id == *user_id {
            Some(Role::Requester)
        } else if self.addressee_id == *user_id {
            Some(Role::Addressee)
        } else {
            None
        }
    }

    pub fn counterpart_of(&self, user_id: &Uuid) -> Option<Uuid> {
        match self.role_of(user_id)? {
            Role::Requester => Some(self.addressee_id),
            Role::Addressee => Some(self.requester_id),
        }
    }
}
