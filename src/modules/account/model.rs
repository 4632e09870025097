use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{constants::UNKNOWN_USERNAME, modules::account::schema::AccountEntity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: Uuid,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub profile_picture_url: Option<String>,
}

impl AccountSummary {
    /// Placeholder for an account the directory no longer returns.
    pub fn unknown(id: Uuid) -> Self {
        AccountSummary {
            id,
            username: Some(UNKNOWN_USERNAME.to_string()),
            display_name: None,
            profile_picture_url: None,
        }
    }
}

impl From<AccountEntity> for AccountSummary {
    fn from(account: AccountEntity) -> Self {
        AccountSummary {
            id: account.id,
            username: account.username,
            display_name: account.display_name,
            profile_picture_url: account.profile_picture_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<AccountEntity> for AccountResponse {
    fn from(entity: AccountEntity) -> Self {
        AccountResponse {
            id: entity.id,
            username: entity.username,
            display_name: entity.display_name,
            profile_picture_url: entity.profile_picture_url,
            bio: entity.bio,
            created_at: entity.created_at,
        }
    }
}
