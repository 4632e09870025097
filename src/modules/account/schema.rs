use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Row of the externally owned `profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountEntity {
    pub id: Uuid,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
