use uuid::Uuid;

use crate::{
    api::error,
    modules::account::{repository::AccountDirectory, schema::AccountEntity},
};

/// `%query%` for ILIKE. The query's own `%`, `_` and `\` are escaped with
/// Postgres' default `\` escape character.
fn contains_pattern(query: &str) -> String {
    let escaped = query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{}%", escaped)
}

#[derive(Clone)]
pub struct AccountRepositoryPg {
    pool: sqlx::PgPool,
}

impl AccountRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountDirectory for AccountRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AccountEntity>, error::SystemError> {
        let account = sqlx::query_as::<_, AccountEntity>(
            r#"
            SELECT id, username, display_name, profile_picture_url, bio, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn find_id_by_username(&self, username: &str) -> Result<Option<Uuid>, error::SystemError> {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM profiles WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    async fn find_many_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<AccountEntity>, error::SystemError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let accounts = sqlx::query_as::<_, AccountEntity>(
            r#"
            SELECT id, username, display_name, profile_picture_url, bio, created_at
            FROM profiles
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    async fn search(
        &self,
        query: &str,
        exclude_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<AccountEntity>, error::SystemError> {
        let search_pattern = contains_pattern(query);
        let accounts = sqlx::query_as::<_, AccountEntity>(
            r#"
            SELECT id, username, display_name, profile_picture_url, bio, created_at
            FROM profiles
            WHERE id <> $2
            AND (
                username ILIKE $1
                OR display_name ILIKE $1
            )
            ORDER BY username
            LIMIT $3
            "#,
        )
        .bind(&search_pattern)
        .bind(exclude_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    async fn list_recent(
        &self,
        exclude_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<AccountEntity>, error::SystemError> {
        let accounts = sqlx::query_as::<_, AccountEntity>(
            r#"
            SELECT id, username, display_name, profile_picture_url, bio, created_at
            FROM profiles
            WHERE id <> $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(exclude_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }
}
