use uuid::Uuid;

use crate::{
    api::error,
    modules::friendship::{
        pair::{DirectedPair, UserPair},
        repository::FriendshipStore,
        schema::{FriendshipEntity, FriendshipStatus},
    },
};

#[derive(Clone)]
pub struct FriendshipRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendshipRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendshipStore for FriendshipRepositoryPg {
    async fn insert_pending(
        &self,
        parties: &DirectedPair,
    ) -> Result<FriendshipEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));

        let friendship = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            INSERT INTO friendships (id, requester_id, addressee_id, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING id, requester_id, addressee_id, status, created_at
            "#,
        )
        .bind(id)
        .bind(parties.requester())
        .bind(parties.addressee())
        .fetch_one(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn find_active(
        &self,
        pair: &UserPair,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let friendship = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            SELECT id, requester_id, addressee_id, status, created_at
            FROM friendships
            WHERE LEAST(requester_id, addressee_id) = $1
              AND GREATEST(requester_id, addressee_id) = $2
              AND status IN ('pending', 'accepted')
            LIMIT 1
            "#,
        )
        .bind(pair.low())
        .bind(pair.high())
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn update_pending_status(
        &self,
        friendship_id: &Uuid,
        addressee_id: &Uuid,
        status: FriendshipStatus,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let friendship = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            UPDATE friendships
            SET status = $3
            WHERE id = $1
              AND addressee_id = $2
              AND status = 'pending'
            RETURNING id, requester_id, addressee_id, status, created_at
            "#,
        )
        .bind(friendship_id)
        .bind(addressee_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn delete_accepted(&self, pair: &UserPair) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            r#"
            DELETE FROM friendships
            WHERE LEAST(requester_id, addressee_id) = $1
              AND GREATEST(requester_id, addressee_id) = $2
              AND status = 'accepted'
            "#,
        )
        .bind(pair.low())
        .bind(pair.high())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }

    async fn count_accepted(&self, user_id: &Uuid) -> Result<i64, error::SystemError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM friendships
            WHERE status = 'accepted'
              AND (requester_id = $1 OR addressee_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn list_pending_to(
        &self,
        addressee_id: &Uuid,
    ) -> Result<Vec<FriendshipEntity>, error::SystemError> {
        let requests = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            SELECT id, requester_id, addressee_id, status, created_at
            FROM friendships
            WHERE addressee_id = $1
              AND status = 'pending'
            ORDER BY created_at DESC
            "#,
        )
        .bind(addressee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn list_accepted_for(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendshipEntity>, error::SystemError> {
        let friendships = sqlx::query_as::<_, FriendshipEntity>(
            r#"
            SELECT id, requester_id, addressee_id, status, created_at
            FROM friendships
            WHERE status = 'accepted'
              AND (requester_id = $1 OR addressee_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(friendships)
    }

    async fn list_counterparts(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT
                CASE
                    WHEN requester_id = $1 THEN addressee_id
                    ELSE requester_id
                END
            FROM friendships
            WHERE requester_id = $1
               OR addressee_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
