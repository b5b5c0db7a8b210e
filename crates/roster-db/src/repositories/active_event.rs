//! PostgreSQL implementation of ActiveEventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use roster_core::traits::{ActiveEventRepository, RepoResult};
use roster_core::{ActiveEvent, ChannelId};

use crate::mappers::ActiveEventInsert;
use crate::models::ActiveEventModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ActiveEventRepository
#[derive(Clone)]
pub struct PgActiveEventRepository {
    pool: PgPool,
}

impl PgActiveEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActiveEventRepository for PgActiveEventRepository {
    #[instrument(skip(self))]
    async fn find_by_channel(&self, channel_id: &ChannelId) -> RepoResult<Option<ActiveEvent>> {
        let result = sqlx::query_as::<_, ActiveEventModel>(
            r#"
            SELECT channel_id, message_id, started_by, attendees, started_at
            FROM active_events
            WHERE channel_id = $1
            "#,
        )
        .bind(channel_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ActiveEvent::from))
    }

    #[instrument(skip(self, event), fields(channel_id = %event.channel_id))]
    async fn upsert(&self, event: &ActiveEvent) -> RepoResult<()> {
        let insert = ActiveEventInsert::new(event);

        sqlx::query(
            r#"
            INSERT INTO active_events (channel_id, message_id, started_by, attendees, started_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (channel_id) DO UPDATE SET
                message_id = EXCLUDED.message_id,
                attendees = EXCLUDED.attendees
            "#,
        )
        .bind(insert.channel_id)
        .bind(insert.message_id)
        .bind(insert.started_by)
        .bind(insert.attendees)
        .bind(event.started_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, channel_id: &ChannelId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM active_events WHERE channel_id = $1")
            .bind(channel_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
