//! PostgreSQL implementation of AttendanceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use roster_core::traits::{AttendanceFilter, AttendanceRepository, RepoResult};
use roster_core::{AttendanceId, AttendanceRecord, MemberId};

use crate::mappers::AttendanceInsert;
use crate::models::AttendanceModel;

use super::error::{map_db_error, to_count, to_limit};

/// PostgreSQL implementation of AttendanceRepository
#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn member_filter(filter: &AttendanceFilter) -> Option<&str> {
    filter.member_id.as_ref().map(MemberId::as_str)
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &AttendanceId) -> RepoResult<Option<AttendanceRecord>> {
        let result = sqlx::query_as::<_, AttendanceModel>(
            r#"
            SELECT id, name, submitted_by, members, issues, recorded,
                   channel_id, message_id, date_created, date_updated
            FROM attendance
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AttendanceRecord::from))
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &AttendanceFilter,
        limit: usize,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        let results = sqlx::query_as::<_, AttendanceModel>(
            r#"
            SELECT id, name, submitted_by, members, issues, recorded,
                   channel_id, message_id, date_created, date_updated
            FROM attendance
            WHERE ($1::BOOLEAN IS NULL OR recorded = $1)
              AND ($2::TEXT IS NULL OR $2 = ANY(members))
            ORDER BY date_created DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(filter.recorded)
        .bind(member_filter(filter))
        .bind(to_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        debug!(count = results.len(), "Listed attendance rows");
        Ok(results.into_iter().map(AttendanceRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &AttendanceFilter) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM attendance
            WHERE ($1::BOOLEAN IS NULL OR recorded = $1)
              AND ($2::TEXT IS NULL OR $2 = ANY(members))
            "#,
        )
        .bind(filter.recorded)
        .bind(member_filter(filter))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(to_count(count))
    }

    #[instrument(skip(self, record), fields(attendance_id = %record.id))]
    async fn upsert(&self, record: &AttendanceRecord) -> RepoResult<()> {
        let insert = AttendanceInsert::new(record);

        sqlx::query(
            r#"
            INSERT INTO attendance (id, name, submitted_by, members, issues, recorded,
                                    channel_id, message_id, date_created, date_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                submitted_by = EXCLUDED.submitted_by,
                members = EXCLUDED.members,
                issues = EXCLUDED.issues,
                recorded = EXCLUDED.recorded,
                channel_id = EXCLUDED.channel_id,
                message_id = EXCLUDED.message_id,
                date_updated = EXCLUDED.date_updated
            "#,
        )
        .bind(insert.id)
        .bind(insert.name)
        .bind(insert.submitted_by)
        .bind(&insert.members)
        .bind(insert.issues)
        .bind(insert.recorded)
        .bind(insert.channel_id)
        .bind(insert.message_id)
        .bind(record.date_created)
        .bind(record.date_updated)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &AttendanceId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
