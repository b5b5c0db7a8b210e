//! PostgreSQL implementation of MemberDirectory

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use roster_core::traits::{MemberDirectory, RepoResult};
use roster_core::{Member, MemberId};

use crate::mappers::MemberInsert;
use crate::models::MemberModel;

use super::error::{map_db_error, to_limit};

/// Member directory backed by the members table
///
/// Eligibility uses the built-in rules on [`Member`].
#[derive(Clone)]
pub struct PgMemberDirectory {
    pool: PgPool,
}

impl PgMemberDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberDirectory for PgMemberDirectory {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &MemberId) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, name, rank, is_bot, rsi_member, bad_affiliation, validated, updated_at
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: usize) -> RepoResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, name, rank, is_bot, rsi_member, bad_affiliation, validated, updated_at
            FROM members
            ORDER BY name, id
            LIMIT $1
            "#,
        )
        .bind(to_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn upsert(&self, member: &Member) -> RepoResult<()> {
        let insert = MemberInsert::new(member);

        sqlx::query(
            r#"
            INSERT INTO members (id, name, rank, is_bot, rsi_member, bad_affiliation, validated, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                rank = EXCLUDED.rank,
                is_bot = EXCLUDED.is_bot,
                rsi_member = EXCLUDED.rsi_member,
                bad_affiliation = EXCLUDED.bad_affiliation,
                validated = EXCLUDED.validated,
                updated_at = NOW()
            "#,
        )
        .bind(insert.id)
        .bind(insert.name)
        .bind(insert.rank)
        .bind(insert.is_bot)
        .bind(insert.rsi_member)
        .bind(insert.bad_affiliation)
        .bind(insert.validated)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &MemberId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
