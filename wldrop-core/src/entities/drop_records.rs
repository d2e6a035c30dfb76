use crate::drops::Participant;
use crate::entities::DropKind;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use sqlx::types::Json;

/// One row of the `drops` table.
///
/// The row is inserted once the announcement exists and is either deleted
/// (cancel, orphan) or flipped to `completed` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DropRecord {
    pub id: String,
    pub kind: DropKind,
    pub winner_count: i32,
    pub max_entries: i32,
    pub project_name: String,
    pub description: Option<String>,
    pub discord_url: Option<String>,
    pub image_url: Option<String>,
    pub emoji: String,
    pub require_gate: bool,
    pub creator_id: String,
    pub channel_id: String,
    pub guild_id: String,
    pub started_at: time::OffsetDateTime,
    pub deadline: time::OffsetDateTime,
    pub completed: bool,
    pub winners: Json<Vec<Participant>>,
    pub entries: Json<Vec<Participant>>,
}

#[derive(Debug, Clone)]
/// Insert a freshly announced drop.
pub struct InsertDropRecord {
    pub record: DropRecord,
}

impl Processor<InsertDropRecord> for DatabaseProcessor {
    type Output = ();
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertDropRecord")]
    async fn process(&self, query: InsertDropRecord) -> Result<(), sqlx::Error> {
        let r = query.record;
        sqlx::query(
            r#"
            INSERT INTO drops (
                id, kind, winner_count, max_entries, project_name, description,
                discord_url, image_url, emoji, require_gate, creator_id, channel_id,
                guild_id, started_at, deadline, completed, winners, entries
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(r.id)
        .bind(r.kind)
        .bind(r.winner_count)
        .bind(r.max_entries)
        .bind(r.project_name)
        .bind(r.description)
        .bind(r.discord_url)
        .bind(r.image_url)
        .bind(r.emoji)
        .bind(r.require_gate)
        .bind(r.creator_id)
        .bind(r.channel_id)
        .bind(r.guild_id)
        .bind(r.started_at)
        .bind(r.deadline)
        .bind(r.completed)
        .bind(r.winners)
        .bind(r.entries)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Delete a drop that was cancelled or found orphaned.
pub struct DeleteDropRecord {
    pub id: String,
}

impl Processor<DeleteDropRecord> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:DeleteDropRecord")]
    async fn process(&self, query: DeleteDropRecord) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM drops
            WHERE id = $1
            "#,
        )
        .bind(query.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, Clone)]
/// Record the final winner and entry lists.
///
/// Only flips rows that are still incomplete, so a repeated write is a no-op.
pub struct CompleteDropRecord {
    pub id: String,
    pub winners: Vec<Participant>,
    pub entries: Vec<Participant>,
}

impl Processor<CompleteDropRecord> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CompleteDropRecord")]
    async fn process(&self, query: CompleteDropRecord) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE drops
            SET completed = true, winners = $2, entries = $3
            WHERE id = $1 AND completed = false
            "#,
        )
        .bind(query.id)
        .bind(Json(query.winners))
        .bind(Json(query.entries))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, Clone, Copy)]
/// Every drop that has not completed yet, oldest first.
pub struct ListIncompleteDrops;

impl Processor<ListIncompleteDrops> for DatabaseProcessor {
    type Output = Vec<DropRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListIncompleteDrops")]
    async fn process(&self, _query: ListIncompleteDrops) -> Result<Vec<DropRecord>, sqlx::Error> {
        sqlx::query_as::<_, DropRecord>(
            r#"
            SELECT
                id, kind, winner_count, max_entries, project_name, description,
                discord_url, image_url, emoji, require_gate, creator_id, channel_id,
                guild_id, started_at, deadline, completed, winners, entries
            FROM drops
            WHERE completed = false
            ORDER BY started_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
pub struct GetDropRecord {
    pub id: String,
}

impl Processor<GetDropRecord> for DatabaseProcessor {
    type Output = Option<DropRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetDropRecord")]
    async fn process(&self, query: GetDropRecord) -> Result<Option<DropRecord>, sqlx::Error> {
        sqlx::query_as::<_, DropRecord>(
            r#"
            SELECT
                id, kind, winner_count, max_entries, project_name, description,
                discord_url, image_url, emoji, require_gate, creator_id, channel_id,
                guild_id, started_at, deadline, completed, winners, entries
            FROM drops
            WHERE id = $1
            "#,
        )
        .bind(query.id)
        .fetch_optional(&self.pool)
        .await
    }
}
