//! Postgres-backed store and eligibility gate.

use async_trait::async_trait;
use kanau::processor::Processor;
use sqlx::types::Json;

use super::{DropStore, EligibilityGate, StoreError, StoredDrop};
use crate::drops::{
    ChannelId, DropConfig, DropDetails, DropId, DropSettings, GuildId, Participant, UserId,
};
use crate::entities::drop_records::{
    CompleteDropRecord, DeleteDropRecord, DropRecord, GetDropRecord, InsertDropRecord,
    ListIncompleteDrops,
};
use crate::entities::member_wallets::{
    GetMemberWallet, GetMemberWallets, MemberWallet, UpsertMemberWallet,
};
use crate::framework::DatabaseProcessor;

#[derive(Debug, Clone)]
pub struct PgDropStore {
    db: DatabaseProcessor,
}

impl PgDropStore {
    pub fn new(db: DatabaseProcessor) -> Self {
        Self { db }
    }
}

fn to_record(settings: &DropSettings) -> DropRecord {
    let c = &settings.config;
    DropRecord {
        id: settings.id.to_string(),
        kind: c.kind,
        winner_count: i32::try_from(c.winner_count).unwrap_or(i32::MAX),
        max_entries: i32::try_from(c.max_entries).unwrap_or(i32::MAX),
        project_name: c.details.project_name.clone(),
        description: c.details.description.clone(),
        discord_url: c.details.discord_url.clone(),
        image_url: c.details.image_url.clone(),
        emoji: c.details.emoji.clone(),
        require_gate: c.require_gate,
        creator_id: c.creator_id.to_string(),
        channel_id: c.channel_id.to_string(),
        guild_id: c.guild_id.to_string(),
        started_at: c.started_at,
        deadline: c.deadline,
        completed: false,
        winners: Json(Vec::new()),
        entries: Json(Vec::new()),
    }
}

fn from_record(record: DropRecord) -> Result<StoredDrop, StoreError> {
    let invalid = |reason: &str| StoreError::InvalidRecord {
        id: record.id.clone(),
        reason: reason.to_string(),
    };
    let winner_count =
        u32::try_from(record.winner_count).map_err(|_| invalid("negative winner_count"))?;
    let max_entries =
        u32::try_from(record.max_entries).map_err(|_| invalid("negative max_entries"))?;

    let settings = DropSettings {
        id: DropId::from(record.id),
        config: DropConfig {
            kind: record.kind,
            winner_count,
            max_entries,
            require_gate: record.require_gate,
            creator_id: UserId::from(record.creator_id),
            channel_id: ChannelId::from(record.channel_id),
            guild_id: GuildId::from(record.guild_id),
            details: DropDetails {
                project_name: record.project_name,
                description: record.description,
                discord_url: record.discord_url,
                image_url: record.image_url,
                emoji: record.emoji,
            },
            started_at: record.started_at,
            deadline: record.deadline,
        },
    };
    Ok(StoredDrop {
        settings,
        completed: record.completed,
        winners: record.winners.0,
        entries: record.entries.0,
    })
}

#[async_trait]
impl DropStore for PgDropStore {
    async fn save(&self, settings: &DropSettings) -> Result<(), StoreError> {
        self.db
            .process(InsertDropRecord {
                record: to_record(settings),
            })
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &DropId) -> Result<(), StoreError> {
        self.db
            .process(DeleteDropRecord { id: id.to_string() })
            .await?;
        Ok(())
    }

    async fn mark_completed(
        &self,
        id: &DropId,
        winners: &[Participant],
        entries: &[Participant],
    ) -> Result<(), StoreError> {
        let updated = self
            .db
            .process(CompleteDropRecord {
                id: id.to_string(),
                winners: winners.to_vec(),
                entries: entries.to_vec(),
            })
            .await?;
        if updated == 0 {
            tracing::warn!(drop_id = %id, "Drop record was already completed or missing");
        }
        Ok(())
    }

    async fn list_incomplete(&self) -> Result<Vec<DropSettings>, StoreError> {
        let records = self.db.process(ListIncompleteDrops).await?;
        records
            .into_iter()
            .map(|r| from_record(r).map(|stored| stored.settings))
            .collect()
    }

    async fn get(&self, id: &DropId) -> Result<Option<StoredDrop>, StoreError> {
        self.db
            .process(GetDropRecord { id: id.to_string() })
            .await?
            .map(from_record)
            .transpose()
    }
}

/// Registered member wallets. Doubles as the eligibility gate: a member is
/// eligible once they registered a wallet in the guild.
#[derive(Debug, Clone)]
pub struct WalletDirectory {
    db: DatabaseProcessor,
}

impl WalletDirectory {
    pub fn new(db: DatabaseProcessor) -> Self {
        Self { db }
    }

    pub async fn register(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        wallet: &str,
    ) -> Result<MemberWallet, StoreError> {
        let row = self
            .db
            .process(UpsertMemberWallet {
                guild_id: guild_id.to_string(),
                user_id: user_id.to_string(),
                wallet: wallet.to_string(),
            })
            .await?;
        tracing::info!(%guild_id, %user_id, "Wallet registered");
        Ok(row)
    }

    pub async fn wallet_for(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
    ) -> Result<Option<String>, StoreError> {
        let row = self
            .db
            .process(GetMemberWallet {
                guild_id: guild_id.to_string(),
                user_id: user_id.to_string(),
            })
            .await?;
        Ok(row.map(|r| r.wallet))
    }

    /// Wallets of several members, keyed by user id. Members without a
    /// wallet are absent from the map.
    pub async fn lookup_many(
        &self,
        guild_id: &GuildId,
        user_ids: &[UserId],
    ) -> Result<std::collections::HashMap<UserId, String>, StoreError> {
        let rows = self
            .db
            .process(GetMemberWallets {
                guild_id: guild_id.to_string(),
                user_ids: user_ids.iter().map(ToString::to_string).collect(),
            })
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| (UserId::from(r.user_id), r.wallet))
            .collect())
    }
}

#[async_trait]
impl EligibilityGate for WalletDirectory {
    async fn is_eligible(&self, guild_id: &GuildId, user_id: &UserId) -> Result<bool, StoreError> {
        Ok(self.wallet_for(guild_id, user_id).await?.is_some())
    }
}
