use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;

/// A wallet a member registered for one guild.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MemberWallet {
    pub guild_id: String,
    pub user_id: String,
    pub wallet: String,
    pub updated_at: time::OffsetDateTime,
}

#[derive(Debug, Clone)]
/// Register or replace a member's wallet.
pub struct UpsertMemberWallet {
    pub guild_id: String,
    pub user_id: String,
    pub wallet: String,
}

impl Processor<UpsertMemberWallet> for DatabaseProcessor {
    type Output = MemberWallet;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpsertMemberWallet")]
    async fn process(&self, query: UpsertMemberWallet) -> Result<MemberWallet, sqlx::Error> {
        sqlx::query_as::<_, MemberWallet>(
            r#"
            INSERT INTO member_wallets (guild_id, user_id, wallet, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (guild_id, user_id)
            DO UPDATE SET wallet = EXCLUDED.wallet, updated_at = EXCLUDED.updated_at
            RETURNING guild_id, user_id, wallet, updated_at
            "#,
        )
        .bind(query.guild_id)
        .bind(query.user_id)
        .bind(query.wallet)
        .fetch_one(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
pub struct GetMemberWallet {
    pub guild_id: String,
    pub user_id: String,
}

impl Processor<GetMemberWallet> for DatabaseProcessor {
    type Output = Option<MemberWallet>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetMemberWallet")]
    async fn process(&self, query: GetMemberWallet) -> Result<Option<MemberWallet>, sqlx::Error> {
        sqlx::query_as::<_, MemberWallet>(
            r#"
            SELECT guild_id, user_id, wallet, updated_at
            FROM member_wallets
            WHERE guild_id = $1 AND user_id = $2
            "#,
        )
        .bind(query.guild_id)
        .bind(query.user_id)
        .fetch_optional(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Wallets for several members of one guild in a single query.
pub struct GetMemberWallets {
    pub guild_id: String,
    pub user_ids: Vec<String>,
}

impl Processor<GetMemberWallets> for DatabaseProcessor {
    type Output = Vec<MemberWallet>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetMemberWallets")]
    async fn process(&self, query: GetMemberWallets) -> Result<Vec<MemberWallet>, sqlx::Error> {
        if query.user_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, MemberWallet>(
            r#"
            SELECT guild_id, user_id, wallet, updated_at
            FROM member_wallets
            WHERE guild_id = $1 AND user_id = ANY($2)
            "#,
        )
        .bind(query.guild_id)
        .bind(query.user_ids)
        .fetch_all(&self.pool)
        .await
    }
}
