//! HTTP adapter between the coordinator and the chat gateway.

use async_trait::async_trait;
use reqwest::StatusCode;
use wldrop_core::collaborators::{
    AnnouncementTransport, NotificationSink, ObservedEntry, ObservedSignals, TransportError,
};
use wldrop_core::collaborators::postgres::WalletDirectory;
use wldrop_core::drops::{ChannelId, DropConfig, DropId, DropSettings, Participant, UserId};
use wldrop_sdk::client::{ClientError, GatewayClient};
use wldrop_sdk::objects::gateway::{
    AnnouncementContent, AnnouncementRef, CreatorNotification, EditAnnouncement,
    RegisterSignalKind, RetractSignal, SnapshotRequest, WinnerRow, WinnersNotification,
};

/// Implements the announcement transport and notification sink over the
/// gateway's signed HTTP API. Creator notifications carry each winner's
/// registered wallet.
pub struct HttpGateway {
    client: GatewayClient,
    wallets: WalletDirectory,
}

impl HttpGateway {
    pub fn new(client: GatewayClient, wallets: WalletDirectory) -> Self {
        Self { client, wallets }
    }
}

fn transport_error(e: ClientError) -> TransportError {
    match e.status() {
        Some(StatusCode::NOT_FOUND) => TransportError::NotFound,
        _ => TransportError::Failed(e.to_string()),
    }
}

fn content(config: &DropConfig, ended: bool) -> AnnouncementContent {
    AnnouncementContent {
        channel_id: config.channel_id.to_string(),
        guild_id: config.guild_id.to_string(),
        creator_id: config.creator_id.to_string(),
        kind: config.kind.into(),
        project_name: config.details.project_name.clone(),
        description: config.details.description.clone(),
        discord_url: config.details.discord_url.clone(),
        image_url: config.details.image_url.clone(),
        emoji: config.details.emoji.clone(),
        winner_count: config.winner_count,
        max_entries: config.max_entries,
        require_gate: config.require_gate,
        deadline: config.deadline.unix_timestamp(),
        ended,
    }
}

fn wire_participants(winners: &[Participant]) -> Vec<wldrop_sdk::objects::Participant> {
    winners.iter().cloned().map(Into::into).collect()
}

#[async_trait]
impl AnnouncementTransport for HttpGateway {
    async fn post_announcement(&self, config: &DropConfig) -> Result<DropId, TransportError> {
        let posted = self
            .client
            .post_announcement(content(config, false))
            .await
            .map_err(transport_error)?;
        Ok(DropId::from(posted.announcement_id))
    }

    async fn register_signal_kind(
        &self,
        channel_id: &ChannelId,
        announcement_id: &DropId,
        signal_kind: &str,
    ) -> Result<(), TransportError> {
        self.client
            .register_signal_kind(RegisterSignalKind {
                channel_id: channel_id.to_string(),
                announcement_id: announcement_id.to_string(),
                signal_kind: signal_kind.to_string(),
            })
            .await
            .map_err(|e| match e.status() {
                Some(StatusCode::UNPROCESSABLE_ENTITY) => TransportError::UnsupportedSignalKind,
                _ => transport_error(e),
            })
    }

    async fn edit_announcement(
        &self,
        announcement_id: &DropId,
        config: &DropConfig,
        ended: bool,
    ) -> Result<(), TransportError> {
        self.client
            .edit_announcement(EditAnnouncement {
                announcement_id: announcement_id.to_string(),
                content: content(config, ended),
            })
            .await
            .map_err(transport_error)
    }

    async fn delete_announcement(
        &self,
        channel_id: &ChannelId,
        announcement_id: &DropId,
    ) -> Result<(), TransportError> {
        self.client
            .delete_announcement(AnnouncementRef {
                channel_id: channel_id.to_string(),
                announcement_id: announcement_id.to_string(),
            })
            .await
            .map_err(transport_error)
    }

    async fn retract_signal(
        &self,
        channel_id: &ChannelId,
        announcement_id: &DropId,
        participant_id: &UserId,
        signal_kind: &str,
    ) -> Result<(), TransportError> {
        self.client
            .retract_signal(RetractSignal {
                channel_id: channel_id.to_string(),
                announcement_id: announcement_id.to_string(),
                participant_id: participant_id.to_string(),
                signal_kind: signal_kind.to_string(),
            })
            .await
            .map_err(transport_error)
    }

    async fn fetch_signal_snapshot(
        &self,
        channel_id: &ChannelId,
        announcement_id: &DropId,
        signal_kind: &str,
    ) -> Result<ObservedSignals, TransportError> {
        let snapshot = self
            .client
            .snapshot(SnapshotRequest {
                channel_id: channel_id.to_string(),
                announcement_id: announcement_id.to_string(),
                signal_kind: signal_kind.to_string(),
            })
            .await
            .map_err(transport_error)?;

        Ok(ObservedSignals {
            author_id: UserId::from(snapshot.author_id),
            entries: snapshot
                .participants
                .into_iter()
                .map(|p| ObservedEntry {
                    participant: p.participant.into(),
                    is_bot: p.is_bot,
                })
                .collect(),
        })
    }

    async fn resolve_user(&self, user_id: &UserId) -> Result<Option<Participant>, TransportError> {
        let user = self
            .client
            .resolve_user(user_id.to_string())
            .await
            .map_err(transport_error)?;
        Ok(user.map(Into::into))
    }
}

#[async_trait]
impl NotificationSink for HttpGateway {
    async fn announce_winners(
        &self,
        drop: &DropSettings,
        winners: &[Participant],
    ) -> Result<(), TransportError> {
        self.client
            .announce_winners(WinnersNotification {
                drop_id: drop.id.to_string(),
                channel_id: drop.channel_id.to_string(),
                guild_id: drop.guild_id.to_string(),
                kind: drop.kind.into(),
                project_name: drop.details.project_name.clone(),
                discord_url: drop.details.discord_url.clone(),
                emoji: drop.details.emoji.clone(),
                winners: wire_participants(winners),
            })
            .await
            .map_err(transport_error)
    }

    async fn notify_creator(
        &self,
        drop: &DropSettings,
        winners: &[Participant],
    ) -> Result<(), TransportError> {
        let ids: Vec<UserId> = winners.iter().map(|w| w.id.clone()).collect();
        let wallets = match self.wallets.lookup_many(&drop.guild_id, &ids).await {
            Ok(wallets) => wallets,
            Err(e) => {
                tracing::warn!(drop_id = %drop.id, error = %e, "Failed to load winner wallets");
                Default::default()
            }
        };

        let rows = winners
            .iter()
            .map(|w| WinnerRow {
                participant: w.clone().into(),
                wallet: wallets.get(&w.id).cloned(),
            })
            .collect();

        self.client
            .notify_creator(CreatorNotification {
                drop_id: drop.id.to_string(),
                creator_id: drop.creator_id.to_string(),
                project_name: drop.details.project_name.clone(),
                winners: rows,
            })
            .await
            .map_err(transport_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wldrop_core::drops::{DropDetails, GuildId};
    use wldrop_core::entities::DropKind;
    use wldrop_sdk::objects::DropKind as WireKind;

    #[test]
    fn test_content_carries_presentation() {
        let now = time::OffsetDateTime::now_utc();
        let config = DropConfig {
            kind: DropKind::Fcfs,
            winner_count: 3,
            max_entries: 0,
            require_gate: true,
            creator_id: UserId::from("1"),
            channel_id: ChannelId::from("2"),
            guild_id: GuildId::from("3"),
            details: DropDetails {
                project_name: "Project".to_string(),
                description: Some("mint".to_string()),
                discord_url: Some("https://discord.gg/x".to_string()),
                image_url: None,
                emoji: "🎉".to_string(),
            },
            started_at: now,
            deadline: now,
        };
        let wire = content(&config, true);
        assert_eq!(wire.kind, WireKind::Fcfs);
        assert_eq!(wire.channel_id, "2");
        assert_eq!(wire.deadline, now.unix_timestamp());
        assert!(wire.ended);
        assert!(wire.require_gate);
    }
}
