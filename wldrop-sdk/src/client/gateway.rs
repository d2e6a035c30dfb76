//! Gateway API client (coordinator → chat gateway).

use reqwest::Client;
use url::Url;

use super::{ClientError, expect_success, parse_response, post_signed};
use crate::objects::gateway::{
    AnnouncementContent, AnnouncementRef, CreatorNotification, EditAnnouncement,
    PostAnnouncementResponse, RegisterSignalKind, ResolveUserRequest, ResolveUserResponse,
    RetractSignal, SignalSnapshot, SnapshotRequest, WinnersNotification,
};
use crate::objects::Participant;

/// Typed HTTP client for the chat gateway.
///
/// Every request body is signed with the gateway secret.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    base_url: Url,
    secret: Vec<u8>,
}

impl GatewayClient {
    pub fn new(base_url: Url, gateway_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            secret: gateway_secret.into(),
        }
    }

    /// Replace the default `reqwest::Client` (e.g. to set a timeout).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /announcements`
    pub async fn post_announcement(
        &self,
        content: AnnouncementContent,
    ) -> Result<PostAnnouncementResponse, ClientError> {
        let url = self.base_url.join("/announcements")?;
        let resp = post_signed(&self.http, url, content, &self.secret).await?;
        parse_response(resp).await
    }

    /// `POST /announcements/signal-kinds`: answers 422 for an emoji the
    /// gateway cannot use.
    pub async fn register_signal_kind(&self, body: RegisterSignalKind) -> Result<(), ClientError> {
        let url = self.base_url.join("/announcements/signal-kinds")?;
        let resp = post_signed(&self.http, url, body, &self.secret).await?;
        expect_success(resp).await.map(|_| ())
    }

    /// `POST /announcements/edit`
    pub async fn edit_announcement(&self, body: EditAnnouncement) -> Result<(), ClientError> {
        let url = self.base_url.join("/announcements/edit")?;
        let resp = post_signed(&self.http, url, body, &self.secret).await?;
        expect_success(resp).await.map(|_| ())
    }

    /// `POST /announcements/delete`
    pub async fn delete_announcement(&self, body: AnnouncementRef) -> Result<(), ClientError> {
        let url = self.base_url.join("/announcements/delete")?;
        let resp = post_signed(&self.http, url, body, &self.secret).await?;
        expect_success(resp).await.map(|_| ())
    }

    /// `POST /announcements/retract`
    pub async fn retract_signal(&self, body: RetractSignal) -> Result<(), ClientError> {
        let url = self.base_url.join("/announcements/retract")?;
        let resp = post_signed(&self.http, url, body, &self.secret).await?;
        expect_success(resp).await.map(|_| ())
    }

    /// `POST /announcements/snapshot`: answers 404 once the announcement
    /// is gone.
    pub async fn snapshot(&self, body: SnapshotRequest) -> Result<SignalSnapshot, ClientError> {
        let url = self.base_url.join("/announcements/snapshot")?;
        let resp = post_signed(&self.http, url, body, &self.secret).await?;
        parse_response(resp).await
    }

    /// `POST /users/resolve`
    pub async fn resolve_user(&self, user_id: String) -> Result<Option<Participant>, ClientError> {
        let url = self.base_url.join("/users/resolve")?;
        let resp = post_signed(&self.http, url, ResolveUserRequest { user_id }, &self.secret).await?;
        let resolved: ResolveUserResponse = parse_response(resp).await?;
        Ok(resolved.user)
    }

    /// `POST /notifications/winners`
    pub async fn announce_winners(&self, body: WinnersNotification) -> Result<(), ClientError> {
        let url = self.base_url.join("/notifications/winners")?;
        let resp = post_signed(&self.http, url, body, &self.secret).await?;
        expect_success(resp).await.map(|_| ())
    }

    /// `POST /notifications/creator`
    pub async fn notify_creator(&self, body: CreatorNotification) -> Result<(), ClientError> {
        let url = self.base_url.join("/notifications/creator")?;
        let resp = post_signed(&self.http, url, body, &self.secret).await?;
        expect_success(resp).await.map(|_| ())
    }
}
