//! Service API client (command layer → coordinator).

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response, post_signed};
use crate::objects::{
    CancelRequest, CreateDropRequest, DropResponse, GetDropRequest, RegisterWalletRequest,
    SignalOutcome, SignalRequest, SignalResponse, WalletCheckRequest, WalletResponse,
};

/// Typed HTTP client for the coordinator's service API.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: Url,
    secret: Vec<u8>,
}

impl ServiceClient {
    pub fn new(base_url: Url, service_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            secret: service_secret.into(),
        }
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /api/v1/drops`
    pub async fn create_drop(&self, request: CreateDropRequest) -> Result<DropResponse, ClientError> {
        let url = self.base_url.join("/api/v1/drops")?;
        let resp = post_signed(&self.http, url, request, &self.secret).await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/drops/status`
    pub async fn drop_status(&self, drop_id: String) -> Result<DropResponse, ClientError> {
        let url = self.base_url.join("/api/v1/drops/status")?;
        let resp = post_signed(&self.http, url, GetDropRequest { drop_id }, &self.secret).await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/signals`
    pub async fn send_signal(&self, request: SignalRequest) -> Result<SignalOutcome, ClientError> {
        let url = self.base_url.join("/api/v1/signals")?;
        let resp = post_signed(&self.http, url, request, &self.secret).await?;
        let response: SignalResponse = parse_response(resp).await?;
        Ok(response.outcome)
    }

    /// `POST /api/v1/drops/cancel`
    pub async fn cancel_drop(&self, request: CancelRequest) -> Result<SignalOutcome, ClientError> {
        let url = self.base_url.join("/api/v1/drops/cancel")?;
        let resp = post_signed(&self.http, url, request, &self.secret).await?;
        let response: SignalResponse = parse_response(resp).await?;
        Ok(response.outcome)
    }

    /// `POST /api/v1/wallets`
    pub async fn register_wallet(
        &self,
        request: RegisterWalletRequest,
    ) -> Result<WalletResponse, ClientError> {
        let url = self.base_url.join("/api/v1/wallets")?;
        let resp = post_signed(&self.http, url, request, &self.secret).await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/wallets/check`
    pub async fn check_wallet(
        &self,
        request: WalletCheckRequest,
    ) -> Result<WalletResponse, ClientError> {
        let url = self.base_url.join("/api/v1/wallets/check")?;
        let resp = post_signed(&self.http, url, request, &self.secret).await?;
        parse_response(resp).await
    }
}
