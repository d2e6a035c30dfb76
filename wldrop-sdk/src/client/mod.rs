//! HTTP clients for both directions of the drop API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod gateway;
mod service;

pub use gateway::GatewayClient;
pub use service::ServiceClient;

use reqwest::StatusCode;

use crate::signature::{SIGNATURE_HEADER, Signature, SignedObject};

/// Errors produced by the HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Request or response body could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// The HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// Sign `body` and POST it to `url`.
async fn post_signed<T: Signature>(
    http: &reqwest::Client,
    url: url::Url,
    body: T,
    secret: &[u8],
) -> Result<reqwest::Response, ClientError> {
    let signed = SignedObject::new(body, secret)?;
    let resp = http
        .post(url)
        .header(SIGNATURE_HEADER, signed.to_header())
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(signed.json)
        .send()
        .await?;
    Ok(resp)
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let resp = expect_success(resp).await?;
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

async fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    Ok(resp)
}
