//! Bearer-token exchange with the relying party.
//!
//! One signed timestamp buys one bearer token. The timestamp is a
//! per-call anti-replay nonce, not a session expiry; retrying after a
//! failure produces a fresh nonce, so the exchange is safe to repeat.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use siwb_identity::ExchangeIdentity;

use crate::error::TokenExchangeError;

/// Response keys probed for the bearer token, in priority order. The
/// relying party does not guarantee a single canonical field name.
const TOKEN_KEYS: [&str; 4] = ["token", "accessToken", "jwt", "access_token"];

/// HTTP client exchanging a signed timestamp for a bearer token at the
/// relying party's `/auth` endpoint.
///
/// Stateless apart from the monotonic timestamp counter; safe to share
/// and to retry.
#[derive(Debug)]
pub struct TokenExchangeClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
    last_timestamp_ms: AtomicU64,
}

impl TokenExchangeClient {
    /// Create a new exchange client for the given relying-party base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            client: reqwest::Client::new(),
            last_timestamp_ms: AtomicU64::new(0),
        }
    }

    /// Exchange a session or delegated identity for a bearer token.
    ///
    /// The payload carries the signed timestamp plus exactly one of the
    /// delegation chain (delegated identity) or the bare public key
    /// (session identity), so the relying party can verify each form.
    pub async fn exchange(
        &self,
        identity: &ExchangeIdentity<'_>,
    ) -> Result<String, TokenExchangeError> {
        let timestamp = self.next_timestamp_ms().to_string();
        let signature = identity.sign(timestamp.as_bytes())?;

        let mut payload = serde_json::Map::new();
        payload.insert("timestamp".to_string(), Value::String(timestamp));
        payload.insert(
            "signature".to_string(),
            Value::String(BASE64.encode(&signature)),
        );
        match identity {
            ExchangeIdentity::Delegated(identity) => {
                payload.insert(
                    "delegation".to_string(),
                    Value::String(identity.delegation_chain().to_json()),
                );
            }
            ExchangeIdentity::Session(key) => {
                payload.insert(
                    "publickey".to_string(),
                    Value::String(BASE64.encode(key.public_key_der())),
                );
            }
        }

        let url = format!("{}/auth", self.base_url);
        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header(ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TokenExchangeError::ServerError {
                status_code: status.as_u16(),
                message,
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("application/json") {
            return Err(TokenExchangeError::UnexpectedContentType { content_type });
        }

        let body: Value = serde_json::from_str(&resp.text().await?)?;

        if let Some(rejection) = body_rejection(&body) {
            return Err(TokenExchangeError::Rejected(rejection));
        }

        for key in TOKEN_KEYS {
            if let Some(token) = body.get(key).and_then(Value::as_str) {
                return Ok(token.to_string());
            }
        }

        let available = body
            .as_object()
            .map(|map| map.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        Err(TokenExchangeError::MissingToken { available })
    }

    /// Produce a timestamp in milliseconds, strictly increasing across
    /// calls on this client even under a coarse or stepped clock.
    fn next_timestamp_ms(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let mut prev = self.last_timestamp_ms.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self.last_timestamp_ms.compare_exchange_weak(
                prev,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(observed) => prev = observed,
            }
        }
    }
}

/// Detect an error payload hiding behind a 2xx status: an `error` field,
/// or a 4xx/5xx numeric `status` in the body.
fn body_rejection(body: &Value) -> Option<String> {
    if let Some(error) = body.get("error").filter(|v| !v.is_null()) {
        return Some(
            error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
        );
    }

    let status = body.get("status").or_else(|| body.get("statusCode"));
    if let Some(code) = status.and_then(Value::as_u64).filter(|code| *code >= 400) {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message");
        return Some(format!("{}: {}", code, message));
    }

    None
}
