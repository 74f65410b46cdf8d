//! SIWB provider HTTP client issuing the prepare-login, login, and
//! get-delegation calls.

use serde::de::DeserializeOwned;
use serde::Serialize;
use siwb_identity::SignedDelegation;

use crate::error::ProviderError;
use crate::types::{LoginArgs, LoginOutcome, ProviderConfig, ProviderResult, SignatureScheme};

/// HTTP client for the SIWB provider RPC surface.
///
/// Stateless: each call is an independent JSON POST over an anonymous
/// channel, safe to retry from the caller's perspective.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    /// Client configuration.
    config: ProviderConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

#[derive(Serialize)]
struct PrepareLoginRequest<'a> {
    address: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    signature: &'a str,
    address: &'a str,
    public_key: &'a str,
    session_public_key: String,
    sign_message_type: SignatureScheme,
}

#[derive(Serialize)]
struct GetDelegationRequest<'a> {
    address: &'a str,
    session_public_key: String,
    expiration: u64,
}

impl ProviderClient {
    /// Create a new provider client with the given configuration.
    pub fn new(config: ProviderConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Request the challenge message the wallet must sign for `address`.
    pub async fn prepare_login(&self, address: &str) -> Result<String, ProviderError> {
        if address.is_empty() {
            return Err(ProviderError::EmptyAddress);
        }
        self.call("siwb_prepare_login", &PrepareLoginRequest { address })
            .await
    }

    /// Submit the wallet signature and the session public key.
    ///
    /// The provider verifies the signature against the address; a mismatch
    /// comes back as [`ProviderError::Rejected`], distinct from transport
    /// failures. On success the returned expiration must be passed
    /// unchanged to [`get_delegation`](Self::get_delegation).
    pub async fn login(&self, args: &LoginArgs<'_>) -> Result<LoginOutcome, ProviderError> {
        self.call(
            "siwb_login",
            &LoginRequest {
                signature: args.signature,
                address: args.address,
                public_key: args.public_key,
                session_public_key: hex::encode(args.session_public_key),
                sign_message_type: args.scheme,
            },
        )
        .await
    }

    /// Fetch the signed delegation for the exact (address, session key,
    /// expiration) triple issued by [`login`](Self::login).
    pub async fn get_delegation(
        &self,
        address: &str,
        session_public_key: &[u8],
        expiration: u64,
    ) -> Result<SignedDelegation, ProviderError> {
        self.call(
            "siwb_get_delegation",
            &GetDelegationRequest {
                address,
                session_public_key: hex::encode(session_public_key),
                expiration,
            },
        )
        .await
    }

    /// POST a request body to a provider method and unwrap the result
    /// envelope.
    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.config.provider_url, method);

        let resp = self
            .client
            .post(&url)
            .timeout(self.config.timeout)
            .json(body)
            .send()
            .await?;

        let status = resp.status();

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ProviderError::ServerError {
                status_code: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        let parsed: ProviderResult<T> = serde_json::from_str(&text)?;

        match parsed {
            ProviderResult::Ok(value) => Ok(value),
            ProviderResult::Err(message) => Err(ProviderError::Rejected(message)),
        }
    }
}
