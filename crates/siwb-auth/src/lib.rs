#![deny(missing_docs)]

//! # siwb-auth
//!
//! Two-phase Sign-In-With-Bitcoin authentication: `prepare` fetches an
//! address-bound challenge for the wallet to sign, `login` turns the
//! wallet signature into a delegated session identity and exchanges it
//! for a bearer token at the relying party.
//!
//! The long-term wallet key never leaves the wallet; the relying party
//! only ever sees a time-bounded delegation to a throwaway session key.
//!
//! # Example
//!
//! ```no_run
//! use siwb_auth::{AuthConfig, AuthSession, LoginParams, SignatureScheme};
//!
//! # async fn example() -> Result<(), siwb_auth::AuthError> {
//! let session = AuthSession::new(AuthConfig::new(
//!     "https://api.example.com/v1",
//!     "https://ic0.app",
//! ));
//!
//! let prepared = session.prepare("bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh").await?;
//! // ... hand prepared.message to the wallet for signing ...
//! # let wallet_signature = String::new();
//! # let wallet_public_key = String::new();
//!
//! let result = session
//!     .login(LoginParams {
//!         address: prepared.address,
//!         message: prepared.message,
//!         signature: wallet_signature,
//!         public_key: wallet_public_key,
//!         signature_type: SignatureScheme::Bip322Simple,
//!         referrer: None,
//!     })
//!     .await?;
//! println!("authenticated as {}", result.principal_id);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod exchange;
pub mod session;
pub mod types;

pub use error::{AuthError, AuthPhase, TokenExchangeError};
pub use exchange::TokenExchangeClient;
pub use session::AuthSession;
pub use siwb_provider::SignatureScheme;
pub use types::{AuthConfig, AuthResult, LoginParams, PrepareResult};
