#![deny(missing_docs)]

//! # siwb-provider
//!
//! Client for the Sign-In-With-Bitcoin provider: the remote service that
//! issues address-bound challenge messages, verifies wallet signatures,
//! and hands out signed delegations for session keys.
//!
//! All three calls travel over an anonymous channel; nothing here holds
//! state between calls.
//!
//! # Example
//!
//! ```no_run
//! use siwb_provider::{ProviderClient, ProviderConfig};
//!
//! # async fn example() -> Result<(), siwb_provider::ProviderError> {
//! let client = ProviderClient::new(ProviderConfig::default());
//!
//! let message = client
//!     .prepare_login("bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh")
//!     .await?;
//! println!("sign this with your wallet: {}", message);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;


pub use client::ProviderClient;
pub use error::ProviderError;
pub use types::{LoginArgs, LoginOutcome, ProviderConfig, ProviderResult, SignatureScheme};
