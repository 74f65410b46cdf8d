#![deny(missing_docs)]

//! Sign-In-With-Bitcoin SDK - Complete SDK.
//!
//! Re-exports all SIWB SDK components for convenient single-crate usage.

pub use siwb_auth as auth;
pub use siwb_identity as identity;
pub use siwb_provider as provider;
