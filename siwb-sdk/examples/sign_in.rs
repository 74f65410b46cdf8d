//! Interactive sign-in walkthrough.
//!
//! Fetches a challenge for a Bitcoin address, waits for you to sign it
//! with your wallet out of band, then completes the login and prints the
//! resulting principal and bearer token.
//!
//! ```sh
//! cargo run --example sign_in -- bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh
//! ```

use std::io::{self, BufRead, Write};

use siwb_sdk::auth::{AuthConfig, AuthSession, LoginParams, SignatureScheme};

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let address = std::env::args()
        .nth(1)
        .expect("usage: sign_in <bitcoin-address>");

    let base_url = std::env::var("SIWB_API_URL")
        .unwrap_or_else(|_| "https://api.example.com/v1".to_string());
    let provider_url =
        std::env::var("SIWB_PROVIDER_URL").unwrap_or_else(|_| "https://ic0.app".to_string());

    let session = AuthSession::new(AuthConfig::new(base_url, provider_url));

    let prepared = session.prepare(&address).await?;
    println!("Sign this message with your wallet (BIP-322 simple):\n");
    println!("{}\n", prepared.message);

    let signature = read_line("base64 signature: ")?;
    let public_key = read_line("hex public key:   ")?;

    let result = session
        .login(LoginParams {
            address: prepared.address,
            message: prepared.message,
            signature,
            public_key,
            signature_type: SignatureScheme::Bip322Simple,
            referrer: None,
        })
        .await?;

    println!("\nauthenticated as {}", result.principal_id);
    println!("bearer token ({}s): {}", result.expires_in, result.token);

    Ok(())
}
