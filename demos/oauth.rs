//! OAuth flow: print the authorization URL, then exchange the code.
//!
//! ```sh
//! OAUTH_CLIENT_ID=... OAUTH_CLIENT_SECRET=... cargo run --example oauth
//! # open the printed URL, then run again with the callback parameters:
//! OAUTH_CLIENT_ID=... OAUTH_CLIENT_SECRET=... OAUTH_CODE=... OAUTH_STATE=... \
//!     cargo run --example oauth
//! ```

use eversign::{Client, ClientConfig, OAuthTokenRequest};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client_id = std::env::var("OAUTH_CLIENT_ID")?;
    let client_secret = std::env::var("OAUTH_CLIENT_SECRET")?;

    let mut client = Client::unauthenticated(ClientConfig::from_env()?)?;

    let (Ok(code), Ok(state)) = (std::env::var("OAUTH_CODE"), std::env::var("OAUTH_STATE"))
    else {
        let url = client.oauth().authorization_url(&client_id, "demo-state")?;
        println!("Authorize the app at: {url}");
        return Ok(());
    };

    let token = client
        .oauth()
        .request_token(&OAuthTokenRequest {
            client_id,
            client_secret,
            code,
            state,
        })
        .await?;

    client.set_oauth_access_token(token).await?;
    for business in client.businesses() {
        println!(
            "{} {:?}{}",
            business.business_id,
            business.business_name,
            if business.is_primary { " (primary)" } else { "" }
        );
    }

    Ok(())
}
