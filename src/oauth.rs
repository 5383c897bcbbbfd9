//! OAuth authorization flow.
//!
//! Send the user to [`OAuthClient::authorization_url`], exchange the `code`
//! the callback receives with [`OAuthClient::request_token`], then hand the
//! token to [`Client::set_oauth_access_token`].

use crate::client::Client;
use crate::error::{EversignError, Result};
use crate::request::{ApiRequest, OAUTH_TOKEN_ENDPOINT};
use reqwest::{Method, Url};

const OAUTH_AUTHORIZE_ENDPOINT: &str = "authorize";

/// Parameters of the token exchange.
#[derive(Debug, Clone, Default)]
pub struct OAuthTokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub code: String,
    pub state: String,
}

impl OAuthTokenRequest {
    fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("client_id".to_string(), self.client_id.clone()),
            ("client_secret".to_string(), self.client_secret.clone()),
            ("state".to_string(), self.state.clone()),
            ("code".to_string(), self.code.clone()),
        ]
    }
}

/// Client for the OAuth endpoints.
///
/// Access via `client.oauth()`. Works on an
/// [unauthenticated](Client::unauthenticated) client.
pub struct OAuthClient {
    client: Client,
}

impl OAuthClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// URL to send the user to for granting access.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eversign::{Client, ClientConfig};
    ///
    /// let client = Client::unauthenticated(ClientConfig::default()).unwrap();
    /// let url = client.oauth().authorization_url("my-client", "xyz").unwrap();
    /// assert_eq!(url, "https://eversign.com/oauth/authorize?client_id=my-client&state=xyz");
    /// ```
    pub fn authorization_url(&self, client_id: &str, state: &str) -> Result<String> {
        if client_id.is_empty() {
            return Err(EversignError::invalid("Please specify client_id"));
        }
        if state.is_empty() {
            return Err(EversignError::invalid("Please specify state"));
        }

        let base = format!("{}/{}", self.client.oauth_base_url, OAUTH_AUTHORIZE_ENDPOINT);
        let url = Url::parse_with_params(&base, &[("client_id", client_id), ("state", state)])
            .map_err(|e| EversignError::invalid(format!("invalid OAuth URL {base}: {e}")))?;
        Ok(url.to_string())
    }

    /// Exchange an authorization code for an access token.
    pub async fn request_token(&self, request: &OAuthTokenRequest) -> Result<String> {
        ApiRequest::new(
            &self.client.http,
            Method::POST,
            &self.client.oauth_base_url,
            OAUTH_TOKEN_ENDPOINT,
        )
        .form(request.form_fields())
        .request_oauth_token()
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;

    #[test]
    fn test_authorization_url_requires_parameters() {
        let client = Client::unauthenticated(ClientConfig::default()).unwrap();
        assert!(client.oauth().authorization_url("", "state").is_err());
        assert!(client.oauth().authorization_url("id", "").is_err());
    }

    #[test]
    fn test_authorization_url_encodes_parameters() {
        let client = Client::unauthenticated(ClientConfig {
            oauth_base_url: Some("http://localhost:9000/oauth/".to_string()),
            ..Default::default()
        })
        .unwrap();
        let url = client.oauth().authorization_url("a b", "s&t").unwrap();
        assert_eq!(
            url,
            "http://localhost:9000/oauth/authorize?client_id=a+b&state=s%26t"
        );
    }
}
