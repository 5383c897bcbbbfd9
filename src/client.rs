//! Eversign API client.
//!
//! The main entry point for interacting with the Eversign API. A [`Client`]
//! owns the credential and the selected business; every document and file
//! call is scoped to that business.

use crate::documents::DocumentsClient;
use crate::error::{EversignError, Result};
use crate::files::FilesClient;
use crate::oauth::OAuthClient;
use crate::request::{ApiRequest, BUSINESS_ENDPOINT, Credential, INFO_ENDPOINT};
use crate::types::{Business, Info};
use reqwest::{Client as HttpClient, Method};
use std::time::Duration;
use tracing::info;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.eversign.com/api";
pub(crate) const DEFAULT_OAUTH_BASE_URL: &str = "https://eversign.com/oauth";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Eversign API client.
///
/// # Example
///
/// ```rust,no_run
/// use eversign::Client;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Fetches the businesses and selects the primary one
///     let client = Client::connect("YOUR_ACCESS_KEY").await?;
///
///     for document in client.documents().list_completed().await? {
///         println!("{:?}", document.title());
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    pub(crate) http: HttpClient,
    pub(crate) base_url: String,
    pub(crate) oauth_base_url: String,
    pub(crate) credential: Option<Credential>,
    requested_business_id: Option<i64>,
    businesses: Vec<Business>,
    selected_business: Option<Business>,
}

/// Configuration options for the client.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Base URL for the API (default: https://api.eversign.com/api).
    pub base_url: Option<String>,
    /// Base URL for the OAuth endpoints (default: https://eversign.com/oauth).
    pub oauth_base_url: Option<String>,
    /// Request timeout (default: 30 seconds).
    pub timeout: Option<Duration>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// Business to select instead of the primary one.
    pub business_id: Option<i64>,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    env_var(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| EversignError::invalid(format!("{name} is not a valid number: {raw}")))
        })
        .transpose()
}

impl ClientConfig {
    /// Read overrides from the environment.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `EVERSIGN_API_URL` | `base_url` |
    /// | `EVERSIGN_OAUTH_URL` | `oauth_base_url` |
    /// | `EVERSIGN_TIMEOUT_SECS` | `timeout` |
    /// | `EVERSIGN_BUSINESS_ID` | `business_id` |
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: env_var("EVERSIGN_API_URL"),
            oauth_base_url: env_var("EVERSIGN_OAUTH_URL"),
            timeout: parse_env::<u64>("EVERSIGN_TIMEOUT_SECS")?.map(Duration::from_secs),
            user_agent: None,
            business_id: parse_env::<i64>("EVERSIGN_BUSINESS_ID")?,
        })
    }
}

impl Client {
    /// Create a client for an access key without contacting the API.
    ///
    /// Call [`fetch_businesses`](Self::fetch_businesses) before making
    /// business-scoped calls, or use [`connect`](Self::connect).
    ///
    /// # Arguments
    ///
    /// * `access_key` - Your access key, or `"Bearer <token>"` for OAuth
    pub fn new(access_key: impl Into<String>) -> Result<Self> {
        Self::with_config(access_key, ClientConfig::default())
    }

    /// Create a client with custom configuration without contacting the API.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eversign::{Client, ClientConfig};
    /// use std::time::Duration;
    ///
    /// let client = Client::with_config("YOUR_ACCESS_KEY", ClientConfig {
    ///     base_url: Some("http://localhost:8080/api".to_string()),
    ///     timeout: Some(Duration::from_secs(60)),
    ///     ..Default::default()
    /// }).unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8080/api");
    /// ```
    pub fn with_config(access_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let mut client = Self::unauthenticated(config)?;
        let access_key = access_key.into();
        if !access_key.is_empty() {
            client.credential = Some(Credential::parse(&access_key));
        }
        Ok(client)
    }

    /// Create a client without a credential, e.g. to run the OAuth flow.
    pub fn unauthenticated(config: ClientConfig) -> Result<Self> {
        let timeout = config
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("eversign-rust/{}", env!("CARGO_PKG_VERSION")));

        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url: trim_url(config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)),
            oauth_base_url: trim_url(
                config
                    .oauth_base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_OAUTH_BASE_URL),
            ),
            credential: None,
            requested_business_id: config.business_id,
            businesses: Vec::new(),
            selected_business: None,
        })
    }

    /// Create a client and select a business.
    ///
    /// Fetches the businesses available to the access key and selects the
    /// primary one.
    pub async fn connect(access_key: impl Into<String>) -> Result<Self> {
        Self::connect_with_config(access_key, ClientConfig::default()).await
    }

    /// Create a client with custom configuration and select a business.
    ///
    /// Selects `config.business_id` when set, failing with
    /// [`EversignError::BusinessNotFound`] if the key has no such business.
    pub async fn connect_with_config(
        access_key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let mut client = Self::with_config(access_key, config)?;
        client.fetch_businesses().await?;
        Ok(client)
    }

    /// Get the base URL for the API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the base URL for the OAuth endpoints.
    pub fn oauth_base_url(&self) -> &str {
        &self.oauth_base_url
    }

    /// True when requests authenticate with an OAuth bearer token.
    pub fn uses_oauth(&self) -> bool {
        self.credential.as_ref().is_some_and(Credential::is_bearer)
    }

    /// Businesses fetched for the credential.
    pub fn businesses(&self) -> &[Business] {
        &self.businesses
    }

    /// The business all scoped calls run against.
    pub fn selected_business(&self) -> Option<&Business> {
        self.selected_business.as_ref()
    }

    /// Fetch the businesses for the credential and select one.
    ///
    /// Does nothing when the client has no credential.
    pub async fn fetch_businesses(&mut self) -> Result<&[Business]> {
        if self.credential.is_none() {
            return Ok(&self.businesses);
        }

        let businesses: Vec<Business> = self
            .request(Method::GET, BUSINESS_ENDPOINT)
            .start_request()
            .await?;
        self.businesses = businesses;

        if !self.businesses.is_empty() {
            match self.requested_business_id {
                Some(business_id) => self.select_business_by_id(business_id)?,
                None => {
                    let primary = self
                        .businesses
                        .iter()
                        .find(|b| b.is_primary)
                        .or_else(|| self.businesses.first())
                        .cloned();
                    if let Some(business) = primary {
                        self.set_selected_business(business);
                    }
                }
            }
        }
        Ok(&self.businesses)
    }

    /// Select a business directly.
    pub fn set_selected_business(&mut self, business: Business) {
        info!(business_id = business.business_id, "business selected");
        self.selected_business = Some(business);
    }

    /// Select one of the fetched businesses by id.
    pub fn select_business_by_id(&mut self, business_id: i64) -> Result<()> {
        let business = self
            .businesses
            .iter()
            .find(|b| b.business_id == business_id)
            .cloned()
            .ok_or(EversignError::BusinessNotFound(business_id))?;
        self.set_selected_business(business);
        Ok(())
    }

    /// Switch to OAuth bearer authentication and re-fetch the businesses.
    pub async fn set_oauth_access_token(&mut self, token: impl Into<String>) -> Result<()> {
        self.credential = Some(Credential::Bearer(token.into()));
        self.businesses.clear();
        self.selected_business = None;
        self.fetch_businesses().await?;
        Ok(())
    }

    /// Account information for the selected business.
    pub async fn info(&self) -> Result<Info> {
        self.scoped(Method::GET, INFO_ENDPOINT)?.start_request().await
    }

    /// Get the documents client for document operations.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use eversign::Client;
    ///
    /// # async fn run() -> eversign::Result<()> {
    /// let client = Client::connect("YOUR_ACCESS_KEY").await?;
    /// let drafts = client.documents().list_drafts().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn documents(&self) -> DocumentsClient {
        DocumentsClient::new(self.clone())
    }

    /// Get the files client for uploads.
    pub fn files(&self) -> FilesClient {
        FilesClient::new(self.clone())
    }

    /// Get the OAuth client for the authorization flow.
    pub fn oauth(&self) -> OAuthClient {
        OAuthClient::new(self.clone())
    }

    /// Build an authenticated request.
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> ApiRequest<'_> {
        ApiRequest::new(&self.http, method, &self.base_url, endpoint)
            .credential(self.credential.as_ref())
    }

    /// Build an authenticated request scoped to the selected business.
    pub(crate) fn scoped(&self, method: Method, endpoint: &str) -> Result<ApiRequest<'_>> {
        let business = self
            .selected_business
            .as_ref()
            .ok_or(EversignError::NoBusinessSelected)?;
        Ok(self
            .request(method, endpoint)
            .query("business_id", business.business_id))
    }
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
