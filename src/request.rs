//! Single API request: query building, dispatch and response decoding.

use crate::error::{EversignError, Result};
use crate::wire;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Body, Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

pub(crate) const BUSINESS_ENDPOINT: &str = "business";
pub(crate) const INFO_ENDPOINT: &str = "info";
pub(crate) const DOCUMENT_ENDPOINT: &str = "document";
pub(crate) const DOWNLOAD_FINAL_ENDPOINT: &str = "download_final_document";
pub(crate) const DOWNLOAD_RAW_ENDPOINT: &str = "download_raw_document";
pub(crate) const FILE_ENDPOINT: &str = "file";
pub(crate) const REMINDER_ENDPOINT: &str = "send_reminder";
pub(crate) const OAUTH_TOKEN_ENDPOINT: &str = "token";

const BEARER_PREFIX: &str = "Bearer ";

/// How requests authenticate.
#[derive(Clone, PartialEq, Eq)]
pub(crate) enum Credential {
    /// Sent as the `access_key` query parameter.
    AccessKey(String),
    /// Sent as an `Authorization: Bearer` header.
    Bearer(String),
}

impl Credential {
    /// Strings starting with `Bearer ` are OAuth tokens, anything else is an
    /// access key.
    pub(crate) fn parse(raw: &str) -> Self {
        match raw.strip_prefix(BEARER_PREFIX) {
            Some(token) => Credential::Bearer(token.trim().to_string()),
            None => Credential::AccessKey(raw.to_string()),
        }
    }

    pub(crate) fn is_bearer(&self) -> bool {
        matches!(self, Credential::Bearer(_))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::AccessKey(_) => f.write_str("AccessKey(..)"),
            Credential::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default, with = "wire::opt_lenient_int")]
    code: Option<i64>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    info: Option<String>,
}

/// Map an `error: {code, type, info}` envelope to an [`EversignError::Api`].
fn error_from_envelope(value: &Value) -> Option<EversignError> {
    let error = value.get("error")?;
    let body: ErrorBody = serde_json::from_value(error.clone()).ok()?;
    let code = body.code.unwrap_or(0);
    let kind = body.kind.unwrap_or_else(|| "unknown".to_string());
    warn!(code, kind = %kind, "webservice error");
    Some(EversignError::Api {
        code,
        kind,
        info: body.info,
    })
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("json"))
}

/// Decode a JSON body, turning error envelopes and bad statuses into errors.
fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => {
            return Err(EversignError::Status {
                status_code: status.as_u16(),
                body: body.to_string(),
            });
        }
        Err(_) => return Err(EversignError::Parse(body.to_string())),
    };

    if let Some(err) = error_from_envelope(&value) {
        return Err(err);
    }
    if !status.is_success() {
        return Err(EversignError::Status {
            status_code: status.as_u16(),
            body: body.to_string(),
        });
    }
    if value.is_null() {
        return Err(EversignError::Parse(body.to_string()));
    }

    serde_json::from_value(value).map_err(|e| EversignError::Parse(format!("{e}: {body}")))
}

/// One call against the API.
///
/// A request is built with the endpoint, credential, query parameters and an
/// optional JSON or form payload, then consumed by exactly one of the
/// `start_*` methods, which decide how the response body is handled.
pub(crate) struct ApiRequest<'a> {
    http: &'a HttpClient,
    method: Method,
    url: String,
    endpoint: String,
    credential: Option<&'a Credential>,
    query: Vec<(String, String)>,
    json: Option<Value>,
    form: Option<Vec<(String, String)>>,
}

impl<'a> ApiRequest<'a> {
    pub(crate) fn new(http: &'a HttpClient, method: Method, base_url: &str, endpoint: &str) -> Self {
        Self {
            http,
            method,
            url: format!("{}/{}", base_url.trim_end_matches('/'), endpoint),
            endpoint: endpoint.to_string(),
            credential: None,
            query: Vec::new(),
            json: None,
            form: None,
        }
    }

    pub(crate) fn credential(mut self, credential: Option<&'a Credential>) -> Self {
        self.credential = credential;
        self
    }

    pub(crate) fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// JSON request body.
    pub(crate) fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            EversignError::invalid(format!("payload could not be serialized: {e}"))
        })?;
        self.json = Some(value);
        Ok(self)
    }

    /// Form-encoded request body.
    pub(crate) fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.form = Some(fields);
        self
    }

    fn full_query(&self) -> Vec<(&str, &str)> {
        let mut query = Vec::with_capacity(self.query.len() + 1);
        if let Some(Credential::AccessKey(key)) = self.credential {
            query.push(("access_key", key.as_str()));
        }
        query.extend(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        query
    }

    async fn send(&self, multipart: Option<Form>) -> Result<Response> {
        debug!(
            method = %self.method,
            endpoint = %self.endpoint,
            bearer = self.credential.is_some_and(Credential::is_bearer),
            "sending request"
        );

        let mut builder = self
            .http
            .request(self.method.clone(), &self.url)
            .query(&self.full_query());

        if let Some(Credential::Bearer(token)) = self.credential {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &self.json {
            builder = builder.json(body);
        }
        if let Some(form) = &self.form {
            builder = builder.form(form);
        }
        if let Some(form) = multipart {
            builder = builder.multipart(form);
        }

        let response = builder.send().await?;
        debug!(status = %response.status(), endpoint = %self.endpoint, "received response");
        Ok(response)
    }

    /// Fail on statuses and JSON error envelopes for requests whose success
    /// body is binary.
    async fn ensure_binary(response: Response) -> Result<Response> {
        let status = response.status();
        if !status.is_success() || is_json(&response) {
            let body = response.text().await?;
            return match decode::<Value>(status, &body) {
                Err(err) => Err(err),
                Ok(_) => Err(EversignError::Parse(body)),
            };
        }
        Ok(response)
    }

    /// Send the request and decode the JSON response into `T`.
    pub(crate) async fn start_request<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.send(None).await?;
        let status = response.status();
        let body = response.text().await?;
        decode(status, &body)
    }

    /// Send the request and write the response body to `path`.
    ///
    /// Returns whether the file exists afterwards.
    pub(crate) async fn sink_to(self, path: &Path) -> Result<bool> {
        let response = self.send(None).await?;
        let mut response = Self::ensure_binary(response).await?;

        let mut file = tokio::fs::File::create(path).await?;
        let mut written = 0usize;
        while let Some(chunk) = response.chunk().await? {
            written += chunk.len();
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        debug!(bytes = written, path = %path.display(), "response written to file");

        Ok(tokio::fs::try_exists(path).await?)
    }

    /// Send the request and return the whole binary body.
    pub(crate) async fn start_raw(self) -> Result<Vec<u8>> {
        let response = self.send(None).await?;
        let response = Self::ensure_binary(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Send the request and hand back the response for the caller to stream.
    pub(crate) async fn start_stream(self) -> Result<Response> {
        let response = self.send(None).await?;
        Self::ensure_binary(response).await
    }

    /// Upload the file at `path` as the multipart part `upload`.
    ///
    /// Fails on an explicit `success: false` envelope and otherwise returns
    /// the decoded JSON.
    pub(crate) async fn start_multipart_upload(self, path: &Path) -> Result<Value> {
        let file = tokio::fs::File::open(path).await?;
        let length = file.metadata().await?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let part = Part::stream_with_length(Body::from(file), length).file_name(file_name);
        let form = Form::new().part("upload", part);

        let response = self.send(Some(form)).await?;
        let status = response.status();
        let body = response.text().await?;
        let value: Value = decode(status, &body)?;

        if value.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(error_from_envelope(&value).unwrap_or(EversignError::Api {
                code: 0,
                kind: "upload_failed".to_string(),
                info: None,
            }));
        }
        Ok(value)
    }

    /// Exchange an OAuth authorization code for an access token.
    pub(crate) async fn request_oauth_token(self) -> Result<String> {
        #[derive(Deserialize)]
        struct TokenResponse {
            #[serde(default)]
            success: bool,
            #[serde(default)]
            access_token: Option<String>,
        }

        let response = self.send(None).await?;
        let body = response.text().await?;
        match serde_json::from_str::<TokenResponse>(&body) {
            Ok(TokenResponse {
                success: true,
                access_token: Some(token),
            }) => Ok(token),
            _ => Err(EversignError::OAuth(body)),
        }
    }
}
