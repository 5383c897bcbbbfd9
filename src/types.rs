//! Type definitions for the Eversign SDK.
//!
//! Plain response envelopes and small value types. The validated domain
//! objects live in their own modules ([`crate::document`],
//! [`crate::recipient`], [`crate::file`], [`crate::fields`]).

use crate::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A business (tenant) the credential has access to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Business {
    /// Business ID, used to scope every document call.
    pub business_id: i64,
    /// Status of the business as reported by the API.
    #[serde(
        default,
        with = "wire::opt_lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub business_status: Option<i64>,
    /// Short identifier (subdomain).
    #[serde(default)]
    pub business_identifier: Option<String>,
    /// Display name.
    #[serde(default)]
    pub business_name: Option<String>,
    /// Connection ID of the authenticated user.
    #[serde(
        default,
        with = "wire::opt_lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub business_connection_id: Option<i64>,
    /// Whether this is the user's primary business.
    #[serde(default, with = "wire::int_bool")]
    pub is_primary: bool,
    /// Creation time.
    #[serde(
        default,
        with = "wire::opt_unix_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_time_stamp: Option<DateTime<Utc>>,
}

/// Account information for the selected business.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Info {
    #[serde(default, with = "wire::opt_string_or_number")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub business_url: Option<String>,
}

/// Boolean success envelope returned by delete, cancel and reminder calls.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct OperationResult {
    #[serde(default, with = "wire::int_bool")]
    pub success: bool,
}

/// URL-only download response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DocumentUrl {
    pub url: String,
}

/// One entry of a document's audit log. Server-populated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LogEntry {
    pub event: String,
    #[serde(
        default,
        with = "wire::opt_lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub signer: Option<i64>,
    #[serde(
        default,
        with = "wire::opt_unix_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A merge field filled in when instantiating a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MergeField {
    pub identifier: String,
    pub value: String,
}

impl MergeField {
    pub fn new(identifier: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            value: value.into(),
        }
    }
}

/// Filter for listing documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFilter {
    #[default]
    All,
    Completed,
    Drafts,
    Cancelled,
    ActionRequired,
    WaitingForOthers,
    Templates,
    ArchivedTemplates,
    DraftTemplates,
}

impl DocumentFilter {
    /// Value of the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFilter::All => "all",
            DocumentFilter::Completed => "completed",
            DocumentFilter::Drafts => "drafts",
            DocumentFilter::Cancelled => "cancelled",
            DocumentFilter::ActionRequired => "my_action_required",
            DocumentFilter::WaitingForOthers => "waiting_for_others",
            DocumentFilter::Templates => "templates",
            DocumentFilter::ArchivedTemplates => "templates_archived",
            DocumentFilter::DraftTemplates => "template_drafts",
        }
    }
}
