//! Recipients and signers.
//!
//! A [`Recipient`] receives a copy of the document; a [`Signer`] is a
//! recipient who also has to sign it and carries the signing state the
//! service reports back.

use crate::error::{EversignError, Result};
use crate::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display languages accepted by the service.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "da", "de", "es", "fi", "fr", "hu", "it", "ja", "nl", "no", "pl", "pt", "ro", "ru",
    "sv", "tr", "zh",
];

/// Language used when none is set.
pub const DEFAULT_LANGUAGE: &str = "en";

fn check_language(language: &str) -> Result<()> {
    if SUPPORTED_LANGUAGES.contains(&language) {
        Ok(())
    } else {
        Err(EversignError::invalid(format!(
            "language not supported: {language}"
        )))
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Someone who receives the document but does not sign it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Recipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl Default for Recipient {
    fn default() -> Self {
        Self {
            name: None,
            email: None,
            role: None,
            language: default_language(),
            message: None,
        }
    }
}

impl Recipient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recipient with name and email set.
    pub fn with_contact(name: impl Into<String>, email: impl Into<String>) -> Self {
        let mut recipient = Self::default();
        recipient.set_name(name);
        recipient.set_email(email);
        recipient
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Template role this recipient fills.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Custom delivery message overriding the document message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.role = Some(role.into());
    }

    /// Set the display language. Fails for codes outside [`SUPPORTED_LANGUAGES`].
    pub fn set_language(&mut self, language: &str) -> Result<()> {
        check_language(language)?;
        self.language = language.to_string();
        Ok(())
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub(crate) fn has_contact(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
            && self.email.as_deref().is_some_and(|e| !e.is_empty())
    }

    pub(crate) fn has_role(&self) -> bool {
        self.role.as_deref().is_some_and(|r| !r.is_empty())
    }
}

/// A recipient who signs the document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Signer {
    #[serde(flatten)]
    recipient: Recipient,
    #[serde(
        default,
        with = "wire::opt_lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    id: Option<i64>,
    #[serde(
        default,
        with = "wire::opt_lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pin: Option<String>,
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    signer_authentication_sms_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signer_authentication_phone_number: Option<String>,
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    required: Option<bool>,
    #[serde(default, with = "wire::int_bool", skip_serializing)]
    signed: bool,
    #[serde(
        default,
        with = "wire::opt_unix_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    signed_timestamp: Option<DateTime<Utc>>,
    #[serde(default, with = "wire::int_bool", skip_serializing)]
    declined: bool,
    #[serde(default, with = "wire::int_bool", skip_serializing)]
    sent: bool,
    #[serde(default, with = "wire::int_bool", skip_serializing)]
    viewed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    embedded_signing_url: Option<String>,
    #[serde(default, with = "wire::int_bool")]
    deliver_email: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    declined_reason: Option<String>,
}

impl Signer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signer with name and email set.
    pub fn with_contact(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            recipient: Recipient::with_contact(name, email),
            ..Self::default()
        }
    }

    /// Signer identified only by a template role.
    pub fn with_role(role: impl Into<String>) -> Self {
        let mut signer = Self::default();
        signer.set_role(role);
        signer
    }

    /// The recipient part of this signer.
    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn name(&self) -> Option<&str> {
        self.recipient.name()
    }

    pub fn email(&self) -> Option<&str> {
        self.recipient.email()
    }

    pub fn role(&self) -> Option<&str> {
        self.recipient.role()
    }

    pub fn language(&self) -> &str {
        self.recipient.language()
    }

    pub fn message(&self) -> Option<&str> {
        self.recipient.message()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.recipient.set_name(name);
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.recipient.set_email(email);
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.recipient.set_role(role);
    }

    /// Set the display language. Fails for codes outside [`SUPPORTED_LANGUAGES`].
    pub fn set_language(&mut self, language: &str) -> Result<()> {
        self.recipient.set_language(language)
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.recipient.set_message(message);
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn order(&self) -> Option<i64> {
        self.order
    }

    pub fn pin(&self) -> Option<&str> {
        self.pin.as_deref()
    }

    pub fn sms_authentication_enabled(&self) -> bool {
        self.signer_authentication_sms_enabled.unwrap_or(false)
    }

    pub fn sms_authentication_phone_number(&self) -> Option<&str> {
        self.signer_authentication_phone_number.as_deref()
    }

    pub fn required(&self) -> Option<bool> {
        self.required
    }

    pub fn signed(&self) -> bool {
        self.signed
    }

    pub fn signed_timestamp(&self) -> Option<DateTime<Utc>> {
        self.signed_timestamp
    }

    pub fn declined(&self) -> bool {
        self.declined
    }

    pub fn sent(&self) -> bool {
        self.sent
    }

    pub fn viewed(&self) -> bool {
        self.viewed
    }

    /// Signing status as reported by the service, e.g. `waiting_for_signature`.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Embedded signing URL, present when embedded signing is enabled.
    pub fn embedded_signing_url(&self) -> Option<&str> {
        self.embedded_signing_url.as_deref()
    }

    pub fn deliver_email(&self) -> bool {
        self.deliver_email
    }

    pub fn declined_reason(&self) -> Option<&str> {
        self.declined_reason.as_deref()
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn set_order(&mut self, order: i64) {
        self.order = Some(order);
    }

    /// PIN the signer has to enter before signing.
    pub fn set_pin(&mut self, pin: impl Into<String>) {
        self.pin = Some(pin.into());
    }

    /// Enable SMS authentication against the given phone number.
    pub fn set_sms_authentication(&mut self, phone_number: impl Into<String>) {
        self.signer_authentication_sms_enabled = Some(true);
        self.signer_authentication_phone_number = Some(phone_number.into());
    }

    pub fn disable_sms_authentication(&mut self) {
        self.signer_authentication_sms_enabled = Some(false);
        self.signer_authentication_phone_number = None;
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = Some(required);
    }

    /// Also send the invitation email when embedded signing is used.
    pub fn set_deliver_email(&mut self, deliver_email: bool) {
        self.deliver_email = deliver_email;
    }

    pub(crate) fn has_contact(&self) -> bool {
        self.recipient.has_contact()
    }

    pub(crate) fn has_role(&self) -> bool {
        self.recipient.has_role()
    }
}
