//! Templates: server-side document skeletons filled in by role.

use crate::document::default_client;
use crate::error::{EversignError, Result};
use crate::recipient::{Recipient, Signer};
use crate::types::MergeField;
use crate::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to create a document from an existing template.
///
/// Signers and recipients are matched to the template's roles by the
/// service, so a role is what identifies them here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DocumentTemplate {
    #[serde(default, with = "wire::int_bool")]
    sandbox: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    redirect_decline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    client: Option<String>,
    #[serde(
        default,
        with = "wire::opt_unix_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    expires: Option<DateTime<Utc>>,
    #[serde(default)]
    signers: Vec<Signer>,
    #[serde(default)]
    recipients: Vec<Recipient>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<MergeField>,
    #[serde(default, with = "wire::int_bool")]
    embedded_signing_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_requester_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_requester_name: Option<String>,
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self {
            sandbox: false,
            template_id: None,
            title: None,
            message: None,
            redirect: None,
            redirect_decline: None,
            client: default_client(),
            expires: None,
            signers: Vec::new(),
            recipients: Vec::new(),
            fields: Vec::new(),
            embedded_signing_enabled: false,
            custom_requester_email: None,
            custom_requester_name: None,
        }
    }
}

impl DocumentTemplate {
    /// Template request for the given template id.
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: Some(template_id.into()),
            ..Self::default()
        }
    }

    /// Add a signer. The signer must name a template role.
    pub fn append_signer(&mut self, signer: Signer) -> Result<()> {
        if !signer.has_role() {
            return Err(EversignError::invalid("Signer needs a role to be added"));
        }
        self.signers.push(signer);
        Ok(())
    }

    /// Add a recipient. Recipients need a role, a name and an email.
    pub fn append_recipient(&mut self, recipient: Recipient) -> Result<()> {
        if !recipient.has_role() || !recipient.has_contact() {
            return Err(EversignError::invalid(
                "Recipient needs at least a Name, a Role and an E-Mail address",
            ));
        }
        self.recipients.push(recipient);
        Ok(())
    }

    /// Fill a merge field of the template.
    pub fn append_field(&mut self, field: MergeField) {
        self.fields.push(field);
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    pub fn set_template_id(&mut self, template_id: impl Into<String>) {
        self.template_id = Some(template_id.into());
    }

    pub fn signers(&self) -> &[Signer] {
        &self.signers
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn fields(&self) -> &[MergeField] {
        &self.fields
    }

    pub fn sandbox(&self) -> bool {
        self.sandbox
    }

    pub fn set_sandbox(&mut self, sandbox: bool) {
        self.sandbox = sandbox;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    pub fn set_redirect(&mut self, redirect: impl Into<String>) {
        self.redirect = Some(redirect.into());
    }

    pub fn redirect_decline(&self) -> Option<&str> {
        self.redirect_decline.as_deref()
    }

    pub fn set_redirect_decline(&mut self, redirect: impl Into<String>) {
        self.redirect_decline = Some(redirect.into());
    }

    pub fn client(&self) -> Option<&str> {
        self.client.as_deref()
    }

    pub fn set_client(&mut self, client: impl Into<String>) {
        self.client = Some(client.into());
    }

    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    pub fn set_expires(&mut self, expires: DateTime<Utc>) {
        self.expires = Some(expires);
    }

    pub fn embedded_signing_enabled(&self) -> bool {
        self.embedded_signing_enabled
    }

    pub fn set_embedded_signing_enabled(&mut self, enabled: bool) {
        self.embedded_signing_enabled = enabled;
    }

    pub fn custom_requester_email(&self) -> Option<&str> {
        self.custom_requester_email.as_deref()
    }

    pub fn set_custom_requester_email(&mut self, email: impl Into<String>) {
        self.custom_requester_email = Some(email.into());
    }

    pub fn custom_requester_name(&self) -> Option<&str> {
        self.custom_requester_name.as_deref()
    }

    pub fn set_custom_requester_name(&mut self, name: impl Into<String>) {
        self.custom_requester_name = Some(name.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signer_needs_role() {
        let mut template = DocumentTemplate::new("tpl_1");
        let err = template
            .append_signer(Signer::with_contact("Jane", "jane@example.com"))
            .unwrap_err();
        assert!(err.is_local());

        template.append_signer(Signer::with_role("Client")).unwrap();
        assert_eq!(template.signers().len(), 1);
    }

    #[test]
    fn test_recipient_needs_role_and_contact() {
        let mut template = DocumentTemplate::new("tpl_1");

        let mut role_only = Recipient::new();
        role_only.set_role("Partner");
        assert!(template.append_recipient(role_only).is_err());

        assert!(
            template
                .append_recipient(Recipient::with_contact("P", "p@example.com"))
                .is_err()
        );

        let mut complete = Recipient::with_contact("P", "p@example.com");
        complete.set_role("Partner");
        template.append_recipient(complete).unwrap();
        assert_eq!(template.recipients().len(), 1);
    }

    #[test]
    fn test_serialization() {
        let mut template = DocumentTemplate::new("tpl_1");
        template.set_title("Tenancy agreement");
        let mut signer = Signer::with_role("Tenant");
        signer.set_name("Jane");
        signer.set_email("jane@example.com");
        template.append_signer(signer).unwrap();
        template.append_field(MergeField::new("rent", "950"));

        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["template_id"], "tpl_1");
        assert_eq!(json["sandbox"], 0);
        assert_eq!(json["embedded_signing_enabled"], 0);
        assert_eq!(json["signers"][0]["role"], "Tenant");
        assert_eq!(
            json["fields"],
            serde_json::json!([{ "identifier": "rent", "value": "950" }])
        );
    }
}
