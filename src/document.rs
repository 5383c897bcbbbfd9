//! Documents: signature requests with files, signers, recipients and fields.

use crate::error::{EversignError, Result};
use crate::fields::FormField;
use crate::file::File;
use crate::recipient::{Recipient, Signer};
use crate::types::LogEntry;
use crate::wire;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Value of the `client` property sent with every new document.
pub const DEFAULT_CLIENT: &str = "rust-sdk";

pub(crate) fn default_client() -> Option<String> {
    Some(DEFAULT_CLIENT.to_string())
}

/// A signature request.
///
/// Documents are built locally through the `append_*` methods, which enforce
/// the invariants the service relies on, and then handed to
/// [`DocumentsClient::create`](crate::documents::DocumentsClient::create).
/// The server's canonical copy is returned as a new `Document`.
///
/// # Example
///
/// ```rust
/// use eversign::{Document, File, Signer, SignatureField};
/// use eversign::fields::{Positioned, Signable};
///
/// # fn main() -> eversign::Result<()> {
/// let mut document = Document::new();
/// document.set_title("Form Test");
/// document.append_signer(Signer::with_contact("Jane Doe", "jane@example.com"))?;
/// document.append_file(File::from_id("contract.pdf", "MN4jQmNYxmHiRQ0SIVXE"))?;
///
/// let mut field = SignatureField::default();
/// field.set_x(30.0);
/// field.set_y(150.0);
/// field.set_signer("1");
/// document.append_form_field(field)?;
///
/// assert_eq!(document.form_fields().next().and_then(|f| f.identifier()), Some("SignatureField_0"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    document_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    requester_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_requester_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_requester_name: Option<String>,
    #[serde(
        default,
        with = "wire::opt_unix_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    created: Option<DateTime<Utc>>,
    #[serde(default, with = "wire::int_bool")]
    sandbox: bool,
    #[serde(default, with = "wire::int_bool")]
    is_draft: bool,
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    is_completed: Option<bool>,
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    is_archived: Option<bool>,
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    is_deleted: Option<bool>,
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    is_trashed: Option<bool>,
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    is_cancelled: Option<bool>,
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    embedded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    embedded_claim_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, with = "wire::int_bool")]
    use_signer_order: bool,
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    is_template: Option<bool>,
    #[serde(default, with = "wire::int_bool")]
    reminders: bool,
    #[serde(default, with = "wire::int_bool")]
    require_all_signers: bool,
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
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    embedded_signing_enabled: Option<bool>,
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    flexible_signing: Option<bool>,
    #[serde(
        default,
        with = "wire::opt_int_bool",
        skip_serializing_if = "Option::is_none"
    )]
    use_hidden_tags: Option<bool>,
    #[serde(default, deserialize_with = "null_as_empty")]
    signers: Vec<Signer>,
    #[serde(default, deserialize_with = "null_as_empty")]
    recipients: Vec<Recipient>,
    #[serde(default, deserialize_with = "null_as_empty")]
    files: Vec<File>,
    #[serde(default, deserialize_with = "fields_by_file")]
    fields: Vec<Vec<FormField>>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    log: Vec<LogEntry>,
    #[serde(
        default,
        deserialize_with = "wire::lenient_map::deserialize",
        skip_serializing_if = "HashMap::is_empty"
    )]
    meta: HashMap<String, String>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            document_hash: None,
            requester_email: None,
            custom_requester_email: None,
            custom_requester_name: None,
            created: None,
            sandbox: false,
            is_draft: false,
            is_completed: None,
            is_archived: None,
            is_deleted: None,
            is_trashed: None,
            is_cancelled: None,
            embedded: None,
            embedded_claim_url: None,
            title: None,
            message: None,
            use_signer_order: false,
            is_template: None,
            reminders: false,
            require_all_signers: false,
            redirect: None,
            redirect_decline: None,
            client: default_client(),
            expires: None,
            embedded_signing_enabled: None,
            flexible_signing: None,
            use_hidden_tags: None,
            signers: Vec::new(),
            recipients: Vec::new(),
            files: Vec::new(),
            fields: Vec::new(),
            log: Vec::new(),
            meta: HashMap::new(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Upper bound on file indexes accepted from responses.
const MAX_FILES: usize = 1024;

/// Decode `fields` positioned by file index and stamp each field with the
/// index of the file it sits on. The service sends either an array of arrays
/// or an object keyed by file index.
fn fields_by_file<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<Vec<FormField>>, D::Error> {
    let per_file: Vec<(usize, Value)> = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().enumerate().collect(),
        Value::Object(entries) => {
            let mut indexed = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                let index = key
                    .parse::<usize>()
                    .ok()
                    .filter(|index| *index < MAX_FILES)
                    .ok_or_else(|| de::Error::custom(format!("invalid file index: {key}")))?;
                indexed.push((index, value));
            }
            indexed
        }
        other => return Err(de::Error::custom(format!("expected field list: {other}"))),
    };

    let mut fields: Vec<Vec<FormField>> = Vec::new();
    for (file_index, value) in per_file {
        let mut list: Vec<FormField> = match value {
            Value::Null => Vec::new(),
            value => serde_json::from_value(value).map_err(de::Error::custom)?,
        };
        for field in &mut list {
            field.as_positioned_mut().set_file_index(file_index);
        }
        if fields.len() <= file_index {
            fields.resize_with(file_index + 1, Vec::new);
        }
        fields[file_index] = list;
    }
    Ok(fields)
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- collections ----------------------------------------------------

    /// Add a signer.
    ///
    /// Outside templates the signer needs a name and an email. Signers
    /// without an `id` or `order` are numbered by position, starting at 1.
    pub fn append_signer(&mut self, mut signer: Signer) -> Result<()> {
        if !self.is_template() && !signer.has_contact() {
            return Err(EversignError::invalid(
                "Signer needs at least a Name and an E-Mail address",
            ));
        }
        let position = self.signers.len() as i64 + 1;
        if signer.id().unwrap_or(0) == 0 {
            signer.set_id(position);
        }
        if signer.order().unwrap_or(0) == 0 {
            signer.set_order(position);
        }
        self.signers.push(signer);
        Ok(())
    }

    /// Add a recipient who receives a copy. Outside templates the recipient
    /// needs a name and an email.
    pub fn append_recipient(&mut self, recipient: Recipient) -> Result<()> {
        if !self.is_template() && !recipient.has_contact() {
            return Err(EversignError::invalid(
                "Recipient needs at least a Name and an E-Mail address",
            ));
        }
        self.recipients.push(recipient);
        Ok(())
    }

    /// Add a file. It needs a source; the name defaults to the base name of
    /// a local path.
    pub fn append_file(&mut self, mut file: File) -> Result<()> {
        if file.source().is_none() {
            return Err(EversignError::invalid(
                "File object needs a real File to be associated",
            ));
        }
        if file.name().is_none() {
            match file.path_base_name() {
                Some(name) => file.set_name(name),
                None => return Err(EversignError::invalid("File object needs a name")),
            }
        }
        self.files.push(file);
        Ok(())
    }

    /// Place a form field on one of the appended files.
    ///
    /// The field's file index must point at an appended file and the field
    /// must [validate](crate::fields::Positioned::validate). Fields without
    /// an identifier get `<TypeName>_<n>`, where `n` is the number of fields
    /// already on the document.
    pub fn append_form_field(&mut self, field: impl Into<FormField>) -> Result<()> {
        let mut field = field.into();
        let file_index = field.file_index();
        if self.files.is_empty() || file_index >= self.files.len() {
            return Err(EversignError::invalid(format!(
                "Please check that at least 1 File was added and the file index {file_index} \
                 refers to one of the {} files",
                self.files.len()
            )));
        }
        if !field.validate() {
            return Err(EversignError::invalid(
                "Please check that all required FormField Properties are set",
            ));
        }
        if field.identifier().is_none_or(str::is_empty) {
            let identifier = format!("{}_{}", field.kind().type_name(), self.field_count());
            field.as_positioned_mut().set_identifier(&identifier);
        }

        if self.fields.len() <= file_index {
            self.fields.resize_with(file_index + 1, Vec::new);
        }
        self.fields[file_index].push(field);
        Ok(())
    }

    /// Total number of form fields across all files.
    pub fn field_count(&self) -> usize {
        self.fields.iter().map(Vec::len).sum()
    }

    pub fn signers(&self) -> &[Signer] {
        &self.signers
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub(crate) fn files_mut(&mut self) -> &mut [File] {
        &mut self.files
    }

    /// Form fields grouped by file index.
    pub fn fields(&self) -> &[Vec<FormField>] {
        &self.fields
    }

    /// Form fields placed on one file.
    pub fn fields_for_file(&self, file_index: usize) -> &[FormField] {
        self.fields.get(file_index).map(Vec::as_slice).unwrap_or_default()
    }

    /// All form fields in file order.
    pub fn form_fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter().flatten()
    }

    /// Audit log entries. Populated by the service.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    // ---- meta -----------------------------------------------------------

    pub fn meta(&self) -> &HashMap<String, String> {
        &self.meta
    }

    pub fn set_meta(&mut self, meta: HashMap<String, String>) {
        self.meta = meta;
    }

    /// Add or replace one meta tag.
    pub fn append_meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta.insert(key.into(), value.into());
    }

    /// Remove a meta tag, returning its value.
    pub fn remove_meta(&mut self, key: &str) -> Option<String> {
        self.meta.remove(key)
    }

    // ---- server state ---------------------------------------------------

    /// Unique hash assigned by the service.
    pub fn document_hash(&self) -> Option<&str> {
        self.document_hash.as_deref()
    }

    pub fn set_document_hash(&mut self, document_hash: impl Into<String>) {
        self.document_hash = Some(document_hash.into());
    }

    pub fn requester_email(&self) -> Option<&str> {
        self.requester_email.as_deref()
    }

    pub fn set_requester_email(&mut self, email: impl Into<String>) {
        self.requester_email = Some(email.into());
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed.unwrap_or(false)
    }

    pub fn is_archived(&self) -> bool {
        self.is_archived.unwrap_or(false)
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted.unwrap_or(false)
    }

    pub fn is_trashed(&self) -> bool {
        self.is_trashed.unwrap_or(false)
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled.unwrap_or(false)
    }

    /// Claim URL of an embedded request.
    pub fn embedded_claim_url(&self) -> Option<&str> {
        self.embedded_claim_url.as_deref()
    }

    pub fn set_embedded_claim_url(&mut self, url: impl Into<String>) {
        self.embedded_claim_url = Some(url.into());
    }

    // ---- settings -------------------------------------------------------

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

    pub fn custom_requester_name(&self) -> Option<&str> {
        self.custom_requester_name.as_deref()
    }

    pub fn set_custom_requester_name(&mut self, name: impl Into<String>) {
        self.custom_requester_name = Some(name.into());
    }

    pub fn custom_requester_email(&self) -> Option<&str> {
        self.custom_requester_email.as_deref()
    }

    pub fn set_custom_requester_email(&mut self, email: impl Into<String>) {
        self.custom_requester_email = Some(email.into());
    }

    /// Sandbox documents are not legally binding and do not count against
    /// the quota.
    pub fn sandbox(&self) -> bool {
        self.sandbox
    }

    pub fn set_sandbox(&mut self, sandbox: bool) {
        self.sandbox = sandbox;
    }

    pub fn is_draft(&self) -> bool {
        self.is_draft
    }

    pub fn set_is_draft(&mut self, is_draft: bool) {
        self.is_draft = is_draft;
    }

    /// Templates accept role-only signers and recipients.
    pub fn is_template(&self) -> bool {
        self.is_template.unwrap_or(false)
    }

    pub fn set_is_template(&mut self, is_template: bool) {
        self.is_template = Some(is_template);
    }

    pub fn embedded(&self) -> bool {
        self.embedded.unwrap_or(false)
    }

    pub fn set_embedded(&mut self, embedded: bool) {
        self.embedded = Some(embedded);
    }

    pub fn use_signer_order(&self) -> bool {
        self.use_signer_order
    }

    pub fn set_use_signer_order(&mut self, use_signer_order: bool) {
        self.use_signer_order = use_signer_order;
    }

    pub fn reminders(&self) -> bool {
        self.reminders
    }

    pub fn set_reminders(&mut self, reminders: bool) {
        self.reminders = reminders;
    }

    pub fn require_all_signers(&self) -> bool {
        self.require_all_signers
    }

    pub fn set_require_all_signers(&mut self, require_all_signers: bool) {
        self.require_all_signers = require_all_signers;
    }

    /// Where signers land after signing.
    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    pub fn set_redirect(&mut self, redirect: impl Into<String>) {
        self.redirect = Some(redirect.into());
    }

    /// Where signers land after declining.
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

    /// Expiration time. Sent as unix seconds.
    pub fn set_expires(&mut self, expires: DateTime<Utc>) {
        self.expires = Some(expires);
    }

    pub fn embedded_signing_enabled(&self) -> bool {
        self.embedded_signing_enabled.unwrap_or(false)
    }

    pub fn set_embedded_signing_enabled(&mut self, enabled: bool) {
        self.embedded_signing_enabled = Some(enabled);
    }

    pub fn flexible_signing(&self) -> bool {
        self.flexible_signing.unwrap_or(false)
    }

    /// Let signers place their own signature fields.
    pub fn set_flexible_signing(&mut self, flexible_signing: bool) {
        self.flexible_signing = Some(flexible_signing);
    }

    pub fn use_hidden_tags(&self) -> bool {
        self.use_hidden_tags.unwrap_or(false)
    }

    /// Place fields from text tags hidden in the uploaded files.
    pub fn set_use_hidden_tags(&mut self, use_hidden_tags: bool) {
        self.use_hidden_tags = Some(use_hidden_tags);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{
        CheckboxField, DropdownField, Positioned, Requireable, Signable, SignatureField, TextField,
    };
    use chrono::TimeZone;

    fn signature_field(file_index: usize) -> SignatureField {
        let mut field = SignatureField::default();
        field.set_file_index(file_index);
        field.set_page(1);
        field.set_x(30.0);
        field.set_y(150.0);
        field.set_required(true);
        field.set_signer("1");
        field
    }

    fn document_with_file() -> Document {
        let mut document = Document::new();
        document.set_title("Form Test");
        document
            .append_signer(Signer::with_contact("Jane Doe", "jane@example.com"))
            .unwrap();
        document
            .append_file(File::from_id("contract.pdf", "file_1"))
            .unwrap();
        document
    }

    #[test]
    fn test_form_field_identifiers_follow_field_count() {
        let mut document = document_with_file();

        document.append_form_field(signature_field(0)).unwrap();
        document.append_form_field(signature_field(0)).unwrap();

        let identifiers: Vec<_> = document.form_fields().map(|f| f.identifier()).collect();
        assert_eq!(
            identifiers,
            [Some("SignatureField_0"), Some("SignatureField_1")]
        );
    }

    #[test]
    fn test_explicit_identifier_is_kept() {
        let mut document = document_with_file();
        let mut field = signature_field(0);
        field.set_identifier("customer_signature");
        document.append_form_field(field).unwrap();

        let mut text = TextField::default();
        text.set_x(1.0);
        text.set_y(1.0);
        document.append_form_field(text).unwrap();

        let identifiers: Vec<_> = document.form_fields().map(|f| f.identifier()).collect();
        assert_eq!(identifiers, [Some("customer_signature"), Some("TextField_1")]);
    }

    #[test]
    fn test_form_field_requires_appended_file() {
        let mut document = Document::new();
        let err = document.append_form_field(signature_field(0)).unwrap_err();
        assert!(err.is_local());

        let mut document = document_with_file();
        assert!(document.append_form_field(signature_field(1)).is_err());
        assert_eq!(document.field_count(), 0);
    }

    #[test]
    fn test_form_field_must_validate() {
        let mut document = document_with_file();
        let field = SignatureField::default();
        assert!(document.append_form_field(field).is_err());
        assert_eq!(document.field_count(), 0);
    }

    #[test]
    fn test_signer_requires_contact_outside_templates() {
        let mut document = Document::new();
        assert!(document.append_signer(Signer::with_role("client")).is_err());
        assert!(document.signers().is_empty());

        document.set_is_template(true);
        document.append_signer(Signer::with_role("client")).unwrap();
        assert_eq!(document.signers().len(), 1);
    }

    #[test]
    fn test_signers_are_numbered() {
        let mut document = Document::new();
        document
            .append_signer(Signer::with_contact("A", "a@example.com"))
            .unwrap();
        let mut second = Signer::with_contact("B", "b@example.com");
        second.set_order(5);
        document.append_signer(second).unwrap();

        let signers = document.signers();
        assert_eq!((signers[0].id(), signers[0].order()), (Some(1), Some(1)));
        assert_eq!((signers[1].id(), signers[1].order()), (Some(2), Some(5)));
    }

    #[test]
    fn test_recipient_requires_contact() {
        let mut document = Document::new();
        assert!(document.append_recipient(Recipient::new()).is_err());
        document
            .append_recipient(Recipient::with_contact("C", "c@example.com"))
            .unwrap();
        assert_eq!(document.recipients().len(), 1);
    }

    #[test]
    fn test_file_requires_source_and_name() {
        let mut document = Document::new();
        assert!(document.append_file(File::new()).is_err());

        let mut nameless = File::new();
        nameless.set_file_url("https://example.com/a.pdf");
        assert!(document.append_file(nameless).is_err());

        let tmp = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        document.append_file(File::from_path(tmp.path()).unwrap()).unwrap();
        let expected = tmp.path().file_name().unwrap().to_string_lossy();
        assert_eq!(document.files()[0].name(), Some(expected.as_ref()));
    }

    #[test]
    fn test_meta_operations() {
        let mut document = Document::new();
        document.append_meta("ref", "A-1");
        document.append_meta("ref", "A-2");
        document.append_meta("team", "sales");
        assert_eq!(document.meta()["ref"], "A-2");
        assert_eq!(document.remove_meta("team").as_deref(), Some("sales"));
        assert_eq!(document.meta().len(), 1);
    }

    #[test]
    fn test_serialization_shape() {
        let mut document = document_with_file();
        document.set_sandbox(true);
        document.append_form_field(signature_field(0)).unwrap();

        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["title"], "Form Test");
        assert_eq!(json["sandbox"], 1);
        assert_eq!(json["is_draft"], 0);
        assert_eq!(json["client"], DEFAULT_CLIENT);
        assert!(json.get("is_deleted").is_none());
        assert!(json.get("log").is_none());
        assert_eq!(json["fields"][0][0]["type"], "signature");
        assert_eq!(json["fields"][0][0]["identifier"], "SignatureField_0");
        assert!(json["fields"][0][0].get("file_index").is_none());
    }

    #[test]
    fn test_round_trip_preserves_client_fields() {
        let mut document = document_with_file();
        document
            .append_file(File::from_id("annex.pdf", "file_2"))
            .unwrap();
        document.set_message("Please sign");
        document.set_use_signer_order(true);
        document.set_flexible_signing(false);
        document.set_expires(Utc.timestamp_opt(1_900_000_000, 0).unwrap());
        document.append_meta("ref", "A-1");
        document
            .append_recipient(Recipient::with_contact("C", "c@example.com"))
            .unwrap();

        document.append_form_field(signature_field(0)).unwrap();

        let mut checkbox = CheckboxField::default();
        checkbox.set_file_index(1);
        checkbox.set_x(10.0);
        checkbox.set_y(20.0);
        checkbox.set_checked(true);
        document.append_form_field(checkbox).unwrap();

        let mut dropdown = DropdownField::default();
        dropdown.set_file_index(1);
        dropdown.set_page(2);
        dropdown.set_x(40.0);
        dropdown.set_y(60.0);
        dropdown.set_options(["Yes", "No"]);
        dropdown.set_selected("No").unwrap();
        document.append_form_field(dropdown).unwrap();

        let json = serde_json::to_string(&document).unwrap();
        let decoded: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, document);
        assert_eq!(decoded.fields_for_file(1)[1].file_index(), 1);
    }

    #[test]
    fn test_decode_server_response() {
        let json = r#"{
            "document_hash": "sPyB2dJd2lOfjDKOWPCx8aGrwZ8czPSu",
            "requester_email": "owner@example.com",
            "created": 1500000000,
            "is_draft": 0,
            "is_completed": "1",
            "is_deleted": false,
            "title": "Contract",
            "signers": [{"id": 1, "name": "Jane", "email": "jane@example.com",
                         "signed": 1, "signed_timestamp": "1500000100"}],
            "recipients": null,
            "files": [{"name": "contract.pdf", "file_id": "abc", "pages": 2}],
            "fields": {"1": [{"type": "text", "identifier": "t", "page": 1, "width": 120,
                              "height": 19, "x": 1, "y": 2, "text_font": "arial"}]},
            "log": [{"event": "document_created", "timestamp": 1500000000}],
            "meta": []
        }"#;

        let document: Document = serde_json::from_str(json).unwrap();
        assert_eq!(
            document.document_hash(),
            Some("sPyB2dJd2lOfjDKOWPCx8aGrwZ8czPSu")
        );
        assert!(document.is_completed());
        assert!(!document.is_deleted());
        assert_eq!(document.created().unwrap().timestamp(), 1_500_000_000);
        assert!(document.signers()[0].signed());
        assert!(document.recipients().is_empty());
        assert!(document.fields_for_file(0).is_empty());
        assert_eq!(document.fields_for_file(1)[0].file_index(), 1);
        assert_eq!(document.log()[0].event, "document_created");
        assert!(document.meta().is_empty());
    }

    #[test]
    fn test_decode_rejects_out_of_range_file_index() {
        for key in ["18446744073709551615", "100000000", "1024", "-1"] {
            let json = format!(r#"{{"fields": {{"{key}": []}}}}"#);
            let err = serde_json::from_str::<Document>(&json).unwrap_err();
            assert!(err.to_string().contains("invalid file index"), "{key}: {err}");
        }

        let document: Document = serde_json::from_str(r#"{"fields": {"1023": []}}"#).unwrap();
        assert_eq!(document.fields().len(), 1024);
    }
}
