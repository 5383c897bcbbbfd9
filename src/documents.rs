//! Document operations.
//!
//! This module provides the DocumentsClient for listing, creating, updating,
//! cancelling, deleting and downloading documents.

use crate::client::Client;
use crate::document::Document;
use crate::error::{EversignError, Result};
use crate::files::FilesClient;
use crate::recipient::Signer;
use crate::request::{
    ApiRequest, DOCUMENT_ENDPOINT, DOWNLOAD_FINAL_ENDPOINT, DOWNLOAD_RAW_ENDPOINT,
    REMINDER_ENDPOINT,
};
use crate::template::DocumentTemplate;
use crate::types::{DocumentFilter, DocumentUrl, OperationResult};
use reqwest::{Method, Response};
use serde::Serialize;
use std::path::Path;

/// `document_id` value that selects the audit trail of a final document.
const AUDIT_TRAIL_DOCUMENT_ID: &str = "AT";

/// Client for document operations.
///
/// Access via `client.documents()`. Every call is scoped to the client's
/// selected business.
pub struct DocumentsClient {
    client: Client,
}

fn require_hash(document: &Document) -> Result<&str> {
    document
        .document_hash()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| EversignError::invalid("The operation requires the Document Hash"))
}

fn require_completed(document: &Document) -> Result<()> {
    if !document.is_completed() {
        return Err(EversignError::invalid(
            "To Download the final File the Document needs to be completed first",
        ));
    }
    Ok(())
}

impl DocumentsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    // ---- listing --------------------------------------------------------

    /// List documents matching a filter. Deleted documents are never listed.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use eversign::{Client, DocumentFilter};
    ///
    /// # async fn run() -> eversign::Result<()> {
    /// let client = Client::connect("YOUR_ACCESS_KEY").await?;
    /// let waiting = client.documents().list(DocumentFilter::WaitingForOthers).await?;
    /// println!("{} documents waiting", waiting.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(&self, filter: DocumentFilter) -> Result<Vec<Document>> {
        self.client
            .scoped(Method::GET, DOCUMENT_ENDPOINT)?
            .query("type", filter.as_str())
            .start_request()
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<Document>> {
        self.list(DocumentFilter::All).await
    }

    pub async fn list_completed(&self) -> Result<Vec<Document>> {
        self.list(DocumentFilter::Completed).await
    }

    pub async fn list_drafts(&self) -> Result<Vec<Document>> {
        self.list(DocumentFilter::Drafts).await
    }

    pub async fn list_cancelled(&self) -> Result<Vec<Document>> {
        self.list(DocumentFilter::Cancelled).await
    }

    /// Documents waiting for an action of the current user.
    pub async fn list_action_required(&self) -> Result<Vec<Document>> {
        self.list(DocumentFilter::ActionRequired).await
    }

    /// Documents waiting for other signers.
    pub async fn list_waiting_for_others(&self) -> Result<Vec<Document>> {
        self.list(DocumentFilter::WaitingForOthers).await
    }

    pub async fn list_templates(&self) -> Result<Vec<Document>> {
        self.list(DocumentFilter::Templates).await
    }

    pub async fn list_archived_templates(&self) -> Result<Vec<Document>> {
        self.list(DocumentFilter::ArchivedTemplates).await
    }

    pub async fn list_draft_templates(&self) -> Result<Vec<Document>> {
        self.list(DocumentFilter::DraftTemplates).await
    }

    /// Fetch one document by its hash.
    pub async fn get_by_hash(&self, document_hash: &str) -> Result<Document> {
        self.client
            .scoped(Method::GET, DOCUMENT_ENDPOINT)?
            .query("document_hash", document_hash)
            .start_request()
            .await
    }

    // ---- create / update ------------------------------------------------

    /// Create a document and return the service's copy of it.
    ///
    /// Files that point at a local path are uploaded first. The passed
    /// document is left untouched.
    pub async fn create(&self, document: &Document) -> Result<Document> {
        self.send_document(Method::POST, document).await
    }

    /// Replace a document and return the service's copy of it.
    ///
    /// Files that point at a local path are uploaded first.
    pub async fn update(&self, document: &Document) -> Result<Document> {
        self.send_document(Method::PUT, document).await
    }

    async fn send_document(&self, method: Method, document: &Document) -> Result<Document> {
        if document.signers().is_empty() {
            return Err(EversignError::invalid(
                "Document needs at least 1 Signer to be created",
            ));
        }
        let request = self.client.scoped(method, DOCUMENT_ENDPOINT)?;

        let mut payload = document.clone();
        let files = FilesClient::new(self.client.clone());
        for file in payload.files_mut() {
            if file.needs_upload() {
                *file = files.upload(file).await?;
            }
        }

        request.json(&payload)?.start_request().await
    }

    /// Create a document from a template.
    pub async fn create_from_template(&self, template: &DocumentTemplate) -> Result<Document> {
        if template.template_id().is_none_or(str::is_empty) {
            return Err(EversignError::invalid(
                "Template needs a Template Id to create a document from it",
            ));
        }
        if template.signers().is_empty() {
            return Err(EversignError::invalid(
                "Template needs at least 1 Signer to create a Document",
            ));
        }

        self.client
            .scoped(Method::POST, DOCUMENT_ENDPOINT)?
            .json(template)?
            .start_request()
            .await
    }

    // ---- cancel / delete ------------------------------------------------

    /// Delete a draft or cancelled document.
    pub async fn delete(&self, document: &Document) -> Result<bool> {
        let hash = require_hash(document)?;
        if document.is_deleted() {
            return Err(EversignError::invalid("The Document has been deleted already"));
        }
        if !document.is_draft() && !document.is_cancelled() {
            return Err(EversignError::invalid(
                "Only Drafts and cancelled Documents can be deleted",
            ));
        }

        let result: OperationResult = self
            .client
            .scoped(Method::DELETE, DOCUMENT_ENDPOINT)?
            .query("document_hash", hash)
            .start_request()
            .await?;
        Ok(result.success)
    }

    /// Cancel a pending document. Cancelled documents can then be deleted.
    pub async fn cancel(&self, document: &Document) -> Result<bool> {
        let hash = require_hash(document)?;
        if document.is_deleted() {
            return Err(EversignError::invalid("The Document has been deleted already"));
        }

        let result: OperationResult = self
            .client
            .scoped(Method::DELETE, DOCUMENT_ENDPOINT)?
            .query("document_hash", hash)
            .query("cancel", 1)
            .start_request()
            .await?;
        Ok(result.success)
    }

    // ---- reminders ------------------------------------------------------

    /// Remind a signer of a pending document.
    pub async fn send_reminder(&self, document: &Document, signer: &Signer) -> Result<bool> {
        #[derive(Serialize)]
        struct ReminderRequest<'a> {
            document_hash: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            signer_id: Option<i64>,
        }

        let document_hash = document
            .document_hash()
            .filter(|h| !h.is_empty() && !document.signers().is_empty())
            .ok_or_else(|| {
                EversignError::invalid(
                    "Sending Reminders requires the Document Hash and an appropriate Signer",
                )
            })?;

        let result: OperationResult = self
            .client
            .scoped(Method::POST, REMINDER_ENDPOINT)?
            .json(&ReminderRequest {
                document_hash,
                signer_id: signer.id(),
            })?
            .start_request()
            .await?;
        Ok(result.success)
    }

    // ---- downloads ------------------------------------------------------

    fn download_request(
        &self,
        endpoint: &str,
        document: &Document,
        audit_trail: bool,
        document_id: Option<&str>,
    ) -> Result<ApiRequest<'_>> {
        let hash = require_hash(document)?;
        let mut request = self
            .client
            .scoped(Method::GET, endpoint)?
            .query("document_hash", hash)
            .query("audit_trail", u8::from(audit_trail));
        if let Some(document_id) = document_id {
            request = request.query("document_id", document_id);
        }
        Ok(request)
    }

    /// Save the signed document to `path`, optionally with the audit trail
    /// appended. Returns whether the file was written.
    pub async fn download_final_document_to_path(
        &self,
        document: &Document,
        path: impl AsRef<Path>,
        audit_trail: bool,
    ) -> Result<bool> {
        require_completed(document)?;
        self.download_request(DOWNLOAD_FINAL_ENDPOINT, document, audit_trail, None)?
            .sink_to(path.as_ref())
            .await
    }

    /// Save only the audit trail of a completed document to `path`.
    pub async fn download_audit_trail_to_path(
        &self,
        document: &Document,
        path: impl AsRef<Path>,
    ) -> Result<bool> {
        require_completed(document)?;
        self.download_request(
            DOWNLOAD_FINAL_ENDPOINT,
            document,
            true,
            Some(AUDIT_TRAIL_DOCUMENT_ID),
        )?
        .sink_to(path.as_ref())
        .await
    }

    /// Save the original, unsigned document to `path`.
    pub async fn download_raw_document_to_path(
        &self,
        document: &Document,
        path: impl AsRef<Path>,
    ) -> Result<bool> {
        self.download_request(DOWNLOAD_RAW_ENDPOINT, document, false, None)?
            .sink_to(path.as_ref())
            .await
    }

    /// The signed document as bytes.
    pub async fn download_final_document(
        &self,
        document: &Document,
        audit_trail: bool,
    ) -> Result<Vec<u8>> {
        self.download_request(DOWNLOAD_FINAL_ENDPOINT, document, audit_trail, None)?
            .start_raw()
            .await
    }

    /// The signed document as a response whose body the caller streams,
    /// e.g. with [`Response::chunk`].
    pub async fn download_final_document_stream(
        &self,
        document: &Document,
        audit_trail: bool,
    ) -> Result<Response> {
        self.download_request(DOWNLOAD_FINAL_ENDPOINT, document, audit_trail, None)?
            .start_stream()
            .await
    }

    /// A temporary download URL for the signed document.
    pub async fn download_final_document_url(
        &self,
        document: &Document,
        audit_trail: bool,
    ) -> Result<DocumentUrl> {
        self.download_request(DOWNLOAD_FINAL_ENDPOINT, document, audit_trail, None)?
            .query("url_only", 1)
            .start_request()
            .await
    }
}
