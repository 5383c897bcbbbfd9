//! Integration tests for document operations.

use eversign::fields::{Positioned, Requireable, Signable};
use eversign::{
    Client, ClientConfig, Document, DocumentFilter, DocumentTemplate, EversignError, File,
    FormField, MergeField, SignatureField, Signer,
};
use std::io::Write;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HASH: &str = "sPyB2dJd2lOfjDKOWPCx8aGrwZ8czPSu";

fn create_mock_document(hash: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "document_hash": hash,
        "requester_email": "owner@example.com",
        "is_draft": 0,
        "is_completed": 0,
        "is_archived": 0,
        "is_deleted": 0,
        "is_trashed": 0,
        "is_cancelled": 0,
        "embedded": 0,
        "title": title,
        "use_signer_order": 0,
        "reminders": 0,
        "require_all_signers": 0,
        "created": 1500000000,
        "signers": [{
            "id": 1,
            "name": "Jane Doe",
            "email": "jane@example.com",
            "order": 1,
            "signed": 0,
            "declined": 0,
            "sent": 1,
            "viewed": 0,
            "status": "waiting_for_signature",
            "embedded_signing_url": null,
            "language": "en"
        }],
        "recipients": [],
        "files": [{ "name": "contract.pdf", "file_id": "file_1", "pages": 1 }],
        "fields": [[{
            "type": "signature",
            "identifier": "SignatureField_0",
            "page": 1,
            "width": 120,
            "height": 35,
            "x": 30,
            "y": 150,
            "signer": "1",
            "required": 1
        }]],
        "log": [{ "event": "document_created", "signer": null, "timestamp": 1500000000 }],
        "meta": []
    })
}

async fn connected_client(mock_server: &MockServer) -> Client {
    Mock::given(method("GET"))
        .and(path("/api/business"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "business_id": 1337, "business_name": "Test", "is_primary": 1 }
        ])))
        .mount(mock_server)
        .await;

    Client::connect_with_config(
        "test_key",
        ClientConfig {
            base_url: Some(format!("{}/api", mock_server.uri())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

fn signature_field() -> SignatureField {
    let mut field = SignatureField::default();
    field.set_page(1);
    field.set_x(30.0);
    field.set_y(150.0);
    field.set_required(true);
    field.set_signer("1");
    field
}

fn document_with_hash(hash: &str) -> Document {
    let mut document = Document::new();
    document.set_document_hash(hash);
    document
}

#[tokio::test]
async fn test_list_documents_by_filter() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/document"))
        .and(query_param("access_key", "test_key"))
        .and(query_param("business_id", "1337"))
        .and(query_param("type", "waiting_for_others"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            create_mock_document(HASH, "Contract")
        ])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let documents = client.documents().list_waiting_for_others().await.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].title(), Some("Contract"));

    let documents = client
        .documents()
        .list(DocumentFilter::WaitingForOthers)
        .await
        .unwrap();
    assert_eq!(documents[0].document_hash(), Some(HASH));
}

#[tokio::test]
async fn test_get_document_by_hash() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api/document"))
        .and(query_param("document_hash", HASH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(create_mock_document(HASH, "Contract")),
        )
        .mount(&mock_server)
        .await;

    let document = client.documents().get_by_hash(HASH).await.unwrap();
    assert_eq!(document.signers()[0].status(), Some("waiting_for_signature"));
    assert_eq!(document.log()[0].event, "document_created");

    let fields: Vec<&FormField> = document.form_fields().collect();
    assert_eq!(fields.len(), 1);
    match fields[0] {
        FormField::Signature(field) => {
            assert_eq!(field.identifier(), Some("SignatureField_0"));
            assert_eq!(field.signer(), Some("1"));
            assert!(field.required());
        }
        other => panic!("expected a signature field, got {:?}", other.kind()),
    }
}

#[tokio::test]
async fn test_create_document_uploads_local_files_first() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/file"))
        .and(query_param("business_id", "1337"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "file_id": "uploaded_1",
            "file_name": "contract.pdf",
            "pages": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/document"))
        .and(query_param("business_id", "1337"))
        .and(body_partial_json(serde_json::json!({
            "title": "Form Test",
            "client": "rust-sdk",
            "files": [{ "name": "contract.pdf", "file_id": "uploaded_1" }],
            "signers": [{ "name": "Jane Doe", "email": "jane@example.com", "id": 1, "order": 1 }],
            "fields": [[{ "type": "signature", "identifier": "SignatureField_0", "required": 1 }]]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(create_mock_document(HASH, "Form Test")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut pdf = tempfile::NamedTempFile::new().unwrap();
    pdf.write_all(b"%PDF-1.4 test").unwrap();

    let mut file = File::from_path(pdf.path()).unwrap();
    file.set_name("contract.pdf");

    let mut document = Document::new();
    document.set_title("Form Test");
    document
        .append_signer(Signer::with_contact("Jane Doe", "jane@example.com"))
        .unwrap();
    document.append_file(file).unwrap();
    document.append_form_field(signature_field()).unwrap();

    let created = client.documents().create(&document).await.unwrap();
    assert_eq!(created.document_hash(), Some(HASH));
    assert!(document.document_hash().is_none());
    assert_eq!(document.files()[0].file_path(), Some(pdf.path()));
}

#[tokio::test]
async fn test_create_document_requires_signer() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/document"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client.documents().create(&Document::new()).await.unwrap_err();
    assert!(err.is_local());
}

#[tokio::test]
async fn test_update_document_uses_put() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("PUT"))
        .and(path("/api/document"))
        .and(body_partial_json(serde_json::json!({ "document_hash": HASH })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(create_mock_document(HASH, "Renamed")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut document = document_with_hash(HASH);
    document.set_title("Renamed");
    document
        .append_signer(Signer::with_contact("Jane Doe", "jane@example.com"))
        .unwrap();

    let updated = client.documents().update(&document).await.unwrap();
    assert_eq!(updated.title(), Some("Renamed"));
}

#[tokio::test]
async fn test_create_document_from_template() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/document"))
        .and(body_partial_json(serde_json::json!({
            "template_id": "tpl_1",
            "signers": [{ "role": "Tenant", "name": "Jane Doe" }],
            "fields": [{ "identifier": "rent", "value": "950" }]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(create_mock_document(HASH, "Lease")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut template = DocumentTemplate::new("tpl_1");
    let mut tenant = Signer::with_role("Tenant");
    tenant.set_name("Jane Doe");
    tenant.set_email("jane@example.com");
    template.append_signer(tenant).unwrap();
    template.append_field(MergeField::new("rent", "950"));

    let document = client
        .documents()
        .create_from_template(&template)
        .await
        .unwrap();
    assert_eq!(document.title(), Some("Lease"));
}

#[tokio::test]
async fn test_create_from_template_preconditions() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    let mut template = DocumentTemplate::default();
    template.append_signer(Signer::with_role("Tenant")).unwrap();
    let err = client
        .documents()
        .create_from_template(&template)
        .await
        .unwrap_err();
    assert!(err.is_local());

    let template = DocumentTemplate::new("tpl_1");
    let err = client
        .documents()
        .create_from_template(&template)
        .await
        .unwrap_err();
    assert!(err.is_local());
}

#[tokio::test]
async fn test_delete_draft_document() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/document"))
        .and(query_param("document_hash", HASH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut document = document_with_hash(HASH);
    document.set_is_draft(true);
    assert!(client.documents().delete(&document).await.unwrap());
}

#[tokio::test]
async fn test_delete_rules() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/document"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Missing hash
    let mut document = Document::new();
    document.set_is_draft(true);
    assert!(client.documents().delete(&document).await.unwrap_err().is_local());

    // Neither draft nor cancelled
    let document = document_with_hash(HASH);
    assert!(client.documents().delete(&document).await.unwrap_err().is_local());

    // Already deleted, whatever the other flags say
    let deleted: Document = serde_json::from_value(serde_json::json!({
        "document_hash": HASH,
        "is_draft": 1,
        "is_cancelled": 1,
        "is_deleted": 1
    }))
    .unwrap();
    assert!(client.documents().delete(&deleted).await.unwrap_err().is_local());
    assert!(client.documents().cancel(&deleted).await.unwrap_err().is_local());
}

#[tokio::test]
async fn test_cancel_document() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/document"))
        .and(query_param("document_hash", HASH))
        .and(query_param("cancel", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": 1 })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let document = document_with_hash(HASH);
    assert!(client.documents().cancel(&document).await.unwrap());
}

#[tokio::test]
async fn test_send_reminder() {
    let mock_server = MockServer::start().await;
    let client = connected_client(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/send_reminder"))
        .and(query_param("business_id", "1337"))
        .and(body_partial_json(serde_json::json!({
            "document_hash": HASH,
            "signer_id": 1
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let document: Document =
        serde_json::from_value(create_mock_document(HASH, "Contract")).unwrap();
    let signer = document.signers()[0].clone();
    assert!(client.documents().send_reminder(&document, &signer).await.unwrap());

    let without_signers = document_with_hash(HASH);
    let err = client
        .documents()
        .send_reminder(&without_signers, &signer)
        .await
        .unwrap_err();
    assert!(matches!(err, EversignError::InvalidRequest(_)));
}
