//! # Eversign Rust SDK
//!
//! Typed client for the eversign electronic signature API.
//!
//! Documents are assembled locally (files, signers, recipients and form
//! fields, each checked as it is appended) and sent through a [`Client`],
//! which returns the service's canonical copy.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eversign::{Client, Document, File, Signer, SignatureField};
//! use eversign::fields::{Positioned, Requireable, Signable};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fetches the businesses of the key and selects the primary one
//!     let client = Client::connect("YOUR_ACCESS_KEY").await?;
//!
//!     let mut document = Document::new();
//!     document.set_title("Service agreement");
//!     document.set_sandbox(true);
//!     document.append_signer(Signer::with_contact("Jane Doe", "jane@example.com"))?;
//!     // Local files are uploaded when the document is created
//!     document.append_file(File::from_path("agreement.pdf")?)?;
//!
//!     let mut signature = SignatureField::default();
//!     signature.set_x(30.0);
//!     signature.set_y(150.0);
//!     signature.set_required(true);
//!     signature.set_signer("1");
//!     document.append_form_field(signature)?;
//!
//!     let created = client.documents().create(&document).await?;
//!     println!("Created document {:?}", created.document_hash());
//!     Ok(())
//! }
//! ```
//!
//! ## Templates
//!
//! ```rust,no_run
//! use eversign::{Client, DocumentTemplate, MergeField, Signer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::connect("YOUR_ACCESS_KEY").await?;
//!
//!     let mut template = DocumentTemplate::new("YOUR_TEMPLATE_ID");
//!     let mut tenant = Signer::with_role("Tenant");
//!     tenant.set_name("Jane Doe");
//!     tenant.set_email("jane@example.com");
//!     template.append_signer(tenant)?;
//!     template.append_field(MergeField::new("rent", "950"));
//!
//!     let document = client.documents().create_from_template(&template).await?;
//!     println!("Created document {:?}", document.document_hash());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, EversignError>`:
//!
//! ```rust,no_run
//! use eversign::{Client, EversignError};
//!
//! #[tokio::main]
//! async fn main() {
//!     match Client::connect("YOUR_ACCESS_KEY").await {
//!         Ok(client) => println!("{} businesses", client.businesses().len()),
//!         Err(EversignError::Api { code, kind, .. }) => println!("API error {code}: {kind}"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! Requests and responses are traced with [`tracing`] at `debug` level.
//! Credentials never appear in events.

pub mod client;
pub mod document;
pub mod documents;
pub mod error;
pub mod fields;
pub mod file;
pub mod files;
pub mod oauth;
pub mod recipient;
pub mod template;
pub mod types;

mod request;
mod wire;

// Re-export main types at the crate root
pub use client::{Client, ClientConfig};
pub use error::{EversignError, Result};

pub use document::Document;
pub use fields::{
    AttachmentField, CheckboxField, CheckboxGroupField, DateSignedField, DropdownField, FieldKind,
    FieldValidation, Font, FormField, InitialsField, NoteField, RadioField, SignatureField,
    TextField,
};
pub use file::{File, FileSource};
pub use oauth::OAuthTokenRequest;
pub use recipient::{Recipient, Signer};
pub use template::DocumentTemplate;
pub use types::{Business, DocumentFilter, DocumentUrl, Info, LogEntry, MergeField, OperationResult};
