//! Create a document from a template, remind the signer, then cancel it.
//!
//! ```sh
//! EVERSIGN_ACCESS_KEY=... TEMPLATE_ID=... SIGNER_EMAIL=... \
//!     cargo run --example document_from_template
//! ```

use eversign::{Client, ClientConfig, DocumentTemplate, MergeField, Recipient, Signer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let access_key = std::env::var("EVERSIGN_ACCESS_KEY")?;
    let template_id = std::env::var("TEMPLATE_ID")?;
    let signer_email = std::env::var("SIGNER_EMAIL")?;

    let client = Client::connect_with_config(access_key, ClientConfig::from_env()?).await?;

    let mut template = DocumentTemplate::new(template_id);
    template.set_sandbox(true);
    template.set_title("Tenancy agreement");
    template.set_message("Please sign the agreement");

    let mut tenant = Signer::with_role("Tenant");
    tenant.set_name("Jane Doe");
    tenant.set_email(&signer_email);
    template.append_signer(tenant)?;

    let mut landlord = Recipient::with_contact("Landlord", &signer_email);
    landlord.set_role("Landlord");
    template.append_recipient(landlord)?;

    template.append_field(MergeField::new("rent", "950"));

    let documents = client.documents();
    let document = documents.create_from_template(&template).await?;
    println!("Created {:?}", document.document_hash());

    if let Some(signer) = document.signers().first() {
        let reminded = documents.send_reminder(&document, signer).await?;
        println!("Reminder sent: {reminded}");
    }

    let cancelled = documents.cancel(&document).await?;
    println!("Cancelled: {cancelled}");

    Ok(())
}
