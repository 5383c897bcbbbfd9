//! Create a sandbox document with a local PDF and a few form fields.
//!
//! ```sh
//! EVERSIGN_ACCESS_KEY=... SIGNER_EMAIL=... RUST_LOG=eversign=debug \
//!     cargo run --example create_document -- contract.pdf
//! ```

use chrono::{Duration, Utc};
use eversign::fields::{Positioned, Readable, Requireable, Signable, TextStyled};
use eversign::{
    CheckboxField, Client, ClientConfig, DateSignedField, Document, DropdownField, File,
    InitialsField, Recipient, SignatureField, Signer, TextField,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let access_key = std::env::var("EVERSIGN_ACCESS_KEY")?;
    let signer_email = std::env::var("SIGNER_EMAIL")?;
    let pdf = std::env::args().nth(1).unwrap_or_else(|| "raw.pdf".to_string());

    let client = Client::connect_with_config(access_key, ClientConfig::from_env()?).await?;

    let mut document = Document::new();
    document.set_title("Form Test");
    document.set_sandbox(true);
    document.set_message("Test Message");
    document.set_require_all_signers(true);
    document.set_use_signer_order(true);
    document.set_expires(Utc::now() + Duration::days(14));
    document.append_meta("reference", "demo-1");

    let mut signer = Signer::with_contact("John Doe", &signer_email);
    signer.set_language("de")?;
    document.append_signer(signer)?;

    let mut recipient = Recipient::with_contact("John Doe Recipient", &signer_email);
    recipient.set_language("pt")?;
    document.append_recipient(recipient)?;

    let mut file = File::from_path(&pdf)?;
    file.set_name("Contract");
    document.append_file(file)?;

    let mut signature = SignatureField::default();
    signature.set_x(30.0);
    signature.set_y(150.0);
    signature.set_required(true);
    signature.set_signer("1");
    document.append_form_field(signature)?;

    let mut initials = InitialsField::default();
    initials.set_x(30.0);
    initials.set_y(250.0);
    initials.set_required(true);
    initials.set_signer("1");
    document.append_form_field(initials)?;

    let mut date_signed = DateSignedField::default();
    date_signed.set_x(30.0);
    date_signed.set_y(350.0);
    date_signed.set_signer("1");
    date_signed.set_text_size(16);
    date_signed.set_text_style("BU")?;
    document.append_form_field(date_signed)?;

    let mut text = TextField::default();
    text.set_x(30.0);
    text.set_y(450.0);
    text.set_signer("1");
    text.set_name("Company");
    text.set_value("ACME Inc.");
    text.set_read_only(true);
    text.set_text_font("courier_new")?;
    document.append_form_field(text)?;

    let mut checkbox = CheckboxField::default();
    checkbox.set_x(30.0);
    checkbox.set_y(550.0);
    checkbox.set_signer("1");
    checkbox.set_value("1")?;
    document.append_form_field(checkbox)?;

    let mut dropdown = DropdownField::default();
    dropdown.set_x(130.0);
    dropdown.set_y(550.0);
    dropdown.set_signer("1");
    dropdown.set_options(["Monthly", "Yearly"]);
    dropdown.set_selected("Yearly")?;
    document.append_form_field(dropdown)?;

    let created = client.documents().create(&document).await?;
    println!(
        "Created {:?} with {} fields",
        created.document_hash(),
        created.field_count()
    );
    for signer in created.signers() {
        println!(
            "  signer {:?} <{:?}>: {:?}",
            signer.name(),
            signer.email(),
            signer.status()
        );
    }

    Ok(())
}
