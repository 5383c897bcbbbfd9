//! File uploads.

use crate::client::Client;
use crate::error::{EversignError, Result};
use crate::file::File;
use crate::request::FILE_ENDPOINT;
use reqwest::Method;
use serde_json::Value;

/// Client for file uploads.
///
/// Access via `client.files()`.
pub struct FilesClient {
    client: Client,
}

impl FilesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Upload a file that points at a local path.
    ///
    /// Returns a copy of the file that references the uploaded file id. The
    /// name defaults to the base name of the path.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use eversign::{Client, File};
    ///
    /// # async fn run() -> eversign::Result<()> {
    /// let client = Client::connect("YOUR_ACCESS_KEY").await?;
    /// let uploaded = client.files().upload(&File::from_path("contract.pdf")?).await?;
    /// println!("uploaded as {:?}", uploaded.file_id());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload(&self, file: &File) -> Result<File> {
        let path = file
            .file_path()
            .ok_or_else(|| EversignError::invalid("File needs a local file Path to be uploaded"))?;

        let response = self
            .client
            .scoped(Method::POST, FILE_ENDPOINT)?
            .start_multipart_upload(path)
            .await?;

        let file_id = match response.get("file_id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err(EversignError::Parse(response.to_string())),
        };

        let mut uploaded = file.clone();
        if uploaded.name().is_none() {
            if let Some(name) = file.path_base_name() {
                uploaded.set_name(name);
            }
        }
        uploaded.set_file_id(file_id);
        Ok(uploaded)
    }
}
