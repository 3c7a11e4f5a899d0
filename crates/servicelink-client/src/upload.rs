//! Multipart payloads.
//!
//! Kept independent of reqwest so forms can be assembled, inspected and
//! tested before they are sent. Conversion to a transport form happens at
//! send time, which is also where the boundary is chosen.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::ApiResult;

/// A file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Read a file from disk, naming the part after the file.
    pub async fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn into_part(self) -> ApiResult<Part> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        Ok(match self.mime_type {
            Some(mime) => part.mime_str(&mime)?,
            None => part,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormValue {
    Text(String),
    File(FileUpload),
}

/// Ordered multipart form of text fields and files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<(String, FormValue)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), FormValue::Text(value.into())));
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: FileUpload) -> Self {
        self.fields.push((name.into(), FormValue::File(file)));
        self
    }

    /// Add each file under the same field name.
    pub fn files(self, name: &str, files: impl IntoIterator<Item = FileUpload>) -> Self {
        files.into_iter().fold(self, |form, f| form.file(name, f))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Text value of the first field called `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, v)| match v {
            FormValue::Text(text) if n == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of file parts.
    pub fn file_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|(_, v)| matches!(v, FormValue::File(_)))
            .count()
    }

    pub(crate) fn into_reqwest(self) -> ApiResult<Form> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = match value {
                FormValue::Text(text) => form.text(name, text),
                FormValue::File(file) => form.part(name, file.into_part()?),
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_keeps_order_and_repeats() {
        let form = MultipartForm::new()
            .text("rating", "4.5")
            .files("images", [FileUpload::new("a.jpg", vec![1u8]), FileUpload::new("b.jpg", vec![2u8])])
            .text("bookingId", "b1");

        assert_eq!(form.field_names(), vec!["rating", "images", "images", "bookingId"]);
        assert_eq!(form.text_value("rating"), Some("4.5"));
        assert_eq!(form.text_value("images"), None);
        assert_eq!(form.file_count(), 2);
    }

    #[test]
    fn test_into_reqwest_rejects_bad_mime() {
        let form = MultipartForm::new().file(
            "image",
            FileUpload::new("x.png", vec![0u8; 4]).with_mime_type("not a mime"),
        );
        assert!(form.into_reqwest().is_err());
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proof.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let upload = tokio_test::block_on(FileUpload::from_path(&path)).unwrap();
        assert_eq!(upload.file_name, "proof.pdf");
        assert_eq!(upload.len(), 4);
        assert!(upload.mime_type.is_none());
    }
}
