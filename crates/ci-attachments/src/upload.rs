//! Uploaded file descriptor

use bytes::Bytes;
use ci_models::NewImage;

/// One file received from a client, before encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Bytes,
    /// Content type declared by the client, if any
    pub content_type: Option<String>,
    /// Original filename, if any
    pub filename: Option<String>,
}

impl ImageUpload {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
            filename: None,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Declared type, else a guess from the filename, else octet-stream
    pub fn resolved_content_type(&self) -> String {
        self.content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .map(String::from)
            .unwrap_or_else(|| {
                self.filename
                    .as_deref()
                    .map(|name| mime_guess::from_path(name).first_or_octet_stream())
                    .unwrap_or(mime::APPLICATION_OCTET_STREAM)
                    .to_string()
            })
    }

    /// Encode into the form the store persists
    pub fn encode(&self) -> NewImage {
        NewImage::from_bytes(&self.bytes, self.resolved_content_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_content_type_wins() {
        let upload = ImageUpload::new(&b"x"[..])
            .content_type("image/webp")
            .filename("photo.png");
        assert_eq!(upload.resolved_content_type(), "image/webp");
    }

    #[test]
    fn test_content_type_guessed_from_filename() {
        let upload = ImageUpload::new(&b"x"[..]).filename("photo.jpg");
        assert_eq!(upload.resolved_content_type(), "image/jpeg");
    }

    #[test]
    fn test_content_type_fallback() {
        let upload = ImageUpload::new(&b"x"[..]).content_type("  ");
        assert_eq!(upload.resolved_content_type(), "application/octet-stream");
    }

    #[test]
    fn test_encode() {
        let upload = ImageUpload::new(&b"hello"[..]).filename("hello.png");
        let image = upload.encode();
        assert_eq!(image.data, "aGVsbG8=");
        assert_eq!(image.content_type, "image/png");
    }
}
