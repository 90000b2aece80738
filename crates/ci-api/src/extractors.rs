//! Axum extractors for API handlers

use axum::{
    async_trait,
    extract::{
        multipart::{Field, MultipartError},
        FromRequest, FromRequestParts, Multipart, Path, Request,
    },
    http::request::Parts,
};
use ci_attachments::{CustomerImageService, ImageUpload};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: CustomerImageService,
}

impl AppState {
    pub fn new(service: CustomerImageService) -> Self {
        Self { service }
    }
}

/// Path parameters whose rejection is rendered in the response envelope
///
/// `IdPath(42)` for `/customers/:id`, `IdPath((7, 9))` for `/customers/:id/images/:image_id/...`.
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for IdPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(ids) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        Ok(IdPath(ids))
    }
}

/// Field names that carry files
const FILE_FIELDS: [&str; 2] = ["files", "files[]"];

/// Parsed multipart form: an optional `name` text field plus file parts
#[derive(Debug, Default)]
pub struct ImageForm {
    pub name: Option<String>,
    pub files: Vec<ImageUpload>,
}

impl ImageForm {
    async fn read_file(field: Field<'_>) -> Result<Option<ImageUpload>, ApiError> {
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        // Browsers send an empty part for an untouched file input
        let has_filename = filename.as_deref().is_some_and(|f| !f.is_empty());
        if bytes.is_empty() && !has_filename {
            return Ok(None);
        }

        let mut upload = ImageUpload::new(bytes);
        if let Some(content_type) = content_type {
            upload = upload.content_type(content_type);
        }
        if let Some(filename) = filename.filter(|f| !f.is_empty()) {
            upload = upload.filename(filename);
        }
        Ok(Some(upload))
    }
}

#[async_trait]
impl<S> FromRequest<S> for ImageForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e.body_text())))?;

        let mut form = ImageForm::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let field_name = field.name().unwrap_or_default().to_string();

            if FILE_FIELDS.contains(&field_name.as_str()) {
                if let Some(upload) = Self::read_file(field).await? {
                    form.files.push(upload);
                }
            } else if field_name == "name" {
                form.name = Some(field.text().await.map_err(multipart_error)?);
            } else {
                debug!(field = %field_name, "Ignoring unknown multipart field");
            }
        }

        Ok(form)
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError::bad_request(format!("Invalid multipart body: {}", err.body_text()))
}
