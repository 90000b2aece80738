//! Customer image handlers

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use ci_core::traits::Id;
use ci_models::Customer;

use crate::error::ApiResult;
use crate::extractors::{AppState, IdPath, ImageForm};
use crate::representers::{Envelope, ImageCountRepresenter};

/// Serve one image as raw bytes with its stored content type
///
/// GET /customers/:id/images/:image_id/preview
pub async fn preview_image(
    State(state): State<AppState>,
    IdPath((customer_id, image_id)): IdPath<(Id, Id)>,
) -> ApiResult<Response> {
    let content = state.service.get_image(customer_id, image_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, content.content_type),
            (header::CACHE_CONTROL, "private, max-age=0".to_string()),
        ],
        content.bytes,
    )
        .into_response())
}

/// Replace every image of a customer
///
/// PUT /customers/:id/images (multipart: `files`)
pub async fn replace_images(
    State(state): State<AppState>,
    IdPath(customer_id): IdPath<Id>,
    form: ImageForm,
) -> ApiResult<Envelope<Customer>> {
    let customer = state.service.replace_images(customer_id, form.files).await?;

    Ok(Envelope::success("Images replaced", customer))
}

/// Append images to a customer
///
/// PATCH|POST /customers/:id/images (multipart: `files`)
pub async fn add_images(
    State(state): State<AppState>,
    IdPath(customer_id): IdPath<Id>,
    form: ImageForm,
) -> ApiResult<Envelope<Customer>> {
    let customer = state.service.add_images(customer_id, form.files).await?;

    Ok(Envelope::success("Images added", customer))
}

/// DELETE /customers/:id/images
pub async fn delete_all_images(
    State(state): State<AppState>,
    IdPath(customer_id): IdPath<Id>,
) -> ApiResult<Envelope<()>> {
    state.service.delete_all_images(customer_id).await?;

    Ok(Envelope::done("Images deleted"))
}

/// GET /customers/:id/images/count
pub async fn count_images(
    State(state): State<AppState>,
    IdPath(customer_id): IdPath<Id>,
) -> ApiResult<Envelope<ImageCountRepresenter>> {
    let count = state.service.count_images(customer_id).await?;

    Ok(Envelope::success(
        "Image count retrieved",
        ImageCountRepresenter::new(customer_id, count),
    ))
}
