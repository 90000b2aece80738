//! API routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{customers, images};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/customers", customers_router())
}

fn customers_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(customers::create_customer).get(customers::list_customers),
        )
        .route(
            "/:id",
            get(customers::get_customer).delete(customers::delete_customer),
        )
        .route(
            "/:id/images",
            post(images::add_images)
                .patch(images::add_images)
                .put(images::replace_images)
                .delete(images::delete_all_images),
        )
        .route("/:id/images/count", get(images::count_images))
        .route("/:id/images/:image_id/preview", get(images::preview_image))
}
