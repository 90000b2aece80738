//! Customer handlers

use axum::extract::State;
use ci_core::traits::Id;
use ci_models::Customer;

use crate::error::ApiResult;
use crate::extractors::{AppState, IdPath, ImageForm};
use crate::representers::Envelope;

/// Create a customer with its initial images
///
/// POST /customers (multipart: `name`, `files`)
pub async fn create_customer(
    State(state): State<AppState>,
    form: ImageForm,
) -> ApiResult<Envelope<Customer>> {
    let name = form.name.unwrap_or_default();
    let customer = state.service.create_customer(&name, form.files).await?;

    Ok(Envelope::success("Customer created", customer))
}

/// List all customers with their images
///
/// GET /customers
pub async fn list_customers(State(state): State<AppState>) -> ApiResult<Envelope<Vec<Customer>>> {
    let customers = state.service.list_customers().await?;

    Ok(Envelope::success("Customers retrieved", customers))
}

/// GET /customers/:id
pub async fn get_customer(
    State(state): State<AppState>,
    IdPath(id): IdPath<Id>,
) -> ApiResult<Envelope<Customer>> {
    let customer = state.service.get_customer(id).await?;

    Ok(Envelope::success("Customer retrieved", customer))
}

/// Delete a customer together with its images
///
/// DELETE /customers/:id
pub async fn delete_customer(
    State(state): State<AppState>,
    IdPath(id): IdPath<Id>,
) -> ApiResult<Envelope<()>> {
    state.service.delete_customer(id).await?;

    Ok(Envelope::done("Customer deleted"))
}
