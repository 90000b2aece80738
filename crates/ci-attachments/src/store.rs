//! Customer store
//!
//! The seam between the aggregate and persistence. Implementations must apply
//! each method as one atomic step; in particular `mutate_images` reads the
//! current image count, runs [`check_quota`] and writes in a single critical
//! section so that concurrent mutations of one customer can never push the
//! collection past the quota.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use ci_core::traits::Id;
use ci_core::CiError;
use ci_models::{check_quota, quota, Customer, Image, ImageMutation, NewImage, QuotaViolation};
use thiserror::Error;
use tokio::sync::Mutex;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(Id),
    #[error(transparent)]
    Quota(#[from] QuotaViolation),
    #[error("Store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for CiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CustomerNotFound(id) => CiError::customer_not_found(id),
            StoreError::Quota(violation) => CiError::invalid(violation.to_string()),
            StoreError::Backend(message) => CiError::Store(message),
        }
    }
}

/// Persistence seam for the customer aggregate
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert a customer and its initial images together
    async fn insert_customer(&self, name: &str, images: Vec<NewImage>) -> StoreResult<Customer>;

    /// All customers ascending by id, each with its images
    async fn list_customers(&self) -> StoreResult<Vec<Customer>>;

    /// One customer with its images
    async fn find_customer(&self, id: Id) -> StoreResult<Option<Customer>>;

    /// One image, only if it belongs to `customer_id`
    async fn find_image(&self, customer_id: Id, image_id: Id) -> StoreResult<Option<Image>>;

    /// Check the quota and apply `mutation` atomically
    async fn mutate_images(&self, customer_id: Id, mutation: ImageMutation)
        -> StoreResult<Customer>;

    /// Number of images a customer owns, `None` if the customer is unknown
    async fn count_images(&self, customer_id: Id) -> StoreResult<Option<usize>>;

    /// Delete a customer and, by cascade, its images; false if unknown
    async fn delete_customer(&self, id: Id) -> StoreResult<bool>;

    /// Check the backend is reachable
    async fn ping(&self) -> StoreResult<()>;
}

#[derive(Debug, Clone)]
struct CustomerRecord {
    name: String,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MemoryState {
    customers: BTreeMap<Id, CustomerRecord>,
    /// image id -> image; ascending ids keep insertion order
    images: BTreeMap<Id, Image>,
    next_customer_id: Id,
    next_image_id: Id,
}

impl MemoryState {
    fn images_of(&self, customer_id: Id) -> impl Iterator<Item = &Image> {
        self.images
            .values()
            .filter(move |image| image.customer_id == customer_id)
    }

    fn assemble(&self, id: Id) -> Option<Customer> {
        self.customers.get(&id).map(|record| Customer {
            id,
            name: record.name.clone(),
            created_at: record.created_at,
            images: self.images_of(id).cloned().collect(),
        })
    }

    fn insert_images(&mut self, customer_id: Id, images: &[NewImage]) {
        for new_image in images {
            self.next_image_id += 1;
            let id = self.next_image_id;
            self.images.insert(
                id,
                Image {
                    id,
                    customer_id,
                    data: new_image.data.clone(),
                    content_type: new_image.content_type.clone(),
                    created_at: Utc::now(),
                },
            );
        }
    }

    fn delete_images_of(&mut self, customer_id: Id) {
        self.images.retain(|_, image| image.customer_id != customer_id);
    }
}

/// In-memory customer store
///
/// A single mutex guards all state, so every trait method is one critical section.
#[derive(Debug, Default)]
pub struct MemoryCustomerStore {
    state: Mutex<MemoryState>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored text of an image (simulates corruption in tests)
    pub async fn overwrite_image_data(&self, image_id: Id, data: impl Into<String>) -> bool {
        let mut state = self.state.lock().await;
        match state.images.get_mut(&image_id) {
            Some(image) => {
                image.data = data.into();
                true
            }
            None => false,
        }
    }

    /// Number of image rows across all customers
    pub async fn total_images(&self) -> usize {
        self.state.lock().await.images.len()
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn insert_customer(&self, name: &str, images: Vec<NewImage>) -> StoreResult<Customer> {
        quota::check_batch(images.len())?;

        let mut state = self.state.lock().await;
        state.next_customer_id += 1;
        let id = state.next_customer_id;
        state.customers.insert(
            id,
            CustomerRecord {
                name: name.to_string(),
                created_at: Utc::now(),
            },
        );
        state.insert_images(id, &images);

        state
            .assemble(id)
            .ok_or_else(|| StoreError::Backend(format!("customer {} vanished after insert", id)))
    }

    async fn list_customers(&self) -> StoreResult<Vec<Customer>> {
        let state = self.state.lock().await;
        Ok(state
            .customers
            .keys()
            .filter_map(|id| state.assemble(*id))
            .collect())
    }

    async fn find_customer(&self, id: Id) -> StoreResult<Option<Customer>> {
        Ok(self.state.lock().await.assemble(id))
    }

    async fn find_image(&self, customer_id: Id, image_id: Id) -> StoreResult<Option<Image>> {
        let state = self.state.lock().await;
        Ok(state
            .images
            .get(&image_id)
            .filter(|image| image.customer_id == customer_id)
            .cloned())
    }

    async fn mutate_images(
        &self,
        customer_id: Id,
        mutation: ImageMutation,
    ) -> StoreResult<Customer> {
        let mut state = self.state.lock().await;
        if !state.customers.contains_key(&customer_id) {
            return Err(StoreError::CustomerNotFound(customer_id));
        }

        let current = state.images_of(customer_id).count();
        check_quota(current, &mutation)?;

        if mutation.clears_existing() {
            state.delete_images_of(customer_id);
        }
        state.insert_images(customer_id, mutation.new_images());

        state
            .assemble(customer_id)
            .ok_or(StoreError::CustomerNotFound(customer_id))
    }

    async fn count_images(&self, customer_id: Id) -> StoreResult<Option<usize>> {
        let state = self.state.lock().await;
        if !state.customers.contains_key(&customer_id) {
            return Ok(None);
        }
        Ok(Some(state.images_of(customer_id).count()))
    }

    async fn delete_customer(&self, id: Id) -> StoreResult<bool> {
        let mut state = self.state.lock().await;
        if state.customers.remove(&id).is_none() {
            return Ok(false);
        }
        state.delete_images_of(id);
        Ok(true)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
