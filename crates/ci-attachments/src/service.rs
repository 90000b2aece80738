//! Customer image service
//!
//! The aggregate's public operations: validates input, encodes uploads and
//! delegates each mutation to the store as one atomic, quota-checked step.

use std::sync::Arc;

use ci_contracts::{
    Contract, CreateCustomerContract, CreateCustomerData, CustomerData, ImageBatchContract,
};
use ci_core::traits::Id;
use ci_core::{CiError, CiResult};
use ci_models::{Customer, ImageMutation, NewImage, MAX_IMAGES_PER_CUSTOMER};
use tracing::{debug, error, info, instrument, warn};

use crate::store::{CustomerStore, StoreError};
use crate::upload::ImageUpload;

/// Decoded image payload ready to be served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContent {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

struct CreateCustomerInput<'a> {
    name: &'a str,
    files: &'a [ImageUpload],
}

impl CustomerData for CreateCustomerInput<'_> {
    fn name(&self) -> &str {
        self.name
    }
}

impl CreateCustomerData for CreateCustomerInput<'_> {
    fn image_count(&self) -> usize {
        self.files.len()
    }
}

/// Customer image service
#[derive(Clone)]
pub struct CustomerImageService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerImageService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// Create a customer together with its initial images
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn create_customer(
        &self,
        name: &str,
        files: Vec<ImageUpload>,
    ) -> CiResult<Customer> {
        CreateCustomerContract::new().validate(&CreateCustomerInput {
            name,
            files: &files,
        })?;

        let customer = self
            .store
            .insert_customer(name.trim(), encode_all(&files))
            .await
            .map_err(log_store_error)?;

        info!(
            customer_id = customer.id,
            images = customer.image_count(),
            "Customer created"
        );
        Ok(customer)
    }

    /// Every customer with its images
    pub async fn list_customers(&self) -> CiResult<Vec<Customer>> {
        let customers = self.store.list_customers().await.map_err(log_store_error)?;
        debug!(count = customers.len(), "Customers listed");
        Ok(customers)
    }

    pub async fn get_customer(&self, id: Id) -> CiResult<Customer> {
        self.store
            .find_customer(id)
            .await
            .map_err(log_store_error)?
            .ok_or_else(|| CiError::customer_not_found(id))
    }

    /// Decoded bytes of one image, looked up by owner and image id
    #[instrument(skip(self))]
    pub async fn get_image(&self, customer_id: Id, image_id: Id) -> CiResult<ImageContent> {
        let image = self
            .store
            .find_image(customer_id, image_id)
            .await
            .map_err(log_store_error)?
            .ok_or_else(|| CiError::image_not_found(customer_id, image_id))?;

        let bytes = image.decode().map_err(|e| {
            error!(customer_id, image_id, error = %e, "Stored image data is corrupt");
            CiError::from(e)
        })?;

        Ok(ImageContent {
            bytes,
            content_type: image.content_type,
        })
    }

    /// Replace every image of a customer with `files`
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn replace_images(
        &self,
        customer_id: Id,
        files: Vec<ImageUpload>,
    ) -> CiResult<Customer> {
        ImageBatchContract::new().validate(&files.len())?;
        self.mutate(customer_id, ImageMutation::Replace(encode_all(&files)))
            .await
    }

    /// Append `files` after the customer's existing images
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn add_images(&self, customer_id: Id, files: Vec<ImageUpload>) -> CiResult<Customer> {
        self.mutate(customer_id, ImageMutation::Append(encode_all(&files)))
            .await
    }

    /// Remove every image of a customer; the customer itself stays
    #[instrument(skip(self))]
    pub async fn delete_all_images(&self, customer_id: Id) -> CiResult<()> {
        self.mutate(customer_id, ImageMutation::Clear).await?;
        Ok(())
    }

    pub async fn count_images(&self, customer_id: Id) -> CiResult<usize> {
        self.store
            .count_images(customer_id)
            .await
            .map_err(log_store_error)?
            .ok_or_else(|| CiError::customer_not_found(customer_id))
    }

    /// Delete a customer; its images go with it
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: Id) -> CiResult<()> {
        let deleted = self
            .store
            .delete_customer(id)
            .await
            .map_err(log_store_error)?;

        if !deleted {
            return Err(CiError::customer_not_found(id));
        }
        info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    /// Check the store is reachable
    pub async fn ping(&self) -> CiResult<()> {
        self.store.ping().await.map_err(log_store_error)
    }

    async fn mutate(&self, customer_id: Id, mutation: ImageMutation) -> CiResult<Customer> {
        let kind = mutation.name();
        let requested = mutation.new_images().len();

        match self.store.mutate_images(customer_id, mutation).await {
            Ok(customer) => {
                info!(
                    customer_id,
                    mutation = kind,
                    requested,
                    images = customer.image_count(),
                    "Customer images updated"
                );
                Ok(customer)
            }
            Err(StoreError::Quota(violation)) => {
                warn!(customer_id, mutation = kind, requested, %violation, "Image quota rejected mutation");
                Err(CiError::invalid(violation.to_string()))
            }
            Err(e) => Err(log_store_error(e)),
        }
    }
}

fn encode_all(files: &[ImageUpload]) -> Vec<NewImage> {
    files.iter().map(ImageUpload::encode).collect()
}

fn log_store_error(err: StoreError) -> CiError {
    if let StoreError::Backend(ref message) = err {
        error!(error = %message, "Customer store failure");
    }
    err.into()
}
