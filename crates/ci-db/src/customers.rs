//! Customers repository
//!
//! Tables: customers, images
//!
//! Every operation runs in one transaction. Image mutations lock the owning
//! customer row (`SELECT ... FOR UPDATE`) before counting, so two mutations of
//! the same customer serialize while different customers proceed in parallel.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ci_attachments::{CustomerStore, StoreError, StoreResult};
use ci_core::traits::Id;
use ci_models::{check_quota, quota, Customer, Image, ImageMutation, NewImage};
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::debug;

use crate::repository::{RepositoryError, RepositoryResult};

/// Customer row from database
#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Image row from database
#[derive(Debug, Clone, FromRow)]
pub struct ImageRow {
    pub id: i64,
    pub customer_id: i64,
    pub data: String,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Image {
            id: row.id,
            customer_id: row.customer_id,
            data: row.data,
            content_type: row.content_type,
            created_at: row.created_at,
        }
    }
}

/// Attach image rows to their customers; both inputs are expected in id order
pub fn assemble(customers: Vec<CustomerRow>, images: Vec<ImageRow>) -> Vec<Customer> {
    let mut by_customer: BTreeMap<Id, Vec<Image>> = BTreeMap::new();
    for row in images {
        by_customer.entry(row.customer_id).or_default().push(row.into());
    }

    customers
        .into_iter()
        .map(|row| Customer {
            id: row.id,
            images: by_customer.remove(&row.id).unwrap_or_default(),
            name: row.name,
            created_at: row.created_at,
        })
        .collect()
}

const IMAGE_COLUMNS: &str = "id, customer_id, data, content_type, created_at";

/// PostgreSQL-backed customer store
#[derive(Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn load_customer(conn: &mut PgConnection, id: Id) -> RepositoryResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, created_at FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(customer) = customer else {
            return Ok(None);
        };

        let images = sqlx::query_as::<_, ImageRow>(&format!(
            "SELECT {} FROM images WHERE customer_id = $1 ORDER BY id",
            IMAGE_COLUMNS
        ))
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(assemble(vec![customer], images).pop())
    }

    async fn insert_images(
        conn: &mut PgConnection,
        customer_id: Id,
        images: &[NewImage],
    ) -> RepositoryResult<()> {
        for image in images {
            sqlx::query(
                r#"
                INSERT INTO images (customer_id, data, content_type, created_at)
                VALUES ($1, $2, $3, NOW())
                "#,
            )
            .bind(customer_id)
            .bind(&image.data)
            .bind(&image.content_type)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn lock_customer(conn: &mut PgConnection, id: Id) -> RepositoryResult<bool> {
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM customers WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(locked.is_some())
    }

    async fn count_in(conn: &mut PgConnection, customer_id: Id) -> RepositoryResult<usize> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM images WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(&mut *conn)
            .await?;
        to_count(count)
    }
}

fn to_count(count: i64) -> RepositoryResult<usize> {
    usize::try_from(count)
        .map_err(|_| RepositoryError::InvalidRow(format!("negative image count {}", count)))
}

fn db_error(err: sqlx::Error) -> StoreError {
    RepositoryError::from(err).into()
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn insert_customer(&self, name: &str, images: Vec<NewImage>) -> StoreResult<Customer> {
        quota::check_batch(images.len())?;

        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO customers (name, created_at) VALUES ($1, NOW()) RETURNING id",
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error)?;

        Self::insert_images(&mut *tx, id, &images).await?;
        let customer = Self::load_customer(&mut *tx, id)
            .await?
            .ok_or_else(|| StoreError::Backend(format!("customer {} vanished after insert", id)))?;

        tx.commit().await.map_err(db_error)?;
        Ok(customer)
    }

    async fn list_customers(&self) -> StoreResult<Vec<Customer>> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let customers = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, created_at FROM customers ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error)?;

        let images = sqlx::query_as::<_, ImageRow>(&format!(
            "SELECT {} FROM images ORDER BY id",
            IMAGE_COLUMNS
        ))
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(assemble(customers, images))
    }

    async fn find_customer(&self, id: Id) -> StoreResult<Option<Customer>> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let customer = Self::load_customer(&mut *tx, id).await?;
        tx.commit().await.map_err(db_error)?;
        Ok(customer)
    }

    async fn find_image(&self, customer_id: Id, image_id: Id) -> StoreResult<Option<Image>> {
        let row = sqlx::query_as::<_, ImageRow>(&format!(
            "SELECT {} FROM images WHERE id = $1 AND customer_id = $2",
            IMAGE_COLUMNS
        ))
        .bind(image_id)
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Image::from))
    }

    async fn mutate_images(
        &self,
        customer_id: Id,
        mutation: ImageMutation,
    ) -> StoreResult<Customer> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        if !Self::lock_customer(&mut *tx, customer_id).await? {
            return Err(StoreError::CustomerNotFound(customer_id));
        }

        let current = Self::count_in(&mut *tx, customer_id).await?;
        debug!(customer_id, current, mutation = mutation.name(), "Customer row locked");
        check_quota(current, &mutation)?;

        if mutation.clears_existing() {
            sqlx::query("DELETE FROM images WHERE customer_id = $1")
                .bind(customer_id)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }
        Self::insert_images(&mut *tx, customer_id, mutation.new_images()).await?;

        let customer = Self::load_customer(&mut *tx, customer_id)
            .await?
            .ok_or(StoreError::CustomerNotFound(customer_id))?;

        tx.commit().await.map_err(db_error)?;
        Ok(customer)
    }

    async fn count_images(&self, customer_id: Id) -> StoreResult<Option<usize>> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT (SELECT COUNT(*) FROM images i WHERE i.customer_id = c.id)
            FROM customers c
            WHERE c.id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(count.map(to_count).transpose()?)
    }

    async fn delete_customer(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}
