//! Driven port for product storage.

use async_trait::async_trait;

use crate::domain::{CategoryId, NewProduct, Product, ProductId, ProductPatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product storage adapters.
    pub enum ProductRepositoryError {
        /// The backing store could not be reached.
        Unavailable { message: String } =>
            "product store unavailable: {message}",
    }
}

/// Port for reading and mutating the product collection.
///
/// Lookups by identifier return `Ok(None)` when nothing matches; deciding
/// what a miss means is left to the domain service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product in insertion order.
    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    /// The product with `id`, if any.
    async fn find(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError>;

    /// Products assigned to `category`, in insertion order.
    async fn list_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Store a new product under a freshly assigned identifier.
    async fn insert(&self, product: NewProduct) -> Result<Product, ProductRepositoryError>;

    /// Merge `patch` into the product with `id` and return the result.
    async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError>;

    /// Remove the product with `id`. Returns `false` when it did not exist.
    async fn remove(&self, id: ProductId) -> Result<bool, ProductRepositoryError>;
}
