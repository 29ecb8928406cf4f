//! Driven port for category storage.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, CategoryPatch, NewCategory};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category storage adapters.
    pub enum CategoryRepositoryError {
        /// The backing store could not be reached.
        Unavailable { message: String } =>
            "category store unavailable: {message}",
    }
}

/// Port for reading and mutating the category collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every category in insertion order.
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// The category with `id`, if any.
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Store a new category under a freshly assigned identifier.
    async fn insert(&self, category: NewCategory) -> Result<Category, CategoryRepositoryError>;

    /// Merge `patch` into the category with `id` and return the result.
    async fn update(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Remove the category with `id`. Returns `false` when it did not exist.
    async fn remove(&self, id: CategoryId) -> Result<bool, CategoryRepositoryError>;
}
