//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without a running server.

use std::sync::Arc;

use crate::domain::ports::{CategoryRepository, ProductRepository};
use crate::domain::{CategoryService, ProductService};
use crate::outbound::memory::InMemoryCatalogue;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub products: Arc<ProductService>,
    pub categories: Arc<CategoryService>,
}

impl HttpState {
    /// Build state over the given repositories.
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products: Arc::new(ProductService::new(Arc::clone(&products))),
            categories: Arc::new(CategoryService::new(categories, products)),
        }
    }

    /// State backed by the seeded in-memory catalogue.
    ///
    /// # Examples
    /// ```
    /// use store_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::in_memory();
    /// let _ = state.products.clone();
    /// ```
    pub fn in_memory() -> Self {
        Self::over(Arc::new(InMemoryCatalogue::seeded()))
    }

    /// State backed by one catalogue serving both repositories.
    pub fn over(catalogue: Arc<InMemoryCatalogue>) -> Self {
        Self::new(catalogue.clone(), catalogue)
    }
}
