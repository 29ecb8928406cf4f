//! In-memory catalogue adapter.
//!
//! A single store backs both the product and the category ports so the
//! per-category product listing always sees current product data. State
//! lives behind a Tokio `RwLock`; nothing is persisted.

mod seed;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, ProductRepository, ProductRepositoryError,
};
use crate::domain::{
    Category, CategoryId, CategoryPatch, NewCategory, NewProduct, Product, ProductId,
    ProductPatch,
};

#[derive(Debug, Default)]
struct CatalogueState {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl CatalogueState {
    fn next_product_id(&self) -> ProductId {
        let max = self.products.iter().map(|p| p.id.get()).max().unwrap_or(0);
        ProductId::new(max + 1)
    }

    fn next_category_id(&self) -> CategoryId {
        let max = self.categories.iter().map(|c| c.id.get()).max().unwrap_or(0);
        CategoryId::new(max + 1)
    }
}

/// Process-local product and category collections.
///
/// # Examples
/// ```
/// use store_backend::domain::ports::ProductRepository;
/// use store_backend::outbound::memory::InMemoryCatalogue;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryCatalogue::seeded();
/// let products = store.list().await.expect("in-memory reads succeed");
/// assert_eq!(products.len(), 6);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCatalogue {
    state: RwLock<CatalogueState>,
}

impl InMemoryCatalogue {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the starter catalogue.
    pub fn seeded() -> Self {
        Self::with_contents(seed::products(), seed::categories())
    }

    /// Store pre-loaded with the given collections.
    pub fn with_contents(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            state: RwLock::new(CatalogueState {
                products,
                categories,
            }),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalogue {
    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(self.state.read().await.products.clone())
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        let state = self.state.read().await;
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Product>, ProductRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, ProductRepositoryError> {
        let mut state = self.state.write().await;
        let created = product.into_product(state.next_product_id());
        state.products.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let mut state = self.state.write().await;
        Ok(state.products.iter_mut().find(|p| p.id == id).map(|stored| {
            stored.apply(patch);
            stored.clone()
        }))
    }

    async fn remove(&self, id: ProductId) -> Result<bool, ProductRepositoryError> {
        let mut state = self.state.write().await;
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        Ok(state.products.len() != before)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogue {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        Ok(self.state.read().await.categories.clone())
    }

    async fn find(&self, id: CategoryId) -> Result<Option<Category>, CategoryRepositoryError> {
        let state = self.state.read().await;
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, category: NewCategory) -> Result<Category, CategoryRepositoryError> {
        let mut state = self.state.write().await;
        let created = category.into_category(state.next_category_id());
        state.categories.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut state = self.state.write().await;
        Ok(state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .map(|stored| {
                stored.apply(patch);
                stored.clone()
            }))
    }

    async fn remove(&self, id: CategoryId) -> Result<bool, CategoryRepositoryError> {
        let mut state = self.state.write().await;
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        Ok(state.categories.len() != before)
    }
}
