//! Category use-cases, including the per-category product listing.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, ProductRepository, ProductRepositoryError,
};
use crate::domain::{Category, CategoryId, CategoryPatch, Error, NewCategory, Product};

const CATEGORY_NOT_FOUND: &str = "Category not found";

/// Category service implementing the store's category operations.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CategoryService {
    /// Create a new service with the given repositories.
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            categories,
            products,
        }
    }

    fn map_category_error(error: CategoryRepositoryError) -> Error {
        match error {
            CategoryRepositoryError::Unavailable { message } => {
                Error::internal(format!("category repository unavailable: {message}"))
            }
        }
    }

    fn map_product_error(error: ProductRepositoryError) -> Error {
        match error {
            ProductRepositoryError::Unavailable { message } => {
                Error::internal(format!("product repository unavailable: {message}"))
            }
        }
    }

    /// List every category.
    pub async fn list(&self) -> Result<Vec<Category>, Error> {
        self.categories
            .list()
            .await
            .map_err(Self::map_category_error)
    }

    /// Fetch a single category.
    pub async fn get(&self, id: CategoryId) -> Result<Category, Error> {
        self.categories
            .find(id)
            .await
            .map_err(Self::map_category_error)?
            .ok_or_else(|| Error::not_found(CATEGORY_NOT_FOUND))
    }

    /// Create a category and return it with its assigned identifier.
    pub async fn create(&self, category: NewCategory) -> Result<Category, Error> {
        let created = self
            .categories
            .insert(category)
            .await
            .map_err(Self::map_category_error)?;
        debug!(category_id = %created.id, "category created");
        Ok(created)
    }

    /// Merge `patch` into an existing category.
    pub async fn update(&self, id: CategoryId, patch: CategoryPatch) -> Result<Category, Error> {
        self.categories
            .update(id, patch)
            .await
            .map_err(Self::map_category_error)?
            .ok_or_else(|| Error::not_found(CATEGORY_NOT_FOUND))
    }

    /// Delete a category, returning the identifier that was removed.
    ///
    /// Products pointing at the category are left as they are.
    pub async fn delete(&self, id: CategoryId) -> Result<CategoryId, Error> {
        let removed = self
            .categories
            .remove(id)
            .await
            .map_err(Self::map_category_error)?;
        if !removed {
            return Err(Error::not_found(CATEGORY_NOT_FOUND));
        }
        debug!(category_id = %id, "category deleted");
        Ok(id)
    }

    /// Products belonging to an existing category.
    pub async fn products(&self, id: CategoryId) -> Result<Vec<Product>, Error> {
        self.get(id).await?;
        self.products
            .list_by_category(id)
            .await
            .map_err(Self::map_product_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockCategoryRepository, MockProductRepository};
    use rstest::rstest;

    fn fruits() -> Category {
        Category {
            id: CategoryId::new(2),
            name: "Fruits".to_owned(),
            description: "Filled with fruit cream".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn products_of_unknown_category_are_not_listed() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find().returning(|_| Ok(None));
        let mut products = MockProductRepository::new();
        products.expect_list_by_category().never();

        let service = CategoryService::new(Arc::new(categories), Arc::new(products));
        let error = service
            .products(CategoryId::new(42))
            .await
            .expect_err("unknown category");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "Category not found");
    }

    #[rstest]
    #[tokio::test]
    async fn products_of_known_category_are_delegated() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find().returning(|_| Ok(Some(fruits())));
        let mut products = MockProductRepository::new();
        products
            .expect_list_by_category()
            .withf(|id| *id == CategoryId::new(2))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = CategoryService::new(Arc::new(categories), Arc::new(products));
        let listed = service
            .products(CategoryId::new(2))
            .await
            .expect("listing succeeds");
        assert!(listed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_category_is_not_found() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_update().returning(|_, _| Ok(None));

        let service =
            CategoryService::new(Arc::new(categories), Arc::new(MockProductRepository::new()));
        let error = service
            .update(CategoryId::new(9), CategoryPatch::default())
            .await
            .expect_err("unknown category");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn store_outage_surfaces_as_internal_error() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_list()
            .returning(|| Err(CategoryRepositoryError::unavailable("offline")));

        let service =
            CategoryService::new(Arc::new(categories), Arc::new(MockProductRepository::new()));
        let error = service.list().await.expect_err("outage");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
