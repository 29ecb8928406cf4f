//! Product use-cases over the [`ProductRepository`] port.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Error, NewProduct, Product, ProductId, ProductPatch};

const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Product service implementing the store's product operations.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    /// Create a new service backed by `repo`.
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    fn map_repository_error(error: ProductRepositoryError) -> Error {
        match error {
            ProductRepositoryError::Unavailable { message } => {
                Error::internal(format!("product repository unavailable: {message}"))
            }
        }
    }

    /// List products, keeping only those whose description contains
    /// `search` (case-insensitive) when a term is supplied.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Product>, Error> {
        let products = self.repo.list().await.map_err(Self::map_repository_error)?;
        Ok(match search {
            Some(term) if !term.is_empty() => products
                .into_iter()
                .filter(|product| product.description_contains(term))
                .collect(),
            _ => products,
        })
    }

    /// Fetch a single product.
    pub async fn get(&self, id: ProductId) -> Result<Product, Error> {
        self.repo
            .find(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(PRODUCT_NOT_FOUND))
    }

    /// Create a product and return it with its assigned identifier.
    pub async fn create(&self, product: NewProduct) -> Result<Product, Error> {
        let created = self
            .repo
            .insert(product)
            .await
            .map_err(Self::map_repository_error)?;
        debug!(product_id = %created.id, "product created");
        Ok(created)
    }

    /// Merge `patch` into an existing product.
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, Error> {
        self.repo
            .update(id, patch)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(PRODUCT_NOT_FOUND))
    }

    /// Delete a product, returning the identifier that was removed.
    pub async fn delete(&self, id: ProductId) -> Result<ProductId, Error> {
        let removed = self
            .repo
            .remove(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !removed {
            return Err(Error::not_found(PRODUCT_NOT_FOUND));
        }
        debug!(product_id = %id, "product deleted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockProductRepository;
    use crate::domain::{CategoryId, ErrorCode};
    use rstest::{fixture, rstest};

    fn product(id: u64, description: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Mochi {id}"),
            price: 250,
            description: description.to_owned(),
            category: CategoryId::new(2),
            image: format!("https://store.example/images/mochi_{id}.jpeg"),
        }
    }

    #[fixture]
    fn catalogue() -> Vec<Product> {
        vec![
            product(1, "Mochi filled with strawberry cream"),
            product(2, "Mochi filled with matcha tea cream"),
        ]
    }

    fn service(repo: MockProductRepository) -> ProductService {
        ProductService::new(Arc::new(repo))
    }

    #[rstest]
    #[case(None, 2)]
    #[case(Some(""), 2)]
    #[case(Some("MATCHA"), 1)]
    #[case(Some("chocolate"), 0)]
    #[tokio::test]
    async fn list_filters_by_description(
        catalogue: Vec<Product>,
        #[case] search: Option<&str>,
        #[case] expected: usize,
    ) {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .times(1)
            .returning(move || Ok(catalogue.clone()));

        let products = service(repo).list(search).await.expect("list succeeds");
        assert_eq!(products.len(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn get_reports_missing_product_as_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find().returning(|_| Ok(None));

        let error = service(repo)
            .get(ProductId::new(99))
            .await
            .expect_err("missing product");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "Product not found");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_returns_removed_identifier() {
        let mut repo = MockProductRepository::new();
        repo.expect_remove()
            .withf(|id| *id == ProductId::new(3))
            .returning(|_| Ok(true));

        let removed = service(repo)
            .delete(ProductId::new(3))
            .await
            .expect("delete succeeds");
        assert_eq!(removed, ProductId::new(3));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_unknown_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_remove().returning(|_| Ok(false));

        let error = service(repo)
            .delete(ProductId::new(3))
            .await
            .expect_err("unknown product");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn repository_failures_become_internal_errors() {
        let mut repo = MockProductRepository::new();
        repo.expect_update()
            .returning(|_, _| Err(ProductRepositoryError::unavailable("disk on fire")));

        let error = service(repo)
            .update(ProductId::new(1), ProductPatch::default())
            .await
            .expect_err("repository failure");
        assert_eq!(error.code(), ErrorCode::InternalError);
        assert!(error.message().contains("disk on fire"));
    }
}
