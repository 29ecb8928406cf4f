//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod category_repository;
mod product_repository;

pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use product_repository::{ProductRepository, ProductRepositoryError};
#[cfg(test)]
pub use product_repository::MockProductRepository;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn constructors_accept_borrowed_messages() {
        let error = ProductRepositoryError::unavailable("lock poisoned");
        assert_eq!(
            error,
            ProductRepositoryError::Unavailable {
                message: "lock poisoned".to_owned()
            }
        );
        assert_eq!(error.to_string(), "product store unavailable: lock poisoned");
    }

    #[rstest]
    fn category_errors_render_message() {
        let error = CategoryRepositoryError::unavailable(String::from("offline"));
        assert_eq!(error.to_string(), "category store unavailable: offline");
    }
}
