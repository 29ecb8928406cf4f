//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define the store's products and categories, the transport
//! agnostic [`Error`] type, and the services that operate on the repository
//! ports. Nothing here knows about HTTP.
//!
//! Public surface:
//! - Error / ErrorCode: domain failure with a stable category.
//! - Product, Category and their create/patch value types.
//! - ProductService, CategoryService: use-cases over [`ports`].

pub mod category;
pub mod category_service;
pub mod error;
pub mod ports;
pub mod product;
pub mod product_service;

pub use self::category::{Category, CategoryId, CategoryPatch, NewCategory};
pub use self::category_service::CategoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::product::{NewProduct, Product, ProductId, ProductPatch};
pub use self::product_service::ProductService;
