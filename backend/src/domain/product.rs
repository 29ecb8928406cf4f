//! Product aggregate and the value types used to create or modify it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::CategoryId;

/// Stable product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product offered by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: i64,
    pub description: String,
    /// Owning category. Not checked against the category collection.
    pub category: CategoryId,
    pub image: String,
}

/// Fields required to create a product; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub title: String,
    pub price: i64,
    pub description: String,
    pub category: CategoryId,
    pub image: String,
}

impl NewProduct {
    /// Materialise the product under `id`.
    pub fn into_product(self, id: ProductId) -> Product {
        let Self {
            title,
            price,
            description,
            category,
            image,
        } = self;
        Product {
            id,
            title,
            price,
            description,
            category,
            image,
        }
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub category: Option<CategoryId>,
    pub image: Option<String>,
}

impl Product {
    /// Merge the supplied fields into this product.
    ///
    /// # Examples
    /// ```
    /// use store_backend::domain::{CategoryId, Product, ProductId, ProductPatch};
    ///
    /// let mut product = Product {
    ///     id: ProductId::new(1),
    ///     title: "Strawberry mochi".into(),
    ///     price: 250,
    ///     description: "Mochi filled with strawberry cream".into(),
    ///     category: CategoryId::new(2),
    ///     image: "/images/mochi_1.jpeg".into(),
    /// };
    /// product.apply(ProductPatch { price: Some(275), ..ProductPatch::default() });
    /// assert_eq!(product.price, 275);
    /// assert_eq!(product.title, "Strawberry mochi");
    /// ```
    pub fn apply(&mut self, patch: ProductPatch) {
        let ProductPatch {
            title,
            price,
            description,
            category,
            image,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(image) = image {
            self.image = image;
        }
    }

    /// Case-insensitive substring match against the description.
    pub fn description_contains(&self, needle: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}
