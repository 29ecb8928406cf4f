//! Seed catalogue loaded into a fresh in-memory store.

use crate::domain::{Category, CategoryId, Product, ProductId};

fn category(id: u64, name: &str, description: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
    }
}

fn product(id: u64, title: &str, price: i64, description: &str, category: u64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_owned(),
        price,
        description: description.to_owned(),
        category: CategoryId::new(category),
        image: format!("/images/mochi_{id}.jpeg"),
    }
}

/// The five starter categories.
pub fn categories() -> Vec<Category> {
    vec![
        category(1, "Anko", "Filled with red bean cream"),
        category(2, "Fruits", "Filled with fruit cream"),
        category(3, "Ice cream", "Filled with ice cream"),
        category(4, "Cream", "Filled with sweet cream"),
        category(5, "Nuts and seeds", "Filled with nuts and seeds cream"),
    ]
}

/// The six starter products. Product 3 points at a category that does not
/// exist in [`categories`].
pub fn products() -> Vec<Product> {
    vec![
        product(1, "Strawberry mochi", 250, "Mochi filled with strawberry cream", 2),
        product(2, "Matcha mochi", 300, "Mochi filled with matcha tea cream", 3),
        product(3, "Sesame mochi", 300, "Mochi filled with sesame cream", 6),
        product(4, "Chocolate mochi", 250, "Mochi filled with chocolate cream", 4),
        product(5, "Mango mochi", 300, "Mochi filled with mango cream", 2),
        product(6, "White Chocolate mochi", 350, "Mochi filled with white chocolate cream", 4),
    ]
}
