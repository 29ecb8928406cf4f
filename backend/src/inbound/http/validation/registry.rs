//! Schema registry: one schema per resource and operation.
//!
//! Every schema is a `static` built from shared field rules, so the identity
//! rule is defined exactly once and cannot drift between operations.

use super::schema::{Constraint, FieldRule, Schema};

/// Resource a schema belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Product,
    Category,
}

/// Operation a schema gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// All business fields required; the identifier is not accepted.
    Create,
    /// Identifier required; every other field optional.
    Update,
    /// Identifier only.
    Identify,
}

const ID: FieldRule = FieldRule::integer("id", &[Constraint::Positive]);

const PRODUCT_TITLE: FieldRule =
    FieldRule::text("title", &[Constraint::MinLength(3), Constraint::MaxLength(15)]);
const PRODUCT_DESCRIPTION: FieldRule = FieldRule::text(
    "description",
    &[Constraint::MinLength(3), Constraint::MaxLength(255)],
);
const PRODUCT_PRICE: FieldRule = FieldRule::integer("price", &[Constraint::AtLeast(10)]);
const PRODUCT_CATEGORY: FieldRule = FieldRule::integer("category", &[Constraint::AtLeast(1)]);
const PRODUCT_IMAGE: FieldRule = FieldRule::text("image", &[Constraint::AbsoluteUri]);

const CATEGORY_NAME: FieldRule = FieldRule::text(
    "name",
    &[
        Constraint::Alphanumeric,
        Constraint::MinLength(3),
        Constraint::MaxLength(15),
    ],
);
const CATEGORY_DESCRIPTION: FieldRule = FieldRule::text(
    "description",
    &[
        Constraint::Alphanumeric,
        Constraint::MinLength(3),
        Constraint::MaxLength(255),
    ],
);

/// Body of `POST /products`.
pub static PRODUCT_CREATE: Schema = Schema::new(
    "product.create",
    &[
        PRODUCT_TITLE.required(),
        PRODUCT_DESCRIPTION.required(),
        PRODUCT_PRICE.required(),
        PRODUCT_CATEGORY.required(),
        PRODUCT_IMAGE.required(),
    ],
);

/// Body of `PUT`/`PATCH /products/{id}`.
pub static PRODUCT_UPDATE: Schema = Schema::new(
    "product.update",
    &[
        ID.required(),
        PRODUCT_TITLE,
        PRODUCT_DESCRIPTION,
        PRODUCT_PRICE,
        PRODUCT_CATEGORY,
        PRODUCT_IMAGE,
    ],
);

/// Path parameters of `/products/{id}`.
pub static PRODUCT_IDENTIFY: Schema = Schema::new("product.identify", &[ID.required()]);

/// Query string of `GET /products`.
pub static PRODUCT_SEARCH: Schema = Schema::new(
    "product.search",
    &[FieldRule::text(
        "search",
        &[Constraint::MinLength(1), Constraint::MaxLength(255)],
    )],
);

/// Body of `POST /categories`.
pub static CATEGORY_CREATE: Schema = Schema::new(
    "category.create",
    &[CATEGORY_NAME.required(), CATEGORY_DESCRIPTION.required()],
);

/// Body of `PUT`/`PATCH /categories/{id}`.
pub static CATEGORY_UPDATE: Schema = Schema::new(
    "category.update",
    &[ID.required(), CATEGORY_NAME, CATEGORY_DESCRIPTION],
);

/// Path parameters of `/categories/{id}` and `/categories/{id}/products`.
pub static CATEGORY_IDENTIFY: Schema = Schema::new("category.identify", &[ID.required()]);

/// Look up the schema for a resource and operation.
///
/// # Examples
/// ```
/// use store_backend::inbound::http::validation::{Operation, Resource, schema_for};
///
/// assert_eq!(schema_for(Resource::Product, Operation::Identify).name(), "product.identify");
/// ```
pub fn schema_for(resource: Resource, operation: Operation) -> &'static Schema {
    match (resource, operation) {
        (Resource::Product, Operation::Create) => &PRODUCT_CREATE,
        (Resource::Product, Operation::Update) => &PRODUCT_UPDATE,
        (Resource::Product, Operation::Identify) => &PRODUCT_IDENTIFY,
        (Resource::Category, Operation::Create) => &CATEGORY_CREATE,
        (Resource::Category, Operation::Update) => &CATEGORY_UPDATE,
        (Resource::Category, Operation::Identify) => &CATEGORY_IDENTIFY,
    }
}
