//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the store API. It registers every product and category
//! endpoint, their request and response bodies, and both failure envelopes.
//!
//! The document is served by Swagger UI under `/api-docs/` and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::categories::{CategoryResponse, CreateCategoryBody, UpdateCategoryBody};
use crate::inbound::http::error::{ErrorEnvelope, FallbackEnvelope};
use crate::inbound::http::products::{CreateProductBody, ProductResponse, UpdateProductBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store API",
        description = "REST API retrieving products and categories from a fake store. \
                       Failures are answered with `{statusCode, error, message}`, or with \
                       `{message}` and status 500 when their cause is unknown."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::replace_product,
        crate::inbound::http::products::patch_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::replace_category,
        crate::inbound::http::categories::patch_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::categories::list_category_products,
    ),
    components(schemas(
        ProductResponse,
        CreateProductBody,
        UpdateProductBody,
        CategoryResponse,
        CreateCategoryBody,
        UpdateCategoryBody,
        ErrorEnvelope,
        FallbackEnvelope
    )),
    tags(
        (name = "products", description = "Operations on products"),
        (name = "categories", description = "Operations on categories and their products")
    )
)]
pub struct ApiDoc;
