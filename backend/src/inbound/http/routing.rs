//! Route table for the HTTP adapter.
//!
//! ```text
//! GET /                 welcome text
//! /api/v1/products...   see [`products`](super::products)
//! /api/v1/categories... see [`categories`](super::categories)
//! ```
//!
//! Requests matching nothing are answered with a typed `404` through the
//! responder chain.

use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::inbound::http::categories::{
    create_category, delete_category, get_category, list_categories, list_category_products,
    patch_category, replace_category,
};
use crate::inbound::http::error::{ApiError, HttpProblem};
use crate::inbound::http::products::{
    create_product, delete_product, get_product, list_products, patch_product, replace_product,
};

/// Mount point of the versioned API.
pub const API_PREFIX: &str = "/api/v1";

/// Body of `GET /`.
pub const WELCOME_TEXT: &str = "Welcome to the Store API";

/// Plain-text greeting at the root.
#[get("/")]
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(WELCOME_TEXT)
}

/// Default service: every unmatched request becomes a typed `404`.
pub async fn unmatched_route(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(HttpProblem::not_found(format!("Cannot {} {}", req.method(), req.path())).into())
}

/// Register the welcome route and the `/api/v1` scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use store_backend::inbound::http::routing::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(welcome).service(
        web::scope(API_PREFIX)
            .service(list_products)
            .service(create_product)
            .service(get_product)
            .service(replace_product)
            .service(patch_product)
            .service(delete_product)
            .service(list_categories)
            .service(create_category)
            .service(list_category_products)
            .service(get_category)
            .service(replace_category)
            .service(patch_category)
            .service(delete_category),
    );
}
