//! Product endpoints.
//!
//! ```text
//! GET    /api/v1/products?search=
//! GET    /api/v1/products/{id}
//! POST   /api/v1/products
//! PUT    /api/v1/products/{id}
//! PATCH  /api/v1/products/{id}
//! DELETE /api/v1/products/{id}
//! ```
//!
//! Each handler declares its gates as [`Validated`] arguments; the path gate
//! always precedes the body gate.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CategoryId, Error, NewProduct, Product, ProductId, ProductPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    Gated, Operation, PRODUCT_SEARCH, RequestPart, Resource, Schema, Validated, schema_for,
};

/// Message used when a body identifier disagrees with the path.
pub const IDENTITY_MISMATCH: &str = "identifier in body does not match path";

/// Path parameters of `/products/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct ProductPath {
    /// Numeric product identifier.
    #[param(minimum = 1, example = 2)]
    pub id: u64,
}

impl ProductPath {
    pub fn product_id(self) -> ProductId {
        ProductId::new(self.id)
    }
}

impl Gated for ProductPath {
    const PART: RequestPart = RequestPart::Params;

    fn schema() -> &'static Schema {
        schema_for(Resource::Product, Operation::Identify)
    }
}

/// Query string of `GET /products`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductSearchQuery {
    /// Case-insensitive fragment of the product description.
    #[param(min_length = 1, max_length = 255, example = "strawberry")]
    pub search: Option<String>,
}

impl Gated for ProductSearchQuery {
    const PART: RequestPart = RequestPart::Query;

    fn schema() -> &'static Schema {
        &PRODUCT_SEARCH
    }
}

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct CreateProductBody {
    #[schema(min_length = 3, max_length = 15, example = "Matcha mochi")]
    pub title: String,
    #[schema(minimum = 10, example = 250)]
    pub price: i64,
    #[schema(min_length = 3, max_length = 255, example = "Mochi filled with matcha cream")]
    pub description: String,
    #[schema(minimum = 1, example = 2)]
    pub category: u64,
    #[schema(example = "https://store.example/images/mochi_2.jpeg")]
    pub image: String,
}

impl Gated for CreateProductBody {
    const PART: RequestPart = RequestPart::Body;

    fn schema() -> &'static Schema {
        schema_for(Resource::Product, Operation::Create)
    }
}

impl From<CreateProductBody> for NewProduct {
    fn from(body: CreateProductBody) -> Self {
        Self {
            title: body.title,
            price: body.price,
            description: body.description,
            category: CategoryId::new(body.category),
            image: body.image,
        }
    }
}

/// Body of `PUT`/`PATCH /products/{id}`. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UpdateProductBody {
    /// Must equal the identifier in the path.
    #[schema(minimum = 1, example = 2)]
    pub id: u64,
    #[schema(min_length = 3, max_length = 15)]
    pub title: Option<String>,
    #[schema(minimum = 10)]
    pub price: Option<i64>,
    #[schema(min_length = 3, max_length = 255)]
    pub description: Option<String>,
    #[schema(minimum = 1)]
    pub category: Option<u64>,
    pub image: Option<String>,
}

impl Gated for UpdateProductBody {
    const PART: RequestPart = RequestPart::Body;

    fn schema() -> &'static Schema {
        schema_for(Resource::Product, Operation::Update)
    }
}

impl UpdateProductBody {
    /// Split the body into its patch, checking it targets `path`.
    pub fn into_patch(self, path: ProductPath) -> Result<ProductPatch, Error> {
        if self.id != path.id {
            return Err(Error::conflict(IDENTITY_MISMATCH));
        }
        Ok(ProductPatch {
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category.map(CategoryId::new),
            image: self.image,
        })
    }
}

/// Product as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = 2)]
    pub id: u64,
    #[schema(example = "Matcha mochi")]
    pub title: String,
    #[schema(example = 250)]
    pub price: i64,
    #[schema(example = "Mochi filled with matcha cream")]
    pub description: String,
    /// Identifier of the owning category.
    #[schema(example = 2)]
    pub category: u64,
    #[schema(example = "/images/mochi_2.jpeg")]
    pub image: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            title: product.title,
            price: product.price,
            description: product.description,
            category: product.category.get(),
            image: product.image,
        }
    }
}

pub(crate) fn product_list(products: Vec<Product>) -> Vec<ProductResponse> {
    products.into_iter().map(ProductResponse::from).collect()
}

/// List products, optionally filtered by description.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductSearchQuery),
    responses(
        (status = 200, description = "Products", body = [ProductResponse]),
        (status = 400, description = "Invalid query", body = ErrorEnvelope)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: Validated<ProductSearchQuery>,
) -> ApiResult<HttpResponse> {
    let ProductSearchQuery { search } = query.into_inner();
    let products = state.products.list(search.as_deref()).await?;
    Ok(HttpResponse::Ok().json(product_list(products)))
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(ProductPath),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 400, description = "Invalid identifier", body = ErrorEnvelope),
        (status = 404, description = "Product not found", body = ErrorEnvelope)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: Validated<ProductPath>,
) -> ApiResult<HttpResponse> {
    let product = state.products.get(path.product_id()).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductBody,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product", body = ErrorEnvelope)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    body: Validated<CreateProductBody>,
) -> ApiResult<HttpResponse> {
    let product = state.products.create(body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

async fn apply_update(
    state: &HttpState,
    path: ProductPath,
    body: UpdateProductBody,
) -> ApiResult<HttpResponse> {
    let patch = body.into_patch(path)?;
    let product = state.products.update(path.product_id(), patch).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// Replace the supplied fields of a product.
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(ProductPath),
    request_body = UpdateProductBody,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid identifier or body", body = ErrorEnvelope),
        (status = 404, description = "Product not found", body = ErrorEnvelope),
        (status = 409, description = "Body identifier differs from path", body = ErrorEnvelope)
    ),
    tags = ["products"],
    operation_id = "replaceProduct"
)]
#[put("/products/{id}")]
pub async fn replace_product(
    state: web::Data<HttpState>,
    path: Validated<ProductPath>,
    body: Validated<UpdateProductBody>,
) -> ApiResult<HttpResponse> {
    apply_update(&state, path.into_inner(), body.into_inner()).await
}

/// Update some fields of a product.
#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}",
    params(ProductPath),
    request_body = UpdateProductBody,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid identifier or body", body = ErrorEnvelope),
        (status = 404, description = "Product not found", body = ErrorEnvelope),
        (status = 409, description = "Body identifier differs from path", body = ErrorEnvelope)
    ),
    tags = ["products"],
    operation_id = "patchProduct"
)]
#[patch("/products/{id}")]
pub async fn patch_product(
    state: web::Data<HttpState>,
    path: Validated<ProductPath>,
    body: Validated<UpdateProductBody>,
) -> ApiResult<HttpResponse> {
    apply_update(&state, path.into_inner(), body.into_inner()).await
}

/// Delete a product, answering with its identifier.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(ProductPath),
    responses(
        (status = 200, description = "Identifier of the deleted product", body = u64),
        (status = 400, description = "Invalid identifier", body = ErrorEnvelope),
        (status = 404, description = "Product not found", body = ErrorEnvelope)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: Validated<ProductPath>,
) -> ApiResult<HttpResponse> {
    let removed = state.products.delete(path.product_id()).await?;
    Ok(HttpResponse::Ok().json(removed.get()))
}
