//! Category endpoints.
//!
//! ```text
//! GET    /api/v1/categories
//! GET    /api/v1/categories/{id}
//! POST   /api/v1/categories
//! PUT    /api/v1/categories/{id}
//! PATCH  /api/v1/categories/{id}
//! DELETE /api/v1/categories/{id}
//! GET    /api/v1/categories/{id}/products
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Category, CategoryId, CategoryPatch, Error, NewCategory};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::products::{IDENTITY_MISMATCH, ProductResponse, product_list};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    Gated, Operation, RequestPart, Resource, Schema, Validated, schema_for,
};

/// Path parameters of `/categories/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct CategoryPath {
    /// Numeric category identifier.
    #[param(minimum = 1, example = 1)]
    pub id: u64,
}

impl CategoryPath {
    pub fn category_id(self) -> CategoryId {
        CategoryId::new(self.id)
    }
}

impl Gated for CategoryPath {
    const PART: RequestPart = RequestPart::Params;

    fn schema() -> &'static Schema {
        schema_for(Resource::Category, Operation::Identify)
    }
}

/// Body of `POST /categories`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct CreateCategoryBody {
    #[schema(min_length = 3, max_length = 15, pattern = "^[a-zA-Z0-9]+$", example = "Daifuku")]
    pub name: String,
    #[schema(min_length = 3, max_length = 255, pattern = "^[a-zA-Z0-9]+$", example = "Stuffed")]
    pub description: String,
}

impl Gated for CreateCategoryBody {
    const PART: RequestPart = RequestPart::Body;

    fn schema() -> &'static Schema {
        schema_for(Resource::Category, Operation::Create)
    }
}

impl From<CreateCategoryBody> for NewCategory {
    fn from(body: CreateCategoryBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
        }
    }
}

/// Body of `PUT`/`PATCH /categories/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UpdateCategoryBody {
    /// Must equal the identifier in the path.
    #[schema(minimum = 1, example = 1)]
    pub id: u64,
    #[schema(min_length = 3, max_length = 15, pattern = "^[a-zA-Z0-9]+$")]
    pub name: Option<String>,
    #[schema(min_length = 3, max_length = 255, pattern = "^[a-zA-Z0-9]+$")]
    pub description: Option<String>,
}

impl Gated for UpdateCategoryBody {
    const PART: RequestPart = RequestPart::Body;

    fn schema() -> &'static Schema {
        schema_for(Resource::Category, Operation::Update)
    }
}

impl UpdateCategoryBody {
    /// Split the body into its patch, checking it targets `path`.
    pub fn into_patch(self, path: CategoryPath) -> Result<CategoryPatch, Error> {
        if self.id != path.id {
            return Err(Error::conflict(IDENTITY_MISMATCH));
        }
        Ok(CategoryPatch {
            name: self.name,
            description: self.description,
        })
    }
}

/// Category as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Daifuku")]
    pub name: String,
    #[schema(example = "Stuffed")]
    pub description: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.get(),
            name: category.name,
            description: category.description,
        }
    }
}

/// List every category.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses((status = 200, description = "Categories", body = [CategoryResponse])),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let categories: Vec<CategoryResponse> = state
        .categories
        .list()
        .await?
        .into_iter()
        .map(CategoryResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(categories))
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(CategoryPath),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 400, description = "Invalid identifier", body = ErrorEnvelope),
        (status = 404, description = "Category not found", body = ErrorEnvelope)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: Validated<CategoryPath>,
) -> ApiResult<HttpResponse> {
    let category = state.categories.get(path.category_id()).await?;
    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryBody,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid category", body = ErrorEnvelope)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    body: Validated<CreateCategoryBody>,
) -> ApiResult<HttpResponse> {
    let category = state.categories.create(body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}

async fn apply_update(
    state: &HttpState,
    path: CategoryPath,
    body: UpdateCategoryBody,
) -> ApiResult<HttpResponse> {
    let patch = body.into_patch(path)?;
    let category = state.categories.update(path.category_id(), patch).await?;
    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// Replace the supplied fields of a category.
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(CategoryPath),
    request_body = UpdateCategoryBody,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid identifier or body", body = ErrorEnvelope),
        (status = 404, description = "Category not found", body = ErrorEnvelope),
        (status = 409, description = "Body identifier differs from path", body = ErrorEnvelope)
    ),
    tags = ["categories"],
    operation_id = "replaceCategory"
)]
#[put("/categories/{id}")]
pub async fn replace_category(
    state: web::Data<HttpState>,
    path: Validated<CategoryPath>,
    body: Validated<UpdateCategoryBody>,
) -> ApiResult<HttpResponse> {
    apply_update(&state, path.into_inner(), body.into_inner()).await
}

/// Update some fields of a category.
#[utoipa::path(
    patch,
    path = "/api/v1/categories/{id}",
    params(CategoryPath),
    request_body = UpdateCategoryBody,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid identifier or body", body = ErrorEnvelope),
        (status = 404, description = "Category not found", body = ErrorEnvelope),
        (status = 409, description = "Body identifier differs from path", body = ErrorEnvelope)
    ),
    tags = ["categories"],
    operation_id = "patchCategory"
)]
#[patch("/categories/{id}")]
pub async fn patch_category(
    state: web::Data<HttpState>,
    path: Validated<CategoryPath>,
    body: Validated<UpdateCategoryBody>,
) -> ApiResult<HttpResponse> {
    apply_update(&state, path.into_inner(), body.into_inner()).await
}

/// Delete a category, answering with its identifier.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(CategoryPath),
    responses(
        (status = 200, description = "Identifier of the deleted category", body = u64),
        (status = 400, description = "Invalid identifier", body = ErrorEnvelope),
        (status = 404, description = "Category not found", body = ErrorEnvelope)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    path: Validated<CategoryPath>,
) -> ApiResult<HttpResponse> {
    let removed = state.categories.delete(path.category_id()).await?;
    Ok(HttpResponse::Ok().json(removed.get()))
}

/// List the products of one category.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/products",
    params(CategoryPath),
    responses(
        (status = 200, description = "Products in the category", body = [ProductResponse]),
        (status = 400, description = "Invalid identifier", body = ErrorEnvelope),
        (status = 404, description = "Category not found", body = ErrorEnvelope)
    ),
    tags = ["categories"],
    operation_id = "listCategoryProducts"
)]
#[get("/categories/{id}/products")]
pub async fn list_category_products(
    state: web::Data<HttpState>,
    path: Validated<CategoryPath>,
) -> ApiResult<HttpResponse> {
    let products = state.categories.products(path.category_id()).await?;
    Ok(HttpResponse::Ok().json(product_list(products)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn gates_use_the_category_schemas() {
        assert_eq!(CategoryPath::schema().name(), "category.identify");
        assert_eq!(CreateCategoryBody::schema().name(), "category.create");
        assert_eq!(UpdateCategoryBody::schema().name(), "category.update");
    }

    #[rstest]
    #[case(1, 1, true)]
    #[case(1, 2, false)]
    fn update_body_must_target_the_path(
        #[case] body_id: u64,
        #[case] path_id: u64,
        #[case] accepted: bool,
    ) {
        let body = UpdateCategoryBody {
            id: body_id,
            name: Some("Seasonal".into()),
            description: None,
        };
        let outcome = body.into_patch(CategoryPath { id: path_id });
        assert_eq!(outcome.is_ok(), accepted);
    }

    #[rstest]
    fn create_body_becomes_a_new_category() {
        let body = CreateCategoryBody {
            name: "Seasonal".into(),
            description: "Limited".into(),
        };
        assert_eq!(
            NewCategory::from(body),
            NewCategory {
                name: "Seasonal".into(),
                description: "Limited".into(),
            }
        );
    }
}
