//! Route-level tests for the product endpoints.

#[path = "support/app.rs"]
mod app_support;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use app_support::{assert_envelope, store_app};
use rstest::rstest;
use serde_json::{Value, json};

fn ids(body: &Value) -> Vec<u64> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|item| item["id"].as_u64().expect("numeric id"))
        .collect()
}

fn new_product() -> Value {
    json!({
        "title": "Yuzu mochi",
        "price": 280,
        "description": "Mochi filled with yuzu cream",
        "category": 2,
        "image": "https://store.example/images/mochi_7.jpeg"
    })
}

#[actix_web::test]
async fn lists_the_seeded_products() {
    let app = test::init_service(store_app()).await;
    let req = TestRequest::get().uri("/api/v1/products").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);
}

#[rstest]
#[case("strawberry", vec![1])]
#[case("CHOCOLATE", vec![4, 6])]
#[case("durian", vec![])]
#[actix_web::test]
async fn search_filters_descriptions_case_insensitively(
    #[case] term: &str,
    #[case] expected: Vec<u64>,
) {
    let app = test::init_service(store_app()).await;
    let req = TestRequest::get()
        .uri(&format!("/api/v1/products?search={term}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), expected);
}

#[rstest]
#[case("/api/v1/products?search=", "\"search\" is not allowed to be empty")]
#[case("/api/v1/products?sort=price", "\"sort\" is not allowed")]
#[case("/api/v1/products?search=matcha&search=", "\"search\" must be a string")]
#[case("/api/v1/products?search=&search=matcha", "\"search\" must be a string")]
#[actix_web::test]
async fn invalid_queries_are_rejected(#[case] uri: &str, #[case] message: &str) {
    let app = test::init_service(store_app()).await;
    let res = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_envelope(&body, StatusCode::BAD_REQUEST, message);
}

#[actix_web::test]
async fn fetches_one_product() {
    let app = test::init_service(store_app()).await;
    let req = TestRequest::get().uri("/api/v1/products/2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({
            "id": 2,
            "title": "Matcha mochi",
            "price": 300,
            "description": "Mochi filled with matcha tea cream",
            "category": 3,
            "image": "/images/mochi_2.jpeg"
        })
    );
}

#[rstest]
#[case("/api/v1/products/-1", StatusCode::BAD_REQUEST, "\"id\" must be a positive number")]
#[case("/api/v1/products/abc", StatusCode::BAD_REQUEST, "\"id\" must be a number")]
#[case("/api/v1/products/1.5", StatusCode::BAD_REQUEST, "\"id\" must be an integer")]
#[case("/api/v1/products/99", StatusCode::NOT_FOUND, "Product not found")]
#[actix_web::test]
async fn fetch_failures_use_the_typed_envelope(
    #[case] uri: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let app = test::init_service(store_app()).await;
    let res = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), status);
    assert!(res.headers().contains_key("trace-id"));
    let body: Value = test::read_body_json(res).await;
    assert_envelope(&body, status, message);
}

#[actix_web::test]
async fn creates_products_with_the_next_identifier() {
    let app = test::init_service(store_app()).await;
    let req = TestRequest::post()
        .uri("/api/v1/products")
        .set_json(new_product())
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["id"], json!(7));
    assert_eq!(created["title"], json!("Yuzu mochi"));

    let req = TestRequest::get().uri("/api/v1/products/7").to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn create_coerces_numeric_strings() {
    let app = test::init_service(store_app()).await;
    let mut body = new_product();
    body["price"] = json!("280");
    let req = TestRequest::post()
        .uri("/api/v1/products")
        .set_json(body)
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["price"], json!(280));
}

#[rstest]
#[case("title", "\"title\" is required")]
#[case("image", "\"image\" is required")]
#[actix_web::test]
async fn create_names_the_missing_field(#[case] field: &str, #[case] message: &str) {
    let app = test::init_service(store_app()).await;
    let mut body = new_product();
    body.as_object_mut().expect("object").remove(field);
    let req = TestRequest::post()
        .uri("/api/v1/products")
        .set_json(body)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_envelope(&body, StatusCode::BAD_REQUEST, message);
}

#[actix_web::test]
async fn create_rejects_identifiers_and_relative_images() {
    let app = test::init_service(store_app()).await;
    let mut body = new_product();
    body["id"] = json!(42);
    body["image"] = json!("/images/mochi_7.jpeg");
    let req = TestRequest::post()
        .uri("/api/v1/products")
        .set_json(body)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_envelope(
        &body,
        StatusCode::BAD_REQUEST,
        "\"image\" must be a valid uri. \"id\" is not allowed",
    );
}

#[actix_web::test]
async fn malformed_json_is_a_body_validation_failure() {
    let app = test::init_service(store_app()).await;
    let req = TestRequest::post()
        .uri("/api/v1/products")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!("Bad Request"));
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .starts_with("\"value\" could not be parsed")
    );
}

#[rstest]
#[case("PUT")]
#[case("PATCH")]
#[actix_web::test]
async fn updates_merge_supplied_fields(#[case] method: &str) {
    let app = test::init_service(store_app()).await;
    let req = TestRequest::default()
        .method(method.parse().expect("method"))
        .uri("/api/v1/products/2")
        .set_json(json!({ "id": 2, "price": 320 }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["price"], json!(320));
    assert_eq!(body["title"], json!("Matcha mochi"));
}

#[actix_web::test]
async fn update_rejects_short_titles() {
    let app = test::init_service(store_app()).await;
    let req = TestRequest::patch()
        .uri("/api/v1/products/2")
        .set_json(json!({ "id": 2, "title": "AB" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_envelope(
        &body,
        StatusCode::BAD_REQUEST,
        "\"title\" length must be at least 3 characters long",
    );
}

#[actix_web::test]
async fn path_gate_runs_before_body_gate() {
    let app = test::init_service(store_app()).await;
    let req = TestRequest::patch()
        .uri("/api/v1/products/abc")
        .set_json(json!({ "title": "AB" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_envelope(&body, StatusCode::BAD_REQUEST, "\"id\" must be a number");
}

#[actix_web::test]
async fn update_conflicts_when_identifiers_differ() {
    let app = test::init_service(store_app()).await;
    let req = TestRequest::put()
        .uri("/api/v1/products/2")
        .set_json(json!({ "id": 3, "price": 320 }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_envelope(
        &body,
        StatusCode::CONFLICT,
        "identifier in body does not match path",
    );
}

#[actix_web::test]
async fn update_of_missing_product_is_not_found() {
    let app = test::init_service(store_app()).await;
    let req = TestRequest::patch()
        .uri("/api/v1/products/99")
        .set_json(json!({ "id": 99, "price": 320 }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_envelope(&body, StatusCode::NOT_FOUND, "Product not found");
}

#[actix_web::test]
async fn delete_returns_the_identifier_once() {
    let app = test::init_service(store_app()).await;
    let req = TestRequest::delete().uri("/api/v1/products/6").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!(6));

    let req = TestRequest::delete().uri("/api/v1/products/6").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
