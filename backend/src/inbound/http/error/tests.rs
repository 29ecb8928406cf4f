//! Tests for the HTTP failure taxonomy.

use super::*;
use crate::inbound::http::validation::{PRODUCT_UPDATE, RequestPart, validate};
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case(Error::not_found("Product not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("clash"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn domain_codes_map_to_statuses(#[case] err: Error, #[case] status: StatusCode) {
    let api = ApiError::from(err);
    assert_eq!(ResponseError::status_code(&api), status);
}

#[rstest]
fn internal_domain_errors_become_unclassified() {
    let api = ApiError::from(Error::internal("store offline"));
    assert_eq!(api, ApiError::unclassified("store offline"));
    assert!(api.problem().is_none());
}

#[rstest]
fn not_found_is_labelled_with_the_reason_phrase() {
    let api = ApiError::from(Error::not_found("Category not found"));
    let problem = api.problem().expect("typed");
    assert_eq!(
        problem.envelope(),
        ErrorEnvelope {
            status_code: 404,
            error: "Not Found".into(),
            message: "Category not found".into(),
        }
    );
}

#[rstest]
fn validation_failures_join_their_messages() {
    let failure = validate(
        &PRODUCT_UPDATE,
        RequestPart::Body,
        &json!({ "id": 2, "title": "AB", "price": 1 }),
    )
    .expect_err("invalid update");
    let api = ApiError::from(failure);

    assert_eq!(api.status(), StatusCode::BAD_REQUEST);
    let problem = api.problem().expect("typed");
    assert_eq!(problem.error(), "Bad Request");
    assert_eq!(
        problem.message(),
        "\"title\" length must be at least 3 characters long. \
         \"price\" must be greater than or equal to 10"
    );
}

#[rstest]
fn custom_labels_are_kept() {
    let problem = HttpProblem::with_label(StatusCode::IM_A_TEAPOT, "Teapot", "short and stout");
    assert_eq!(problem.envelope().error, "Teapot");
    assert_eq!(problem.envelope().status_code, 418);
}

#[rstest]
fn display_uses_the_client_message() {
    assert_eq!(
        ApiError::from(HttpProblem::conflict("clash")).to_string(),
        "clash"
    );
    assert_eq!(ApiError::unclassified("boom").to_string(), "boom");
}

#[actix_web::test]
async fn error_response_runs_the_responder_chain() {
    let response = ResponseError::error_response(&ApiError::from(Error::not_found(
        "Product not found",
    )));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(
        body,
        json!({ "statusCode": 404, "error": "Not Found", "message": "Product not found" })
    );
}

#[rstest]
fn envelopes_reject_unknown_fields() {
    let parsed = serde_json::from_value::<FallbackEnvelope>(json!({
        "message": "boom",
        "stack": "hidden"
    }));
    assert!(parsed.is_err());
}
