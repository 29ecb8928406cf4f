//! Tests for domain error construction.

use super::*;
use rstest::rstest;

#[rstest]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("clash"), ErrorCode::Conflict)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn try_new_rejects_blank_messages(#[case] message: &str) {
    let result = Error::try_new(ErrorCode::NotFound, message);
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn display_uses_message() {
    let error = Error::not_found("Category not found");
    assert_eq!(error.to_string(), "Category not found");
}

#[rstest]
fn codes_render_as_snake_case() {
    assert_eq!(ErrorCode::NotFound.to_string(), "not_found");
    assert_eq!(ErrorCode::InternalError.as_str(), "internal_error");
}

#[rstest]
#[should_panic(expected = "error messages must satisfy validation")]
fn new_panics_on_blank_message() {
    let _ = Error::new(ErrorCode::Conflict, " ");
}
