use super::*;
use serde_json::json;

#[test]
fn field_errors_keep_first_message_per_field() {
    let body = json!({
        "email": ["Enter a valid email address.", "This field must be unique."],
        "phone": ["Too long."],
    });
    let errors = FieldErrors::from_body(&body).unwrap();
    assert_eq!(errors.get("email"), Some("Enter a valid email address."));
    assert_eq!(errors.get("phone"), Some("Too long."));
    assert!(errors.general.is_empty());
}

#[test]
fn field_errors_split_out_general_messages() {
    let body = json!({
        "non_field_errors": ["Contact already exists."],
        "first_name": "Required.",
    });
    let errors = FieldErrors::from_body(&body).unwrap();
    assert_eq!(errors.general, vec!["Contact already exists.".to_owned()]);
    assert_eq!(errors.get("first_name"), Some("Required."));
    assert_eq!(errors.summary(), "Contact already exists.; first_name: Required.");
}

#[test]
fn field_errors_reject_non_object_or_empty_bodies() {
    assert!(FieldErrors::from_body(&json!("boom")).is_none());
    assert!(FieldErrors::from_body(&json!({})).is_none());
    assert!(FieldErrors::from_body(&json!({ "email": [] })).is_none());
}

#[test]
fn only_bad_request_exposes_field_errors() {
    let body = json!({ "email": ["Invalid."] });
    let bad_request = ApiError::Status { status: 400, body: body.clone() };
    let server_error = ApiError::Status { status: 500, body };
    assert!(bad_request.field_errors().is_some());
    assert!(server_error.field_errors().is_none());
    assert_eq!(bad_request.status(), Some(400));
}

#[test]
fn notice_prefers_detail_then_display() {
    let forbidden = ApiError::Status { status: 403, body: json!({ "detail": "Not allowed." }) };
    assert_eq!(forbidden.notice(), "Not allowed. (403)");

    let bare = ApiError::Status { status: 502, body: Value::Null };
    assert_eq!(bare.notice(), "server returned status 502");

    assert_eq!(ApiError::SessionExpired.notice(), "session expired; log in again");
}
