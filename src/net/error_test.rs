use super::*;

#[test]
fn error_codes_cover_every_variant() {
    let cases = [
        (ApiError::Config("x".into()), "E_CONFIG"),
        (ApiError::HttpClientBuild("tls".into()), "E_HTTP_CLIENT_BUILD"),
        (ApiError::Request("timeout".into()), "E_REQUEST"),
        (ApiError::Http { status: 404, message: "no".into() }, "E_HTTP"),
        (ApiError::Rejected("no".into()), "E_REJECTED"),
        (ApiError::Schema("bad".into()), "E_SCHEMA"),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code);
    }
}

#[test]
fn retryable_network_and_server_errors() {
    assert!(ApiError::Request("reset".into()).retryable());
    assert!(ApiError::Http { status: 503, message: String::new() }.retryable());
    assert!(ApiError::Http { status: 429, message: String::new() }.retryable());
    assert!(!ApiError::Http { status: 400, message: String::new() }.retryable());
    assert!(!ApiError::Rejected("no".into()).retryable());
}

#[test]
fn http_message_prefers_body_message() {
    let msg = http_error_message(422, Some("Unprocessable Entity"), r#"{"message":"SKU duplicado","error":"x"}"#);
    assert_eq!(msg, "SKU duplicado");
}

#[test]
fn http_message_falls_back_to_error_field() {
    let msg = http_error_message(400, Some("Bad Request"), r#"{"error":"stock inválido"}"#);
    assert_eq!(msg, "stock inválido");
}

#[test]
fn http_message_falls_back_to_status_line() {
    assert_eq!(http_error_message(500, Some("Internal Server Error"), "<html>"), "HTTP 500 Internal Server Error");
    assert_eq!(http_error_message(599, None, ""), "HTTP 599");
    assert_eq!(http_error_message(404, Some("Not Found"), r#"{"message":"  "}"#), "HTTP 404 Not Found");
}

#[test]
fn http_error_displays_message_only() {
    let err = ApiError::Http { status: 404, message: "Producto no encontrado".into() };
    assert_eq!(err.to_string(), "Producto no encontrado");
}
