//! Integration tests driving the assertions from `http::Response` values
//!
//! These tests build responses the way a client or a `tower` service would
//! hand them back, then check them through the public entry points.

use rest_assert::{
    assert_cookie_that, assert_json, assert_json_that, assert_that, entry, extract_json, Cookie,
    Response,
};
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use url::Url;

const ORDER: &str = r#"{
    "id": "ord-1001",
    "status": "paid",
    "createdAt": "2024-05-01T10:00:00Z",
    "customer": {"id": 7, "email": "ada@example.com", "vip": true},
    "lines": [
        {"sku": "BOOK-1", "quantity": 2, "price": 12.5},
        {"sku": "PEN-9", "quantity": 10, "price": 1}
    ],
    "discount": null,
    "total": 35
}"#;

/// Helper to build a JSON response with the given status
fn order_response(status: u16) -> Response {
    let http_response = http::Response::builder()
        .status(status)
        .header("Content-Type", "application/json;charset=UTF-8")
        .header("ETag", "W/\"ord-1001-v3\"")
        .header("Location", "/orders/ord-1001")
        .header("Set-Cookie", "cart=; Path=/; Max-Age=0")
        .header(
            "Set-Cookie",
            "session=s3cr3t; Domain=.shop.example; Path=/; Max-Age=1800; Secure; HttpOnly",
        )
        .body(ORDER.as_bytes().to_vec())
        .unwrap();
    Response::from_http(&http_response)
}

#[test]
fn created_order_response() {
    let response = order_response(201);

    assert_that(&response)
        .is_created()
        .is_success()
        .has_header("location")
        .has_header_equal_to("Location", "/orders/ord-1001")
        .has_etag_equal_to("W/\"ord-1001-v3\"")
        .is_json_utf8()
        .has_cookie("session")
        .has_cookie_matching(
            &Cookie::new("session", "s3cr3t")
                .with_domain("shop.example")
                .with_max_age(1800)
                .with_secure(true),
        );
}

#[test]
fn cookies_from_set_cookie_headers() {
    let response = order_response(200);

    assert_cookie_that("session", &response)
        .is_value_equal_to("s3cr3t")
        .is_domain_equal_to("shop.example")
        .is_path_equal_to("/")
        .has_max_age(1800)
        .is_persistent()
        .is_secure()
        .is_http_only();

    assert_cookie_that("cart", &response)
        .is_value_equal_to("")
        .will_be_deleted()
        .is_not_secure();
}

#[test]
fn order_body_paths() {
    let response = order_response(200);

    assert_json_that(&response)
        .is_object()
        .contains_paths(&["id", "customer.email", "lines[1].sku"])
        .contains_path_with_value("status", "paid")
        .contains_path_with_value("$.lines[0].price", 12.5)
        .contains_entries(&[entry("customer.id", 7), entry("customer.vip", true)])
        .is_array_with_size_at("lines", 2)
        .is_null("discount")
        .does_not_contain_path("refund")
        .does_not_contain_path_or_is_null("discount")
        .is_true("customer.vip")
        .is_greater_than("total", 30)
        .is_less_than_or_equal_to("lines[1].quantity", 10)
        .is_positive("total");
}

#[test]
fn order_body_wildcard_selection() {
    let response = order_response(200);

    assert_json_that(&response)
        .contains_path_with_value("$.lines[*].sku", json!(["BOOK-1", "PEN-9"]))
        .contains_path_with_value("$.lines[?@.quantity > 5].sku", "PEN-9");
}

#[test]
fn order_body_equality_ignoring_volatile_fields() {
    let response = order_response(200);
    let body = extract_json(&response).unwrap();

    let expected = ORDER
        .replace("ord-1001", "ord-2002")
        .replace("2024-05-01T10:00:00Z", "2025-01-01T00:00:00Z");

    assert_json(&body).is_equal_to_ignoring_fields(&expected, &["id", "createdAt"]);
}

#[test]
fn order_body_equality_with_file_and_url() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(ORDER.as_bytes()).unwrap();
    let url = Url::from_file_path(file.path()).unwrap();

    let response = order_response(200);
    assert_json_that(&response)
        .is_strictly_equal_to_file(file.path())
        .is_strictly_equal_to_url(&url);
}

#[test]
fn order_body_equality_with_object() {
    #[derive(Serialize)]
    struct Customer<'a> {
        id: u32,
        email: &'a str,
        vip: bool,
    }

    let response = order_response(200);
    let customer = response.json().unwrap()["customer"].clone();

    rest_assert::assert_json_value(customer).is_strictly_equal_to_object(&Customer {
        id: 7,
        email: "ada@example.com",
        vip: true,
    });
}

#[test]
#[should_panic(expected = "Expected lines[1].quantity to be 1 but was 10,\nExpected total to be 25 but was 35")]
fn order_body_differences_are_listed() {
    let response = order_response(200);
    let expected = ORDER
        .replace("\"quantity\": 10", "\"quantity\": 1")
        .replace("\"total\": 35", "\"total\": 25");

    assert_json_that(&response).is_strictly_equal_to(&expected);
}

#[test]
#[should_panic(expected = "Expected status code to be between 400 and 499 but was 201")]
fn created_is_not_a_client_error() {
    assert_that(&order_response(201)).is_client_error();
}

#[test]
#[should_panic(expected = "Expected json to be valid")]
fn html_body_is_not_json() {
    let http_response = http::Response::builder()
        .status(500)
        .header("Content-Type", "text/html")
        .body("<h1>Internal Server Error</h1>")
        .unwrap();
    let response = Response::from_http(&http_response);

    assert_that(&response).is_internal_server_error().is_html();
    assert_json_that(&response);
}
