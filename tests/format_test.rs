//! Integration tests for the format leaf checks: date, file, email, URL, IP.

use dragnet::{IpVersion, Validator};
use serde_json::json;

#[test]
fn test_where_date_valid_formats() {
    let mut v = Validator::new(json!({
        "day": "2024-02-29",
        "stamp": "2024-01-02 03:04:05",
        "clock": "13:45"
    }));
    v.where_date("day", "%Y-%m-%d")
        .where_date("stamp", "%Y-%m-%d %H:%M:%S")
        .where_date("clock", "%H:%M");
    assert!(v.passes());
}

#[test]
fn test_where_date_rejects_lenient_parses() {
    // 2023 is not a leap year; a lenient parser might roll the date over.
    let mut v = Validator::new(json!({"day": "2023-02-29"}));
    v.where_date("day", "%Y-%m-%d");
    assert_eq!(
        v.errors().get("day"),
        Some(&["The 'day' must be a valid date in format: %Y-%m-%d".to_string()][..])
    );
}

#[test]
fn test_where_date_requires_exact_rendering() {
    // Parses, but does not re-render identically (missing zero padding).
    let mut v = Validator::new(json!({"day": "2024-1-2"}));
    v.where_date("day", "%Y-%m-%d");
    assert!(v.fails());
}

#[test]
fn test_where_date_non_string() {
    let mut v = Validator::new(json!({"day": 20240102}));
    v.where_date("day", "%Y-%m-%d");
    assert_eq!(
        v.errors().get("day"),
        Some(&["The 'day' must be a string for date validation".to_string()][..])
    );
}

#[test]
fn test_where_is_file_existing() {
    // The manifest is always present relative to the test working directory.
    let mut v = Validator::new(json!({"config": "Cargo.toml"}));
    v.where_is_file("config", true);
    assert!(v.passes());
}

#[test]
fn test_where_is_file_missing() {
    let mut v = Validator::new(json!({"config": "/no/such/file.txt"}));
    v.where_is_file("config", true);
    assert_eq!(
        v.errors().get("config"),
        Some(&["The file specified in 'config' does not exist: /no/such/file.txt".to_string()][..])
    );
}

#[test]
fn test_where_is_file_existence_not_required() {
    let mut v = Validator::new(json!({"config": "/no/such/file.txt"}));
    v.where_is_file("config", false);
    assert!(v.passes());
}

#[test]
fn test_where_is_file_non_string() {
    let mut v = Validator::new(json!({"config": 42}));
    v.where_is_file("config", true);
    assert_eq!(
        v.errors().get("config"),
        Some(&["The 'config' must be a string representing a file path".to_string()][..])
    );
}

#[test]
fn test_where_email() {
    let mut v = Validator::new(json!({"email": "user@example.com"}));
    v.where_email("email");
    assert!(v.passes());

    let mut v = Validator::new(json!({"email": "not-an-email"}));
    v.where_email("email");
    assert_eq!(
        v.errors().get("email"),
        Some(&["email must be a valid email address".to_string()][..])
    );

    let mut v = Validator::new(json!({"email": 7}));
    v.where_email("email");
    assert_eq!(
        v.errors().get("email"),
        Some(&["email must be a string".to_string()][..])
    );
}

#[test]
fn test_where_url() {
    let mut v = Validator::new(json!({"site": "https://example.com/path?q=1"}));
    v.where_url("site");
    assert!(v.passes());

    // A bare hostname is not an absolute URL.
    let mut v = Validator::new(json!({"site": "example.com"}));
    v.where_url("site");
    assert_eq!(
        v.errors().get("site"),
        Some(&["site must be a valid URL".to_string()][..])
    );
}

#[test]
fn test_where_ip_versions() {
    let mut v = Validator::new(json!({"v4": "192.168.0.1", "v6": "::1"}));
    v.where_ip("v4", IpVersion::Any)
        .where_ip("v4", IpVersion::V4)
        .where_ip("v6", IpVersion::V6)
        .where_ip("v6", IpVersion::Any);
    assert!(v.passes());

    let mut v = Validator::new(json!({"addr": "192.168.0.1"}));
    v.where_ip("addr", IpVersion::V6);
    assert_eq!(
        v.errors().get("addr"),
        Some(&["addr must be a valid IP address".to_string()][..])
    );

    let mut v = Validator::new(json!({"addr": "999.1.1.1"}));
    v.where_ip("addr", IpVersion::Any);
    assert!(v.fails());
}
