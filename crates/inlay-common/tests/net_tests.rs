//! Tests for script source fetching that stay off the network.

use inlay_common::net::DataURL;
use inlay_common::{FetchError, fetch_text};

#[test]
fn test_data_url_base64() {
    // "console.log(1)"
    let url = DataURL::new("data:text/javascript;base64,Y29uc29sZS5sb2coMSk=".to_string());
    assert_eq!(url.decode().unwrap(), b"console.log(1)");
}

#[test]
fn test_data_url_percent_encoded() {
    let url = DataURL::new("data:text/javascript,var%20x%20%3D%201%3B".to_string());
    assert_eq!(url.decode().unwrap(), b"var x = 1;");
}

#[test]
fn test_data_url_invalid_escapes_are_kept() {
    let url = DataURL::new("data:text/plain,100%25 %zz %4".to_string());
    assert_eq!(url.decode().unwrap(), b"100% %zz %4");
}

#[test]
fn test_data_url_missing_comma() {
    let url = DataURL::new("data:text/javascript".to_string());
    assert!(matches!(url.decode(), Err(FetchError::MissingComma)));
}

#[tokio::test]
async fn test_fetch_text_data_url() {
    let body = fetch_text("data:text/javascript,window.ready%3Dtrue").await.unwrap();
    assert_eq!(body, "window.ready=true");
}

#[tokio::test]
async fn test_fetch_text_rejects_relative_url() {
    let err = fetch_text("scripts/app.js").await.unwrap_err();
    assert!(matches!(err, FetchError::UnsupportedScheme(_)));
}
