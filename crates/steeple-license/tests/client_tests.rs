//! License API client tests
//!
//! Tests cover:
//! - Query parameters sent for each action
//! - Transport and decoding failures

mod common;

use common::*;
use steeple_license::{LicenseAction, LicenseClient, LicenseError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> LicenseClient {
    LicenseClient::new(&test_config(&server.uri())).unwrap()
}

#[tokio::test]
async fn test_check_sends_license_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("edd_action", "check_license"))
        .and(query_param("license", TEST_KEY))
        .and(query_param("item_name", TEST_ITEM_NAME))
        .and(query_param("url", TEST_SITE_URL))
        .respond_with(ResponseTemplate::new(200).set_body_json(valid_answer(EXPIRES_FAR)))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .call(LicenseAction::Check, TEST_KEY)
        .await
        .unwrap();

    assert!(response.is_valid());
    assert_eq!(
        response.expiration_date(),
        chrono::NaiveDate::from_ymd_opt(2028, 6, 30)
    );
}

#[tokio::test]
async fn test_key_is_trimmed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("license", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_answer("deactivated")))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .call(LicenseAction::Deactivate, &format!(" {} \n", TEST_KEY))
        .await
        .unwrap();
    assert_eq!(response.status(), Some("deactivated"));
}

#[tokio::test]
async fn test_non_json_answer_is_parse_error() {
    let server = MockServer::start().await;
    mock_action_raw(&server, "check_license", 200, "<!DOCTYPE html><p>Site offline</p>").await;

    let err = client(&server)
        .call(LicenseAction::Check, TEST_KEY)
        .await
        .unwrap_err();

    assert!(matches!(err, LicenseError::ParseError(_)));
    assert!(err.is_silent());
}

#[tokio::test]
async fn test_server_error_is_unreachable() {
    let server = MockServer::start().await;
    mock_action_raw(&server, "activate_license", 500, "{}").await;

    let err = client(&server)
        .call(LicenseAction::Activate, TEST_KEY)
        .await
        .unwrap_err();

    assert!(matches!(err, LicenseError::Unreachable(_)));
    assert!(err.is_silent());
}

#[tokio::test]
async fn test_closed_port_is_unreachable() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = LicenseClient::new(&test_config(&uri))
        .unwrap()
        .call(LicenseAction::Check, TEST_KEY)
        .await
        .unwrap_err();

    assert!(matches!(err, LicenseError::Unreachable(_)));
}

#[test]
fn test_invalid_store_url_is_config_error() {
    let err = LicenseClient::new(&test_config("not a url")).unwrap_err();
    assert!(matches!(err, LicenseError::Config(_)));
    assert!(!err.is_silent());
}
