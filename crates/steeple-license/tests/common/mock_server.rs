//! Wiremock helpers for the licensing API
//!
//! Every action is a GET on the store root distinguished by `edd_action`.

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Answer `action` with a JSON body
pub async fn mock_action(server: &MockServer, action: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("edd_action", action))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer `action` with a JSON body, expecting exactly `times` calls
pub async fn mock_action_times(server: &MockServer, action: &str, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("edd_action", action))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Answer `action` with a raw status code and body
pub async fn mock_action_raw(server: &MockServer, action: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("edd_action", action))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Fail the test if `action` is ever called
pub async fn forbid_action(server: &MockServer, action: &str) {
    Mock::given(method("GET"))
        .and(query_param("edd_action", action))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
