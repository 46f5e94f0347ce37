//! Update check tests
//!
//! Tests cover:
//! - Detecting a newer release
//! - Twelve-hour caching of the store answer and forced refresh
//! - Disabled update checks

mod common;

use common::*;
use steeple_core::{LicenseConfig, MemoryStore};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_newer_release_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("edd_action", "get_version"))
        .and(query_param("license", TEST_KEY))
        .and(query_param("version", INSTALLED_VERSION))
        .and(query_param("author", "Steeple Themes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(version_answer(NEWER_VERSION)))
        .expect(1)
        .mount(&server)
        .await;

    let mut manager = keyed_manager(&server.uri());
    let update = manager.check_for_update(false).await.unwrap().unwrap();

    assert_eq!(update.current_version, INSTALLED_VERSION);
    assert_eq!(update.new_version, NEWER_VERSION);
    assert_eq!(
        update.package.as_deref(),
        Some("https://store.example.com/download/exodus.zip")
    );
}

#[tokio::test]
async fn test_current_release_reports_nothing() {
    let server = MockServer::start().await;
    mock_action(&server, "get_version", version_answer(INSTALLED_VERSION)).await;

    let mut manager = keyed_manager(&server.uri());
    assert_eq!(manager.check_for_update(false).await.unwrap(), None);
}

#[tokio::test]
async fn test_answer_cached_until_forced() {
    let server = MockServer::start().await;
    mock_action_times(&server, "get_version", version_answer(NEWER_VERSION), 2).await;

    let mut manager = keyed_manager(&server.uri());
    assert!(manager.check_for_update(false).await.unwrap().is_some());

    let mut manager = manager.with_clock(evening);
    assert!(manager.check_for_update(false).await.unwrap().is_some());
    assert!(manager.check_for_update(true).await.unwrap().is_some());
}

#[tokio::test]
async fn test_cache_expires_after_twelve_hours() {
    let server = MockServer::start().await;
    mock_action_times(&server, "get_version", version_answer(NEWER_VERSION), 2).await;

    let mut manager = keyed_manager(&server.uri());
    manager.check_for_update(false).await.unwrap();

    let mut manager = manager.with_clock(next_day);
    manager.check_for_update(false).await.unwrap();
}

#[tokio::test]
async fn test_disabled_updates_skip_request() {
    let server = MockServer::start().await;
    forbid_action(&server, "get_version").await;

    let config = LicenseConfig {
        updates: false,
        ..test_config(&server.uri())
    };
    let mut manager = manager_with(config, MemoryStore::new());
    assert_eq!(manager.check_for_update(false).await.unwrap(), None);
}
