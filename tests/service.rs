//! End-to-end: started service, remote source, admin endpoints, shutdown.

use std::time::Duration;

use serde_json::Value;
use search_config_sync::config::SyncConfig;
use search_config_sync::lifecycle::{self, Shutdown};
use search_config_sync::refresh::canonicalize;

mod common;

const REMOTE: &str = r#"{
  "jackett": {"name": "Jackett", "url": "http://localhost:9117/api?q={{query}}"},
  "yts": {"name": "YTS", "url": "https://yts.example/browse?q={{query}}", "list": ".browse-movie-wrap"}
}"#;

fn test_config(source: std::net::SocketAddr) -> SyncConfig {
    let mut config = SyncConfig::default();
    config.source.url = format!("http://{}/scraper-config.json", source);
    config.source.use_system_proxy = false;
    config.source.timeout_secs = 5;
    config.admin.bind_address = "127.0.0.1:0".to_string();
    config
}

#[tokio::test]
async fn test_service_syncs_and_reports() {
    let source = common::start_mock_backend(REMOTE).await;
    let config = test_config(source);

    let shutdown = Shutdown::new();
    let service = lifecycle::start(&config, &shutdown).await.unwrap();
    let admin = service.admin_addr.expect("admin enabled");
    let client = common::direct_client();

    // The first cycle runs right away.
    let mut synced = false;
    for _ in 0..100 {
        if service.state.fetch_count() == 1 {
            synced = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(synced, "remote config was never applied");

    let status: Value = client
        .get(format!("http://{}/status", admin))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["status"], "synced");
    assert_eq!(status["fetch_count"], 1);
    assert_eq!(status["consecutive_failures"], 0);
    assert_eq!(status["providers"], 2);

    let config_body = client
        .get(format!("http://{}/config", admin))
        .send()
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(config_body.to_vec(), canonicalize(REMOTE.as_bytes()).unwrap());

    let providers: Value = client
        .get(format!("http://{}/providers", admin))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<_> = providers
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["jackett", "yts"]);

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), service.join())
        .await
        .expect("service did not shut down");
}

#[tokio::test]
async fn test_unreachable_source_keeps_default_and_degrades() {
    let source = common::unused_addr().await;
    let mut config = test_config(source);
    config.admin.enabled = false;

    let shutdown = Shutdown::new();
    let service = lifecycle::start(&config, &shutdown).await.unwrap();
    assert!(service.admin_addr.is_none());

    let mut failing = false;
    for _ in 0..100 {
        if service.state.consecutive_failures() > 0 {
            failing = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(failing, "failure was never recorded");
    assert_eq!(service.state.fetch_count(), 0);
    assert!(service.providers.snapshot().contains_key("jackett"));

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), service.join())
        .await
        .expect("service did not shut down");
}
