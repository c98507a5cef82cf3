//! Process lifecycle tests.

use std::time::{Duration, Instant};

use gateway_lib::config::GatewayConfig;
use gateway_lib::{check_store, run_server};

fn unreachable_store() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.store.uri = "mongodb://127.0.0.1:1".to_string();
    config.store.connect_timeout = Duration::from_millis(500);
    config.store.operation_timeout = Duration::from_millis(500);
    config
}

#[tokio::test]
async fn test_unreachable_store_aborts_startup() {
    let config = unreachable_store();
    let deadline = config.store.connect_timeout;

    let started = Instant::now();
    let result = run_server(config).await;

    assert!(result.is_err());
    assert!(started.elapsed() < deadline + Duration::from_millis(250));
}

#[tokio::test]
async fn test_check_reports_unreachable_store() {
    assert!(check_store(unreachable_store()).await.is_err());
}

#[tokio::test]
#[ignore = "Requires MongoDB at MONGODB_URI"]
async fn test_bind_failure_is_reported_after_store_connects() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();

    let mut config = GatewayConfig::from_env();
    config.host = "127.0.0.1".to_string();
    config.port = taken.local_addr().unwrap().port();
    config.store.ensure_indexes = false;

    let result = tokio::time::timeout(Duration::from_secs(15), run_server(config.clone()))
        .await
        .expect("run_server should return once bind fails");
    assert!(result.is_err());

    check_store(config).await.unwrap();
}
