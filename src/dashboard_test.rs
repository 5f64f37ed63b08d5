use std::time::Duration;

use super::*;
use crate::loader::{NoticeLevel, Phase};
use crate::panels::chat::Role;

/// Nothing listens on port 1, so every backend call fails fast.
fn offline() -> Dashboard {
    Dashboard::new(ApiConfig::new("http://127.0.0.1:1").unwrap()).unwrap()
}

async fn wait_until(mut done: impl FnMut() -> bool) {
    for _ in 0..500 {
        if done() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 5s");
}

#[tokio::test]
async fn new_spawns_nothing() {
    let dashboard = offline();
    assert!(!dashboard.is_started());
    assert_eq!(dashboard.market().snapshot().phase, Phase::Idle);
    assert_eq!(dashboard.risk().snapshot().phase, Phase::Idle);
    assert_eq!(dashboard.conversation().messages().len(), 1);
}

#[tokio::test]
async fn notice_receiver_is_handed_out_once() {
    let mut dashboard = offline();
    assert!(dashboard.take_notices().is_some());
    assert!(dashboard.take_notices().is_none());
}

#[tokio::test]
async fn offline_wallet_shows_demo_record() {
    let mut dashboard = offline();
    let mut rx = dashboard.take_notices().unwrap();
    let address = format!("0x{}", "e".repeat(40));

    assert_eq!(dashboard.analyze_wallet(&address).await.unwrap(), Outcome::Fallback);

    let snap = dashboard.wallet().snapshot();
    assert!(snap.is_demo());
    assert_eq!(snap.value().unwrap().address, address);
    assert!(snap.last_updated.is_some());
    assert_eq!(rx.recv().await.unwrap().level, NoticeLevel::Demo);
}

#[tokio::test]
async fn invalid_wallet_never_reaches_backend() {
    let dashboard = offline();
    let err = dashboard.analyze_wallet("0x1234").await.unwrap_err();
    assert!(matches!(err, LoadError::Invalid(_)));
    assert_eq!(dashboard.wallet().snapshot().phase, Phase::Idle);
}

#[tokio::test]
async fn offline_collection_uses_requested_name() {
    let dashboard = offline();
    dashboard.analyze_collection(" Azuki ").await.unwrap();
    assert_eq!(dashboard.collection().snapshot().value().unwrap().name, "Azuki");
}

#[tokio::test]
async fn offline_chat_records_demo_exchange() {
    let mut dashboard = offline();
    assert_eq!(dashboard.chat("is this a good nft?").await.unwrap(), Outcome::Fallback);

    let messages = dashboard.conversation().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].role, Role::Assistant);
    assert!(messages[2].demo);
}

#[tokio::test]
async fn manual_market_refresh_announces_itself() {
    let mut dashboard = offline();
    let mut rx = dashboard.take_notices().unwrap();

    dashboard.refresh_market().await.unwrap();

    assert_eq!(rx.recv().await.unwrap().level, NoticeLevel::Demo);
    let refreshed = rx.recv().await.unwrap();
    assert_eq!(refreshed.level, NoticeLevel::Info);
    assert_eq!(refreshed.description, "Market data has been updated");
}

#[tokio::test]
async fn suggest_delegates_to_collection_list() {
    assert_eq!(offline().suggest("azu"), vec!["Azuki"]);
}

#[tokio::test]
async fn failed_health_check_emits_error_notice() {
    let mut dashboard = offline();
    let mut rx = dashboard.take_notices().unwrap();

    assert!(matches!(dashboard.health().await, Err(ApiError::Request(_))));

    let notice = rx.recv().await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.title, "Error");
    assert!(notice.description.starts_with("Backend health check failed"));
}

#[tokio::test]
async fn start_loads_market_and_risk() {
    let mut dashboard = offline();
    dashboard.start();
    dashboard.start();
    assert!(dashboard.is_started());

    let market = dashboard.market().clone();
    wait_until(|| market.snapshot().current.is_some()).await;
    assert!(market.snapshot().is_demo());

    let risk = dashboard.risk().clone();
    wait_until(|| risk.snapshot().phase == Phase::Success).await;
    assert!(!risk.snapshot().is_demo());
}

#[tokio::test]
async fn drop_abandons_in_flight_risk_load() {
    let mut dashboard = offline();
    dashboard.start();
    let risk = dashboard.risk().clone();
    wait_until(|| risk.is_loading()).await;

    drop(dashboard);

    assert_eq!(risk.snapshot().phase, Phase::Idle);
    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert!(risk.snapshot().current.is_none());
}
