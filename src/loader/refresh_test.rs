use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use super::*;
use crate::loader::test_helpers::{MockSource, echo_loader, wait_for_calls};

const PERIOD: Duration = Duration::from_secs(30);

#[tokio::test(start_paused = true)]
async fn loads_immediately_then_every_period() {
    let source = MockSource::ok();
    let loader = echo_loader(&source);

    let _task = spawn_refresh_task(loader.clone(), "market".to_owned(), PERIOD);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(source.calls(), 1);

    tokio::time::sleep(Duration::from_secs(64)).await;
    assert_eq!(source.calls(), 3);
    assert_eq!(loader.snapshot().value().map(String::as_str), Some("live:market#3"));
}

#[tokio::test(start_paused = true)]
async fn no_tick_fires_after_drop() {
    let source = MockSource::ok();
    let loader = echo_loader(&source);

    let task = spawn_refresh_task(loader, "market".to_owned(), PERIOD);
    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(source.calls(), 2);

    drop(task);
    tokio::time::sleep(PERIOD * 10).await;
    assert_eq!(source.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_the_task() {
    let source = MockSource::ok();
    let loader = echo_loader(&source);

    let task = spawn_refresh_task(loader, "market".to_owned(), PERIOD);
    tokio::time::sleep(Duration::from_secs(1)).await;
    task.cancel();

    tokio::time::sleep(PERIOD * 3).await;
    assert_eq!(source.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn failing_ticks_keep_polling_with_demo_data() {
    let source = MockSource::failing();
    let loader = echo_loader(&source);

    let task = spawn_refresh_task(loader.clone(), "market".to_owned(), PERIOD);
    tokio::time::sleep(Duration::from_secs(61)).await;

    assert_eq!(source.calls(), 3);
    assert!(loader.snapshot().is_demo());
    assert!(!task.is_finished());
}

#[tokio::test]
async fn drop_mid_fetch_leaves_loader_idle() {
    let source = MockSource::gated(Arc::new(Notify::new()));
    let loader = echo_loader(&source);

    let task = spawn_refresh_task(loader.clone(), "market".to_owned(), PERIOD);
    wait_for_calls(&source, 1).await;
    assert!(loader.is_loading());

    drop(task);
    for _ in 0..100 {
        if !loader.is_loading() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(!loader.is_loading());
}
