use std::sync::Arc;

use tokio::time::Instant;

use super::*;
use crate::loader::{Loader, Outcome, Phase};

fn loader() -> Loader<RiskPanel> {
    Loader::new(RiskPanel, Arc::new(SimulatedRiskSource::default()) as Arc<dyn Source<RiskPanel>>)
}

fn within_a_tick(elapsed: Duration, expected: Duration) -> bool {
    elapsed >= expected && elapsed <= expected + Duration::from_millis(5)
}

#[test]
fn baseline_is_medium_overall() {
    let report = RiskReport::baseline();
    assert_eq!(report.level(), RiskLevel::Medium);
    assert_eq!(report.recommendations.len(), 4);
    assert_eq!(report.alerts[1].kind, AlertKind::Error);
    assert_eq!(report.risk_factors[0].factor, "Market Correlation");
}

#[test]
fn gauge_rotation_scales_to_full_turn() {
    let report = RiskReport::baseline();
    assert!((report.gauge_rotation_degrees() - 244.8).abs() < 1e-9);
    assert!((bar_percent(report.volatility_risk) - 81.0).abs() < 1e-9);
}

#[test]
fn distribution_colours_are_fixed_per_category() {
    let colors: Vec<_> = RiskReport::baseline().distribution().iter().map(|s| s.color).collect();
    assert_eq!(colors, ["#ef4444", "#f59e0b", "#ef4444", "#22c55e"]);
}

#[test]
fn wire_names_are_lowercase() {
    let value = serde_json::to_value(RiskReport::baseline()).unwrap();
    assert_eq!(value["alerts"][0]["type"], "warning");
    assert_eq!(value["riskFactors"][1]["impact"], "low");
    assert_eq!(value["overallScore"], 6.8);
}

#[tokio::test(start_paused = true)]
async fn first_load_takes_longer_than_refresh() {
    let loader = loader();

    let start = Instant::now();
    assert_eq!(loader.trigger(()).await.unwrap(), Outcome::Live);
    assert!(within_a_tick(start.elapsed(), FIRST_LOAD_DELAY));

    let start = Instant::now();
    assert_eq!(loader.refresh().await.unwrap(), Outcome::Live);
    assert!(within_a_tick(start.elapsed(), REFRESH_DELAY));

    let snap = loader.snapshot();
    assert_eq!(snap.phase, Phase::Success);
    assert!(!snap.is_demo());
    assert_eq!(snap.value(), Some(&RiskReport::baseline()));
}

#[tokio::test(start_paused = true)]
async fn loading_until_delay_elapses() {
    let loader = loader();
    let pending = tokio::spawn({
        let loader = loader.clone();
        async move { loader.trigger(()).await }
    });

    tokio::time::sleep(Duration::from_millis(1499)).await;
    assert!(loader.is_loading());

    assert_eq!(pending.await.unwrap().unwrap(), Outcome::Live);
    assert!(!loader.is_loading());
}
