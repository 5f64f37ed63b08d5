use serde_json::json;

use super::*;

#[test]
fn request_is_a_bodyless_get() {
    let req = MarketPanel.request(&());
    assert_eq!(req.endpoint, Endpoint::MarketInsights);
    assert_eq!(req.endpoint.method(), reqwest::Method::GET);
    assert!(req.body.is_none());
}

#[test]
fn parses_camel_case_snapshot() {
    let snapshot = MarketPanel
        .parse(json!({
            "totalVolume": "99 ETH",
            "dailyTransactions": 12,
            "averagePrice": "1 ETH",
            "marketCap": "$1M",
            "topGainers": [{ "name": "Azuki", "change": "+1%", "price": "5 ETH", "volume": "9 ETH" }],
            "volumeData": [{ "time": "00:00", "volume": 3 }]
        }))
        .unwrap();

    assert_eq!(snapshot.daily_transactions, 12);
    assert_eq!(snapshot.top_gainers[0].name, "Azuki");
    assert!(snapshot.top_losers.is_empty());
    assert!(snapshot.price_data.is_empty());
}

#[test]
fn demo_snapshot_matches_sample_figures() {
    let demo = MarketPanel.fallback(&());
    assert_eq!(demo.total_volume, "1,234.5 ETH");
    assert_eq!(demo.daily_transactions, 15_847);
    assert_eq!(demo.top_gainers.len(), 3);
    assert_eq!(demo.top_losers[2].name, "Pudgy Penguins");
    assert_eq!(demo.volume_data.len(), 7);
    assert_eq!(demo.price_data.last().map(|p| p.time.as_str()), Some("Now"));
}

#[test]
fn peak_volume_picks_highest_point() {
    let demo = MarketSnapshot::demo();
    let peak = demo.peak_volume().unwrap();
    assert_eq!(peak.time, "16:00");
    assert!((peak.volume - 1200.0).abs() < f64::EPSILON);
}

#[test]
fn refreshed_notice_is_informational() {
    let notice = MarketPanel::refreshed_notice();
    assert_eq!(notice.level, crate::loader::NoticeLevel::Info);
    assert_eq!(notice.title, "Data Refreshed");
}
