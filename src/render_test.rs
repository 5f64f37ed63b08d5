use super::*;
use crate::loader::{Loaded, Origin, ValidationError};

fn at_090507() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + time::Duration::seconds(9 * 3600 + 5 * 60 + 7)
}

fn snapshot<T>(value: Option<T>, origin: Origin) -> Snapshot<T> {
    Snapshot {
        phase: if value.is_some() { Phase::Success } else { Phase::Idle },
        current: value.map(|value| Loaded { value, origin }),
        error: None,
        last_updated: Some(at_090507()),
    }
}

#[test]
fn hero_leads_with_title() {
    let hero = hero();
    assert!(hero.starts_with("NFT Intelligence\nAI-Powered NFT Analytics Platform"));
}

#[test]
fn clock_is_zero_padded() {
    assert_eq!(clock(at_090507()), "09:05:07");
}

#[test]
fn demo_wallet_is_marked() {
    let text = wallet(&snapshot(Some(WalletReport::demo("0xabc")), Origin::Demo));
    assert!(text.contains("[demo data | updated 09:05:07]"));
    assert!(text.contains("Risk score:    3.2/5 (Medium)"));
    assert!(text.contains("Purchase"));
}

#[test]
fn live_record_has_no_demo_marker() {
    let text = market(&snapshot(Some(MarketSnapshot::demo()), Origin::Live));
    assert!(!text.contains("demo data"));
    assert!(text.contains("Peak volume:   1200 at 16:00"));
}

#[test]
fn inline_error_is_shown() {
    let mut snap = snapshot::<WalletReport>(None, Origin::Live);
    snap.error = Some(ValidationError::InvalidAddress);
    assert!(wallet(&snap).contains("! Please enter a valid Ethereum wallet address (0x...)"));
}

#[test]
fn empty_collection_offers_quick_picks() {
    let text = collection(&snapshot(None, Origin::Live));
    assert!(text.contains("Popular: Bored Ape Yacht Club, CryptoPunks, Azuki, Doodles"));
}

#[test]
fn risk_bars_scale_with_score() {
    let text = risk(&snapshot(Some(RiskReport::baseline()), Origin::Live));
    assert!(text.contains("Overall: 6.8/10 (Medium Risk)"));
    // 8.1 -> 81% -> 16 of 20 cells
    assert!(text.contains(&format!("Volatility Risk  {}{} 8.1", "#".repeat(16), ".".repeat(4))));
}

#[test]
fn conversation_shows_typing_indicator() {
    let text = conversation(&Conversation::new(), true);
    assert!(text.contains("ai: Hello!"));
    assert!(text.ends_with("ai is typing..."));
}
