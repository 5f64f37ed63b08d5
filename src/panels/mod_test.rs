use super::*;

#[test]
fn wallet_bands_split_at_two_and_four() {
    assert_eq!(RiskLevel::for_wallet_score(1.99), RiskLevel::Low);
    assert_eq!(RiskLevel::for_wallet_score(2.0), RiskLevel::Medium);
    assert_eq!(RiskLevel::for_wallet_score(3.2), RiskLevel::Medium);
    assert_eq!(RiskLevel::for_wallet_score(4.0), RiskLevel::High);
}

#[test]
fn risk_bands_split_at_four_and_seven() {
    assert_eq!(RiskLevel::for_risk_score(3.9), RiskLevel::Low);
    assert_eq!(RiskLevel::for_risk_score(4.9), RiskLevel::Medium);
    assert_eq!(RiskLevel::for_risk_score(6.8), RiskLevel::Medium);
    assert_eq!(RiskLevel::for_risk_score(7.0), RiskLevel::High);
}

#[test]
fn labels_and_colors() {
    assert_eq!(RiskLevel::High.to_string(), "High");
    assert_eq!(RiskLevel::Low.color(), "#22c55e");
    assert!(RiskLevel::Low < RiskLevel::High);
}
