//! Dashboard panels.
//!
//! ARCHITECTURE
//! ============
//! Each module owns one panel's record types, its [`Panel`] strategy
//! (validation + demo record) and, for backend-driven panels, its
//! [`Remote`] request/parse mapping. The loader does the rest.
//!
//! [`Panel`]: crate::loader::Panel
//! [`Remote`]: crate::api::Remote

pub mod chat;
pub mod collection;
pub mod market;
pub mod risk;
pub mod wallet;

pub use chat::{ChatPanel, ChatReply, ChatRequest, Conversation};
pub use collection::{CollectionPanel, CollectionReport};
pub use market::{MarketPanel, MarketSnapshot};
pub use risk::{RiskPanel, RiskReport, SimulatedRiskSource};
pub use wallet::{WalletPanel, WalletReport};

/// Three-step label shared by the wallet and risk panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Wallet scores are out of 5.
    #[must_use]
    pub fn for_wallet_score(score: f64) -> Self {
        Self::banded(score, 2.0, 4.0)
    }

    /// Risk panel scores are out of 10.
    #[must_use]
    pub fn for_risk_score(score: f64) -> Self {
        Self::banded(score, 4.0, 7.0)
    }

    fn banded(score: f64, medium_from: f64, high_from: f64) -> Self {
        if score < medium_from {
            Self::Low
        } else if score < high_from {
            Self::Medium
        } else {
            Self::High
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Hex colour used for gauges and chart slices.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#22c55e",
            Self::Medium => "#f59e0b",
            Self::High => "#ef4444",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
