//! Portfolio risk assessment panel.
//!
//! There is no backend endpoint for risk yet. [`SimulatedRiskSource`]
//! stands in for one: it answers with the baseline report after a short
//! delay (longer on first load).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RiskLevel;
use crate::api::ApiError;
use crate::loader::{Notice, Panel, Source, ValidationError};

pub const FIRST_LOAD_DELAY: Duration = Duration::from_millis(1500);
pub const REFRESH_DELAY: Duration = Duration::from_millis(1000);

// =============================================================================
// RECORD
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    /// All scores are out of 10.
    pub overall_score: f64,
    pub market_risk: f64,
    pub liquidity_risk: f64,
    pub volatility_risk: f64,
    pub project_risk: f64,
    pub recommendations: Vec<String>,
    pub alerts: Vec<RiskAlert>,
    pub risk_factors: Vec<RiskFactor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAlert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    pub score: f64,
    pub impact: Impact,
}

/// One slice of the risk distribution chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub name: &'static str,
    pub value: f64,
    pub color: &'static str,
}

impl RiskReport {
    #[must_use]
    pub fn baseline() -> Self {
        let alert = |kind, message: &str| RiskAlert { kind, message: message.to_owned() };
        let factor = |name: &str, score, impact| RiskFactor { factor: name.to_owned(), score, impact };

        Self {
            overall_score: 6.8,
            market_risk: 7.2,
            liquidity_risk: 5.4,
            volatility_risk: 8.1,
            project_risk: 4.9,
            recommendations: [
                "Consider diversifying across multiple blue-chip collections",
                "Monitor floor price movements for exit opportunities",
                "Reduce exposure to high-volatility collections",
                "Set stop-loss orders for protection",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            alerts: vec![
                alert(AlertKind::Warning, "High volatility detected in Art Blocks collection"),
                alert(AlertKind::Error, "Liquidity concerns for emerging projects"),
                alert(AlertKind::Info, "Market sentiment trending bearish this week"),
            ],
            risk_factors: vec![
                factor("Market Correlation", 8.5, Impact::High),
                factor("Collection Age", 3.2, Impact::Low),
                factor("Holder Concentration", 6.8, Impact::Medium),
                factor("Trading Volume", 7.1, Impact::High),
                factor("Social Sentiment", 4.5, Impact::Medium),
            ],
        }
    }

    #[must_use]
    pub fn level(&self) -> RiskLevel {
        RiskLevel::for_risk_score(self.overall_score)
    }

    /// Rotation of the overall gauge, 0..=360.
    #[must_use]
    pub fn gauge_rotation_degrees(&self) -> f64 {
        self.overall_score / 10.0 * 360.0
    }

    /// Chart slices. Colours are fixed per category, not derived from
    /// the score.
    #[must_use]
    pub fn distribution(&self) -> [Slice; 4] {
        [
            Slice { name: "Market Risk", value: self.market_risk, color: RiskLevel::High.color() },
            Slice { name: "Liquidity Risk", value: self.liquidity_risk, color: RiskLevel::Medium.color() },
            Slice { name: "Volatility Risk", value: self.volatility_risk, color: RiskLevel::High.color() },
            Slice { name: "Project Risk", value: self.project_risk, color: RiskLevel::Low.color() },
        ]
    }

    /// Category scores in display order, for the progress bars.
    #[must_use]
    pub fn categories(&self) -> [(&'static str, f64); 4] {
        [
            ("Market Risk", self.market_risk),
            ("Liquidity Risk", self.liquidity_risk),
            ("Volatility Risk", self.volatility_risk),
            ("Project Risk", self.project_risk),
        ]
    }
}

/// Width of a category bar for a score out of 10.
#[must_use]
pub fn bar_percent(score: f64) -> f64 {
    score * 10.0
}

// =============================================================================
// PANEL
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskPanel;

impl Panel for RiskPanel {
    type Input = ();
    type Output = RiskReport;
    const NAME: &'static str = "risk";

    fn validate(&self, (): &()) -> Result<(), ValidationError> {
        Ok(())
    }

    fn fallback(&self, (): &()) -> RiskReport {
        RiskReport::baseline()
    }

    fn demo_notice(&self) -> Notice {
        Notice::demo("Showing sample risk data - risk service not available")
    }
}

/// Local stand-in for a risk backend.
#[derive(Debug)]
pub struct SimulatedRiskSource {
    first: AtomicBool,
}

impl Default for SimulatedRiskSource {
    fn default() -> Self {
        Self { first: AtomicBool::new(true) }
    }
}

#[async_trait]
impl Source<RiskPanel> for SimulatedRiskSource {
    async fn fetch(&self, _panel: &RiskPanel, (): &()) -> Result<RiskReport, ApiError> {
        let delay = if self.first.swap(false, Ordering::SeqCst) { FIRST_LOAD_DELAY } else { REFRESH_DELAY };
        debug!(?delay, "simulating risk analysis");
        tokio::time::sleep(delay).await;
        Ok(RiskReport::baseline())
    }
}

#[cfg(test)]
#[path = "risk_test.rs"]
mod tests;
