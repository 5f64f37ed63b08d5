//! Plain-text rendering of the dashboard for terminals.
//!
//! Each function takes a loader snapshot and returns a block of lines.
//! Loading, demo and last-updated state are shown in a status line under
//! the panel title.

use time::OffsetDateTime;

use crate::loader::{Phase, Snapshot};
use crate::panels::chat::{Conversation, Role};
use crate::panels::collection::{self, CollectionReport};
use crate::panels::market::MarketSnapshot;
use crate::panels::risk::{self, RiskReport};
use crate::panels::wallet::WalletReport;

pub const TITLE: &str = "NFT Intelligence";
pub const SUBTITLE: &str = "AI-Powered NFT Analytics Platform";
pub const TAGLINE: &str = "Unlock the power of artificial intelligence to analyze, predict, and optimize your NFT investments with real-time market insights and risk assessments.";

#[must_use]
pub fn hero() -> String {
    [TITLE, SUBTITLE, "", TAGLINE].join("\n")
}

/// `HH:MM:SS`, the format of every "last updated" stamp.
#[must_use]
pub fn clock(at: OffsetDateTime) -> String {
    format!("{:02}:{:02}:{:02}", at.hour(), at.minute(), at.second())
}

fn header<T>(title: &str, snap: &Snapshot<T>) -> Vec<String> {
    let mut status = Vec::new();
    if snap.phase == Phase::Loading {
        status.push("loading...".to_owned());
    }
    if snap.is_demo() {
        status.push("demo data".to_owned());
    }
    if let Some(at) = snap.last_updated {
        status.push(format!("updated {}", clock(at)));
    }
    let mut lines = vec![format!("== {title} ==")];
    if !status.is_empty() {
        lines.push(format!("[{}]", status.join(" | ")));
    }
    if let Some(err) = &snap.error {
        lines.push(format!("! {err}"));
    }
    lines
}

#[must_use]
pub fn conversation(conversation: &Conversation, loading: bool) -> String {
    let mut lines = vec!["== AI Chat ==".to_owned()];
    for message in conversation.messages() {
        let who = match message.role {
            Role::User => "you",
            Role::Assistant if message.demo => "ai (demo)",
            Role::Assistant => "ai",
        };
        lines.push(format!("{} {who}: {}", clock(message.timestamp), message.content));
    }
    if loading {
        lines.push("ai is typing...".to_owned());
    }
    lines.join("\n")
}

#[must_use]
pub fn wallet(snap: &Snapshot<WalletReport>) -> String {
    let mut lines = header("Wallet Analysis", snap);
    let Some(report) = snap.value() else {
        lines.push("Enter a wallet address to analyze.".to_owned());
        return lines.join("\n");
    };
    lines.extend([
        format!("Address:       {}", report.address),
        format!("Balance:       {}", report.balance),
        format!("NFTs:          {}", report.nft_count),
        format!("Total value:   {}", report.total_value),
        format!("Risk score:    {}/5 ({})", report.risk_score, report.risk_level()),
        format!("Last activity: {}", report.last_activity),
    ]);
    if !report.top_collections.is_empty() {
        lines.push("Top collections:".to_owned());
        lines.extend(
            report
                .top_collections
                .iter()
                .map(|c| format!("  {} x{} ({})", c.name, c.count, c.value)),
        );
    }
    if !report.recent_transactions.is_empty() {
        lines.push("Recent transactions:".to_owned());
        lines.extend(
            report
                .recent_transactions
                .iter()
                .map(|t| format!("  {:<8} {} {} ({})", t.kind, t.collection, t.price, t.timestamp)),
        );
    }
    lines.join("\n")
}

#[must_use]
pub fn market(snap: &Snapshot<MarketSnapshot>) -> String {
    let mut lines = header("Market Insights", snap);
    let Some(m) = snap.value() else {
        lines.push("Loading market data...".to_owned());
        return lines.join("\n");
    };
    lines.extend([
        format!("24h volume:    {}", m.total_volume),
        format!("Transactions:  {}", m.daily_transactions),
        format!("Average price: {}", m.average_price),
        format!("Market cap:    {}", m.market_cap),
    ]);
    if let Some(peak) = m.peak_volume() {
        lines.push(format!("Peak volume:   {} at {}", peak.volume, peak.time));
    }
    for (label, movers) in [("Top gainers", &m.top_gainers), ("Top losers", &m.top_losers)] {
        if movers.is_empty() {
            continue;
        }
        lines.push(format!("{label}:"));
        lines.extend(
            movers
                .iter()
                .map(|mv| format!("  {:<20} {:>7} {} vol {}", mv.name, mv.change, mv.price, mv.volume)),
        );
    }
    lines.join("\n")
}

#[must_use]
pub fn collection(snap: &Snapshot<CollectionReport>) -> String {
    let mut lines = header("Collection Analysis", snap);
    let Some(c) = snap.value() else {
        lines.push(format!("Popular: {}", collection::quick_picks().join(", ")));
        return lines.join("\n");
    };
    lines.extend([
        format!("{} (rank #{})", c.name, c.market_rank),
        c.description.clone(),
        format!("Floor:    {}", c.floor_price),
        format!("Volume:   {}", c.total_volume),
        format!("Holders:  {}", c.holders),
        format!("Items:    {}", c.items),
        format!(
            "Social:   twitter {} / discord {}{}",
            c.social_metrics.twitter,
            c.social_metrics.discord,
            if c.social_metrics.website { " / website" } else { "" }
        ),
    ]);
    if !c.rarity.is_empty() {
        lines.push("Rare traits:".to_owned());
        lines.extend(
            c.rarity
                .iter()
                .map(|r| format!("  {:<20} {:>5}% floor {}", r.trait_name, r.percentage, r.floor)),
        );
    }
    lines.join("\n")
}

#[must_use]
pub fn risk(snap: &Snapshot<RiskReport>) -> String {
    let mut lines = header("Risk Assessment", snap);
    let Some(r) = snap.value() else {
        lines.push("Analyzing portfolio risk factors...".to_owned());
        return lines.join("\n");
    };
    lines.push(format!("Overall: {}/10 ({} Risk)", r.overall_score, r.level()));
    for (name, score) in r.categories() {
        lines.push(format!("  {name:<16} {} {score}", bar(risk::bar_percent(score))));
    }
    if !r.alerts.is_empty() {
        lines.push("Alerts:".to_owned());
        lines.extend(r.alerts.iter().map(|a| format!("  [{:?}] {}", a.kind, a.message)));
    }
    if !r.recommendations.is_empty() {
        lines.push("Recommendations:".to_owned());
        lines.extend(r.recommendations.iter().map(|rec| format!("  - {rec}")));
    }
    lines.join("\n")
}

/// Twenty-cell bar for a 0..=100 percentage.
fn bar(percent: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = ((percent.clamp(0.0, 100.0) / 5.0).round() as usize).min(20);
    format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled))
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
