//! Wallet analysis panel.
//!
//! Input is a raw address string. The backend may answer with the bare
//! record or with `{ "success": true, "data": <record> }`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::RiskLevel;
use crate::api::{self, ApiError, ApiRequest, Endpoint, Remote};
use crate::loader::{Notice, Panel, ValidationError};

static ADDRESS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("address pattern compiles"));

/// True for a `0x`-prefixed, 40-hex-digit address. No trimming.
#[must_use]
pub fn is_valid_address(address: &str) -> bool {
    ADDRESS_PATTERN.is_match(address)
}

// =============================================================================
// RECORD
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletReport {
    pub address: String,
    pub balance: String,
    pub nft_count: u64,
    pub total_value: String,
    /// Out of 5.
    pub risk_score: f64,
    pub last_activity: String,
    #[serde(default)]
    pub top_collections: Vec<CollectionHolding>,
    #[serde(default)]
    pub recent_transactions: Vec<WalletTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionHolding {
    pub name: String,
    pub count: u64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTransaction {
    #[serde(rename = "type")]
    pub kind: String,
    pub collection: String,
    pub price: String,
    pub timestamp: String,
}

impl WalletReport {
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::for_wallet_score(self.risk_score)
    }

    /// Sample portfolio shown when the backend is unreachable.
    #[must_use]
    pub fn demo(address: &str) -> Self {
        let holding = |name: &str, count, value: &str| CollectionHolding {
            name: name.to_owned(),
            count,
            value: value.to_owned(),
        };
        let tx = |kind: &str, collection: &str, price: &str, timestamp: &str| WalletTransaction {
            kind: kind.to_owned(),
            collection: collection.to_owned(),
            price: price.to_owned(),
            timestamp: timestamp.to_owned(),
        };
        Self {
            address: address.to_owned(),
            balance: "2.45 ETH".to_owned(),
            nft_count: 127,
            total_value: "$8,432.50".to_owned(),
            risk_score: 3.2,
            last_activity: "2 hours ago".to_owned(),
            top_collections: vec![
                holding("Bored Ape Yacht Club", 3, "$4,200"),
                holding("CryptoPunks", 1, "$2,800"),
                holding("Azuki", 5, "$1,200"),
            ],
            recent_transactions: vec![
                tx("Purchase", "Art Blocks", "0.8 ETH", "2h ago"),
                tx("Sale", "Doodles", "1.2 ETH", "5h ago"),
                tx("Transfer", "Moonbirds", "0 ETH", "1d ago"),
            ],
        }
    }
}

// =============================================================================
// PANEL
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct WalletPanel;

impl Panel for WalletPanel {
    type Input = String;
    type Output = WalletReport;
    const NAME: &'static str = "wallet";

    fn validate(&self, address: &String) -> Result<(), ValidationError> {
        if address.trim().is_empty() {
            return Err(ValidationError::EmptyAddress);
        }
        if !is_valid_address(address) {
            return Err(ValidationError::InvalidAddress);
        }
        Ok(())
    }

    fn fallback(&self, address: &String) -> WalletReport {
        WalletReport::demo(address)
    }

    fn demo_notice(&self) -> Notice {
        Notice::demo("Showing sample data - API endpoint not available")
    }
}

impl Remote for WalletPanel {
    fn request(&self, address: &String) -> ApiRequest {
        ApiRequest::post(Endpoint::AnalyzeWallet, json!({ "address": address }))
    }

    fn parse(&self, body: Value) -> Result<WalletReport, ApiError> {
        api::decode(api::unwrap_envelope(body)?)
    }
}

#[cfg(test)]
#[path = "wallet_test.rs"]
mod tests;
