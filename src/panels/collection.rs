//! Collection analysis panel with local autocomplete.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::api::{self, ApiError, ApiRequest, Endpoint, Remote};
use crate::loader::{Notice, Panel, ValidationError};

/// Names offered by autocomplete, in display order.
pub const POPULAR_COLLECTIONS: [&str; 6] = [
    "Bored Ape Yacht Club",
    "CryptoPunks",
    "Azuki",
    "Doodles",
    "Art Blocks Curated",
    "Pudgy Penguins",
];

const MAX_SUGGESTIONS: usize = 3;
const QUICK_PICKS: usize = 4;

/// Popular collections whose name contains `query`, ignoring case.
/// Empty input yields nothing.
#[must_use]
pub fn suggest(query: &str) -> Vec<&'static str> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    POPULAR_COLLECTIONS
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// One-click shortcuts shown under the search box.
#[must_use]
pub fn quick_picks() -> &'static [&'static str] {
    &POPULAR_COLLECTIONS[..QUICK_PICKS]
}

// =============================================================================
// RECORD
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionReport {
    pub name: String,
    pub description: String,
    pub floor_price: String,
    pub total_volume: String,
    pub holders: u64,
    pub items: u64,
    pub market_rank: u32,
    #[serde(default)]
    pub price_history: Vec<DatedPrice>,
    #[serde(default)]
    pub volume_history: Vec<DatedVolume>,
    #[serde(default)]
    pub rarity: Vec<TraitRarity>,
    pub social_metrics: SocialMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedPrice {
    pub date: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedVolume {
    pub date: String,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitRarity {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub percentage: f64,
    pub floor: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMetrics {
    pub twitter: u64,
    pub discord: u64,
    pub website: bool,
}

impl CollectionReport {
    #[must_use]
    pub fn demo(name: &str) -> Self {
        let days = ["7d ago", "6d ago", "5d ago", "4d ago", "3d ago", "2d ago", "1d ago"];
        let prices = [2.2, 2.4, 2.1, 2.6, 2.9, 2.7, 2.8];
        let volumes = [120.0, 85.0, 95.0, 160.0, 200.0, 145.0, 180.0];
        let rarity = |trait_name: &str, percentage, floor: &str| TraitRarity {
            trait_name: trait_name.to_owned(),
            percentage,
            floor: floor.to_owned(),
        };

        Self {
            name: name.to_owned(),
            description: "A premium NFT collection featuring unique digital art with strong community focus and utility."
                .to_owned(),
            floor_price: "2.8 ETH".to_owned(),
            total_volume: "45,234 ETH".to_owned(),
            holders: 8642,
            items: 10_000,
            market_rank: 15,
            price_history: days
                .iter()
                .zip(prices)
                .map(|(date, price)| DatedPrice { date: (*date).to_owned(), price })
                .collect(),
            volume_history: days
                .iter()
                .zip(volumes)
                .map(|(date, volume)| DatedVolume { date: (*date).to_owned(), volume })
                .collect(),
            rarity: vec![
                rarity("Background: Rare", 2.5, "15.2 ETH"),
                rarity("Eyes: Laser", 1.8, "12.8 ETH"),
                rarity("Mouth: Gold", 5.2, "8.4 ETH"),
                rarity("Hat: Crown", 3.1, "11.2 ETH"),
            ],
            social_metrics: SocialMetrics { twitter: 125_000, discord: 45_000, website: true },
        }
    }
}

// =============================================================================
// PANEL
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionPanel;

impl Panel for CollectionPanel {
    type Input = String;
    type Output = CollectionReport;
    const NAME: &'static str = "collection";

    fn validate(&self, query: &String) -> Result<(), ValidationError> {
        if query.trim().is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(())
    }

    fn fallback(&self, query: &String) -> CollectionReport {
        CollectionReport::demo(query.trim())
    }

    fn demo_notice(&self) -> Notice {
        Notice::demo("Showing sample collection data - API endpoint not available")
    }
}

impl Remote for CollectionPanel {
    fn request(&self, query: &String) -> ApiRequest {
        ApiRequest::post(Endpoint::AnalyzeCollection, json!({ "name": query.trim() }))
    }

    fn parse(&self, body: Value) -> Result<CollectionReport, ApiError> {
        api::decode(body)
    }
}

#[cfg(test)]
#[path = "collection_test.rs"]
mod tests;
