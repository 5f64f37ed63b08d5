//! Market insights panel. No input; refreshed on a fixed interval.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{self, ApiError, ApiRequest, Endpoint, Remote};
use crate::loader::{Notice, Panel, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub total_volume: String,
    pub daily_transactions: u64,
    pub average_price: String,
    pub market_cap: String,
    #[serde(default)]
    pub top_gainers: Vec<Mover>,
    #[serde(default)]
    pub top_losers: Vec<Mover>,
    #[serde(default)]
    pub volume_data: Vec<VolumePoint>,
    #[serde(default)]
    pub price_data: Vec<PricePoint>,
}

/// A collection in the gainers/losers lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mover {
    pub name: String,
    pub change: String,
    pub price: String,
    pub volume: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub time: String,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: String,
    pub price: f64,
}

impl MarketSnapshot {
    #[must_use]
    pub fn demo() -> Self {
        let mover = |name: &str, change: &str, price: &str, volume: &str| Mover {
            name: name.to_owned(),
            change: change.to_owned(),
            price: price.to_owned(),
            volume: volume.to_owned(),
        };
        let volume_data = [
            ("00:00", 450.0),
            ("04:00", 320.0),
            ("08:00", 680.0),
            ("12:00", 890.0),
            ("16:00", 1200.0),
            ("20:00", 980.0),
            ("24:00", 1150.0),
        ]
        .into_iter()
        .map(|(time, volume)| VolumePoint { time: time.to_owned(), volume })
        .collect();
        let price_data = [
            ("1h", 0.82),
            ("2h", 0.84),
            ("3h", 0.81),
            ("4h", 0.86),
            ("5h", 0.89),
            ("6h", 0.85),
            ("Now", 0.85),
        ]
        .into_iter()
        .map(|(time, price)| PricePoint { time: time.to_owned(), price })
        .collect();

        Self {
            total_volume: "1,234.5 ETH".to_owned(),
            daily_transactions: 15_847,
            average_price: "0.85 ETH".to_owned(),
            market_cap: "$2.1B".to_owned(),
            top_gainers: vec![
                mover("Art Blocks Curated", "+24.5%", "2.8 ETH", "145 ETH"),
                mover("Chromie Squiggle", "+18.2%", "1.2 ETH", "89 ETH"),
                mover("Ringers", "+15.7%", "0.95 ETH", "67 ETH"),
            ],
            top_losers: vec![
                mover("Cool Cats", "-12.3%", "0.45 ETH", "23 ETH"),
                mover("Lazy Lions", "-8.9%", "0.32 ETH", "18 ETH"),
                mover("Pudgy Penguins", "-7.2%", "1.8 ETH", "156 ETH"),
            ],
            volume_data,
            price_data,
        }
    }

    /// Highest point of the 24h volume series.
    #[must_use]
    pub fn peak_volume(&self) -> Option<&VolumePoint> {
        self.volume_data
            .iter()
            .max_by(|a, b| a.volume.total_cmp(&b.volume))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarketPanel;

impl MarketPanel {
    /// Notice shown after a manual refresh.
    #[must_use]
    pub fn refreshed_notice() -> Notice {
        Notice::info("Data Refreshed", "Market data has been updated")
    }
}

impl Panel for MarketPanel {
    type Input = ();
    type Output = MarketSnapshot;
    const NAME: &'static str = "market";

    fn validate(&self, (): &()) -> Result<(), ValidationError> {
        Ok(())
    }

    fn fallback(&self, (): &()) -> MarketSnapshot {
        MarketSnapshot::demo()
    }

    fn demo_notice(&self) -> Notice {
        Notice::demo("Showing sample market data - API endpoint not available")
    }
}

impl Remote for MarketPanel {
    fn request(&self, (): &()) -> ApiRequest {
        ApiRequest::get(Endpoint::MarketInsights)
    }

    fn parse(&self, body: Value) -> Result<MarketSnapshot, ApiError> {
        api::decode(body)
    }
}

#[cfg(test)]
#[path = "market_test.rs"]
mod tests;
