//! NFT Intelligence dashboard client.
//!
//! ARCHITECTURE
//! ============
//! - [`config`]: backend origin, timeouts and intervals
//! - [`api`]: HTTP client and endpoint table
//! - [`loader`]: per-panel request/fallback/refresh state machine
//! - [`panels`]: the five panels and their records
//! - [`dashboard`]: composition of all panels over one backend
//! - [`render`]: plain-text views of panel snapshots

pub mod api;
pub mod config;
pub mod dashboard;
pub mod loader;
pub mod panels;
pub mod render;
