//! The dashboard: every panel wired to one backend.
//!
//! DESIGN
//! ======
//! `Dashboard` owns one loader per panel, the notice channel they share,
//! and the chat conversation. Nothing runs until [`Dashboard::start`],
//! which spawns the market poll and the first risk load. Both background
//! tasks are owned here and stop when the dashboard is dropped.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{ApiClient, ApiError};
use crate::config::ApiConfig;
use crate::loader::{
    LoadError, Loader, Notice, Notices, Outcome, Panel, RefreshTask, Source, spawn_refresh_task,
};
use crate::panels::{
    ChatPanel, CollectionPanel, Conversation, MarketPanel, RiskPanel, SimulatedRiskSource, WalletPanel, collection,
};

pub struct Dashboard {
    config: ApiConfig,
    client: ApiClient,
    notices: Notices,
    notice_rx: Option<mpsc::Receiver<Notice>>,
    chat: Loader<ChatPanel>,
    wallet: Loader<WalletPanel>,
    market: Loader<MarketPanel>,
    collection: Loader<CollectionPanel>,
    risk: Loader<RiskPanel>,
    conversation: Conversation,
    market_refresh: Option<RefreshTask>,
    risk_boot: Option<JoinHandle<()>>,
}

impl Dashboard {
    /// Build the client and every loader from `config`. Spawns nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = ApiClient::new(&config)?;
        let (notices, notice_rx) = Notices::channel(config.notice_capacity);

        let chat = remote_loader(ChatPanel, &client, &notices, &config);
        let wallet = remote_loader(WalletPanel, &client, &notices, &config);
        let market = remote_loader(MarketPanel, &client, &notices, &config);
        let collection = remote_loader(CollectionPanel, &client, &notices, &config);
        let risk = Loader::new(RiskPanel, Arc::new(SimulatedRiskSource::default()) as Arc<dyn Source<RiskPanel>>)
            .with_notices(notices.clone())
            .with_timeout(config.request_timeout());

        info!(base_url = %config.base_url, "dashboard configured");
        Ok(Self {
            config,
            client,
            notices,
            notice_rx: Some(notice_rx),
            chat,
            wallet,
            market,
            collection,
            risk,
            conversation: Conversation::new(),
            market_refresh: None,
            risk_boot: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Receiving half of the notice channel. Only the first call returns it.
    pub fn take_notices(&mut self) -> Option<mpsc::Receiver<Notice>> {
        self.notice_rx.take()
    }

    /// Spawn the market poll and the first risk load. Idempotent.
    pub fn start(&mut self) {
        if self.market_refresh.is_some() {
            debug!("dashboard already started");
            return;
        }
        self.market_refresh =
            Some(spawn_refresh_task(self.market.clone(), (), self.config.market_refresh_interval()));

        let risk = self.risk.clone();
        self.risk_boot = Some(tokio::spawn(async move {
            if let Err(e) = risk.trigger(()).await {
                debug!(error = %e, "initial risk load skipped");
            }
        }));
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.market_refresh.is_some()
    }

    // =========================================================================
    // PANEL ACTIONS
    // =========================================================================

    /// Send a chat message and record the exchange.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank message.
    pub async fn chat(&mut self, text: &str) -> Result<Outcome, LoadError> {
        self.conversation.send(&self.chat, text).await
    }

    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank or malformed address.
    pub async fn analyze_wallet(&self, address: &str) -> Result<Outcome, LoadError> {
        self.wallet.trigger(address.to_owned()).await
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank collection name.
    pub async fn analyze_collection(&self, name: &str) -> Result<Outcome, LoadError> {
        self.collection.trigger(name.to_owned()).await
    }

    #[must_use]
    pub fn suggest(&self, query: &str) -> Vec<&'static str> {
        collection::suggest(query)
    }

    /// Reload market data now and announce it.
    ///
    /// # Errors
    ///
    /// Never fails in practice; market input needs no validation.
    pub async fn refresh_market(&self) -> Result<Outcome, LoadError> {
        let outcome = self.market.trigger(()).await?;
        if outcome != Outcome::Ignored {
            self.notices.push(MarketPanel::refreshed_notice());
        }
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Never fails in practice; risk input needs no validation.
    pub async fn refresh_risk(&self) -> Result<Outcome, LoadError> {
        self.risk.trigger(()).await
    }

    /// Raw body of `GET /health`. A failed check is also announced as an
    /// error notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<String, ApiError> {
        self.client.health().await.inspect_err(|e| {
            self.notices.push(Notice::error(format!("Backend health check failed: {e}")));
        })
    }

    /// JSON served by `GET /demo`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn demo(&self) -> Result<Value, ApiError> {
        self.client.demo().await
    }

    // =========================================================================
    // LOADERS
    // =========================================================================

    #[must_use]
    pub fn chat_loader(&self) -> &Loader<ChatPanel> {
        &self.chat
    }

    #[must_use]
    pub fn wallet(&self) -> &Loader<WalletPanel> {
        &self.wallet
    }

    #[must_use]
    pub fn market(&self) -> &Loader<MarketPanel> {
        &self.market
    }

    #[must_use]
    pub fn collection(&self) -> &Loader<CollectionPanel> {
        &self.collection
    }

    #[must_use]
    pub fn risk(&self) -> &Loader<RiskPanel> {
        &self.risk
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        if let Some(handle) = self.risk_boot.take() {
            handle.abort();
        }
        self.market_refresh = None;
        let cancelled = [
            self.chat.cancel(),
            self.wallet.cancel(),
            self.market.cancel(),
            self.collection.cancel(),
            self.risk.cancel(),
        ];
        debug!(in_flight = cancelled.iter().filter(|c| **c).count(), "dashboard torn down");
    }
}

fn remote_loader<P>(panel: P, client: &ApiClient, notices: &Notices, config: &ApiConfig) -> Loader<P>
where
    P: Panel,
    ApiClient: Source<P>,
{
    Loader::new(panel, Arc::new(client.clone()) as Arc<dyn Source<P>>)
        .with_notices(notices.clone())
        .with_timeout(config.request_timeout())
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
