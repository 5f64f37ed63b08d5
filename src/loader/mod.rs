//! Loader: the request/fallback/refresh contract shared by every panel.
//!
//! DESIGN
//! ======
//! A [`Panel`] describes validation and its demo record; a [`Source`]
//! produces the real record. [`Loader`] glues the two into one state
//! machine:
//!
//! ```text
//! Idle/Success/Fallback --trigger--> Loading --ok--> Success
//!                                            --err-> Fallback (+ demo notice)
//! ```
//!
//! Re-entry while `Loading` is ignored. Every fetch is stamped with a
//! generation; `cancel()` bumps it so a late response is discarded
//! instead of committed. A fetch future dropped mid-flight (e.g. an
//! aborted refresh task) puts the loader back to `Idle`.
//!
//! State lives behind a std `Mutex` that is never held across an await.

pub mod notice;
pub mod refresh;

pub use notice::{Notice, NoticeLevel, Notices};
pub use refresh::{RefreshTask, spawn_refresh_task};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;

// =============================================================================
// ERRORS
// =============================================================================

/// Input rejected before any request is made. Display text is shown inline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a wallet address")]
    EmptyAddress,
    #[error("Please enter a valid Ethereum wallet address (0x...)")]
    InvalidAddress,
    #[error("Please enter a collection name")]
    EmptyQuery,
    #[error("Please enter a message")]
    EmptyMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("nothing to refresh: no request has been made yet")]
    NothingToRefresh,
}

// =============================================================================
// PANEL + SOURCE
// =============================================================================

/// Per-panel strategy: what counts as valid input and what to show when
/// the source fails.
pub trait Panel: Send + Sync + 'static {
    type Input: Clone + Send + Sync + 'static;
    type Output: Clone + Send + Sync + 'static;

    /// Short name used in logs.
    const NAME: &'static str;

    /// Synchronous input check. Runs before any request.
    ///
    /// # Errors
    ///
    /// Returns the inline error to show for rejected input.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Demonstration record substituted when the source fails.
    fn fallback(&self, input: &Self::Input) -> Self::Output;

    /// Notice emitted alongside the fallback record.
    fn demo_notice(&self) -> Notice;
}

/// Request producer for a panel.
#[async_trait]
pub trait Source<P: Panel>: Send + Sync {
    async fn fetch(&self, panel: &P, input: &P::Input) -> Result<P::Output, ApiError>;
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Live,
    Demo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub origin: Origin,
}

/// What a `trigger`/`refresh` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The source answered and its record is current.
    Live,
    /// The source failed and the demo record is current.
    Fallback,
    /// A fetch was already in flight; nothing changed.
    Ignored,
    /// The loader was cancelled while this fetch was in flight.
    Discarded,
}

/// Point-in-time copy of a loader's state for rendering.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub phase: Phase,
    pub current: Option<Loaded<T>>,
    pub error: Option<ValidationError>,
    pub last_updated: Option<OffsetDateTime>,
}

impl<T> Snapshot<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.current.as_ref().map(|loaded| &loaded.value)
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.current.as_ref().is_some_and(|loaded| loaded.origin == Origin::Demo)
    }
}

struct LoaderState<P: Panel> {
    phase: Phase,
    current: Option<Loaded<P::Output>>,
    error: Option<ValidationError>,
    last_input: Option<P::Input>,
    last_updated: Option<OffsetDateTime>,
    generation: u64,
}

// =============================================================================
// LOADER
// =============================================================================

pub struct Loader<P: Panel> {
    panel: Arc<P>,
    source: Arc<dyn Source<P>>,
    state: Arc<Mutex<LoaderState<P>>>,
    notices: Option<Notices>,
    timeout: Duration,
}

impl<P: Panel> Clone for Loader<P> {
    fn clone(&self) -> Self {
        Self {
            panel: Arc::clone(&self.panel),
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            notices: self.notices.clone(),
            timeout: self.timeout,
        }
    }
}

impl<P: Panel> Loader<P> {
    #[must_use]
    pub fn new(panel: P, source: Arc<dyn Source<P>>) -> Self {
        Self {
            panel: Arc::new(panel),
            source,
            state: Arc::new(Mutex::new(LoaderState {
                phase: Phase::Idle,
                current: None,
                error: None,
                last_input: None,
                last_updated: None,
                generation: 0,
            })),
            notices: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_notices(mut self, notices: Notices) -> Self {
        self.notices = Some(notices);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn panel(&self) -> &P {
        &self.panel
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<P::Output> {
        let state = self.lock();
        Snapshot {
            phase: state.phase,
            current: state.current.clone(),
            error: state.error.clone(),
            last_updated: state.last_updated,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().phase == Phase::Loading
    }

    #[must_use]
    pub fn last_input(&self) -> Option<P::Input> {
        self.lock().last_input.clone()
    }

    /// Validate `input` without fetching. A rejection is kept as the
    /// inline error.
    ///
    /// # Errors
    ///
    /// Returns the validation error for rejected input.
    pub fn check(&self, input: &P::Input) -> Result<(), ValidationError> {
        self.panel.validate(input).inspect_err(|err| {
            self.lock().error = Some(err.clone());
        })
    }

    /// Validate `input` and, if it passes, run one fetch.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Invalid`] when validation fails; the source is
    /// not called and the error is kept as the inline error.
    pub async fn trigger(&self, input: P::Input) -> Result<Outcome, LoadError> {
        self.check(&input)?;
        Ok(self.run(input).await)
    }

    /// Re-run the last validated input.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NothingToRefresh`] before the first trigger.
    pub async fn refresh(&self) -> Result<Outcome, LoadError> {
        let input = self.last_input().ok_or(LoadError::NothingToRefresh)?;
        self.trigger(input).await
    }

    /// Drop interest in the in-flight fetch, if any. Returns whether a
    /// fetch was pending.
    pub fn cancel(&self) -> bool {
        let mut state = self.lock();
        if state.phase != Phase::Loading {
            return false;
        }
        state.generation = state.generation.wrapping_add(1);
        state.phase = Phase::Idle;
        debug!(panel = P::NAME, "in-flight fetch cancelled");
        true
    }

    async fn run(&self, input: P::Input) -> Outcome {
        let generation = {
            let mut state = self.lock();
            if state.phase == Phase::Loading {
                debug!(panel = P::NAME, "fetch already in flight; trigger ignored");
                return Outcome::Ignored;
            }
            state.phase = Phase::Loading;
            state.error = None;
            state.last_input = Some(input.clone());
            state.generation = state.generation.wrapping_add(1);
            state.generation
        };
        let _in_flight = InFlight { state: self.state.as_ref(), generation };

        let result = match tokio::time::timeout(self.timeout, self.source.fetch(self.panel.as_ref(), &input)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(self.timeout)),
        };

        let mut state = self.lock();
        if state.generation != generation {
            debug!(panel = P::NAME, "stale response discarded");
            return Outcome::Discarded;
        }
        state.last_updated = Some(OffsetDateTime::now_utc());

        match result {
            Ok(value) => {
                state.current = Some(Loaded { value, origin: Origin::Live });
                state.phase = Phase::Success;
                Outcome::Live
            }
            Err(e) => {
                warn!(panel = P::NAME, error = %e, "fetch failed; showing demo data");
                state.current = Some(Loaded { value: self.panel.fallback(&input), origin: Origin::Demo });
                state.phase = Phase::Fallback;
                drop(state);
                if let Some(notices) = &self.notices {
                    notices.push(self.panel.demo_notice());
                }
                Outcome::Fallback
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoaderState<P>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resets `Loading` to `Idle` if the fetch future is dropped before it
/// commits. A no-op after a normal commit or a cancel.
struct InFlight<'a, P: Panel> {
    state: &'a Mutex<LoaderState<P>>,
    generation: u64,
}

impl<P: Panel> Drop for InFlight<'_, P> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == self.generation && state.phase == Phase::Loading {
            state.phase = Phase::Idle;
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
