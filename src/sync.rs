//! Incremental feed synchronization.
//!
//! [`FeedSynchronizer`] owns the in-memory timeline and the pagination
//! cursor. Each cycle fetches one page, merges the unseen items onto the
//! front of the timeline, and adopts the server's cursor. The synchronizer
//! holds no timer; the caller schedules cycles (see
//! [`DEFAULT_REFRESH_INTERVAL`]) and reads state through the snapshot
//! accessors or the event channel.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::auth::SessionManager;
use crate::error::{CirrusError, CirrusResult};
use crate::models::{FeedItem, TimelineResponse};

/// Page size requested from the feed endpoint.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Suggested interval between synchronization cycles for callers that
/// poll continuously.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// A feed item admitted to the timeline, paired with its derived identity.
///
/// The key is computed once at admission, so identity (and therefore
/// equality and UI list identity) never changes afterwards - including for
/// items whose key had to be generated.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    /// Derived identity used for deduplication and list identity.
    pub key: String,
    /// The wire item as received.
    pub item: FeedItem,
}

/// Result of one synchronization cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Number of items prepended to the timeline.
    pub appended: usize,
    /// True when the call was a no-op because a cycle was already running.
    pub skipped: bool,
}

/// Events published by the synchronizer.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// New items were prepended to the timeline, newest-page order.
    Appended { entries: Vec<TimelineEntry> },
}

/// Mutable feed state. Never locked across an await.
struct FeedState {
    timeline: Vec<TimelineEntry>,
    cursor: Option<String>,
    last_error: Option<CirrusError>,
    events: Option<UnboundedSender<FeedEvent>>,
}

/// Drives periodic fetches of the remote feed into an owned, deduplicated
/// timeline.
pub struct FeedSynchronizer {
    api: Arc<ApiClient>,
    session: Arc<SessionManager>,
    page_limit: u32,
    state: Mutex<FeedState>,
    /// Exclusivity gate: at most one cycle in flight. Losers of
    /// `try_lock` return immediately instead of queuing.
    sync_gate: tokio::sync::Mutex<()>,
    loading: AtomicBool,
}

impl FeedSynchronizer {
    /// Create a synchronizer with the default page limit.
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionManager>) -> Self {
        Self::with_page_limit(api, session, DEFAULT_PAGE_LIMIT)
    }

    /// Create a synchronizer with a custom page limit.
    pub fn with_page_limit(
        api: Arc<ApiClient>,
        session: Arc<SessionManager>,
        page_limit: u32,
    ) -> Self {
        Self {
            api,
            session,
            page_limit,
            state: Mutex::new(FeedState {
                timeline: Vec::new(),
                cursor: None,
                last_error: None,
                events: None,
            }),
            sync_gate: tokio::sync::Mutex::new(()),
            loading: AtomicBool::new(false),
        }
    }

    /// Run one synchronization cycle.
    ///
    /// If a cycle is already in flight the call returns immediately with
    /// `skipped = true` and `appended = 0`; it never queues and never
    /// fails for that reason. On any failure the timeline and cursor are
    /// left untouched, the error lands in [`last_error`](Self::last_error),
    /// and the same error is returned; retry is the caller's decision.
    pub async fn synchronize_once(&self) -> CirrusResult<SyncOutcome> {
        let Ok(_gate) = self.sync_gate.try_lock() else {
            debug!("synchronization already in flight, skipping");
            return Ok(SyncOutcome {
                appended: 0,
                skipped: true,
            });
        };

        self.loading.store(true, Ordering::SeqCst);
        self.lock_state().last_error = None;

        let result = self.run_cycle().await;
        self.loading.store(false, Ordering::SeqCst);

        match result {
            Ok(appended) => Ok(SyncOutcome {
                appended,
                skipped: false,
            }),
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "synchronization cycle failed");
                self.lock_state().last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    async fn run_cycle(&self) -> CirrusResult<usize> {
        let token = self.session.ensure_valid_token().await?;
        let cursor = self.lock_state().cursor.clone();

        let response = self
            .api
            .fetch_timeline(&token, self.page_limit, cursor.as_deref())
            .await?;

        let mut state = self.lock_state();
        let fresh = merge_page(&mut state, response);
        let appended = fresh.len();

        if appended > 0 {
            debug!(appended, "merged new items into timeline");
            if let Some(events) = &state.events {
                // Best effort; a dropped receiver is not an error.
                let _ = events.send(FeedEvent::Appended { entries: fresh });
            }
        }

        Ok(appended)
    }

    /// Snapshot of the current timeline, newest first.
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        self.lock_state().timeline.clone()
    }

    /// The current pagination cursor.
    pub fn cursor(&self) -> Option<String> {
        self.lock_state().cursor.clone()
    }

    /// True while a synchronization cycle is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// The error from the most recent failed cycle, cleared when a new
    /// cycle starts.
    pub fn last_error(&self) -> Option<CirrusError> {
        self.lock_state().last_error.clone()
    }

    /// Subscribe to feed events.
    ///
    /// Returns the receiving end of an unbounded channel; events flow
    /// until the receiver is dropped. A second call replaces the previous
    /// subscription.
    pub fn subscribe(&self) -> UnboundedReceiver<FeedEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock_state().events = Some(tx);
        rx
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FeedState> {
        self.state.lock().expect("feed state lock poisoned")
    }
}

/// Merge one fetched page into the feed state.
///
/// Items whose derived identity is already present are dropped (including
/// duplicates within the page itself); the remainder is prepended in
/// server order and the cursor is replaced with the server's value, even
/// when that value is absent. Returns the admitted entries.
fn merge_page(state: &mut FeedState, response: TimelineResponse) -> Vec<TimelineEntry> {
    let mut known: HashSet<String> = state.timeline.iter().map(|e| e.key.clone()).collect();

    let mut fresh: Vec<TimelineEntry> = Vec::new();
    for item in response.feed {
        let key = item
            .stable_key()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        if known.insert(key.clone()) {
            fresh.push(TimelineEntry { key, item });
        }
    }

    state.cursor = response.cursor;

    if !fresh.is_empty() {
        let mut merged = fresh.clone();
        merged.append(&mut state.timeline);
        state.timeline = merged;
    }

    fresh
}
