//! Data-bound block state machine
//!
//! Each data-bound block instance owns a fetch/render cycle:
//!
//! ```text
//! Created ──mount──▶ Fetching ──ok──▶ Rendered ◀─────────────┐
//!                        │                │                  │
//!                        └──err──▶ RenderedError             │
//!                                         │                  │
//!                    timer / manual refresh / trait edit ────┘
//! ```
//!
//! Rules the implementation must hold:
//!
//! - A fetch suspends only this block's rendering, never the canvas.
//! - The timer re-fetches only from a terminal state; manual and
//!   trait-driven triggers may race it. Every fetch carries a monotonic
//!   generation and only the response matching the latest generation is
//!   applied, so the block always settles into one consistent state.
//! - The source URL is configuration threaded into the one fetch routine;
//!   editing the URL trait swaps the configuration, never patches code.
//! - `destroy` cancels the pending timer deterministically and suppresses
//!   the effect of any in-flight fetch.

use crate::fetch::DataFetcher;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Configuration
// ============================================================================

/// Engine configuration shared by data-bound block instances
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Interval between timer-driven refreshes (60 s by default)
    pub refresh_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(60),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with the default refresh interval
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the refresh interval
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

// ============================================================================
// Renderer seam
// ============================================================================

/// Turns a fetched JSON payload into the block's inner markup.
///
/// Implemented by the templated and structured flavors; render errors are
/// reported as plain messages and leave the block showing
/// [`error_markup`](BlockRenderer::error_markup).
pub trait BlockRenderer: Send + Sync + 'static {
    /// Render the payload into markup
    fn render(&self, payload: &Value) -> Result<String, String>;

    /// The fixed markup shown when a fetch or render fails
    fn error_markup(&self) -> String;
}

// ============================================================================
// State machine
// ============================================================================

/// Render lifecycle of a data-bound block instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Instance exists but has not fetched yet
    Created,
    /// A fetch for this block is in flight
    Fetching,
    /// Last fetch rendered successfully
    Rendered,
    /// Last fetch failed; the error markup is showing
    RenderedError,
}

impl RenderState {
    /// Whether a timer-driven refresh may start from this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, RenderState::Rendered | RenderState::RenderedError)
    }
}

struct Cell {
    source_url: String,
    state: RenderState,
    output: String,
}

struct Inner {
    fetcher: Arc<dyn DataFetcher>,
    renderer: Box<dyn BlockRenderer>,
    refresh_interval: Duration,
    cell: Mutex<Cell>,
    /// Latest issued fetch generation; stale responses are dropped
    generation: AtomicU64,
    destroyed: AtomicBool,
    timer: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl Inner {
    async fn refresh_once(&self) {
        if self.destroyed.load(Ordering::SeqCst) {
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let url = {
            let mut cell = self.cell.lock();
            cell.state = RenderState::Fetching;
            cell.source_url.clone()
        };

        let result = self.fetcher.fetch_json(&url).await;

        // A destroyed block must not change state, and only the newest
        // fetch may apply its response (last writer wins).
        if self.destroyed.load(Ordering::SeqCst) {
            return;
        }
        if generation != self.generation.load(Ordering::SeqCst) {
            return;
        }

        let mut cell = self.cell.lock();
        match result {
            Ok(payload) => match self.renderer.render(&payload) {
                Ok(markup) => {
                    cell.state = RenderState::Rendered;
                    cell.output = markup;
                }
                Err(message) => {
                    tracing::error!(%url, error = %message, "failed to render block data");
                    cell.state = RenderState::RenderedError;
                    cell.output = self.renderer.error_markup();
                }
            },
            Err(err) => {
                tracing::error!(%url, error = %err, "failed to fetch block data");
                cell.state = RenderState::RenderedError;
                cell.output = self.renderer.error_markup();
            }
        }
    }
}

/// Handle to one data-bound block instance; cheap to clone
#[derive(Clone)]
pub struct DataBoundBlock {
    inner: Arc<Inner>,
}

impl DataBoundBlock {
    /// Create an instance in the `Created` state.
    ///
    /// Call [`mount`](DataBoundBlock::mount) to run the initial fetch and
    /// start the refresh timer.
    pub fn new(
        renderer: impl BlockRenderer,
        fetcher: Arc<dyn DataFetcher>,
        source_url: impl Into<String>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                renderer: Box::new(renderer),
                refresh_interval: config.refresh_interval,
                cell: Mutex::new(Cell {
                    source_url: source_url.into(),
                    state: RenderState::Created,
                    output: String::new(),
                }),
                generation: AtomicU64::new(0),
                destroyed: AtomicBool::new(false),
                timer: Mutex::new(None),
            }),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Run the initial fetch, then start the per-instance refresh timer.
    ///
    /// Every instance runs its own timer; nothing is shared across blocks.
    pub async fn mount(&self) {
        self.inner.refresh_once().await;
        self.start_timer();
    }

    fn start_timer(&self) {
        // A block destroyed while its initial fetch was in flight must not
        // come back to life with a running timer.
        if self.inner.destroyed.load(Ordering::SeqCst) {
            return;
        }
        let inner = Arc::clone(&self.inner);
        let interval = inner.refresh_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick of a tokio interval fires immediately; the
            // initial fetch already happened in mount.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if inner.destroyed.load(Ordering::SeqCst) {
                    break;
                }
                // The timer never interrupts a fetch already in flight.
                if inner.cell.lock().state.is_terminal() {
                    inner.refresh_once().await;
                }
            }
        });

        *self.inner.timer.lock() = Some(handle);
    }

    /// Manual refresh trigger (e.g. the block's refresh button). May race
    /// the timer; the generation counter arbitrates.
    pub async fn refresh(&self) {
        self.inner.refresh_once().await;
    }

    /// Reconfigure the data source URL (the `api-url` trait edit) and
    /// fetch from the new endpoint.
    ///
    /// Bumping into a new fetch generation drops any in-flight response
    /// for the old URL; no stale behavior survives the edit.
    pub async fn set_source_url(&self, url: impl Into<String>) {
        {
            let mut cell = self.inner.cell.lock();
            cell.source_url = url.into();
        }
        self.inner.refresh_once().await;
    }

    /// Destroy the instance: the pending timer is cancelled immediately and
    /// any in-flight fetch can no longer affect the block.
    pub fn destroy(&self) {
        self.inner.destroyed.store(true, Ordering::SeqCst);
        if let Some(handle) = self.inner.timer.lock().take() {
            handle.abort();
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current render state
    pub fn state(&self) -> RenderState {
        self.inner.cell.lock().state
    }

    /// Current rendered markup (empty before the first fetch resolves)
    pub fn output(&self) -> String {
        self.inner.cell.lock().output.clone()
    }

    /// Currently configured source URL
    pub fn source_url(&self) -> String {
        self.inner.cell.lock().source_url.clone()
    }

    /// Whether the instance has been destroyed
    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.load(Ordering::SeqCst)
    }

    /// Whether the refresh timer task is still alive
    pub fn timer_running(&self) -> bool {
        self.inner
            .timer
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{DataFetcher, FetchError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    struct TitleRenderer;

    impl BlockRenderer for TitleRenderer {
        fn render(&self, payload: &Value) -> Result<String, String> {
            let title = payload
                .get("title")
                .and_then(Value::as_str)
                .ok_or_else(|| "missing title".to_string())?;
            Ok(format!("<h3>{title}</h3>"))
        }

        fn error_markup(&self) -> String {
            "<p>Error loading data</p>".to_string()
        }
    }

    /// Records every requested URL and answers with a fixed payload.
    struct RecordingFetcher {
        calls: Mutex<Vec<String>>,
        payload: Value,
    }

    impl RecordingFetcher {
        fn new(payload: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                payload,
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl DataFetcher for RecordingFetcher {
        async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
            self.calls.lock().push(url.to_string());
            Ok(self.payload.clone())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl DataFetcher for FailingFetcher {
        async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
            Err(FetchError::Request {
                url: url.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    /// Sleeps before answering so tests can destroy or supersede the block
    /// while the fetch is in flight.
    struct SlowFetcher {
        delay: Duration,
        payload: Value,
        completed: AtomicUsize,
    }

    #[async_trait]
    impl DataFetcher for SlowFetcher {
        async fn fetch_json(&self, _url: &str) -> Result<Value, FetchError> {
            tokio::time::sleep(self.delay).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(self.payload.clone())
        }
    }

    fn fast_config() -> EngineConfig {
        EngineConfig::new().with_refresh_interval(Duration::from_secs(60))
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_mount_renders_initial_fetch() {
        let fetcher = RecordingFetcher::new(json!({"title": "Our Products"}));
        let block = DataBoundBlock::new(
            TitleRenderer,
            fetcher.clone(),
            "http://localhost:3000/api/data",
            &fast_config(),
        );

        assert_eq!(block.state(), RenderState::Created);
        block.mount().await;

        assert_eq!(block.state(), RenderState::Rendered);
        assert_eq!(block.output(), "<h3>Our Products</h3>");
        assert_eq!(fetcher.calls(), vec!["http://localhost:3000/api/data"]);
        assert!(block.timer_running());
        block.destroy();
    }

    #[tokio::test]
    async fn test_fetch_failure_shows_error_markup() {
        let block = DataBoundBlock::new(
            TitleRenderer,
            Arc::new(FailingFetcher),
            "http://localhost:3000/api/data",
            &fast_config(),
        );
        block.mount().await;

        assert_eq!(block.state(), RenderState::RenderedError);
        assert_eq!(block.output(), "<p>Error loading data</p>");
        block.destroy();
    }

    #[tokio::test]
    async fn test_malformed_payload_shows_error_markup() {
        let fetcher = RecordingFetcher::new(json!({"unexpected": true}));
        let block = DataBoundBlock::new(TitleRenderer, fetcher, "http://x", &fast_config());
        block.mount().await;

        assert_eq!(block.state(), RenderState::RenderedError);
        assert_eq!(block.output(), "<p>Error loading data</p>");
        block.destroy();
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_refreshes_at_interval() {
        let fetcher = RecordingFetcher::new(json!({"title": "T"}));
        let block = DataBoundBlock::new(TitleRenderer, fetcher.clone(), "http://x", &fast_config());
        block.mount().await;
        assert_eq!(fetcher.calls().len(), 1);

        tokio::time::advance(Duration::from_secs(61)).await;
        settle().await;
        assert_eq!(fetcher.calls().len(), 2);

        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(fetcher.calls().len(), 3);

        block.destroy();
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroy_cancels_timer() {
        let fetcher = RecordingFetcher::new(json!({"title": "T"}));
        let block = DataBoundBlock::new(TitleRenderer, fetcher.clone(), "http://x", &fast_config());
        block.mount().await;
        block.destroy();
        settle().await;

        assert!(!block.timer_running());
        tokio::time::advance(Duration::from_secs(300)).await;
        settle().await;
        // No further fetches after destruction.
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroy_during_inflight_fetch_suppresses_effect() {
        let fetcher = Arc::new(SlowFetcher {
            delay: Duration::from_secs(5),
            payload: json!({"title": "Late"}),
            completed: AtomicUsize::new(0),
        });
        let block = DataBoundBlock::new(TitleRenderer, fetcher.clone(), "http://x", &fast_config());

        let task = {
            let block = block.clone();
            tokio::spawn(async move { block.mount().await })
        };
        settle().await;
        assert_eq!(block.state(), RenderState::Fetching);

        block.destroy();
        tokio::time::advance(Duration::from_secs(6)).await;
        task.await.unwrap();

        // The response resolved but was suppressed; no timer survives.
        assert_eq!(fetcher.completed.load(Ordering::SeqCst), 1);
        assert_eq!(block.output(), "");
        assert!(!block.timer_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_generation_wins_the_race() {
        struct TwoSpeedFetcher {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl DataFetcher for TwoSpeedFetcher {
            async fn fetch_json(&self, _url: &str) -> Result<Value, FetchError> {
                let call = self.calls.fetch_add(1, Ordering::SeqCst);
                if call == 0 {
                    // First (timer-ish) fetch is slow and must lose.
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    Ok(json!({"title": "stale"}))
                } else {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    Ok(json!({"title": "fresh"}))
                }
            }
        }

        let fetcher = Arc::new(TwoSpeedFetcher {
            calls: AtomicUsize::new(0),
        });
        let block = DataBoundBlock::new(TitleRenderer, fetcher, "http://x", &fast_config());

        let slow = {
            let block = block.clone();
            tokio::spawn(async move { block.refresh().await })
        };
        settle().await;
        let fast = {
            let block = block.clone();
            tokio::spawn(async move { block.refresh().await })
        };

        tokio::time::advance(Duration::from_secs(11)).await;
        fast.await.unwrap();
        slow.await.unwrap();

        // The later-issued fetch resolved first and its result sticks.
        assert_eq!(block.state(), RenderState::Rendered);
        assert_eq!(block.output(), "<h3>fresh</h3>");
    }

    #[tokio::test]
    async fn test_trait_edit_retargets_next_fetch() {
        let fetcher = RecordingFetcher::new(json!({"title": "T"}));
        let block = DataBoundBlock::new(
            TitleRenderer,
            fetcher.clone(),
            "http://a.example/data",
            &fast_config(),
        );
        block.mount().await;

        block.set_source_url("http://b.example/data").await;
        block.refresh().await;

        let calls = fetcher.calls();
        assert_eq!(
            calls,
            vec![
                "http://a.example/data",
                "http://b.example/data",
                "http://b.example/data"
            ]
        );
        // The old URL is never fetched again after the edit.
        assert!(!calls[1..].contains(&"http://a.example/data".to_string()));
        block.destroy();
    }
}
