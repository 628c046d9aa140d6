/// Client-side refresh coordination.
///
/// The coordinator owns the decision of when a new fetch of weather readings
/// is permitted: it enforces the manual-refresh cooldown, persists the
/// last-successful-fetch timestamp across restarts, and drives the recurring
/// poll. It is constructed once per process with every dependency injected;
/// there is no ambient state.
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::WeatherReading;
use crate::errors::ApiResult;

/// Minimum wall-clock interval between two manually-triggered refreshes.
pub const COOLDOWN_MS: u64 = 60_000;

/// Cadence of the automatic poll, deliberately equal to the cooldown.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// How long a cooldown rejection notice stays visible.
pub const NOTICE_TTL_MS: u64 = 3_000;

/// Durable key under which the last refresh timestamp is stored.
pub const STATE_KEY: &str = "lastWeatherRefreshTime";

/// Source of the reading collection the coordinator polls.
#[async_trait]
pub trait ReadingsSource: Send + Sync {
    async fn fetch(&self) -> ApiResult<Vec<WeatherReading>>;
}

/// Durable storage for the last-successful-refresh timestamp.
pub trait StateStore {
    /// Load the persisted epoch-millisecond timestamp; 0 when unset.
    fn load(&self) -> u64;
    /// Persist the timestamp of a successful fetch.
    fn save(&self, timestamp_ms: u64) -> std::io::Result<()>;
}

/// Clock capability, split so the cooldown can be computed from a monotonic
/// source while the persisted value stays wall-clock.
pub trait Clock {
    /// Wall-clock epoch milliseconds, for persistence.
    fn now_ms(&self) -> u64;
    /// Monotonic milliseconds since an arbitrary origin.
    fn monotonic_ms(&self) -> u64;
}

/// Production clock backed by SystemTime and Instant.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn monotonic_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// File-backed state store: one file holding the string-encoded
/// epoch-millisecond integer. A missing or malformed file reads as 0.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the platform data directory, e.g. `~/.local/share/gdash/`.
    pub fn default_location() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gdash");
        Self::new(dir.join(STATE_KEY))
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> u64 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    fn save(&self, timestamp_ms: u64) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, timestamp_ms.to_string())
    }
}

/// Outcome of a refresh trigger.
#[derive(Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fetch completed and the timestamp was persisted.
    Completed,
    /// Manual trigger rejected inside the cooldown window; no network call
    /// was made. Carries the remaining whole seconds.
    CoolingDown { seconds_remaining: u64 },
    /// Fetch failed; state is untouched and the last-known-good collection
    /// is retained.
    Failed,
    /// The coordinator was cancelled or the completion was superseded by a
    /// newer attempt; no state was mutated.
    Discarded,
}

/// Event emitted by the poll loop for the rendering layer.
#[derive(Debug)]
pub enum RefreshEvent<'a> {
    /// A fetch (scheduled or manual) completed; the collection is
    /// newest-first as delivered by the server.
    Refreshed(&'a [WeatherReading]),
    /// A manual trigger was rejected inside the cooldown window.
    CoolingDown { notice: &'a str },
}

/// Transient advisory message shown after a rejected manual refresh.
struct Notice {
    text: String,
    posted_at_ms: u64,
}

/// Ticket handed out when a fetch attempt begins. Completions are only
/// applied if the ticket is still the current generation, so a
/// late-settling stale fetch cannot overwrite a newer state.
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket {
    generation: u64,
}

/// Single-owner coordinator for the periodic and manual refresh of the
/// weather reading collection.
pub struct RefreshCoordinator<S: StateStore, C: Clock> {
    source: Box<dyn ReadingsSource>,
    store: S,
    clock: C,
    cancel: CancellationToken,
    /// Persisted wall-clock timestamp of the last successful fetch.
    last_refresh_ms: u64,
    /// Monotonic reading captured at the last in-process success.
    last_success_mono: Option<u64>,
    generation: u64,
    loading: bool,
    readings: Vec<WeatherReading>,
    notice: Option<Notice>,
}

impl<S: StateStore, C: Clock> RefreshCoordinator<S, C> {
    pub fn new(source: Box<dyn ReadingsSource>, store: S, clock: C, cancel: CancellationToken) -> Self {
        let last_refresh_ms = store.load();
        if last_refresh_ms > 0 {
            debug!("restored refresh state: last refresh at {}ms", last_refresh_ms);
        }
        Self {
            source,
            store,
            clock,
            cancel,
            last_refresh_ms,
            last_success_mono: None,
            generation: 0,
            loading: false,
            readings: Vec::new(),
            notice: None,
        }
    }

    /// Whether a fetch is currently outstanding. Advisory only; callers use
    /// it to disable repeated submission, not as a mutual-exclusion guarantee.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last-known-good reading collection, newest-first.
    pub fn readings(&self) -> &[WeatherReading] {
        &self.readings
    }

    /// Epoch milliseconds of the last successful fetch; 0 when never.
    pub fn last_refresh_ms(&self) -> u64 {
        self.last_refresh_ms
    }

    /// Current advisory notice, if it has not yet expired.
    pub fn notice(&self) -> Option<&str> {
        let notice = self.notice.as_ref()?;
        if self.clock.now_ms().saturating_sub(notice.posted_at_ms) < NOTICE_TTL_MS {
            Some(&notice.text)
        } else {
            None
        }
    }

    /// Milliseconds of cooldown still to elapse, or None when a manual
    /// refresh is permitted.
    ///
    /// Within a process the computation uses the monotonic clock captured at
    /// the last success; the persisted wall-clock value only applies across
    /// restarts. A never-refreshed state (timestamp 0) always permits.
    fn cooldown_remaining_ms(&self) -> Option<u64> {
        let elapsed = match self.last_success_mono {
            Some(mono) => self.clock.monotonic_ms().saturating_sub(mono),
            None if self.last_refresh_ms > 0 => {
                self.clock.now_ms().saturating_sub(self.last_refresh_ms)
            }
            None => return None,
        };
        if elapsed < COOLDOWN_MS {
            Some(COOLDOWN_MS - elapsed)
        } else {
            None
        }
    }

    /// Begin a fetch attempt, superseding any still-outstanding one.
    fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Apply the settlement of a fetch attempt.
    ///
    /// A stale ticket (one superseded by a newer `begin`) is discarded
    /// without touching the collection or the persisted timestamp.
    fn complete(
        &mut self,
        ticket: FetchTicket,
        result: ApiResult<Vec<WeatherReading>>,
    ) -> RefreshOutcome {
        if ticket.generation != self.generation {
            debug!("discarding stale fetch completion (generation {})", ticket.generation);
            return RefreshOutcome::Discarded;
        }
        self.loading = false;

        match result {
            Ok(readings) => {
                let now = self.clock.now_ms();
                self.readings = readings;
                self.last_refresh_ms = now;
                self.last_success_mono = Some(self.clock.monotonic_ms());
                if let Err(e) = self.store.save(now) {
                    warn!("failed to persist refresh state: {}", e);
                }
                debug!("refresh completed with {} readings", self.readings.len());
                RefreshOutcome::Completed
            }
            Err(e) => {
                // Degrade silently: keep the last-known-good collection and
                // wait for the next tick or manual trigger.
                warn!("refresh failed, keeping previous data: {}", e);
                RefreshOutcome::Failed
            }
        }
    }

    async fn do_fetch(&mut self) -> RefreshOutcome {
        let ticket = self.begin();
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            res = self.source.fetch() => Some(res),
            _ = cancel.cancelled() => None,
        };
        match result {
            Some(result) => self.complete(ticket, result),
            None => {
                self.loading = false;
                RefreshOutcome::Discarded
            }
        }
    }

    /// Scheduled refresh. Always permitted; the poll is self-paced at
    /// exactly the cooldown period.
    pub async fn trigger_automatic(&mut self) -> RefreshOutcome {
        if self.cancel.is_cancelled() {
            return RefreshOutcome::Discarded;
        }
        self.do_fetch().await
    }

    /// User-initiated refresh, subject to the cooldown. A rejection makes no
    /// network call and posts a self-expiring notice with the remaining
    /// whole seconds.
    pub async fn trigger_manual(&mut self) -> RefreshOutcome {
        if self.cancel.is_cancelled() {
            return RefreshOutcome::Discarded;
        }

        if let Some(remaining) = self.cooldown_remaining_ms() {
            let seconds_remaining = remaining.div_ceil(1000);
            let plural = if seconds_remaining == 1 { "" } else { "s" };
            self.notice = Some(Notice {
                text: format!("wait {seconds_remaining} second{plural} before refreshing again"),
                posted_at_ms: self.clock.now_ms(),
            });
            return RefreshOutcome::CoolingDown { seconds_remaining };
        }

        self.notice = None;
        self.do_fetch().await
    }

    /// Drive the poll until cancellation. The interval fires once
    /// immediately, then every 60 seconds; each message on `manual` is a
    /// user-initiated refresh request, subject to the cooldown. A closed
    /// manual channel just disables that path.
    pub async fn run<F>(&mut self, mut manual: mpsc::Receiver<()>, mut on_event: F)
    where
        F: FnMut(RefreshEvent<'_>),
    {
        enum Wake {
            Cancelled,
            Tick,
            Manual,
            ManualClosed,
        }

        let mut ticker = interval(POLL_INTERVAL);
        let cancel = self.cancel.clone();
        let mut manual_open = true;
        info!("starting refresh poll (interval: {:?})", POLL_INTERVAL);

        loop {
            let wake = tokio::select! {
                _ = cancel.cancelled() => Wake::Cancelled,
                _ = ticker.tick() => Wake::Tick,
                msg = manual.recv(), if manual_open => match msg {
                    Some(()) => Wake::Manual,
                    None => Wake::ManualClosed,
                },
            };

            match wake {
                Wake::Cancelled => {
                    info!("refresh poll cancelled");
                    return;
                }
                Wake::ManualClosed => manual_open = false,
                Wake::Tick => {
                    if self.trigger_automatic().await == RefreshOutcome::Completed {
                        on_event(RefreshEvent::Refreshed(&self.readings));
                    }
                }
                Wake::Manual => match self.trigger_manual().await {
                    RefreshOutcome::Completed => {
                        on_event(RefreshEvent::Refreshed(&self.readings));
                    }
                    RefreshOutcome::CoolingDown { .. } => {
                        if let Some(notice) = self.notice() {
                            on_event(RefreshEvent::CoolingDown { notice });
                        }
                    }
                    RefreshOutcome::Failed => {
                        warn!("manual refresh failed; keeping previous data");
                    }
                    RefreshOutcome::Discarded => {}
                },
            }
        }
    }
}
