//! Request lifecycle tracking.
//!
//! Every logical operation group (a cache's list fetch, its focused fetch,
//! the session's auth calls) owns one [`LifecycleTracker`]. Calls move it to
//! `Pending` when they start and to `Succeeded` or `Failed` when they end.

use std::fmt;

/// Status of one asynchronous operation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestLifecycle {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl RequestLifecycle {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestLifecycle::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestLifecycle::Idle => "idle",
            RequestLifecycle::Pending => "pending",
            RequestLifecycle::Succeeded => "succeeded",
            RequestLifecycle::Failed => "failed",
        }
    }
}

impl fmt::Display for RequestLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How resolutions of overlapping calls on one tracker are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResponsePolicy {
    /// Every resolution is applied; whichever resolves last wins, even if it
    /// was issued first.
    #[default]
    LastResolvedWins,
    /// Only the most recently issued call may apply its result. Older
    /// resolutions are discarded.
    LatestIssuedWins,
}

/// Monotonic id handed out by [`LifecycleTracker::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a finished call succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Lifecycle state plus the id of the most recently issued call.
#[derive(Debug, Clone, Default)]
pub struct LifecycleTracker {
    state: RequestLifecycle,
    latest_issued: u64,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RequestLifecycle {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// The id of the most recent call, if any call was started.
    pub fn latest_issued(&self) -> Option<RequestId> {
        (self.latest_issued > 0).then_some(RequestId(self.latest_issued))
    }

    /// Start a call: move to `Pending` and issue its id.
    pub fn begin(&mut self) -> RequestId {
        self.latest_issued += 1;
        self.state = RequestLifecycle::Pending;
        RequestId(self.latest_issued)
    }

    /// Return to `Idle`. Under [`StaleResponsePolicy::LatestIssuedWins`]
    /// every call still in flight becomes stale.
    pub fn invalidate(&mut self) {
        self.latest_issued += 1;
        self.state = RequestLifecycle::Idle;
    }

    /// Whether a resolution of `id` may be applied under `policy`.
    pub fn accepts(&self, id: RequestId, policy: StaleResponsePolicy) -> bool {
        match policy {
            StaleResponsePolicy::LastResolvedWins => true,
            StaleResponsePolicy::LatestIssuedWins => id.0 == self.latest_issued,
        }
    }

    /// End a call. Returns `false` (and leaves the state alone) when the
    /// policy discards the resolution as stale.
    pub fn finish(&mut self, id: RequestId, outcome: Outcome, policy: StaleResponsePolicy) -> bool {
        if !self.accepts(id, policy) {
            return false;
        }
        self.state = match outcome {
            Outcome::Success => RequestLifecycle::Succeeded,
            Outcome::Failure => RequestLifecycle::Failed,
        };
        true
    }
}
