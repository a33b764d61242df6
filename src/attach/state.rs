//! Attachment state machine (pure Rust, no FFI, no timers).
//!
//! `AttachMachine::handle` is the whole decision logic: it takes one
//! [`AttachEvent`], moves to the next [`AttachState`] and returns the
//! [`Effect`]s the caller has to carry out. Running an `Attempt` effect and
//! feeding back `AttemptFinished` is the engine's job, which keeps this file
//! testable without a host UI or an event loop.
//!
//! ```text
//!            Requested                 AttemptFinished(true)
//!   Idle ───────────────► Searching ─────────────────────────► Attached
//!    ▲                     │  ▲  │                               │
//!    │        fail & n<max │  │  │ fail & n == max     TargetLost│
//!    │   ScheduleRetry ────┘  │  └──────────► GaveUp             │
//!    │         RetryElapsed ──┘                │ Requested        │
//!    │                                         ▼                  │
//!    └──────── DetachRequested (any) ◄── Searching ◄──────────────┘
//! ```
//!
//! A retry the scheduler cannot arm (`RetryUnavailable`) also ends in
//! `GaveUp`, so a search never waits on a timer that will not fire.

use std::time::Duration;

use crate::model::constants::*;

/// Bounded retry schedule for attachment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Number of searches (including the first) before giving up.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after every retry (1.0 = fixed).
    pub backoff_factor: f64,
    /// Upper bound for the delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            max_delay: Duration::from_millis(DEFAULT_MAX_RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        let mut policy = Self {
            max_attempts,
            initial_delay,
            backoff_factor: MIN_BACKOFF_FACTOR,
            max_delay: initial_delay,
        };
        policy.validate();
        policy
    }

    pub fn with_backoff(mut self, factor: f64, max_delay: Duration) -> Self {
        self.backoff_factor = factor;
        self.max_delay = max_delay;
        self.validate();
        self
    }

    /// Validates and clamps all values to valid ranges.
    pub fn validate(&mut self) {
        self.max_attempts = self.max_attempts.clamp(MIN_ATTEMPTS, MAX_ATTEMPTS);
        let min = Duration::from_millis(MIN_RETRY_DELAY_MS);
        let max = Duration::from_millis(MAX_RETRY_DELAY_MS);
        self.initial_delay = self.initial_delay.clamp(min, max);
        self.max_delay = self.max_delay.clamp(self.initial_delay, max);
        self.backoff_factor = if self.backoff_factor.is_finite() {
            self.backoff_factor.clamp(MIN_BACKOFF_FACTOR, MAX_BACKOFF_FACTOR)
        } else {
            MIN_BACKOFF_FACTOR
        };
    }
}

/// Progress of one attachment request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryState {
    /// Failed searches so far.
    pub attempt_count: u32,
    pub max_attempts: u32,
    /// Delay used for the next scheduled retry.
    pub next_delay: Duration,
}

impl RetryState {
    pub fn new(policy: &RetryPolicy) -> Self {
        Self {
            attempt_count: 0,
            max_attempts: policy.max_attempts,
            next_delay: policy.initial_delay,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempt_count >= self.max_attempts
    }

    /// Records a failed search. Returns the delay to wait before the next
    /// one, or `None` once the budget is spent.
    pub fn record_failure(&mut self, policy: &RetryPolicy) -> Option<Duration> {
        self.attempt_count += 1;
        if self.is_exhausted() {
            return None;
        }
        let delay = self.next_delay;
        let grown = delay.mul_f64(policy.backoff_factor);
        self.next_delay = grown.min(policy.max_delay).max(delay);
        Some(delay)
    }
}

/// Identifies one scheduled retry. A firing whose token is not the pending
/// one is stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RetryToken(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum AttachState {
    Idle,
    Searching {
        retry: RetryState,
        pending: Option<RetryToken>,
    },
    Attached {
        /// Failed searches before the successful one.
        failed_attempts: u32,
    },
    GaveUp {
        attempts: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttachEvent {
    Requested(RetryPolicy),
    AttemptFinished { attached: bool },
    RetryElapsed(RetryToken),
    /// The scheduler refused the pending token.
    RetryUnavailable(RetryToken),
    DetachRequested,
    /// The attached window is gone or no longer usable.
    TargetLost,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Search the host windows and install the overlay on a match.
    Attempt,
    ScheduleRetry { token: RetryToken, delay: Duration },
    CancelRetry(RetryToken),
    RemoveOverlay,
    ReportGaveUp { attempts: u32 },
}

/// Coarse status reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachStatus {
    Idle,
    Searching { attempts: u32 },
    Attached,
    GaveUp { attempts: u32 },
}

#[derive(Debug, Clone)]
pub struct AttachMachine {
    state: AttachState,
    policy: RetryPolicy,
    next_token: u64,
}

impl Default for AttachMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachMachine {
    pub fn new() -> Self {
        Self {
            state: AttachState::Idle,
            policy: RetryPolicy::default(),
            next_token: 0,
        }
    }

    pub fn state(&self) -> &AttachState {
        &self.state
    }

    /// Policy of the most recent request (reused after a lost target).
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn status(&self) -> AttachStatus {
        match &self.state {
            AttachState::Idle => AttachStatus::Idle,
            AttachState::Searching { retry, .. } => AttachStatus::Searching {
                attempts: retry.attempt_count,
            },
            AttachState::Attached { .. } => AttachStatus::Attached,
            AttachState::GaveUp { attempts } => AttachStatus::GaveUp { attempts: *attempts },
        }
    }

    pub fn retry_state(&self) -> Option<&RetryState> {
        match &self.state {
            AttachState::Searching { retry, .. } => Some(retry),
            _ => None,
        }
    }

    pub fn pending_retry(&self) -> Option<RetryToken> {
        match &self.state {
            AttachState::Searching { pending, .. } => *pending,
            _ => None,
        }
    }

    /// Applies one event and returns the effects to run, in order.
    pub fn handle(&mut self, event: AttachEvent) -> Vec<Effect> {
        let state = std::mem::replace(&mut self.state, AttachState::Idle);
        let (next, effects) = self.transition(state, event);
        self.state = next;
        effects
    }

    fn transition(&mut self, state: AttachState, event: AttachEvent) -> (AttachState, Vec<Effect>) {
        use AttachEvent as E;
        use AttachState as S;

        match (state, event) {
            (S::Idle | S::GaveUp { .. }, E::Requested(policy)) => {
                self.policy = policy;
                (self.searching(), vec![Effect::Attempt])
            }

            (S::Searching { retry, pending: None }, E::AttemptFinished { attached: true }) => (
                S::Attached {
                    failed_attempts: retry.attempt_count,
                },
                Vec::new(),
            ),

            (S::Searching { mut retry, pending: None }, E::AttemptFinished { attached: false }) => {
                match retry.record_failure(&self.policy) {
                    Some(delay) => {
                        let token = self.issue_token();
                        (
                            S::Searching {
                                retry,
                                pending: Some(token),
                            },
                            vec![Effect::ScheduleRetry { token, delay }],
                        )
                    }
                    None => {
                        let attempts = retry.attempt_count;
                        (
                            S::GaveUp { attempts },
                            vec![Effect::ReportGaveUp { attempts }],
                        )
                    }
                }
            }

            (S::Searching { retry, pending: Some(p) }, E::RetryElapsed(token)) if p == token => (
                S::Searching {
                    retry,
                    pending: None,
                },
                vec![Effect::Attempt],
            ),

            (S::Searching { retry, pending: Some(p) }, E::RetryUnavailable(token)) if p == token => {
                let attempts = retry.attempt_count;
                (
                    S::GaveUp { attempts },
                    vec![Effect::ReportGaveUp { attempts }],
                )
            }

            (S::Searching { pending, .. }, E::DetachRequested) => {
                (S::Idle, pending.map(Effect::CancelRetry).into_iter().collect())
            }

            (S::Attached { .. }, E::DetachRequested) => (S::Idle, vec![Effect::RemoveOverlay]),

            (S::Attached { .. }, E::TargetLost) => {
                (self.searching(), vec![Effect::RemoveOverlay, Effect::Attempt])
            }

            (S::Idle | S::GaveUp { .. }, E::DetachRequested) => (S::Idle, Vec::new()),

            // Duplicate requests, stale timers and late results change nothing.
            (state, _) => (state, Vec::new()),
        }
    }

    fn searching(&self) -> AttachState {
        AttachState::Searching {
            retry: RetryState::new(&self.policy),
            pending: None,
        }
    }

    fn issue_token(&mut self) -> RetryToken {
        self.next_token += 1;
        RetryToken(self.next_token)
    }
}
