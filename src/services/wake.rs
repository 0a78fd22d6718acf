use crate::config::Config;
use crate::models::error::AppError;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

/// Attempt budget and timing for the wake poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakePolicy {
    pub max_attempts: u32,
    pub interval_ms: u32,
    pub probe_timeout_ms: u32,
}

impl Default for WakePolicy {
    fn default() -> Self {
        Self {
            max_attempts: Config::WAKE_MAX_ATTEMPTS,
            interval_ms: Config::WAKE_INTERVAL_MS,
            probe_timeout_ms: Config::WAKE_PROBE_TIMEOUT_MS,
        }
    }
}

/// Shared stop flag for an in-progress poll
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }

    /// True if both handles share one flag.
    pub fn same_as(&self, other: &CancelToken) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeOutcome {
    Awake { attempt: u32 },
    Exhausted { attempts: u32 },
    Cancelled { attempts: u32 },
}

/// Poller state shown in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WakeState {
    #[default]
    Idle,
    Polling {
        attempt: u32,
        max_attempts: u32,
    },
    Awake,
    Failed,
}

impl WakeState {
    pub fn is_polling(&self) -> bool {
        matches!(self, WakeState::Polling { .. })
    }

    /// State after a finished poll. Cancellation returns to idle.
    pub fn from_outcome(outcome: WakeOutcome) -> Self {
        match outcome {
            WakeOutcome::Awake { .. } => WakeState::Awake,
            WakeOutcome::Exhausted { .. } => WakeState::Failed,
            WakeOutcome::Cancelled { .. } => WakeState::Idle,
        }
    }

    pub fn status_text(&self) -> String {
        match self {
            WakeState::Idle => String::new(),
            WakeState::Polling { attempt: 0, .. } => "⏳ Waking server…".to_string(),
            WakeState::Polling {
                attempt,
                max_attempts,
            } => format!("⏳ Attempt {attempt}/{max_attempts}…"),
            WakeState::Awake => "✓ Server is awake! Ready to predict.".to_string(),
            WakeState::Failed => "✗ Server unreachable. Try again.".to_string(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            WakeState::Idle => "wake-status",
            WakeState::Polling { .. } => "wake-status checking",
            WakeState::Awake => "wake-status awake",
            WakeState::Failed => "wake-status failed",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            WakeState::Awake => "WAKE AGAIN",
            _ => "WAKE SERVER",
        }
    }
}

/// Probes until the first success, the attempt budget runs out, or `cancel` fires.
///
/// `probe` receives the attempt number and should enforce its own timeout.
/// `sleep` is awaited between failed attempts, never after the last one.
/// `on_attempt` is called before each probe.
pub async fn poll_until_awake<P, PFut, S, SFut, R>(
    policy: WakePolicy,
    cancel: &CancelToken,
    mut probe: P,
    mut sleep: S,
    mut on_attempt: R,
) -> WakeOutcome
where
    P: FnMut(u32) -> PFut,
    PFut: Future<Output = Result<(), AppError>>,
    S: FnMut(u32) -> SFut,
    SFut: Future<Output = ()>,
    R: FnMut(u32),
{
    let mut attempts = 0;

    for attempt in 1..=policy.max_attempts {
        if cancel.is_cancelled() {
            return WakeOutcome::Cancelled { attempts };
        }

        attempts = attempt;
        on_attempt(attempt);

        // Errors and timeouts only mean "still waking"
        if probe(attempt).await.is_ok() {
            return WakeOutcome::Awake { attempt };
        }

        if attempt < policy.max_attempts {
            sleep(policy.interval_ms).await;
        }
    }

    if cancel.is_cancelled() {
        return WakeOutcome::Cancelled { attempts };
    }

    WakeOutcome::Exhausted { attempts }
}
