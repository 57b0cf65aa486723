//! Submission state machine shared by the phone and SMS screens.
//!
//! ```text
//!            Submit              Resolve
//! Initial ──────────► Loading ──────────► Success ──NavigateAway──► Departed
//!    │                 │   ▲                 │
//!    │ Reject     Fail │   │ Submit          │ Reset
//!    ▼                 ▼   │                 ▼
//!  Error ◄─────────────────┘              Initial
//! ```
//!
//! States are plain values. [`SubmissionState::apply`] is a pure reducer: it
//! never mutates, it returns the next state or the reason the transition was
//! refused. `Submit` while `Loading` is refused with
//! [`TransitionError::Busy`], which is how a screen keeps at most one request
//! in flight.

use crate::error::{GatewayError, TransitionError, ValidationError};

// ---------------------------------------------------------------------------
// Failure
// ---------------------------------------------------------------------------

/// What the `Error` state shows the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    /// Confirmation attempts left, when the server reported them.
    pub attempts_left: Option<u32>,
    /// No attempts left; the flow has to start over.
    pub exhausted: bool,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attempts_left: None,
            exhausted: false,
        }
    }
}

impl From<ValidationError> for Failure {
    fn from(err: ValidationError) -> Self {
        Failure::new(err.to_string())
    }
}

impl From<&GatewayError> for Failure {
    fn from(err: &GatewayError) -> Self {
        Self {
            message: err.to_string(),
            attempts_left: err.attempts_left(),
            exhausted: err.is_exhausted(),
        }
    }
}

// ---------------------------------------------------------------------------
// Phase / Transition
// ---------------------------------------------------------------------------

/// Payload-free discriminant of [`SubmissionState`], for logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Initial,
    Loading,
    Success,
    Error,
    Departed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Initial => write!(f, "initial"),
            Phase::Loading => write!(f, "loading"),
            Phase::Success => write!(f, "success"),
            Phase::Error => write!(f, "error"),
            Phase::Departed => write!(f, "departed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<T> {
    /// A request was issued.
    Submit,
    /// The outstanding request succeeded.
    Resolve(T),
    /// The outstanding request failed.
    Fail(Failure),
    /// Local validation failed; no request was issued.
    Reject(Failure),
    /// The screen was re-entered after a success; input is kept.
    Reset,
    /// The user left the screen after a success. Terminal.
    NavigateAway,
}

impl<T> Transition<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Transition::Submit => "submit",
            Transition::Resolve(_) => "resolve",
            Transition::Fail(_) => "fail",
            Transition::Reject(_) => "reject",
            Transition::Reset => "reset",
            Transition::NavigateAway => "navigate-away",
        }
    }
}

// ---------------------------------------------------------------------------
// SubmissionState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState<T> {
    Initial,
    Loading,
    Success(T),
    Error(Failure),
    Departed,
}

impl<T> Default for SubmissionState<T> {
    fn default() -> Self {
        SubmissionState::Initial
    }
}

impl<T> SubmissionState<T> {
    /// Compute the state that follows `transition`.
    pub fn apply(&self, transition: Transition<T>) -> Result<Self, TransitionError> {
        use SubmissionState as S;
        use Transition as Tr;

        match (self, transition) {
            (S::Departed, _) => Err(TransitionError::Departed),
            (S::Loading, Tr::Submit) => Err(TransitionError::Busy),
            (S::Initial | S::Error(_), Tr::Submit) => Ok(S::Loading),
            (S::Loading, Tr::Resolve(value)) => Ok(S::Success(value)),
            (S::Loading, Tr::Fail(failure)) => Ok(S::Error(failure)),
            (S::Initial | S::Error(_), Tr::Reject(failure)) => Ok(S::Error(failure)),
            (S::Success(_), Tr::Reset) => Ok(S::Initial),
            (S::Success(_), Tr::NavigateAway) => Ok(S::Departed),
            (from, transition) => Err(TransitionError::Invalid {
                from: from.phase(),
                transition: transition.name(),
            }),
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            SubmissionState::Initial => Phase::Initial,
            SubmissionState::Loading => Phase::Loading,
            SubmissionState::Success(_) => Phase::Success,
            SubmissionState::Error(_) => Phase::Error,
            SubmissionState::Departed => Phase::Departed,
        }
    }

    /// A request is outstanding; inputs and the submit action are disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::Loading)
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, SubmissionState::Initial | SubmissionState::Error(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            SubmissionState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            SubmissionState::Error(failure) => Some(failure),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
