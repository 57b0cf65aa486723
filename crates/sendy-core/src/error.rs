//! Error types shared by the normalizer, the state machine and the gateways.

use crate::state::Phase;
use thiserror::Error;

/// A malformed user input. Returned, never panicked on.
///
/// The `Display` text is the message shown to the user; [`code`](Self::code)
/// is the stable identifier for callers that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid phone number format, enter it as +7XXXXXXXXXX")]
    InvalidFormat,
    #[error("the code must contain exactly 6 digits")]
    InvalidCode,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidFormat => "INVALID_FORMAT",
            ValidationError::InvalidCode => "INVALID_CODE",
        }
    }
}

/// A transition the submission state machine refuses to take.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// A request is already outstanding for this flow.
    #[error("a request is already in flight")]
    Busy,
    /// The flow navigated away; it accepts nothing further.
    #[error("the flow has already navigated away")]
    Departed,
    #[error("cannot apply {transition} while {from}")]
    Invalid {
        from: Phase,
        transition: &'static str,
    },
}

/// Failure reported by a wallet gateway for `activate` or `confirm`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The SDK refused to launch the request at all.
    #[error("request was not started: {0}")]
    NotStarted(String),
    /// The server answered with a non-zero error number.
    #[error("server error {code}: {message}")]
    Rejected {
        code: i32,
        message: String,
        attempts_left: Option<u32>,
    },
    /// Server error 806: the SMS code did not match.
    #[error("wrong confirmation code, {attempts_left} attempt(s) left")]
    WrongCode { attempts_left: u32 },
    /// No confirmation attempts remain; login must start over.
    #[error("all confirmation attempts are used up, request a new code")]
    AttemptsExhausted,
    #[error("server returned no data")]
    EmptyResponse,
    #[error("fatal transport error: {0}")]
    Fatal(String),
}

impl GatewayError {
    /// Remaining confirmation attempts, when the server reported them.
    pub fn attempts_left(&self) -> Option<u32> {
        match self {
            GatewayError::Rejected { attempts_left, .. } => *attempts_left,
            GatewayError::WrongCode { attempts_left } => Some(*attempts_left),
            GatewayError::AttemptsExhausted => Some(0),
            _ => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, GatewayError::AttemptsExhausted)
    }
}
