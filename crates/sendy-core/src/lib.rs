//! sendy-core — the pure heart of the sendy wallet login.
//!
//! Everything in this crate is synchronous and side-effect free, apart from
//! [`config::Config::load`] which touches the filesystem.
//!
//! # Layers
//!
//! ```text
//! raw keystrokes ──► phone::normalize_edit ──► subscriber buffer + cursor
//!                          │
//!                          └──► phone::normalize ──► CanonicalPhone ──► activate
//! raw code       ──► sms::validate_code      ──► SmsCode        ──► confirm
//!
//! state::SubmissionState  Initial ──► Loading ──► Success | Error
//! ```
//!
//! The gateway calls themselves live in `sendy-gateway`; this crate only owns
//! the values that flow into and out of them.

pub mod config;
pub mod error;
pub mod phone;
pub mod sms;
pub mod state;
pub mod types;

pub use error::{GatewayError, TransitionError, ValidationError};
pub use state::{Failure, Phase, SubmissionState, Transition};
pub use types::{Activation, CanonicalPhone, Confirmation, SmsCode};
