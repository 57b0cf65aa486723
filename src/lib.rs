//! sendy — wallet login core.
//!
//! Phone number normalization, SMS code validation and the submission flow
//! that drives the login and confirmation screens. The work lives in three
//! crates; this one re-exports them for the binary, the benches and the
//! integration harnesses.
//!
//! # Architecture
//!
//! ```text
//! sendy-core ──► sendy-gateway ──► sendy-flow ──► sendy (CLI)
//!  normalize      WalletGateway     App + shell
//!  validate       SdkGateway
//!  state machine  SimulatedGateway
//! ```

pub use sendy_core::{
    config, phone, sms, Activation, CanonicalPhone, Confirmation, Failure, GatewayError, Phase,
    SmsCode, SubmissionState, Transition, TransitionError, ValidationError,
};
pub use sendy_flow as flow;
pub use sendy_gateway as gateway;
