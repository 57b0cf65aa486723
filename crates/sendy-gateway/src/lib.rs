//! sendy-gateway — the wallet backend seam.
//!
//! The flow never talks to the vendor SDK directly. It holds an
//! `Arc<dyn WalletGateway>` and awaits `activate` / `confirm`; everything
//! about transports and callbacks stays behind the trait.
//!
//! - [`sdk::SdkGateway`] adapts a callback-style SDK ([`sdk::CallbackSdk`]).
//! - [`simulated::SimulatedGateway`] is an in-process backend for the shell
//!   and for tests.

pub mod sdk;
pub mod simulated;

use async_trait::async_trait;
use sendy_core::{Activation, CanonicalPhone, Confirmation, SmsCode};

pub use sendy_core::GatewayError;

/// The two backend calls the login flow needs.
#[async_trait]
pub trait WalletGateway: Send + Sync {
    /// Start wallet activation for `phone`; on success an SMS code is sent.
    async fn activate(&self, phone: &CanonicalPhone) -> Result<Activation, GatewayError>;

    /// Confirm the activation of `phone` with the SMS `code`.
    async fn confirm(
        &self,
        code: &SmsCode,
        phone: &CanonicalPhone,
    ) -> Result<Confirmation, GatewayError>;
}
