//! Adapter from the vendor's callback-style SDK to [`WalletGateway`].
//!
//! The SDK takes a completion callback per call and may refuse to launch the
//! request synchronously. [`SdkGateway`] hands it a boxed closure that
//! forwards the outcome into a `oneshot` channel, then awaits the receiver.
//! A dropped callback surfaces as [`GatewayError::Fatal`] instead of hanging.
//!
//! # Reply mapping for `confirm`
//!
//! | Reply | Result |
//! |-------|--------|
//! | transport failure | `Fatal` |
//! | no body | `EmptyResponse` |
//! | `err_no == 0`, `active == Some(true)` | `WalletActivated` (device marked active) |
//! | `err_no == 0`, otherwise | `NeedBankSelection` |
//! | `err_no != 0`, `abuse > 0`, error 806 | `WrongCode` |
//! | `err_no != 0`, `abuse > 0` | `Rejected` with attempts |
//! | `err_no != 0`, no attempts left | `AttemptsExhausted` |

use crate::WalletGateway;
use async_trait::async_trait;
use sendy_core::{Activation, CanonicalPhone, Confirmation, GatewayError, SmsCode};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Server error number for a mismatched SMS code.
pub const WRONG_CODE_ERR: i32 = 806;
/// Delivery channel passed to the SDK for confirmation codes.
pub const CONFIRM_CHANNEL: &str = "sms";

// ---------------------------------------------------------------------------
// SDK surface
// ---------------------------------------------------------------------------

/// A server reply as the SDK reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkReply<B> {
    /// Zero on success.
    pub err_no: i32,
    /// The SDK's textual rendering of the reply, used in error messages.
    pub text: String,
    pub body: Option<B>,
}

/// Body of a successful `login_at_auth` reply. The flow needs nothing from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginBody;

/// Body of an `activate_wallet` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivateBody {
    pub active: Option<bool>,
    /// Card numbers linked to the wallet.
    pub pans: Vec<String>,
    /// Confirmation attempts left, reported on failures.
    pub abuse: Option<u32>,
}

/// What the SDK passes to a completion callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkOutcome<B> {
    Completed(SdkReply<B>),
    /// The request failed below the protocol level.
    Failed(String),
}

pub type Completion<B> = Box<dyn FnOnce(SdkOutcome<B>) + Send + 'static>;

/// The SDK refused to start a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchError(pub String);

/// Callback-style vendor SDK.
pub trait CallbackSdk: Send + Sync {
    fn login_at_auth(&self, phone: &str, done: Completion<LoginBody>) -> Result<(), LaunchError>;

    fn activate_wallet(
        &self,
        token: &str,
        channel: &str,
        done: Completion<ActivateBody>,
    ) -> Result<(), LaunchError>;

    /// Persist that this device holds an activated wallet.
    fn mark_device_activated(&self);
}

// ---------------------------------------------------------------------------
// SdkGateway
// ---------------------------------------------------------------------------

pub struct SdkGateway<S> {
    sdk: Arc<S>,
}

impl<S: CallbackSdk> SdkGateway<S> {
    pub fn new(sdk: Arc<S>) -> Self {
        Self { sdk }
    }
}

/// Wrap a oneshot sender as an SDK completion callback.
fn completion<B: Send + 'static>() -> (Completion<B>, oneshot::Receiver<SdkOutcome<B>>) {
    let (tx, rx) = oneshot::channel();
    let done: Completion<B> = Box::new(move |outcome| {
        // The receiver is gone only if the caller stopped waiting.
        let _ = tx.send(outcome);
    });
    (done, rx)
}

async fn settle<B>(rx: oneshot::Receiver<SdkOutcome<B>>) -> Result<SdkOutcome<B>, GatewayError> {
    rx.await
        .map_err(|_| GatewayError::Fatal("SDK dropped the completion callback".to_string()))
}

#[async_trait]
impl<S: CallbackSdk> WalletGateway for SdkGateway<S> {
    async fn activate(&self, phone: &CanonicalPhone) -> Result<Activation, GatewayError> {
        tracing::debug!(phone = %phone, "sdk: login_at_auth");
        let (done, rx) = completion();
        self.sdk
            .login_at_auth(phone.as_str(), done)
            .map_err(|LaunchError(detail)| {
                tracing::warn!(%detail, "sdk: login_at_auth was not started");
                GatewayError::NotStarted(detail)
            })?;

        match settle(rx).await? {
            SdkOutcome::Completed(reply) if reply.err_no == 0 => {
                tracing::info!("sdk: activation started, code sent");
                Ok(Activation {
                    phone: phone.clone(),
                })
            }
            SdkOutcome::Completed(reply) => {
                tracing::warn!(
                    err_no = reply.err_no,
                    text = %reply.text,
                    "sdk: activation rejected"
                );
                Err(GatewayError::Rejected {
                    code: reply.err_no,
                    message: reply.text,
                    attempts_left: None,
                })
            }
            SdkOutcome::Failed(detail) => {
                tracing::warn!(%detail, "sdk: activation failed");
                Err(GatewayError::Fatal(detail))
            }
        }
    }

    async fn confirm(
        &self,
        code: &SmsCode,
        phone: &CanonicalPhone,
    ) -> Result<Confirmation, GatewayError> {
        tracing::debug!(phone = %phone, "sdk: activate_wallet");
        let (done, rx) = completion();
        self.sdk
            .activate_wallet(code.as_str(), CONFIRM_CHANNEL, done)
            .map_err(|LaunchError(detail)| {
                tracing::warn!(%detail, "sdk: activate_wallet was not started");
                GatewayError::NotStarted(detail)
            })?;

        let result = confirmation_from(settle(rx).await?);
        match &result {
            Ok(Confirmation::WalletActivated) => {
                self.sdk.mark_device_activated();
                tracing::info!("sdk: device activated");
            }
            Ok(Confirmation::NeedBankSelection) => tracing::info!("sdk: bank selection required"),
            Err(err) => tracing::warn!(error = %err, "sdk: confirmation failed"),
        }
        result
    }
}

fn confirmation_from(outcome: SdkOutcome<ActivateBody>) -> Result<Confirmation, GatewayError> {
    let reply = match outcome {
        SdkOutcome::Completed(reply) => reply,
        SdkOutcome::Failed(detail) => return Err(GatewayError::Fatal(detail)),
    };
    let Some(body) = reply.body else {
        return Err(GatewayError::EmptyResponse);
    };

    if reply.err_no == 0 {
        return Ok(if body.active == Some(true) {
            Confirmation::WalletActivated
        } else {
            Confirmation::NeedBankSelection
        });
    }

    match body.abuse {
        Some(left) if left > 0 => {
            if reply.err_no == WRONG_CODE_ERR || reply.text.contains("№806") {
                Err(GatewayError::WrongCode {
                    attempts_left: left,
                })
            } else {
                Err(GatewayError::Rejected {
                    code: reply.err_no,
                    message: reply.text,
                    attempts_left: Some(left),
                })
            }
        }
        _ => Err(GatewayError::AttemptsExhausted),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
