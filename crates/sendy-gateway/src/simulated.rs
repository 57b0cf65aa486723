//! In-process wallet backend.
//!
//! Behaves like the real service closely enough to drive the shell: every
//! call takes `latency_ms`, `activate` (re)arms the attempt budget for a
//! number, and `confirm` accepts only the configured code. Wrong codes spend
//! attempts; the last one yields [`GatewayError::AttemptsExhausted`] and
//! disarms the number until it is activated again.

use crate::WalletGateway;
use async_trait::async_trait;
use sendy_core::config::GatewayConfig;
use sendy_core::{Activation, CanonicalPhone, Confirmation, GatewayError, SmsCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// Error number reported when confirming a number with no pending activation.
pub const NOT_ACTIVATING_ERR: i32 = 404;

#[derive(Debug, Default)]
struct Pending {
    phone: Option<CanonicalPhone>,
    attempts_left: u32,
}

pub struct SimulatedGateway {
    settings: GatewayConfig,
    pending: Mutex<Pending>,
    activate_calls: AtomicUsize,
    confirm_calls: AtomicUsize,
}

impl SimulatedGateway {
    pub fn new(settings: GatewayConfig) -> Self {
        Self {
            settings,
            pending: Mutex::new(Pending::default()),
            activate_calls: AtomicUsize::new(0),
            confirm_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `activate` calls received so far.
    pub fn activate_calls(&self) -> usize {
        self.activate_calls.load(Ordering::SeqCst)
    }

    /// Number of `confirm` calls received so far.
    pub fn confirm_calls(&self) -> usize {
        self.confirm_calls.load(Ordering::SeqCst)
    }

    async fn round_trip(&self) {
        if self.settings.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.settings.latency_ms)).await;
        }
    }
}

#[async_trait]
impl WalletGateway for SimulatedGateway {
    async fn activate(&self, phone: &CanonicalPhone) -> Result<Activation, GatewayError> {
        self.activate_calls.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await;

        let mut pending = self.pending.lock().await;
        pending.phone = Some(phone.clone());
        pending.attempts_left = self.settings.max_attempts;
        tracing::debug!(phone = %phone, attempts = pending.attempts_left, "simulated: code sent");

        Ok(Activation {
            phone: phone.clone(),
        })
    }

    async fn confirm(
        &self,
        code: &SmsCode,
        phone: &CanonicalPhone,
    ) -> Result<Confirmation, GatewayError> {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await;

        let mut pending = self.pending.lock().await;
        if pending.phone.as_ref() != Some(phone) {
            return Err(GatewayError::Rejected {
                code: NOT_ACTIVATING_ERR,
                message: format!("no activation in progress for {phone}"),
                attempts_left: None,
            });
        }

        if code.as_str() == self.settings.sms_code {
            *pending = Pending::default();
            tracing::debug!(phone = %phone, "simulated: code accepted");
            return Ok(if self.settings.bank_selection_required {
                Confirmation::NeedBankSelection
            } else {
                Confirmation::WalletActivated
            });
        }

        pending.attempts_left = pending.attempts_left.saturating_sub(1);
        tracing::debug!(attempts_left = pending.attempts_left, "simulated: wrong code");
        if pending.attempts_left == 0 {
            *pending = Pending::default();
            Err(GatewayError::AttemptsExhausted)
        } else {
            Err(GatewayError::WrongCode {
                attempts_left: pending.attempts_left,
            })
        }
    }
}
