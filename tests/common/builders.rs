//! Test builders for configs, gateways and SDK replies.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use sendy::config::{Config, GatewayConfig};
use sendy::gateway::sdk::{ActivateBody, LoginBody, SdkOutcome, SdkReply};
use sendy::gateway::simulated::SimulatedGateway;
use sendy::CanonicalPhone;
use std::sync::Arc;

pub fn phone(raw: &str) -> CanonicalPhone {
    raw.parse().expect("test phone must normalize")
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Fluent builder over [`Config::defaults`] with zero gateway latency.
///
/// ```rust
/// let config = ConfigBuilder::new().attempts(1).bank_selection().build();
/// ```
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        let mut config = Config::defaults();
        config.gateway.latency_ms = 0;
        Self { config }
    }

    pub fn without_agreement(mut self) -> Self {
        self.config.login.require_agreement = false;
        self
    }

    pub fn latency_ms(mut self, ms: u64) -> Self {
        self.config.gateway.latency_ms = ms;
        self
    }

    pub fn sms_code(mut self, code: &str) -> Self {
        self.config.gateway.sms_code = code.to_string();
        self
    }

    pub fn attempts(mut self, n: u32) -> Self {
        self.config.gateway.max_attempts = n;
        self
    }

    pub fn bank_selection(mut self) -> Self {
        self.config.gateway.bank_selection_required = true;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

pub fn simulated(settings: &GatewayConfig) -> Arc<SimulatedGateway> {
    Arc::new(SimulatedGateway::new(settings.clone()))
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

pub fn login_ok() -> SdkOutcome<LoginBody> {
    SdkOutcome::Completed(SdkReply {
        err_no: 0,
        text: "ok".to_string(),
        body: Some(LoginBody),
    })
}

pub fn login_error(err_no: i32, text: &str) -> SdkOutcome<LoginBody> {
    SdkOutcome::Completed(SdkReply {
        err_no,
        text: text.to_string(),
        body: None,
    })
}

/// Fluent builder for `activate_wallet` replies.
///
/// ```rust
/// let outcome = ReplyBuilder::ok().active(true).pan("4000 00** **** 0002").build();
/// let wrong = ReplyBuilder::error(806, "Ошибка №806").abuse(2).build();
/// ```
pub struct ReplyBuilder {
    err_no: i32,
    text: String,
    body: Option<ActivateBody>,
}

impl ReplyBuilder {
    pub fn ok() -> Self {
        Self {
            err_no: 0,
            text: "ok".to_string(),
            body: Some(ActivateBody::default()),
        }
    }

    pub fn error(err_no: i32, text: &str) -> Self {
        Self {
            err_no,
            text: text.to_string(),
            body: Some(ActivateBody::default()),
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.body_mut().active = Some(active);
        self
    }

    pub fn pan(mut self, pan: &str) -> Self {
        self.body_mut().pans.push(pan.to_string());
        self
    }

    pub fn abuse(mut self, left: u32) -> Self {
        self.body_mut().abuse = Some(left);
        self
    }

    pub fn no_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn build(self) -> SdkOutcome<ActivateBody> {
        SdkOutcome::Completed(SdkReply {
            err_no: self.err_no,
            text: self.text,
            body: self.body,
        })
    }

    fn body_mut(&mut self) -> &mut ActivateBody {
        self.body.get_or_insert_with(ActivateBody::default)
    }
}
