//! FakeSdk — a scripted [`CallbackSdk`] that answers from spawned tasks.
//!
//! Each call pops the next scripted step for its method. Replies are
//! delivered on a `tokio::spawn`ed task after an optional delay, the way the
//! vendor SDK answers from its own thread. Works with `tokio::time::pause()`
//! for deterministic timing tests.

use sendy::gateway::sdk::{
    ActivateBody, CallbackSdk, Completion, LaunchError, LoginBody, SdkOutcome,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One scripted answer.
pub enum Step<B> {
    /// Deliver `outcome` after `delay`.
    Reply { outcome: SdkOutcome<B>, delay: Duration },
    /// Refuse to launch the request.
    Refuse(String),
    /// Accept the request and never call back.
    Drop,
}

impl<B> Step<B> {
    pub fn now(outcome: SdkOutcome<B>) -> Self {
        Step::Reply {
            outcome,
            delay: Duration::ZERO,
        }
    }

    pub fn after(ms: u64, outcome: SdkOutcome<B>) -> Self {
        Step::Reply {
            outcome,
            delay: Duration::from_millis(ms),
        }
    }
}

#[derive(Default)]
struct Script {
    login: VecDeque<Step<LoginBody>>,
    activate: VecDeque<Step<ActivateBody>>,
    phones: Vec<String>,
    tokens: Vec<(String, String)>,
    marked: usize,
}

#[derive(Default)]
pub struct FakeSdk {
    script: Mutex<Script>,
}

impl FakeSdk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_login(self, step: Step<LoginBody>) -> Self {
        self.script.lock().unwrap().login.push_back(step);
        self
    }

    pub fn on_activate(self, step: Step<ActivateBody>) -> Self {
        self.script.lock().unwrap().activate.push_back(step);
        self
    }

    /// Phones passed to `login_at_auth`, in call order.
    pub fn phones(&self) -> Vec<String> {
        self.script.lock().unwrap().phones.clone()
    }

    /// `(token, channel)` pairs passed to `activate_wallet`, in call order.
    pub fn tokens(&self) -> Vec<(String, String)> {
        self.script.lock().unwrap().tokens.clone()
    }

    /// How many times the device was marked as activated.
    pub fn marked(&self) -> usize {
        self.script.lock().unwrap().marked
    }
}

fn play<B: Send + 'static>(step: Option<Step<B>>, done: Completion<B>) -> Result<(), LaunchError> {
    match step {
        None => Err(LaunchError("fake sdk: nothing scripted".to_string())),
        Some(Step::Refuse(detail)) => Err(LaunchError(detail)),
        Some(Step::Drop) => {
            drop(done);
            Ok(())
        }
        Some(Step::Reply { outcome, delay }) => {
            tokio::spawn(async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                done(outcome);
            });
            Ok(())
        }
    }
}

impl CallbackSdk for FakeSdk {
    fn login_at_auth(&self, phone: &str, done: Completion<LoginBody>) -> Result<(), LaunchError> {
        let step = {
            let mut script = self.script.lock().unwrap();
            script.phones.push(phone.to_string());
            script.login.pop_front()
        };
        play(step, done)
    }

    fn activate_wallet(
        &self,
        token: &str,
        channel: &str,
        done: Completion<ActivateBody>,
    ) -> Result<(), LaunchError> {
        let step = {
            let mut script = self.script.lock().unwrap();
            script.tokens.push((token.to_string(), channel.to_string()));
            script.activate.pop_front()
        };
        play(step, done)
    }

    fn mark_device_activated(&self) {
        self.script.lock().unwrap().marked += 1;
    }
}
