//! Screen routing and per-screen state.
//!
//! ```text
//! Login ──activated──► Sms ──wallet activated──► Main
//!   ▲                   │ │
//!   └──reset/exhausted──┘ └──bank needed──► BankSelection ──bank──► Main
//! ```
//!
//! [`App::handle`] is the only entry point. It folds one [`AppEvent`] into
//! the state and returns the gateway request to issue, if any. Submission
//! phases only ever change through [`SubmissionState::apply`].

use crate::{
    event::{AppEvent, Effect},
    fields::{CodeFieldState, PhoneFieldState},
};
use sendy_core::{
    config::Config, phone, sms, Activation, CanonicalPhone, Confirmation, Failure,
    SubmissionState, Transition,
};

/// Shown when the login is submitted without accepting the terms.
pub const TERMS_REQUIRED: &str = "accept the terms to continue";

// ---------------------------------------------------------------------------
// Screen state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Sms,
    BankSelection,
    Main,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Screen::Login => write!(f, "login"),
            Screen::Sms => write!(f, "sms"),
            Screen::BankSelection => write!(f, "bank-selection"),
            Screen::Main => write!(f, "main"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct LoginState {
    pub field: PhoneFieldState,
    pub agreed: bool,
    pub submission: SubmissionState<Activation>,
}

#[derive(Debug, Clone)]
pub struct SmsState {
    /// The number the code was sent to.
    pub phone: CanonicalPhone,
    pub field: CodeFieldState,
    pub submission: SubmissionState<Confirmation>,
}

impl SmsState {
    fn new(phone: CanonicalPhone) -> Self {
        Self {
            phone,
            field: CodeFieldState::default(),
            submission: SubmissionState::Initial,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub login: LoginState,
    /// Present from the first successful activation until the user starts
    /// over.
    pub sms: Option<SmsState>,
    pub bank: Option<String>,
    /// One-off message carried back to the login screen.
    pub notice: Option<String>,
    pub require_agreement: bool,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            state: AppState {
                screen: Screen::Login,
                login: LoginState::default(),
                sms: None,
                bank: None,
                notice: None,
                require_agreement: config.login.require_agreement,
                quit: false,
            },
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Fold `event` into the state. Returns the gateway request to issue.
    pub fn handle(&mut self, event: AppEvent) -> Option<Effect> {
        let s = &mut self.state;
        match event {
            AppEvent::Quit => {
                s.quit = true;
                None
            }
            AppEvent::Submit => match s.screen {
                Screen::Login => submit_login(s),
                Screen::Sms => submit_code(s),
                _ => None,
            },
            AppEvent::Activated(result) => {
                on_activated(s, result);
                None
            }
            AppEvent::Confirmed(result) => {
                on_confirmed(s, result);
                None
            }
            AppEvent::Reset => {
                let busy = s.sms.as_ref().is_some_and(|m| m.submission.is_busy());
                if s.screen == Screen::Sms && !busy {
                    return_to_login(s);
                }
                None
            }
            AppEvent::SelectBank(name) => {
                if s.screen == Screen::BankSelection {
                    tracing::info!(bank = %name, "bank selected");
                    s.bank = Some(name);
                    finish(s);
                }
                None
            }
            AppEvent::ToggleAgreement => {
                if s.screen == Screen::Login && !s.login.submission.is_busy() {
                    s.login.agreed = !s.login.agreed;
                    tracing::debug!(agreed = s.login.agreed, "login: agreement toggled");
                }
                None
            }
            edit => {
                edit_field(s, &edit);
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Apply `transition` to `slot`, logging the outcome. Returns whether the
/// state changed.
fn advance<T>(
    slot: &mut SubmissionState<T>,
    transition: Transition<T>,
    flow: &'static str,
) -> bool {
    let name = transition.name();
    match slot.apply(transition) {
        Ok(next) => {
            tracing::debug!(
                flow,
                transition = name,
                from = %slot.phase(),
                to = %next.phase(),
                "transition"
            );
            *slot = next;
            true
        }
        Err(err) => {
            tracing::debug!(flow, transition = name, error = %err, "transition refused");
            false
        }
    }
}

fn edit_field(s: &mut AppState, event: &AppEvent) {
    match s.screen {
        Screen::Login if !s.login.submission.is_busy() => s.login.field.handle(event),
        Screen::Sms => {
            if let Some(sms) = s.sms.as_mut().filter(|m| !m.submission.is_busy()) {
                sms.field.handle(event);
            }
        }
        _ => {}
    }
}

fn submit_login(s: &mut AppState) -> Option<Effect> {
    let login = &mut s.login;
    if login.submission.is_busy() {
        tracing::debug!("login: submit ignored, activation in flight");
        return None;
    }
    s.notice = None;

    if s.require_agreement && !login.agreed {
        advance(&mut login.submission, Transition::Reject(Failure::new(TERMS_REQUIRED)), "login");
        return None;
    }

    match phone::normalize(&login.field.digits) {
        Err(err) => {
            tracing::debug!(code = err.code(), "login: phone rejected");
            advance(&mut login.submission, Transition::Reject(err.into()), "login");
            None
        }
        Ok(phone) => {
            if !advance(&mut login.submission, Transition::Submit, "login") {
                return None;
            }
            tracing::info!("login: requesting activation");
            tracing::debug!(phone = %phone, "login: activation target");
            Some(Effect::Activate(phone))
        }
    }
}

fn submit_code(s: &mut AppState) -> Option<Effect> {
    let sms = s.sms.as_mut()?;
    if sms.submission.is_busy() {
        tracing::debug!("sms: submit ignored, confirmation in flight");
        return None;
    }

    match sms::validate_code(&sms.field.code) {
        Err(err) => {
            tracing::debug!(code = err.code(), "sms: code rejected");
            advance(&mut sms.submission, Transition::Reject(err.into()), "sms");
            None
        }
        Ok(code) => {
            if !advance(&mut sms.submission, Transition::Submit, "sms") {
                return None;
            }
            tracing::info!("sms: confirming code");
            Some(Effect::Confirm {
                code,
                phone: sms.phone.clone(),
            })
        }
    }
}

fn on_activated(s: &mut AppState, result: Result<Activation, sendy_core::GatewayError>) {
    let transition = match &result {
        Ok(activation) => Transition::Resolve(activation.clone()),
        Err(err) => {
            tracing::warn!(error = %err, "login: activation failed");
            Transition::Fail(Failure::from(err))
        }
    };
    if !advance(&mut s.login.submission, transition, "login") {
        return;
    }
    if let Ok(activation) = result {
        tracing::info!(screen = %Screen::Sms, "login: code sent");
        s.sms = Some(SmsState::new(activation.phone));
        s.screen = Screen::Sms;
    }
}

fn on_confirmed(s: &mut AppState, result: Result<Confirmation, sendy_core::GatewayError>) {
    let Some(sms) = s.sms.as_mut() else {
        tracing::debug!("sms: confirmation arrived with no sms screen");
        return;
    };

    match result {
        Ok(confirmation) => {
            if !advance(&mut sms.submission, Transition::Resolve(confirmation), "sms") {
                return;
            }
            tracing::info!(outcome = %confirmation, "sms: confirmed");
            match confirmation {
                Confirmation::WalletActivated => finish(s),
                Confirmation::NeedBankSelection => s.screen = Screen::BankSelection,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "sms: confirmation failed");
            let failure = Failure::from(&err);
            let exhausted = failure.exhausted;
            let message = failure.message.clone();
            if !advance(&mut sms.submission, Transition::Fail(failure), "sms") {
                return;
            }
            if exhausted {
                s.notice = Some(message);
                return_to_login(s);
            }
        }
    }
}

/// Drop the SMS screen and hand the login screen back, field intact.
fn return_to_login(s: &mut AppState) {
    s.sms = None;
    advance(&mut s.login.submission, Transition::Reset, "login");
    s.screen = Screen::Login;
    tracing::info!(screen = %Screen::Login, "starting over");
}

/// Both flows are done once the wallet screen is reached.
fn finish(s: &mut AppState) {
    if let Some(sms) = s.sms.as_mut() {
        advance(&mut sms.submission, Transition::NavigateAway, "sms");
    }
    advance(&mut s.login.submission, Transition::NavigateAway, "login");
    s.screen = Screen::Main;
    tracing::info!(screen = %Screen::Main, "wallet ready");
}

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

fn describe<T>(submission: &SubmissionState<T>) -> String {
    match submission {
        SubmissionState::Initial => "ready".to_string(),
        SubmissionState::Loading => "loading".to_string(),
        SubmissionState::Success(_) => "done".to_string(),
        SubmissionState::Error(failure) => format!("error: {}", failure.message),
        SubmissionState::Departed => "closed".to_string(),
    }
}

/// One line summarising what the current screen shows.
pub fn status_line(s: &AppState) -> String {
    match s.screen {
        Screen::Login => {
            let mut line = format!(
                "[login] +7 {} | cursor {} | terms {} | {}",
                s.login.field.display(),
                s.login.field.cursor,
                if s.login.agreed { "accepted" } else { "not accepted" },
                describe(&s.login.submission),
            );
            if let Some(notice) = &s.notice {
                line.push_str(" | ");
                line.push_str(notice);
            }
            line
        }
        Screen::Sms => match &s.sms {
            Some(sms) => format!(
                "[sms] code sent to {} | code {} | {}",
                sms.phone.pretty(),
                if sms.field.code.is_empty() { "-" } else { sms.field.code.as_str() },
                describe(&sms.submission),
            ),
            None => "[sms]".to_string(),
        },
        Screen::BankSelection => format!(
            "[bank-selection] {} | choose a bank with `bank <name>`",
            wallet_phone(s),
        ),
        Screen::Main => match &s.bank {
            Some(bank) => format!("[main] wallet ready for {} via {bank}", wallet_phone(s)),
            None => format!("[main] wallet ready for {}", wallet_phone(s)),
        },
    }
}

fn wallet_phone(s: &AppState) -> String {
    s.sms
        .as_ref()
        .map(|m| m.phone.pretty())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
