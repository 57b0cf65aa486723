//! Semantic application events. Shell commands and gateway completions are
//! mapped to one vocabulary so the screens never see where an input came
//! from.
//!
//! | Event | Login | SMS | Bank selection |
//! |-------|-------|-----|----------------|
//! | `Char`, `Backspace`, `Paste`, `Clear` | edit phone | edit code | |
//! | `Cursor(Left/Right)` | move caret | | |
//! | `ToggleAgreement` | flip terms checkbox | | |
//! | `Submit` | activate | confirm | |
//! | `Reset` | | return to login | |
//! | `SelectBank` | | | finish |
//!
//! Editing events are dropped while the screen's request is in flight.

use sendy_core::{Activation, CanonicalPhone, Confirmation, GatewayError, SmsCode};

/// Caret movement inside a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A typed character, inserted at the caret.
    Char(char),
    /// Delete the character before the caret.
    Backspace,
    Cursor(Direction),
    /// Text inserted at the caret in one go.
    Paste(String),
    /// Empty the focused field.
    Clear,
    ToggleAgreement,
    Submit,
    /// Leave the SMS screen and start over from the phone number.
    Reset,
    SelectBank(String),
    Quit,
    /// The outstanding `activate` call finished.
    Activated(Result<Activation, GatewayError>),
    /// The outstanding `confirm` call finished.
    Confirmed(Result<Confirmation, GatewayError>),
}

/// A gateway request the app wants issued. At most one is outstanding per
/// screen; the shell reports the result back as an [`AppEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Activate(CanonicalPhone),
    Confirm {
        code: SmsCode,
        phone: CanonicalPhone,
    },
}
