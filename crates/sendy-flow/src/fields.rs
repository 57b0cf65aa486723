//! Input field state for the two screens.
//!
//! # Phone field
//!
//! Holds only the subscriber digits; `+7` is a fixed prefix drawn in front.
//! Every edit builds the text the field *would* contain, then hands it to
//! [`phone::normalize_edit`] which decides the digits and the caret.
//!
//! # Code field
//!
//! Append-only: characters are added at the end and filtered through
//! [`sms::sanitize_code_input`], so the field never holds more than six
//! digits.

use crate::event::{AppEvent, Direction};
use sendy_core::{phone, sms, CanonicalPhone};

// ---------------------------------------------------------------------------
// Phone
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PhoneFieldState {
    /// Subscriber digits, at most ten.
    pub digits: String,
    /// Caret position within `digits`.
    pub cursor: usize,
    /// Set while `digits` holds a complete number.
    pub canonical: Option<CanonicalPhone>,
}

impl PhoneFieldState {
    /// Handle an editing event. Everything else is ignored.
    pub fn handle(&mut self, event: &AppEvent) {
        // `digits` is ASCII, so the caret is also a byte offset.
        match event {
            AppEvent::Char(c) => {
                let mut raw = self.digits.clone();
                raw.insert(self.cursor, *c);
                self.apply(&raw, self.cursor + 1);
            }
            AppEvent::Paste(text) => {
                let raw = format!(
                    "{}{}{}",
                    &self.digits[..self.cursor],
                    text,
                    &self.digits[self.cursor..]
                );
                self.apply(&raw, self.cursor + text.chars().count());
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    let mut raw = self.digits.clone();
                    raw.remove(self.cursor - 1);
                    self.apply(&raw, self.cursor - 1);
                }
            }
            AppEvent::Cursor(Direction::Left) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "phone: cursor left");
            }
            AppEvent::Cursor(Direction::Right) => {
                self.cursor = (self.cursor + 1).min(self.digits.len());
                tracing::debug!(cursor = self.cursor, "phone: cursor right");
            }
            AppEvent::Clear => {
                *self = Self::default();
                tracing::debug!("phone: cleared");
            }
            _ => {}
        }
    }

    fn apply(&mut self, raw: &str, cursor: usize) {
        let edit = phone::normalize_edit(&self.digits, raw, cursor);
        tracing::debug!(
            raw,
            digits = %edit.digits,
            cursor = edit.cursor,
            complete = edit.canonical.is_some(),
            "phone: edit"
        );
        self.digits = edit.digits;
        self.cursor = edit.cursor;
        self.canonical = edit.canonical;
    }

    /// Grouped digits for display, without the `+7` prefix.
    pub fn display(&self) -> String {
        phone::format_subscriber(&self.digits)
    }
}

// ---------------------------------------------------------------------------
// Code
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CodeFieldState {
    pub code: String,
}

impl CodeFieldState {
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => {
                let mut raw = std::mem::take(&mut self.code);
                raw.push(*c);
                self.code = sms::sanitize_code_input(&raw);
            }
            AppEvent::Paste(text) => {
                self.code = sms::sanitize_code_input(&format!("{}{}", self.code, text));
            }
            AppEvent::Backspace => {
                self.code.pop();
            }
            AppEvent::Clear => self.code.clear(),
            _ => return,
        }
        tracing::debug!(len = self.code.len(), "code: edit");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
