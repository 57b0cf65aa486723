//! Phone input normalizer — turns whatever the user typed into a
//! [`CanonicalPhone`] (`+7XXXXXXXXXX`), or reports
//! [`ValidationError::InvalidFormat`].
//!
//! # Accepted shapes (after stripping everything but `0-9` and `+`)
//!
//! | Shape | Length | Result |
//! |-------|--------|--------|
//! | `+7XXXXXXXXXX` | 12 | kept as-is |
//! | `7XXXXXXXXXX`, `8XXXXXXXXXX` | 11 | leading digit replaced by `+7` |
//! | `XXXXXXXXXX` | 10 | `+7` prepended |
//!
//! Anything else is `INVALID_FORMAT`, including the empty string.
//!
//! # Editing
//!
//! [`normalize_edit`] is the keystroke-time variant. The input field only
//! ever holds the subscriber digits (the `+7` is a fixed visual prefix), so
//! each edit is re-stripped and the cursor is moved back by the number of
//! characters that disappeared in front of it.

use crate::error::ValidationError;
use crate::types::{CanonicalPhone, SUBSCRIBER_LEN};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Submit-time normalization
// ---------------------------------------------------------------------------

/// Normalize a complete phone number.
///
/// Idempotent: feeding a canonical number back in returns it unchanged.
pub fn normalize(raw: &str) -> Result<CanonicalPhone, ValidationError> {
    let stripped = strip(raw);
    subscriber_of(&stripped)
        .map(CanonicalPhone::from_subscriber)
        .ok_or(ValidationError::InvalidFormat)
}

/// Keep only ASCII digits and `+`.
fn strip(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Classify a stripped string by length and prefix and return its ten
/// subscriber digits.
fn subscriber_of(stripped: &str) -> Option<&str> {
    // `stripped` is pure ASCII, so byte length == char count.
    let subscriber = match stripped.len() {
        12 => stripped.strip_prefix("+7")?,
        11 => stripped.strip_prefix(&['7', '8'][..])?,
        10 => stripped,
        _ => return None,
    };
    subscriber
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then_some(subscriber)
}

// ---------------------------------------------------------------------------
// Keystroke-time normalization
// ---------------------------------------------------------------------------

/// Result of one edit to the phone field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneEdit {
    /// Subscriber digits now in the field (at most ten).
    pub digits: String,
    /// Cursor position within `digits`, in characters.
    pub cursor: usize,
    /// Set once `digits` is a complete subscriber number.
    pub canonical: Option<CanonicalPhone>,
}

impl PhoneEdit {
    fn new(digits: String, cursor: usize) -> Self {
        let cursor = cursor.min(digits.len());
        let canonical = (digits.len() == SUBSCRIBER_LEN)
            .then(|| CanonicalPhone::from_subscriber(&digits));
        Self {
            digits,
            cursor,
            canonical,
        }
    }
}

/// Recompute the subscriber buffer after the field text changed.
///
/// - `previous` is the buffer before the edit;
/// - `raw` is the field text after the edit, exactly as the input widget
///   reports it (may contain pasted punctuation or a `+7` / `8` prefix);
/// - `cursor` is the caret position in `raw`, counted in characters.
///
/// Rules, in order:
///
/// 1. Every non-digit in front of the cursor shifts it left by one.
/// 2. The `7` of a `+7` prefix is dropped.
/// 3. If `previous` was full and the edit adds digits, the edit is refused:
///    `previous` comes back and the caret returns to where it was before the
///    inserted digits.
/// 4. Past ten digits, a leading `7`/`8` is a trunk prefix and is dropped.
/// 5. Whatever is still past ten digits (a long paste into a partial field)
///    is truncated.
///
/// A dropped prefix digit shifts the cursor one further, but only when that
/// digit was in front of the cursor.
pub fn normalize_edit(previous: &str, raw: &str, cursor: usize) -> PhoneEdit {
    let cursor = cursor.min(raw.chars().count());
    let removed_before = raw
        .chars()
        .take(cursor)
        .filter(|c| !c.is_ascii_digit())
        .count();
    let mut at = cursor - removed_before;

    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let lead = raw.chars().position(|c| c.is_ascii_digit());
    let plus_seven = strip(raw).starts_with("+7");

    let drop_lead = |digits: &mut String, at: &mut usize| {
        digits.remove(0);
        if matches!(lead, Some(pos) if pos < cursor) {
            *at = at.saturating_sub(1);
        }
    };

    if plus_seven {
        drop_lead(&mut digits, &mut at);
    }

    let previous: String = previous
        .chars()
        .filter(char::is_ascii_digit)
        .take(SUBSCRIBER_LEN)
        .collect();
    if previous.len() == SUBSCRIBER_LEN && digits.len() > SUBSCRIBER_LEN {
        let inserted = digits.len() - SUBSCRIBER_LEN;
        return PhoneEdit::new(previous, at.saturating_sub(inserted));
    }

    if !plus_seven && digits.len() > SUBSCRIBER_LEN && digits.starts_with(['7', '8']) {
        drop_lead(&mut digits, &mut at);
    }
    digits.truncate(SUBSCRIBER_LEN);

    PhoneEdit::new(digits, at)
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Group a (possibly partial) subscriber buffer as `XXX XXX-XX-XX`.
pub fn format_subscriber(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + 3);
    for (i, c) in digits.chars().enumerate() {
        match i {
            3 => out.push(' '),
            6 | 8 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
