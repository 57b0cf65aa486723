//! SMS confirmation code rules.
//!
//! Submission is strict: exactly six ASCII digits or `INVALID_CODE`.
//! Typing is forgiving: [`sanitize_code_input`] drops non-digits and cuts the
//! input at six digits so the field can never hold an invalid shape.

use crate::error::ValidationError;
use crate::types::{SmsCode, CODE_LEN};

/// Validate a submitted code.
pub fn validate_code(raw: &str) -> Result<SmsCode, ValidationError> {
    if raw.len() == CODE_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
        Ok(SmsCode::new_unchecked(raw))
    } else {
        Err(ValidationError::InvalidCode)
    }
}

/// Field filter applied on every keystroke.
pub fn sanitize_code_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(CODE_LEN)
        .collect()
}
