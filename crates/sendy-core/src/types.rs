//! Value types that cross the boundary between the input layer and the
//! wallet gateway: the canonical phone, the SMS code, and the two gateway
//! outcomes.
//!
//! [`CanonicalPhone`] and [`SmsCode`] can only be built by the validators in
//! [`crate::phone`] and [`crate::sms`], so holding one is proof the input was
//! well-formed.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Country prefix every canonical number starts with.
pub const COUNTRY_PREFIX: &str = "+7";
/// Digits in a subscriber number (everything after the country prefix).
pub const SUBSCRIBER_LEN: usize = 10;
/// Digits in an SMS confirmation code.
pub const CODE_LEN: usize = 6;

// ---------------------------------------------------------------------------
// CanonicalPhone
// ---------------------------------------------------------------------------

/// `+7` followed by exactly ten ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CanonicalPhone(String);

impl CanonicalPhone {
    /// Caller guarantees `subscriber` is ten ASCII digits.
    pub(crate) fn from_subscriber(subscriber: &str) -> Self {
        debug_assert!(
            subscriber.len() == SUBSCRIBER_LEN && subscriber.bytes().all(|b| b.is_ascii_digit()),
            "subscriber must be {SUBSCRIBER_LEN} digits: {subscriber:?}"
        );
        Self(format!("{COUNTRY_PREFIX}{subscriber}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The ten digits after `+7`.
    pub fn subscriber(&self) -> &str {
        &self.0[COUNTRY_PREFIX.len()..]
    }

    /// Human-friendly grouping, e.g. `+7 999 123-45-67`.
    pub fn pretty(&self) -> String {
        format!(
            "{COUNTRY_PREFIX} {}",
            crate::phone::format_subscriber(self.subscriber())
        )
    }
}

impl std::fmt::Display for CanonicalPhone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for CanonicalPhone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::phone::normalize(s)
    }
}

impl TryFrom<String> for CanonicalPhone {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        crate::phone::normalize(&value)
    }
}

impl From<CanonicalPhone> for String {
    fn from(phone: CanonicalPhone) -> Self {
        phone.0
    }
}

// ---------------------------------------------------------------------------
// SmsCode
// ---------------------------------------------------------------------------

/// Exactly six ASCII digits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SmsCode(String);

impl SmsCode {
    pub(crate) fn new_unchecked(code: &str) -> Self {
        Self(code.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Codes are secrets; keep them out of `{:?}` log output.
impl std::fmt::Debug for SmsCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SmsCode(******)")
    }
}

impl std::str::FromStr for SmsCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::sms::validate_code(s)
    }
}

// ---------------------------------------------------------------------------
// Gateway outcomes
// ---------------------------------------------------------------------------

/// A successful `activate`: the confirmation SMS went to `phone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activation {
    pub phone: CanonicalPhone,
}

/// A successful `confirm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    /// The device is activated; the wallet is ready.
    WalletActivated,
    /// The wallet is not active yet or has no cards; a bank must be chosen.
    NeedBankSelection,
}

impl std::fmt::Display for Confirmation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confirmation::WalletActivated => write!(f, "wallet activated"),
            Confirmation::NeedBankSelection => write!(f, "bank selection required"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_accessors() {
        let phone: CanonicalPhone = "8 (999) 123-45-67".parse().unwrap();
        assert_eq!(phone.as_str(), "+79991234567");
        assert_eq!(phone.subscriber(), "9991234567");
        assert_eq!(phone.to_string(), "+79991234567");
        assert_eq!(phone.pretty(), "+7 999 123-45-67");
    }

    #[test]
    fn canonical_serializes_as_string() {
        let phone: CanonicalPhone = "9991234567".parse().unwrap();
        assert_eq!(serde_json::to_string(&phone).unwrap(), r#""+79991234567""#);
    }

    #[test]
    fn canonical_deserialize_goes_through_normalizer() {
        let phone: CanonicalPhone = serde_json::from_str(r#""89991234567""#).unwrap();
        assert_eq!(phone.as_str(), "+79991234567");
        assert!(serde_json::from_str::<CanonicalPhone>(r#""12345""#).is_err());
    }

    #[test]
    fn sms_code_debug_is_redacted() {
        let code: SmsCode = "123456".parse().unwrap();
        assert_eq!(code.as_str(), "123456");
        assert_eq!(format!("{code:?}"), "SmsCode(******)");
    }

    #[test]
    fn confirmation_display() {
        assert_eq!(Confirmation::WalletActivated.to_string(), "wallet activated");
        assert_eq!(
            serde_json::to_string(&Confirmation::NeedBankSelection).unwrap(),
            r#""need_bank_selection""#
        );
    }
}
