//! Domain-specific assertion macros for sendy harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! input that broke the invariant.

/// Assert that `raw` normalizes to `expected`.
///
/// ```rust
/// assert_canonical!("8 999 123 45 67", "+79991234567");
/// ```
#[macro_export]
macro_rules! assert_canonical {
    ($raw:expr, $expected:expr) => {{
        let raw: &str = $raw;
        match sendy::phone::normalize(raw) {
            Ok(phone) => pretty_assertions::assert_eq!(
                phone.as_str(),
                $expected,
                "assert_canonical! failed for input {:?}",
                raw
            ),
            Err(err) => panic!(
                "assert_canonical! failed: {:?} was refused with {}",
                raw,
                err.code()
            ),
        }
    }};
}

/// Assert that `raw` is refused with `INVALID_FORMAT`.
#[macro_export]
macro_rules! assert_invalid_format {
    ($raw:expr) => {{
        let raw: &str = $raw;
        match sendy::phone::normalize(raw) {
            Err(sendy::ValidationError::InvalidFormat) => {}
            other => panic!(
                "assert_invalid_format! failed: {:?} produced {:?}",
                raw, other
            ),
        }
    }};
}

/// Assert that every `CanonicalPhone` invariant holds for `phone`.
#[macro_export]
macro_rules! assert_phone_invariant {
    ($phone:expr) => {{
        let s: &str = $phone.as_str();
        if !(s.len() == 12 && s.starts_with("+7") && s[2..].bytes().all(|b| b.is_ascii_digit())) {
            panic!("assert_phone_invariant! failed: {:?} is not +7 followed by ten digits", s);
        }
    }};
}

/// Assert the current screen of an `App`.
#[macro_export]
macro_rules! assert_screen {
    ($app:expr, $screen:expr) => {{
        let actual = $app.state().screen;
        if actual != $screen {
            panic!(
                "assert_screen! failed:\n  expected: {}\n  actual:   {}\n  status:   {}",
                $screen,
                actual,
                sendy::flow::status_line($app.state())
            );
        }
    }};
}

/// Assert the phase of a `SubmissionState`.
#[macro_export]
macro_rules! assert_phase {
    ($submission:expr, $phase:expr) => {{
        let actual = $submission.phase();
        if actual != $phase {
            panic!(
                "assert_phase! failed:\n  expected: {}\n  actual:   {}\n  state:    {:?}",
                $phase, actual, $submission
            );
        }
    }};
}
