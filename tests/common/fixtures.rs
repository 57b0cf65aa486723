//! Static input corpora used across harnesses.

/// Raw phone inputs that must normalize, with the expected canonical form.
pub const ACCEPTED_PHONES: &[(&str, &str)] = &[
    ("+79991234567", "+79991234567"),
    ("89991234567", "+79991234567"),
    ("79991234567", "+79991234567"),
    ("9991234567", "+79991234567"),
    ("999-123-45-67", "+79991234567"),
    ("+7 (999) 123-45-67", "+79991234567"),
    ("8 (800) 555-35-35", "+78005553535"),
    ("  +7 912 000 11 22  ", "+79120001122"),
    ("7-495-123-45-67", "+74951234567"),
    ("tel: 8 916 555 44 33", "+79165554433"),
];

/// Raw phone inputs that must be refused with `INVALID_FORMAT`.
pub const REJECTED_PHONES: &[&str] = &[
    "",
    "   ",
    "12345",
    "+",
    "+7",
    "+8 999 123 45 67",
    "99991234567",
    "+799912345678",
    "999+1234567",
    "8999123456789",
];

/// Characters the normalizer must treat as noise.
pub const JUNK_CHARS: &str = " ()-.abcxyz#*/\\_\t";

pub const VALID_CODES: &[&str] = &["123456", "000000", "987650"];

pub const INVALID_CODES: &[&str] = &["", "12345", "1234567", "12a456", " 12345", "12 456", "١٢٣٤٥٦"];

/// Shell script that logs in and confirms with the simulated default code.
pub const HAPPY_SCRIPT: &str = "\
paste +7 (999) 123-45-67
agree
submit
wait
code 123456
wait
";
