//! # Checkout Field Validation & Live Formatting
//!
//! Pure predicates and formatters for the delivery and card forms. All of
//! these are evaluated on every keystroke: they must be idempotent, never
//! panic, and degrade to partial/empty output on malformed input.

use serde::{Deserialize, Serialize};

/// Delivery details being edited (free text at rest; validity is derived)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl DeliveryDetails {
    /// All delivery fields pass their predicates
    pub fn is_complete(&self) -> bool {
        is_valid_full_name(&self.full_name)
            && is_valid_email(&self.email)
            && is_valid_phone(&self.phone)
            && !self.street.trim().is_empty()
            && self.city.trim().len() >= 2
            && self.state.trim().len() >= 2
            && is_valid_postal_code(&self.postal_code)
    }
}

/// Card details being edited. Never persisted beyond the session and never
/// transmitted; no real charge ever happens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub cardholder_name: String,
    /// Stored as entered, displayed in blocks of four
    pub card_number: String,
    /// MM/YY text
    pub expiry: String,
    /// Exactly 3 digits when valid
    pub cvv: String,
}

impl CardDetails {
    /// All card fields pass their predicates
    pub fn is_complete(&self) -> bool {
        is_valid_full_name(&self.cardholder_name)
            && is_valid_card_number(&self.card_number)
            && is_valid_expiry(&self.expiry)
            && self.cvv.len() == 3
    }
}

fn digits_of(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Trimmed length ≥ 2
pub fn is_valid_full_name(name: &str) -> bool {
    name.trim().len() >= 2
}

/// `local@domain.tld` shape: non-empty local part, non-empty domain label,
/// non-empty top-level label, no embedded whitespace, exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((label, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !label.is_empty() && !tld.is_empty()
}

/// At least 10 digits, ignoring separators
pub fn is_valid_phone(phone: &str) -> bool {
    digits_of(phone).len() >= 10
}

/// Trimmed length ≥ 4
pub fn is_valid_postal_code(postal_code: &str) -> bool {
    postal_code.trim().len() >= 4
}

/// Digit count (ignoring separators) between 13 and 19 inclusive
pub fn is_valid_card_number(card_number: &str) -> bool {
    let count = digits_of(card_number).len();
    (13..=19).contains(&count)
}

/// Group card digits in blocks of 4 separated by a single space, capped at
/// 19 rendered characters (16 digits + 3 spaces). Idempotent; empty and
/// malformed input degrade to partial/empty output.
pub fn format_card_number(input: &str) -> String {
    let digits = digits_of(input);
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(ch);
    }
    formatted.chars().take(19).collect()
}

/// Reformat expiry input to `MM/YY`, inserting the slash after the second
/// digit. One or two digits pass through unchanged.
pub fn format_expiry(input: &str) -> String {
    let digits = digits_of(input);
    if digits.len() <= 2 {
        return digits;
    }
    let (month, year) = digits.split_at(2);
    format!("{}/{}", month, &year[..year.len().min(2)])
}

/// Valid iff the text splits into exactly two numeric parts with
/// month ∈ [1,12] and year ∈ [0,99]
pub fn is_valid_expiry(expiry: &str) -> bool {
    let mut parts = expiry.split('/');
    let (Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let (Ok(month), Ok(year)) = (month.parse::<u32>(), year.parse::<u32>()) else {
        return false;
    };
    (1..=12).contains(&month) && year <= 99
}

/// Discard non-digits and truncate to 3; input beyond 3 digits is never
/// accepted
pub fn sanitize_cvv(input: &str) -> String {
    digits_of(input).chars().take(3).collect()
}

/// Mask a card number for display, keeping only the last four digits
pub fn mask_card(card_number: &str) -> String {
    let digits = digits_of(card_number);
    if digits.len() < 4 {
        return "****".to_string();
    }
    format!("**** **** **** {}", &digits[digits.len() - 4..])
}
