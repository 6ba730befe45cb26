//! National identifier validation for resident profiles.
//!
//! Both validators accept an empty value: the field is optional.

use crate::error::{BarrioError, Result};

const RUT_FACTORS: [u32; 6] = [2, 3, 4, 5, 6, 7];

/// Validate a Chilean RUT, with or without dots and dash.
///
/// Accepts `12345678-5`, `12.345.678-5` and `123456785`.
pub fn validate_rut(value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }

    let clean: String = value
        .trim()
        .chars()
        .filter(|c| *c != '.' && *c != '-')
        .collect();

    let mut chars = clean.chars();
    let check = match chars.next_back() {
        Some(c) if !chars.as_str().is_empty() => c.to_ascii_uppercase(),
        _ => return Err(invalid("RUT must have at least 2 characters")),
    };
    let body = chars.as_str();

    if !body.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("RUT body must contain only digits"));
    }
    if !matches!(check, '0'..='9' | 'K') {
        return Err(invalid("check digit must be 0-9 or K"));
    }

    let expected = rut_check_digit(body);
    if check != expected {
        return Err(invalid(&format!("check digit should be {expected}")));
    }
    Ok(())
}

/// Basic shape check for any national identifier.
///
/// Digits, dots, dashes and ASCII letters only; 2 to 50 characters.
pub fn validate_national_id_format(value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(invalid(
            "national id may only contain digits, dots, dashes and letters",
        ));
    }
    match value.len() {
        0..=1 => Err(invalid("national id must have at least 2 characters")),
        2..=50 => Ok(()),
        _ => Err(invalid("national id must have at most 50 characters")),
    }
}

/// Modulo-11 check digit over the reversed body digits.
fn rut_check_digit(body: &str) -> char {
    let sum: u32 = body
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| d * RUT_FACTORS[i % RUT_FACTORS.len()])
        .sum();

    match sum % 11 {
        0 => '0',
        1 => 'K',
        r => char::from_digit(11 - r, 10).unwrap_or('0'),
    }
}

fn invalid(reason: &str) -> BarrioError {
    BarrioError::InvalidNationalId(reason.to_string())
}
