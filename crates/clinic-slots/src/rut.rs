//! RUT (Chilean national ID) canonicalization and modulo-11 check-digit validation.
//!
//! A RUT is a 7-8 digit body plus one check character (`0`-`9` or `K`), usually
//! written `12.345.678-5`. Input is canonicalized by trimming, stripping `.` and
//! `-`, and upper-casing; the check character is then recomputed from the body
//! with the weight cycle 2,3,4,5,6,7,2,3,... applied from the least significant
//! digit.

use std::fmt;
use std::str::FromStr;

use crate::error::RutError;

/// Strip formatting from raw input: trim, drop `.` and `-`, upper-case.
///
/// The result is not guaranteed to be a valid RUT.
pub fn canonicalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | '-'))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Compute the check character for a RUT body given as decimal digits.
///
/// Returns `None` if `body` is empty or contains a non-digit.
pub fn compute_check_digit(body: &str) -> Option<char> {
    if body.is_empty() {
        return None;
    }

    let mut sum = 0u32;
    let mut weight = 2u32;
    for c in body.chars().rev() {
        sum += c.to_digit(10)? * weight;
        weight = if weight == 7 { 2 } else { weight + 1 };
    }

    Some(match 11 - sum % 11 {
        11 => '0',
        10 => 'K',
        n => char::from_digit(n, 10)?,
    })
}

/// Whether `input` is a RUT with a correct check digit.
///
/// Never panics; anything malformed is simply invalid.
pub fn is_valid_rut(input: &str) -> bool {
    input.parse::<Rut>().is_ok()
}

/// Render raw input in the conventional `12.345.678-5` form.
///
/// # Errors
/// Returns the [`RutError`] from parsing if the input is not a valid RUT.
pub fn format_rut(input: &str) -> Result<String, RutError> {
    input.parse::<Rut>().map(|rut| rut.to_string())
}

/// A checksum-validated RUT.
///
/// The body keeps its digits as written, so a zero-padded body such as
/// `00123456` survives formatting and still validates afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rut {
    body: String,
    check_digit: char,
}

impl Rut {
    /// The 7-8 body digits, without the check character.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The body as a number. Leading zeros are not significant here.
    pub fn number(&self) -> u32 {
        self.body
            .bytes()
            .fold(0, |n, b| n * 10 + u32::from(b - b'0'))
    }

    /// The check character, `'0'`-`'9'` or `'K'`.
    pub fn check_digit(&self) -> char {
        self.check_digit
    }

    /// Body and check character with no punctuation, e.g. `123456785`.
    pub fn canonical(&self) -> String {
        format!("{}{}", self.body, self.check_digit)
    }
}

impl FromStr for Rut {
    type Err = RutError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let cleaned = canonicalize(input);

        // 7 or 8 digits followed by a digit or K.
        let (body, dv) = match cleaned.char_indices().last() {
            Some((idx, dv)) => (&cleaned[..idx], dv),
            None => return Err(RutError::Malformed(input.to_string())),
        };
        let well_formed = matches!(body.len(), 7 | 8)
            && body.bytes().all(|b| b.is_ascii_digit())
            && (dv.is_ascii_digit() || dv == 'K');
        if !well_formed {
            return Err(RutError::Malformed(input.to_string()));
        }

        let expected =
            compute_check_digit(body).ok_or_else(|| RutError::Malformed(input.to_string()))?;
        if expected != dv {
            return Err(RutError::CheckDigitMismatch {
                expected,
                found: dv,
            });
        }

        Ok(Rut {
            body: body.to_string(),
            check_digit: dv,
        })
    }
}

impl fmt::Display for Rut {
    /// Thousands separated with `.` and the check character after `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = &self.body;
        let mut grouped = String::with_capacity(digits.len() + 2);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        write!(f, "{}-{}", grouped, self.check_digit)
    }
}
