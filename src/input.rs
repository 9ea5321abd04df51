//! Input
//!
//! Strict parsing of numbers typed in at the till.

use thiserror::Error;

/// Errors raised while parsing typed input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was entered.
    #[error("input cannot be empty")]
    Empty,

    /// The input contained something other than the digits `0`-`9`.
    #[error("please enter a valid number (found {0:?})")]
    InvalidDigit(char),

    /// The number does not fit in the target type.
    #[error("number is too large")]
    Overflow,
}

/// Parse a non-negative base-10 integer.
///
/// Only the ASCII digits `0`-`9` are accepted: no sign, no whitespace, no separators.
///
/// # Errors
///
/// Returns a [`ParseError`] when the input is empty, contains any other character, or
/// overflows `u64`.
pub fn parse_number(input: &str) -> Result<u64, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    input.chars().try_fold(0_u64, |acc, c| {
        let digit = c.to_digit(10).ok_or(ParseError::InvalidDigit(c))?;

        acc.checked_mul(10)
            .and_then(|value| value.checked_add(u64::from(digit)))
            .ok_or(ParseError::Overflow)
    })
}

/// Parse a non-negative base-10 integer that must fit in `T`.
///
/// # Errors
///
/// As [`parse_number`], with [`ParseError::Overflow`] when the value does not fit in `T`.
pub fn parse_as<T: TryFrom<u64>>(input: &str) -> Result<T, ParseError> {
    T::try_from(parse_number(input)?).map_err(|_err| ParseError::Overflow)
}
