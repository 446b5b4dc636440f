//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains something other than digits, spaces, or separators.
    #[error("phone number must contain only digits")]
    NotNumeric,
    /// The digits do not fit the wire representation.
    #[error("phone number is too long")]
    TooLong,
}

/// A phone number as the registration endpoint expects it.
///
/// The backend takes the phone as a JSON number, so the type holds the
/// digits as a `u64` and serializes transparently. Spaces, dashes, and dots
/// are tolerated on input and stripped; a leading `+` is rejected because
/// the numeric wire format cannot carry it.
///
/// ## Examples
///
/// ```
/// use tillpoint_core::Phone;
///
/// let phone = Phone::parse("0812 3456 789").unwrap();
/// assert_eq!(phone.as_u64(), 8_123_456_789);
///
/// assert!(Phone::parse("").is_err());
/// assert!(Phone::parse("call me").is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(u64);

impl Phone {
    /// Parse a `Phone` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains non-digit
    /// characters (after stripping spaces, dashes, and dots), or exceeds
    /// the `u64` range.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.'))
            .collect();

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NotNumeric);
        }

        digits.parse::<u64>().map(Self).map_err(|_| PhoneError::TooLong)
    }

    /// The numeric wire value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
