//! Single decimal digit, the unit of credential entry.

use std::fmt;
use zeroize::Zeroize;

use crate::error::ParseError;

/// One decimal digit (0..=9) of a PIN or one-time code.
///
/// The value never appears in `Debug` output so that digit sequences
/// cannot leak through logs or test failures.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Zeroize)]
pub struct Digit(u8);

impl Digit {
    /// Return the numeric value (0..=9).
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= 9 {
            Ok(Self(value))
        } else {
            Err(ParseError::DigitOutOfRange(value))
        }
    }
}

impl TryFrom<char> for Digit {
    type Error = ParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        value
            .to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or(ParseError::InvalidDigit(value))
    }
}

impl fmt::Debug for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digit(_)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_ten_digits() {
        for v in 0..=9u8 {
            let d = Digit::try_from(v).unwrap();
            assert_eq!(d.as_u8(), v);
        }
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Digit::try_from(10u8).is_err());
        assert!(Digit::try_from(255u8).is_err());
    }

    #[test]
    fn parses_ascii_digits_only() {
        assert_eq!(Digit::try_from('7').unwrap().as_u8(), 7);
        assert!(Digit::try_from('x').is_err());
        assert!(Digit::try_from(' ').is_err());
        // Non-ASCII numerals are not keypad input.
        assert!(Digit::try_from('٣').is_err());
    }

    #[test]
    fn debug_output_hides_the_value() {
        let d = Digit::try_from(4u8).unwrap();
        assert_eq!(format!("{d:?}"), "Digit(_)");
    }
}
