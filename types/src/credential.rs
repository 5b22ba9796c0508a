//! Credential values: PIN and one-time-code digit sequences.

use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::digit::Digit;
use crate::error::ParseError;

/// An ordered sequence of entered digits.
///
/// This type intentionally does not implement `Serialize` or `Display`,
/// and its `Debug` output carries only the length, so credential values
/// cannot leak through logs, wire formats, or test failures. Digits are
/// zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    digits: Vec<Digit>,
}

impl Credential {
    /// Wrap an already-collected digit sequence.
    pub fn new(digits: Vec<Digit>) -> Self {
        Self { digits }
    }

    /// The digits in entry order.
    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Whether no digits have been collected.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl FromStr for Credential {
    type Err = ParseError;

    /// Parse a credential from a decimal-digit string such as `"123456"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(Digit::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(len={})", self.digits.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_digit_strings() {
        let c: Credential = "123456".parse().unwrap();
        assert_eq!(c.len(), 6);
        assert_eq!(c.digits()[0].as_u8(), 1);
        assert_eq!(c.digits()[5].as_u8(), 6);
    }

    #[test]
    fn rejects_non_digit_characters() {
        assert!("12a456".parse::<Credential>().is_err());
        assert!("12 456".parse::<Credential>().is_err());
        assert!("-12345".parse::<Credential>().is_err());
    }

    #[test]
    fn empty_string_is_an_empty_credential() {
        let c: Credential = "".parse().unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn equality_is_digit_for_digit() {
        let a: Credential = "123456".parse().unwrap();
        let b: Credential = "123456".parse().unwrap();
        let c: Credential = "123457".parse().unwrap();
        let short: Credential = "12345".parse().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, short);
    }

    #[test]
    fn debug_output_hides_the_digits() {
        let c: Credential = "987654".parse().unwrap();
        assert_eq!(format!("{c:?}"), "Credential(len=6)");
    }
}
