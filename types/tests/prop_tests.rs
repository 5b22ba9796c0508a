use proptest::prelude::*;

use natioid_types::{Credential, Digit};

proptest! {
    /// Digit::try_from(u8) accepts exactly 0..=9 and preserves the value.
    #[test]
    fn digit_from_u8(value in 0u8..=255) {
        match Digit::try_from(value) {
            Ok(d) => {
                prop_assert!(value <= 9);
                prop_assert_eq!(d.as_u8(), value);
            }
            Err(_) => prop_assert!(value > 9),
        }
    }

    /// Digit::try_from(char) agrees with char::is_ascii_digit.
    #[test]
    fn digit_from_char(c in any::<char>()) {
        prop_assert_eq!(Digit::try_from(c).is_ok(), c.is_ascii_digit());
    }

    /// Digit char parse preserves the numeric value.
    #[test]
    fn digit_char_value(value in 0u32..10) {
        let c = char::from_digit(value, 10).unwrap();
        prop_assert_eq!(Digit::try_from(c).unwrap().as_u8(), value as u8);
    }

    /// Credential parse succeeds iff every character is an ASCII digit,
    /// and the parsed length matches the input length.
    #[test]
    fn credential_parse(s in "[0-9]{0,12}") {
        let c: Credential = s.parse().unwrap();
        prop_assert_eq!(c.len(), s.len());
        prop_assert_eq!(c.is_empty(), s.is_empty());
    }

    /// Credential parse rejects any string containing a non-digit.
    #[test]
    fn credential_parse_rejects_non_digits(
        prefix in "[0-9]{0,6}",
        junk in "[^0-9]",
        suffix in "[0-9]{0,6}",
    ) {
        let s = format!("{prefix}{junk}{suffix}");
        prop_assert!(s.parse::<Credential>().is_err());
    }

    /// Credential equality is digit-for-digit equality of the source strings.
    #[test]
    fn credential_equality(a in "[0-9]{6}", b in "[0-9]{6}") {
        let ca: Credential = a.parse().unwrap();
        let cb: Credential = b.parse().unwrap();
        prop_assert_eq!(ca == cb, a == b);
    }

    /// Credential digits() preserves entry order.
    #[test]
    fn credential_preserves_order(s in "[0-9]{1,12}") {
        let c: Credential = s.parse().unwrap();
        for (parsed, raw) in c.digits().iter().zip(s.bytes()) {
            prop_assert_eq!(parsed.as_u8(), raw - b'0');
        }
    }
}
