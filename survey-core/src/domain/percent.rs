use serde::Serialize;
use std::fmt;

use crate::domain::Country;
use crate::error::SurveyError;

/// A whole percentage in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Percent(u8);

impl Percent {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Parse a dataset string of the form `<integer>%`.
    ///
    /// `node` and `country` only feed the error message.
    pub fn parse(raw: &str, node: &str, country: Country) -> Result<Self, SurveyError> {
        let parse_err = || SurveyError::Parse {
            node: node.to_string(),
            country,
            value: raw.to_string(),
        };

        let digits = raw.trim().strip_suffix('%').ok_or_else(parse_err)?;
        let digits = digits.trim_end();
        let unsigned = digits.strip_prefix('-').unwrap_or(digits);
        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(parse_err());
        }

        // Overlong digit strings are still integers, just out of range.
        let value: i64 = digits.parse().unwrap_or(if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        });

        u8::try_from(value)
            .ok()
            .and_then(Percent::new)
            .ok_or(SurveyError::OutOfRange {
                node: node.to_string(),
                country,
                value,
            })
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(raw: &str) -> Result<Percent, SurveyError> {
        Percent::parse(raw, "node", Country::Ksa)
    }

    #[test]
    fn parses_plain_percentages() {
        assert_eq!(parse("42%").unwrap().value(), 42);
        assert_eq!(parse("0%").unwrap().value(), 0);
        assert_eq!(parse("100%").unwrap().value(), 100);
        assert_eq!(parse(" 7% ").unwrap().value(), 7);
    }

    #[test]
    fn rejects_malformed_strings() {
        for raw in ["abc%", "42", "%", "4.5%", "", "4 2%", "+5%"] {
            let err = parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "{raw:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_values() {
        for raw in ["101%", "-1%", "99999999999999999999999%"] {
            let err = parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Range, "{raw:?}");
        }
    }

    #[test]
    fn display_appends_sign() {
        assert_eq!(Percent::new(12).unwrap().to_string(), "12%");
        assert!(Percent::new(101).is_none());
    }
}
