//! Parsing of comma-separated number lists.

use rust_decimal::Decimal;

/// Parses a single trimmed token into a [`Decimal`].
///
/// Accepts plain decimals (`"12.5"`) as well as scientific notation
/// (`"1e3"`, `"2.5E-1"`).
pub fn parse_number(token: &str) -> Result<Decimal, rust_decimal::Error> {
    token
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(token))
}

/// Splits `text` on commas and parses every non-empty token.
///
/// Whitespace around tokens is ignored and empty tokens are skipped, so
/// `"10, 50,,100,"` yields three numbers. The first token that fails to
/// parse is returned alongside the error.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tier_core::calculations::parse_number_list;
///
/// assert_eq!(
///     parse_number_list("10, 50,,100,").unwrap(),
///     vec![dec!(10), dec!(50), dec!(100)]
/// );
/// assert!(parse_number_list("10,abc").is_err());
/// ```
pub fn parse_number_list(text: &str) -> Result<Vec<Decimal>, (String, rust_decimal::Error)> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| parse_number(token).map_err(|e| (token.to_string(), e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_number_accepts_plain_decimals() {
        assert_eq!(parse_number("12.5").unwrap(), dec!(12.5));
        assert_eq!(parse_number("-3").unwrap(), dec!(-3));
    }

    #[test]
    fn parse_number_accepts_scientific_notation() {
        assert_eq!(parse_number("1e3").unwrap(), dec!(1000));
        assert_eq!(parse_number("2.5E-1").unwrap(), dec!(0.25));
    }

    #[test]
    fn parse_number_rejects_words() {
        assert!(parse_number("ten").is_err());
        assert!(parse_number("nan").is_err());
    }

    #[test]
    fn parse_number_list_skips_blank_tokens() {
        let values = parse_number_list(" 10 ,, 50 , ").unwrap();

        assert_eq!(values, vec![dec!(10), dec!(50)]);
    }

    #[test]
    fn parse_number_list_of_empty_text_is_empty() {
        assert_eq!(parse_number_list("").unwrap(), Vec::<Decimal>::new());
        assert_eq!(parse_number_list(" , ,").unwrap(), Vec::<Decimal>::new());
    }

    #[test]
    fn parse_number_list_reports_first_bad_token() {
        let (token, _) = parse_number_list("10, x1, y2").unwrap_err();

        assert_eq!(token, "x1");
    }
}
