use crate::error::{PgChiselError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// NAMEDATALEN - 1. PostgreSQL truncates longer identifiers; we reject them.
const MAX_IDENT_BYTES: usize = 63;

static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x1f\x7f]").expect("control char pattern is valid"));

/// Quotes an identifier for interpolation into DDL.
///
/// Identifiers cannot be bound as statement parameters, so table and column
/// names are interpolated into SQL text. Every name passes through here:
/// embedded double quotes are doubled and the result is wrapped in quotes,
/// after rejecting names no quoting can make safe.
pub fn quote_ident(name: &str) -> Result<String> {
    validate(name)?;
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

fn validate(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PgChiselError::InvalidIdentifier(
            "identifier is empty".to_string(),
        ));
    }
    if name.len() > MAX_IDENT_BYTES {
        return Err(PgChiselError::InvalidIdentifier(format!(
            "identifier exceeds {} bytes: {}",
            MAX_IDENT_BYTES, name
        )));
    }
    if CONTROL_CHARS.is_match(name) {
        return Err(PgChiselError::InvalidIdentifier(format!(
            "identifier contains control characters: {:?}",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifier_is_quoted() {
        assert_eq!(quote_ident("people").unwrap(), "\"people\"");
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        assert_eq!(quote_ident("we\"ird").unwrap(), "\"we\"\"ird\"");
    }

    #[test]
    fn test_mixed_case_and_spaces_survive() {
        assert_eq!(quote_ident("My Table").unwrap(), "\"My Table\"");
    }

    #[test]
    fn test_injection_shaped_name_is_contained() {
        let quoted = quote_ident("t\"; DROP TABLE users; --").unwrap();
        assert_eq!(quoted, "\"t\"\"; DROP TABLE users; --\"");
    }

    #[test]
    fn test_empty_identifier_rejected() {
        assert!(matches!(
            quote_ident(""),
            Err(PgChiselError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_control_characters_rejected() {
        assert!(quote_ident("bad\nname").is_err());
        assert!(quote_ident("bad\x00name").is_err());
    }

    #[test]
    fn test_overlong_identifier_rejected() {
        let name = "x".repeat(MAX_IDENT_BYTES + 1);
        assert!(quote_ident(&name).is_err());
        let max = "x".repeat(MAX_IDENT_BYTES);
        assert!(quote_ident(&max).is_ok());
    }
}
