//! Purpose: Define the stable conversion surface shared by the HTTP server and CLI.
//! Exports: `Conversion`, `roman_from_query`, `arabic_from_query`, core re-exports.
//! Role: Turn raw, untrusted parameter strings into validated conversions.
//! Invariants: Both front-ends go through this module so error codes agree.
//! Invariants: The core conversion pair is only ever called with sanitized input.

use serde::Serialize;

pub use crate::core::error::{Error, ErrorKind, to_exit_code};
pub use crate::core::roman::{MAX_VALUE, MIN_VALUE, encode_arabic, parse_roman};

/// A successful conversion: the canonical uppercase numeral and its value.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Conversion {
    pub roman: String,
    pub arabic: u16,
}

/// Validates a raw `roman` query parameter and decodes it.
///
/// `None` means the parameter was absent from the request. The returned
/// numeral is the canonical uppercase form, regardless of input casing.
pub fn roman_from_query(raw: Option<&str>) -> Result<Conversion, Error> {
    let Some(raw) = raw else {
        return Err(Error::new(ErrorKind::MissingParam)
            .with_message("roman query parameter is required")
            .with_hint("Pass a numeral like ?roman=XIV."));
    };
    if raw.trim().is_empty() {
        return Err(Error::new(ErrorKind::EmptyParam)
            .with_message("roman query parameter must not be empty"));
    }
    let Some(arabic) = parse_roman(raw) else {
        return Err(Error::new(ErrorKind::InvalidRoman)
            .with_message("invalid Roman numeral")
            .with_detail(format!("{raw:?} is not a valid Roman numeral")));
    };
    Ok(Conversion {
        roman: raw.trim().to_uppercase(),
        arabic,
    })
}

/// Validates a raw `arabic` query parameter and encodes it.
///
/// The integer parse is strict: trailing non-numeric characters are
/// rejected rather than silently truncated.
pub fn arabic_from_query(raw: Option<&str>) -> Result<Conversion, Error> {
    let Some(raw) = raw else {
        return Err(Error::new(ErrorKind::MissingParam)
            .with_message("arabic query parameter is required")
            .with_hint("Pass a value like ?arabic=14."));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::new(ErrorKind::InvalidParamType)
            .with_message("arabic query parameter must be a non-empty string"));
    }
    let value: i64 = trimmed.parse().map_err(|_| {
        Error::new(ErrorKind::InvalidNumber)
            .with_message("arabic query parameter must be an integer")
            .with_detail(format!("{raw:?} is not a valid integer"))
    })?;
    let Some(roman) = encode_arabic(value) else {
        return Err(Error::new(ErrorKind::InvalidRange)
            .with_message(format!(
                "arabic value must be between {MIN_VALUE} and {MAX_VALUE}"
            ))
            .with_detail(format!("{value} is outside the supported range")));
    };
    Ok(Conversion {
        roman,
        arabic: value as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::{Conversion, ErrorKind, arabic_from_query, roman_from_query};

    #[test]
    fn roman_param_happy_path_uppercases() {
        let conversion = roman_from_query(Some(" xiv ")).expect("valid");
        assert_eq!(
            conversion,
            Conversion {
                roman: "XIV".to_string(),
                arabic: 14,
            }
        );
    }

    #[test]
    fn roman_param_error_kinds() {
        assert_eq!(
            roman_from_query(None).unwrap_err().kind(),
            ErrorKind::MissingParam
        );
        assert_eq!(
            roman_from_query(Some("  ")).unwrap_err().kind(),
            ErrorKind::EmptyParam
        );
        assert_eq!(
            roman_from_query(Some("VV")).unwrap_err().kind(),
            ErrorKind::InvalidRoman
        );
    }

    #[test]
    fn arabic_param_happy_path() {
        let conversion = arabic_from_query(Some("1990")).expect("valid");
        assert_eq!(conversion.roman, "MCMXC");
        assert_eq!(conversion.arabic, 1990);
    }

    #[test]
    fn arabic_param_rejects_trailing_garbage() {
        let err = arabic_from_query(Some("14abc")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);
    }

    #[test]
    fn arabic_param_error_kinds() {
        assert_eq!(
            arabic_from_query(None).unwrap_err().kind(),
            ErrorKind::MissingParam
        );
        assert_eq!(
            arabic_from_query(Some("")).unwrap_err().kind(),
            ErrorKind::InvalidParamType
        );
        assert_eq!(
            arabic_from_query(Some("3.5")).unwrap_err().kind(),
            ErrorKind::InvalidNumber
        );
        assert_eq!(
            arabic_from_query(Some("0")).unwrap_err().kind(),
            ErrorKind::InvalidRange
        );
        assert_eq!(
            arabic_from_query(Some("4000")).unwrap_err().kind(),
            ErrorKind::InvalidRange
        );
        assert_eq!(
            arabic_from_query(Some("-12")).unwrap_err().kind(),
            ErrorKind::InvalidRange
        );
    }
}
