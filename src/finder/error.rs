// src/finder/error.rs
// =============================================================================
// The error attached to a discovered link that is not a valid URL reference.
//
// It is never returned from LinkFinder::find directly. Instead it is stored
// next to the offending string in the result set so callers can report
// malformed markup and keep going.
//
// Two groups of variants:
// - syntax errors found by reference::check_reference before parsing
//   (things the url crate would otherwise quietly fix up)
// - InvalidReference, wrapping whatever Url::parse / Url::join rejected
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// An ASCII control byte (0x00-0x1F or 0x7F) outside the fragment
    #[error("invalid control character in URL")]
    InvalidControlCharacter,

    /// A '%' that is not followed by two hex digits
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),

    /// The reference starts with ':'
    #[error("missing protocol scheme")]
    MissingScheme,

    /// A relative path like "1:2" that would be read as a scheme
    #[error("first path segment in URL cannot contain colon")]
    ColonInFirstSegment,

    /// The string could not be parsed or resolved as a URL reference
    #[error("invalid URL reference: {0}")]
    InvalidReference(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_parse_error() {
        let err = LinkError::from(url::ParseError::InvalidPort);
        assert_eq!(err.to_string(), "invalid URL reference: invalid port number");
    }

    #[test]
    fn test_display_syntax_errors() {
        assert_eq!(
            LinkError::InvalidEscape("%zz".to_string()).to_string(),
            "invalid URL escape \"%zz\""
        );
        assert_eq!(LinkError::MissingScheme.to_string(), "missing protocol scheme");
    }
}
