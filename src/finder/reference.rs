// src/finder/reference.rs
// =============================================================================
// Strict syntax checks for a URL reference, run before the url crate sees it.
//
// The url crate follows the WHATWG URL standard, which is forgiving: it
// percent-encodes control characters, keeps "%zz" as-is, and happily treats
// "1:2" as a relative path. We want those strings reported as malformed, so
// this module rejects them first:
// - control bytes (0x00-0x1F, 0x7F) anywhere before the fragment
// - a leading ':' (a scheme separator with no scheme)
// - a ':' in the first segment of a relative path ("1:2", "./a" is fine)
// - '%' not followed by two hex digits, in the authority/path or fragment
//
// The query is never checked for escapes, and neither is an opaque
// reference like "mailto:%zz" (scheme followed by something other than '/').
// =============================================================================

use super::error::LinkError;

// Checks a trimmed, non-empty reference
//
// Returns: Ok(()) when the url crate may parse it, or the first problem found
//
// Examples:
//   "/docs?q=%zz"  -> Ok (the query is not checked)
//   "/a%zzb"       -> Err(InvalidEscape("%zz"))
//   ":foo"         -> Err(MissingScheme)
//   "1:2"          -> Err(ColonInFirstSegment)
pub fn check_reference(reference: &str) -> Result<(), LinkError> {
    // The fragment is handled separately, everything else comes first
    let (before_fragment, fragment) = match reference.split_once('#') {
        Some((before, fragment)) => (before, Some(fragment)),
        None => (reference, None),
    };

    if before_fragment.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(LinkError::InvalidControlCharacter);
    }

    let (scheme, rest) = split_scheme(before_fragment)?;

    // Drop the query, escapes in it are left to the server
    let rest = rest.split_once('?').map_or(rest, |(rest, _query)| rest);

    match scheme {
        // "mailto:someone" and friends: opaque, nothing more to check
        Some(_) if !rest.starts_with('/') => {}
        Some(_) => check_escapes(rest)?,
        None => {
            // "1:2" would read as scheme "1" later on, so refuse it here
            if !rest.starts_with('/') {
                let first_segment = rest.split('/').next().unwrap_or("");
                if first_segment.contains(':') {
                    return Err(LinkError::ColonInFirstSegment);
                }
            }
            check_escapes(rest)?;
        }
    }

    if let Some(fragment) = fragment {
        check_escapes(fragment)?;
    }

    Ok(())
}

// Splits "scheme:rest" into (Some(scheme), rest), or returns (None, whole)
//
// A scheme is a letter followed by letters, digits, '+', '-' or '.'.
// Anything else before the first ':' means there is no scheme at all.
fn split_scheme(s: &str) -> Result<(Option<&str>, &str), LinkError> {
    for (i, c) in s.char_indices() {
        match c {
            'a'..='z' | 'A'..='Z' => {}
            '0'..='9' | '+' | '-' | '.' if i == 0 => return Ok((None, s)),
            '0'..='9' | '+' | '-' | '.' => {}
            ':' if i == 0 => return Err(LinkError::MissingScheme),
            ':' => return Ok((Some(&s[..i]), &s[i + 1..])),
            _ => return Ok((None, s)),
        }
    }

    Ok((None, s))
}

// Every '%' must start a two hex digit escape like "%2F"
fn check_escapes(s: &str) -> Result<(), LinkError> {
    let bytes = s.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        if b != b'%' {
            continue;
        }

        let valid = bytes.len() > i + 2
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();

        if !valid {
            let end = (i + 3).min(bytes.len());
            let escape = String::from_utf8_lossy(&bytes[i..end]).into_owned();
            return Err(LinkError::InvalidEscape(escape));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_references() {
        for reference in [
            "/a/b",
            "c/d",
            "../up",
            "#top",
            "//cdn.test/app.js",
            "https://x.test/a%2Fb?q=1#frag",
            "./a:b",
            "dir/a:b",
            "img%20name.png",
        ] {
            assert_eq!(check_reference(reference), Ok(()), "{reference}");
        }
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(check_reference("/a\u{1}b"), Err(LinkError::InvalidControlCharacter));
        assert_eq!(check_reference("http://h/x\u{7f}y"), Err(LinkError::InvalidControlCharacter));
        assert_eq!(check_reference("/a\u{0}"), Err(LinkError::InvalidControlCharacter));
        // only the part before the fragment is checked
        assert_eq!(check_reference("/a#b\u{1}"), Ok(()));
    }

    #[test]
    fn test_bad_escapes() {
        assert_eq!(check_reference("/a%zzb"), Err(LinkError::InvalidEscape("%zz".to_string())));
        assert_eq!(check_reference("/a%4"), Err(LinkError::InvalidEscape("%4".to_string())));
        assert_eq!(check_reference("/a%"), Err(LinkError::InvalidEscape("%".to_string())));
        assert_eq!(
            check_reference("https://x.test/%g1"),
            Err(LinkError::InvalidEscape("%g1".to_string()))
        );
        assert_eq!(check_reference("/a#%zz"), Err(LinkError::InvalidEscape("%zz".to_string())));
    }

    #[test]
    fn test_escapes_in_query_and_opaque_parts_are_allowed() {
        assert_eq!(check_reference("/search?q=100%"), Ok(()));
        assert_eq!(check_reference("mailto:%zz"), Ok(()));
    }

    #[test]
    fn test_missing_scheme() {
        assert_eq!(check_reference(":foo"), Err(LinkError::MissingScheme));
        assert_eq!(check_reference("://x.test/"), Err(LinkError::MissingScheme));
    }

    #[test]
    fn test_colon_in_first_segment() {
        assert_eq!(check_reference("1:2"), Err(LinkError::ColonInFirstSegment));
        assert_eq!(check_reference("1:2/c"), Err(LinkError::ColonInFirstSegment));
        assert_eq!(check_reference("-a:b"), Err(LinkError::ColonInFirstSegment));
    }

    #[test]
    fn test_schemes_are_split() {
        assert_eq!(split_scheme("http://x.test"), Ok((Some("http"), "//x.test")));
        assert_eq!(split_scheme("svn+ssh:x"), Ok((Some("svn+ssh"), "x")));
        assert_eq!(split_scheme("/a:b"), Ok((None, "/a:b")));
        assert_eq!(split_scheme("no-colon"), Ok((None, "no-colon")));
    }
}
