//! Parser for `{placeholder}` references

use std::ops::Range;

/// A parsed placeholder reference in a template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRef {
    /// The placeholder name (without braces).
    pub name: String,
    /// Byte range of the full `{name}` token in the original string.
    pub span: Range<usize>,
}

/// Extracts all `{name}` references from a template string.
///
/// A name is one or more alphanumeric, underscore, or hyphen characters.
/// Braces that do not delimit such a name (including `{}` and unterminated
/// `{`) are left alone, so JSON-looking text passes through untouched.
///
/// # Examples
///
/// ```
/// use covenant_application::placeholder::parser::parse_placeholders;
///
/// let refs = parse_placeholders("/repos/{owner}/{repo}/commits");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "owner");
/// assert_eq!(refs[1].name, "repo");
/// ```
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<PlaceholderRef> {
    let mut references = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' {
            let start = i;
            let mut j = i + 1;
            while j < bytes.len() && is_name_byte(bytes[j]) {
                j += 1;
            }
            if j > i + 1 && j < bytes.len() && bytes[j] == b'}' {
                let name = &input[i + 1..j];
                references.push(PlaceholderRef {
                    name: name.to_string(),
                    span: start..j + 1,
                });
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }

    references
}

const fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Returns true if the input contains at least one placeholder reference.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    !parse_placeholders(input).is_empty()
}
