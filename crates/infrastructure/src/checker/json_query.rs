//! JSONPath-lite lookups
//!
//! Supports the path shapes expectations use: `$`, `$.field.nested`,
//! `$[0].name`, `$.items[2].id`.

/// Looks up a value in a JSON document by path.
///
/// Returns `Ok(None)` when the path walks off the document (missing field,
/// index out of bounds) and `Err` when the path itself is malformed.
///
/// # Errors
///
/// Returns a description of the syntax problem for malformed paths.
pub fn query_path(
    json: &serde_json::Value,
    path: &str,
) -> Result<Option<serde_json::Value>, String> {
    let path = path.trim();
    let Some(rest) = path.strip_prefix('$') else {
        return Err("path must start with '$'".to_string());
    };
    if rest.is_empty() {
        return Ok(Some(json.clone()));
    }

    let rest = rest.strip_prefix('.').unwrap_or(rest);
    let mut current = json;

    for segment in split_segments(rest) {
        if let Some((name, index)) = parse_index_access(&segment)? {
            if !name.is_empty() {
                match current.get(name.as_str()) {
                    Some(v) => current = v,
                    None => return Ok(None),
                }
            }
            match current.get(index) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        } else {
            match current.get(segment.as_str()) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }
    }

    Ok(Some(current.clone()))
}

/// Splits a path into dot-separated segments, keeping bracket indices
/// attached to their field name.
fn split_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parses `field[3]` (or bare `[3]`) into the field name and index.
fn parse_index_access(segment: &str) -> Result<Option<(String, usize)>, String> {
    let Some(bracket_start) = segment.find('[') else {
        return Ok(None);
    };
    if !segment.ends_with(']') {
        return Err(format!("unterminated index in segment '{segment}'"));
    }
    let name = segment[..bracket_start].to_string();
    let index_str = &segment[bracket_start + 1..segment.len() - 1];
    let index: usize = index_str
        .parse()
        .map_err(|_| format!("invalid array index '{index_str}'"))?;
    Ok(Some((name, index)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root() {
        let doc = json!({"a": 1});
        assert_eq!(query_path(&doc, "$").unwrap(), Some(doc.clone()));
    }

    #[test]
    fn test_nested_field() {
        let doc = json!({"user": {"id": 7, "name": "octocat"}});
        assert_eq!(query_path(&doc, "$.user.name").unwrap(), Some(json!("octocat")));
    }

    #[test]
    fn test_root_array_index() {
        let doc = json!([{"name": "first"}, {"name": "second"}]);
        assert_eq!(query_path(&doc, "$[1].name").unwrap(), Some(json!("second")));
    }

    #[test]
    fn test_field_array_index() {
        let doc = json!({"items": [{"id": 1}, {"id": 2}, {"id": 3}]});
        assert_eq!(query_path(&doc, "$.items[2].id").unwrap(), Some(json!(3)));
    }

    #[test]
    fn test_missing_field_is_none() {
        let doc = json!({"a": 1});
        assert_eq!(query_path(&doc, "$.b").unwrap(), None);
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let doc = json!([1, 2]);
        assert_eq!(query_path(&doc, "$[5]").unwrap(), None);
    }

    #[test]
    fn test_malformed_paths() {
        let doc = json!({});
        assert!(query_path(&doc, "name").is_err());
        assert!(query_path(&doc, "$.items[x]").is_err());
        assert!(query_path(&doc, "$.items[0").is_err());
    }
}
