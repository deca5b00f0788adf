//! Header normalization.

/// Normalizes a header value: strips a byte-order mark and surrounding whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Replaces empty header names with `Column{n}` (one-based position).
pub fn fill_blank_headers(headers: Vec<String>) -> Vec<String> {
    headers
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            if name.is_empty() {
                format!("Column{}", idx + 1)
            } else {
                name
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  hello  "), "hello");
        assert_eq!(normalize_header("\u{feff}id"), "id");
        assert_eq!(normalize_header("hello"), "hello");
    }

    #[test]
    fn test_fill_blank_headers() {
        let filled = fill_blank_headers(vec!["a".into(), String::new(), "c".into()]);
        assert_eq!(filled, vec!["a", "Column2", "c"]);
    }
}
