//! Best-effort recovery of a JSON object from free-form model output.

/// Returns the first balanced `{...}` block in `text`.
///
/// Scanning starts at the first `{` and tracks brace depth, ignoring braces
/// that appear inside JSON string literals. Returns `None` if there is no
/// `{` or the block never closes.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_surrounding_prose_is_dropped() {
        let text = "Sure! Here is the analysis:\n{\"resumeScore\": 7}\nLet me know if you need more.";
        assert_eq!(extract_json_object(text), Some("{\"resumeScore\": 7}"));
    }

    #[test]
    fn test_markdown_fences_are_dropped() {
        let text = "```json\n{\"strengths\": [\"Rust\"]}\n```";
        assert_eq!(extract_json_object(text), Some("{\"strengths\": [\"Rust\"]}"));
    }

    #[test]
    fn test_nested_objects_stay_intact() {
        let text = r#"{"outer": {"inner": {"x": 1}}, "y": 2} trailing"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"outer": {"inner": {"x": 1}}, "y": 2}"#)
        );
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let text = r#"{"summary": "uses {curly} braces and \"quoted }\" text"} extra }"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"summary": "uses {curly} braces and \"quoted }\" text"}"#)
        );
    }

    #[test]
    fn test_only_first_of_two_objects() {
        let text = r#"{"first": true} and then {"second": true}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"first": true}"#));
    }

    #[test]
    fn test_no_object() {
        assert_eq!(extract_json_object("I cannot help with that."), None);
    }

    #[test]
    fn test_unbalanced_object() {
        assert_eq!(extract_json_object(r#"{"strengths": ["a", "b""#), None);
    }

    #[test]
    fn test_multibyte_text_before_object() {
        let text = "Résumé → {\"ok\": \"✓\"}";
        assert_eq!(extract_json_object(text), Some("{\"ok\": \"✓\"}"));
    }
}
