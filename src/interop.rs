//! Round-trip contracts with the outside world: the document-id marker
//! embedded in exported Markdown, the list hardening required by the
//! external markdown converter, and filename sanitizing.

use regex::Regex;

fn doc_id_pattern() -> Regex {
    Regex::new(r"<!--\s*google-doc-id:\s*([a-zA-Z0-9_-]+)\s*-->").unwrap()
}

/// Extract the document id marker from Markdown content.
///
/// Returns the id (if present) and the content with the marker line
/// removed.
pub fn extract_doc_id(content: &str) -> (Option<String>, String) {
    let pattern = doc_id_pattern();
    match pattern.captures(content) {
        Some(captures) => {
            let id = captures[1].to_string();
            let clean = pattern.replace_all(content, "");
            (Some(id), clean.trim_start_matches('\n').to_string())
        }
        None => (None, content.to_string()),
    }
}

/// Embed a document id marker at the top of Markdown content.
///
/// Any prior marker is replaced rather than duplicated, so repeated saves
/// leave exactly one marker line carrying the most recent id.
pub fn set_doc_id(content: &str, doc_id: &str) -> String {
    let pattern = doc_id_pattern();
    let marker = format!("<!-- google-doc-id: {doc_id} -->");
    if pattern.is_match(content) {
        pattern.replace_all(content, marker.as_str()).to_string()
    } else {
        format!("{marker}\n\n{content}")
    }
}

/// Guarantee a blank line before any list block that immediately follows a
/// non-list paragraph line.
///
/// The external markdown converter requires a blank line before the start
/// of a list block; without one, bullets directly after a paragraph line
/// get merged into that paragraph as inline text.
pub fn harden_lists(content: &str) -> String {
    let list_item = Regex::new(r"^([-*+]|\d+\.)\s").unwrap();

    let mut result: Vec<&str> = Vec::new();
    for line in content.split('\n') {
        if list_item.is_match(line) {
            if let Some(previous) = result.last() {
                if !previous.trim().is_empty() && !list_item.is_match(previous) {
                    result.push("");
                }
            }
        }
        result.push(line);
    }
    result.join("\n")
}

/// Convert a document or section title into a safe file stem: invalid
/// filename characters removed, whitespace collapsed to hyphens,
/// lowercased.
pub fn sanitize_filename(title: &str) -> String {
    let stripped = Regex::new(r#"[<>:"/\\|?*]"#).unwrap().replace_all(title, "");
    let hyphenated = Regex::new(r"\s+").unwrap().replace_all(&stripped, "-");
    let collapsed = Regex::new(r"-+").unwrap().replace_all(&hyphenated, "-");
    collapsed.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_doc_id() {
        let content = "<!-- google-doc-id: abc123_XY- -->\n\n# Title\n";
        let (id, clean) = extract_doc_id(content);
        assert_eq!(id.as_deref(), Some("abc123_XY-"));
        assert_eq!(clean, "# Title\n");
    }

    #[test]
    fn test_extract_doc_id_permissive_whitespace() {
        let content = "<!--   google-doc-id:   spaced   -->\ncontent";
        let (id, _) = extract_doc_id(content);
        assert_eq!(id.as_deref(), Some("spaced"));
    }

    #[test]
    fn test_extract_doc_id_absent() {
        let (id, clean) = extract_doc_id("# Just markdown\n");
        assert!(id.is_none());
        assert_eq!(clean, "# Just markdown\n");
    }

    #[test]
    fn test_set_doc_id_prepends() {
        let out = set_doc_id("# Title\n", "new-id");
        assert_eq!(out, "<!-- google-doc-id: new-id -->\n\n# Title\n");
    }

    #[test]
    fn test_set_doc_id_idempotent() {
        // Saving twice leaves exactly one marker, with the second id.
        let once = set_doc_id("# Title\n", "first");
        let twice = set_doc_id(&once, "second");

        assert_eq!(twice.matches("google-doc-id").count(), 1);
        assert_eq!(twice, "<!-- google-doc-id: second -->\n\n# Title\n");
    }

    #[test]
    fn test_marker_round_trip() {
        let saved = set_doc_id("body text\n", "doc-9");
        let (id, clean) = extract_doc_id(&saved);
        assert_eq!(id.as_deref(), Some("doc-9"));
        assert_eq!(clean, "body text\n");
    }

    #[test]
    fn test_harden_lists_inserts_blank_line() {
        let input = "A paragraph.\n- first\n- second\n";
        assert_eq!(harden_lists(input), "A paragraph.\n\n- first\n- second\n");
    }

    #[test]
    fn test_harden_lists_numbered() {
        let input = "Steps:\n1. one\n2. two\n";
        assert_eq!(harden_lists(input), "Steps:\n\n1. one\n2. two\n");
    }

    #[test]
    fn test_harden_lists_already_separated() {
        let input = "A paragraph.\n\n- first\n";
        assert_eq!(harden_lists(input), input);
    }

    #[test]
    fn test_harden_lists_between_items_untouched() {
        let input = "- first\n- second\n* third\n+ fourth\n";
        assert_eq!(harden_lists(input), input);
    }

    #[test]
    fn test_harden_lists_heading_then_list() {
        let input = "# Heading\n- item\n";
        assert_eq!(harden_lists(input), "# Heading\n\n- item\n");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("My Great Doc"), "my-great-doc");
        assert_eq!(sanitize_filename("Q3: Plans / Goals?"), "q3-plans-goals");
        assert_eq!(sanitize_filename("a  -  b"), "a-b");
    }
}
