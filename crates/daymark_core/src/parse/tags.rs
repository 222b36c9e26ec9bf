//! Hierarchical tag extraction.
//!
//! # Responsibility
//! - Recognize inline `#a/b/c` tokens in note bodies.
//! - Decompose every token into its path segments, each an independent tag.
//!
//! # Invariants
//! - Extraction never fails; a body without tokens yields an empty set.
//! - Source casing is preserved; no case folding happens anywhere.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Wire grammar shared with the tokenizer: `#` + word-segment, repeated with
/// `/` separators. `\w` is Unicode-aware, so CJK and other non-Latin scripts
/// count as word characters alongside digits and underscore.
pub(crate) static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(\w+(?:/\w+)*)").expect("valid tag regex"));

/// Extracts the normalized tag set of a note body.
///
/// Every path segment of every `#a/b/c` token joins the result, leaf and
/// intermediate alike, so filtering on `project` also finds notes that only
/// ever wrote `#project/sub`. Duplicates collapse under set semantics.
pub fn extract_tags(body: &str) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    for caps in TAG_RE.captures_iter(body) {
        for segment in caps[1].split('/') {
            tags.insert(segment.to_string());
        }
    }
    tags
}

/// Splits a raw `#a/b/c` token into its ordered path components.
pub(crate) fn tag_path(token: &str) -> Vec<String> {
    token
        .trim_start_matches('#')
        .split('/')
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{extract_tags, tag_path};

    fn set(values: &[&str]) -> std::collections::BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn every_path_segment_becomes_a_tag() {
        assert_eq!(extract_tags("#a/b/c content"), set(&["a", "b", "c"]));
    }

    #[test]
    fn body_without_tokens_yields_empty_set() {
        assert_eq!(extract_tags("no tags here"), set(&[]));
    }

    #[test]
    fn duplicate_tokens_collapse() {
        let reordered = extract_tags("#x/y then #y then #x/y");
        assert_eq!(reordered, extract_tags("#y #x/y #x/y"));
        assert_eq!(reordered, set(&["x", "y"]));
    }

    #[test]
    fn non_latin_scripts_and_digits_are_word_characters() {
        assert_eq!(
            extract_tags("记录 #工作/周报2 done"),
            set(&["工作", "周报2"])
        );
    }

    #[test]
    fn separator_needs_a_segment_on_both_sides() {
        // `#a//b` ends the token at `a`; `//b` is plain text, `b` never tags.
        assert_eq!(extract_tags("#a//b"), set(&["a"]));
        // A bare `#` or `#/x` has no leading segment and matches nothing
        // until a word run follows the `#`.
        assert_eq!(extract_tags("# /x"), set(&[]));
    }

    #[test]
    fn casing_is_preserved() {
        assert_eq!(extract_tags("#Work #work"), set(&["Work", "work"]));
    }

    #[test]
    fn tag_path_keeps_component_order() {
        assert_eq!(tag_path("#proj/a/b"), vec!["proj", "a", "b"]);
    }
}
