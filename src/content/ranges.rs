//! Key locations inside dictionary JSON text.

use std::collections::HashMap;

use super::value::is_addressable;
use crate::types::SourceRange;

/// Maps every key path of a dictionary file to the range of its key token.
///
/// Used to point schema diagnostics at a line; a parse failure yields an
/// empty map rather than an error because the tree itself was already
/// validated by `serde_json`.
#[must_use]
pub fn extract_key_ranges(json_text: &str, separator: &str) -> HashMap<String, SourceRange> {
    let mut key_ranges = HashMap::new();

    let mut parser = tree_sitter::Parser::new();
    let Ok(()) = parser.set_language(&tree_sitter_json::LANGUAGE.into()) else {
        tracing::warn!("Failed to set tree-sitter-json language");
        return key_ranges;
    };

    let Some(tree) = parser.parse(json_text, None) else {
        tracing::warn!("Failed to parse dictionary JSON with tree-sitter");
        return key_ranges;
    };

    collect_object_keys(tree.root_node(), json_text.as_bytes(), separator, None, &mut key_ranges);

    key_ranges
}

fn collect_object_keys(
    node: tree_sitter::Node<'_>,
    source: &[u8],
    separator: &str,
    prefix: Option<&str>,
    key_ranges: &mut HashMap<String, SourceRange>,
) {
    match node.kind() {
        "document" | "object" => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                collect_object_keys(child, source, separator, prefix, key_ranges);
            }
        }
        "pair" => collect_pair(node, source, separator, prefix, key_ranges),
        _ => {}
    }
}

fn collect_pair(
    node: tree_sitter::Node<'_>,
    source: &[u8],
    separator: &str,
    prefix: Option<&str>,
    key_ranges: &mut HashMap<String, SourceRange>,
) {
    let Some(key_node) = node.child_by_field_name("key") else {
        return;
    };
    let Ok(key_text) = key_node.utf8_text(source) else {
        tracing::warn!("Failed to get key text from node");
        return;
    };
    // The token keeps its quotes and escapes; decode it like serde_json does.
    let Ok(key) = serde_json::from_str::<String>(key_text) else {
        tracing::warn!(key_text, "Failed to decode key token");
        return;
    };
    if !is_addressable(&key, separator) {
        return;
    }
    let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));

    key_ranges.insert(full_key.clone(), SourceRange::from_node(&key_node));

    // Lists are opaque in the content model, so only objects are descended into.
    if let Some(value_node) = node.child_by_field_name("value")
        && value_node.kind() == "object"
    {
        collect_object_keys(value_node, source, separator, Some(&full_key), key_ranges);
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn extract_key_ranges_top_level() {
        let json_text = r#"{
  "nav": "Menu",
  "hero": "Hero"
}"#;

        let key_ranges = extract_key_ranges(json_text, ".");

        expect_that!(key_ranges.len(), eq(2));
        let nav = key_ranges.get("nav");
        expect_that!(nav, some(anything()));
        if let Some(range) = nav {
            expect_that!(range.start.line, eq(1));
            expect_that!(range.start.character, eq(2));
        }
    }

    #[googletest::test]
    fn extract_key_ranges_nested_objects() {
        let json_text = r#"{
  "contact": {
    "form": {
      "name": "Meno"
    }
  }
}"#;

        let key_ranges = extract_key_ranges(json_text, ".");

        expect_that!(key_ranges.contains_key("contact"), eq(true));
        expect_that!(key_ranges.contains_key("contact.form"), eq(true));
        let name = key_ranges.get("contact.form.name");
        expect_that!(name, some(anything()));
        if let Some(range) = name {
            expect_that!(range.start.line, eq(3));
            expect_that!(range.start.character, eq(6));
        }
    }

    #[googletest::test]
    fn extract_key_ranges_does_not_index_lists() {
        let json_text = r#"{
  "terms": { "items": ["a", "b"] }
}"#;

        let key_ranges = extract_key_ranges(json_text, ".");

        expect_that!(key_ranges.contains_key("terms.items"), eq(true));
        expect_that!(key_ranges.len(), eq(2));
    }

    #[googletest::test]
    fn extract_key_ranges_custom_separator() {
        let json_text = r#"{ "a": { "b": "c" } }"#;

        let key_ranges = extract_key_ranges(json_text, "/");

        expect_that!(key_ranges.contains_key("a/b"), eq(true));
    }

    #[googletest::test]
    fn extract_key_ranges_decodes_escaped_keys() {
        let json_text = r#"{
  "about": {
    "\u010dlenstvo": "x",
    "say \"hi\"": "y"
  }
}"#;

        let key_ranges = extract_key_ranges(json_text, ".");

        let membership = key_ranges.get("about.členstvo");
        expect_that!(membership, some(anything()));
        if let Some(range) = membership {
            expect_that!(range.start.line, eq(2));
            expect_that!(range.start.character, eq(4));
        }
        expect_that!(key_ranges.contains_key("about.say \"hi\""), eq(true));
    }

    #[googletest::test]
    fn extract_key_ranges_skips_keys_containing_separator() {
        let json_text = r#"{
  "hero": { "title": "A" },
  "hero.title": "B"
}"#;

        let key_ranges = extract_key_ranges(json_text, ".");

        let title = key_ranges.get("hero.title");
        expect_that!(title, some(anything()));
        if let Some(range) = title {
            expect_that!(range.start.line, eq(1));
        }
        expect_that!(key_ranges.len(), eq(2));
    }

    #[googletest::test]
    fn extract_key_ranges_tolerates_broken_json() {
        let key_ranges = extract_key_ranges("{ \"a\": ", ".");

        expect_that!(key_ranges.len(), le(1));
    }
}
