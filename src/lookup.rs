//! Key-path lookup over content trees.
//!
//! Used where the shape of the dictionary is not known at compile time.
//! An unresolvable path renders as the path itself so that missing
//! translations stay visible on the page.

use crate::content::{
    ContentTree,
    ContentValue,
};

/// Default key path separator.
pub const KEY_SEPARATOR: &str = ".";

/// Walks `path` through `tree`, returning whatever value sits at the end.
///
/// An empty `separator` treats the whole path as a single segment.
#[must_use]
pub fn try_lookup<'a>(tree: &'a ContentTree, path: &str, separator: &str) -> Option<&'a ContentValue> {
    if separator.is_empty() {
        return tree.get(path);
    }

    let mut segments = path.split(separator);
    let mut current = tree.get(segments.next()?)?;
    for segment in segments {
        let ContentValue::Node(node) = current else {
            return None;
        };
        current = node.get(segment)?;
    }
    Some(current)
}

/// Resolves a dotted path to a leaf string, or returns `path` unchanged.
///
/// # Examples
/// ```
/// use hubtrac_i18n::content::ContentTree;
/// use hubtrac_i18n::lookup::lookup;
///
/// let tree = ContentTree::from_json_str(r#"{ "hero": { "title": "Servis" } }"#).unwrap();
/// assert_eq!(lookup(&tree, "hero.title"), "Servis");
/// assert_eq!(lookup(&tree, "hero.subtitle"), "hero.subtitle");
/// ```
#[must_use]
pub fn lookup<'a>(tree: &'a ContentTree, path: &'a str) -> &'a str {
    lookup_with(tree, path, KEY_SEPARATOR)
}

/// [`lookup`] with a configured separator.
#[must_use]
pub fn lookup_with<'a>(tree: &'a ContentTree, path: &'a str, separator: &str) -> &'a str {
    try_lookup(tree, path, separator).and_then(ContentValue::as_leaf).unwrap_or(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::{
        fixture,
        rstest,
    };

    use super::*;

    #[fixture]
    fn tree() -> ContentTree {
        ContentTree::from_json_str(
            r#"{
                "hero": { "title": "Mobilný servis pneumatík", "cta": "Kontaktujte nás" },
                "services": {
                    "items": {
                        "mobile": { "title": "Mobilný servis" }
                    }
                },
                "terms": { "sections": { "services": { "items": ["Výmena", "Oprava"] } } },
                "a/b": "slash key"
            }"#,
        )
        .unwrap()
    }

    #[rstest]
    #[case::top_section_leaf("hero.title", "Mobilný servis pneumatík")]
    #[case::sibling_leaf("hero.cta", "Kontaktujte nás")]
    #[case::deep_leaf("services.items.mobile.title", "Mobilný servis")]
    fn lookup_resolves_leaf_strings(tree: ContentTree, #[case] path: &str, #[case] expected: &str) {
        assert_that!(lookup(&tree, path), eq(expected));
    }

    #[rstest]
    #[case::missing_leaf("hero.nonexistent")]
    #[case::missing_section("pricing.title")]
    #[case::path_through_leaf("hero.title.extra")]
    #[case::path_through_list("terms.sections.services.items.0")]
    #[case::node("services.items")]
    #[case::section("hero")]
    #[case::list("terms.sections.services.items")]
    #[case::empty("")]
    #[case::double_separator("hero..title")]
    #[case::trailing_separator("hero.title.")]
    fn lookup_returns_path_when_unresolved(tree: ContentTree, #[case] path: &str) {
        assert_that!(lookup(&tree, path), eq(path));
    }

    #[rstest]
    fn lookup_with_custom_separator(tree: ContentTree) {
        assert_that!(lookup_with(&tree, "hero/title", "/"), eq("Mobilný servis pneumatík"));
        assert_that!(lookup_with(&tree, "hero.title", "/"), eq("hero.title"));
    }

    #[rstest]
    fn lookup_with_empty_separator_uses_whole_path(tree: ContentTree) {
        assert_that!(lookup_with(&tree, "a/b", ""), eq("slash key"));
    }

    #[rstest]
    fn try_lookup_exposes_non_leaf_values(tree: ContentTree) {
        let items = try_lookup(&tree, "terms.sections.services.items", ".")
            .and_then(ContentValue::as_list)
            .unwrap()
            .to_vec();

        assert_that!(items, elements_are![eq("Výmena"), eq("Oprava")]);
        assert_that!(
            try_lookup(&tree, "services.items", ".").and_then(ContentValue::as_node),
            some(anything())
        );
        assert_that!(try_lookup(&tree, "services.missing", "."), none());
    }
}
