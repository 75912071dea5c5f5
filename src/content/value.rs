//! Content tree model.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde_json::{
    Map,
    Value,
};

use super::ContentError;

/// A single node of a content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValue {
    /// Translated text
    Leaf(String),
    /// Ordered paragraphs or bullet items
    List(Vec<String>),
    /// Nested section
    Node(ContentTree),
}

/// Shape of a [`ContentValue`], without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Leaf,
    List,
    Node,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Leaf => "string",
            Self::List => "list",
            Self::Node => "object",
        })
    }
}

impl ContentValue {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Leaf(_) => ValueKind::Leaf,
            Self::List(_) => ValueKind::List,
            Self::Node(_) => ValueKind::Node,
        }
    }

    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::List(_) | Self::Node(_) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Leaf(_) | Self::Node(_) => None,
        }
    }

    #[must_use]
    pub const fn as_node(&self) -> Option<&ContentTree> {
        match self {
            Self::Node(tree) => Some(tree),
            Self::Leaf(_) | Self::List(_) => None,
        }
    }
}

/// Nested translated content for one locale.
///
/// Built once from dictionary JSON and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTree {
    /// Section or entry name to value
    entries: BTreeMap<String, ContentValue>,
}

impl ContentTree {
    /// Parses dictionary JSON text.
    ///
    /// # Examples
    /// ```
    /// use hubtrac_i18n::content::ContentTree;
    ///
    /// let tree = ContentTree::from_json_str(r#"{ "hero": { "title": "Ahoj" } }"#).unwrap();
    /// let hero = tree.get("hero").and_then(|value| value.as_node()).unwrap();
    /// assert_eq!(hero.get("title").and_then(|value| value.as_leaf()), Some("Ahoj"));
    /// ```
    ///
    /// # Errors
    /// Returns error if the text is not JSON, the root is not an object,
    /// or a value is a number, boolean, null, or a list holding non-strings.
    pub fn from_json_str(text: &str) -> Result<Self, ContentError> {
        let json: Value = serde_json::from_str(text)?;
        Self::from_json(&json)
    }

    /// Converts an already parsed JSON document.
    ///
    /// # Errors
    /// See [`ContentTree::from_json_str`].
    pub fn from_json(json: &Value) -> Result<Self, ContentError> {
        match json {
            Value::Object(map) => convert_object(map, None),
            other => Err(ContentError::RootNotObject(json_kind(other))),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContentValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ContentValue> {
        self.entries.iter()
    }

    /// Flattens the tree into separator-joined key paths.
    ///
    /// Every node is listed, not only leaves, so that `about` and `about.title`
    /// both appear. Lists are not descended into. Keys containing the separator
    /// cannot be reached by a path and are left out together with their
    /// children (see [`ContentTree::separator_keys`]).
    ///
    /// # Examples
    /// ```
    /// use hubtrac_i18n::content::{ContentTree, ValueKind};
    ///
    /// let tree = ContentTree::from_json_str(r#"{ "nav": { "home": "Domov" } }"#).unwrap();
    /// let flat = tree.flatten(".");
    /// assert_eq!(flat.get("nav").map(|value| value.kind()), Some(ValueKind::Node));
    /// assert_eq!(flat.get("nav.home").map(|value| value.kind()), Some(ValueKind::Leaf));
    /// ```
    #[must_use]
    pub fn flatten(&self, separator: &str) -> BTreeMap<String, &ContentValue> {
        let mut result = BTreeMap::new();
        flatten_tree(self, separator, None, &mut result);
        result
    }

    /// Keys that contain `separator`, as `(parent path, key)` pairs.
    ///
    /// Only the reachable part of the tree is searched. Top-level keys have no
    /// parent path.
    #[must_use]
    pub fn separator_keys<'a>(&'a self, separator: &str) -> Vec<(Option<String>, &'a str)> {
        let mut result = Vec::new();
        collect_separator_keys(self, separator, None, &mut result);
        result
    }
}

/// Whether `key` can appear as one segment of a `separator`-joined path.
pub(crate) fn is_addressable(key: &str, separator: &str) -> bool {
    separator.is_empty() || !key.contains(separator)
}

impl<'a> IntoIterator for &'a ContentTree {
    type Item = (&'a String, &'a ContentValue);
    type IntoIter = btree_map::Iter<'a, String, ContentValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn flatten_tree<'a>(
    tree: &'a ContentTree,
    separator: &str,
    prefix: Option<&str>,
    result: &mut BTreeMap<String, &'a ContentValue>,
) {
    for (key, value) in tree {
        if !is_addressable(key, separator) {
            continue;
        }
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
        if let ContentValue::Node(child) = value {
            flatten_tree(child, separator, Some(&full_key), result);
        }
        result.insert(full_key, value);
    }
}

fn collect_separator_keys<'a>(
    tree: &'a ContentTree,
    separator: &str,
    prefix: Option<&str>,
    result: &mut Vec<(Option<String>, &'a str)>,
) {
    for (key, value) in tree {
        if !is_addressable(key, separator) {
            result.push((prefix.map(str::to_string), key.as_str()));
            continue;
        }
        if let ContentValue::Node(child) = value {
            let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
            collect_separator_keys(child, separator, Some(&full_key), result);
        }
    }
}

/// Key paths in conversion errors always use `.`; they are for humans.
fn convert_object(map: &Map<String, Value>, prefix: Option<&str>) -> Result<ContentTree, ContentError> {
    let mut entries = BTreeMap::new();
    for (key, value) in map {
        let path = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
        let converted = match value {
            Value::String(text) => ContentValue::Leaf(text.clone()),
            Value::Array(items) => ContentValue::List(convert_list(items, &path)?),
            Value::Object(child) => ContentValue::Node(convert_object(child, Some(&path))?),
            other => {
                return Err(ContentError::UnsupportedValue { path, kind: json_kind(other) });
            }
        };
        entries.insert(key.clone(), converted);
    }
    Ok(ContentTree { entries })
}

fn convert_list(items: &[Value], path: &str) -> Result<Vec<String>, ContentError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(text) => Ok(text.clone()),
            other => Err(ContentError::UnsupportedValue {
                path: format!("{path}[{index}]"),
                kind: json_kind(other),
            }),
        })
        .collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
