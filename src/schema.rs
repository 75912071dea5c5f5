//! Cross-locale schema consistency check.
//!
//! Every dictionary is expected to mirror the default locale's key schema.
//! Nothing at runtime enforces this, so the check is run ahead of time
//! (`hubtrac-i18n check`) and reports every divergence with its location.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::fmt;

use crate::config::{
    SchemaCheckConfig,
    Severity,
};
use crate::content::{
    ContentValue,
    ValueKind,
    extract_key_ranges,
};
use crate::dictionary::{
    Dictionaries,
    LocaleDictionary,
};
use crate::locale::Locale;
use crate::types::SourceRange;

/// What is wrong with a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Present in the default locale, absent here
    Missing,
    /// Absent from the default locale
    Extra,
    /// Present in both with a different shape
    ShapeMismatch { expected: ValueKind, found: ValueKind },
    /// A string that is empty or whitespace only
    EmptyValue,
    /// A key containing the key separator, which no key path can reach
    UnreachableKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    pub locale: Locale,
    pub path: String,
    pub kind: IssueKind,
    /// Dictionary file the range refers to
    pub origin: String,
    pub range: Option<SourceRange>,
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range {
            Some(range) => write!(f, "{}:{}: ", self.origin, range.start)?,
            None => write!(f, "{}: ", self.origin)?,
        }
        write!(f, "[{}] ", self.locale)?;
        match &self.kind {
            IssueKind::Missing => write!(
                f,
                "key '{}' is missing (defined in the '{}' dictionary)",
                self.path,
                Locale::DEFAULT
            ),
            IssueKind::Extra => write!(
                f,
                "key '{}' does not exist in the '{}' dictionary",
                self.path,
                Locale::DEFAULT
            ),
            IssueKind::ShapeMismatch { expected, found } => {
                write!(f, "key '{}' is a {found}, expected a {expected}", self.path)
            }
            IssueKind::EmptyValue => write!(f, "key '{}' has an empty translation", self.path),
            IssueKind::UnreachableKey => {
                write!(f, "key '{}' contains the key separator and cannot be looked up", self.path)
            }
        }
    }
}

/// Result of [`check_schema`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    issues: Vec<SchemaIssue>,
}

impl SchemaReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn issues(&self) -> &[SchemaIssue] {
        &self.issues
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether the check succeeds when issues are treated as `severity`.
    #[must_use]
    pub fn passes(&self, severity: Severity) -> bool {
        match severity {
            Severity::Error => self.is_clean(),
            Severity::Warning => true,
        }
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// A dictionary flattened to key paths, with key locations in its source.
struct FlatDictionary<'a> {
    dictionary: &'a LocaleDictionary,
    paths: BTreeMap<String, &'a ContentValue>,
    ranges: HashMap<String, SourceRange>,
}

impl<'a> FlatDictionary<'a> {
    fn new(dictionary: &'a LocaleDictionary, separator: &str) -> Self {
        Self {
            dictionary,
            paths: dictionary.tree().flatten(separator),
            ranges: extract_key_ranges(dictionary.source(), separator),
        }
    }

    fn issue(&self, locale: Locale, path: &str, kind: IssueKind) -> SchemaIssue {
        SchemaIssue {
            locale,
            path: path.to_string(),
            kind,
            origin: self.dictionary.origin().to_string(),
            range: self.ranges.get(path).copied(),
        }
    }

    /// Keys that contain the separator, located at their parent key.
    fn unreachable_keys(&self, separator: &str) -> Vec<SchemaIssue> {
        let locale = self.dictionary.locale();
        self.dictionary
            .tree()
            .separator_keys(separator)
            .into_iter()
            .map(|(parent, key)| {
                let range = parent.as_ref().and_then(|parent| self.ranges.get(parent)).copied();
                let path = parent.map_or_else(|| key.to_string(), |p| format!("{p}{separator}{key}"));
                SchemaIssue {
                    locale,
                    path,
                    kind: IssueKind::UnreachableKey,
                    origin: self.dictionary.origin().to_string(),
                    range,
                }
            })
            .collect()
    }
}

/// Compares every dictionary against the default locale's.
///
/// Descendants of a missing, extra or mismatched key are not reported again.
/// Keys containing the separator are reported in every locale, since lookups
/// can never reach them.
#[must_use]
pub fn check_schema(dictionaries: &Dictionaries, config: &SchemaCheckConfig) -> SchemaReport {
    let separator = dictionaries.key_separator();
    let reference = FlatDictionary::new(dictionaries.dictionary(Locale::DEFAULT), separator);
    let mut issues = reference.unreachable_keys(separator);

    if config.report_empty_values {
        issues.extend(empty_values(&reference));
    }

    for dictionary in dictionaries.iter().filter(|d| d.locale() != Locale::DEFAULT) {
        let other = FlatDictionary::new(dictionary, separator);
        issues.extend(compare(&reference, &other, separator));
        issues.extend(other.unreachable_keys(separator));
        if config.report_empty_values {
            issues.extend(empty_values(&other));
        }
    }

    tracing::debug!(issues = issues.len(), "Schema check finished");
    SchemaReport { issues }
}

fn compare(
    reference: &FlatDictionary<'_>,
    other: &FlatDictionary<'_>,
    separator: &str,
) -> Vec<SchemaIssue> {
    let locale = other.dictionary.locale();
    let mut issues = Vec::new();
    let mut reported: Vec<&str> = Vec::new();

    for (path, expected) in &reference.paths {
        if is_under_any(path, &reported, separator) {
            continue;
        }
        match other.paths.get(path) {
            None => {
                issues.push(reference.issue(locale, path, IssueKind::Missing));
                reported.push(path);
            }
            Some(found) if found.kind() != expected.kind() => {
                issues.push(other.issue(
                    locale,
                    path,
                    IssueKind::ShapeMismatch { expected: expected.kind(), found: found.kind() },
                ));
                reported.push(path);
            }
            Some(_) => {}
        }
    }

    for path in other.paths.keys() {
        if reference.paths.contains_key(path) || is_under_any(path, &reported, separator) {
            continue;
        }
        issues.push(other.issue(locale, path, IssueKind::Extra));
        reported.push(path);
    }

    issues
}

fn empty_values(flat: &FlatDictionary<'_>) -> Vec<SchemaIssue> {
    let locale = flat.dictionary.locale();
    flat.paths
        .iter()
        .filter(|(_, value)| match value {
            ContentValue::Leaf(text) => text.trim().is_empty(),
            ContentValue::List(items) => items.iter().any(|item| item.trim().is_empty()),
            ContentValue::Node(_) => false,
        })
        .map(|(path, _)| flat.issue(locale, path, IssueKind::EmptyValue))
        .collect()
}

fn is_under_any(path: &str, parents: &[&str], separator: &str) -> bool {
    parents.iter().any(|parent| is_child_key(path, parent, separator))
}

/// Checks if `child_key` lies below `parent_key`.
fn is_child_key(child_key: &str, parent_key: &str, separator: &str) -> bool {
    child_key.strip_prefix(parent_key).is_some_and(|remainder| {
        remainder.len() > separator.len() && remainder.starts_with(separator)
    })
}
