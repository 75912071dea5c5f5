//! Core types used throughout the project.

use std::fmt;

/// A range in a dictionary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// A position in a dictionary file (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl From<tree_sitter::Point> for SourcePosition {
    #[allow(clippy::cast_possible_truncation)]
    fn from(point: tree_sitter::Point) -> Self {
        Self { line: point.row as u32, character: point.column as u32 }
    }
}

/// Rendered 1-indexed, the way editors and compilers print locations.
impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

impl SourceRange {
    #[must_use]
    pub fn from_node(node: &tree_sitter::Node<'_>) -> Self {
        Self { start: node.start_position().into(), end: node.end_position().into() }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::origin(0, 0, "1:1")]
    #[case::indented_key(4, 6, "5:7")]
    fn display_is_one_indexed(#[case] line: u32, #[case] character: u32, #[case] expected: &str) {
        let position = SourcePosition { line, character };

        assert_that!(position.to_string(), eq(expected));
    }

    #[rstest]
    fn from_point_copies_row_and_column() {
        let position = SourcePosition::from(tree_sitter::Point { row: 12, column: 3 });

        assert_that!(position, eq(SourcePosition { line: 12, character: 3 }));
    }

    #[rstest]
    fn positions_order_by_line_then_character() {
        let a = SourcePosition { line: 1, character: 9 };
        let b = SourcePosition { line: 2, character: 0 };

        assert_that!(a < b, eq(true));
    }
}
