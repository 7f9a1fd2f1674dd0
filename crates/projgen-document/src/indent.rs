//! Comment indentation for a path.

use serde::{Deserialize, Serialize};

use crate::path::PathAddress;

/// Indentation settings used when a document is dumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndentStyle {
    /// Spaces per nested mapping level.
    pub indent: usize,
    /// Spaces between a parent key's column and the `-` of its items.
    pub list_indent: usize,
}

impl IndentStyle {
    pub fn new(indent: usize, list_indent: usize) -> Self {
        Self {
            indent,
            list_indent,
        }
    }

    /// Column a comment placed before `path` starts at.
    pub fn indent_of(&self, path: &PathAddress) -> usize {
        indent_of(path, self.indent, self.list_indent)
    }
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self::new(2, 0)
    }
}

/// Column for a comment placed before `path`.
///
/// Every index or slice step adds `list_indent`. Every key step after the
/// first adds `indent`.
pub fn indent_of(path: &PathAddress, indent: usize, list_indent: usize) -> usize {
    let (lists, keys) = path
        .steps()
        .iter()
        .fold((0usize, 0usize), |(lists, keys), step| {
            if step.is_list_step() {
                (lists + 1, keys)
            } else {
                (lists, keys + 1)
            }
        });

    lists * list_indent + keys.saturating_sub(1) * indent
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("enemies.[2]", 5, 3 => 3 ; "one key one index")]
    #[test_case("repos.[0]", 4, 0 => 0 ; "list item with zero list indent")]
    #[test_case("a", 2, 0 => 0 ; "top level key")]
    #[test_case("a.b.c", 2, 0 => 4 ; "nested keys")]
    #[test_case("a.[0].b.[1:2].[0]", 4, 2 => 10 ; "mixed steps")]
    #[test_case("[0]", 4, 2 => 2 ; "root sequence")]
    #[test_case("repos.[0].hooks.[1]", 2, 2 => 6 ; "two keys two indices")]
    fn test_indent_of(path: &str, indent: usize, list_indent: usize) -> usize {
        indent_of(&PathAddress::parse(path).unwrap(), indent, list_indent)
    }

    #[test]
    fn test_style_uses_its_widths() {
        let style = IndentStyle::new(5, 3);
        let path = PathAddress::parse("enemies.[2]").unwrap();
        assert_eq!(style.indent_of(&path), 3);
        assert_eq!(IndentStyle::default(), IndentStyle::new(2, 0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn mapping_only_paths(
                keys in prop::collection::vec("[a-z]{1,5}", 1..6),
                indent in 0usize..8,
                list_indent in 0usize..8,
            ) {
                let path = PathAddress::parse(&keys.join(".")).unwrap();
                prop_assert_eq!(indent_of(&path, indent, list_indent), (keys.len() - 1) * indent);
            }

            #[test]
            fn index_only_paths(
                indices in prop::collection::vec(0usize..20, 1..6),
                indent in 0usize..8,
                list_indent in 0usize..8,
            ) {
                let text = indices
                    .iter()
                    .map(|i| format!("[{i}]"))
                    .collect::<Vec<_>>()
                    .join(".");
                let path = PathAddress::parse(&text).unwrap();
                prop_assert_eq!(indent_of(&path, indent, list_indent), indices.len() * list_indent);
            }
        }
    }
}
