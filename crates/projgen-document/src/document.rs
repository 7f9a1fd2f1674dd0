//! Structured documents with comment annotations.

use projgen_common_core::{Error, Result};
use serde::Serialize;
use serde_yaml::Value;
use tracing::{debug, trace};

use crate::emit::emit;
use crate::indent::IndentStyle;
use crate::path::{walk, PathAddress};
use crate::tree::{Edit, Node, Tree};

/// A value tree plus an ordered log of comment and value edits.
///
/// Every edit is checked against the current tree when it is made. Dumping
/// replays the log over a fresh copy of the initial value.
#[derive(Debug, Clone)]
pub struct StructuredDocument {
    initial: Node,
    current: Tree,
    edits: Vec<Edit>,
    style: IndentStyle,
}

impl StructuredDocument {
    /// Create a document from a plain value.
    pub fn new(value: Value) -> Result<Self> {
        let initial = Node::from_value(&value)?;
        Ok(Self {
            current: Tree::new(initial.clone()),
            initial,
            edits: Vec::new(),
            style: IndentStyle::default(),
        })
    }

    /// Create a document from any serializable value.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let value = serde_yaml::to_value(value).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::new(value)
    }

    /// Parse YAML text. Comments in the text are not kept.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value =
            serde_yaml::from_str(text).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::new(value)
    }

    /// Use `style` for comment columns and dumping.
    pub fn with_style(mut self, style: IndentStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> IndentStyle {
        self.style
    }

    /// The edit log, oldest first.
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// The current value, without comments.
    pub fn value(&self) -> Value {
        self.current.root.to_value()
    }

    /// Value at `path` in the current tree.
    pub fn resolve(&self, path: &str) -> Result<Value> {
        let path = PathAddress::parse(path)?;
        let found = walk(&self.current.root, &path, path.steps())?;
        Ok(match (found.window, found.node) {
            (Some(window), Node::Sequence(items)) => Value::Sequence(
                items[window.start..window.start + window.len]
                    .iter()
                    .map(|slot| slot.node.to_value())
                    .collect(),
            ),
            (_, node) => node.to_value(),
        })
    }

    /// Comment placed at the very top of the output. Replaces any earlier header.
    pub fn set_header_comment(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.current.header = Some(text.clone());
        self.edits.push(Edit::HeaderComment { text });
    }

    /// Comment lines directly above the entry at `path`.
    ///
    /// The column comes from the document's indent style.
    pub fn set_comment_before_key(&mut self, path: &str, text: impl Into<String>) -> Result<()> {
        let path = PathAddress::parse(path)?;
        let indent = self.style.indent_of(&path);
        self.record(Edit::CommentBeforeKey {
            path,
            text: text.into(),
            indent,
        })
    }

    /// Comment at the end of the entry's line. Newlines become spaces.
    pub fn set_eol_comment(&mut self, path: &str, text: impl Into<String>) -> Result<()> {
        let path = PathAddress::parse(path)?;
        let text: String = text.into();
        let text = text.replace(['\r', '\n'], " ");
        self.record(Edit::EolComment { path, text })
    }

    /// Insert or replace the value at `path`.
    pub fn set_value<T: Serialize>(&mut self, path: &str, value: &T) -> Result<()> {
        let path = PathAddress::parse(path)?;
        let value = serde_yaml::to_value(value).map_err(|e| Error::Serialization(e.to_string()))?;
        let value = Node::from_value(&value)?;
        self.record(Edit::SetValue { path, value })
    }

    /// Remove the entry at `path`.
    pub fn remove_value(&mut self, path: &str) -> Result<()> {
        let path = PathAddress::parse(path)?;
        self.record(Edit::RemoveValue { path })
    }

    fn record(&mut self, edit: Edit) -> Result<()> {
        self.current.apply(&edit)?;
        trace!(?edit, "Recorded document edit");
        self.edits.push(edit);
        Ok(())
    }

    /// Serialize with the document's indent style.
    pub fn dump(&self) -> Result<String> {
        self.dump_with(self.style)
    }

    /// Serialize with an explicit indent style.
    pub fn dump_with(&self, style: IndentStyle) -> Result<String> {
        let mut tree = Tree::new(self.initial.clone());
        for edit in &self.edits {
            tree.apply(edit)?;
        }
        debug!(edits = self.edits.len(), "Dumping document");
        emit(&tree, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRIENDS: &str = "\
friends:
- name: murphy
- name: jo
enemies:
- a
- b
- c
";

    #[test]
    fn test_resolve_through_document() {
        let doc = StructuredDocument::parse(FRIENDS).unwrap();
        assert_eq!(doc.resolve("friends.[1].name").unwrap(), Value::from("jo"));
        assert_eq!(
            doc.resolve("enemies.[1:3]").unwrap(),
            serde_yaml::from_str::<Value>("[b, c]").unwrap()
        );
    }

    #[test]
    fn test_comment_indent_uses_style() {
        let mut doc = StructuredDocument::parse(FRIENDS)
            .unwrap()
            .with_style(IndentStyle::new(5, 3));
        doc.set_comment_before_key("enemies.[2]", "third").unwrap();

        match &doc.edits()[0] {
            Edit::CommentBeforeKey { indent, .. } => assert_eq!(*indent, 3),
            other => panic!("Expected CommentBeforeKey, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_edit_is_rejected_at_call_time() {
        let mut doc = StructuredDocument::parse(FRIENDS).unwrap();

        let err = doc.set_eol_comment("friends.[7].name", "x").unwrap_err();
        assert!(err.is_path_error());
        assert!(doc.edits().is_empty());

        let err = doc.set_comment_before_key("a..b", "x").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_header_replaces() {
        let mut doc = StructuredDocument::parse("a: 1\n").unwrap();
        doc.set_header_comment("one");
        doc.set_header_comment("two");
        assert_eq!(doc.dump().unwrap(), "# two\na: 1\n");
        assert_eq!(doc.edits().len(), 2);
    }

    #[test]
    fn test_eol_comment_newlines_flattened() {
        let mut doc = StructuredDocument::parse("a: 1\n").unwrap();
        doc.set_eol_comment("a", "line one\nline two").unwrap();
        assert_eq!(doc.dump().unwrap(), "a: 1 # line one line two\n");
    }

    #[test]
    fn test_edits_replay_in_order() {
        let mut doc = StructuredDocument::parse(FRIENDS).unwrap();
        doc.set_value("enemies", &vec!["z"]).unwrap();
        doc.set_eol_comment("enemies.[0]", "only one left").unwrap();
        doc.remove_value("friends").unwrap();

        // A comment on an index removed by an earlier edit is refused
        assert!(doc.set_eol_comment("enemies.[2]", "gone").is_err());

        assert_eq!(doc.dump().unwrap(), "enemies:\n- z # only one left\n");
        assert_eq!(
            doc.value(),
            serde_yaml::from_str::<Value>("enemies: [z]").unwrap()
        );
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct Package {
            name: String,
            requires: Vec<String>,
        }

        let doc = StructuredDocument::from_serialize(&Package {
            name: "pkg".into(),
            requires: vec!["a".into(), "b".into()],
        })
        .unwrap();

        assert_eq!(doc.dump().unwrap(), "name: pkg\nrequires:\n- a\n- b\n");
    }

    #[test]
    fn test_dump_with_other_style() {
        let doc = StructuredDocument::parse(FRIENDS).unwrap();
        let out = doc.dump_with(IndentStyle::new(4, 2)).unwrap();
        assert!(out.starts_with("friends:\n  - name: murphy\n"));
    }
}
