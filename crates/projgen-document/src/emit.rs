//! Block-style YAML output for annotated trees.

use projgen_common_core::{Error, Result};
use serde_yaml::Value;

use crate::indent::IndentStyle;
use crate::tree::{BeforeComment, Node, Slot, Tree};

/// Render a tree as YAML text.
pub fn emit(tree: &Tree, style: IndentStyle) -> Result<String> {
    let mut emitter = Emitter {
        out: String::new(),
        style,
    };

    if let Some(header) = &tree.header {
        emitter.comment_lines(0, header);
    }

    match &tree.root {
        Node::Mapping(entries) if !entries.is_empty() => emitter.mapping(entries, 0, None)?,
        Node::Sequence(items) if !items.is_empty() => {
            emitter.sequence(items, style.list_indent, None)?
        }
        node => {
            let line = inline(node)?;
            emitter.line(line);
        }
    }

    Ok(emitter.out)
}

struct Emitter {
    out: String,
    style: IndentStyle,
}

impl Emitter {
    fn line(&mut self, line: String) {
        self.out.push_str(&line);
        self.out.push('\n');
    }

    fn comment_lines(&mut self, indent: usize, text: &str) {
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.line(format!("{}#", spaces(indent)));
            } else {
                self.line(format!("{}# {line}", spaces(indent)));
            }
        }
    }

    fn before(&mut self, before: &Option<BeforeComment>) {
        if let Some(comment) = before {
            self.comment_lines(comment.indent, &comment.text);
        }
    }

    /// Emit mapping entries at `col`. The first entry's line starts with
    /// `first_prefix` when the mapping continues a `- ` line.
    fn mapping(
        &mut self,
        entries: &[(String, Slot)],
        col: usize,
        mut first_prefix: Option<String>,
    ) -> Result<()> {
        for (key, slot) in entries {
            self.before(&slot.comments.before);
            let lead = first_prefix.take().unwrap_or_else(|| spaces(col));
            let head = format!("{lead}{}:", scalar(&Value::from(key.as_str()))?);
            self.value(head, slot, col + self.style.indent, col + self.style.list_indent)?;
        }
        Ok(())
    }

    /// Emit sequence items with their `-` at `dash_col`.
    fn sequence(
        &mut self,
        items: &[Slot],
        dash_col: usize,
        mut first_prefix: Option<String>,
    ) -> Result<()> {
        for slot in items {
            self.before(&slot.comments.before);
            let lead = first_prefix.take().unwrap_or_else(|| spaces(dash_col));
            let head = format!("{lead}-");
            let content_col = dash_col + 2;

            let inline_block = slot.comments.eol.is_none() && !slot.node.is_empty_container();
            match &slot.node {
                Node::Mapping(entries) if inline_block => {
                    self.mapping(entries, content_col, Some(format!("{head} ")))?
                }
                Node::Sequence(children) if inline_block => {
                    self.sequence(children, content_col, Some(format!("{head} ")))?
                }
                _ => self.value(head, slot, content_col, content_col)?,
            }
        }
        Ok(())
    }

    /// Finish a `key:` or `-` head line with the slot's value.
    ///
    /// Nested mappings start at `mapping_col`, nested sequences put their
    /// dashes at `sequence_col`.
    fn value(
        &mut self,
        head: String,
        slot: &Slot,
        mapping_col: usize,
        sequence_col: usize,
    ) -> Result<()> {
        let eol = slot
            .comments
            .eol
            .as_ref()
            .map(|text| format!(" # {text}"))
            .unwrap_or_default();

        match &slot.node {
            Node::Mapping(entries) if !entries.is_empty() => {
                self.line(format!("{head}{eol}"));
                self.mapping(entries, mapping_col, None)
            }
            Node::Sequence(items) if !items.is_empty() => {
                self.line(format!("{head}{eol}"));
                self.sequence(items, sequence_col, None)
            }
            node => {
                self.line(format!("{head} {}{eol}", inline(node)?));
                Ok(())
            }
        }
    }
}

fn spaces(n: usize) -> String {
    " ".repeat(n)
}

/// A scalar or empty container on one line.
fn inline(node: &Node) -> Result<String> {
    match node {
        Node::Scalar(value) => scalar(value),
        Node::Mapping(_) => Ok("{}".to_string()),
        Node::Sequence(_) => Ok("[]".to_string()),
    }
}

/// Render a scalar on a single line.
fn scalar(value: &Value) -> Result<String> {
    let rendered = serde_yaml::to_string(value)
        .map_err(|e| Error::Serialization(e.to_string()))?;
    let rendered = rendered.trim_end_matches('\n');

    if rendered.contains('\n') {
        // Multi-line strings go out as double-quoted JSON.
        let text = value.as_str().unwrap_or(rendered);
        return serde_json::to_string(text).map_err(|e| Error::Serialization(e.to_string()));
    }

    Ok(rendered.to_string())
}
