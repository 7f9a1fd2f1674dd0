//! Comment-annotated value tree.
//!
//! The tree mirrors a [`serde_yaml::Value`] but keeps a comment slot on
//! every mapping entry and sequence item. Edits are applied to it in
//! order; the emitter then walks it to produce text.

use projgen_common_core::{Error, Result};
use serde_yaml::Value;

use crate::path::{locate_entry, Location, Navigable, NodeKind, PathAddress, Target};

/// A comment line block placed above an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeforeComment {
    pub text: String,
    pub indent: usize,
}

/// Comments attached to one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    pub before: Option<BeforeComment>,
    pub eol: Option<String>,
}

/// An entry's value plus its comments.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub node: Node,
    pub comments: Comments,
}

impl Slot {
    pub fn new(node: Node) -> Self {
        Self {
            node,
            comments: Comments::default(),
        }
    }
}

/// A value in the annotated tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Null, bool, number or string.
    Scalar(Value),
    /// Entries in insertion order.
    Mapping(Vec<(String, Slot)>),
    Sequence(Vec<Slot>),
}

impl Node {
    /// Build a tree from a plain value.
    ///
    /// Mapping keys must be strings and tagged values are rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Mapping(map) => map
                .iter()
                .map(|(key, value)| {
                    let key = key.as_str().ok_or_else(|| {
                        Error::UnsupportedValue(format!("non-string mapping key {key:?}"))
                    })?;
                    Ok((key.to_string(), Slot::new(Self::from_value(value)?)))
                })
                .collect::<Result<_>>()
                .map(Self::Mapping),
            Value::Sequence(seq) => seq
                .iter()
                .map(|item| Self::from_value(item).map(Slot::new))
                .collect::<Result<_>>()
                .map(Self::Sequence),
            Value::Tagged(tagged) => Err(Error::UnsupportedValue(format!(
                "tagged value {}",
                tagged.tag
            ))),
            scalar => Ok(Self::Scalar(scalar.clone())),
        }
    }

    /// The plain value, without comments.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Mapping(entries) => Value::Mapping(
                entries
                    .iter()
                    .map(|(key, slot)| (Value::from(key.as_str()), slot.node.to_value()))
                    .collect(),
            ),
            Self::Sequence(items) => {
                Value::Sequence(items.iter().map(|slot| slot.node.to_value()).collect())
            }
        }
    }

    /// Whether this is an empty mapping or sequence.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Self::Mapping(entries) => entries.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Scalar(_) => false,
        }
    }

    fn slot_mut(&mut self, location: &Location) -> Option<&mut Slot> {
        match (self, location) {
            (Self::Mapping(entries), Location::Key(key)) => entries
                .iter_mut()
                .find(|(k, _)| k == key)
                .map(|(_, slot)| slot),
            (Self::Sequence(items), Location::Index(idx)) => items.get_mut(*idx),
            _ => None,
        }
    }

    fn descend_mut(&mut self, trail: &[Location]) -> Option<&mut Node> {
        trail.iter().try_fold(self, |node, location| {
            node.slot_mut(location).map(|slot| &mut slot.node)
        })
    }
}

impl Navigable for Node {
    fn kind(&self) -> NodeKind {
        match self {
            Self::Mapping(_) => NodeKind::Mapping,
            Self::Sequence(_) => NodeKind::Sequence,
            Self::Scalar(_) => NodeKind::Scalar,
        }
    }

    fn get_key(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, slot)| &slot.node),
            _ => None,
        }
    }

    fn sequence_len(&self) -> Option<usize> {
        match self {
            Self::Sequence(items) => Some(items.len()),
            _ => None,
        }
    }

    fn get_index(&self, index: usize) -> Option<&Self> {
        match self {
            Self::Sequence(items) => items.get(index).map(|slot| &slot.node),
            _ => None,
        }
    }
}

/// One recorded change to a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Replace the header comment.
    HeaderComment { text: String },
    /// Comment lines above the entry at `path`.
    CommentBeforeKey {
        path: PathAddress,
        text: String,
        indent: usize,
    },
    /// Comment at the end of the entry's first line.
    EolComment { path: PathAddress, text: String },
    /// Insert or replace the value at `path`.
    SetValue { path: PathAddress, value: Node },
    /// Remove the entry at `path`.
    RemoveValue { path: PathAddress },
}

/// A root node plus the document header.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub header: Option<String>,
    pub root: Node,
}

impl Tree {
    pub fn new(root: Node) -> Self {
        Self { header: None, root }
    }

    /// Apply one edit.
    ///
    /// Paths are resolved before anything changes, so a failed edit leaves
    /// the tree untouched.
    pub fn apply(&mut self, edit: &Edit) -> Result<()> {
        match edit {
            Edit::HeaderComment { text } => {
                self.header = Some(text.clone());
            }
            Edit::CommentBeforeKey { path, text, indent } => {
                let slot = self.existing_slot(path)?;
                slot.comments.before = Some(BeforeComment {
                    text: text.clone(),
                    indent: *indent,
                });
            }
            Edit::EolComment { path, text } => {
                let slot = self.existing_slot(path)?;
                slot.comments.eol = Some(text.clone());
            }
            Edit::SetValue { path, value } => {
                let target = locate_entry(&self.root, path, false)?;
                let container = self.container_mut(path, &target)?;
                match (container, target.entry) {
                    (Node::Mapping(entries), Location::Key(key)) => {
                        match entries.iter_mut().find(|(k, _)| *k == key) {
                            Some((_, slot)) => slot.node = value.clone(),
                            None => entries.push((key, Slot::new(value.clone()))),
                        }
                    }
                    (Node::Sequence(items), Location::Index(idx)) => {
                        if let Some(slot) = items.get_mut(idx) {
                            slot.node = value.clone();
                        }
                    }
                    _ => return Err(Self::shape_error(path)),
                }
            }
            Edit::RemoveValue { path } => {
                let target = locate_entry(&self.root, path, true)?;
                let container = self.container_mut(path, &target)?;
                match (container, target.entry) {
                    (Node::Mapping(entries), Location::Key(key)) => {
                        entries.retain(|(k, _)| *k != key);
                    }
                    (Node::Sequence(items), Location::Index(idx)) => {
                        items.remove(idx);
                    }
                    _ => return Err(Self::shape_error(path)),
                }
            }
        }

        Ok(())
    }

    fn existing_slot(&mut self, path: &PathAddress) -> Result<&mut Slot> {
        let target = locate_entry(&self.root, path, true)?;
        self.container_mut(path, &target)?
            .slot_mut(&target.entry)
            .ok_or_else(|| Self::shape_error(path))
    }

    fn container_mut(&mut self, path: &PathAddress, target: &Target) -> Result<&mut Node> {
        self.root
            .descend_mut(&target.container)
            .ok_or_else(|| Self::shape_error(path))
    }

    fn shape_error(path: &PathAddress) -> Error {
        Error::resolution(
            path.as_str(),
            path.last_step().to_string(),
            "entry does not match its container",
        )
    }
}
