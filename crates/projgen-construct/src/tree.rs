//! Arena-backed construct tree.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`].
//! Parents own their children by index; the parent and root links are
//! plain indices, so there are no ownership cycles. Node `0` is the root.

use std::fmt;
use std::marker::PhantomData;

use projgen_common_core::{ensure, Error, OptionExt, Result};

/// Handle to a node in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The tree root.
    pub const ROOT: NodeId = NodeId(0);

    /// Position in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a new node attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Directly under the project root.
    Root,
    /// Under another construct.
    Parent(NodeId),
}

impl From<NodeId> for Scope {
    fn from(node: NodeId) -> Self {
        if node == NodeId::ROOT {
            Self::Root
        } else {
            Self::Parent(node)
        }
    }
}

/// Typed handle to a construct added to a project.
pub struct ConstructHandle<T> {
    node: NodeId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ConstructHandle<T> {
    pub(crate) fn new(node: NodeId) -> Self {
        Self {
            node,
            _marker: PhantomData,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl<T> Clone for ConstructHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ConstructHandle<T> {}

impl<T> fmt::Debug for ConstructHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConstructHandle").field(&self.node).finish()
    }
}

impl<T> PartialEq for ConstructHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T> Eq for ConstructHandle<T> {}

impl<T> From<ConstructHandle<T>> for Scope {
    fn from(handle: ConstructHandle<T>) -> Self {
        Scope::from(handle.node)
    }
}

impl<T> From<&ConstructHandle<T>> for Scope {
    fn from(handle: &ConstructHandle<T>) -> Self {
        Scope::from(handle.node)
    }
}

/// One entry in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    parent: Option<NodeId>,
    root: NodeId,
    children: Vec<NodeId>,
}

impl Node {
    /// Id, unique among siblings.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Children in attachment order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A rooted tree of construct nodes.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only its root.
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node {
                id: root_id.into(),
                parent: None,
                root: NodeId::ROOT,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or_unknown(id.to_string())
    }

    /// Create a node under `scope` and append it to the parent's children.
    ///
    /// The new node's root is copied from its parent and never changes.
    pub fn add_child(&mut self, scope: Scope, id: &str) -> Result<NodeId> {
        let parent = match scope {
            Scope::Root => NodeId::ROOT,
            Scope::Parent(parent) => parent,
        };
        let parent_node = self.node(parent)?;

        ensure!(
            !id.is_empty() && !id.contains('/'),
            Error::new(format!("invalid construct id '{id}': must be non-empty without '/'"))
        );
        ensure!(
            !parent_node
                .children
                .iter()
                .any(|child| self.nodes[child.0].id == id),
            Error::DuplicateId {
                parent: self.path(parent),
                id: id.to_string(),
            }
        );

        let root = parent_node.root;
        let node = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id: id.to_string(),
            parent: Some(parent),
            root,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(node);

        Ok(node)
    }

    /// `/`-joined ids from the root, e.g. `/project/pkg/setup.cfg`.
    pub fn path(&self, id: NodeId) -> String {
        let mut ids: Vec<&str> = self.ancestors(id).map(|node| node.id.as_str()).collect();
        ids.reverse();
        format!("/{}", ids.join("/"))
    }

    /// The node and its ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(self.nodes.get(id.0), |node| {
            node.parent.and_then(|parent| self.nodes.get(parent.0))
        })
    }

    /// Node whose [`Tree::path`] equals `path`. A trailing `/` is ignored.
    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        let mut segments = path.trim_matches('/').split('/');
        if segments.next() != Some(self.nodes[0].id.as_str()) {
            return None;
        }

        segments.try_fold(NodeId::ROOT, |current, segment| {
            self.nodes[current.0]
                .children
                .iter()
                .copied()
                .find(|child| self.nodes[child.0].id == segment)
        })
    }

    /// Every node below `id` in depth-first pre-order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .nodes
            .get(id.0)
            .map(|node| node.children.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }

        out
    }

    /// Iterate all node ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }
}
