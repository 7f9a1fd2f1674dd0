//! Dot/bracket path addresses into nested values.
//!
//! A path is `segment ("." segment)*`. A bare segment is a mapping key,
//! `[i]` is a sequence index (negative counts from the end) and `[lo:hi]`
//! is a half-open sequence slice.
//!
//! ```
//! use projgen_document::path::{resolve, PathAddress};
//!
//! let doc: serde_yaml::Value =
//!     serde_yaml::from_str("friends:\n- name: murphy\n- name: jo\n").unwrap();
//! let path = PathAddress::parse("friends.[1].name").unwrap();
//! assert_eq!(resolve(&path, &doc).unwrap().as_str(), Some("jo"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use projgen_common_core::{Error, Result};
use serde_yaml::Value;

/// One parsed unit of a path string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Mapping lookup.
    Key(String),
    /// Sequence index, negative from the end.
    Index(i64),
    /// Half-open sequence slice `[lo, hi)`.
    Slice(i64, i64),
}

impl PathStep {
    /// Whether this step addresses a sequence.
    pub fn is_list_step(&self) -> bool {
        matches!(self, Self::Index(_) | Self::Slice(..))
    }

    fn parse(path: &str, segment: &str) -> Result<Self> {
        if segment.is_empty() {
            return Err(Error::invalid_path(path, "empty segment"));
        }

        let Some(inner) = segment
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        else {
            return Ok(Self::Key(segment.to_string()));
        };

        let parse_int = |text: &str| {
            text.trim().parse::<i64>().map_err(|_| {
                Error::invalid_path(path, format!("'{segment}' is not an integer index or slice"))
            })
        };

        if inner.matches(':').count() == 1 {
            let (lo, hi) = inner.split_once(':').unwrap_or_default();
            if lo.trim().is_empty() || hi.trim().is_empty() {
                return Err(Error::invalid_path(
                    path,
                    format!("slice '{segment}' needs both bounds"),
                ));
            }
            return Ok(Self::Slice(parse_int(lo)?, parse_int(hi)?));
        }

        Ok(Self::Index(parse_int(inner)?))
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(i) => write!(f, "[{i}]"),
            Self::Slice(lo, hi) => write!(f, "[{lo}:{hi}]"),
        }
    }
}

/// The key a path's final step names inside its container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FinalKey {
    Name(String),
    Index(i64),
}

impl FinalKey {
    /// Look this key up in a container value.
    pub fn lookup<'a>(&self, container: &'a Value) -> Option<&'a Value> {
        match (self, container) {
            (Self::Name(key), Value::Mapping(map)) => map.get(key.as_str()),
            (Self::Index(i), Value::Sequence(seq)) => {
                normalize_index(*i, seq.len()).and_then(|idx| seq.get(idx))
            }
            _ => None,
        }
    }
}

/// A parsed path string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathAddress {
    raw: String,
    steps: Vec<PathStep>,
}

impl PathAddress {
    /// Parse a path string.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::invalid_path(path, "path is empty"));
        }

        let steps = path
            .split('.')
            .map(|segment| PathStep::parse(path, segment))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw: path.to_string(),
            steps,
        })
    }

    /// The original path string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All steps, in order.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Every step except the last.
    pub fn parent_steps(&self) -> &[PathStep] {
        &self.steps[..self.steps.len() - 1]
    }

    /// The last step.
    pub fn last_step(&self) -> &PathStep {
        &self.steps[self.steps.len() - 1]
    }

    /// Key named by the last step: a string for mapping keys, an integer for indices.
    pub fn final_key(&self) -> Result<FinalKey> {
        match self.last_step() {
            PathStep::Key(key) => Ok(FinalKey::Name(key.clone())),
            PathStep::Index(i) => Ok(FinalKey::Index(*i)),
            step @ PathStep::Slice(..) => Err(self.error_at(step, "a slice does not address a single entry")),
        }
    }

    fn error_at(&self, step: &PathStep, reason: impl Into<String>) -> Error {
        Error::resolution(&self.raw, step.to_string(), reason)
    }
}

impl FromStr for PathAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PathAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Shape of a node, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
            Self::Scalar => "scalar",
        })
    }
}

/// A nested value tree that paths can walk.
pub trait Navigable {
    fn kind(&self) -> NodeKind;
    fn get_key(&self, key: &str) -> Option<&Self>;
    fn sequence_len(&self) -> Option<usize>;
    fn get_index(&self, index: usize) -> Option<&Self>;
}

impl Navigable for Value {
    fn kind(&self) -> NodeKind {
        match self {
            Value::Mapping(_) => NodeKind::Mapping,
            Value::Sequence(_) => NodeKind::Sequence,
            _ => NodeKind::Scalar,
        }
    }

    fn get_key(&self, key: &str) -> Option<&Self> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    fn sequence_len(&self) -> Option<usize> {
        self.as_sequence().map(Vec::len)
    }

    fn get_index(&self, index: usize) -> Option<&Self> {
        self.as_sequence().and_then(|seq| seq.get(index))
    }
}

/// A concrete, already-resolved position inside a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Key(String),
    Index(usize),
}

/// A pending slice over the sequence a walk stopped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub start: usize,
    pub len: usize,
}

/// Where a walk ended.
pub(crate) struct Walk<'a, T> {
    pub node: &'a T,
    pub trail: Vec<Location>,
    pub window: Option<Window>,
}

/// Where an edit applies: the container's concrete trail and the entry inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub container: Vec<Location>,
    pub entry: Location,
}

pub(crate) fn normalize_index(i: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let idx = if i < 0 { len + i } else { i };
    (0..len).contains(&idx).then_some(idx as usize)
}

fn clamp_slice(lo: i64, hi: i64, len: usize) -> (usize, usize) {
    let len = len as i64;
    let clamp = |bound: i64| {
        let bound = if bound < 0 { len + bound } else { bound };
        bound.clamp(0, len) as usize
    };
    let (start, end) = (clamp(lo), clamp(hi));
    (start, end.max(start))
}

/// Length of the sequence (or slice of it) the walk currently sits on.
fn current_len<T: Navigable>(
    path: &PathAddress,
    step: &PathStep,
    node: &T,
    window: Option<Window>,
) -> Result<usize> {
    match window {
        Some(w) => Ok(w.len),
        None => node
            .sequence_len()
            .ok_or_else(|| path.error_at(step, format!("cannot index into a {}", node.kind()))),
    }
}

fn key_lookup<'a, T: Navigable>(
    path: &PathAddress,
    step: &PathStep,
    node: &'a T,
    window: Option<Window>,
    key: &str,
) -> Result<Option<&'a T>> {
    if window.is_some() {
        return Err(path.error_at(step, format!("cannot look up key '{key}' in a slice")));
    }
    match node.kind() {
        NodeKind::Mapping => Ok(node.get_key(key)),
        kind => Err(path.error_at(step, format!("cannot look up key '{key}' in a {kind}"))),
    }
}

fn index_lookup<T: Navigable>(
    path: &PathAddress,
    step: &PathStep,
    node: &T,
    window: Option<Window>,
    i: i64,
) -> Result<usize> {
    let len = current_len(path, step, node, window)?;
    let idx = normalize_index(i, len)
        .ok_or_else(|| path.error_at(step, format!("index {i} out of range for length {len}")))?;
    Ok(window.map_or(idx, |w| w.start + idx))
}

/// Follow `steps` from `root`.
pub(crate) fn walk<'a, T: Navigable>(
    root: &'a T,
    path: &PathAddress,
    steps: &[PathStep],
) -> Result<Walk<'a, T>> {
    let mut node = root;
    let mut trail = Vec::with_capacity(steps.len());
    let mut window: Option<Window> = None;

    for step in steps {
        match step {
            PathStep::Key(key) => {
                node = key_lookup(path, step, node, window, key)?
                    .ok_or_else(|| path.error_at(step, format!("key '{key}' not found")))?;
                trail.push(Location::Key(key.clone()));
            }
            PathStep::Index(i) => {
                let idx = index_lookup(path, step, node, window, *i)?;
                node = node
                    .get_index(idx)
                    .ok_or_else(|| path.error_at(step, format!("index {i} out of range")))?;
                trail.push(Location::Index(idx));
                window = None;
            }
            PathStep::Slice(lo, hi) => {
                let len = current_len(path, step, node, window)?;
                let (start, end) = clamp_slice(*lo, *hi, len);
                let base = window.map_or(0, |w| w.start);
                window = Some(Window {
                    start: base + start,
                    len: end - start,
                });
            }
        }
    }

    Ok(Walk {
        node,
        trail,
        window,
    })
}

/// Locate the entry a path's final step names.
///
/// With `must_exist`, a missing mapping key is an error; otherwise it is
/// returned as a location to insert at. Sequence indices must always exist.
pub fn locate_entry<T: Navigable>(root: &T, path: &PathAddress, must_exist: bool) -> Result<Target> {
    let parent = walk(root, path, path.parent_steps())?;
    let step = path.last_step();

    let entry = match step {
        PathStep::Key(key) => {
            let found = key_lookup(path, step, parent.node, parent.window, key)?;
            if must_exist && found.is_none() {
                return Err(path.error_at(step, format!("key '{key}' not found")));
            }
            Location::Key(key.clone())
        }
        PathStep::Index(i) => {
            Location::Index(index_lookup(path, step, parent.node, parent.window, *i)?)
        }
        PathStep::Slice(..) => {
            return Err(path.error_at(step, "a slice does not address a single entry"))
        }
    };

    Ok(Target {
        container: parent.trail,
        entry,
    })
}

fn materialize<'a>(walk: Walk<'a, Value>) -> Cow<'a, Value> {
    match (walk.window, walk.node) {
        (Some(w), Value::Sequence(seq)) => {
            Cow::Owned(Value::Sequence(seq[w.start..w.start + w.len].to_vec()))
        }
        _ => Cow::Borrowed(walk.node),
    }
}

/// Value reached by following every step of `path` from `root`.
///
/// A path ending in a slice yields an owned sub-sequence.
pub fn resolve<'a>(path: &PathAddress, root: &'a Value) -> Result<Cow<'a, Value>> {
    walk(root, path, path.steps()).map(materialize)
}

/// Container of the final step: `resolve` over every step but the last.
///
/// For a single-step path this is `root` itself.
pub fn resolve_container<'a>(path: &PathAddress, root: &'a Value) -> Result<Cow<'a, Value>> {
    walk(root, path, path.parent_steps()).map(materialize)
}
