//! Construct traits.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};

use projgen_common_core::Result;

use crate::project::Project;
use crate::synth::RenderedFile;
use crate::tree::NodeId;

/// Downcasting support, implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Anything that can be placed in a project's tree.
pub trait Construct: AsAny + fmt::Debug {
    /// Synthesis step.
    ///
    /// File constructs render and write their file; other constructs do
    /// nothing unless they override this.
    fn synth(&self, ctx: &SynthContext<'_>) -> Result<()> {
        match self.as_file() {
            Some(file) => RenderedFile::render(file, ctx)?.write(),
            None => Ok(()),
        }
    }

    /// The file-producing side of this construct, if it has one.
    fn as_file(&self) -> Option<&dyn FileConstruct> {
        None
    }
}

/// A construct that produces one file.
pub trait FileConstruct {
    fn file(&self) -> &FileSpec;

    /// Generate the file's full contents.
    fn synth_contents(&self, ctx: &SynthContext<'_>) -> Result<Contents>;
}

/// Destination and flags of a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    /// Destination. Relative paths are taken from the project directory.
    pub path: PathBuf,
    /// Advisory marker: the file is not meant to be edited by hand.
    pub antitamper: bool,
    /// Add the owner executable bit after writing.
    pub executable: bool,
}

impl FileSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            antitamper: false,
            executable: false,
        }
    }

    pub fn antitamper(mut self, antitamper: bool) -> Self {
        self.antitamper = antitamper;
        self
    }

    pub fn executable(mut self, executable: bool) -> Self {
        self.executable = executable;
        self
    }
}

impl From<&str> for FileSpec {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for FileSpec {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for FileSpec {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for FileSpec {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

/// Generated file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    Text(String),
    Binary(Vec<u8>),
}

impl Contents {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }
}

/// What a construct sees while it is synthesized.
#[derive(Debug, Clone, Copy)]
pub struct SynthContext<'a> {
    project: &'a Project,
    node: NodeId,
}

impl<'a> SynthContext<'a> {
    pub fn new(project: &'a Project, node: NodeId) -> Self {
        Self { project, node }
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Tree path of the construct being synthesized.
    pub fn node_path(&self) -> String {
        self.project.tree().path(self.node)
    }

    /// Destination of `file_spec` on disk.
    pub fn destination(&self, file_spec: &FileSpec) -> PathBuf {
        self.project.resolve_path(&file_spec.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Marker(u8);

    impl Construct for Marker {}

    #[test]
    fn test_downcast_through_dyn_construct() {
        let boxed: Box<dyn Construct> = Box::new(Marker(7));
        let construct: &dyn Construct = boxed.as_ref();

        let marker = construct.as_any().downcast_ref::<Marker>().unwrap();
        assert_eq!(marker.0, 7);
        assert!(construct.as_file().is_none());
    }

    #[test]
    fn test_file_spec_builder() {
        let file_spec = FileSpec::from("bin/run.sh").executable(true);
        assert_eq!(file_spec.path, PathBuf::from("bin/run.sh"));
        assert!(file_spec.executable);
        assert!(!file_spec.antitamper);
    }

    #[test]
    fn test_contents_bytes() {
        assert_eq!(Contents::Text("hi".into()).as_bytes(), b"hi");
        assert_eq!(Contents::Binary(vec![0, 1]).as_bytes(), &[0, 1]);
        assert_eq!(Contents::Binary(vec![]).as_text(), None);
    }
}
