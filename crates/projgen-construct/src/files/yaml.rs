//! YAML files with path-addressed comments.

use projgen_common_core::Result;
use projgen_document::{IndentStyle, StructuredDocument};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::construct::{Construct, Contents, FileConstruct, FileSpec, SynthContext};

/// A YAML file built from an initial value plus comment and value edits.
#[derive(Debug, Clone)]
pub struct YamlFile {
    file: FileSpec,
    document: StructuredDocument,
}

impl YamlFile {
    /// A file holding an empty mapping.
    pub fn new(file: impl Into<FileSpec>) -> Result<Self> {
        Self::with_value(file, Value::Mapping(Mapping::new()))
    }

    /// A file holding `initial`.
    pub fn with_value(file: impl Into<FileSpec>, initial: Value) -> Result<Self> {
        Ok(Self {
            file: file.into(),
            document: StructuredDocument::new(initial)?,
        })
    }

    /// A file holding any serializable value.
    pub fn from_serialize<T: Serialize>(file: impl Into<FileSpec>, initial: &T) -> Result<Self> {
        Ok(Self {
            file: file.into(),
            document: StructuredDocument::from_serialize(initial)?,
        })
    }

    /// Dump with `indent` spaces per mapping level and `list_indent` before `-`.
    pub fn with_indent(mut self, indent: usize, list_indent: usize) -> Self {
        self.document = self.document.with_style(IndentStyle::new(indent, list_indent));
        self
    }

    pub fn document(&self) -> &StructuredDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut StructuredDocument {
        &mut self.document
    }

    pub fn set_header_comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.document.set_header_comment(text);
        self
    }

    pub fn set_comment_before_key(&mut self, path: &str, text: impl Into<String>) -> Result<&mut Self> {
        self.document.set_comment_before_key(path, text)?;
        Ok(self)
    }

    pub fn set_eol_comment(&mut self, path: &str, text: impl Into<String>) -> Result<&mut Self> {
        self.document.set_eol_comment(path, text)?;
        Ok(self)
    }

    pub fn set_value<T: Serialize>(&mut self, path: &str, value: &T) -> Result<&mut Self> {
        self.document.set_value(path, value)?;
        Ok(self)
    }

    pub fn remove_value(&mut self, path: &str) -> Result<&mut Self> {
        self.document.remove_value(path)?;
        Ok(self)
    }
}

impl Construct for YamlFile {
    fn as_file(&self) -> Option<&dyn FileConstruct> {
        Some(self)
    }
}

impl FileConstruct for YamlFile {
    fn file(&self) -> &FileSpec {
        &self.file
    }

    fn synth_contents(&self, _ctx: &SynthContext<'_>) -> Result<Contents> {
        self.document.dump().map(Contents::Text)
    }
}
