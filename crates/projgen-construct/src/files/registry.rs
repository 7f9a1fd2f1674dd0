//! Registry of every file a project generates.

use std::path::PathBuf;

use projgen_common_core::Result;
use projgen_common_fs::path::{relative_to, to_unix_string};
use projgen_document::{IndentStyle, StructuredDocument};
use serde::{Deserialize, Serialize};

use crate::construct::{Construct, Contents, FileConstruct, FileSpec, SynthContext};

const HEADER: &str = "Generated by projgen: every file the project writes.\nDo not edit by hand.";

/// One generated file, as listed in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Destination, relative to the project directory when it lies inside it.
    pub path: String,
    /// Tree path of the construct that writes it.
    pub construct: String,
    pub antitamper: bool,
    pub executable: bool,
}

#[derive(Serialize)]
struct Registry<'a> {
    files: &'a [RegistryEntry],
}

/// A YAML file listing every other file construct in the project.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    file: FileSpec,
    style: IndentStyle,
}

impl FileRegistry {
    /// Registry at `directory/file_name`, marked antitamper.
    pub fn new(directory: impl Into<PathBuf>, file_name: &str) -> Self {
        Self {
            file: FileSpec::new(directory.into().join(file_name)).antitamper(true),
            style: IndentStyle::default(),
        }
    }

    pub fn with_style(mut self, style: IndentStyle) -> Self {
        self.style = style;
        self
    }

    /// Entries for every file construct except this one, in creation order.
    pub fn entries(&self, ctx: &SynthContext<'_>) -> Vec<RegistryEntry> {
        let project = ctx.project();

        project
            .files()
            .filter(|(node, _)| *node != ctx.node())
            .map(|(node, file)| {
                let file_spec = file.file();
                let shown = relative_to(ctx.destination(file_spec), project.directory());

                RegistryEntry {
                    path: to_unix_string(shown),
                    construct: project.tree().path(node),
                    antitamper: file_spec.antitamper,
                    executable: file_spec.executable,
                }
            })
            .collect()
    }
}

impl Construct for FileRegistry {
    fn as_file(&self) -> Option<&dyn FileConstruct> {
        Some(self)
    }
}

impl FileConstruct for FileRegistry {
    fn file(&self) -> &FileSpec {
        &self.file
    }

    fn synth_contents(&self, ctx: &SynthContext<'_>) -> Result<Contents> {
        let entries = self.entries(ctx);
        let mut document =
            StructuredDocument::from_serialize(&Registry { files: &entries })?.with_style(self.style);
        document.set_header_comment(HEADER);
        document.dump().map(Contents::Text)
    }
}
