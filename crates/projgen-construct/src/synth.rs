//! Synthesis: turning a project's constructs into files on disk.

use std::collections::HashMap;
use std::path::PathBuf;

use projgen_common_core::Result;
use projgen_common_fs as fs;
use tracing::{debug, info, warn};

use crate::construct::{Contents, FileConstruct, SynthContext};
use crate::project::Project;

/// A file's contents, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: Contents,
    pub executable: bool,
}

impl RenderedFile {
    /// Generate the contents of `file` without touching the disk.
    pub fn render(file: &dyn FileConstruct, ctx: &SynthContext<'_>) -> Result<Self> {
        let file_spec = file.file();
        Ok(Self {
            path: ctx.destination(file_spec),
            contents: file.synth_contents(ctx)?,
            executable: file_spec.executable,
        })
    }

    /// Write the file, replacing whatever was there.
    pub fn write(&self) -> Result<()> {
        fs::ensure_parent_dir(&self.path)?;

        match &self.contents {
            Contents::Text(text) => fs::write_text(&self.path, text)?,
            Contents::Binary(bytes) => fs::write_bytes(&self.path, bytes)?,
        }

        if self.executable {
            fs::add_executable_bit(&self.path)?;
        }

        info!(path = %self.path.display(), bytes = self.contents.as_bytes().len(), "Wrote file");
        Ok(())
    }
}

/// Synthesize every construct registered with `project`.
///
/// Constructs run in creation order. The first error stops the run;
/// files already written stay on disk. Returns the written paths.
pub fn synth(project: &Project) -> Result<Vec<PathBuf>> {
    fs::ensure_dir(project.directory())?;
    warn_on_shared_destinations(project);

    let mut written = Vec::new();
    for (node, construct) in project.constructs() {
        let ctx = SynthContext::new(project, node);
        debug!(construct = %ctx.node_path(), "Synthesizing");
        construct.synth(&ctx)?;

        if let Some(file) = construct.as_file() {
            written.push(ctx.destination(file.file()));
        }
    }

    info!(
        directory = %project.directory().display(),
        files = written.len(),
        "Synthesis complete"
    );
    Ok(written)
}

/// Render every file construct without writing anything.
pub fn render(project: &Project) -> Result<Vec<RenderedFile>> {
    project
        .files()
        .map(|(node, file)| RenderedFile::render(file, &SynthContext::new(project, node)))
        .collect()
}

fn warn_on_shared_destinations(project: &Project) {
    let mut seen: HashMap<PathBuf, String> = HashMap::new();

    for (node, file) in project.files() {
        let ctx = SynthContext::new(project, node);
        let destination = ctx.destination(file.file());
        let construct = ctx.node_path();

        if let Some(previous) = seen.insert(destination.clone(), construct.clone()) {
            warn!(
                path = %destination.display(),
                earlier = %previous,
                later = %construct,
                "Multiple constructs write the same file; the later one wins"
            );
        }
    }
}
