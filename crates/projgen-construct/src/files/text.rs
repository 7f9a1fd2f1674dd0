//! Plain text files.

use projgen_common_core::Result;

use crate::construct::{Construct, Contents, FileConstruct, FileSpec, SynthContext};

/// A file with fixed text contents.
#[derive(Debug, Clone)]
pub struct TextFile {
    file: FileSpec,
    contents: String,
}

impl TextFile {
    pub fn new(file: impl Into<FileSpec>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }

    /// An empty file.
    pub fn empty(file: impl Into<FileSpec>) -> Self {
        Self::new(file, String::new())
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn set_contents(&mut self, contents: impl Into<String>) {
        self.contents = contents.into();
    }
}

impl Construct for TextFile {
    fn as_file(&self) -> Option<&dyn FileConstruct> {
        Some(self)
    }
}

impl FileConstruct for TextFile {
    fn file(&self) -> &FileSpec {
        &self.file
    }

    fn synth_contents(&self, _ctx: &SynthContext<'_>) -> Result<Contents> {
        Ok(Contents::Text(self.contents.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Project;
    use crate::tree::NodeId;

    #[test]
    fn test_contents() {
        let project = Project::new("out");
        let ctx = SynthContext::new(&project, NodeId::ROOT);

        let mut file = TextFile::empty("a.txt");
        assert_eq!(file.synth_contents(&ctx).unwrap(), Contents::Text(String::new()));

        file.set_contents("awesome text file");
        assert_eq!(file.contents(), "awesome text file");
        assert_eq!(
            file.synth_contents(&ctx).unwrap().as_text(),
            Some("awesome text file")
        );
    }
}
