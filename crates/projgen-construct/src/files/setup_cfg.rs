//! `setup.cfg` files for Python packages.

use projgen_common_core::{Result, ResultExt};
use toml::{Table, Value};

use crate::construct::{Construct, Contents, FileConstruct, FileSpec, SynthContext};

const EXTRAS_COMMENT: [&str; 2] = [
    "You can define optional dependencies that can be",
    "installed by running: pip install .[some-extra]",
];

/// Package requirements rendered as TOML sections.
///
/// `[options]` carries `install_requires`; `[extras_require]` is emitted
/// only when at least one extra is declared.
#[derive(Debug, Clone)]
pub struct SetupCfgFile {
    file: FileSpec,
    install_requires: Vec<String>,
    extras_require: Vec<(String, Vec<String>)>,
}

impl SetupCfgFile {
    pub fn new<I, S>(file: impl Into<FileSpec>, install_requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            file: file.into(),
            install_requires: install_requires.into_iter().map(Into::into).collect(),
            extras_require: Vec::new(),
        }
    }

    /// Declare an extra. Declaring the same name again replaces its requirements.
    pub fn extra<I, S>(mut self, name: impl Into<String>, requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let requires: Vec<String> = requires.into_iter().map(Into::into).collect();

        match self.extras_require.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = requires,
            None => self.extras_require.push((name, requires)),
        }
        self
    }

    pub fn install_requires(&self) -> &[String] {
        &self.install_requires
    }

    pub fn extras_require(&self) -> &[(String, Vec<String>)] {
        &self.extras_require
    }

    fn section(name: &str, body: Table) -> Result<String> {
        let mut doc = Table::new();
        doc.insert(name.to_string(), Value::Table(body));
        toml::to_string(&doc).with_context(|| format!("failed to serialize [{name}] section"))
    }

    fn string_array(items: &[String]) -> Value {
        Value::Array(items.iter().cloned().map(Value::String).collect())
    }
}

impl Construct for SetupCfgFile {
    fn as_file(&self) -> Option<&dyn FileConstruct> {
        Some(self)
    }
}

impl FileConstruct for SetupCfgFile {
    fn file(&self) -> &FileSpec {
        &self.file
    }

    fn synth_contents(&self, _ctx: &SynthContext<'_>) -> Result<Contents> {
        let mut options = Table::new();
        options.insert(
            "install_requires".to_string(),
            Self::string_array(&self.install_requires),
        );
        let mut out = Self::section("options", options)?;

        if !self.extras_require.is_empty() {
            let extras: Table = self
                .extras_require
                .iter()
                .map(|(name, requires)| (name.clone(), Self::string_array(requires)))
                .collect();

            out.push('\n');
            for line in EXTRAS_COMMENT {
                out.push_str("# ");
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(&Self::section("extras_require", extras)?);
        }

        Ok(Contents::Text(out))
    }
}
