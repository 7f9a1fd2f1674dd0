//! The built-in sample project: two Python packages and a file registry.

use std::path::{Path, PathBuf};

use projgen_common_config::ProjgenConfig;
use projgen_common_core::Result;
use projgen_construct::files::{FileRegistry, SetupCfgFile, TextFile, YamlFile};
use projgen_construct::{Construct, ConstructHandle, FileSpec, Project, Scope};
use projgen_document::IndentStyle;
use serde_yaml::Value;

const PRE_COMMIT_HOOKS: [&str; 10] = [
    "trailing-whitespace",
    "check-added-large-files",
    "check-ast",
    "check-json",
    "check-merge-conflict",
    "check-xml",
    "check-yaml",
    "debug-statements",
    "end-of-file-fixer",
    "requirements-txt-fixer",
];

/// A Python package directory. Its files are child constructs.
#[derive(Debug)]
pub struct PythonPackage {
    directory: PathBuf,
}

impl Construct for PythonPackage {}

impl PythonPackage {
    /// Add the package and its files under `scope`.
    pub fn add(
        project: &mut Project,
        scope: impl Into<Scope>,
        id: &str,
        directory: impl Into<PathBuf>,
    ) -> Result<ConstructHandle<Self>> {
        let directory = directory.into();
        let package = project.add(
            scope,
            id,
            Self {
                directory: directory.clone(),
            },
        )?;

        project.add(
            package,
            "text-file",
            TextFile::new(directory.join("file.txt"), "awesome text file"),
        )?;
        project.add(
            package,
            "text-file-2",
            TextFile::new(directory.join("file2.txt"), "*ANOTHER* awesome text file :D"),
        )?;
        project.add(
            package,
            "setup.cfg",
            SetupCfgFile::new(directory.join("setup.cfg"), ["a", "b", "c"])
                .extra("test", ["pytest", "pytest-cov>=0.0.0"])
                .extra("dev", ["pandas"]),
        )?;
        project.add(
            package,
            "pre-commit-config",
            pre_commit_config(&directory)?,
        )?;

        Ok(package)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

fn pre_commit_config(directory: &Path) -> Result<YamlFile> {
    let mut hooks: Vec<Value> = PRE_COMMIT_HOOKS
        .iter()
        .map(|id| hook(id, None))
        .collect();
    hooks.push(hook("mixed-line-ending", Some(&["--fix=auto"][..])));

    let mut repo = serde_yaml::Mapping::new();
    repo.insert(
        "repo".into(),
        "https://github.com/pre-commit/pre-commit-hooks".into(),
    );
    repo.insert("rev".into(), "v4.1.0".into());
    repo.insert("hooks".into(), Value::Sequence(hooks));

    let mut root = serde_yaml::Mapping::new();
    root.insert("repos".into(), Value::Sequence(vec![Value::Mapping(repo)]));

    let mut file = YamlFile::with_value(
        FileSpec::new(directory.join(".pre-commit-config.yaml")).antitamper(true),
        Value::Mapping(root),
    )?
    .with_indent(4, 0);

    file.set_header_comment("This file let's you run pre-commit hooks!")
        .set_comment_before_key("repos.[0]", "This is the official pre-commit repository URL")?
        .set_eol_comment("repos.[0].rev", "Showing off end-of-line comments 🎉")?;

    Ok(file)
}

fn hook(id: &str, args: Option<&[&str]>) -> Value {
    let mut hook = serde_yaml::Mapping::new();
    hook.insert("id".into(), id.into());
    if let Some(args) = args {
        hook.insert(
            "args".into(),
            Value::Sequence(args.iter().map(|arg| Value::from(*arg)).collect()),
        );
    }
    Value::Mapping(hook)
}

/// Build the sample project rooted at `directory`.
pub fn build(directory: impl Into<PathBuf>, config: &ProjgenConfig) -> Result<Project> {
    let mut project = Project::new(directory);

    PythonPackage::add(&mut project, Scope::Root, "python-package-1", "python-package-1")?;
    PythonPackage::add(&mut project, Scope::Root, "python-package-2", "python-package-2")?;

    if config.registry.enabled {
        let registry = FileRegistry::new(&config.registry.directory, &config.registry.file_name)
            .with_style(IndentStyle::new(config.yaml.indent, config.yaml.list_indent));
        project.add(Scope::Root, "file-registry", registry)?;
    }

    Ok(project)
}
