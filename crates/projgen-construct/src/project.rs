//! The project: tree root and construct registries.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use projgen_common_core::{OptionExt, Result};
use tracing::debug;

use crate::construct::{Construct, FileConstruct};
use crate::tree::{ConstructHandle, NodeId, Scope, Tree};

/// Root of a construct tree and owner of the output directory.
///
/// Every construct added anywhere in the tree is registered here, and
/// file constructs are also registered in a separate file registry. Both
/// registries iterate in creation order and hold each construct once.
#[derive(Debug)]
pub struct Project {
    directory: PathBuf,
    tree: Tree,
    constructs: BTreeMap<NodeId, Box<dyn Construct>>,
    files: BTreeSet<NodeId>,
}

impl Project {
    /// Create a project writing under `directory`.
    ///
    /// The root node's id is the directory's last component.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        let root_id = directory
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());

        Self {
            directory,
            tree: Tree::new(root_id),
            constructs: BTreeMap::new(),
            files: BTreeSet::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Attach `construct` under `scope` as `id` and register it.
    pub fn add<T: Construct>(
        &mut self,
        scope: impl Into<Scope>,
        id: &str,
        construct: T,
    ) -> Result<ConstructHandle<T>> {
        let node = self.tree.add_child(scope.into(), id)?;

        let is_file = construct.as_file().is_some();
        if is_file {
            self.files.insert(node);
        }
        self.constructs.insert(node, Box::new(construct));

        debug!(construct = %self.tree.path(node), file = is_file, "Registered construct");
        Ok(ConstructHandle::new(node))
    }

    /// Typed access to a construct.
    pub fn construct<T: Construct>(&self, handle: ConstructHandle<T>) -> Result<&T> {
        self.constructs
            .get(&handle.node())
            .and_then(|construct| (**construct).as_any().downcast_ref::<T>())
            .ok_or_unknown(handle.node().to_string())
    }

    /// Typed mutable access to a construct.
    pub fn construct_mut<T: Construct>(&mut self, handle: ConstructHandle<T>) -> Result<&mut T> {
        self.constructs
            .get_mut(&handle.node())
            .and_then(|construct| (**construct).as_any_mut().downcast_mut::<T>())
            .ok_or_unknown(handle.node().to_string())
    }

    /// The construct stored at `node`, if any. The root has none.
    pub fn get(&self, node: NodeId) -> Option<&dyn Construct> {
        self.constructs.get(&node).map(|construct| &**construct)
    }

    /// Children of `node` in attachment order.
    pub fn children(&self, node: impl Into<Scope>) -> Result<&[NodeId]> {
        let node = match node.into() {
            Scope::Root => self.root(),
            Scope::Parent(node) => node,
        };
        Ok(self.tree.node(node)?.children())
    }

    /// Every registered construct, in creation order.
    pub fn constructs(&self) -> impl Iterator<Item = (NodeId, &dyn Construct)> + '_ {
        self.constructs
            .iter()
            .map(|(node, construct)| (*node, &**construct))
    }

    /// Every registered file construct, in creation order.
    pub fn files(&self) -> impl Iterator<Item = (NodeId, &dyn FileConstruct)> + '_ {
        self.files.iter().filter_map(|node| {
            self.get(*node)
                .and_then(|construct| construct.as_file())
                .map(|file| (*node, file))
        })
    }

    /// Node at a `/`-joined id path such as `/project/pkg/setup.cfg`.
    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        self.tree.find_by_path(path)
    }

    /// Resolve a file path against the project directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.directory.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::{Contents, FileSpec, SynthContext};
    use projgen_common_core::Error;

    #[derive(Debug, Default)]
    struct Group {
        label: String,
    }

    impl Construct for Group {}

    #[derive(Debug)]
    struct Note {
        file: FileSpec,
    }

    impl Construct for Note {
        fn as_file(&self) -> Option<&dyn FileConstruct> {
            Some(self)
        }
    }

    impl FileConstruct for Note {
        fn file(&self) -> &FileSpec {
            &self.file
        }

        fn synth_contents(&self, _ctx: &SynthContext<'_>) -> Result<Contents> {
            Ok(Contents::Text("note".into()))
        }
    }

    fn note(path: &str) -> Note {
        Note {
            file: FileSpec::new(path),
        }
    }

    #[test]
    fn test_root_id_from_directory() {
        let project = Project::new("/tmp/sample-proj");
        assert_eq!(project.tree().path(project.root()), "/sample-proj");
        assert_eq!(Project::new("/").tree().path(NodeId::ROOT), "/project");
    }

    #[test]
    fn test_registries_are_global_and_ordered() {
        let mut project = Project::new("out");
        let pkg = project.add(Scope::Root, "pkg", Group::default()).unwrap();
        let nested = project.add(pkg, "nested", Group::default()).unwrap();
        let deep = project.add(nested, "deep.txt", note("deep.txt")).unwrap();
        let top = project.add(Scope::Root, "top.txt", note("top.txt")).unwrap();

        let all: Vec<_> = project.constructs().map(|(node, _)| node).collect();
        assert_eq!(all, vec![pkg.node(), nested.node(), deep.node(), top.node()]);

        let files: Vec<_> = project.files().map(|(node, _)| node).collect();
        assert_eq!(files, vec![deep.node(), top.node()]);

        assert_eq!(project.children(pkg).unwrap(), &[nested.node()]);
        assert_eq!(project.children(Scope::Root).unwrap(), &[pkg.node(), top.node()]);
        assert_eq!(project.find_by_path("/out/pkg/nested/deep.txt"), Some(deep.node()));
    }

    #[test]
    fn test_typed_access() {
        let mut project = Project::new("out");
        let group = project.add(Scope::Root, "g", Group::default()).unwrap();

        project.construct_mut(group).unwrap().label = "renamed".into();
        assert_eq!(project.construct(group).unwrap().label, "renamed");

        // A handle with the wrong type does not resolve
        let wrong: ConstructHandle<Note> = ConstructHandle::new(group.node());
        assert!(matches!(project.construct(wrong), Err(Error::UnknownNode(_))));
    }

    #[test]
    fn test_duplicate_id_not_registered() {
        let mut project = Project::new("out");
        project.add(Scope::Root, "a.txt", note("a.txt")).unwrap();
        assert!(project.add(Scope::Root, "a.txt", note("b.txt")).is_err());
        assert_eq!(project.files().count(), 1);
    }

    #[test]
    fn test_resolve_path() {
        let project = Project::new("/srv/out");
        assert_eq!(
            project.resolve_path(Path::new("pkg/file.txt")),
            PathBuf::from("/srv/out/pkg/file.txt")
        );
        assert_eq!(
            project.resolve_path(Path::new("/etc/x")),
            PathBuf::from("/etc/x")
        );
    }
}
