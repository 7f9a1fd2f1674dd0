//! Construct trees and synthesis for projgen.
//!
//! A [`Project`] is the root of a tree of constructs. Constructs are added
//! under the root or under another construct, and every one of them is
//! registered with the project. [`synth`] then walks the registry and
//! writes each file construct's output.
//!
//! ```no_run
//! use projgen_construct::{files::TextFile, synth, Project, Scope};
//!
//! let mut project = Project::new("generated");
//! project.add(Scope::Root, "readme", TextFile::new("README.md", "hello"))?;
//! synth(&project)?;
//! # Ok::<(), projgen_common_core::Error>(())
//! ```

pub mod construct;
pub mod files;
pub mod project;
pub mod synth;
pub mod tree;

pub use construct::{AsAny, Construct, Contents, FileConstruct, FileSpec, SynthContext};
pub use project::Project;
pub use synth::{render, synth, RenderedFile};
pub use tree::{ConstructHandle, Node, NodeId, Scope, Tree};
