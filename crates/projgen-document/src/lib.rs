//! Path-addressable YAML documents with comment annotations.
//!
//! A [`StructuredDocument`] wraps a value tree. Entries are addressed with
//! dot/bracket paths (`repos.[0].rev`, `items.[1:3]`), and header,
//! before-key and end-of-line comments can be attached before the tree is
//! dumped as block-style YAML.
//!
//! ```
//! use projgen_document::StructuredDocument;
//!
//! let mut doc = StructuredDocument::parse("repos:\n- rev: v1\n").unwrap();
//! doc.set_header_comment("Hooks");
//! doc.set_eol_comment("repos.[0].rev", "pinned").unwrap();
//! assert_eq!(doc.dump().unwrap(), "# Hooks\nrepos:\n- rev: v1 # pinned\n");
//! ```

pub mod document;
pub mod emit;
pub mod indent;
pub mod path;
pub mod tree;

pub use document::StructuredDocument;
pub use indent::{indent_of, IndentStyle};
pub use path::{resolve, resolve_container, FinalKey, PathAddress, PathStep};
pub use tree::Edit;
