//! Concrete file constructs.

mod registry;
mod setup_cfg;
mod text;
mod yaml;

pub use registry::{FileRegistry, RegistryEntry};
pub use setup_cfg::SetupCfgFile;
pub use text::TextFile;
pub use yaml::YamlFile;
