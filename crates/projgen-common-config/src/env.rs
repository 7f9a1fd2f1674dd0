//! Environment variable handling.

use std::path::Path;

use thiserror::Error;

/// Environment loading errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    pub const PROJGEN_CONFIG: &str = "PROJGEN_CONFIG";
    pub const PROJGEN_PROJECT_DIR: &str = "PROJGEN_PROJECT_DIR";
    pub const PROJGEN_OUTPUT_DIR: &str = "PROJGEN_OUTPUT_DIR";
}

/// Files read by [`Environment::load_from`], later ones overriding earlier ones.
pub const ENV_FILES: [&str; 2] = [".env", ".env.local"];

/// Process environment loaded from dotenv files.
#[derive(Debug)]
pub struct Environment;

impl Environment {
    /// Load dotenv files from the working directory.
    pub fn init() -> Result<Self, EnvError> {
        Self::load_from(Path::new("."))
    }

    /// Load `.env` then `.env.local` from `dir`. Missing files are ignored.
    pub fn load_from(dir: &Path) -> Result<Self, EnvError> {
        for name in ENV_FILES {
            match dotenvy::from_path_override(dir.join(name)) {
                Ok(()) => {}
                Err(e) if e.not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_files_are_ignored() {
        let dir = tempdir().unwrap();
        assert!(Environment::load_from(dir.path()).is_ok());
    }

    #[test]
    fn test_local_overrides_base() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(".env"),
            "PROJGEN_TEST_ENV_BASE=base\nPROJGEN_TEST_ENV_SHARED=base\n",
        )
        .unwrap();
        fs::write(dir.path().join(".env.local"), "PROJGEN_TEST_ENV_SHARED=local\n").unwrap();

        Environment::load_from(dir.path()).unwrap();

        assert_eq!(env::var("PROJGEN_TEST_ENV_BASE").unwrap(), "base");
        assert_eq!(env::var("PROJGEN_TEST_ENV_SHARED").unwrap(), "local");
    }
}
