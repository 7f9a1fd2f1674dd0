//! Result and Option extensions.

use crate::error::{Error, Result};

/// Extension trait for Result types.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T>
    for std::result::Result<T, E>
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Internal {
            message: message.into(),
            source: Some(Box::new(e)),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::Internal {
            message: f(),
            source: Some(Box::new(e)),
        })
    }
}

/// Extension trait for Option types.
pub trait OptionExt<T> {
    /// Convert None to an unknown node error.
    fn ok_or_unknown(self, what: impl Into<String>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_unknown(self, what: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| Error::UnknownNode(what.into()))
    }
}

/// Ensure macro - return early if condition is false.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_result_context() {
        let io_result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let with_context = io_result.context("Failed to read config file");

        let err = with_context.unwrap_err();
        match err {
            Error::Internal { message, source } => {
                assert_eq!(message, "Failed to read config file");
                assert!(source.is_some());
            }
            _ => panic!("Expected Internal error"),
        }
    }

    #[test]
    fn test_result_with_context() {
        let io_result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
        let with_context =
            io_result.with_context(|| format!("Failed to write to file at {}", "/tmp/test.txt"));

        match with_context.unwrap_err() {
            Error::Internal { message, .. } => {
                assert_eq!(message, "Failed to write to file at /tmp/test.txt");
            }
            _ => panic!("Expected Internal error"),
        }
    }

    #[test]
    fn test_option_ok_or_unknown() {
        let none_option: Option<u32> = None;
        assert!(matches!(
            none_option.ok_or_unknown("node #7"),
            Err(Error::UnknownNode(ref what)) if what == "node #7"
        ));
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: i32) -> Result<()> {
            ensure!(value > 0, Error::new("Value must be positive"));
            Ok(())
        }

        assert!(check(5).is_ok());
        assert!(matches!(check(-1), Err(Error::Generic(ref m)) if m == "Value must be positive"));
    }
}
