//! Activation target resolution
//!
//! A `use keyring` argument is either a bare keyring name or an explicit
//! file path. The distinction is made once here, as a tagged value, and a
//! path target is checked for membership in the current context before
//! anything is loaded.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{KeyringError, Result};

use super::store::KeyringStore;

/// How the caller addressed a keyring
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyringLocator {
    /// A display name, resolved inside the current context's directory
    ByName(String),
    /// An explicit keyring file path
    ByPath(PathBuf),
}

impl KeyringLocator {
    /// Classify a raw argument. Anything containing a path separator is
    /// treated as a file path; everything else is a name.
    pub fn parse(raw: &str) -> Self {
        if raw.contains(std::path::MAIN_SEPARATOR) || raw.contains('/') {
            KeyringLocator::ByPath(PathBuf::from(raw))
        } else {
            KeyringLocator::ByName(raw.to_string())
        }
    }

    /// Resolve to the keyring file path inside `context_dir`.
    ///
    /// Name targets must exist in the directory (`KeyringNotFound`). Path
    /// targets must already point into `context_dir`; a path into another
    /// context's directory fails with `WrongContext` naming the context the
    /// file belongs to.
    pub fn resolve(&self, context_dir: &Path) -> Result<PathBuf> {
        match self {
            KeyringLocator::ByName(name) => {
                let path = KeyringStore::file_path(context_dir, name);
                if !KeyringStore::exists(&path) {
                    return Err(KeyringError::KeyringNotFound { name: name.clone() });
                }
                debug!("Resolved keyring name '{}' to {}", name, path.display());
                Ok(path)
            }
            KeyringLocator::ByPath(path) => {
                let parent = path.parent().unwrap_or_else(|| Path::new(""));
                if parent != context_dir {
                    let expected = parent
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "unknown".to_string());
                    return Err(KeyringError::WrongContext {
                        path: path.clone(),
                        expected,
                    });
                }
                debug!("Resolved explicit keyring path {}", path.display());
                Ok(path.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyring::models::Wallet;
    use tempfile::TempDir;

    #[test]
    fn test_parse_bare_name() {
        assert_eq!(
            KeyringLocator::parse("Default"),
            KeyringLocator::ByName("Default".to_string())
        );
        assert_eq!(
            KeyringLocator::parse("mykr0"),
            KeyringLocator::ByName("mykr0".to_string())
        );
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(
            KeyringLocator::parse("/keyrings/pool1/default.wallet"),
            KeyringLocator::ByPath(PathBuf::from("/keyrings/pool1/default.wallet"))
        );
        assert_eq!(
            KeyringLocator::parse("pool1/default.wallet"),
            KeyringLocator::ByPath(PathBuf::from("pool1/default.wallet"))
        );
    }

    #[test]
    fn test_resolve_name_finds_file() {
        let dir = TempDir::new().unwrap();
        KeyringStore::persist(&Wallet::new("MyVault"), dir.path()).unwrap();

        let path = KeyringLocator::ByName("MyVault".to_string())
            .resolve(dir.path())
            .unwrap();
        assert_eq!(path, dir.path().join("myvault.wallet"));
    }

    #[test]
    fn test_resolve_unknown_name() {
        let dir = TempDir::new().unwrap();
        let err = KeyringLocator::ByName("ghost".to_string())
            .resolve(dir.path())
            .unwrap_err();
        assert!(matches!(err, KeyringError::KeyringNotFound { .. }));
        assert!(err.to_string().contains("\"ghost\""));
    }

    #[test]
    fn test_resolve_path_in_current_context() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("default.wallet");

        let resolved = KeyringLocator::ByPath(path.clone())
            .resolve(dir.path())
            .unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn test_resolve_path_from_other_context() {
        let dir = TempDir::new().unwrap();
        let pool1 = dir.path().join("pool1");
        let pool2 = dir.path().join("pool2");
        let foreign = pool2.join("mykr0.wallet");

        let err = KeyringLocator::ByPath(foreign.clone())
            .resolve(&pool1)
            .unwrap_err();
        match err {
            KeyringError::WrongContext { path, expected } => {
                assert_eq!(path, foreign);
                assert_eq!(expected, "pool2");
            }
            other => panic!("Expected WrongContext, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_context_message_names_owning_context() {
        let pool1 = Path::new("/keyrings/pool1");
        let err = KeyringLocator::ByPath(PathBuf::from("/keyrings/pool2/mykr0.wallet"))
            .resolve(pool1)
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("Please connect to 'pool2' environment and try again."));
    }
}
