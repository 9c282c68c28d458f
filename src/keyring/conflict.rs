//! Keyring name conflict detection and disambiguation

use std::path::Path;

use log::debug;

use crate::error::{KeyringError, Result};

use super::store::KeyringStore;

/// Decides whether a proposed keyring name collides with files already in a
/// storage directory, and produces disambiguated alternatives for forced
/// creation paths.
pub struct ConflictResolver;

impl ConflictResolver {
    /// True when no keyring file in `context_dir` has the same normalized
    /// name. Comparison covers every file present, not only the active one.
    pub fn is_name_available(context_dir: &Path, name: &str) -> bool {
        let candidate = KeyringStore::normalized_file_name(name);
        !KeyringStore::list_keyring_files(context_dir)
            .iter()
            .any(|existing| existing == &candidate)
    }

    /// Error with `NameConflict` when the name is taken
    pub fn ensure_available(context_dir: &Path, name: &str) -> Result<()> {
        if Self::is_name_available(context_dir, name) {
            Ok(())
        } else {
            Err(KeyringError::NameConflict {
                name: name.to_string(),
            })
        }
    }

    /// Find a free name derived from `base` by suffixing `_1`, `_2`, ...
    /// until one is available. Deterministic for a given directory listing.
    /// Used only on forced creation (e.g. corruption recovery); user-driven
    /// creation gets `NameConflict` instead.
    pub fn disambiguate(context_dir: &Path, base: &str) -> String {
        if Self::is_name_available(context_dir, base) {
            return base.to_string();
        }

        let mut counter = 1;
        loop {
            let candidate = format!("{}_{}", base, counter);
            if Self::is_name_available(context_dir, &candidate) {
                debug!("Disambiguated keyring name '{}' to '{}'", base, candidate);
                return candidate;
            }
            counter += 1;
        }
    }
}
