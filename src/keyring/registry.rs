//! Context-to-keyring binding registry
//!
//! Records which keyring file was last active in each context, so returning
//! to a context restores the right keyring even across process restarts.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::files;
use crate::error::{KeyringError, Result};

/// On-disk shape of the registry file
#[derive(Debug, Serialize, Deserialize, Default)]
struct BindingsFile {
    /// Map of context name to bound keyring file name
    #[serde(default)]
    bindings: BTreeMap<String, String>,
}

/// Persisted map of context name -> bound keyring file name
#[derive(Debug)]
pub struct ContextRegistry {
    registry_path: PathBuf,
    bindings: BTreeMap<String, String>,
}

impl ContextRegistry {
    /// Open the registry stored in `base_dir`, loading any existing
    /// bindings. A missing file means an empty registry.
    pub fn open(base_dir: &Path) -> Result<Self> {
        let registry_path = base_dir.join(files::BINDINGS_FILE);
        let bindings = Self::read(&registry_path)?;
        Ok(Self {
            registry_path,
            bindings,
        })
    }

    fn read(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            KeyringError::Registry(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let parsed: BindingsFile = serde_json::from_str(&content).map_err(|e| {
            KeyringError::Registry(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(parsed.bindings)
    }

    /// The keyring file last bound to a context, if any
    pub fn bound_file(&self, context: &str) -> Option<&str> {
        self.bindings.get(context).map(String::as_str)
    }

    /// Record the association and persist the registry
    pub fn bind(&mut self, context: &str, file_name: &str) -> Result<()> {
        debug!("Binding context '{}' to keyring file '{}'", context, file_name);
        self.bindings
            .insert(context.to_string(), file_name.to_string());
        self.save()
    }

    /// All recorded bindings, ordered by context name
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(context, file)| (context.as_str(), file.as_str()))
    }

    /// Atomic write of the registry file (tmp file + rename)
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.registry_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                KeyringError::Registry(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = BindingsFile {
            bindings: self.bindings.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| KeyringError::Registry(format!("Failed to serialize bindings: {}", e)))?;

        let tmp_path = self.registry_path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).map_err(|e| {
            KeyringError::Registry(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;

        fs::rename(&tmp_path, &self.registry_path).map_err(|e| {
            KeyringError::Registry(format!(
                "Failed to rename temp file to {}: {}",
                self.registry_path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
