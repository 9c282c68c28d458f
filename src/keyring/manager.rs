//! Keyring lifecycle orchestration
//!
//! `ContextManager` owns the single active-wallet slot and reacts to the
//! session layer's context lifecycle: save-on-leave, restore-or-create on
//! enter, last-state persistence on exit. It performs no file I/O itself;
//! keyring files go through `KeyringStore` and bindings through
//! `ContextRegistry`.
//!
//! One manager instance per logical session. The design assumes a single
//! process works a given base directory at a time; the atomic writes in the
//! store guard against partial files, not concurrent writers.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::{defaults, files};
use crate::error::{KeyringError, Result};

use super::conflict::ConflictResolver;
use super::events::KeyringEvent;
use super::models::{Identifier, Wallet};
use super::registry::ContextRegistry;
use super::resolve::KeyringLocator;
use super::store::KeyringStore;

/// Orchestrates keyring persistence across context switches
#[derive(Debug)]
pub struct ContextManager {
    base_dir: PathBuf,
    registry: ContextRegistry,
    current_context: Option<String>,
    active: Option<Wallet>,
    connected_before: bool,
}

impl ContextManager {
    /// Open a manager over the given base directory, loading the binding
    /// registry persisted there.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let registry = ContextRegistry::open(&base_dir)?;
        Ok(Self {
            base_dir,
            registry,
            current_context: None,
            active: None,
            connected_before: false,
        })
    }

    /// Default base directory (~/.keyringctl/keyrings)
    pub fn default_base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(files::DIR_NAME)
            .join(files::KEYRINGS_DIR)
    }

    /// Storage directory for one context
    pub fn context_dir(&self, context: &str) -> PathBuf {
        self.base_dir.join(context)
    }

    pub fn current_context(&self) -> Option<&str> {
        self.current_context.as_deref()
    }

    pub fn current_wallet(&self) -> Option<&Wallet> {
        self.active.as_ref()
    }

    /// The session connected to a context.
    ///
    /// The previously current context, if any, is saved first -- switching
    /// must never lose unsaved identifiers, regardless of whether the caller
    /// issued an explicit leave. Then the context's bound keyring is
    /// restored; a context without a binding starts with a fresh
    /// default-named keyring (disambiguated against whatever files already
    /// sit in its directory), unless the session has no wallet to carry and
    /// has connected before.
    pub fn enter_context(&mut self, context: &str) -> Result<Vec<KeyringEvent>> {
        if self.current_context.is_some() {
            self.leave_context()?;
        }

        debug!("Entering context '{}'", context);
        self.current_context = Some(context.to_string());
        let context_dir = self.context_dir(context);

        let mut events = Vec::new();
        match self.registry.bound_file(context).map(str::to_string) {
            Some(file_name) => {
                let path = context_dir.join(&file_name);
                match KeyringStore::load(&path) {
                    Ok(wallet) => {
                        events.push(KeyringEvent::KeyringRestored {
                            name: wallet.name.clone(),
                            identifier_count: wallet.identifier_count(),
                        });
                        events.push(KeyringEvent::ActiveKeyringChanged {
                            name: wallet.name.clone(),
                        });
                        self.active = Some(wallet);
                    }
                    Err(KeyringError::CorruptedKeyring { path }) => {
                        // The corrupted file stays on disk untouched for
                        // forensic recovery; a fresh keyring with a name
                        // disambiguated against it takes over.
                        warn!(
                            "Keyring file {} is corrupted, creating a replacement",
                            path.display()
                        );
                        events.push(KeyringEvent::KeyringRestoreFailed { path });
                        events.extend(self.activate_fresh_default(&context_dir));
                    }
                    Err(e) => return Err(e),
                }
            }
            None => {
                if self.active.is_some() || !self.connected_before {
                    // Keyrings are context-scoped: the carried wallet was
                    // already persisted to its own context above, and this
                    // context starts with its own default keyring. The very
                    // first connection of a session gets one as well.
                    events.extend(self.activate_fresh_default(&context_dir));
                }
                // Otherwise the operator never created a wallet; do not
                // force one on them.
            }
        }

        self.connected_before = true;
        Ok(events)
    }

    /// The session disconnected. Persists the active keyring into the
    /// current context's directory and records the binding, then clears the
    /// current context. The active slot is kept; a persist failure leaves
    /// all in-memory state intact.
    pub fn leave_context(&mut self) -> Result<()> {
        self.save_active()?;
        if let Some(context) = self.current_context.take() {
            debug!("Left context '{}'", context);
        }
        Ok(())
    }

    /// The session is terminating; equivalent to a final leave
    pub fn exit_session(&mut self) -> Result<()> {
        self.leave_context()
    }

    /// Create a new, empty keyring and make it active.
    ///
    /// Requires a connected context. The name must not collide with any
    /// keyring file in the context's directory nor with the active keyring;
    /// a collision is rejected without touching any state. The previously
    /// active keyring is persisted before being replaced. The new keyring
    /// itself is not persisted until the next leave.
    pub fn create_keyring(&mut self, name: &str) -> Result<Vec<KeyringEvent>> {
        let context = self.require_context()?;
        let context_dir = self.context_dir(&context);

        if let Some(active) = &self.active {
            if KeyringStore::normalized_file_name(&active.name)
                == KeyringStore::normalized_file_name(name)
            {
                return Err(KeyringError::NameConflict {
                    name: name.to_string(),
                });
            }
        }
        ConflictResolver::ensure_available(&context_dir, name)?;

        self.save_active()?;

        debug!("Created keyring '{}' in context '{}'", name, context);
        self.active = Some(Wallet::new(name));
        Ok(vec![
            KeyringEvent::KeyringCreated {
                name: name.to_string(),
            },
            KeyringEvent::ActiveKeyringChanged {
                name: name.to_string(),
            },
        ])
    }

    /// Activate a keyring addressed by name or by explicit file path.
    ///
    /// Requires a connected context. A path target must belong to the
    /// current context's directory. The previously active keyring is
    /// persisted and bound first. A corrupted target is an error and changes
    /// nothing; recovery synthesis only happens on the enter-context restore
    /// path.
    pub fn use_keyring(&mut self, locator: &KeyringLocator) -> Result<Vec<KeyringEvent>> {
        let context = self.require_context()?;
        let context_dir = self.context_dir(&context);

        let path = locator.resolve(&context_dir)?;

        self.save_active()?;

        let wallet = KeyringStore::load(&path)?;
        let name = wallet.name.clone();
        self.active = Some(wallet);
        debug!("Activated keyring '{}' in context '{}'", name, context);
        Ok(vec![KeyringEvent::ActiveKeyringChanged { name }])
    }

    /// Rename the active keyring.
    ///
    /// Conflict-checked like creation. Purely in-memory; the next persist
    /// writes the new file name, and any file persisted under the old name
    /// is left behind (keyring files are never deleted).
    pub fn rename_keyring(&mut self, new_name: &str) -> Result<Vec<KeyringEvent>> {
        let context = self.require_context()?;
        let context_dir = self.context_dir(&context);

        if self.active.is_none() {
            return Err(KeyringError::NoActiveWallet);
        }
        ConflictResolver::ensure_available(&context_dir, new_name)?;

        if let Some(wallet) = self.active.as_mut() {
            debug!(
                "Renaming keyring '{}' to '{}' in context '{}'",
                wallet.name, new_name, context
            );
            wallet.name = new_name.to_string();
        }
        Ok(vec![KeyringEvent::ActiveKeyringChanged {
            name: new_name.to_string(),
        }])
    }

    /// Add one identifier to the active keyring. In-memory only; the next
    /// leave persists it.
    pub fn add_identifier(&mut self, identifier: Identifier) -> Result<()> {
        let wallet = self.active.as_mut().ok_or(KeyringError::NoActiveWallet)?;
        wallet.add_identifier(identifier);
        Ok(())
    }

    fn require_context(&self) -> Result<String> {
        self.current_context
            .clone()
            .ok_or(KeyringError::NotConnected)
    }

    /// Persist the active keyring into the current context's directory and
    /// record the binding. A no-op unless both a wallet and a context are
    /// present.
    fn save_active(&mut self) -> Result<()> {
        let (Some(wallet), Some(context)) = (&self.active, &self.current_context) else {
            return Ok(());
        };
        let context_dir = self.base_dir.join(context);
        let file_name = KeyringStore::persist(wallet, &context_dir)?;
        self.registry.bind(context, &file_name)?;
        Ok(())
    }

    /// Bring a fresh default-named keyring into the active slot, its name
    /// disambiguated against the files already present in `context_dir`.
    fn activate_fresh_default(&mut self, context_dir: &Path) -> Vec<KeyringEvent> {
        let name = ConflictResolver::disambiguate(context_dir, defaults::KEYRING_NAME);
        self.active = Some(Wallet::new(&name));
        vec![
            KeyringEvent::KeyringCreated { name: name.clone() },
            KeyringEvent::ActiveKeyringChanged { name },
        ]
    }
}
