//! Transition notifications
//!
//! Lifecycle transitions return these for the surrounding CLI to format.
//! `Display` renders the canonical user-facing wording.

use std::fmt;
use std::path::PathBuf;

/// Structured notification emitted by a keyring lifecycle transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyringEvent {
    /// A new keyring came into existence
    KeyringCreated { name: String },
    /// The active-keyring slot now holds this keyring
    ActiveKeyringChanged { name: String },
    /// A persisted keyring was loaded back into the active slot
    KeyringRestored {
        name: String,
        identifier_count: usize,
    },
    /// Restoring the bound keyring failed; the file is left for inspection
    KeyringRestoreFailed { path: PathBuf },
}

impl fmt::Display for KeyringEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyringEvent::KeyringCreated { name } => {
                write!(f, "New keyring {} created", name)
            }
            KeyringEvent::ActiveKeyringChanged { name } => {
                write!(f, "Active keyring set to \"{}\"", name)
            }
            KeyringEvent::KeyringRestored { name, .. } => {
                write!(f, "Saved keyring \"{}\" restored", name)
            }
            KeyringEvent::KeyringRestoreFailed { path } => {
                write!(
                    f,
                    "error occurred while restoring wallet from {}",
                    path.display()
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_display() {
        let event = KeyringEvent::KeyringCreated {
            name: "Default".to_string(),
        };
        assert_eq!(event.to_string(), "New keyring Default created");
    }

    #[test]
    fn test_active_changed_display() {
        let event = KeyringEvent::ActiveKeyringChanged {
            name: "mykr0".to_string(),
        };
        assert_eq!(event.to_string(), "Active keyring set to \"mykr0\"");
    }

    #[test]
    fn test_restored_display() {
        let event = KeyringEvent::KeyringRestored {
            name: "Default".to_string(),
            identifier_count: 2,
        };
        assert_eq!(event.to_string(), "Saved keyring \"Default\" restored");
    }

    #[test]
    fn test_restore_failed_display() {
        let event = KeyringEvent::KeyringRestoreFailed {
            path: PathBuf::from("/keyrings/pool1/default.wallet"),
        };
        let msg = event.to_string();
        assert!(msg.contains("error occurred while restoring wallet"));
        assert!(msg.contains("default.wallet"));
    }
}
