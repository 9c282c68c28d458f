use std::fmt;
use std::path::PathBuf;

/// Custom error type for keyring operations
#[derive(Debug)]
pub enum KeyringError {
    /// Integrity marker missing or invalid on load
    CorruptedKeyring { path: PathBuf },
    /// Requested keyring name is already taken
    NameConflict { name: String },
    /// Explicit keyring file path belongs to a different context
    WrongContext { path: PathBuf, expected: String },
    /// Mutation requested while no keyring is active
    NoActiveWallet,
    /// No keyring file exists for the given name in the current context
    KeyringNotFound { name: String },
    /// Operation requires a connected context
    NotConnected,
    /// Filesystem failure while reading or writing a keyring file
    Storage { path: PathBuf, source: std::io::Error },
    /// Bindings registry could not be read, parsed or written
    Registry(String),
    /// Serialization error
    Json(String),
}

impl fmt::Display for KeyringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyringError::CorruptedKeyring { path } => {
                write!(f, "Keyring file ({}) is corrupted", path.display())
            }
            KeyringError::NameConflict { name } => {
                write!(
                    f,
                    "\"{}\" conflicts with an existing keyring. Please choose a new name.",
                    name
                )
            }
            KeyringError::WrongContext { path, expected } => {
                write!(
                    f,
                    "Given wallet file ({}) doesn't belong to current context. \
                     Please connect to '{}' environment and try again.",
                    path.display(),
                    expected
                )
            }
            KeyringError::NoActiveWallet => {
                write!(f, "No keyring is active")
            }
            KeyringError::KeyringNotFound { name } => {
                write!(f, "No keyring named \"{}\" found in the current context", name)
            }
            KeyringError::NotConnected => {
                write!(f, "Not connected to any environment. Please connect first.")
            }
            KeyringError::Storage { path, source } => {
                write!(f, "Failed to access {}: {}", path.display(), source)
            }
            KeyringError::Registry(msg) => write!(f, "Bindings registry error: {}", msg),
            KeyringError::Json(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for KeyringError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KeyringError::Storage { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for KeyringError {
    fn from(err: serde_json::Error) -> Self {
        KeyringError::Json(err.to_string())
    }
}

/// Result type alias for keyring operations
pub type Result<T> = std::result::Result<T, KeyringError>;
