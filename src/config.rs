/// Configuration constants for keyring file storage
pub mod files {
    /// Extension carried by every persisted keyring file
    pub const KEYRING_EXTENSION: &str = "wallet";

    /// File holding the context-to-keyring bindings, stored in the base directory
    pub const BINDINGS_FILE: &str = "bindings.json";

    /// Directory under the user's home directory holding all keyringctl state
    pub const DIR_NAME: &str = ".keyringctl";

    /// Subdirectory of DIR_NAME with the per-context keyring directories
    pub const KEYRINGS_DIR: &str = "keyrings";
}

/// Default values for the CLI and the lifecycle manager
pub mod defaults {
    /// Name given to the keyring created on a session's first connect
    pub const KEYRING_NAME: &str = "Default";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}

/// Environment variable names
pub mod env {
    /// Overrides the keyring storage base directory
    pub const HOME_VAR: &str = "KEYRINGCTL_HOME";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyring_extension_has_no_dot() {
        assert!(!files::KEYRING_EXTENSION.starts_with('.'));
    }

    #[test]
    fn test_bindings_file_is_json() {
        assert!(files::BINDINGS_FILE.ends_with(".json"));
    }

    #[test]
    fn test_default_keyring_name() {
        assert_eq!(defaults::KEYRING_NAME, "Default");
    }
}
