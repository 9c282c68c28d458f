//! Keyring file I/O
//!
//! Every filesystem mutation touching keyring files is confined to this
//! module. A persisted keyring is a single line of wallet JSON followed by a
//! terminator line carrying an MD5 checksum of the payload; the checksum is
//! verified before the payload is deserialized.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use md5::{Digest, Md5};

use crate::config::files;
use crate::error::{KeyringError, Result};

use super::models::Wallet;

/// Prefix of the terminator line closing every keyring file
const MARKER_PREFIX: &str = "md5:";

/// Filesystem-backed persistence for keyrings
pub struct KeyringStore;

impl KeyringStore {
    /// Derive the on-disk file name for a keyring name.
    /// Lower-cases, strips whitespace and appends the fixed extension:
    /// "My Vault" -> "myvault.wallet".
    pub fn normalized_file_name(raw_name: &str) -> String {
        let compact: String = raw_name.split_whitespace().collect();
        format!("{}.{}", compact.to_lowercase(), files::KEYRING_EXTENSION)
    }

    /// Recover the display key-name from a keyring file name by stripping
    /// the extension: "myvault.wallet" -> "myvault".
    pub fn key_name(file_name: &str) -> String {
        let suffix = format!(".{}", files::KEYRING_EXTENSION);
        file_name
            .strip_suffix(suffix.as_str())
            .unwrap_or(file_name)
            .to_string()
    }

    /// Full path of the keyring file for a name inside a context directory
    pub fn file_path(context_dir: &Path, raw_name: &str) -> PathBuf {
        context_dir.join(Self::normalized_file_name(raw_name))
    }

    pub fn exists(path: &Path) -> bool {
        path.is_file()
    }

    /// Serialize the wallet into its file under `context_dir`.
    ///
    /// Writes to a temp file and renames over the target, so a crash can
    /// never leave a half-written keyring behind. Returns the file name
    /// written.
    pub fn persist(wallet: &Wallet, context_dir: &Path) -> Result<String> {
        fs::create_dir_all(context_dir).map_err(|e| KeyringError::Storage {
            path: context_dir.to_path_buf(),
            source: e,
        })?;

        let file_name = Self::normalized_file_name(&wallet.name);
        let target = context_dir.join(&file_name);

        let payload = serde_json::to_string(wallet)?;
        let content = format!("{}\n{}{}\n", payload, MARKER_PREFIX, checksum(&payload));

        let tmp_path = target.with_extension(format!("{}.tmp", files::KEYRING_EXTENSION));
        fs::write(&tmp_path, &content).map_err(|e| KeyringError::Storage {
            path: tmp_path.clone(),
            source: e,
        })?;

        // Keyrings hold identity material; owner-only access
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp_path, permissions).map_err(|e| KeyringError::Storage {
                path: tmp_path.clone(),
                source: e,
            })?;
        }

        fs::rename(&tmp_path, &target).map_err(|e| KeyringError::Storage {
            path: target.clone(),
            source: e,
        })?;

        debug!(
            "Persisted keyring '{}' ({} identifiers) to {}",
            wallet.name,
            wallet.identifier_count(),
            target.display()
        );
        Ok(file_name)
    }

    /// Deserialize a wallet from a keyring file.
    ///
    /// Fails with `CorruptedKeyring` when the terminator line is missing or
    /// mangled, the checksum does not match, anything trails the terminator,
    /// or the payload itself does not parse. Never partially loads.
    pub fn load(path: &Path) -> Result<Wallet> {
        let content = fs::read_to_string(path).map_err(|e| KeyringError::Storage {
            path: path.to_path_buf(),
            source: e,
        })?;

        let corrupted = || KeyringError::CorruptedKeyring {
            path: path.to_path_buf(),
        };

        let mut lines = content.lines();
        let payload = lines.next().ok_or_else(corrupted)?;
        let marker = lines.next().ok_or_else(corrupted)?;
        if lines.next().is_some() {
            return Err(corrupted());
        }

        let expected = marker.strip_prefix(MARKER_PREFIX).ok_or_else(corrupted)?;
        if expected != checksum(payload) {
            return Err(corrupted());
        }

        let wallet: Wallet = serde_json::from_str(payload).map_err(|_| corrupted())?;
        debug!(
            "Loaded keyring '{}' ({} identifiers) from {}",
            wallet.name,
            wallet.identifier_count(),
            path.display()
        );
        Ok(wallet)
    }

    /// Sorted names of all keyring files in a context directory.
    /// A missing directory yields an empty list.
    pub fn list_keyring_files(context_dir: &Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(context_dir) else {
            return Vec::new();
        };

        let suffix = format!(".{}", files::KEYRING_EXTENSION);
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(suffix.as_str()))
            .collect();
        names.sort();
        names
    }
}

/// Hex MD5 digest of the payload line
fn checksum(payload: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(payload.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyring::models::Identifier;
    use std::fs::OpenOptions;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_wallet() -> Wallet {
        let mut wallet = Wallet::new("Default");
        wallet.add_identifier(Identifier::new("did:sov:abc"));
        wallet
    }

    #[test]
    fn test_normalized_file_name() {
        assert_eq!(KeyringStore::normalized_file_name("test"), "test.wallet");
        assert_eq!(KeyringStore::normalized_file_name("Default"), "default.wallet");
        assert_eq!(KeyringStore::normalized_file_name("MyVault"), "myvault.wallet");
        assert_eq!(KeyringStore::normalized_file_name("My Vault"), "myvault.wallet");
    }

    #[test]
    fn test_key_name_strips_extension() {
        assert_eq!(KeyringStore::key_name("test.wallet"), "test");
        assert_eq!(KeyringStore::key_name("default.wallet"), "default");
        assert_eq!(KeyringStore::key_name("myvault.wallet"), "myvault");
    }

    #[test]
    fn test_key_name_inverts_normalization() {
        let file_name = KeyringStore::normalized_file_name("MyVault");
        assert_eq!(KeyringStore::key_name(&file_name), "myvault");
    }

    #[test]
    fn test_persist_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let wallet = sample_wallet();

        let file_name = KeyringStore::persist(&wallet, dir.path()).unwrap();
        assert_eq!(file_name, "default.wallet");

        let loaded = KeyringStore::load(&dir.path().join(&file_name)).unwrap();
        assert_eq!(loaded, wallet);
    }

    #[test]
    fn test_persist_creates_context_dir() {
        let dir = TempDir::new().unwrap();
        let context_dir = dir.path().join("pool1");
        let wallet = sample_wallet();

        KeyringStore::persist(&wallet, &context_dir).unwrap();
        assert!(context_dir.join("default.wallet").is_file());
    }

    #[test]
    fn test_persist_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let mut wallet = sample_wallet();
        KeyringStore::persist(&wallet, dir.path()).unwrap();

        wallet.add_identifier(Identifier::new("did:sov:def"));
        KeyringStore::persist(&wallet, dir.path()).unwrap();

        let loaded = KeyringStore::load(&dir.path().join("default.wallet")).unwrap();
        assert_eq!(loaded.identifier_count(), 2);
    }

    #[test]
    fn test_persist_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        KeyringStore::persist(&sample_wallet(), dir.path()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_persist_sets_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file_name = KeyringStore::persist(&sample_wallet(), dir.path()).unwrap();

        let metadata = fs::metadata(dir.path().join(file_name)).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn test_load_rejects_appended_garbage() {
        let dir = TempDir::new().unwrap();
        let file_name = KeyringStore::persist(&sample_wallet(), dir.path()).unwrap();
        let path = dir.path().join(file_name);

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        write!(file, "appended text to corrupt wallet file").unwrap();
        drop(file);

        match KeyringStore::load(&path) {
            Err(KeyringError::CorruptedKeyring { path: p }) => assert_eq!(p, path),
            other => panic!("Expected CorruptedKeyring, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_truncated_file() {
        let dir = TempDir::new().unwrap();
        let file_name = KeyringStore::persist(&sample_wallet(), dir.path()).unwrap();
        let path = dir.path().join(file_name);

        let content = fs::read_to_string(&path).unwrap();
        fs::write(&path, &content[..content.len() / 2]).unwrap();

        assert!(matches!(
            KeyringStore::load(&path),
            Err(KeyringError::CorruptedKeyring { .. })
        ));
    }

    #[test]
    fn test_load_rejects_tampered_payload() {
        let dir = TempDir::new().unwrap();
        let file_name = KeyringStore::persist(&sample_wallet(), dir.path()).unwrap();
        let path = dir.path().join(file_name);

        let content = fs::read_to_string(&path).unwrap();
        let tampered = content.replacen("Default", "Tampered", 1);
        fs::write(&path, tampered).unwrap();

        assert!(matches!(
            KeyringStore::load(&path),
            Err(KeyringError::CorruptedKeyring { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let result = KeyringStore::load(&dir.path().join("nope.wallet"));
        assert!(matches!(result, Err(KeyringError::Storage { .. })));
    }

    #[test]
    fn test_corruption_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let file_name = KeyringStore::persist(&sample_wallet(), dir.path()).unwrap();
        let path = dir.path().join(file_name);

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        write!(file, "garbage").unwrap();
        drop(file);

        let before = fs::read(&path).unwrap();
        let _ = KeyringStore::load(&path);
        let after = fs::read(&path).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_list_keyring_files_sorted() {
        let dir = TempDir::new().unwrap();
        let mut b = Wallet::new("beta");
        b.add_identifier(Identifier::new("did:sov:b"));
        KeyringStore::persist(&b, dir.path()).unwrap();
        KeyringStore::persist(&Wallet::new("alpha"), dir.path()).unwrap();

        assert_eq!(
            KeyringStore::list_keyring_files(dir.path()),
            vec!["alpha.wallet".to_string(), "beta.wallet".to_string()]
        );
    }

    #[test]
    fn test_list_keyring_files_ignores_other_files() {
        let dir = TempDir::new().unwrap();
        KeyringStore::persist(&Wallet::new("alpha"), dir.path()).unwrap();
        fs::write(dir.path().join("bindings.json"), "{}").unwrap();
        fs::write(dir.path().join("alpha.wallet.tmp"), "x").unwrap();

        assert_eq!(
            KeyringStore::list_keyring_files(dir.path()),
            vec!["alpha.wallet".to_string()]
        );
    }

    #[test]
    fn test_list_keyring_files_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(KeyringStore::list_keyring_files(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_exists() {
        let dir = TempDir::new().unwrap();
        let file_name = KeyringStore::persist(&sample_wallet(), dir.path()).unwrap();
        assert!(KeyringStore::exists(&dir.path().join(file_name)));
        assert!(!KeyringStore::exists(&dir.path().join("other.wallet")));
    }
}
