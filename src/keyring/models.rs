//! Keyring data models

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identity record held by a wallet.
///
/// The contents come from the key-generation layer; this subsystem only
/// tracks membership and count.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Identifier(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named container of identity identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Display name; unique per operator, case-insensitively
    pub name: String,
    /// Identifier membership; a BTreeSet keeps serialization deterministic
    #[serde(default)]
    pub identifiers: BTreeSet<Identifier>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    /// Create an empty wallet with the given display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifiers: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Add one identifier. Returns false if it was already present.
    pub fn add_identifier(&mut self, identifier: Identifier) -> bool {
        self.identifiers.insert(identifier)
    }

    pub fn identifier_count(&self) -> usize {
        self.identifiers.len()
    }
}
