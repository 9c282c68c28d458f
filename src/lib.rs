//! keyringctl - Context-bound keyring management
//!
//! A keyring (wallet) is a named container of identity identifiers, scoped
//! to the connection context (network/pool environment) it was used in.
//! This crate keeps the active keyring persisted across context switches
//! and process restarts: leaving a context saves the active keyring to that
//! context's directory, entering a context restores whatever was bound to
//! it, and corrupted files are quarantined rather than overwritten.
//!
//! # Example
//!
//! ```no_run
//! use keyringctl::{ContextManager, Identifier};
//!
//! # fn main() -> keyringctl::Result<()> {
//! let mut manager = ContextManager::open(ContextManager::default_base_dir())?;
//!
//! // The session layer reports a successful connection
//! for event in manager.enter_context("pool1")? {
//!     println!("{event}");
//! }
//!
//! // The key-generation layer produced a new identifier
//! manager.add_identifier(Identifier::new("did:sov:abc"))?;
//!
//! // Switching environments persists pool1's keyring first
//! manager.enter_context("pool2")?;
//! manager.exit_session()?;
//! # Ok(())
//! # }
//! ```
//!
//! The `keyringctl` binary offers read-only inspection of the on-disk
//! store:
//!
//! ```bash
//! # List every keyring in every context
//! keyringctl get keyrings
//!
//! # List which keyring is bound to which context
//! keyringctl get contexts
//!
//! # Show one keyring
//! keyringctl show Default --context pool1
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod keyring;

pub use cli::{Cli, Command, GetResource, KeyringsArgs, ShowArgs};
pub use error::{KeyringError, Result};
pub use keyring::{
    run_contexts_command, run_keyrings_command, run_show_command, ConflictResolver,
    ContextManager, ContextRegistry, Identifier, KeyringEvent, KeyringLocator, KeyringStore,
    Wallet,
};
