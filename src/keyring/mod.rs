//! Keyring lifecycle management
//!
//! Keyrings (wallets of identity identifiers) are scoped to connection
//! contexts. The `ContextManager` persists the active keyring when the
//! session leaves a context and restores the right one when it returns,
//! backed by the file store, the binding registry and the name conflict
//! resolver in this module.

mod commands;
mod conflict;
mod events;
mod manager;
mod models;
mod registry;
mod resolve;
mod store;

pub use commands::{run_contexts_command, run_keyrings_command, run_show_command};
pub use conflict::ConflictResolver;
pub use events::KeyringEvent;
pub use manager::ContextManager;
pub use models::{Identifier, Wallet};
pub use registry::ContextRegistry;
pub use resolve::KeyringLocator;
pub use store::KeyringStore;
