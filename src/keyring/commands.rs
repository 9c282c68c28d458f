//! Inspection command handlers
//!
//! Read-only commands over the on-disk keyring store, for operators poking
//! at what the lifecycle manager persisted -- including corrupted files
//! left behind for inspection.

use std::fs;
use std::path::Path;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::error::KeyringError;

use super::registry::ContextRegistry;
use super::store::KeyringStore;

/// List keyrings on disk, across all contexts or a single one
pub fn run_keyrings_command(
    base_dir: &Path,
    context: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ContextRegistry::open(base_dir)?;
    let contexts = match context {
        Some(name) => vec![name.to_string()],
        None => list_context_dirs(base_dir),
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("BOUND"),
            Cell::new("CONTEXT"),
            Cell::new("KEYRING"),
            Cell::new("IDENTIFIERS"),
            Cell::new("STATUS"),
        ]);

    let mut rows = 0;
    for context_name in &contexts {
        let context_dir = base_dir.join(context_name);
        for file_name in KeyringStore::list_keyring_files(&context_dir) {
            let bound_marker = if registry.bound_file(context_name) == Some(file_name.as_str()) {
                "*"
            } else {
                ""
            };

            let (display_name, identifiers, status) =
                match KeyringStore::load(&context_dir.join(&file_name)) {
                    Ok(wallet) => (
                        wallet.name.clone(),
                        wallet.identifier_count().to_string(),
                        "ok".to_string(),
                    ),
                    Err(KeyringError::CorruptedKeyring { .. }) => (
                        KeyringStore::key_name(&file_name),
                        "-".to_string(),
                        "corrupted".to_string(),
                    ),
                    Err(e) => (
                        KeyringStore::key_name(&file_name),
                        "-".to_string(),
                        e.to_string(),
                    ),
                };

            table.add_row(vec![
                Cell::new(bound_marker),
                Cell::new(context_name),
                Cell::new(display_name),
                Cell::new(identifiers),
                Cell::new(status),
            ]);
            rows += 1;
        }
    }

    if rows == 0 {
        println!("No keyrings found.");
        println!("\nKeyrings appear here once a session persists one.");
        return Ok(());
    }

    println!("{table}");
    Ok(())
}

/// List recorded context-to-keyring bindings
pub fn run_contexts_command(base_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ContextRegistry::open(base_dir)?;

    if registry.bindings().next().is_none() {
        println!("No context bindings recorded.");
        println!("\nA binding is recorded when a session saves a keyring on leaving a context.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("CONTEXT"),
            Cell::new("BOUND KEYRING"),
            Cell::new("FILE"),
        ]);

    for (context, file_name) in registry.bindings() {
        table.add_row(vec![
            Cell::new(context),
            Cell::new(KeyringStore::key_name(file_name)),
            Cell::new(file_name),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Show one keyring's details
pub fn run_show_command(
    base_dir: &Path,
    context: &str,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let context_dir = base_dir.join(context);
    let path = KeyringStore::file_path(&context_dir, name);

    if !KeyringStore::exists(&path) {
        return Err(KeyringError::KeyringNotFound {
            name: name.to_string(),
        }
        .into());
    }

    let wallet = KeyringStore::load(&path)?;

    println!("Keyring: {}", wallet.name);
    println!("  Context:     {}", context);
    println!("  File:        {}", path.display());
    println!("  Created:     {}", wallet.created_at);
    println!("  Identifiers: {}", wallet.identifier_count());
    for identifier in &wallet.identifiers {
        println!("    {}", identifier);
    }

    Ok(())
}

/// Sorted names of the per-context directories under the base directory.
/// A missing base directory yields an empty list.
fn list_context_dirs(base_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(base_dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}
