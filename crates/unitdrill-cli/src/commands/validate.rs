//! The `unitdrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use unitdrill_core::catalog::{load_catalog_directory, parse_catalog, validate_groups};

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let groups = if catalog_path.is_dir() {
        load_catalog_directory(&catalog_path)?
    } else {
        parse_catalog(&catalog_path)?
    };

    for group in &groups {
        println!("Group: {} ({} units)", group.name, group.units.len());
    }

    let warnings = validate_groups(&groups);
    for w in &warnings {
        let prefix = w
            .group
            .as_ref()
            .map(|g| format!("  [{g}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if groups.is_empty() {
        println!("No unit groups found.");
    } else if warnings.is_empty() {
        println!("All catalogs valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
