//! The `unitdrill units` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use unitdrill_core::generator::format_number;

use super::load_catalog_or_builtin;

pub fn execute(catalog_path: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog_or_builtin(catalog_path.as_deref())?;

    for group in catalog.groups() {
        let base = group
            .base_unit()
            .map(|u| u.name.as_str())
            .unwrap_or("?");

        let mut table = Table::new();
        table.set_header(vec!["Unit".to_string(), format!("In {base}")]);
        for unit in &group.units {
            let marker = if unit.is_base() { " (base)" } else { "" };
            table.add_row(vec![
                Cell::new(format!("{}{marker}", unit.name)),
                Cell::new(format_number(unit.to_base)),
            ]);
        }

        println!("{}\n{table}\n", group.name);
    }

    Ok(())
}
