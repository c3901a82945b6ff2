//! The `unitdrill generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use unitdrill_core::model::Question;

use super::practice::format_question;
use super::{load_catalog_or_builtin, make_generator};

pub fn execute(
    count: usize,
    seed: Option<u64>,
    catalog_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let catalog = load_catalog_or_builtin(catalog_path.as_deref())?;
    let mut generator = make_generator(catalog, seed);
    let questions: Vec<Question> = (0..count).map(|_| generator.next_question()).collect();

    match format.as_str() {
        "text" => {
            for (i, q) in questions.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", format_question(q));
            }
        }
        "json" => {
            let json =
                serde_json::to_string_pretty(&questions).context("failed to serialize problems")?;
            println!("{json}");
        }
        other => anyhow::bail!("unknown format: '{other}' (expected text or json)"),
    }

    Ok(())
}
