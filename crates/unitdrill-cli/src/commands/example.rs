//! The `unitdrill example` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use unitdrill_core::catalog::UnitCatalog;
use unitdrill_core::explain::{parse_question, WorkedExample};
use unitdrill_core::generator::convert;
use unitdrill_core::session::PracticeSession;

use super::{load_catalog_or_builtin, make_generator};

pub fn execute(
    question: Option<String>,
    seed: Option<u64>,
    catalog_path: Option<PathBuf>,
) -> Result<()> {
    let catalog = load_catalog_or_builtin(catalog_path.as_deref())?;

    let example = match question {
        Some(text) => explain_question(&text, &catalog)?,
        None => PracticeSession::new(make_generator(catalog, seed)).show_example(),
    };

    println!("{example}");
    Ok(())
}

/// Work a conversion given as "Convert X unitA to unitB".
fn explain_question(text: &str, catalog: &UnitCatalog) -> Result<WorkedExample> {
    let parsed = parse_question(text)
        .with_context(|| format!("expected 'Convert <value> <unit> to <unit>', got '{text}'"))?;
    let value: f64 = parsed
        .value
        .parse()
        .with_context(|| format!("invalid value: '{}'", parsed.value))?;
    let group = catalog
        .find_pair(parsed.from_unit, parsed.to_unit)
        .with_context(|| {
            format!(
                "no unit group contains both '{}' and '{}'",
                parsed.from_unit, parsed.to_unit
            )
        })?;

    let problem = convert(group, parsed.from_unit, parsed.to_unit, value)?;
    Ok(WorkedExample::from_problem(&problem, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explains_given_question() {
        let example = explain_question("convert 3 ft to in", &UnitCatalog::builtin()).unwrap();
        assert_eq!(example.answer, 36.0);
        assert_eq!(example.question, "Convert 3 ft to in (English Length)");
        assert!(example.explanation.contains("Step 1: 3 ft × 12 = 36 in"));
    }

    #[test]
    fn rejects_units_from_different_groups() {
        let err = explain_question("Convert 2 km to lb", &UnitCatalog::builtin()).unwrap_err();
        assert!(err.to_string().contains("no unit group"));
    }

    #[test]
    fn rejects_same_unit() {
        let err = explain_question("Convert 2 km to km", &UnitCatalog::builtin()).unwrap_err();
        assert!(err.to_string().contains("to itself"));
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(explain_question("how far is a mile", &UnitCatalog::builtin()).is_err());
    }
}
