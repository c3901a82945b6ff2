pub mod example;
pub mod generate;
pub mod init;
pub mod practice;
pub mod units;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use unitdrill_core::catalog::{load_catalog, UnitCatalog};
use unitdrill_core::generator::ProblemGenerator;

/// The catalog at `path`, or the built-in units when no path is given.
pub fn load_catalog_or_builtin(path: Option<&Path>) -> Result<UnitCatalog> {
    match path {
        Some(p) => load_catalog(p),
        None => Ok(UnitCatalog::builtin()),
    }
}

pub fn make_generator(catalog: UnitCatalog, seed: Option<u64>) -> ProblemGenerator {
    match seed {
        Some(seed) => ProblemGenerator::seeded(catalog, seed),
        None => ProblemGenerator::new(catalog),
    }
}
