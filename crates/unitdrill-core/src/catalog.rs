//! Unit catalogs: the built-in metric and English/US groups, plus TOML
//! catalog files and their validation.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::CatalogError;
use crate::model::{Unit, UnitGroup};

/// An ordered, validated collection of unit groups.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCatalog {
    groups: Vec<UnitGroup>,
}

impl UnitCatalog {
    /// Build a catalog, refusing groups that fail validation.
    pub fn new(groups: Vec<UnitGroup>) -> Result<Self, CatalogError> {
        if groups.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(w) = validate_groups(&groups).into_iter().next() {
            return Err(CatalogError::InvalidGroup {
                group: w.group.unwrap_or_default(),
                message: w.message,
            });
        }
        Ok(Self { groups })
    }

    /// The six groups the quiz ships with.
    pub fn builtin() -> Self {
        Self {
            groups: builtin_groups(),
        }
    }

    pub fn groups(&self) -> &[UnitGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&UnitGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// First group containing both unit names.
    pub fn find_pair(&self, from: &str, to: &str) -> Option<&UnitGroup> {
        self.groups.iter().find(|g| g.contains_pair(from, to))
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn metric_chain(name: &str, symbols: [&str; 7]) -> UnitGroup {
    const MULTIPLIERS: [f64; 7] = [0.001, 0.01, 0.1, 1.0, 10.0, 100.0, 1000.0];
    UnitGroup::new(
        name,
        symbols
            .iter()
            .zip(MULTIPLIERS)
            .map(|(s, m)| Unit::new(*s, m))
            .collect(),
    )
}

fn builtin_groups() -> Vec<UnitGroup> {
    vec![
        metric_chain("Metric Length", ["mm", "cm", "dm", "m", "dam", "hm", "km"]),
        metric_chain("Metric Mass", ["mg", "cg", "dg", "g", "dag", "hg", "kg"]),
        metric_chain("Metric Volume", ["mL", "cL", "dL", "L", "daL", "hL", "kL"]),
        // Inch-based: 1 ft = 12 in, 1 yd = 36 in, 1 mi = 63360 in
        UnitGroup::new(
            "English Length",
            vec![
                Unit::new("in", 1.0),
                Unit::new("ft", 12.0),
                Unit::new("yd", 36.0),
                Unit::new("mi", 63360.0),
            ],
        ),
        // Ounce-based: 1 lb = 16 oz, 1 ton = 2000 lb
        UnitGroup::new(
            "English Weight",
            vec![
                Unit::new("oz", 1.0),
                Unit::new("lb", 16.0),
                Unit::new("ton", 32000.0),
            ],
        ),
        // Teaspoon-based US customary volume
        UnitGroup::new(
            "English Volume",
            vec![
                Unit::new("tsp", 1.0),
                Unit::new("tbsp", 3.0),
                Unit::new("fl oz", 6.0),
                Unit::new("c", 48.0),
                Unit::new("pt", 96.0),
                Unit::new("qt", 192.0),
                Unit::new("gal", 768.0),
            ],
        ),
    ]
}

// ---------------------------------------------------------------------------
// TOML catalog files
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    groups: Vec<TomlGroup>,
}

#[derive(Debug, Deserialize)]
struct TomlGroup {
    name: String,
    #[serde(default)]
    units: Vec<TomlUnit>,
}

#[derive(Debug, Deserialize)]
struct TomlUnit {
    name: String,
    to_base: f64,
}

/// Parse a single TOML catalog file into unit groups (unvalidated).
pub fn parse_catalog(path: &Path) -> Result<Vec<UnitGroup>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into unit groups (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Vec<UnitGroup>> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(parsed
        .groups
        .into_iter()
        .map(|g| {
            UnitGroup::new(
                g.name,
                g.units
                    .into_iter()
                    .map(|u| Unit::new(u.name, u.to_base))
                    .collect(),
            )
        })
        .collect())
}

/// Recursively load all `.toml` catalog files from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<UnitGroup>> {
    let mut groups = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            groups.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(parsed) => groups.extend(parsed),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(groups)
}

/// Load a catalog from a file or directory and validate it.
pub fn load_catalog(path: &Path) -> Result<UnitCatalog> {
    let groups = if path.is_dir() {
        load_catalog_directory(path)?
    } else {
        parse_catalog(path)?
    };
    UnitCatalog::new(groups).with_context(|| format!("invalid catalog: {}", path.display()))
}

/// Largest allowed ratio between two multipliers in one group. Beyond this,
/// answers lose their third decimal.
pub const MAX_MULTIPLIER_RATIO: f64 = 1e9;

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The group name (if applicable).
    pub group: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate unit groups for problems that would break conversion.
pub fn validate_groups(groups: &[UnitGroup]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_groups = HashSet::new();
    for group in groups {
        if !seen_groups.insert(group.name.as_str()) {
            warnings.push(ValidationWarning {
                group: Some(group.name.clone()),
                message: format!("duplicate group name: {}", group.name),
            });
        }
    }

    for group in groups {
        let warn = |message: String| ValidationWarning {
            group: Some(group.name.clone()),
            message,
        };

        if group.units.len() < 2 {
            warnings.push(warn(format!(
                "needs at least two units, found {}",
                group.units.len()
            )));
        }

        let base_count = group.units.iter().filter(|u| u.is_base()).count();
        match base_count {
            0 => warnings.push(warn("no base unit (to_base = 1)".into())),
            1 => {}
            n => warnings.push(warn(format!("{n} base units, expected exactly one"))),
        }

        for unit in &group.units {
            if !unit.to_base.is_finite() || unit.to_base <= 0.0 {
                warnings.push(warn(format!(
                    "unit '{}' has non-positive multiplier {}",
                    unit.name, unit.to_base
                )));
            }
        }

        let multipliers = group
            .units
            .iter()
            .map(|u| u.to_base)
            .filter(|m| m.is_finite() && *m > 0.0);
        let largest = multipliers.clone().fold(f64::MIN, f64::max);
        let smallest = multipliers.fold(f64::MAX, f64::min);
        if largest > 0.0 && largest / smallest > MAX_MULTIPLIER_RATIO {
            warnings.push(warn(format!(
                "multiplier range {smallest} to {largest} exceeds ratio {MAX_MULTIPLIER_RATIO:e}"
            )));
        }

        let mut seen_units = HashSet::new();
        for unit in &group.units {
            if !seen_units.insert(unit.name.as_str()) {
                warnings.push(warn(format!("duplicate unit name: {}", unit.name)));
            }
        }
    }

    warnings
}
