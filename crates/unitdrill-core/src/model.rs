//! Core data model types for unitdrill.
//!
//! Units, unit groups, generated problems, and the records a practice
//! session keeps about answered questions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single unit of measure within a [`UnitGroup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Short unit name as shown to the player (e.g. "km", "fl oz").
    pub name: String,
    /// Multiplier converting one of this unit into the group's base unit.
    pub to_base: f64,
}

impl Unit {
    pub fn new(name: impl Into<String>, to_base: f64) -> Self {
        Self {
            name: name.into(),
            to_base,
        }
    }

    /// Returns `true` if this is the group's pivot unit.
    pub fn is_base(&self) -> bool {
        self.to_base == 1.0
    }
}

/// A set of units convertible to one another through a shared base unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitGroup {
    /// Human-readable group name (e.g. "Metric Length").
    pub name: String,
    /// Units ordered from smallest to largest.
    pub units: Vec<Unit>,
}

impl UnitGroup {
    pub fn new(name: impl Into<String>, units: Vec<Unit>) -> Self {
        Self {
            name: name.into(),
            units,
        }
    }

    /// The unit with multiplier 1, if the group has exactly one.
    pub fn base_unit(&self) -> Option<&Unit> {
        let mut bases = self.units.iter().filter(|u| u.is_base());
        match (bases.next(), bases.next()) {
            (Some(base), None) => Some(base),
            _ => None,
        }
    }

    /// Look up a unit by name.
    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.name == name)
    }

    /// Returns `true` if both unit names belong to this group.
    pub fn contains_pair(&self, from: &str, to: &str) -> bool {
        self.unit(from).is_some() && self.unit(to).is_some()
    }
}

impl fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A generated conversion problem.
///
/// Carries both the rendered question text and the structured values it
/// was rendered from, so nothing downstream has to parse the text back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Rendered question, e.g. "Convert 3 ft to in (English Length)".
    pub question: String,
    /// Correct answer rounded to three decimals.
    pub answer: f64,
    /// Magnitude in the from-unit.
    pub value: f64,
    /// Source unit name.
    pub from_unit: String,
    /// Target unit name.
    pub to_unit: String,
    /// Name of the unit group both units belong to.
    pub group: String,
}

impl Problem {
    /// Returns `true` if the other problem converts between the same units.
    pub fn same_units(&self, other: &Problem) -> bool {
        self.from_unit == other.from_unit && self.to_unit == other.to_unit
    }
}

/// A problem presented with its shuffled multiple-choice options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub problem: Problem,
    /// The correct answer and the distractors in display order.
    pub options: Vec<f64>,
}

impl Question {
    /// Option value for a 1-based choice number.
    pub fn option(&self, choice: usize) -> Option<f64> {
        choice
            .checked_sub(1)
            .and_then(|idx| self.options.get(idx))
            .copied()
    }
}

/// One answered question, as shown in the end-of-session summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolvedProblem {
    pub question: String,
    /// The value that was converted. The unit fields are empty in reports
    /// written before they were recorded.
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub from_unit: String,
    #[serde(default)]
    pub to_unit: String,
    /// Unit group the question was drawn from.
    #[serde(default)]
    pub group: String,
    /// The true answer.
    pub correct: f64,
    /// The value the player chose.
    pub chosen: f64,
    pub is_correct: bool,
}

impl SolvedProblem {
    /// Whether the value and units were recorded with the answer.
    pub fn has_units(&self) -> bool {
        !self.from_unit.is_empty() && !self.to_unit.is_empty()
    }

    /// ✅ or ❌ for display.
    pub fn mark(&self) -> &'static str {
        if self.is_correct {
            "✅"
        } else {
            "❌"
        }
    }
}
