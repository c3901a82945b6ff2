//! Randomized conversion problem generation.
//!
//! Picks a group, two distinct units inside it, and a human-scale magnitude,
//! then computes the exact answer rounded to three decimals.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::UnitCatalog;
use crate::distractors::{build_options, DISTRACTOR_COUNT};
use crate::error::CatalogError;
use crate::model::{Problem, Question, Unit, UnitGroup};

/// Decimal places every answer is rounded to.
pub const ANSWER_DECIMALS: i32 = 3;

/// Round `n` to `decimals` places, halves away from zero.
pub fn round_to(n: f64, decimals: i32) -> f64 {
    let p = 10f64.powi(decimals);
    let scaled = n * p;
    if !scaled.is_finite() {
        return n;
    }
    scaled.round() / p
}

/// Round to the answer precision.
pub fn round_answer(n: f64) -> f64 {
    round_to(n, ANSWER_DECIMALS)
}

/// Render a number for display: integers without a decimal point, anything
/// else with at most three decimals and no trailing zeros.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let s = if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        let fixed = format!("{n:.3}");
        fixed
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// Magnitude range `[low, high)` for a from-unit with the given multiplier.
///
/// Large units get small magnitudes and tiny units get large ones so the
/// answers stay human-scale.
pub fn magnitude_range(to_base: f64) -> (f64, f64) {
    if to_base >= 1000.0 {
        (1.0, 51.0)
    } else if to_base <= 0.001 {
        (10.0, 510.0)
    } else {
        (1.0, 201.0)
    }
}

fn pick_magnitude<R: Rng + ?Sized>(to_base: f64, rng: &mut R) -> f64 {
    let (low, high) = magnitude_range(to_base);
    round_to(rng.random::<f64>() * (high - low) + low, ANSWER_DECIMALS)
}

fn render_problem(group: &UnitGroup, from: &Unit, to: &Unit, value: f64) -> Problem {
    let answer = round_answer(value * from.to_base / to.to_base);
    Problem {
        question: format!(
            "Convert {} {} to {} ({})",
            format_number(value),
            from.name,
            to.name,
            group.name
        ),
        answer,
        value,
        from_unit: from.name.clone(),
        to_unit: to.name.clone(),
        group: group.name.clone(),
    }
}

/// Build the problem for a fixed group, unit pair, and magnitude.
pub fn convert(group: &UnitGroup, from: &str, to: &str, value: f64) -> Result<Problem, CatalogError> {
    if from == to {
        return Err(CatalogError::SameUnit(from.to_string()));
    }
    let lookup = |name: &str| {
        group.unit(name).ok_or_else(|| CatalogError::UnknownUnit {
            group: group.name.clone(),
            unit: name.to_string(),
        })
    };
    let from_unit = lookup(from)?;
    let to_unit = lookup(to)?;
    Ok(render_problem(group, from_unit, to_unit, value))
}

/// Produces random problems from a unit catalog.
pub struct ProblemGenerator {
    catalog: UnitCatalog,
    rng: StdRng,
}

impl ProblemGenerator {
    /// A generator seeded from the operating system.
    pub fn new(catalog: UnitCatalog) -> Self {
        Self {
            catalog,
            rng: StdRng::from_os_rng(),
        }
    }

    /// A generator with a reproducible sequence.
    pub fn seeded(catalog: UnitCatalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    /// Generate one random problem.
    pub fn generate(&mut self) -> Problem {
        let groups = self.catalog.groups();
        let group = &groups[self.rng.random_range(0..groups.len())];

        let unit_count = group.units.len();
        let from_idx = self.rng.random_range(0..unit_count);
        let mut to_idx = self.rng.random_range(0..unit_count);
        while to_idx == from_idx {
            to_idx = self.rng.random_range(0..unit_count);
        }

        let from = &group.units[from_idx];
        let to = &group.units[to_idx];
        let value = pick_magnitude(from.to_base, &mut self.rng);

        let problem = render_problem(group, from, to, value);
        tracing::debug!(question = %problem.question, answer = problem.answer, "generated problem");
        problem
    }

    /// Generate a problem together with its shuffled multiple-choice options.
    pub fn next_question(&mut self) -> Question {
        let problem = self.generate();
        let options = build_options(problem.answer, DISTRACTOR_COUNT, &mut self.rng);
        Question { problem, options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_group(name: &str) -> UnitGroup {
        UnitCatalog::builtin().group(name).unwrap().clone()
    }

    #[test]
    fn meters_to_kilometers() {
        let problem = convert(&builtin_group("Metric Length"), "m", "km", 1500.0).unwrap();
        assert_eq!(problem.answer, 1.5);
        assert_eq!(problem.question, "Convert 1500 m to km (Metric Length)");
    }

    #[test]
    fn feet_to_inches() {
        let problem = convert(&builtin_group("English Length"), "ft", "in", 3.0).unwrap();
        assert_eq!(problem.answer, 36.0);
        assert_eq!(problem.group, "English Length");
    }

    #[test]
    fn convert_rejects_unknown_and_same_units() {
        let group = builtin_group("English Weight");
        assert!(matches!(
            convert(&group, "oz", "kg", 1.0),
            Err(CatalogError::UnknownUnit { .. })
        ));
        assert!(matches!(
            convert(&group, "oz", "oz", 1.0),
            Err(CatalogError::SameUnit(_))
        ));
    }

    #[test]
    fn round_trip_conversion_returns_original_value() {
        let catalog = UnitCatalog::builtin();
        for group in catalog.groups() {
            for from in &group.units {
                for to in &group.units {
                    if from.name == to.name {
                        continue;
                    }
                    let value = 7.25;
                    let there = value * from.to_base / to.to_base;
                    let back = there * to.to_base / from.to_base;
                    assert!(
                        (round_answer(back) - value).abs() < 1e-3,
                        "{} -> {} -> {}",
                        from.name,
                        to.name,
                        from.name
                    );
                }
            }
        }
    }

    #[test]
    fn generated_answers_match_formula() {
        let catalog = UnitCatalog::builtin();
        let mut generator = ProblemGenerator::seeded(catalog.clone(), 42);
        for _ in 0..500 {
            let p = generator.generate();
            let group = catalog.group(&p.group).unwrap();
            let from = group.unit(&p.from_unit).unwrap();
            let to = group.unit(&p.to_unit).unwrap();
            assert_ne!(p.from_unit, p.to_unit);
            assert_eq!(p.answer, round_answer(p.value * from.to_base / to.to_base));
            assert!(p.question.starts_with("Convert "));
            assert!(p.question.ends_with(&format!("({})", p.group)));
        }
    }

    #[test]
    fn magnitudes_respect_range_policy() {
        let catalog = UnitCatalog::builtin();
        let mut generator = ProblemGenerator::seeded(catalog.clone(), 7);
        for _ in 0..500 {
            let p = generator.generate();
            let from = catalog.group(&p.group).unwrap().unit(&p.from_unit).unwrap();
            let (low, high) = magnitude_range(from.to_base);
            assert!(p.value >= low && p.value <= high, "{} out of range", p.value);
        }
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = ProblemGenerator::seeded(UnitCatalog::builtin(), 99);
        let mut b = ProblemGenerator::seeded(UnitCatalog::builtin(), 99);
        for _ in 0..20 {
            assert_eq!(a.next_question(), b.next_question());
        }
    }

    #[test]
    fn next_question_contains_answer() {
        let mut generator = ProblemGenerator::seeded(UnitCatalog::builtin(), 3);
        for _ in 0..100 {
            let q = generator.next_question();
            assert_eq!(q.options.len(), DISTRACTOR_COUNT + 1);
            assert!(q.options.contains(&q.problem.answer));
        }
    }

    #[test]
    fn format_number_trims() {
        assert_eq!(format_number(36.0), "36");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(1.2300001), "1.23");
        assert_eq!(format_number(0.0004), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(12.345), "12.345");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn round_to_three_decimals() {
        assert_eq!(round_answer(1.23456), 1.235);
        assert_eq!(round_answer(0.0004), 0.0);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn rounding_huge_values_does_not_overflow() {
        assert_eq!(round_answer(1e307), 1e307);
        assert!(round_answer(f64::INFINITY).is_infinite());
    }
}
