//! Worked conversion examples.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::UnitCatalog;
use crate::generator::format_number;
use crate::model::{Problem, SolvedProblem};

/// A problem with a step-by-step explanation of its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkedExample {
    pub question: String,
    pub explanation: String,
    pub answer: f64,
}

impl WorkedExample {
    /// Explain a generated problem, including the arithmetic through the
    /// base unit when the catalog knows the problem's group.
    pub fn from_problem(problem: &Problem, catalog: &UnitCatalog) -> Self {
        let mut explanation = method_lines(
            &format_number(problem.value),
            &problem.from_unit,
            &problem.to_unit,
            problem.answer,
        );

        let units = catalog.group(&problem.group).and_then(|g| {
            Some((
                g.unit(&problem.from_unit)?,
                g.unit(&problem.to_unit)?,
                g.base_unit()?,
            ))
        });
        if let Some((from, to, base)) = units {
            let in_base = problem.value * from.to_base;
            explanation.push_str(&format!(
                "\nStep 1: {} {} × {} = {} {}",
                format_number(problem.value),
                from.name,
                format_precise(from.to_base),
                format_precise(in_base),
                base.name
            ));
            explanation.push_str(&format!(
                "\nStep 2: {} {} ÷ {} = {} {}",
                format_precise(in_base),
                base.name,
                format_precise(to.to_base),
                format_number(problem.answer),
                to.name
            ));
        }

        Self {
            question: problem.question.clone(),
            explanation,
            answer: problem.answer,
        }
    }

    /// Explain an answered problem from its recorded value and units.
    ///
    /// Records saved without units are explained from the question text.
    pub fn from_solved(solved: &SolvedProblem) -> Self {
        if !solved.has_units() {
            return Self::from_question(&solved.question, solved.correct);
        }
        Self {
            question: solved.question.clone(),
            explanation: method_lines(
                &format_number(solved.value),
                &solved.from_unit,
                &solved.to_unit,
                solved.correct,
            ),
            answer: solved.correct,
        }
    }

    /// Explain a problem known only by its text.
    ///
    /// Falls back to a bare "Answer: <value>" when the text is not of the
    /// form "Convert X unitA to unitB".
    pub fn from_question(question: &str, answer: f64) -> Self {
        let explanation = match parse_question(question) {
            Some(parsed) => method_lines(parsed.value, parsed.from_unit, parsed.to_unit, answer),
            None => format!("Answer: {}", format_number(answer)),
        };
        Self {
            question: question.to_string(),
            explanation,
            answer,
        }
    }
}

impl fmt::Display for WorkedExample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Problem: {}", self.question)?;
        writeln!(f, "Solution: {}", self.explanation)?;
        write!(f, "Answer: {}", format_number(self.answer))
    }
}

fn method_lines(value: &str, from: &str, to: &str, answer: f64) -> String {
    format!(
        "Method: Convert {value} {from} to base units, then to {to}.\nCalculated answer: {} {to}",
        format_number(answer)
    )
}

/// Like `format_number` but keeps up to six decimals for intermediate values.
fn format_precise(n: f64) -> String {
    if n.fract() == 0.0 || !n.is_finite() {
        return format_number(n);
    }
    let fixed = format!("{n:.6}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// The pieces of a "Convert X unitA to unitB (Group)" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedQuestion<'a> {
    pub value: &'a str,
    pub from_unit: &'a str,
    pub to_unit: &'a str,
}

/// Parse question text back into value and units.
///
/// The keyword is matched case-insensitively, unit names may contain spaces
/// ("fl oz"), and a trailing "(Group)" is ignored.
pub fn parse_question(text: &str) -> Option<ParsedQuestion<'_>> {
    let text = text.trim();
    let keyword = text.get(..7)?;
    if !keyword.eq_ignore_ascii_case("convert") {
        return None;
    }
    let rest = &text[7..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let (value, rest) = rest.trim_start().split_once(char::is_whitespace)?;
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let (from_unit, rest) = rest.trim_start().split_once(" to ")?;
    let to_unit = rest.split('(').next().unwrap_or_default().trim();
    let from_unit = from_unit.trim();
    if from_unit.is_empty() || to_unit.is_empty() {
        return None;
    }

    Some(ParsedQuestion {
        value,
        from_unit,
        to_unit,
    })
}
