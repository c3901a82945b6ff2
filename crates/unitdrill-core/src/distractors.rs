//! Plausible wrong answers for multiple-choice questions.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::generator::round_answer;

/// Number of wrong options shown next to the correct answer.
pub const DISTRACTOR_COUNT: usize = 3;

/// Random draws before falling back to fixed steps.
pub const MAX_RANDOM_ATTEMPTS: usize = 1000;

/// Steps tried at each step size before giving up on stepping.
pub const MAX_STEP_ATTEMPTS: usize = 1000;

/// Tolerance for treating an answer as integral.
const INTEGRAL_EPSILON: f64 = 1e-9;

fn is_integral(n: f64) -> bool {
    (n - n.round()).abs() < INTEGRAL_EPSILON
}

fn random_candidate<R: Rng + ?Sized>(base: f64, integral: bool, rng: &mut R) -> f64 {
    if integral {
        let jitter = ((base.abs() * 0.1).floor() as i64).max(1);
        base + rng.random_range(-jitter..=jitter) as f64
    } else {
        let pct = rng.random::<f64>() * 0.2 - 0.1;
        base * (1.0 + pct)
    }
}

/// Generate `count` distinct distractors for `answer`.
///
/// Integral answers are jittered by whole numbers within ±10% (at least ±1);
/// other answers are scaled by a random factor in [-10%, +10%]. Every
/// candidate is rounded to three decimals and rejected if it equals the
/// answer, an earlier candidate, or (for a non-negative answer) negative.
/// After [`MAX_RANDOM_ATTEMPTS`] draws the
/// remaining slots are filled with fixed steps away from the answer, which
/// covers answers of zero and answers too small for a percentage to move.
/// Answers too large for a fixed step to change get a step of 0.1% of the
/// answer, and anything still missing (a non-finite answer) is filled with
/// small whole numbers, so the call always returns `count` values.
pub fn generate_distractors<R: Rng + ?Sized>(answer: f64, count: usize, rng: &mut R) -> Vec<f64> {
    let base = round_answer(answer);
    let integral = is_integral(base);
    let mut distractors: Vec<f64> = Vec::with_capacity(count);

    // Negative options are never plausible for a non-negative quantity.
    let accept = |cand: f64, found: &mut Vec<f64>| {
        if !cand.is_finite() || cand == base || (base >= 0.0 && cand < 0.0) {
            return;
        }
        if !found.contains(&cand) {
            found.push(cand);
        }
    };

    let mut attempts = 0;
    while distractors.len() < count && attempts < MAX_RANDOM_ATTEMPTS {
        attempts += 1;
        let cand = round_answer(random_candidate(base, integral, rng));
        accept(cand, &mut distractors);
    }

    if distractors.len() < count {
        tracing::debug!(
            answer = base,
            found = distractors.len(),
            "random distractors exhausted, stepping"
        );
        let step: f64 = if integral { 1.0 } else { 0.001 };
        let widened = step.max(base.abs() * 1e-3);
        for step in [step, widened] {
            let mut k = 1.0;
            for _ in 0..MAX_STEP_ATTEMPTS {
                if distractors.len() == count {
                    break;
                }
                for offset in [k, -k] {
                    if distractors.len() == count {
                        break;
                    }
                    accept(round_answer(base + offset * step), &mut distractors);
                }
                k += 1.0;
            }
        }
    }

    if distractors.len() < count {
        tracing::warn!(answer = base, "no usable distractors near answer");
        let mut filler = 1.0;
        while distractors.len() < count {
            accept(filler, &mut distractors);
            filler += 1.0;
        }
    }

    distractors
}

/// The answer plus `count` distractors, shuffled.
pub fn build_options<R: Rng + ?Sized>(answer: f64, count: usize, rng: &mut R) -> Vec<f64> {
    let mut options = Vec::with_capacity(count + 1);
    options.push(round_answer(answer));
    options.extend(generate_distractors(answer, count, rng));
    options.shuffle(rng);
    options
}
