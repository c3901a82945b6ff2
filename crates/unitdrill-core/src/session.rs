//! Timed practice session controller.
//!
//! A [`PracticeSession`] moves through Idle → Running → Ended → Idle. The
//! owner drives it with one [`PracticeSession::tick`] per second and one
//! [`PracticeSession::answer`] per player choice; the session never sleeps
//! or spawns anything itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::explain::WorkedExample;
use crate::generator::{round_answer, ProblemGenerator};
use crate::model::{Problem, Question, SolvedProblem};

/// Duration used when the requested one is missing or unusable.
pub const DEFAULT_DURATION_SECS: u32 = 60;
pub const MIN_DURATION_SECS: u32 = 10;
pub const MAX_DURATION_SECS: u32 = 600;

/// Draws spent looking for an example with the same unit pair.
pub const SAME_UNITS_ATTEMPTS: usize = 20;
/// Draws spent looking for any example different from the last problem.
pub const ANY_EXAMPLE_ATTEMPTS: usize = 10;

/// Clamp a duration to the allowed range.
pub fn clamp_duration(secs: u32) -> u32 {
    secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS)
}

/// Interpret free-form duration input.
///
/// Missing, unparsable, non-finite, or zero input means the default; the
/// result is always clamped.
pub fn parse_duration(input: Option<&str>) -> u32 {
    let secs = input
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v != 0.0)
        .map(|v| v.trunc().clamp(0.0, f64::from(u32::MAX)) as u32)
        .unwrap_or(DEFAULT_DURATION_SECS);
    clamp_duration(secs)
}

/// Lifecycle phase of a practice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Running,
    Ended,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::Running => write!(f, "running"),
            SessionPhase::Ended => write!(f, "ended"),
        }
    }
}

/// What a countdown tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No countdown is active; nothing changed.
    Inactive,
    /// Time was decremented and the session continues.
    Running { remaining_secs: u32 },
    /// Time ran out; the session has ended.
    Ended(SessionSummary),
}

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    /// The true answer of the question just answered.
    pub correct: f64,
    /// Score after this answer.
    pub score: i64,
    /// The question now being asked.
    pub next: Question,
}

/// End-of-session summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub final_score: i64,
    /// Configured session length.
    pub duration_secs: u32,
    /// Seconds actually played (less than the duration on early quit).
    pub elapsed_secs: u32,
    pub solved: Vec<SolvedProblem>,
}

impl SessionSummary {
    pub fn correct_count(&self) -> usize {
        self.solved.iter().filter(|p| p.is_correct).count()
    }

    pub fn incorrect_count(&self) -> usize {
        self.solved.len() - self.correct_count()
    }
}

/// A single player's timed practice session.
pub struct PracticeSession {
    generator: ProblemGenerator,
    phase: SessionPhase,
    score: i64,
    duration_secs: u32,
    remaining_secs: u32,
    timer_active: bool,
    solved: Vec<SolvedProblem>,
    current: Option<Question>,
    last_problem: Option<Problem>,
}

impl PracticeSession {
    pub fn new(generator: ProblemGenerator) -> Self {
        Self {
            generator,
            phase: SessionPhase::Idle,
            score: 0,
            duration_secs: DEFAULT_DURATION_SECS,
            remaining_secs: 0,
            timer_active: false,
            solved: Vec::new(),
            current: None,
            last_problem: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer_active
    }

    pub fn solved(&self) -> &[SolvedProblem] {
        &self.solved
    }

    /// The question currently awaiting an answer.
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// The most recently generated problem, kept across sessions.
    pub fn last_problem(&self) -> Option<&Problem> {
        self.last_problem.as_ref()
    }

    /// Start (or restart) a session and return its first question.
    ///
    /// Any countdown already running is replaced; the duration is clamped
    /// to [`MIN_DURATION_SECS`]..=[`MAX_DURATION_SECS`].
    pub fn start(&mut self, duration_secs: u32) -> &Question {
        if self.timer_active {
            tracing::debug!("restarting: cancelling active countdown");
        }
        self.duration_secs = clamp_duration(duration_secs);
        self.remaining_secs = self.duration_secs;
        self.timer_active = true;
        self.score = 0;
        self.solved.clear();
        self.phase = SessionPhase::Running;

        tracing::info!(duration_secs = self.duration_secs, "practice session started");
        self.request_question()
    }

    fn request_question(&mut self) -> &Question {
        let question = self.generator.next_question();
        self.last_problem = Some(question.problem.clone());
        self.current.insert(question)
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.timer_active {
            return TickOutcome::Inactive;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        tracing::trace!(remaining_secs = self.remaining_secs, "tick");
        if self.remaining_secs == 0 {
            TickOutcome::Ended(self.finish())
        } else {
            TickOutcome::Running {
                remaining_secs: self.remaining_secs,
            }
        }
    }

    /// Answer the current question with the chosen option value.
    ///
    /// Values are compared after rounding both to three decimals. The next
    /// question is generated immediately.
    pub fn answer(&mut self, chosen: f64) -> Result<AnswerOutcome, SessionError> {
        let question = match (self.phase, self.current.take()) {
            (SessionPhase::Running, Some(q)) => q,
            (phase, current) => {
                self.current = current;
                return Err(SessionError::NotRunning(phase));
            }
        };

        let correct = question.problem.answer;
        let is_correct = round_answer(chosen) == round_answer(correct);
        self.score += if is_correct { 1 } else { -1 };
        self.solved.push(SolvedProblem {
            question: question.problem.question,
            value: question.problem.value,
            from_unit: question.problem.from_unit,
            to_unit: question.problem.to_unit,
            group: question.problem.group,
            correct,
            chosen,
            is_correct,
        });
        tracing::debug!(is_correct, score = self.score, "answer recorded");

        let next = self.request_question().clone();
        Ok(AnswerOutcome {
            is_correct,
            correct,
            score: self.score,
            next,
        })
    }

    /// End the session early, or fetch the summary of an ended one.
    pub fn end(&mut self) -> Result<SessionSummary, SessionError> {
        match self.phase {
            SessionPhase::Idle => Err(SessionError::NotStarted),
            SessionPhase::Running => Ok(self.finish()),
            SessionPhase::Ended => Ok(self.summary()),
        }
    }

    fn finish(&mut self) -> SessionSummary {
        self.timer_active = false;
        self.phase = SessionPhase::Ended;
        self.current = None;
        let summary = self.summary();
        tracing::info!(
            score = summary.final_score,
            answered = summary.solved.len(),
            "practice session ended"
        );
        summary
    }

    /// Return to Idle after a session has ended.
    pub fn reset(&mut self) {
        self.timer_active = false;
        self.current = None;
        self.phase = SessionPhase::Idle;
    }

    /// Snapshot of the score and solved problems so far.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            final_score: self.score,
            duration_secs: self.duration_secs,
            elapsed_secs: self.duration_secs - self.remaining_secs.min(self.duration_secs),
            solved: self.solved.clone(),
        }
    }

    /// Produce a worked example, preferring the unit pair of the last
    /// problem. Never touches score, timer, or the current question.
    pub fn show_example(&mut self) -> WorkedExample {
        let last = self.last_problem.clone();
        let example = self.pick_example(last.as_ref());
        WorkedExample::from_problem(&example, self.generator.catalog())
    }

    fn pick_example(&mut self, last: Option<&Problem>) -> Problem {
        if let Some(last) = last {
            for _ in 0..SAME_UNITS_ATTEMPTS {
                let p = self.generator.generate();
                if p.same_units(last) && p.question != last.question {
                    return p;
                }
            }
        }

        for _ in 0..ANY_EXAMPLE_ATTEMPTS {
            let p = self.generator.generate();
            if !last.is_some_and(|l| p.question == l.question) {
                return p;
            }
        }

        match last {
            Some(l) => l.clone(),
            None => self.generator.generate(),
        }
    }
}
