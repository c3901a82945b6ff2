//! End-to-end session tests across the library crates.
//!
//! Drives a seeded practice session to completion, then persists, renders,
//! and submits the result the way the `practice` command does.

use std::sync::Arc;

use unitdrill_core::catalog::UnitCatalog;
use unitdrill_core::generator::ProblemGenerator;
use unitdrill_core::report::SessionReport;
use unitdrill_core::session::{PracticeSession, SessionPhase, TickOutcome};
use unitdrill_core::traits::{submit_in_background, ScoreSubmission};
use unitdrill_report::html::generate_html;
use unitdrill_reporters::mock::MockReporter;

fn session(seed: u64) -> PracticeSession {
    PracticeSession::new(ProblemGenerator::seeded(UnitCatalog::builtin(), seed))
}

/// Answer `n` questions, alternating right and wrong.
fn answer_alternating(session: &mut PracticeSession, n: usize) {
    for i in 0..n {
        let question = session.current_question().unwrap().clone();
        let answer = question.problem.answer;
        let chosen = if i % 2 == 0 {
            answer
        } else {
            *question.options.iter().find(|o| **o != answer).unwrap()
        };
        session.answer(chosen).unwrap();
    }
}

#[test]
fn timed_session_runs_to_completion() {
    let mut s = session(2024);
    s.start(10);
    answer_alternating(&mut s, 5);

    let mut ended = None;
    for _ in 0..10 {
        if let TickOutcome::Ended(summary) = s.tick() {
            ended = Some(summary);
        }
    }

    let summary = ended.expect("session should end after ten ticks");
    assert_eq!(s.phase(), SessionPhase::Ended);
    assert_eq!(summary.solved.len(), 5);
    assert_eq!(summary.correct_count(), 3);
    assert_eq!(summary.final_score, 1);
    assert_eq!(summary.elapsed_secs, 10);
    assert_eq!(s.tick(), TickOutcome::Inactive);
}

#[test]
fn report_roundtrip_and_html() {
    let mut s = session(99);
    s.start(30);
    answer_alternating(&mut s, 4);
    let summary = s.end().unwrap();

    let report = SessionReport::new("Ada", summary);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    report.save_json(&path).unwrap();

    let loaded = SessionReport::load_json(&path).unwrap();
    assert_eq!(loaded.stats.answered, 4);
    assert_eq!(loaded.stats.accuracy, 0.5);

    let html = generate_html(&loaded);
    for solved in &loaded.summary.solved {
        assert!(html.contains(&solved.group));
        assert!(solved.has_units());
        assert!(html.contains(&format!("then to {}.", solved.to_unit)));
    }
    assert!(html.contains("Method: Convert"));
}

#[tokio::test]
async fn final_score_is_submitted() {
    let mut s = session(7);
    s.start(60);
    answer_alternating(&mut s, 3);
    let summary = s.end().unwrap();

    let reporter = Arc::new(MockReporter::new());
    let handle = submit_in_background(
        reporter.clone(),
        ScoreSubmission::from_summary("Ada", &summary),
    )
    .unwrap();
    handle.await.unwrap();

    let submitted = reporter.submissions();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].score, 1);
    assert_eq!(submitted[0].metadata.answered, 3);
    assert_eq!(submitted[0].metadata.duration_secs, 60);
}

#[test]
fn example_between_answers_keeps_state() {
    let mut s = session(13);
    s.start(60);
    answer_alternating(&mut s, 2);
    let before = s.current_question().cloned();

    let example = s.show_example();
    assert!(example.question.starts_with("Convert"));
    assert_eq!(s.current_question().cloned(), before);
    assert_eq!(s.score(), 0);
    assert_eq!(s.solved().len(), 2);
}
