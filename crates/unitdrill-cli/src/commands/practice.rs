//! The `unitdrill practice` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use unitdrill_core::generator::format_number;
use unitdrill_core::model::Question;
use unitdrill_core::report::SessionReport;
use unitdrill_core::session::{
    clamp_duration, parse_duration, PracticeSession, SessionSummary, TickOutcome,
};
use unitdrill_core::traits::{submit_in_background, ScoreSubmission};
use unitdrill_report::html::write_html_report;
use unitdrill_reporters::config::load_config_from;
use unitdrill_reporters::create_reporter;

use super::{load_catalog_or_builtin, make_generator};

/// How long to wait for a pending score submission before exiting.
const SUBMIT_WAIT: Duration = Duration::from_secs(15);

/// One line of player input.
#[derive(Debug, Clone, PartialEq)]
enum Input {
    /// A 1-based option number.
    Choice(usize),
    /// A literal answer value.
    Value(f64),
    Example,
    Quit,
    Empty,
    Invalid,
}

/// Bare integers 1-4 pick an option; any other number is a literal value.
fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => return Input::Empty,
        "e" | "example" => return Input::Example,
        "q" | "quit" => return Input::Quit,
        _ => {}
    }

    if let Ok(n) = trimmed.parse::<usize>() {
        if (1..=4).contains(&n) {
            return Input::Choice(n);
        }
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Input::Value(v),
        _ => Input::Invalid,
    }
}

/// Render a question and its numbered options.
pub fn format_question(question: &Question) -> String {
    let options: Vec<String> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{}) {}", i + 1, format_number(*v)))
        .collect();
    format!("{}\n  {}", question.problem.question, options.join("   "))
}

/// Read stdin lines on a plain thread so a pending read never holds up exit.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Parse a `--format` value into the report formats to write.
fn parse_formats(format: &str) -> Result<Vec<&'static str>> {
    let mut formats = Vec::new();
    for fmt in format.split(',').map(str::trim) {
        match fmt {
            "all" => return Ok(vec!["json", "html"]),
            "none" => {}
            "json" => formats.push("json"),
            "html" => formats.push("html"),
            other => anyhow::bail!("unknown report format: '{other}'"),
        }
    }
    Ok(formats)
}

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    duration: Option<String>,
    name: Option<String>,
    seed: Option<u64>,
    catalog_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let formats = parse_formats(&format)?;

    let catalog = load_catalog_or_builtin(catalog_path.as_deref().or(config.catalog.as_deref()))?;
    let duration_secs = match duration {
        Some(d) => parse_duration(Some(&d)),
        None => clamp_duration(config.default_duration_secs),
    };
    let player = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| config.player_name().to_string());
    let reporter = create_reporter(&config.reporter)?;
    let feedback_delay = Duration::from_millis(config.feedback_delay_ms);

    let mut session = PracticeSession::new(make_generator(catalog, seed));
    let first = session.start(duration_secs).clone();

    println!(
        "Practice session: {}s. Answer with 1-4 or the value; 'e' shows an example, 'q' quits.\n",
        session.duration_secs()
    );
    println!("{}", format_question(&first));

    let mut input = spawn_stdin_reader();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately.
    ticker.tick().await;

    let summary = loop {
        tokio::select! {
            _ = ticker.tick() => {
                match session.tick() {
                    TickOutcome::Ended(summary) => {
                        println!("\nTime's up!");
                        break summary;
                    }
                    TickOutcome::Running { remaining_secs } => {
                        if remaining_secs % 10 == 0 || remaining_secs <= 5 {
                            eprintln!("  {remaining_secs}s left");
                        }
                    }
                    TickOutcome::Inactive => {}
                }
            }
            line = input.recv() => {
                let Some(line) = line else {
                    break session.end()?;
                };
                let line = line.context("failed to read input")?;

                let chosen = match parse_input(&line) {
                    Input::Quit => break session.end()?,
                    Input::Example => {
                        println!("\n{}\n", session.show_example());
                        if let Some(q) = session.current_question() {
                            println!("{}", format_question(q));
                        }
                        continue;
                    }
                    Input::Empty => continue,
                    Input::Invalid => {
                        println!("Enter an option number (1-4), a value, 'e' or 'q'.");
                        continue;
                    }
                    Input::Value(v) => v,
                    Input::Choice(n) => {
                        match session.current_question().and_then(|q| q.option(n)) {
                            Some(v) => v,
                            None => {
                                println!("No option {n}.");
                                continue;
                            }
                        }
                    }
                };

                let outcome = session.answer(chosen)?;
                if outcome.is_correct {
                    println!("✅ Correct! Score: {}", outcome.score);
                } else {
                    println!(
                        "❌ Incorrect, the answer was {}. Score: {}",
                        format_number(outcome.correct),
                        outcome.score
                    );
                }
                if !feedback_delay.is_zero() {
                    tokio::time::sleep(feedback_delay).await;
                }
                println!("\n{}", format_question(&outcome.next));
            }
        }
    };

    print_summary(&summary);

    let report = SessionReport::new(&player, summary);
    if !formats.is_empty() {
        let output = output.unwrap_or_else(|| config.output_dir.clone());
        std::fs::create_dir_all(&output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

        for fmt in &formats {
            match *fmt {
                "json" => {
                    let path = output.join(format!("session-{timestamp}.json"));
                    report.save_json(&path)?;
                    eprintln!("Results saved to: {}", path.display());
                }
                "html" => {
                    let path = output.join(format!("session-{timestamp}.html"));
                    write_html_report(&report, &path)?;
                    eprintln!("HTML report: {}", path.display());
                }
                _ => {}
            }
        }
    }

    if let Some(reporter) = reporter {
        let submission = ScoreSubmission::from_summary(&player, &report.summary);
        if let Some(handle) = submit_in_background(reporter, submission) {
            if tokio::time::timeout(SUBMIT_WAIT, handle).await.is_err() {
                tracing::warn!("score submission still pending, giving up");
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &SessionSummary) {
    use comfy_table::{Cell, Table};

    println!(
        "\nFinal score: {} ({} correct, {} incorrect in {}s)",
        summary.final_score,
        summary.correct_count(),
        summary.incorrect_count(),
        summary.elapsed_secs
    );

    if summary.solved.is_empty() {
        println!("No problems answered.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Correct", "Chosen", ""]);
    for (i, p) in summary.solved.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&p.question),
            Cell::new(format_number(p.correct)),
            Cell::new(format_number(p.chosen)),
            Cell::new(p.mark()),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitdrill_core::model::Problem;

    #[test]
    fn input_numbers_one_to_four_are_choices() {
        assert_eq!(parse_input("1"), Input::Choice(1));
        assert_eq!(parse_input(" 4 \n"), Input::Choice(4));
        assert_eq!(parse_input("5"), Input::Value(5.0));
        assert_eq!(parse_input("0"), Input::Value(0.0));
        assert_eq!(parse_input("1.5"), Input::Value(1.5));
        assert_eq!(parse_input("-2"), Input::Value(-2.0));
    }

    #[test]
    fn input_commands() {
        assert_eq!(parse_input("e"), Input::Example);
        assert_eq!(parse_input("Q"), Input::Quit);
        assert_eq!(parse_input("   "), Input::Empty);
        assert_eq!(parse_input("banana"), Input::Invalid);
        assert_eq!(parse_input("NaN"), Input::Invalid);
        assert_eq!(parse_input("inf"), Input::Invalid);
    }

    #[test]
    fn formats() {
        assert_eq!(parse_formats("none").unwrap(), Vec::<&str>::new());
        assert_eq!(parse_formats("all").unwrap(), vec!["json", "html"]);
        assert_eq!(parse_formats("json, html").unwrap(), vec!["json", "html"]);
        assert!(parse_formats("sarif").is_err());
    }

    #[test]
    fn question_rendering() {
        let question = Question {
            problem: Problem {
                question: "Convert 1500 m to km (Metric Length)".into(),
                answer: 1.5,
                value: 1500.0,
                from_unit: "m".into(),
                to_unit: "km".into(),
                group: "Metric Length".into(),
            },
            options: vec![15.0, 1.5, 0.15, 150.0],
        };
        let text = format_question(&question);
        assert!(text.starts_with("Convert 1500 m to km (Metric Length)\n"));
        assert!(text.contains("1) 15"));
        assert!(text.contains("2) 1.5"));
        assert!(text.contains("4) 150"));
    }
}
