//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use unitdrill_core::explain::WorkedExample;
use unitdrill_core::generator::format_number;
use unitdrill_core::report::SessionReport;
use unitdrill_core::statistics::GroupStats;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a session report.
pub fn generate_html(report: &SessionReport) -> String {
    let summary = &report.summary;
    let stats = &report.stats;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>unitdrill session: {}</title>\n",
        html_escape(&report.player)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>unitdrill session</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Player: <strong>{}</strong> | {}s session | {}</p>\n",
        html_escape(&report.player),
        summary.duration_secs,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    let score_class = if summary.final_score >= 0 { "pass" } else { "fail" };
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str(&format!(
        "<p class=\"score {score_class}\">Final score: <strong>{}</strong></p>\n",
        summary.final_score
    ));
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Answered</th><th>Correct</th><th>Incorrect</th><th>Accuracy</th><th>Answers/min</th><th>Time played</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td><td>{:.1}</td><td>{}s</td></tr></tbody>\n",
        stats.answered,
        stats.correct,
        stats.incorrect,
        stats.accuracy * 100.0,
        stats.answers_per_minute,
        summary.elapsed_secs,
    ));
    html.push_str("</table>\n");
    html.push_str("</section>\n");

    // Per-group breakdown
    if !stats.per_group.is_empty() {
        html.push_str("<section class=\"groups\">\n");
        html.push_str("<h2>Unit groups</h2>\n");
        html.push_str("<table class=\"group-table\">\n");
        html.push_str(
            "<thead><tr><th>Group</th><th>Answered</th><th>Correct</th><th>Accuracy</th></tr></thead>\n",
        );
        html.push_str("<tbody>\n");
        for g in &stats.per_group {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td></tr>\n",
                html_escape(&g.group),
                g.answered,
                g.correct,
                g.accuracy * 100.0
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str(&generate_bar_chart(&stats.per_group));
        html.push_str("</section>\n");
    }

    // Solved problems
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Problems</h2>\n");
    if summary.solved.is_empty() {
        html.push_str("<p class=\"meta\">No problems were answered.</p>\n");
    } else {
        html.push_str("<table class=\"results-table\" id=\"results\">\n");
        html.push_str("<thead><tr><th onclick=\"sortTable(0)\">#</th><th onclick=\"sortTable(1)\">Question</th><th onclick=\"sortTable(2)\">Correct</th><th onclick=\"sortTable(3)\">Chosen</th><th onclick=\"sortTable(4)\">Result</th><th>Method</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for (i, p) in summary.solved.iter().enumerate() {
            let row_class = if p.is_correct { "pass" } else { "fail" };
            let worked = WorkedExample::from_solved(p);
            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"method\">{}</td></tr>\n",
                row_class,
                i + 1,
                html_escape(&p.question),
                format_number(p.correct),
                format_number(p.chosen),
                p.mark(),
                html_escape(&worked.explanation).replace('\n', "<br>"),
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &SessionReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn generate_bar_chart(groups: &[GroupStats]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = groups.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, g) in groups.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (g.accuracy * max_width as f64) as usize;

        let color = if g.accuracy >= 0.8 {
            "#22c55e"
        } else if g.accuracy >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&g.group)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            g.accuracy * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { font-size: 1.5rem; padding: 0.5rem 1rem; border-radius: 8px; display: inline-block; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
td.method { font-size: 0.85rem; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    if (!isNaN(na) && !isNaN(nb)) return asc ? na - nb : nb - na;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
