//! unitdrill-report: Self-contained HTML rendering of practice sessions.

pub mod html;

pub use html::{generate_html, write_html_report};
