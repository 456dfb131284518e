/// Narrative renderer
///
/// Formats per-tester summaries into the "Matches:", body and "Results:"
/// sections of a report.
use crate::types::{ReportSection, TesterSummary};

/// Line break token baked into the body text
pub const DEFAULT_LINE_BREAK: &str = "<br>";

/// Rendering knobs for the narrative sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Separator emitted after each body sentence
    pub line_break: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { line_break: DEFAULT_LINE_BREAK.to_string() }
    }
}

/// The three sections produced from tester summaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeSections {
    pub matches: ReportSection,
    pub body: ReportSection,
    pub results: ReportSection,
}

/// Render summaries with the default `<br>` line break
pub fn render(summaries: &[TesterSummary]) -> NarrativeSections {
    render_with(summaries, &RenderOptions::default())
}

pub fn render_with(summaries: &[TesterSummary], options: &RenderOptions) -> NarrativeSections {
    NarrativeSections {
        matches: ReportSection::new("Matches:", format_matches(summaries)),
        body: ReportSection::new("", format_body(summaries, &options.line_break)),
        results: ReportSection::new("Results:", format_results(summaries)),
    }
}

/// "N testers (A and B and C)"
///
/// "testers" stays plural even for a single match.
fn format_matches(summaries: &[TesterSummary]) -> String {
    let names: Vec<&str> = summaries.iter().map(|s| s.display_name.as_str()).collect();
    format!("{} testers ({})", summaries.len(), names.join(" and "))
}

fn format_body(summaries: &[TesterSummary], line_break: &str) -> String {
    let mut body = String::new();

    for summary in summaries {
        let clauses = if summary.per_device_counts.is_empty() {
            bug_count(0)
        } else {
            summary
                .per_device_counts
                .iter()
                .map(|(device, count)| format!("{} for {}", bug_count(*count), device))
                .collect::<Vec<_>>()
                .join(" and ")
        };

        body.push_str(&format!("{} filed {}.{}", summary.display_name, clauses, line_break));
        body.push_str(&format!("{} bugs filed for devices in search.{}", summary.total_count, line_break));
    }

    body
}

fn format_results(summaries: &[TesterSummary]) -> String {
    summaries.iter().map(|s| s.display_name.as_str()).collect::<Vec<_>>().join(", ")
}

/// "1 bug", otherwise "<n> bugs" (zero included)
pub fn bug_count(count: usize) -> String {
    if count == 1 { "1 bug".to_string() } else { format!("{} bugs", count) }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;
