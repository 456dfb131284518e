//! Report export functions for JSON and Markdown formats.

use super::compose::ReportRequest;
use crate::types::ReportBundle;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export a report as JSON.
///
/// The request is written alongside the sections so the file is
/// self-describing.
///
/// # Arguments
/// * `bundle` - The finished report
/// * `request` - Selections the report was built for
/// * `output_path` - Path to write the JSON file
pub fn export_json_report(bundle: &ReportBundle, request: &ReportRequest, output_path: &Path) -> std::io::Result<()> {
    use serde_json::json;

    let report = json!({
        "request": request,
        "report": bundle,
    });

    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, &report)?;

    Ok(())
}

/// Format a report as Markdown.
///
/// Headered sections become `##` headings; the body is split on
/// `line_break` into separate paragraphs.
pub fn format_markdown_report(bundle: &ReportBundle, line_break: &str) -> String {
    let mut out = String::from("# Bug Match Report\n\n");

    for section in bundle.sections() {
        if !section.header.is_empty() {
            out.push_str(&format!("## {}\n\n", section.header.trim_end_matches(':')));
        }

        for line in split_lines(&section.text, line_break) {
            out.push_str(line);
            out.push_str("\n\n");
        }
    }

    out
}

/// Write the Markdown form of a report to `output_path`
pub fn export_markdown_report(bundle: &ReportBundle, line_break: &str, output_path: &Path) -> std::io::Result<()> {
    let mut file = File::create(output_path)?;
    write!(file, "{}", format_markdown_report(bundle, line_break))?;
    Ok(())
}

/// Split section text on the line break token, dropping empty pieces
pub(crate) fn split_lines<'a>(text: &'a str, line_break: &str) -> Vec<&'a str> {
    if line_break.is_empty() {
        return if text.is_empty() { vec![] } else { vec![text] };
    }
    text.split(line_break).filter(|line| !line.is_empty()).collect()
}
