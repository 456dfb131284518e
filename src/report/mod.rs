//! Report generation module - composition and export.
//!
//! This module handles:
//! - Composing the search criteria and narrative halves into a ReportBundle
//! - Running the store lookups for both halves concurrently
//! - Export to JSON and Markdown formats
//!
//! Console rendering is handled by the console_format module.
//!
//! # Module Organization
//!
//! - `compose` - Criteria composition, pure and store-backed report builders
//! - `export` - JSON and Markdown export

mod compose;
mod export;

// Re-export composition types and functions
pub use compose::{
    Domains, ReportOptions, ReportRequest, build_report, compose_criteria, compose_report, fetch_domains,
    lookup_criteria,
};

// Re-export export functions
pub use export::{export_json_report, export_markdown_report, format_markdown_report};

pub(crate) use export::split_lines;
