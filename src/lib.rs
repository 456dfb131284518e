//! Filter a corpus of bug reports by tester country and device, and
//! summarize the matches per tester.
//!
//! The pipeline runs strictly forward:
//!
//! - a [`Selection`] per field is described against that field's domain
//!   ([`describe`]) to produce the search criteria;
//! - the bugs matching both selections are grouped by filer ([`aggregate`])
//!   and rendered into narrative sections ([`render`]);
//! - [`report::build_report`] runs both halves against a [`store::BugStore`]
//!   and returns a [`ReportBundle`].

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod console_format;
pub mod describe;
pub mod error;
pub mod render;
pub mod report;
pub mod store;
pub mod types;
pub mod ui;

pub use aggregate::aggregate;
pub use describe::describe;
pub use error::LookupFailure;
pub use render::render;
pub use types::{BugRecord, DomainValue, Field, ReportBundle, ReportSection, Selection, TesterSummary};
