//! Aggregation of bug records into per-tester summaries.
//!
//! Testers and devices both keep first-seen order, so the rendered report
//! follows the order in which the store returned the records.

use crate::store::Tester;
use crate::types::{BugRecord, TesterId, TesterSummary};
use indexmap::IndexMap;
use log::debug;
use std::collections::HashSet;

/// Group bugs by filer, counting per device and in total.
///
/// Only testers that appear in `bugs` are reported.
pub fn aggregate(bugs: &[BugRecord]) -> Vec<TesterSummary> {
    let mut by_tester: IndexMap<TesterId, TesterSummary> = IndexMap::new();

    for bug in bugs {
        by_tester
            .entry(bug.filer_id)
            .or_insert_with(|| TesterSummary::new(bug.filer_id, bug.filer_display_name()))
            .record(&bug.device_label);
    }

    debug!("Aggregated {} bugs into {} tester summaries", bugs.len(), by_tester.len());

    by_tester.into_values().collect()
}

/// Append a zero-count summary for every tester not already summarized.
///
/// Appended testers keep the order of `testers`.
pub fn with_zero_bug_testers(mut summaries: Vec<TesterSummary>, testers: &[Tester]) -> Vec<TesterSummary> {
    let before = summaries.len();
    let mut seen: HashSet<TesterId> = summaries.iter().map(|s| s.tester_id).collect();

    for tester in testers {
        if seen.insert(tester.tester_id) {
            summaries.push(TesterSummary::new(tester.tester_id, tester.display_name()));
        }
    }

    debug!("Added {} testers with no matching bugs", summaries.len() - before);

    summaries
}
