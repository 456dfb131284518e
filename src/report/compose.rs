//! Report composition.
//!
//! A report has two independent halves: the search criteria (which needs
//! the country and device domains) and the narrative (which needs the
//! filtered bugs). `build_report` runs them on scoped threads and returns
//! the first lookup failure from either side.

use crate::aggregate::{aggregate, with_zero_bug_testers};
use crate::describe::{describe, describe_field};
use crate::error::LookupFailure;
use crate::render::{NarrativeSections, RenderOptions, render_with};
use crate::store::{BugStore, DomainLookup, Tester};
use crate::types::{BugRecord, DomainValue, Field, ReportBundle, ReportSection, Selection, TesterSummary};
use log::debug;
use std::sync::mpsc;
use std::thread;

/// The selections a report is built for
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportRequest {
    pub country: Selection,
    pub device: Selection,
}

impl ReportRequest {
    pub fn new(country: Selection, device: Selection) -> Self {
        Self { country, device }
    }
}

/// Knobs controlling what ends up in a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// List testers from the searched countries that filed no matching bugs
    pub include_zero_bug_testers: bool,
    pub render: RenderOptions,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { include_zero_bug_testers: true, render: RenderOptions::default() }
    }
}

/// Full value lists of both filterable fields
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Domains {
    pub country: Vec<DomainValue>,
    pub device: Vec<DomainValue>,
}

/// Build the "Search Criteria:" section from already-fetched domains
pub fn compose_criteria(
    country: &Selection,
    country_domain: &[DomainValue],
    device: &Selection,
    device_domain: &[DomainValue],
) -> ReportSection {
    criteria_section(
        describe(country, country_domain, Field::Country.label()),
        describe(device, device_domain, Field::Device.label()),
    )
}

fn criteria_section(country_clause: String, device_clause: String) -> ReportSection {
    ReportSection::new("Search Criteria:", format!("{} and {}", country_clause, device_clause))
}

/// Build the "Search Criteria:" section, looking both domains up concurrently
pub fn lookup_criteria<L>(lookup: &L, country: &Selection, device: &Selection) -> Result<ReportSection, LookupFailure>
where
    L: DomainLookup + Sync + ?Sized,
{
    let (country_clause, device_clause) = try_join(
        || describe_field(lookup, Field::Country, country),
        || describe_field(lookup, Field::Device, device),
    )?;
    Ok(criteria_section(country_clause, device_clause))
}

/// Fetch both domains concurrently
pub fn fetch_domains<L>(lookup: &L) -> Result<Domains, LookupFailure>
where
    L: DomainLookup + Sync + ?Sized,
{
    let (country, device) = try_join(|| lookup.fetch_domain(Field::Country), || lookup.fetch_domain(Field::Device))?;
    Ok(Domains { country, device })
}

/// Aggregate bugs, optionally padding with testers that filed none
fn summarize(bugs: &[BugRecord], known_testers: Option<&[Tester]>) -> Vec<TesterSummary> {
    let summaries = aggregate(bugs);
    match known_testers {
        Some(testers) => with_zero_bug_testers(summaries, testers),
        None => summaries,
    }
}

fn bundle(criteria: ReportSection, narrative: NarrativeSections) -> ReportBundle {
    ReportBundle {
        search_criteria: criteria,
        matches: narrative.matches,
        body: narrative.body,
        results: narrative.results,
    }
}

/// Compose a report from data that has already been fetched.
///
/// `known_testers` are only consulted when zero-bug testers are enabled.
pub fn compose_report(
    request: &ReportRequest,
    domains: &Domains,
    bugs: &[BugRecord],
    known_testers: &[Tester],
    options: &ReportOptions,
) -> ReportBundle {
    let criteria = compose_criteria(&request.country, &domains.country, &request.device, &domains.device);
    let testers = options.include_zero_bug_testers.then_some(known_testers);
    let narrative = render_with(&summarize(bugs, testers), &options.render);
    bundle(criteria, narrative)
}

/// Build a report against a store.
///
/// The criteria and narrative halves run concurrently. Any lookup failure
/// aborts the whole report; no partial bundle is returned.
pub fn build_report<S>(store: &S, request: &ReportRequest, options: &ReportOptions) -> Result<ReportBundle, LookupFailure>
where
    S: BugStore + Sync + ?Sized,
{
    debug!("Building report for country={:?} device={:?}", request.country, request.device);

    let (criteria, narrative) = try_join(
        || lookup_criteria(store, &request.country, &request.device),
        || {
            let bugs = store.fetch_bugs(&request.country, &request.device)?;
            let testers =
                if options.include_zero_bug_testers { Some(store.fetch_testers(&request.country)?) } else { None };
            Ok(render_with(&summarize(&bugs, testers.as_deref()), &options.render))
        },
    )?;

    Ok(bundle(criteria, narrative))
}

enum Done<A, B> {
    Left(Result<A, LookupFailure>),
    Right(Result<B, LookupFailure>),
}

/// Run two fallible computations on scoped threads.
///
/// Returns as soon as either side fails, with that side's error. The other
/// side's result is discarded.
fn try_join<A, B, FA, FB>(left: FA, right: FB) -> Result<(A, B), LookupFailure>
where
    A: Send,
    B: Send,
    FA: FnOnce() -> Result<A, LookupFailure> + Send,
    FB: FnOnce() -> Result<B, LookupFailure> + Send,
{
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        let left_tx = tx.clone();
        scope.spawn(move || {
            let _ = left_tx.send(Done::Left(left()));
        });
        scope.spawn(move || {
            let _ = tx.send(Done::Right(right()));
        });

        let mut left_value = None;
        let mut right_value = None;
        for _ in 0..2 {
            match rx.recv() {
                Ok(Done::Left(result)) => left_value = Some(result?),
                Ok(Done::Right(result)) => right_value = Some(result?),
                Err(_) => break,
            }
        }

        match (left_value, right_value) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(LookupFailure::Store("report worker stopped without a result".to_string())),
        }
    })
}

#[cfg(test)]
#[path = "compose_test.rs"]
mod compose_test;
