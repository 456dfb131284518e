/// Core data structures for bug matching
///
/// This module defines the selection model, the bug records handed to the
/// aggregator, the per-tester summaries it produces, and the report sections
/// consumed by the rendering layer.
use indexmap::{IndexMap, IndexSet};
use std::fmt;

/// One legal value of a filterable attribute (a country code, a device description)
pub type DomainValue = String;

/// Identifier of the tester who filed a bug
pub type TesterId = u64;

/// The fields a report can be filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Field {
    Country,
    Device,
}

impl Field {
    /// Label used in the search criteria clause
    pub fn label(&self) -> &'static str {
        match self {
            Field::Country => "Country",
            Field::Device => "Device",
        }
    }

    /// Logical collection the field lives in
    pub fn collection(&self) -> &'static str {
        match self {
            Field::Country => "testers",
            Field::Device => "devices",
        }
    }

    /// Column holding the field's values
    pub fn column(&self) -> &'static str {
        match self {
            Field::Country => "country",
            Field::Device => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.collection(), self.column())
    }
}

/// A filter choice for one field
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Selection {
    /// Every value of the field
    All,
    /// Exactly one value
    Single(DomainValue),
    /// A non-empty, ordered set of values
    Subset(Vec<DomainValue>),
}

impl Selection {
    /// Sentinel spelling of [`Selection::All`] accepted from user input
    pub const ALL_KEYWORD: &'static str = "All";

    /// Build a subset selection, rejecting an empty list
    ///
    /// Duplicates are dropped, keeping the first occurrence so the
    /// caller's ordering survives.
    pub fn subset<I, S>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<DomainValue>,
    {
        let unique: IndexSet<DomainValue> = values.into_iter().map(Into::into).collect();

        if unique.is_empty() { None } else { Some(Selection::Subset(unique.into_iter().collect())) }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        if value == Selection::ALL_KEYWORD { Selection::All } else { Selection::Single(value.to_string()) }
    }
}

/// One filed defect, already joined with its filer and device
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BugRecord {
    pub filer_id: TesterId,
    pub filer_first_name: String,
    pub filer_last_name: String,
    pub device_label: String,
}

impl BugRecord {
    pub fn new(
        filer_id: TesterId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        device_label: impl Into<String>,
    ) -> Self {
        Self {
            filer_id,
            filer_first_name: first_name.into(),
            filer_last_name: last_name.into(),
            device_label: device_label.into(),
        }
    }

    /// "First Last" as shown in reports
    pub fn filer_display_name(&self) -> String {
        format!("{} {}", self.filer_first_name, self.filer_last_name)
    }
}

/// Bug counts for one tester, by device and in total
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TesterSummary {
    pub tester_id: TesterId,
    pub display_name: String,
    /// Device label -> count, in the order each device was first seen for this tester
    pub per_device_counts: IndexMap<String, usize>,
    pub total_count: usize,
}

impl TesterSummary {
    /// Create a summary with no bugs counted yet
    pub fn new(tester_id: TesterId, display_name: impl Into<String>) -> Self {
        Self { tester_id, display_name: display_name.into(), per_device_counts: IndexMap::new(), total_count: 0 }
    }

    /// Count one bug against a device
    pub fn record(&mut self, device_label: &str) {
        *self.per_device_counts.entry(device_label.to_string()).or_insert(0) += 1;
        self.total_count += 1;
    }

    /// Check if this tester has no bugs for the searched devices
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// A headered block of report text
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ReportSection {
    /// Header label; empty for the narrative body
    pub header: String,
    pub text: String,
}

impl ReportSection {
    pub fn new(header: impl Into<String>, text: impl Into<String>) -> Self {
        Self { header: header.into(), text: text.into() }
    }
}

/// The four sections of a finished report, in display order
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBundle {
    pub search_criteria: ReportSection,
    pub matches: ReportSection,
    pub body: ReportSection,
    pub results: ReportSection,
}

impl ReportBundle {
    /// Sections in display order
    pub fn sections(&self) -> [&ReportSection; 4] {
        [&self.search_criteria, &self.matches, &self.body, &self.results]
    }
}
