/// Predicate describer
///
/// Turns a selection into the human-readable clause shown under
/// "Search Criteria:", and into the typed filter clause a store applies.
use crate::error::LookupFailure;
use crate::store::DomainLookup;
use crate::types::{DomainValue, Field, Selection};
use log::debug;
use std::collections::HashSet;

/// Describe a selection against the full domain of its field.
///
/// A subset equal to the domain (as a set, in any order) collapses to
/// `label="All"`. Any other subset keeps the selection's own ordering.
pub fn describe(selection: &Selection, full_domain: &[DomainValue], label: &str) -> String {
    match selection {
        Selection::All => format!("{}=\"All\"", label),
        Selection::Single(value) => format!("{}=\"{}\"", label, value),
        Selection::Subset(values) => {
            if same_set(values, full_domain) {
                format!("{}=\"All\"", label)
            } else {
                let quoted: Vec<String> = values.iter().map(|v| format!("\"{}\"", v)).collect();
                format!("{}={}", label, quoted.join(" or "))
            }
        }
    }
}

/// Fetch the domain of `field` and describe `selection` against it
pub fn describe_field<L>(lookup: &L, field: Field, selection: &Selection) -> Result<String, LookupFailure>
where
    L: DomainLookup + ?Sized,
{
    let domain = lookup.fetch_domain(field)?;
    debug!("Describing {} selection against {} domain values", field.label(), domain.len());
    Ok(describe(selection, &domain, field.label()))
}

fn same_set(a: &[DomainValue], b: &[DomainValue]) -> bool {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a == b
}

/// A selection translated into a store predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    /// No restriction
    Any,
    /// Field equals one value
    Equals(DomainValue),
    /// Field equals any of the values
    AnyOf(Vec<DomainValue>),
}

impl FilterClause {
    pub fn from_selection(selection: &Selection) -> Self {
        match selection {
            Selection::All => FilterClause::Any,
            Selection::Single(value) => FilterClause::Equals(value.clone()),
            Selection::Subset(values) => FilterClause::AnyOf(values.clone()),
        }
    }

    /// Check whether a field value satisfies the clause
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            FilterClause::Any => true,
            FilterClause::Equals(v) => v == value,
            FilterClause::AnyOf(values) => values.iter().any(|v| v == value),
        }
    }

    /// Render as a `WHERE` fragment, for diagnostics
    ///
    /// `Any` renders empty so fragments can be appended to a join
    /// condition unconditionally.
    pub fn to_sql_fragment(&self, field: Field) -> String {
        match self {
            FilterClause::Any => String::new(),
            FilterClause::Equals(value) => format!(" AND {}=\"{}\"", field, value),
            FilterClause::AnyOf(values) => {
                let terms: Vec<String> = values.iter().map(|v| format!("{}=\"{}\"", field, v)).collect();
                format!(" AND ({})", terms.join(" OR "))
            }
        }
    }
}

#[cfg(test)]
#[path = "describe_test.rs"]
mod describe_test;
