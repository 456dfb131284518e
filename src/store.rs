/// Store interfaces and the in-memory reference store
///
/// The report pipeline never touches storage directly. It asks a store for
/// the domain of a field, for the bugs matching a pair of selections, and
/// for the testers matching a country selection. `MemoryStore` implements
/// all three over a dataset loaded from TOML.
use crate::describe::FilterClause;
use crate::error::LookupFailure;
use crate::types::{BugRecord, DomainValue, Field, Selection, TesterId};
use chrono::NaiveDateTime;
use indexmap::IndexSet;
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Source of the full domain of a filterable field
pub trait DomainLookup {
    /// Every distinct value of `field`, in stable first-seen order
    fn fetch_domain(&self, field: Field) -> Result<Vec<DomainValue>, LookupFailure>;
}

/// Source of filtered bug records and testers
pub trait BugSource {
    /// Bugs whose filer country and device match the selections
    fn fetch_bugs(&self, country: &Selection, device: &Selection) -> Result<Vec<BugRecord>, LookupFailure>;

    /// Testers whose country matches the selection, in store order
    fn fetch_testers(&self, country: &Selection) -> Result<Vec<Tester>, LookupFailure>;
}

/// Everything a report needs from a store
pub trait BugStore: DomainLookup + BugSource {}

impl<T: DomainLookup + BugSource> BugStore for T {}

/// A tester known to the store
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tester {
    pub tester_id: TesterId,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    #[serde(default, with = "login_format", skip_serializing_if = "Option::is_none")]
    pub last_login: Option<NaiveDateTime>,
}

impl Tester {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A device model known to the store
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Device {
    pub device_id: u64,
    pub description: String,
}

/// A filed bug, referencing its tester and device by id
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bug {
    pub bug_id: u64,
    pub device_id: u64,
    pub tester_id: TesterId,
}

/// Raw dataset as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub testers: Vec<Tester>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub bugs: Vec<Bug>,
}

/// `YYYY-MM-DD HH:MM:SS` timestamps, as exported by the tester tracker
mod login_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)).transpose()
    }
}

/// In-memory store over a validated dataset
#[derive(Debug, Clone)]
pub struct MemoryStore {
    dataset: Dataset,
    tester_index: HashMap<TesterId, usize>,
    device_index: HashMap<u64, usize>,
}

impl MemoryStore {
    /// Build a store, checking that every bug references a known tester and device
    pub fn from_dataset(dataset: Dataset) -> Result<Self, String> {
        let mut tester_index = HashMap::new();
        for (idx, tester) in dataset.testers.iter().enumerate() {
            if tester_index.insert(tester.tester_id, idx).is_some() {
                return Err(format!("Duplicate tester id {}", tester.tester_id));
            }
        }

        let mut device_index = HashMap::new();
        for (idx, device) in dataset.devices.iter().enumerate() {
            if device_index.insert(device.device_id, idx).is_some() {
                return Err(format!("Duplicate device id {}", device.device_id));
            }
        }

        for bug in &dataset.bugs {
            if !tester_index.contains_key(&bug.tester_id) {
                return Err(format!("Bug {} references unknown tester {}", bug.bug_id, bug.tester_id));
            }
            if !device_index.contains_key(&bug.device_id) {
                return Err(format!("Bug {} references unknown device {}", bug.bug_id, bug.device_id));
            }
        }

        Ok(Self { dataset, tester_index, device_index })
    }

    /// Load and validate a TOML dataset file
    pub fn load(path: &Path) -> Result<Self, String> {
        let s = fs::read_to_string(path).map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
        let dataset: Dataset = toml::from_str(&s).map_err(|e| format!("Failed to parse TOML in {:?}: {}", path, e))?;

        info!(
            "Loaded {} testers, {} devices, {} bugs from {}",
            dataset.testers.len(),
            dataset.devices.len(),
            dataset.bugs.len(),
            path.display()
        );

        Self::from_dataset(dataset)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Distinct values of a column, addressed by name
    ///
    /// Values keep the order of their first appearance.
    pub fn field_values(&self, column: &str, collection: &str) -> Result<Vec<DomainValue>, LookupFailure> {
        let values: Vec<String> = match collection {
            "testers" => self.dataset.testers.iter().map(|t| tester_column(t, column)).collect::<Result<Vec<_>, _>>()?,
            "devices" => self.dataset.devices.iter().map(|d| device_column(d, column)).collect::<Result<Vec<_>, _>>()?,
            "bugs" => self.dataset.bugs.iter().map(|b| bug_column(b, column)).collect::<Result<Vec<_>, _>>()?,
            other => return Err(LookupFailure::UnknownCollection(other.to_string())),
        };

        // An empty collection still has to reject unknown columns
        if values.is_empty() {
            check_column(collection, column)?;
        }

        let unique: IndexSet<String> = values.into_iter().collect();
        Ok(unique.into_iter().collect())
    }

    fn tester(&self, id: TesterId) -> Option<&Tester> {
        self.tester_index.get(&id).map(|&idx| &self.dataset.testers[idx])
    }

    fn device(&self, id: u64) -> Option<&Device> {
        self.device_index.get(&id).map(|&idx| &self.dataset.devices[idx])
    }
}

const TESTER_COLUMNS: &[&str] = &["tester_id", "first_name", "last_name", "country", "last_login"];
const DEVICE_COLUMNS: &[&str] = &["device_id", "description"];
const BUG_COLUMNS: &[&str] = &["bug_id", "device_id", "tester_id"];

fn check_column(collection: &str, column: &str) -> Result<(), LookupFailure> {
    let columns = match collection {
        "testers" => TESTER_COLUMNS,
        "devices" => DEVICE_COLUMNS,
        "bugs" => BUG_COLUMNS,
        other => return Err(LookupFailure::UnknownCollection(other.to_string())),
    };
    if columns.contains(&column) { Ok(()) } else { Err(LookupFailure::UnknownField(column.to_string())) }
}

fn tester_column(tester: &Tester, column: &str) -> Result<String, LookupFailure> {
    Ok(match column {
        "tester_id" => tester.tester_id.to_string(),
        "first_name" => tester.first_name.clone(),
        "last_name" => tester.last_name.clone(),
        "country" => tester.country.clone(),
        "last_login" => tester.last_login.map(|ts| ts.to_string()).unwrap_or_default(),
        other => return Err(LookupFailure::UnknownField(other.to_string())),
    })
}

fn device_column(device: &Device, column: &str) -> Result<String, LookupFailure> {
    Ok(match column {
        "device_id" => device.device_id.to_string(),
        "description" => device.description.clone(),
        other => return Err(LookupFailure::UnknownField(other.to_string())),
    })
}

fn bug_column(bug: &Bug, column: &str) -> Result<String, LookupFailure> {
    Ok(match column {
        "bug_id" => bug.bug_id.to_string(),
        "device_id" => bug.device_id.to_string(),
        "tester_id" => bug.tester_id.to_string(),
        other => return Err(LookupFailure::UnknownField(other.to_string())),
    })
}

impl DomainLookup for MemoryStore {
    fn fetch_domain(&self, field: Field) -> Result<Vec<DomainValue>, LookupFailure> {
        self.field_values(field.column(), field.collection())
    }
}

impl BugSource for MemoryStore {
    fn fetch_bugs(&self, country: &Selection, device: &Selection) -> Result<Vec<BugRecord>, LookupFailure> {
        let country_clause = FilterClause::from_selection(country);
        let device_clause = FilterClause::from_selection(device);

        debug!(
            "Fetching bugs WHERE bugs.tester_id=testers.tester_id AND bugs.device_id=devices.device_id{}{}",
            country_clause.to_sql_fragment(Field::Country),
            device_clause.to_sql_fragment(Field::Device)
        );

        let mut records = Vec::new();
        for bug in &self.dataset.bugs {
            // Both lookups were validated in from_dataset
            let (Some(tester), Some(device)) = (self.tester(bug.tester_id), self.device(bug.device_id)) else {
                return Err(LookupFailure::Store(format!("dangling references in bug {}", bug.bug_id)));
            };

            if country_clause.accepts(&tester.country) && device_clause.accepts(&device.description) {
                records.push(BugRecord::new(
                    tester.tester_id,
                    tester.first_name.clone(),
                    tester.last_name.clone(),
                    device.description.clone(),
                ));
            }
        }

        debug!("Matched {} of {} bugs", records.len(), self.dataset.bugs.len());
        Ok(records)
    }

    fn fetch_testers(&self, country: &Selection) -> Result<Vec<Tester>, LookupFailure> {
        let clause = FilterClause::from_selection(country);
        Ok(self.dataset.testers.iter().filter(|t| clause.accepts(&t.country)).cloned().collect())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
