//! Catalog vs. device reconciliation

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::{CatalogEntry, CatalogPage};

/// How repeated catalog names are reported as missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Every catalog occurrence is evaluated on its own; a duplicated
    /// missing name shows up once per occurrence
    #[default]
    KeepAll,
    /// Only the first occurrence of a missing name is kept
    FirstOccurrence,
}

/// Snapshot of the file names in the device's song folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFileSet {
    names: HashSet<String>,
}

impl DeviceFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DeviceFileSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Catalog entries absent from the device, in traversal order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingSet {
    entries: Vec<CatalogEntry>,
}

impl MissingSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a MissingSet {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Collect every catalog entry whose name is not on the device.
///
/// Pages are walked in the order given and entries in page order, so the
/// result is deterministic for a given input.
pub fn reconcile(
    pages: &[CatalogPage],
    device_files: &DeviceFileSet,
    policy: DuplicatePolicy,
) -> MissingSet {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut entries = Vec::new();

    for entry in pages.iter().flat_map(|page| page.entries.iter()) {
        if device_files.contains(&entry.name) {
            continue;
        }
        if policy == DuplicatePolicy::FirstOccurrence && !seen.insert(entry.name.as_str()) {
            continue;
        }
        entries.push(entry.clone());
    }

    tracing::info!(
        "{} of {} catalog entries missing from device",
        entries.len(),
        pages.iter().map(|p| p.entries.len()).sum::<usize>()
    );

    MissingSet { entries }
}
