//! Partitioning sorted entries into store-section buckets.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::ShoppingListEntry;

/// Entries bucketed by section display name.
///
/// Buckets appear in the order their first entry was seen, and entries keep
/// their input order inside a bucket. When the input was sorted by location
/// the buckets therefore come out in walking order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SectionGroups<'a> {
    groups: IndexMap<&'a str, Vec<&'a ShoppingListEntry>>,
}

impl<'a> SectionGroups<'a> {
    /// Iterate `(section name, entries)` in bucket order.
    pub fn iter<'s>(&'s self) -> impl Iterator<Item = (&'a str, &'s [&'a ShoppingListEntry])> + 's {
        self.groups
            .iter()
            .map(|(name, entries)| (*name, entries.as_slice()))
    }

    /// Entries for one section, if any made it into the groups.
    #[must_use]
    pub fn get(&self, section: &str) -> Option<&[&'a ShoppingListEntry]> {
        self.groups.get(section).map(Vec::as_slice)
    }

    /// Section names in bucket order.
    #[must_use]
    pub fn section_names(&self) -> Vec<&'a str> {
        self.groups.keys().copied().collect()
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of entries across all buckets.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// All entries, bucket after bucket.
    #[must_use]
    pub fn flatten(&self) -> Vec<&'a ShoppingListEntry> {
        self.groups.values().flatten().copied().collect()
    }
}

/// Bucket `sorted` by section name without reordering anything.
///
/// Entries whose product or section is missing land in
/// [`UNSECTIONED`](crate::model::UNSECTIONED).
pub fn group_by_section<'a, I>(sorted: I) -> SectionGroups<'a>
where
    I: IntoIterator<Item = &'a ShoppingListEntry>,
{
    let mut groups: IndexMap<&'a str, Vec<&'a ShoppingListEntry>> = IndexMap::new();
    for entry in sorted {
        groups.entry(entry.section_name()).or_default().push(entry);
    }
    SectionGroups { groups }
}
