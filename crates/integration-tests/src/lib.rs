//! Integration tests for Trolley.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p trolley-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `list_scenarios` - worked examples through the composition pipeline
//! - `composition_properties` - `proptest` properties of sort, filter and group
//! - `cli_surfaces` - commands run against snapshot and catalog files
//!
//! Shared fixtures live here so every test file builds lists the same way.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::NaiveDate;
use trolley_core::{EntryStatus, Product, ShoppingList, ShoppingListEntry, StoreSection};

/// The date every fixture list is for.
#[must_use]
pub fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap_or_default()
}

/// Builds lists entry by entry, creating sections on first mention.
#[derive(Debug)]
pub struct ListBuilder {
    list: ShoppingList,
    sections: Vec<StoreSection>,
}

impl Default for ListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ListBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: ShoppingList::new(fixture_date()),
            sections: Vec::new(),
        }
    }

    /// Add a `required` entry.
    #[must_use]
    pub fn item(self, name: &str, section: (&str, i32), sequence: i32) -> Self {
        self.item_with_status(name, section, sequence, EntryStatus::Required)
    }

    #[must_use]
    pub fn item_with_status(
        mut self,
        name: &str,
        (section_name, section_sequence): (&str, i32),
        sequence: i32,
        status: EntryStatus,
    ) -> Self {
        let section = self.section(section_name, section_sequence);
        let product = Product::new(name, &section).with_sequence(sequence);
        self.list
            .entries
            .push(ShoppingListEntry::for_product(self.list.id, &product).with_status(status));
        self
    }

    /// Add an entry whose product join is missing.
    #[must_use]
    pub fn orphan(mut self) -> Self {
        let product = Product::unjoined("", trolley_core::SectionId::new_v4());
        let mut entry = ShoppingListEntry::for_product(self.list.id, &product);
        entry.product = None;
        self.list.entries.push(entry);
        self
    }

    #[must_use]
    pub fn build(self) -> ShoppingList {
        self.list
    }

    fn section(&mut self, name: &str, sequence: i32) -> StoreSection {
        if let Some(existing) = self.sections.iter().find(|s| s.name == name) {
            return existing.clone();
        }
        let section = StoreSection::new(name, sequence);
        self.sections.push(section.clone());
        section
    }
}

/// Product names in output order.
#[must_use]
pub fn names<'a, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ShoppingListEntry>,
{
    entries
        .into_iter()
        .map(|e| e.product_name().to_string())
        .collect()
}
