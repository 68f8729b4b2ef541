//! Store-order comparison of list entries.
//!
//! Two orders are supported. [`SortMode::ByLocation`] follows the walk
//! through the store: section sequence first, then the product's position
//! inside the section. [`SortMode::Alphabetical`] orders by product name the
//! way a person would expect a list to read, ignoring case.
//!
//! Both comparisons return [`Ordering::Equal`] for entries with the same key;
//! [`sort_entries`] relies on a stable sort so those keep snapshot order.

use std::cell::RefCell;
use std::cmp::Ordering;

use feruca::Collator;
use serde::{Deserialize, Serialize};

use crate::model::ShoppingListEntry;
use crate::types::ParseError;

/// How entries are ordered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Section sequence, then product sequence.
    #[default]
    ByLocation,
    /// Product name, case-insensitive.
    Alphabetical,
}

impl SortMode {
    /// The other mode, as toggled from the shop surface.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::ByLocation => Self::Alphabetical,
            Self::Alphabetical => Self::ByLocation,
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByLocation => f.write_str("by-location"),
            Self::Alphabetical => f.write_str("alphabetical"),
        }
    }
}

impl std::str::FromStr for SortMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "location" | "by-location" | "by_location" => Ok(Self::ByLocation),
            "alphabetical" | "name" => Ok(Self::Alphabetical),
            _ => Err(ParseError::new("sort mode", s)),
        }
    }
}

/// Compare two entries under `mode`.
#[must_use]
pub fn compare_entries(a: &ShoppingListEntry, b: &ShoppingListEntry, mode: SortMode) -> Ordering {
    match mode {
        SortMode::ByLocation => a
            .section_sequence()
            .cmp(&b.section_sequence())
            .then_with(|| a.product_sequence().cmp(&b.product_sequence())),
        SortMode::Alphabetical => collate(a.product_name(), b.product_name()),
    }
}

/// Stable-sort `entries` in place under `mode`.
pub fn sort_entries<E>(entries: &mut [E], mode: SortMode)
where
    E: AsRef<ShoppingListEntry>,
{
    entries.sort_by(|a, b| compare_entries(a.as_ref(), b.as_ref(), mode));
}

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Human-oriented string comparison.
///
/// Uses the Unicode Collation Algorithm with the CLDR root ordering, so
/// `apple` sorts before `Banana` and `Éclair` sorts among the other `e`
/// names. Names that collate equal fall back to byte order so the result is
/// a total order.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with_borrow_mut(|collator| collator.collate(a, b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Product, StoreSection};
    use crate::types::{ListId, SectionId};

    fn entry(name: &str, section_seq: i32, product_seq: i32) -> ShoppingListEntry {
        let section = StoreSection::new(format!("Section {section_seq}"), section_seq);
        let product = Product::new(name, &section).with_sequence(product_seq);
        ShoppingListEntry::for_product(ListId::new_v4(), &product)
    }

    fn names(entries: &[ShoppingListEntry]) -> Vec<&str> {
        entries.iter().map(ShoppingListEntry::product_name).collect()
    }

    #[test]
    fn test_by_location_section_then_product() {
        let mut entries = vec![entry("A", 2, 1), entry("B", 1, 5), entry("C", 1, 1)];
        sort_entries(&mut entries, SortMode::ByLocation);
        assert_eq!(names(&entries), ["C", "B", "A"]);
    }

    #[test]
    fn test_section_dominates_product_sequence() {
        let mut entries = vec![entry("late", 3, -100), entry("early", 1, 100)];
        sort_entries(&mut entries, SortMode::ByLocation);
        assert_eq!(names(&entries), ["early", "late"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut entries = vec![entry("first", 1, 1), entry("second", 1, 1), entry("third", 1, 1)];
        sort_entries(&mut entries, SortMode::ByLocation);
        assert_eq!(names(&entries), ["first", "second", "third"]);
    }

    #[test]
    fn test_missing_product_sorts_as_zero() {
        let mut orphan = entry("ignored", 0, 0);
        orphan.product = None;
        let zero = entry("zero", 0, 0);
        let mut entries = vec![entry("one", 1, 0), orphan.clone(), zero.clone()];
        sort_entries(&mut entries, SortMode::ByLocation);
        assert_eq!(entries[0].id, orphan.id);
        assert_eq!(entries[1].id, zero.id);
    }

    #[test]
    fn test_missing_section_sorts_as_zero() {
        let product = Product::unjoined("loose", SectionId::new_v4()).with_sequence(2);
        let loose = ShoppingListEntry::for_product(ListId::new_v4(), &product);
        let mut entries = vec![entry("dairy", 1, 1), loose];
        sort_entries(&mut entries, SortMode::ByLocation);
        assert_eq!(names(&entries), ["loose", "dairy"]);
    }

    #[test]
    fn test_alphabetical_ignores_case() {
        let mut entries = vec![entry("Banana", 0, 0), entry("apple", 0, 0), entry("Carrot", 0, 0)];
        sort_entries(&mut entries, SortMode::Alphabetical);
        assert_eq!(names(&entries), ["apple", "Banana", "Carrot"]);
    }

    #[test]
    fn test_alphabetical_missing_name_first() {
        let mut orphan = entry("x", 0, 0);
        orphan.product = None;
        let mut entries = vec![entry("apple", 0, 0), orphan];
        sort_entries(&mut entries, SortMode::Alphabetical);
        assert_eq!(names(&entries), ["", "apple"]);
    }

    #[test]
    fn test_collate() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("apple", "Apple"), Ordering::Less);
        assert_eq!(collate("Apple", "apple"), Ordering::Greater);
        assert_eq!(collate("pear", "pear"), Ordering::Equal);
        assert_eq!(collate("pea", "Pear"), Ordering::Less);
        assert_eq!(collate("Éclair", "éclair"), Ordering::Greater);
    }

    #[test]
    fn test_collate_accented_names() {
        assert_eq!(collate("Éclair", "Zucchini"), Ordering::Less);
        assert_eq!(collate("éclair", "eggs"), Ordering::Less);
        assert_eq!(collate("Ñame", "Nectarine"), Ordering::Less);

        let mut entries = vec![
            entry("Zucchini", 0, 0),
            entry("Éclair", 0, 0),
            entry("apple", 0, 0),
            entry("Endive", 0, 0),
        ];
        sort_entries(&mut entries, SortMode::Alphabetical);
        assert_eq!(names(&entries), ["apple", "Éclair", "Endive", "Zucchini"]);
    }

    #[test]
    fn test_sort_mode_parse_and_toggle() {
        assert_eq!("location".parse::<SortMode>().unwrap(), SortMode::ByLocation);
        assert_eq!("Name".parse::<SortMode>().unwrap(), SortMode::Alphabetical);
        assert!("price".parse::<SortMode>().is_err());
        assert_eq!(SortMode::ByLocation.toggled(), SortMode::Alphabetical);
        assert_eq!(SortMode::default().to_string(), "by-location");
    }
}
