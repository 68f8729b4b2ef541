//! Trolley Core - Shopping list model and store-order composition.
//!
//! This crate provides the types and pure transforms shared by every Trolley
//! surface:
//! - shop mode (walk the store in aisle order, tick items off)
//! - print layout (a paper checklist grouped by section)
//! - share/export (checklist text and the unavailable-items message)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no backend
//! client, no file access. Callers fetch a [`ShoppingList`] snapshot from the
//! backend, hand it to [`compose`], and render the resulting
//! [`ComposedList`]. Whenever the snapshot changes they compose again.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, statuses, quantities and prices
//! - [`model`] - Sections, products, list entries and list snapshots
//! - [`ordering`] - Store-order and alphabetical entry comparison
//! - [`grouping`] - Partitioning sorted entries into section buckets
//! - [`compose`] - The filter/sort/group pipeline and progress accounting
//! - [`edit`] - Local edits applied to a snapshot
//! - [`share`] - Share and export text
//! - [`catalog`] - Product and section catalog maintenance

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod compose;
pub mod edit;
pub mod grouping;
pub mod model;
pub mod ordering;
pub mod share;
pub mod types;

pub use catalog::{Catalog, CatalogError, ProductDraft, SectionDraft};
pub use compose::{ComposeOptions, ComposedList, Progress, Surface, compose, compose_for};
pub use edit::{Edit, EditError, EditOutcome};
pub use grouping::{SectionGroups, group_by_section};
pub use model::{Product, ShoppingList, ShoppingListEntry, StoreSection, UNSECTIONED};
pub use ordering::{SortMode, compare_entries, sort_entries};
pub use types::*;
