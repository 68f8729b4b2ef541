//! Worked examples through the composition pipeline.

#![allow(clippy::unwrap_used)]

use trolley_core::{
    ComposeOptions, Edit, EntryStatus, Progress, ShoppingList, SortMode, Surface, UNSECTIONED,
    compose, compose_for, sort_entries,
};
use trolley_integration_tests::{ListBuilder, names};

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_walking_order_section_then_shelf() {
    let list = ListBuilder::new()
        .item("A", ("Bakery", 2), 1)
        .item("B", ("Produce", 1), 5)
        .item("C", ("Produce", 1), 1)
        .build();

    let composed = compose(&list, ComposeOptions::default());
    assert_eq!(names(composed.sections.flatten()), ["C", "B", "A"]);
    assert_eq!(composed.sections.section_names(), ["Produce", "Bakery"]);
}

#[test]
fn test_alphabetical_ignores_case() {
    let list = ListBuilder::new()
        .item("Banana", ("Produce", 1), 1)
        .item("apple", ("Produce", 1), 2)
        .item("Carrot", ("Produce", 1), 3)
        .build();

    let mut entries: Vec<_> = list.entries.iter().collect();
    sort_entries(&mut entries, SortMode::Alphabetical);
    assert_eq!(names(entries), ["apple", "Banana", "Carrot"]);
}

#[test]
fn test_missing_joins_sort_as_zero_and_stay_stable() {
    let list = ListBuilder::new()
        .item("Later", ("Deli", 3), 0)
        .orphan()
        .item("Entrance", ("Flowers", 0), 0)
        .build();
    let orphan = list.entries[1].id;
    let entrance = list.entries[2].id;

    let mut entries: Vec<_> = list.entries.iter().collect();
    sort_entries(&mut entries, SortMode::ByLocation);
    let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids[..2], [orphan, entrance]);

    let composed = compose(&list, ComposeOptions::default());
    assert_eq!(
        composed.sections.section_names(),
        [UNSECTIONED, "Flowers", "Deli"]
    );
}

// =============================================================================
// Filtering and progress
// =============================================================================

fn mixed_statuses() -> ShoppingList {
    ListBuilder::new()
        .item_with_status("Milk", ("Dairy", 2), 1, EntryStatus::Bought)
        .item_with_status("Eggs", ("Dairy", 2), 2, EntryStatus::Required)
        .item_with_status("Figs", ("Produce", 1), 1, EntryStatus::Unavailable)
        .item_with_status("Kale", ("Produce", 1), 2, EntryStatus::Bought)
        .item_with_status("Rye", ("Bakery", 3), 1, EntryStatus::Required)
        .build()
}

#[test]
fn test_progress_is_the_same_for_every_option() {
    let list = mixed_statuses();
    let expected = Progress {
        total: 5,
        completed: 2,
        unavailable: 1,
    };

    for include_completed in [false, true] {
        for sort_mode in [SortMode::ByLocation, SortMode::Alphabetical] {
            let options = ComposeOptions {
                include_completed,
                sort_mode,
            };
            assert_eq!(compose(&list, options).progress, expected, "{options:?}");
        }
    }
}

#[test]
fn test_shop_hides_completed_but_print_shows_all() {
    let list = mixed_statuses();

    let shop = compose_for(&list, Surface::Shop, ComposeOptions::default());
    assert_eq!(names(shop.sections.flatten()), ["Eggs", "Rye"]);

    let print = compose_for(&list, Surface::Print, ComposeOptions::default());
    assert_eq!(
        names(print.sections.flatten()),
        ["Figs", "Kale", "Milk", "Eggs", "Rye"]
    );
}

#[test]
fn test_empty_list() {
    let list = ListBuilder::new().build();
    for surface in [Surface::Shop, Surface::Print, Surface::Share] {
        let composed = compose_for(&list, surface, ComposeOptions::default());
        assert!(composed.is_empty());
        assert_eq!(composed.progress.total, 0);
    }
}

// =============================================================================
// Edits followed by recomposition
// =============================================================================

#[test]
fn test_decrement_at_one_stays_one() {
    let mut list = ListBuilder::new().item("Milk", ("Dairy", 1), 1).build();
    let entry = list.entries[0].id;

    list.apply(Edit::AdjustQuantity { entry, delta: -1 }).unwrap();
    assert_eq!(list.entries[0].quantity.get(), 1);
}

#[test]
fn test_ticking_off_updates_next_composition() {
    let mut list = mixed_statuses();
    let eggs = list.entries[1].id;

    list.apply(Edit::SetStatus {
        entry: eggs,
        status: EntryStatus::Bought,
    })
    .unwrap();

    let composed = compose(&list, ComposeOptions::default());
    assert_eq!(names(composed.sections.flatten()), ["Rye"]);
    assert_eq!(composed.progress.completed, 3);
}
