//! Plain-text rendering of composed lists.
//!
//! One renderer per surface. All of them take the output of
//! [`compose_for`](trolley_core::compose_for), so they agree on which
//! entries appear and in what order.

use std::fmt::Write as _;

use trolley_core::share::{checklist_line, share_title};
use trolley_core::{ComposedList, EntryStatus, ShoppingList, ShoppingListEntry, SortMode};

/// Shown by the print surface when the list has no entries at all.
pub const EMPTY_LIST: &str = "No items in current shopping list";

/// Shown by the shop surface when every visible entry was filtered out.
pub const NOTHING_LEFT: &str = "Nothing left to pick up";

const DATE_FORMAT: &str = "%-d %B %Y";

/// Render the interactive shop surface.
#[must_use]
pub fn render_shop(composed: &ComposedList<'_>, show_ids: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Shopping Progress: {}", composed.progress);
    let _ = writeln!(
        out,
        "Sorted by {} · {}",
        match composed.options.sort_mode {
            SortMode::ByLocation => "location",
            SortMode::Alphabetical => "name",
        },
        if composed.options.include_completed {
            "showing completed"
        } else {
            "hiding completed"
        }
    );

    if composed.is_empty() {
        let _ = writeln!(out, "\n{NOTHING_LEFT}");
        return out;
    }

    for (section, entries) in composed.sections.iter() {
        let _ = writeln!(out, "\n{section}");
        for entry in entries {
            let _ = writeln!(out, "  {}", shop_line(entry, show_ids));
        }
    }
    out
}

fn shop_line(entry: &ShoppingListEntry, show_ids: bool) -> String {
    let marker = match entry.status {
        EntryStatus::Required => "[ ]",
        EntryStatus::Bought => "[x]",
        EntryStatus::Unavailable => "[-]",
    };
    let mut line = format!("{marker} {}", entry.product_name());
    if entry.quantity.get() > 1 {
        let _ = write!(line, " x{}", entry.quantity);
    }
    if let Some(max) = entry.max_price {
        let _ = write!(line, " (max {max})");
    }
    if let Some(notes) = entry
        .product
        .as_ref()
        .and_then(|p| p.notes.as_deref())
        .filter(|n| !n.is_empty())
    {
        let _ = write!(line, " - {notes}");
    }
    if show_ids {
        let _ = write!(line, "  #{}", entry.id);
    }
    line
}

/// Render the paper checklist.
#[must_use]
pub fn render_print(list: &ShoppingList, composed: &ComposedList<'_>) -> String {
    if composed.is_empty() {
        return format!("{EMPTY_LIST}\n");
    }

    let mut out = String::new();
    let _ = writeln!(out, "Shopping List");
    let _ = writeln!(out, "{}", list.date.format(DATE_FORMAT));

    let width = composed
        .sections
        .flatten()
        .iter()
        .map(|e| e.product_name().chars().count())
        .max()
        .unwrap_or(0);

    for (section, entries) in composed.sections.iter() {
        let _ = writeln!(out, "\n{section}");
        let _ = writeln!(out, "{}", "-".repeat(section.chars().count()));
        for entry in entries {
            let _ = writeln!(
                out,
                "[ ] {:<width$}  Qty: {}",
                entry.product_name(),
                entry.quantity
            );
        }
    }
    out
}

/// Render the share/export text.
#[must_use]
pub fn render_share(list: &ShoppingList, composed: &ComposedList<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", share_title(list));
    for (section, entries) in composed.sections.iter() {
        let _ = writeln!(out, "\n{section}");
        for entry in entries {
            let _ = writeln!(out, "{}", checklist_line(entry));
        }
    }
    out
}
