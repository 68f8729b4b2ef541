//! Share and export text.

use crate::model::{ShoppingList, ShoppingListEntry};
use crate::types::EntryStatus;

/// Heading of the unavailable-items message.
pub const UNAVAILABLE_HEADING: &str = "Unavailable Items:";

/// Message listing every unavailable product, one per line.
///
/// Entries whose product did not resolve are skipped. Returns `None` when
/// there is nothing to report.
#[must_use]
pub fn unavailable_share_text(list: &ShoppingList) -> Option<String> {
    let names: Vec<&str> = list
        .entries
        .iter()
        .filter(|e| e.status == EntryStatus::Unavailable)
        .map(ShoppingListEntry::product_name)
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        return None;
    }
    Some(format!("{UNAVAILABLE_HEADING}\n{}", names.join("\n")))
}

/// Title used when sharing the list.
#[must_use]
pub fn share_title(list: &ShoppingList) -> String {
    format!("Shopping List for {}", list.date.format("%-d %B %Y"))
}

/// One checklist line of the export, e.g. `□ Eggs (x2)`.
#[must_use]
pub fn checklist_line(entry: &ShoppingListEntry) -> String {
    let quantity = entry.quantity.get();
    if quantity > 1 {
        format!("□ {} (x{quantity})", entry.product_name())
    } else {
        format!("□ {}", entry.product_name())
    }
}
