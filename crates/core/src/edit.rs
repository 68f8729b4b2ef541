//! Local edits applied to a list snapshot.
//!
//! The backend is the source of truth, but a surface may apply the same
//! change to the snapshot it holds so the next [`compose`](crate::compose)
//! reflects it before the change notification arrives.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Product, ShoppingList, ShoppingListEntry};
use crate::types::{EntryId, EntryStatus, Quantity};

/// Errors from applying an [`Edit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("entry not found: {0}")]
    EntryNotFound(EntryId),
}

/// A change to one list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    /// Add `delta` to the quantity, clamping at one.
    AdjustQuantity { entry: EntryId, delta: i64 },
    /// Replace the quantity.
    SetQuantity { entry: EntryId, quantity: Quantity },
    SetStatus { entry: EntryId, status: EntryStatus },
    Remove { entry: EntryId },
    /// Put a product on the list at its default quantity.
    AddProduct { product: Box<Product> },
}

/// What an applied edit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// An existing entry changed.
    Updated(EntryId),
    /// A new entry was appended.
    Added(EntryId),
    /// The entry was removed.
    Removed(ShoppingListEntry),
}

impl ShoppingList {
    /// Apply `edit` to this snapshot.
    ///
    /// Adding a product that is already on the list raises that entry's
    /// quantity by the product's default quantity instead of adding a second
    /// line.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EntryNotFound`] when the edit targets an entry
    /// that is not in the snapshot.
    pub fn apply(&mut self, edit: Edit) -> Result<EditOutcome, EditError> {
        tracing::debug!(list_id = %self.id, ?edit, "applying list edit");

        match edit {
            Edit::AdjustQuantity { entry, delta } => {
                let target = self.entry_mut(entry)?;
                target.quantity = target.quantity.adjust(delta);
                Ok(EditOutcome::Updated(entry))
            }
            Edit::SetQuantity { entry, quantity } => {
                self.entry_mut(entry)?.quantity = quantity;
                Ok(EditOutcome::Updated(entry))
            }
            Edit::SetStatus { entry, status } => {
                self.entry_mut(entry)?.status = status;
                Ok(EditOutcome::Updated(entry))
            }
            Edit::Remove { entry } => {
                let index = self
                    .entries
                    .iter()
                    .position(|e| e.id == entry)
                    .ok_or(EditError::EntryNotFound(entry))?;
                Ok(EditOutcome::Removed(self.entries.remove(index)))
            }
            Edit::AddProduct { product } => {
                if let Some(existing) = self.entries.iter_mut().find(|e| e.product_id == product.id)
                {
                    existing.quantity = existing.quantity.saturating_add(product.default_quantity);
                    return Ok(EditOutcome::Updated(existing.id));
                }
                let entry = ShoppingListEntry::for_product(self.id, &product);
                let id = entry.id;
                self.entries.push(entry);
                Ok(EditOutcome::Added(id))
            }
        }
    }

    fn entry_mut(&mut self, id: EntryId) -> Result<&mut ShoppingListEntry, EditError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EditError::EntryNotFound(id))
    }
}
