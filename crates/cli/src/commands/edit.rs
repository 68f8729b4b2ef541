//! Apply edits to the snapshot file.
//!
//! # Usage
//!
//! ```bash
//! trolley edit qty <entry-id> -1
//! trolley edit status <entry-id> bought
//! trolley edit add <product-id>      # needs --catalog or TROLLEY_CATALOG
//! ```

use std::io::Write;

use trolley_core::{CatalogError, Edit, EditOutcome, ProductId, ShoppingList, ShoppingListEntry};

use super::{Context, write_json};
use crate::error::Result;
use crate::files::{load_catalog, load_snapshot, save_snapshot};

/// Apply `edit` to the snapshot and write it back.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or saved, or the edit
/// targets an entry that is not on the list.
pub async fn apply(ctx: &Context, edit: Edit, out: &mut impl Write) -> Result<()> {
    let path = ctx.snapshot_path()?;
    let mut list = load_snapshot(&path).await?;
    let outcome = list.apply(edit)?;
    save_snapshot(&path, &list).await?;

    match &outcome {
        EditOutcome::Updated(id) => {
            tracing::info!(entry = %id, "entry updated");
        }
        EditOutcome::Added(id) => {
            tracing::info!(entry = %id, "entry added");
        }
        EditOutcome::Removed(entry) => {
            tracing::info!(entry = %entry.id, "entry removed");
        }
    }

    if ctx.json {
        return write_json(out, &touched_entry(&list, &outcome));
    }
    match outcome {
        EditOutcome::Updated(id) => writeln!(out, "Updated entry {id}")?,
        EditOutcome::Added(id) => writeln!(out, "Added entry {id}")?,
        EditOutcome::Removed(entry) => {
            writeln!(out, "Removed {} ({})", entry.product_name(), entry.id)?;
        }
    }
    Ok(())
}

/// Put a catalog product on the list.
///
/// # Errors
///
/// Returns an error if no catalog is configured, the product is not in it,
/// or the snapshot cannot be updated.
pub async fn add_product(ctx: &Context, product: ProductId, out: &mut impl Write) -> Result<()> {
    let catalog = load_catalog(&ctx.catalog_path()?).await?;
    let product = catalog
        .joined_product(product)
        .ok_or(CatalogError::UnknownProduct(product))?;
    apply(
        ctx,
        Edit::AddProduct {
            product: Box::new(product),
        },
        out,
    )
    .await
}

/// The entry an edit changed, as it now stands.
fn touched_entry(list: &ShoppingList, outcome: &EditOutcome) -> Option<ShoppingListEntry> {
    match outcome {
        EditOutcome::Updated(id) | EditOutcome::Added(id) => list.entry(*id).cloned(),
        EditOutcome::Removed(entry) => Some(entry.clone()),
    }
}
