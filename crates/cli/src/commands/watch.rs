//! Live shop surface.
//!
//! Polls the snapshot file and re-renders the shop surface whenever it
//! changes, until Ctrl+C.

use std::io::Write;
use std::sync::Arc;

use trolley_core::{Catalog, ComposeOptions, ShoppingList, Surface, compose_for};

use super::Context;
use crate::error::Result;
use crate::feed::{FileSnapshotSource, SnapshotFeed, SnapshotReceiver};
use crate::render::render_shop;

/// Clear the terminal and move the cursor home.
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Watch the snapshot until Ctrl+C.
///
/// # Errors
///
/// Returns an error if no snapshot is configured, a configured catalog
/// cannot be loaded, or output fails.
pub async fn watch(ctx: &Context, options: ComposeOptions, out: &mut impl Write) -> Result<()> {
    let path = ctx.snapshot_path()?;
    let catalog = ctx.optional_catalog().await?;

    let feed = Arc::new(SnapshotFeed::new());
    let rx = feed.subscribe();
    let source = FileSnapshotSource::new(path, ctx.config.poll_interval);
    let poller = tokio::spawn(source.run(Arc::clone(&feed)));

    let result = tokio::select! {
        result = render_updates(rx, catalog.as_ref(), options, true, out) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("stopped watching");
            Ok(())
        }
    };
    poller.abort();
    result
}

/// Render the shop surface for every snapshot `rx` receives.
///
/// Returns once the feed is dropped.
///
/// # Errors
///
/// Returns an error if output fails.
pub async fn render_updates(
    mut rx: SnapshotReceiver,
    catalog: Option<&Catalog>,
    options: ComposeOptions,
    clear: bool,
    out: &mut impl Write,
) -> Result<()> {
    while rx.changed().await.is_ok() {
        let Some(snapshot) = rx.borrow_and_update().clone() else {
            continue;
        };
        let list = joined(snapshot, catalog);
        let composed = compose_for(&list, Surface::Shop, options);
        if clear {
            write!(out, "{CLEAR}")?;
        }
        write!(out, "{}", render_shop(&composed, false))?;
        writeln!(out)?;
        out.flush()?;
    }
    Ok(())
}

fn joined(snapshot: Arc<ShoppingList>, catalog: Option<&Catalog>) -> Arc<ShoppingList> {
    match catalog {
        Some(catalog) => {
            let mut list = Arc::unwrap_or_clone(snapshot);
            catalog.join(&mut list);
            Arc::new(list)
        }
        None => snapshot,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use trolley_core::{EntryStatus, Product, ShoppingListEntry, StoreSection};

    use super::*;

    #[tokio::test]
    async fn test_rerenders_on_each_publish() {
        let section = StoreSection::new("Deli", 1);
        let mut list = ShoppingList::new(NaiveDate::from_ymd_opt(2024, 9, 7).unwrap());
        let ham = Product::new("Ham", &section);
        list.entries.push(ShoppingListEntry::for_product(list.id, &ham));

        let feed = SnapshotFeed::new();
        let rx = feed.subscribe();
        let renderer = tokio::spawn(async move {
            let mut out = Vec::new();
            render_updates(rx, None, ComposeOptions::default(), false, &mut out)
                .await
                .unwrap();
            String::from_utf8(out).unwrap()
        });

        feed.publish(list.clone());
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        list.entries[0].status = EntryStatus::Bought;
        feed.publish(list);
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        drop(feed);

        let text = renderer.await.unwrap();
        assert!(text.contains("[ ] Ham"));
        assert!(text.ends_with("Nothing left to pick up\n\n"));
    }

    #[test]
    fn test_joined_fills_products() {
        let mut catalog = Catalog::default();
        let section = StoreSection::new("Deli", 1);
        catalog.sections.push(section.clone());
        let ham = Product::unjoined("Ham", section.id);
        catalog.products.push(ham.clone());

        let mut list = ShoppingList::new(NaiveDate::from_ymd_opt(2024, 9, 7).unwrap());
        let mut entry = ShoppingListEntry::for_product(list.id, &ham);
        entry.product = None;
        list.entries.push(entry);

        let list = joined(Arc::new(list), Some(&catalog));
        assert_eq!(list.entries[0].section_name(), "Deli");
    }
}
