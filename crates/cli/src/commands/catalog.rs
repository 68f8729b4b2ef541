//! Browse and extend the catalog file.
//!
//! # Usage
//!
//! ```bash
//! trolley catalog sections
//! trolley catalog search onion
//! trolley catalog add-section "Frozen" --sequence 7
//! trolley catalog add-product "Peas" --section <section-id> --qty 2
//! trolley catalog update-product <product-id> "Garden peas" --section <section-id>
//! trolley catalog remove-section <section-id>
//! ```
//!
//! Updates replace the whole row, the same as re-submitting the edit form.

use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;
use trolley_core::{
    CatalogError, Product, ProductDraft, ProductId, SectionDraft, SectionId, StoreSection,
};

use super::{Context, write_json};
use crate::error::Result;
use crate::files::{load_catalog, save_catalog};

#[derive(Serialize)]
struct SectionListing<'a> {
    #[serde(flatten)]
    section: &'a StoreSection,
    products: usize,
}

/// List sections in walking order.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub async fn sections(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let catalog = load_catalog(&ctx.catalog_path()?).await?;
    let listings: Vec<SectionListing<'_>> = catalog
        .sections_in_order()
        .into_iter()
        .map(|section| SectionListing {
            section,
            products: catalog.products_in_section(section.id).len(),
        })
        .collect();

    if ctx.json {
        return write_json(out, &listings);
    }
    for listing in &listings {
        writeln!(
            out,
            "{:>3}  {}  ({} products)  #{}",
            listing.section.sequence_number,
            listing.section.name,
            listing.products,
            listing.section.id
        )?;
    }
    Ok(())
}

/// Show one section and its products in shelf order.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or has no such section.
pub async fn section(ctx: &Context, id: SectionId, out: &mut impl Write) -> Result<()> {
    let catalog = load_catalog(&ctx.catalog_path()?).await?;
    let section = catalog
        .section(id)
        .ok_or(CatalogError::UnknownSection(id))?;
    let products = catalog.products_in_section(id);

    if ctx.json {
        return write_json(out, &products);
    }
    writeln!(out, "{} (position {})", section.name, section.sequence_number)?;
    for product in products {
        writeln!(out, "  {}", product_line(product))?;
    }
    Ok(())
}

/// Find products by name or alias.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub async fn search(ctx: &Context, term: &str, out: &mut impl Write) -> Result<()> {
    let catalog = load_catalog(&ctx.catalog_path()?).await?;
    let found = catalog.search(term);
    tracing::debug!(term, matches = found.len(), "catalog search");

    if ctx.json {
        return write_json(out, &found);
    }
    if found.is_empty() {
        writeln!(out, "No products match \"{}\"", term.trim())?;
    }
    for product in found {
        let section = catalog
            .section(product.section_id)
            .map_or(trolley_core::UNSECTIONED, |s| s.name.as_str());
        writeln!(out, "{}  [{section}]", product_line(product))?;
    }
    Ok(())
}

/// Validate and append a section.
///
/// # Errors
///
/// Returns an error if the draft is invalid or the catalog cannot be saved.
pub async fn add_section(ctx: &Context, draft: SectionDraft, out: &mut impl Write) -> Result<()> {
    let path = ctx.catalog_path()?;
    let mut catalog = load_catalog(&path).await?;
    let id = catalog.add_section(draft)?;
    save_catalog(&path, &catalog).await?;
    tracing::info!(section = %id, "section added");

    if ctx.json {
        return write_json(out, &catalog.section(id));
    }
    writeln!(out, "Added section {id}")?;
    Ok(())
}

/// Validate and append a product.
///
/// # Errors
///
/// Returns an error if the draft is invalid or the catalog cannot be saved.
pub async fn add_product(ctx: &Context, draft: ProductDraft, out: &mut impl Write) -> Result<()> {
    let path = ctx.catalog_path()?;
    let mut catalog = load_catalog(&path).await?;
    let id = catalog.add_product(draft)?;
    save_catalog(&path, &catalog).await?;
    tracing::info!(product = %id, "product added");

    if ctx.json {
        return write_json(out, &catalog.product(id));
    }
    writeln!(out, "Added product {id}")?;
    Ok(())
}

/// Replace a product with a validated draft.
///
/// # Errors
///
/// Returns an error if the product is unknown, the draft is invalid, or the
/// catalog cannot be saved.
pub async fn update_product(
    ctx: &Context,
    id: ProductId,
    draft: ProductDraft,
    out: &mut impl Write,
) -> Result<()> {
    let path = ctx.catalog_path()?;
    let mut catalog = load_catalog(&path).await?;
    catalog.update_product(id, draft)?;
    save_catalog(&path, &catalog).await?;
    tracing::info!(product = %id, "product updated");

    if ctx.json {
        return write_json(out, &catalog.product(id));
    }
    writeln!(out, "Updated product {id}")?;
    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns an error if the product is unknown or the catalog cannot be saved.
pub async fn remove_product(ctx: &Context, id: ProductId, out: &mut impl Write) -> Result<()> {
    let path = ctx.catalog_path()?;
    let mut catalog = load_catalog(&path).await?;
    let removed = catalog.remove_product(id)?;
    save_catalog(&path, &catalog).await?;
    tracing::info!(product = %id, "product removed");

    if ctx.json {
        return write_json(out, &removed);
    }
    writeln!(out, "Removed product {} ({id})", removed.name)?;
    Ok(())
}

/// Rename or move a section.
///
/// # Errors
///
/// Returns an error if the section is unknown, the draft is invalid, or the
/// catalog cannot be saved.
pub async fn update_section(
    ctx: &Context,
    id: SectionId,
    draft: SectionDraft,
    out: &mut impl Write,
) -> Result<()> {
    let path = ctx.catalog_path()?;
    let mut catalog = load_catalog(&path).await?;
    catalog.update_section(id, draft)?;
    save_catalog(&path, &catalog).await?;
    tracing::info!(section = %id, "section updated");

    if ctx.json {
        return write_json(out, &catalog.section(id));
    }
    writeln!(out, "Updated section {id}")?;
    Ok(())
}

/// Delete a section that no longer holds products.
///
/// # Errors
///
/// Returns an error if the section is unknown or in use, or the catalog
/// cannot be saved.
pub async fn remove_section(ctx: &Context, id: SectionId, out: &mut impl Write) -> Result<()> {
    let path = ctx.catalog_path()?;
    let mut catalog = load_catalog(&path).await?;
    let removed = catalog.remove_section(id)?;
    save_catalog(&path, &catalog).await?;
    tracing::info!(section = %id, "section removed");

    if ctx.json {
        return write_json(out, &removed);
    }
    writeln!(out, "Removed section {} ({id})", removed.name)?;
    Ok(())
}

fn product_line(product: &Product) -> String {
    let mut line = product.name.clone();
    if !product.aliases.is_empty() {
        let _ = write!(line, " ({})", product.aliases.join(", "));
    }
    if let Some(price) = product.typical_price {
        let _ = write!(line, " ~{price}");
    }
    let _ = write!(line, "  #{}", product.id);
    line
}
