//! Read-only views of the current list.
//!
//! # Usage
//!
//! ```bash
//! # Shop mode, hiding completed entries, in walking order
//! trolley shop
//!
//! # Everything, alphabetically, with entry ids for `trolley edit`
//! trolley shop --all --sort alphabetical --ids
//!
//! # Paper checklist and share text
//! trolley print
//! trolley share
//! ```

use std::io::Write;

use trolley_core::share::unavailable_share_text;
use trolley_core::{ComposeOptions, Progress, Surface, compose_for};

use super::{Context, write_json};
use crate::error::Result;
use crate::render::{render_print, render_share, render_shop};

/// Show the shop surface.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or output fails.
pub async fn shop(
    ctx: &Context,
    options: ComposeOptions,
    show_ids: bool,
    out: &mut impl Write,
) -> Result<()> {
    let list = ctx.load_list().await?;
    let composed = compose_for(&list, Surface::Shop, options);
    if ctx.json {
        return write_json(out, &composed);
    }
    write!(out, "{}", render_shop(&composed, show_ids))?;
    Ok(())
}

/// Show the print surface.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or output fails.
pub async fn print(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let list = ctx.load_list().await?;
    let composed = compose_for(&list, Surface::Print, ComposeOptions::default());
    if ctx.json {
        return write_json(out, &composed);
    }
    write!(out, "{}", render_print(&list, &composed))?;
    Ok(())
}

/// Show the share/export text.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or output fails.
pub async fn share(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let list = ctx.load_list().await?;
    let composed = compose_for(&list, Surface::Share, ComposeOptions::default());
    if ctx.json {
        return write_json(out, &composed);
    }
    write!(out, "{}", render_share(&list, &composed))?;
    Ok(())
}

/// Show the text shared for unavailable entries.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or output fails.
pub async fn unavailable(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let list = ctx.load_list().await?;
    let text = unavailable_share_text(&list);
    if ctx.json {
        return write_json(out, &text);
    }
    match text {
        Some(text) => writeln!(out, "{text}")?,
        None => writeln!(out, "No unavailable items")?,
    }
    Ok(())
}

/// Show progress counts.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or output fails.
pub async fn progress(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let list = ctx.load_list().await?;
    let progress = Progress::of(&list.entries);
    if ctx.json {
        return write_json(out, &progress);
    }
    writeln!(out, "{progress}, {} remaining", progress.remaining())?;
    Ok(())
}
