//! Subcommand implementations.
//!
//! Each command writes its output to a caller-supplied writer so the
//! binary can hand it stdout and tests can hand it a buffer.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use trolley_core::{Catalog, ShoppingList};

use crate::config::TrolleyConfig;
use crate::error::Result;
use crate::files::{load_catalog, load_snapshot, resolve_path};

pub mod catalog;
pub mod edit;
pub mod list;
pub mod watch;

/// File locations and output format shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub config: TrolleyConfig,
    /// `--snapshot`, overriding `TROLLEY_SNAPSHOT`
    pub snapshot: Option<PathBuf>,
    /// `--catalog`, overriding `TROLLEY_CATALOG`
    pub catalog: Option<PathBuf>,
    /// Emit JSON instead of text.
    pub json: bool,
}

impl Context {
    /// # Errors
    ///
    /// Returns an error if no snapshot path is configured.
    pub fn snapshot_path(&self) -> Result<PathBuf> {
        resolve_path(
            self.snapshot.clone(),
            self.config.snapshot_path.as_ref(),
            "snapshot",
            "TROLLEY_SNAPSHOT",
        )
    }

    /// # Errors
    ///
    /// Returns an error if no catalog path is configured.
    pub fn catalog_path(&self) -> Result<PathBuf> {
        resolve_path(
            self.catalog.clone(),
            self.config.catalog_path.as_ref(),
            "catalog",
            "TROLLEY_CATALOG",
        )
    }

    /// Load the catalog if one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog cannot be loaded.
    pub async fn optional_catalog(&self) -> Result<Option<Catalog>> {
        match self.catalog_path() {
            Ok(path) => Ok(Some(load_catalog(&path).await?)),
            Err(_) => Ok(None),
        }
    }

    /// Load the snapshot for display, joined against the catalog if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot or a configured catalog cannot be
    /// loaded.
    pub async fn load_list(&self) -> Result<ShoppingList> {
        let mut list = load_snapshot(&self.snapshot_path()?).await?;
        if let Some(catalog) = self.optional_catalog().await? {
            catalog.join(&mut list);
        }
        Ok(list)
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
