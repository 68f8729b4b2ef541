//! Reading and writing snapshot and catalog files.
//!
//! Snapshots are the backend's JSON for one list with its joins. Catalogs
//! are JSON or YAML, chosen by file extension.

use std::path::{Path, PathBuf};

use serde::Serialize;
use trolley_core::{Catalog, ShoppingList};

use crate::error::{CliError, Result};

/// Pick the path given on the command line, falling back to configuration.
///
/// # Errors
///
/// Returns [`CliError::MissingPath`] when neither is set.
pub fn resolve_path(
    flag: Option<PathBuf>,
    configured: Option<&PathBuf>,
    what: &'static str,
    env: &'static str,
) -> Result<PathBuf> {
    flag.or_else(|| configured.cloned())
        .ok_or(CliError::MissingPath { what, env })
}

/// Parse snapshot JSON read from `path`.
///
/// # Errors
///
/// Returns [`CliError::Json`] if the content is not a valid snapshot.
pub fn decode_snapshot(path: &Path, content: &str) -> Result<ShoppingList> {
    ShoppingList::from_json(content).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a list snapshot.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_snapshot(path: &Path) -> Result<ShoppingList> {
    let content = read(path).await?;
    let list = decode_snapshot(path, &content)?;
    tracing::debug!(path = %path.display(), entries = list.entries.len(), "loaded snapshot");
    Ok(list)
}

/// Write a list snapshot back in the backend's shape.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn save_snapshot(path: &Path, list: &ShoppingList) -> Result<()> {
    write_json(path, list).await
}

/// Load a catalog, as YAML for `.yaml`/`.yml` files and JSON otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = read(path).await?;
    let catalog: Catalog = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|source| CliError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&content).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };
    tracing::debug!(
        path = %path.display(),
        sections = catalog.sections.len(),
        products = catalog.products.len(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Write a catalog in the format its extension names.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn save_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    if is_yaml(path) {
        let content = serde_yaml::to_string(catalog).map_err(|source| CliError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        write(path, content.into_bytes()).await
    } else {
        write_json(path, catalog).await
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_vec_pretty(value)?;
    content.push(b'\n');
    write(path, content).await
}

/// Replace `path` atomically by writing a sibling file and renaming it.
async fn write(path: &Path, content: Vec<u8>) -> Result<()> {
    let io_err = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    tokio::fs::write(&staging, content).await.map_err(io_err)?;
    tokio::fs::rename(&staging, path).await.map_err(io_err)?;
    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use trolley_core::SectionDraft;

    use super::*;

    #[test]
    fn test_resolve_path_prefers_flag() {
        let configured = PathBuf::from("configured.json");
        let flag = PathBuf::from("flag.json");
        assert_eq!(
            resolve_path(Some(flag.clone()), Some(&configured), "snapshot", "TROLLEY_SNAPSHOT")
                .unwrap(),
            flag
        );
        assert_eq!(
            resolve_path(None, Some(&configured), "snapshot", "TROLLEY_SNAPSHOT").unwrap(),
            configured
        );
        assert!(matches!(
            resolve_path(None, None, "catalog", "TROLLEY_CATALOG"),
            Err(CliError::MissingPath { what: "catalog", .. })
        ));
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        let list = ShoppingList::new(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());

        save_snapshot(&path, &list).await.unwrap();
        assert_eq!(load_snapshot(&path).await.unwrap(), list);
        assert!(!dir.path().join("list.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_catalog_yaml_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yml");
        let mut catalog = Catalog::default();
        catalog
            .add_section(SectionDraft {
                name: "Frozen".into(),
                sequence_number: Some(9),
            })
            .unwrap();

        save_catalog(&path, &catalog).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("name: Frozen"));
        assert_eq!(load_catalog(&path).await.unwrap(), catalog);
    }

    #[tokio::test]
    async fn test_missing_file_names_path() {
        let err = load_snapshot(Path::new("/nonexistent/list.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/list.json"));
    }

    #[tokio::test]
    async fn test_bad_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_snapshot(&path).await,
            Err(CliError::Json { .. })
        ));
    }
}
