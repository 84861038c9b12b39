//! A folder of JSON catalog sources.

use crate::core::catalog::{self, Catalog};
use crate::core::error::{CatalogError, Result};
use anyhow::Context;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the catalog seeded into an empty folder on first use.
pub const DEFAULT_SOURCE_NAME: &str = "prices.json";

/// Label of the merged selection.
pub const ALL_SOURCES_LABEL: &str = "All files";

const JSON_SUFFIX: &str = ".json";

/// One JSON file in the store folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// File stem, used to select the source.
    pub name: String,
    pub path: PathBuf,
}

/// Which sources make up the active catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Source(String),
}

impl Selection {
    /// Parses a menu label; the merged label selects every source.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_SOURCES_LABEL {
            Selection::All
        } else {
            Selection::Source(label.to_string())
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::All => write!(f, "{ALL_SOURCES_LABEL}"),
            Selection::Source(name) => write!(f, "{name}"),
        }
    }
}

pub struct CatalogStore {
    folder: PathBuf,
}

impl CatalogStore {
    /// Opens the store at `folder`, creating the folder if needed.
    pub fn open<P: Into<PathBuf>>(folder: P) -> anyhow::Result<Self> {
        let folder = folder.into();
        fs::create_dir_all(&folder)
            .with_context(|| format!("Failed to create catalog folder: {}", folder.display()))?;
        debug!(folder = %folder.display(), "Opened catalog store");
        Ok(Self { folder })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn sources(&self) -> Vec<Source> {
        list_sources(&self.folder)
    }

    /// Menu labels: the merged label first, then source names ignoring case.
    pub fn display_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sources().into_iter().map(|s| s.name).collect();
        names.sort_by_key(|name| name.to_lowercase());
        std::iter::once(ALL_SOURCES_LABEL.to_string())
            .chain(names)
            .collect()
    }

    pub fn import_file<P: AsRef<Path>>(&self, src_path: P) -> Result<PathBuf> {
        import_file(src_path, &self.folder)
    }

    pub fn active_catalog(&self, selection: &Selection) -> Catalog {
        active_catalog(&self.sources(), selection)
    }

    pub fn seed_default<P: AsRef<Path>>(&self, bundled_default: P) -> bool {
        seed_default(&self.folder, bundled_default)
    }
}

/// Matches on the file name suffix, so a file named just `.json` counts too.
fn has_json_extension(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().to_lowercase().ends_with(JSON_SUFFIX))
}

/// JSON files directly inside `folder`, sorted by file name.
pub fn list_sources(folder: &Path) -> Vec<Source> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(folder = %folder.display(), error = %e, "Failed to list catalog folder");
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_json_extension(path))
        .collect();
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    paths
        .into_iter()
        .filter_map(|path| {
            let name = path.file_stem()?.to_string_lossy().into_owned();
            Some(Source { name, path })
        })
        .collect()
}

/// Picks a file name in `folder` that does not exist yet.
///
/// Tries `stem_1.ext`, `stem_2.ext`, ... off the original stem.
fn dedupe_filename(folder: &Path, filename: &str) -> String {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut candidate = filename.to_string();
    let mut i = 1u32;
    while folder.join(&candidate).exists() {
        candidate = format!("{stem}_{i}{ext}");
        i += 1;
    }
    candidate
}

/// Copies `src_path` into `folder` without overwriting existing sources.
pub fn import_file<P: AsRef<Path>>(src_path: P, folder: &Path) -> Result<PathBuf> {
    let src_path = src_path.as_ref();
    if !src_path.is_file() {
        return Err(CatalogError::SourceNotFound(src_path.to_path_buf()));
    }

    let mut filename = src_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CatalogError::SourceNotFound(src_path.to_path_buf()))?;
    if !has_json_extension(Path::new(&filename)) {
        filename.push_str(JSON_SUFFIX);
    }

    let dst = folder.join(dedupe_filename(folder, &filename));
    copy_with_metadata(src_path, &dst)?;
    info!(from = %src_path.display(), to = %dst.display(), "Imported catalog source");
    Ok(dst)
}

fn copy_with_metadata(src: &Path, dst: &Path) -> Result<()> {
    let copy_err = |source| CatalogError::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(src).map_err(copy_err)?;
    let mut reader = fs::File::open(src).map_err(copy_err)?;
    let mut writer = fs::File::create(dst).map_err(copy_err)?;
    io::copy(&mut reader, &mut writer).map_err(copy_err)?;

    // Permissions last: a read-only mode must not block setting the time.
    if let Err(e) = metadata.modified().and_then(|time| writer.set_modified(time)) {
        debug!(path = %dst.display(), error = %e, "Could not preserve modification time");
    }
    drop(writer);
    fs::set_permissions(dst, metadata.permissions()).map_err(copy_err)?;
    Ok(())
}

/// Loads one source or merges all of them. Load failures are logged and skipped.
pub fn active_catalog(sources: &[Source], selection: &Selection) -> Catalog {
    match selection {
        Selection::All => {
            let mut merged = Catalog::new();
            for source in sources {
                match catalog::load(&source.path) {
                    Ok(catalog) => merged.merge(catalog),
                    Err(e) => warn!(source = %source.name, error = %e, "Skipping source"),
                }
            }
            debug!(sources = sources.len(), items = merged.len(), "Merged all sources");
            merged
        }
        Selection::Source(name) => {
            let Some(source) = sources.iter().find(|s| &s.name == name) else {
                warn!(source = %name, "Unknown source");
                return Catalog::new();
            };
            catalog::load(&source.path).unwrap_or_else(|e| {
                warn!(source = %name, error = %e, "Failed to load source");
                Catalog::new()
            })
        }
    }
}

/// Copies the bundled default catalog into `folder` unless one is already there.
pub fn seed_default<P: AsRef<Path>>(folder: &Path, bundled_default: P) -> bool {
    let bundled_default = bundled_default.as_ref();
    let dst = folder.join(DEFAULT_SOURCE_NAME);
    if dst.exists() {
        return false;
    }
    if !bundled_default.exists() {
        debug!(path = %bundled_default.display(), "No bundled default catalog");
        return false;
    }
    match copy_with_metadata(bundled_default, &dst) {
        Ok(()) => {
            info!(path = %dst.display(), "Seeded default catalog");
            true
        }
        Err(e) => {
            warn!(error = %e, "Failed to seed default catalog");
            false
        }
    }
}
