use super::{show, ui};
use crate::core::filter::ViewState;
use crate::core::store::{CatalogStore, Selection};
use anyhow::{Context, Result};
use std::path::Path;

/// Copies `path` into the store and returns the name it was stored under.
pub fn import(store: &CatalogStore, path: &Path) -> Result<String> {
    let stored = store
        .import_file(path)
        .with_context(|| format!("Could not import file: {}", path.display()))?;
    let name = stored
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .context("Imported file has no name")?;

    println!(
        "Copied into {}: {}",
        store.folder().display(),
        ui::style_text(
            &stored.file_name().unwrap_or_default().to_string_lossy(),
            ui::StyleType::TotalValue
        )
    );
    Ok(name)
}

/// Imports `path`, then shows the new source on its own.
pub fn run(store: &CatalogStore, path: &Path, view: ViewState) -> Result<()> {
    let name = import(store, path)?;
    let view = ViewState {
        selection: Selection::Source(name),
        ..view
    };
    println!();
    show::run(store, &view)
}
