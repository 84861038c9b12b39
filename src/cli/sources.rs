use super::ui;
use crate::core::catalog;
use crate::core::store::{ALL_SOURCES_LABEL, CatalogStore, Selection, Source};
use anyhow::Result;
use chrono::{DateTime, Local};
use comfy_table::Cell;
use std::fs;
use tracing::debug;

struct SourceSummary {
    label: String,
    file: String,
    items: Option<usize>,
    size: Option<u64>,
    modified: Option<DateTime<Local>>,
}

fn summarize(source: &Source) -> SourceSummary {
    let items = match catalog::load(&source.path) {
        Ok(c) => Some(c.len()),
        Err(e) => {
            debug!(source = %source.name, error = %e, "Could not count items");
            None
        }
    };
    let metadata = fs::metadata(&source.path).ok();
    let size = metadata.as_ref().map(|m| m.len());
    let modified = metadata
        .and_then(|m| m.modified().ok())
        .map(DateTime::<Local>::from);
    let file = source
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    SourceSummary {
        label: source.name.clone(),
        file,
        items,
        size,
        modified,
    }
}

/// The merged row: distinct items across all files, total size, latest change.
fn summarize_all(store: &CatalogStore, files: &[SourceSummary]) -> SourceSummary {
    SourceSummary {
        label: ALL_SOURCES_LABEL.to_string(),
        file: format!("{} files", files.len()),
        items: Some(store.active_catalog(&Selection::All).len()),
        size: files.iter().map(|f| f.size).sum(),
        modified: files.iter().filter_map(|f| f.modified).max(),
    }
}

fn display_sources_table(summaries: &[SourceSummary]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Name"),
        ui::header_cell("File"),
        ui::header_cell("Items"),
        ui::header_cell("Size (bytes)"),
        ui::header_cell("Modified"),
    ]);

    for summary in summaries {
        let items = summary
            .items
            .map_or_else(|| ui::na_cell(true), |n| ui::number_cell(n.to_string()));
        let size = summary
            .size
            .map_or_else(|| ui::na_cell(false), |n| ui::number_cell(n.to_string()));
        let modified = summary.modified.map_or_else(
            || ui::na_cell(false),
            |t| Cell::new(t.format("%Y-%m-%d %H:%M").to_string()),
        );

        table.add_row(vec![
            Cell::new(&summary.label),
            Cell::new(&summary.file),
            items,
            size,
            modified,
        ]);
    }

    table.to_string()
}

/// Lists the sources in menu order, merged entry first.
pub fn render(store: &CatalogStore) -> String {
    let sources = store.sources();
    let mut output = format!(
        "Folder: {}\n\n",
        ui::style_text(&store.folder().display().to_string(), ui::StyleType::Title)
    );

    if sources.is_empty() {
        output.push_str(&ui::style_text(
            "No JSON sources found. Use `import` to add one.",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    let pb = ui::new_progress_bar(sources.len() as u64, true);
    pb.set_message("Reading sources...");
    let mut files: Vec<SourceSummary> = Vec::with_capacity(sources.len());
    for name in store.display_names().into_iter().skip(1) {
        if let Some(source) = sources.iter().find(|s| s.name == name) {
            files.push(summarize(source));
            pb.inc(1);
        }
    }
    pb.finish_and_clear();

    let mut summaries = vec![summarize_all(store, &files)];
    summaries.extend(files);
    output.push_str(&display_sources_table(&summaries));
    output
}

pub fn run(store: &CatalogStore) -> Result<()> {
    println!("{}", render(store));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_lists_sources_with_counts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("weapons.json"), r#"{"Dagger": 2, "Club": 0.1}"#).unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();

        let output = render(&store);
        assert!(output.contains("weapons.json"));
        assert!(output.contains("broken.json"));
        assert!(output.contains("N/A"));
        assert!(output.contains("2 files"));
    }

    #[test]
    fn test_render_follows_menu_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Zoo.json"), r#"{"Lion": 100}"#).unwrap();
        fs::write(dir.path().join("armor.json"), r#"{"Shield": 10, "Lion": 90}"#).unwrap();
        fs::write(dir.path().join("Misc.json"), r#"{"Rope": 1}"#).unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();

        let output = render(&store);
        let all = output.find("All files").unwrap();
        let armor = output.find("armor.json").unwrap();
        let misc = output.find("Misc.json").unwrap();
        let zoo = output.find("Zoo.json").unwrap();
        assert!(all < armor && armor < misc && misc < zoo, "{output}");
    }

    #[test]
    fn test_render_empty_folder() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        assert!(render(&store).contains("No JSON sources found"));
    }
}
