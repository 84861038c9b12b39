use compendium::cli::show::render;
use compendium::core::catalog;
use compendium::core::currency::Denomination;
use compendium::core::filter::SortColumn;
use compendium::core::store::{CatalogStore, DEFAULT_SOURCE_NAME, Selection};
use compendium::{AppCommand, ShowOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::info;

mod test_utils {
    use super::*;

    /// Writes a config pointing at `folder` and returns its path.
    pub fn write_config(dir: &Path, folder: &Path, bundled: &Path) -> PathBuf {
        let config_path = dir.join("config.yaml");
        let content = format!(
            r#"
data_path: "{}"
default_unit: gp
bundled_prices: "{}"
"#,
            folder.display(),
            bundled.display()
        );
        fs::write(&config_path, content).expect("Failed to write config file");
        config_path
    }

    pub fn bundled_prices() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join(DEFAULT_SOURCE_NAME)
    }
}

#[test_log::test]
fn test_first_run_seeds_bundled_prices() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("json_files");
    let config_path = test_utils::write_config(dir.path(), &folder, &test_utils::bundled_prices());

    let result = compendium::run_command(AppCommand::Sources, config_path.to_str());
    assert!(result.is_ok(), "Sources failed with: {:?}", result.err());

    let seeded = folder.join(DEFAULT_SOURCE_NAME);
    assert!(seeded.exists());
    let catalog = catalog::load(&seeded).unwrap();
    info!(items = catalog.len(), "Seeded catalog");
    assert_eq!(catalog.get("Longsword"), Some(15.0));
}

#[test_log::test]
fn test_show_with_filters_and_sort() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("json_files");
    let config_path = test_utils::write_config(dir.path(), &folder, &test_utils::bundled_prices());

    let options = ShowOptions {
        name: Some("sword".into()),
        min: Some("1".into()),
        max: Some("2".into()),
        unit: Some(Denomination::Platinum),
        sort: vec![SortColumn::Name],
        descending: true,
        ..Default::default()
    };
    let result = compendium::run_command(AppCommand::Show(options.clone()), config_path.to_str());
    assert!(result.is_ok(), "Show failed with: {:?}", result.err());

    let store = CatalogStore::open(&folder).unwrap();
    let output = render(&store, &options.into_view(Denomination::Gold)).unwrap();
    let short = output.find("Shortsword").expect("Shortsword listed");
    let long = output.find("Longsword").expect("Longsword listed");
    assert!(short < long, "expected name descending order:\n{output}");
    assert!(!output.contains("Greataxe"));
    assert!(output.contains("Items: 2 of"));
}

#[test_log::test]
fn test_show_rejects_invalid_range() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("json_files");
    let config_path = test_utils::write_config(dir.path(), &folder, &test_utils::bundled_prices());

    let options = ShowOptions {
        max: Some("ten".into()),
        ..Default::default()
    };
    let err = compendium::run_command(AppCommand::Show(options), config_path.to_str()).unwrap_err();
    assert!(err.to_string().contains("Invalid range"));
}

#[test_log::test]
fn test_import_then_merge_all() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("json_files");
    let config_path = test_utils::write_config(dir.path(), &folder, &test_utils::bundled_prices());

    let custom = dir.path().join("prices.json");
    fs::write(&custom, r#"{"Longsword": 20, "Vorpal sword": 24000}"#).unwrap();

    let result = compendium::run_command(
        AppCommand::Import {
            path: custom.clone(),
        },
        config_path.to_str(),
    );
    assert!(result.is_ok(), "Import failed with: {:?}", result.err());

    // The seeded prices.json was already there, so the import is renamed.
    let imported = folder.join("prices_1.json");
    assert!(imported.exists());

    let store = CatalogStore::open(&folder).unwrap();
    let names: Vec<String> = store.sources().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["prices", "prices_1"]);

    let merged = store.active_catalog(&Selection::All);
    assert_eq!(merged.get("Longsword"), Some(20.0));
    assert_eq!(merged.get("Dagger"), Some(2.0));

    let single = store.active_catalog(&Selection::Source("prices".into()));
    assert_eq!(single.get("Longsword"), Some(15.0));
    assert_eq!(single.get("Vorpal sword"), None);
}

#[test_log::test]
fn test_import_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("json_files");
    let config_path = test_utils::write_config(dir.path(), &folder, &test_utils::bundled_prices());

    let result = compendium::run_command(
        AppCommand::Import {
            path: dir.path().join("nowhere.json"),
        },
        config_path.to_str(),
    );
    assert!(result.is_err());
}

#[test_log::test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.yaml");
    let result = compendium::run_command(AppCommand::Sources, missing.to_str());
    assert!(result.is_err());
}
