pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use crate::core::currency::Denomination;
use crate::core::filter::{FilterCriteria, SortColumn, SortToggle, ViewState};
use crate::core::store::{CatalogStore, Selection};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Filter and sort inputs shared by the commands that display a catalog.
#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    pub file: Option<String>,
    pub name: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub unit: Option<Denomination>,
    /// Columns to sort by, in order. Repeating a column flips its direction.
    pub sort: Vec<SortColumn>,
    /// Reverses the direction of the last sort.
    pub descending: bool,
}

impl ShowOptions {
    pub fn into_view(self, default_unit: Denomination) -> ViewState {
        let mut toggle = SortToggle::default();
        let mut sort: Vec<_> = self.sort.iter().map(|c| toggle.activate(*c)).collect();
        if let Some(last) = sort.last_mut().filter(|_| self.descending) {
            last.descending = !last.descending;
        }

        ViewState {
            selection: self
                .file
                .as_deref()
                .map_or(Selection::All, Selection::from_label),
            criteria: FilterCriteria {
                name_query: self.name,
                min: self.min,
                max: self.max,
                unit: self.unit.unwrap_or(default_unit),
            },
            sort,
        }
    }
}

pub enum AppCommand {
    Sources,
    Show(ShowOptions),
    Import { path: PathBuf },
}

/// Opens the catalog folder, seeding the bundled default on first use.
fn open_store(config: &AppConfig) -> Result<CatalogStore> {
    let store = CatalogStore::open(config.sources_path()?)?;
    match config.bundled_prices_path() {
        Ok(bundled) => {
            if store.seed_default(&bundled) {
                info!("Seeded default data from {}", bundled.display());
            }
        }
        Err(e) => debug!(error = %e, "No bundled default catalog location"),
    }
    Ok(store)
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Compendium starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = open_store(&config)?;

    match command {
        AppCommand::Sources => cli::sources::run(&store),
        AppCommand::Show(options) => {
            let view = options.into_view(config.default_unit);
            cli::show::run(&store, &view)
        }
        AppCommand::Import { path } => {
            let view = ShowOptions::default().into_view(config.default_unit);
            cli::import::run(&store, &path, view)
        }
    }
}
