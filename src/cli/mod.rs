//! Terminal presentation of the catalog

pub mod import;
pub mod setup;
pub mod show;
pub mod sources;
pub mod ui;
