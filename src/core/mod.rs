//! Core catalog logic: conversion, loading, storage and filtering

pub mod catalog;
pub mod config;
pub mod currency;
pub mod error;
pub mod filter;
pub mod log;
pub mod store;

// Re-export main types for cleaner imports
pub use catalog::Catalog;
pub use currency::Denomination;
pub use error::CatalogError;
pub use filter::{FilterCriteria, ResultRow, SortColumn, SortOrder, SortToggle, ViewState};
pub use store::{CatalogStore, Selection, Source};
