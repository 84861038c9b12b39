//! Loading of `name -> price` JSON catalogs.
//!
//! The loader is lenient about content and strict about access: a file that
//! cannot be read or is not valid JSON is an error, while a top-level value
//! that is not an object simply yields an empty catalog. Entries whose value
//! cannot be read as a number are dropped; booleans count as 1 and 0.

use crate::core::error::{CatalogError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Item name to price in gp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: BTreeMap<String, f64>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.items.get(name).copied()
    }

    /// Inserts an item, replacing any previous price for the same name.
    pub fn insert(&mut self, name: impl Into<String>, price: f64) {
        self.items.insert(name.into(), price);
    }

    /// Folds `other` into this catalog; entries of `other` win on collision.
    pub fn merge(&mut self, other: Catalog) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.items.iter().map(|(name, price)| (name.as_str(), *price))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Reads a catalog file from disk.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CatalogError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = from_value(value);
    debug!(path = %path.display(), items = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

/// Builds a catalog from an already parsed JSON document.
pub fn from_value(value: Value) -> Catalog {
    let Value::Object(entries) = value else {
        debug!("Catalog document is not an object, treating as empty");
        return Catalog::new();
    };

    let mut catalog = Catalog::new();
    let mut skipped = 0usize;
    for (key, value) in entries {
        match coerce_price(&value) {
            Some(price) => catalog.insert(key.trim(), price),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!(skipped, "Skipped entries with non-numeric prices");
    }
    catalog
}

fn coerce_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
