//! Filtering and sorting of the active catalog into display rows.

use crate::core::catalog::Catalog;
use crate::core::currency::{self, Denomination};
use crate::core::error::{CatalogError, Result};
use crate::core::store::Selection;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// Raw filter inputs, as entered by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub name_query: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    /// Denomination `min` and `max` are expressed in.
    pub unit: Denomination,
}

/// One matching item.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub name: String,
    /// Price in gp.
    pub price: f64,
}

impl ResultRow {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// The displayed cell for `unit`.
    pub fn display_value(&self, unit: Denomination) -> String {
        currency::pretty(self.price / unit.rate())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum SortColumn {
    Name,
    Value(Denomination),
}

impl Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortColumn::Name => write!(f, "name"),
            SortColumn::Value(unit) => write!(f, "{unit}"),
        }
    }
}

impl FromStr for SortColumn {
    type Err = CatalogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("name") {
            Ok(SortColumn::Name)
        } else {
            s.parse().map(SortColumn::Value)
        }
    }
}

/// Per-column sort direction, flipped each time a column is activated.
#[derive(Debug, Clone, Default)]
pub struct SortToggle {
    next_descending: BTreeMap<SortColumn, bool>,
}

impl SortToggle {
    /// Returns the direction to sort `column` in and flips it for next time.
    /// The first activation of a column sorts ascending.
    pub fn activate(&mut self, column: SortColumn) -> SortOrder {
        let next = self.next_descending.entry(column).or_insert(false);
        let order = SortOrder {
            column,
            descending: *next,
        };
        *next = !*next;
        order
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: SortColumn,
    pub descending: bool,
}

/// Everything needed to produce the displayed rows, rebuilt on each action.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub selection: Selection,
    pub criteria: FilterCriteria,
    /// Sorts applied one after another, like successive heading clicks.
    pub sort: Vec<SortOrder>,
}

impl ViewState {
    /// Filters `catalog` and applies the requested sorts in order.
    pub fn rows(&self, catalog: &Catalog) -> Result<Vec<ResultRow>> {
        let rows = filter(catalog, &self.criteria)?;
        Ok(self
            .sort
            .iter()
            .fold(rows, |rows, order| sort(rows, order.column, order.descending)))
    }
}

fn parse_bound(field: &'static str, raw: Option<&str>, unit: Denomination) -> Result<Option<f64>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let amount = raw.parse::<f64>().map_err(|_| CatalogError::InvalidRange {
        field,
        value: raw.to_string(),
    })?;
    Ok(Some(currency::to_base(amount, unit)))
}

/// Selects the items matching every given criterion, in catalog order.
pub fn filter(catalog: &Catalog, criteria: &FilterCriteria) -> Result<Vec<ResultRow>> {
    let min = parse_bound("min", criteria.min.as_deref(), criteria.unit)?;
    let max = parse_bound("max", criteria.max.as_deref(), criteria.unit)?;
    let query = criteria
        .name_query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let rows = catalog
        .iter()
        .filter(|(name, _)| {
            query
                .as_ref()
                .is_none_or(|q| name.to_lowercase().contains(q.as_str()))
        })
        .filter(|(_, price)| min.is_none_or(|m| *price >= m))
        .filter(|(_, price)| max.is_none_or(|m| *price <= m))
        .map(|(name, price)| ResultRow::new(name, price))
        .collect();
    Ok(rows)
}

/// Numeric key of a displayed cell. Unparsable cells yield `None`.
fn cell_key(row: &ResultRow, unit: Denomination) -> Option<f64> {
    row.display_value(unit)
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
}

/// Stable sort of `rows` by `column`. Unparsable numeric cells go last.
pub fn sort(mut rows: Vec<ResultRow>, column: SortColumn, descending: bool) -> Vec<ResultRow> {
    let directed = |ord: Ordering| if descending { ord.reverse() } else { ord };
    match column {
        SortColumn::Name => {
            rows.sort_by(|a, b| directed(a.name.to_lowercase().cmp(&b.name.to_lowercase())));
        }
        SortColumn::Value(unit) => {
            rows.sort_by(|a, b| match (cell_key(a, unit), cell_key(b, unit)) {
                (Some(x), Some(y)) => directed(x.total_cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }
    }
    rows
}
