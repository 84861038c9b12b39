//! Currency denominations and conversion to and from the base unit (gp).

use crate::core::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// Tolerance under which a value is displayed as a whole number.
const INTEGER_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize)]
pub enum Denomination {
    #[serde(rename = "pp", alias = "platinum")]
    Platinum,
    #[default]
    #[serde(rename = "gp", alias = "gold")]
    Gold,
    #[serde(rename = "ep", alias = "electrum")]
    Electrum,
    #[serde(rename = "sp", alias = "silver")]
    Silver,
    #[serde(rename = "cp", alias = "copper")]
    Copper,
}

impl Denomination {
    /// All denominations in display order.
    pub const ALL: [Denomination; 5] = [
        Denomination::Platinum,
        Denomination::Gold,
        Denomination::Electrum,
        Denomination::Silver,
        Denomination::Copper,
    ];

    /// The base unit every price is stored in.
    pub const BASE: Denomination = Denomination::Gold;

    /// Value of one coin of this denomination, in gp.
    pub fn rate(&self) -> f64 {
        match self {
            Denomination::Platinum => 10.0,
            Denomination::Gold => 1.0,
            Denomination::Electrum => 0.5,
            Denomination::Silver => 0.1,
            Denomination::Copper => 0.01,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Denomination::Platinum => "pp",
            Denomination::Gold => "gp",
            Denomination::Electrum => "ep",
            Denomination::Silver => "sp",
            Denomination::Copper => "cp",
        }
    }
}

impl Display for Denomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Denomination {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pp" | "platinum" => Ok(Denomination::Platinum),
            "gp" | "gold" => Ok(Denomination::Gold),
            "ep" | "electrum" => Ok(Denomination::Electrum),
            "sp" | "silver" => Ok(Denomination::Silver),
            "cp" | "copper" => Ok(Denomination::Copper),
            _ => Err(CatalogError::InvalidUnit(s.to_string())),
        }
    }
}

/// Converts an amount expressed in `unit` into gp.
pub fn to_base(amount: f64, unit: Denomination) -> f64 {
    amount * unit.rate()
}

/// Projects a gp price into every denomination.
pub fn from_base(price: f64) -> BTreeMap<Denomination, f64> {
    Denomination::ALL
        .iter()
        .map(|d| (*d, price / d.rate()))
        .collect()
}

/// Formats a value with two decimals, or none if it is a whole number.
pub fn pretty(n: f64) -> String {
    if !n.is_finite() {
        return format_non_finite(n);
    }
    let rounded = n.round();
    if (n - rounded).abs() < INTEGER_TOLERANCE {
        // `+ 0.0` folds negative zero into zero.
        format!("{:.0}", rounded + 0.0)
    } else {
        format!("{n:.2}")
    }
}

fn format_non_finite(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base_applies_rate() {
        assert_eq!(to_base(3.0, Denomination::Platinum), 30.0);
        assert_eq!(to_base(3.0, Denomination::Gold), 3.0);
        assert_eq!(to_base(3.0, Denomination::Electrum), 1.5);
        assert!((to_base(25.0, Denomination::Silver) - 2.5).abs() < 1e-12);
        assert!((to_base(150.0, Denomination::Copper) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_base_projects_all_denominations() {
        let conv = from_base(15.0);
        assert_eq!(conv.len(), 5);
        assert_eq!(conv[&Denomination::Platinum], 1.5);
        assert_eq!(conv[&Denomination::Gold], 15.0);
        assert_eq!(conv[&Denomination::Electrum], 30.0);
        assert!((conv[&Denomination::Silver] - 150.0).abs() < 1e-9);
        assert!((conv[&Denomination::Copper] - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_through_every_denomination() {
        for price in [0.0, 0.01, 0.37, 1.0, 2.5, 15.0, 999.99, 12345.678] {
            let conv = from_base(price);
            for unit in Denomination::ALL {
                let back = to_base(conv[&unit], unit);
                assert!(
                    (back - price).abs() < 1e-9,
                    "{price} via {unit} came back as {back}"
                );
            }
        }
    }

    #[test]
    fn test_parse_denomination() {
        assert_eq!("pp".parse::<Denomination>().unwrap(), Denomination::Platinum);
        assert_eq!(" GP ".parse::<Denomination>().unwrap(), Denomination::Gold);
        assert_eq!("ep".parse::<Denomination>().unwrap(), Denomination::Electrum);
        assert_eq!("Silver".parse::<Denomination>().unwrap(), Denomination::Silver);
        assert_eq!("cp".parse::<Denomination>().unwrap(), Denomination::Copper);
    }

    #[test]
    fn test_parse_unknown_unit_is_invalid_unit() {
        let err = "dollars".parse::<Denomination>().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidUnit(ref u) if u == "dollars"));
    }

    #[test]
    fn test_display_uses_short_code() {
        let codes: Vec<String> = Denomination::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(codes, vec!["pp", "gp", "ep", "sp", "cp"]);
    }

    #[test]
    fn test_pretty() {
        assert_eq!(pretty(3.0), "3");
        assert_eq!(pretty(3.256), "3.26");
        assert_eq!(pretty(0.5), "0.50");
        assert_eq!(pretty(2.9999999999), "3");
        assert_eq!(pretty(-0.0), "0");
        assert_eq!(pretty(1e20), "100000000000000000000");
        assert_eq!(pretty(f64::INFINITY), "inf");
        assert_eq!(pretty(f64::NAN), "NaN");
    }
}
