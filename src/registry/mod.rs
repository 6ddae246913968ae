//! Country → VAT rate registry.
//!
//! The registry is immutable after construction and safe to share across
//! threads without locking. Rate updates are a redeploy of the table, not
//! a mutation API. The calculator takes a registry instance, so tests and
//! multi-tenant deployments can inject their own rate sets.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One registry entry: a country's standard VAT rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate {
    /// ISO 3166-1 alpha-2, uppercase, unique within a registry.
    pub country_code: String,
    /// Display name.
    pub country_name: String,
    /// Decimal fraction in [0, 1), e.g. 0.20 for 20%.
    pub rate: Decimal,
    pub is_eu_member: bool,
    /// Inactive entries are excluded from lookups.
    pub is_active: bool,
}

impl TaxRate {
    /// Active EU member entry.
    pub fn eu(country_code: &str, country_name: &str, rate: Decimal) -> Self {
        Self {
            country_code: country_code.to_ascii_uppercase(),
            country_name: country_name.to_string(),
            rate,
            is_eu_member: true,
            is_active: true,
        }
    }
}

/// Immutable lookup table of VAT rates, keyed by country code.
///
/// Iteration order is the insertion order of the entries, stable across
/// calls. At most one entry per country code: on duplicates the first
/// entry wins and later ones are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRateRegistry {
    entries: Vec<TaxRate>,
}

impl TaxRateRegistry {
    /// Build a registry from entries. Country codes are normalized to
    /// uppercase; duplicate codes keep the first occurrence.
    pub fn new(entries: impl IntoIterator<Item = TaxRate>) -> Self {
        let mut deduped: Vec<TaxRate> = Vec::new();
        for mut entry in entries {
            entry.country_code.make_ascii_uppercase();
            if !deduped.iter().any(|e| e.country_code == entry.country_code) {
                deduped.push(entry);
            }
        }
        Self { entries: deduped }
    }

    /// The built-in table: standard VAT rates of the 27 EU member states.
    pub fn eu_standard_rates() -> Self {
        Self::new([
            TaxRate::eu("AT", "Austria", dec!(0.20)),
            TaxRate::eu("BE", "Belgium", dec!(0.21)),
            TaxRate::eu("BG", "Bulgaria", dec!(0.20)),
            TaxRate::eu("HR", "Croatia", dec!(0.25)),
            TaxRate::eu("CY", "Cyprus", dec!(0.19)),
            TaxRate::eu("CZ", "Czechia", dec!(0.21)),
            TaxRate::eu("DK", "Denmark", dec!(0.25)),
            TaxRate::eu("EE", "Estonia", dec!(0.20)),
            TaxRate::eu("FI", "Finland", dec!(0.24)),
            TaxRate::eu("FR", "France", dec!(0.20)),
            TaxRate::eu("DE", "Germany", dec!(0.19)),
            TaxRate::eu("GR", "Greece", dec!(0.24)),
            TaxRate::eu("HU", "Hungary", dec!(0.27)),
            TaxRate::eu("IE", "Ireland", dec!(0.23)),
            TaxRate::eu("IT", "Italy", dec!(0.22)),
            TaxRate::eu("LV", "Latvia", dec!(0.21)),
            TaxRate::eu("LT", "Lithuania", dec!(0.21)),
            TaxRate::eu("LU", "Luxembourg", dec!(0.17)),
            TaxRate::eu("MT", "Malta", dec!(0.18)),
            TaxRate::eu("NL", "Netherlands", dec!(0.21)),
            TaxRate::eu("PL", "Poland", dec!(0.23)),
            TaxRate::eu("PT", "Portugal", dec!(0.23)),
            TaxRate::eu("RO", "Romania", dec!(0.19)),
            TaxRate::eu("SK", "Slovakia", dec!(0.20)),
            TaxRate::eu("SI", "Slovenia", dec!(0.22)),
            TaxRate::eu("ES", "Spain", dec!(0.21)),
            TaxRate::eu("SE", "Sweden", dec!(0.25)),
        ])
    }

    /// Case-insensitive lookup. Unknown and inactive codes both resolve to
    /// `None` — "no rate configured" is a valid outcome, not an error.
    pub fn get(&self, country_code: &str) -> Option<&TaxRate> {
        self.entries
            .iter()
            .find(|e| e.is_active && e.country_code.eq_ignore_ascii_case(country_code))
    }

    /// False for unknown or inactive countries.
    pub fn is_eu_member(&self, country_code: &str) -> bool {
        self.get(country_code).is_some_and(|e| e.is_eu_member)
    }

    /// Active EU member entries, in insertion order.
    pub fn eu_members(&self) -> impl Iterator<Item = &TaxRate> {
        self.entries.iter().filter(|e| e.is_active && e.is_eu_member)
    }

    /// All entries (including inactive), in insertion order.
    pub fn entries(&self) -> &[TaxRate] {
        &self.entries
    }
}

impl Default for TaxRateRegistry {
    fn default() -> Self {
        Self::eu_standard_rates()
    }
}
