use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Customer classification for VAT purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    /// B2C — destination-country VAT applies.
    #[default]
    Consumer,
    /// B2B — may qualify for intra-EU reverse charge.
    Business,
}

impl FromStr for CustomerType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consumer" => Ok(Self::Consumer),
            "business" => Ok(Self::Business),
            other => Err(ValidationError::new(
                "customer_type",
                format!("unknown customer type '{other}' (expected 'consumer' or 'business')"),
            )),
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consumer => write!(f, "consumer"),
            Self::Business => write!(f, "business"),
        }
    }
}

/// Input to a VAT calculation. Transient — constructed per call, never
/// persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Pre-tax product subtotal in minor currency units (cents).
    pub amount: i64,
    /// Pre-tax shipping cost in minor currency units.
    #[serde(default)]
    pub shipping_amount: i64,
    /// Destination country (ISO 3166-1 alpha-2).
    pub country_code: String,
    #[serde(default)]
    pub customer_type: CustomerType,
    /// Buyer's VAT identification number, only meaningful for businesses.
    #[serde(default)]
    pub business_tax_id: Option<String>,
}

impl CalculationRequest {
    /// New consumer request with no shipping.
    pub fn new(amount: i64, country_code: impl Into<String>) -> Self {
        Self {
            amount,
            shipping_amount: 0,
            country_code: country_code.into(),
            customer_type: CustomerType::Consumer,
            business_tax_id: None,
        }
    }

    pub fn shipping(mut self, amount: i64) -> Self {
        self.shipping_amount = amount;
        self
    }

    pub fn customer_type(mut self, customer_type: CustomerType) -> Self {
        self.customer_type = customer_type;
        self
    }

    pub fn business_tax_id(mut self, vat_id: impl Into<String>) -> Self {
        self.business_tax_id = Some(vat_id.into());
        self
    }
}

/// Why 0% VAT was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExemptionReason {
    /// Destination is outside the EU or has no active rate configured.
    NonEuCountry,
    /// Intra-EU B2B sale — the buyer self-assesses VAT.
    ReverseCharge,
}

impl fmt::Display for ExemptionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonEuCountry => write!(f, "non-EU country"),
            Self::ReverseCharge => write!(f, "reverse charge - B2B transaction"),
        }
    }
}

/// Per-line split of the VAT amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatBreakdown {
    /// VAT on the product subtotal, rounded independently.
    pub product_vat: i64,
    /// VAT on shipping, rounded independently.
    pub shipping_vat: i64,
}

/// Full VAT breakdown for one calculation.
///
/// `total_amount = base_amount + shipping_amount + vat_amount` holds by
/// construction, and `breakdown.product_vat + breakdown.shipping_vat`
/// always equals `vat_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Echoed product subtotal.
    pub base_amount: i64,
    /// Echoed shipping amount.
    pub shipping_amount: i64,
    /// Destination country, normalized to uppercase.
    pub country_code: String,
    /// Display name from the registry, "Unknown" for unrated countries.
    pub country_name: String,
    /// Rate actually applied (0 when exempt or reverse-charged).
    pub vat_rate: Decimal,
    /// Total VAT in minor units.
    pub vat_amount: i64,
    /// base + shipping + vat, in minor units.
    pub total_amount: i64,
    pub is_reverse_charge: bool,
    /// `None` when the full rate was applied.
    pub exemption_reason: Option<ExemptionReason>,
    pub breakdown: VatBreakdown,
}
