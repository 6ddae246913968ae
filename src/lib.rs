//! # tva
//!
//! EU VAT calculation for e-commerce checkouts: rate lookup, intra-EU
//! reverse-charge handling, and deterministic minor-unit rounding.
//!
//! All money amounts are integer minor currency units (cents for EUR) —
//! never floating point. Rates use [`rust_decimal::Decimal`]. The rounding
//! rule (round half away from zero, applied per component) is part of the
//! contract: a client-side estimate and a server-side authoritative total
//! computed through this crate agree to the cent.
//!
//! ## Quick Start
//!
//! ```rust
//! use tva::{CalculationRequest, CustomerType, VatCalculator};
//! use rust_decimal_macros::dec;
//!
//! let calc = VatCalculator::default();
//!
//! // French consumer: 25.00 € of wine plus 5.00 € shipping
//! let result = calc
//!     .calculate(&CalculationRequest::new(2500, "FR").shipping(500))
//!     .unwrap();
//! assert_eq!(result.vat_rate, dec!(0.20));
//! assert_eq!(result.vat_amount, 600);
//! assert_eq!(result.total_amount, 3600);
//!
//! // German business with a VAT ID: intra-EU reverse charge, 0% VAT
//! let result = calc
//!     .calculate(
//!         &CalculationRequest::new(10000, "DE")
//!             .customer_type(CustomerType::Business)
//!             .business_tax_id("DE123456789"),
//!     )
//!     .unwrap();
//! assert!(result.is_reverse_charge);
//! assert_eq!(result.total_amount, 10000);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `vies` | Async VIES REST client for live VAT ID validation |

pub mod calc;
pub mod core;
pub mod format;
pub mod registry;
pub mod vat_id;

// Re-export the working set at crate root for convenience
pub use crate::calc::{LineItem, OrderContext, VatCalculator};
pub use crate::core::*;
pub use crate::format::{format_currency, format_percentage};
pub use crate::registry::{TaxRate, TaxRateRegistry};
pub use crate::vat_id::{StructuralValidator, VatIdValidator};
