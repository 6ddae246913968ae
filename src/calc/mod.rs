//! The VAT calculator — single source of truth for tax and totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{
    CalculationRequest, CalculationResult, CustomerType, ExemptionReason, TvaError,
    ValidationError, VatBreakdown, validate_request, vat_component,
};
use crate::registry::{TaxRate, TaxRateRegistry};
use crate::vat_id::{StructuralValidator, VatIdValidator};

/// One cart line. The line total is `unit_price × quantity`, both pre-tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Pre-tax unit price in minor currency units.
    pub unit_price: i64,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(unit_price: i64, quantity: u32) -> Self {
        Self {
            unit_price,
            quantity,
        }
    }

    /// Line total in minor units, saturating at `i64::MAX`.
    pub fn total(&self) -> i64 {
        self.unit_price.saturating_mul(i64::from(self.quantity))
    }

    /// Line total in minor units, `None` on i64 overflow.
    pub fn checked_total(&self) -> Option<i64> {
        self.unit_price.checked_mul(i64::from(self.quantity))
    }
}

/// Shared destination/customer context for a multi-line calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderContext {
    pub country_code: String,
    #[serde(default)]
    pub customer_type: CustomerType,
    #[serde(default)]
    pub business_tax_id: Option<String>,
    #[serde(default)]
    pub shipping_amount: i64,
}

impl OrderContext {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            customer_type: CustomerType::Consumer,
            business_tax_id: None,
            shipping_amount: 0,
        }
    }

    pub fn customer_type(mut self, customer_type: CustomerType) -> Self {
        self.customer_type = customer_type;
        self
    }

    pub fn business_tax_id(mut self, vat_id: impl Into<String>) -> Self {
        self.business_tax_id = Some(vat_id.into());
        self
    }

    pub fn shipping(mut self, amount: i64) -> Self {
        self.shipping_amount = amount;
        self
    }
}

/// Computes VAT and order totals from a [`CalculationRequest`].
///
/// Pure and stateless per call: the registry is read-only after
/// construction, so one calculator can be shared across threads without
/// locking.
pub struct VatCalculator {
    registry: TaxRateRegistry,
    home_country: String,
    vat_id_validator: Box<dyn VatIdValidator + Send + Sync>,
}

impl Default for VatCalculator {
    /// Built-in EU rate table, home country France, structural VAT ID check.
    fn default() -> Self {
        Self::new(TaxRateRegistry::eu_standard_rates())
    }
}

impl VatCalculator {
    /// Calculator over the given registry. The seller's home country
    /// defaults to "FR" and VAT IDs are checked structurally; both can be
    /// overridden with the builder methods.
    pub fn new(registry: TaxRateRegistry) -> Self {
        Self {
            registry,
            home_country: "FR".to_string(),
            vat_id_validator: Box::new(StructuralValidator),
        }
    }

    /// The seller's country of establishment. Domestic sales to this
    /// country never reverse-charge, whatever the buyer's VAT ID.
    pub fn home_country(mut self, country_code: impl Into<String>) -> Self {
        self.home_country = country_code.into().to_ascii_uppercase();
        self
    }

    /// Replace the structural VAT ID check, e.g. with one backed by a
    /// VIES result cache.
    pub fn vat_id_validator(
        mut self,
        validator: impl VatIdValidator + Send + Sync + 'static,
    ) -> Self {
        self.vat_id_validator = Box::new(validator);
        self
    }

    pub fn registry(&self) -> &TaxRateRegistry {
        &self.registry
    }

    /// Compute the tax breakdown for one request.
    ///
    /// # Errors
    ///
    /// [`TvaError::Validation`] when the request is malformed, carrying
    /// every violation found. Unknown countries and implausible VAT IDs
    /// are not errors; they resolve to exempt or fully taxed results.
    pub fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult, TvaError> {
        let errors = validate_request(request);
        if !errors.is_empty() {
            return Err(TvaError::Validation(errors));
        }

        let country_code = request.country_code.to_ascii_uppercase();

        let (country_name, vat_rate, is_reverse_charge, exemption_reason) =
            match self.registry.get(&country_code) {
                None => (
                    "Unknown".to_string(),
                    Decimal::ZERO,
                    false,
                    Some(ExemptionReason::NonEuCountry),
                ),
                Some(rate) if self.reverse_charge_applies(request, &country_code, rate) => (
                    rate.country_name.clone(),
                    Decimal::ZERO,
                    true,
                    Some(ExemptionReason::ReverseCharge),
                ),
                Some(rate) => (rate.country_name.clone(), rate.rate, false, None),
            };

        // Each component is rounded on its own, then summed. Rounding the
        // combined base once can differ by ±1 minor unit on .5 boundaries.
        let product_vat = vat_component(request.amount, vat_rate);
        let shipping_vat = vat_component(request.shipping_amount, vat_rate);
        let vat_amount = product_vat + shipping_vat;

        Ok(CalculationResult {
            base_amount: request.amount,
            shipping_amount: request.shipping_amount,
            country_code,
            country_name,
            vat_rate,
            vat_amount,
            total_amount: request.amount + request.shipping_amount + vat_amount,
            is_reverse_charge,
            exemption_reason,
            breakdown: VatBreakdown {
                product_vat,
                shipping_vat,
            },
        })
    }

    /// Compute the tax breakdown for a multi-line cart.
    ///
    /// Line totals are summed into a single base amount before the
    /// calculation runs, so an N-line cart rounds exactly like a
    /// single-item cart with the same subtotal — never N independently
    /// rounded per-line VATs.
    pub fn calculate_for_line_items(
        &self,
        items: &[LineItem],
        context: &OrderContext,
    ) -> Result<CalculationResult, TvaError> {
        let mut errors = Vec::new();
        let mut amount: i64 = 0;
        for (i, item) in items.iter().enumerate() {
            if item.unit_price < 0 {
                errors.push(ValidationError::new(
                    format!("items[{i}].unit_price"),
                    format!("must not be negative, got {}", item.unit_price),
                ));
                continue;
            }
            // Checked arithmetic: a hostile cart must degrade to a
            // validation error, never an overflow panic
            match item.checked_total().and_then(|t| amount.checked_add(t)) {
                Some(sum) => amount = sum,
                None => errors.push(ValidationError::new(
                    format!("items[{i}]"),
                    "line total overflows the supported amount range",
                )),
            }
        }
        if !errors.is_empty() {
            return Err(TvaError::Validation(errors));
        }

        self.calculate(&CalculationRequest {
            amount,
            shipping_amount: context.shipping_amount,
            country_code: context.country_code.clone(),
            customer_type: context.customer_type,
            business_tax_id: context.business_tax_id.clone(),
        })
    }

    /// Active EU member entries of the underlying registry.
    pub fn eu_countries(&self) -> Vec<&TaxRate> {
        self.registry.eu_members().collect()
    }

    pub fn is_eu_country(&self, country_code: &str) -> bool {
        self.registry.is_eu_member(country_code)
    }

    /// All of: business customer, EU destination different from the home
    /// country, and a structurally plausible VAT ID for that destination.
    fn reverse_charge_applies(
        &self,
        request: &CalculationRequest,
        country_code: &str,
        rate: &TaxRate,
    ) -> bool {
        request.customer_type == CustomerType::Business
            && rate.is_eu_member
            && country_code != self.home_country
            && request
                .business_tax_id
                .as_deref()
                .is_some_and(|id| self.vat_id_validator.is_plausible(id, country_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn domestic_consumer_taxed() {
        let calc = VatCalculator::default();
        let result = calc
            .calculate(&CalculationRequest::new(2500, "FR").shipping(500))
            .unwrap();
        assert_eq!(result.vat_rate, dec!(0.20));
        assert_eq!(result.vat_amount, 600);
        assert_eq!(result.total_amount, 3600);
        assert_eq!(result.country_name, "France");
        assert!(!result.is_reverse_charge);
        assert!(result.exemption_reason.is_none());
    }

    #[test]
    fn reverse_charge_cross_border_business() {
        let calc = VatCalculator::default();
        let result = calc
            .calculate(
                &CalculationRequest::new(10000, "DE")
                    .shipping(1000)
                    .customer_type(CustomerType::Business)
                    .business_tax_id("DE123456789"),
            )
            .unwrap();
        assert!(result.is_reverse_charge);
        assert_eq!(result.vat_rate, Decimal::ZERO);
        assert_eq!(result.vat_amount, 0);
        assert_eq!(result.total_amount, 11000);
        assert_eq!(result.exemption_reason, Some(ExemptionReason::ReverseCharge));
    }

    #[test]
    fn home_country_business_stays_domestic() {
        let calc = VatCalculator::default();
        let result = calc
            .calculate(
                &CalculationRequest::new(10000, "FR")
                    .customer_type(CustomerType::Business)
                    .business_tax_id("FR12345678901"),
            )
            .unwrap();
        assert!(!result.is_reverse_charge);
        assert_eq!(result.vat_rate, dec!(0.20));
        assert_eq!(result.vat_amount, 2000);
    }

    #[test]
    fn implausible_vat_id_falls_back_to_taxed() {
        let calc = VatCalculator::default();
        let result = calc
            .calculate(
                &CalculationRequest::new(10000, "DE")
                    .customer_type(CustomerType::Business)
                    .business_tax_id("FR12345678901"), // wrong country prefix
            )
            .unwrap();
        assert!(!result.is_reverse_charge);
        assert_eq!(result.vat_rate, dec!(0.19));
        assert_eq!(result.vat_amount, 1900);
    }

    #[test]
    fn unknown_country_is_exempt_not_error() {
        let calc = VatCalculator::default();
        let result = calc.calculate(&CalculationRequest::new(3000, "US")).unwrap();
        assert_eq!(result.vat_rate, Decimal::ZERO);
        assert_eq!(result.vat_amount, 0);
        assert_eq!(result.total_amount, 3000);
        assert_eq!(result.country_name, "Unknown");
        assert_eq!(result.exemption_reason, Some(ExemptionReason::NonEuCountry));
    }

    #[test]
    fn validation_failure_carries_all_violations() {
        let calc = VatCalculator::default();
        let err = calc
            .calculate(&CalculationRequest::new(-100, "FRA").shipping(-1))
            .unwrap_err();
        let TvaError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn line_items_sum_before_rounding() {
        let calc = VatCalculator::default();
        let items = [LineItem::new(333, 1), LineItem::new(333, 1)];
        let ctx = OrderContext::new("FR");
        let aggregated = calc.calculate_for_line_items(&items, &ctx).unwrap();
        // 666 * 0.20 = 133.2 → 133, not round(66.6) + round(66.6) = 134
        assert_eq!(aggregated.vat_amount, 133);
        assert_eq!(aggregated.base_amount, 666);

        let single = calc.calculate(&CalculationRequest::new(666, "FR")).unwrap();
        assert_eq!(aggregated.vat_amount, single.vat_amount);
    }

    #[test]
    fn line_item_quantities_multiply() {
        let calc = VatCalculator::default();
        let items = [LineItem::new(1200, 6), LineItem::new(2500, 2)];
        let ctx = OrderContext::new("FR").shipping(800);
        let result = calc.calculate_for_line_items(&items, &ctx).unwrap();
        assert_eq!(result.base_amount, 12200);
        assert_eq!(result.shipping_amount, 800);
        assert_eq!(result.vat_amount, 2440 + 160);
        assert_eq!(result.total_amount, 12200 + 800 + 2600);
    }

    #[test]
    fn negative_line_reported_with_index() {
        let calc = VatCalculator::default();
        let items = [LineItem::new(100, 1), LineItem::new(-5, 1)];
        let err = calc
            .calculate_for_line_items(&items, &OrderContext::new("FR"))
            .unwrap_err();
        let TvaError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "items[1].unit_price");
    }

    #[test]
    fn overflowing_cart_is_a_validation_error() {
        let calc = VatCalculator::default();

        // Single line whose total exceeds i64
        let err = calc
            .calculate_for_line_items(&[LineItem::new(i64::MAX, 2)], &OrderContext::new("FR"))
            .unwrap_err();
        let TvaError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "items[0]");

        // Lines that individually fit but overflow when summed
        let items = [LineItem::new(i64::MAX - 1, 1), LineItem::new(i64::MAX - 1, 1)];
        let err = calc
            .calculate_for_line_items(&items, &OrderContext::new("FR"))
            .unwrap_err();
        let TvaError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "items[1]");
    }

    #[test]
    fn line_total_saturates_instead_of_panicking() {
        assert_eq!(LineItem::new(i64::MAX, 2).total(), i64::MAX);
        assert_eq!(LineItem::new(i64::MAX, 2).checked_total(), None);
        assert_eq!(LineItem::new(1250, 6).checked_total(), Some(7500));
    }

    #[test]
    fn empty_cart_is_zero() {
        let calc = VatCalculator::default();
        let result = calc
            .calculate_for_line_items(&[], &OrderContext::new("FR"))
            .unwrap();
        assert_eq!(result.total_amount, 0);
    }

    #[test]
    fn custom_registry_and_home_country() {
        let registry = TaxRateRegistry::new([
            TaxRate::eu("DE", "Germany", dec!(0.19)),
            TaxRate::eu("FR", "France", dec!(0.20)),
        ]);
        let calc = VatCalculator::new(registry).home_country("DE");

        // DE is now domestic: no reverse charge even with a valid ID
        let domestic = calc
            .calculate(
                &CalculationRequest::new(10000, "DE")
                    .customer_type(CustomerType::Business)
                    .business_tax_id("DE123456789"),
            )
            .unwrap();
        assert!(!domestic.is_reverse_charge);
        assert_eq!(domestic.vat_amount, 1900);

        // FR is now cross-border: reverse charge applies
        let cross = calc
            .calculate(
                &CalculationRequest::new(10000, "FR")
                    .customer_type(CustomerType::Business)
                    .business_tax_id("FR12345678901"),
            )
            .unwrap();
        assert!(cross.is_reverse_charge);
    }

    #[test]
    fn pluggable_validator_is_honored() {
        struct RejectAll;
        impl VatIdValidator for RejectAll {
            fn is_plausible(&self, _: &str, _: &str) -> bool {
                false
            }
        }

        let calc = VatCalculator::default().vat_id_validator(RejectAll);
        let result = calc
            .calculate(
                &CalculationRequest::new(10000, "DE")
                    .customer_type(CustomerType::Business)
                    .business_tax_id("DE123456789"),
            )
            .unwrap();
        assert!(!result.is_reverse_charge);
    }

    #[test]
    fn eu_queries_delegate_to_registry() {
        let calc = VatCalculator::default();
        assert!(calc.is_eu_country("de"));
        assert!(!calc.is_eu_country("US"));
        assert_eq!(calc.eu_countries().len(), 27);
    }
}
