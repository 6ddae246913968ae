//! Structural VAT ID plausibility checks for reverse-charge eligibility.
//!
//! The structural check is a heuristic, not ground truth: it tells the
//! calculator a buyer-supplied VAT ID is shaped like a real one for the
//! destination country. Deployments that need authoritative answers plug
//! in their own [`VatIdValidator`] or confirm out of band with the VIES
//! service (see the `vies` feature).

#[cfg(feature = "vies")]
mod vies;

#[cfg(feature = "vies")]
pub use vies::{ViesCheck, ViesClient, ViesError};

/// Decides whether a VAT ID plausibly belongs to a business registered in
/// a given country. Implementations must be infallible: an implausible ID
/// disqualifies reverse charge, it never aborts a calculation.
pub trait VatIdValidator {
    /// `country_code` is the uppercase destination country.
    fn is_plausible(&self, vat_id: &str, country_code: &str) -> bool;
}

/// Format-only validator: country prefix, alphanumeric body, plausible
/// length. No network calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

/// Plausible VAT number length (after the 2-letter prefix) per EU country.
static NUMBER_LENGTHS: &[(&str, usize, usize)] = &[
    ("AT", 9, 9),
    ("BE", 10, 10),
    ("BG", 9, 10),
    ("CY", 9, 9),
    ("CZ", 8, 10),
    ("DE", 9, 9),
    ("DK", 8, 8),
    ("EE", 9, 9),
    ("EL", 9, 9),
    ("ES", 9, 9),
    ("FI", 8, 8),
    ("FR", 11, 11),
    ("HR", 11, 11),
    ("HU", 8, 8),
    ("IE", 8, 9),
    ("IT", 11, 11),
    ("LT", 9, 12),
    ("LU", 8, 8),
    ("LV", 11, 11),
    ("MT", 8, 8),
    ("NL", 12, 12),
    ("PL", 10, 10),
    ("PT", 9, 9),
    ("RO", 6, 10),
    ("SE", 12, 12),
    ("SI", 8, 8),
    ("SK", 10, 10),
];

// Generic fallback for countries without a table entry, total length
// including the prefix.
const GENERIC_MIN: usize = 8;
const GENERIC_MAX: usize = 14;

impl VatIdValidator for StructuralValidator {
    fn is_plausible(&self, vat_id: &str, country_code: &str) -> bool {
        // Strip common separators buyers paste in
        let cleaned: String = vat_id
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '.')
            .collect::<String>()
            .to_ascii_uppercase();

        if cleaned.len() < 4 || !cleaned.is_ascii() {
            return false;
        }

        let (prefix, number) = cleaned.split_at(2);
        if !prefix_matches(prefix, country_code) {
            return false;
        }
        if !number.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return false;
        }

        match NUMBER_LENGTHS.iter().find(|(code, _, _)| *code == prefix) {
            Some(&(_, min, max)) => (min..=max).contains(&number.len()),
            None => (GENERIC_MIN..=GENERIC_MAX).contains(&cleaned.len()),
        }
    }
}

/// Greek VAT IDs carry the `EL` prefix while the ISO country code is `GR`;
/// `GR` itself is never a VIES prefix.
fn prefix_matches(prefix: &str, country_code: &str) -> bool {
    if country_code.eq_ignore_ascii_case("GR") {
        return prefix == "EL";
    }
    prefix.eq_ignore_ascii_case(country_code)
}
