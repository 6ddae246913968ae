use super::error::ValidationError;
use super::types::CalculationRequest;

/// Validate a calculation request.
/// Returns all validation errors found (not just the first).
pub fn validate_request(request: &CalculationRequest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if request.amount < 0 {
        errors.push(ValidationError::new(
            "amount",
            format!("must not be negative, got {}", request.amount),
        ));
    }

    if request.shipping_amount < 0 {
        errors.push(ValidationError::new(
            "shipping_amount",
            format!("must not be negative, got {}", request.shipping_amount),
        ));
    }

    if !is_valid_country_code(&request.country_code) {
        errors.push(ValidationError::new(
            "country_code",
            format!(
                "must be exactly 2 letters (ISO 3166-1 alpha-2), got '{}'",
                request.country_code
            ),
        ));
    }

    errors
}

/// Exactly two ASCII letters. "FRA", "F", "" and digits are all rejected.
pub fn is_valid_country_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_request_has_no_errors() {
        let req = CalculationRequest::new(2500, "FR").shipping(500);
        assert!(validate_request(&req).is_empty());
    }

    #[test]
    fn zero_amounts_are_valid() {
        let req = CalculationRequest::new(0, "FR");
        assert!(validate_request(&req).is_empty());
    }

    #[test]
    fn negative_amount_rejected() {
        let errors = validate_request(&CalculationRequest::new(-1, "FR"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "amount");
    }

    #[test]
    fn negative_shipping_rejected() {
        let errors = validate_request(&CalculationRequest::new(100, "FR").shipping(-5));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "shipping_amount");
    }

    #[test]
    fn all_violations_reported() {
        let errors = validate_request(&CalculationRequest::new(-1, "FRA").shipping(-5));
        assert_eq!(errors.len(), 3);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["amount", "shipping_amount", "country_code"]);
    }

    #[test]
    fn country_code_shapes() {
        assert!(is_valid_country_code("FR"));
        assert!(is_valid_country_code("de")); // normalized later, shape is fine
        assert!(!is_valid_country_code(""));
        assert!(!is_valid_country_code("F"));
        assert!(!is_valid_country_code("FRA"));
        assert!(!is_valid_country_code("F1"));
        assert!(!is_valid_country_code("É!")); // non-ASCII
    }
}
