use tva::{CalculationRequest, CustomerType, VatCalculator, format_currency};

fn main() {
    let calc = VatCalculator::default();

    println!("=== Intra-EU B2B Reverse Charge ===\n");

    let scenarios = [
        ("German business, valid VAT ID", "DE", Some("DE123456789")),
        ("German business, no VAT ID", "DE", None),
        ("German business, malformed ID", "DE", Some("DE12")),
        ("French business (home country)", "FR", Some("FR12345678901")),
        ("Dutch business, valid VAT ID", "NL", Some("NL123456789B01")),
    ];

    for (label, country, vat_id) in scenarios {
        let mut request = CalculationRequest::new(10000, country)
            .shipping(1000)
            .customer_type(CustomerType::Business);
        if let Some(id) = vat_id {
            request = request.business_tax_id(id);
        }

        let result = calc.calculate(&request).unwrap();
        println!("  {label}:");
        println!(
            "    reverse charge: {}, VAT: {}, total: {}",
            result.is_reverse_charge,
            format_currency(result.vat_amount, "EUR"),
            format_currency(result.total_amount, "EUR"),
        );
        if let Some(reason) = result.exemption_reason {
            println!("    exemption: {reason}");
        }
    }
}
