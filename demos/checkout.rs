use tva::{CalculationRequest, LineItem, OrderContext, VatCalculator, format_currency, format_percentage};

fn main() {
    let calc = VatCalculator::default();

    // Single request: French consumer buying 25.00 € of wine + 5.00 € shipping
    println!("=== Single Request ===\n");

    let result = calc
        .calculate(&CalculationRequest::new(2500, "FR").shipping(500))
        .unwrap();

    println!("  destination: {} ({})", result.country_name, result.country_code);
    println!("  VAT rate:    {}", format_percentage(result.vat_rate));
    println!("  subtotal:    {}", format_currency(result.base_amount, "EUR"));
    println!("  shipping:    {}", format_currency(result.shipping_amount, "EUR"));
    println!(
        "  VAT:         {} (product {}, shipping {})",
        format_currency(result.vat_amount, "EUR"),
        format_currency(result.breakdown.product_vat, "EUR"),
        format_currency(result.breakdown.shipping_vat, "EUR"),
    );
    println!("  total:       {}", format_currency(result.total_amount, "EUR"));

    // Multi-line cart: VAT is computed once on the aggregate
    println!("\n=== Cart ===\n");

    let items = [
        LineItem::new(1250, 6), // case of six at 12.50 €
        LineItem::new(3900, 1), // one magnum at 39.00 €
    ];
    let cart = calc
        .calculate_for_line_items(&items, &OrderContext::new("BE").shipping(900))
        .unwrap();

    for (i, item) in items.iter().enumerate() {
        println!(
            "  line {}: {} x {}",
            i + 1,
            item.quantity,
            format_currency(item.unit_price, "EUR")
        );
    }
    println!("  VAT ({}):  {}", format_percentage(cart.vat_rate), format_currency(cart.vat_amount, "EUR"));
    println!("  total:      {}", format_currency(cart.total_amount, "EUR"));

    // Exports outside the EU resolve to zero VAT, never an error
    println!("\n=== Non-EU Destination ===\n");

    let export = calc.calculate(&CalculationRequest::new(3000, "US")).unwrap();
    println!(
        "  US order: VAT {}, reason: {}",
        format_currency(export.vat_amount, "EUR"),
        export
            .exemption_reason
            .map(|r| r.to_string())
            .unwrap_or_else(|| "none".into())
    );
}
