//! Amounts in the Argentine convention: comma decimals, period thousands.
//!
//!   1.234,56    ->  1234.56
//!   123,45      ->  123.45
//!   (500,00)    -> -500.0

/// Parse an amount token. Unparseable or empty input yields `0.0`.
pub fn parse_amount(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let negative = text.starts_with('-') || text.starts_with('(');
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '-'))
        .collect();
    let stripped = stripped.trim();

    let normalized = if stripped.contains(',') && stripped.contains('.') {
        stripped.replace('.', "").replace(',', ".")
    } else {
        stripped.replace(',', ".")
    };

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if negative {
                -value
            } else {
                value
            }
        }
        _ => 0.0,
    }
}
