//! Deterministic merchant → category rules.
//!
//! Lower-cased substring match against a fixed keyword table; the first
//! category in table order wins, so `uber eats` lands in food before the
//! plain `uber` transport rule is reached.

use resumen_core::Category;

const RULES: &[(Category, &[&str])] = &[
    (
        Category::Entertainment,
        &["google", "youtube", "netflix", "spotify", "steam", "playstation", "xbox", "hoyts", "cinema", "cine"],
    ),
    (
        Category::Education,
        &["udemy", "coursera", "skillshare", "domestika", "platzi", "healingmind", "skills to", "timsykes", "traders agency"],
    ),
    (
        Category::Shopping,
        &["mercadolibre", "amazon", "alibaba", "zara", "nike", "adidas", "jumbo", "carrefour", "coto", "dia tienda", "gift card"],
    ),
    (
        Category::Food,
        &["rappi", "pedidosya", "uber eats", "mcdonalds", "starbucks", "cafe", "restaurant", "panera", "cayena"],
    ),
    (
        Category::Technology,
        &["openai", "chatgpt", "github", "microsoft", "adobe", "dropbox"],
    ),
    (
        Category::Transport,
        &["uber", "cabify", "ypf", "shell", "axion", "deheza", "autop"],
    ),
    (
        Category::Utilities,
        &["edenor", "edesur", "metrogas", "aysa", "telecom", "personal", "movistar", "claro", "naturgy", "arba", "zurich", "global z", "municipalidad"],
    ),
    (
        Category::Health,
        &["farmacia", "farmacity", "osde", "swiss medical", "galeno"],
    ),
    (Category::Pets, &["puppis", "pet"]),
    (
        Category::DigitalPayments,
        &["merpago", "mercadopago", "paypal", "dlo*"],
    ),
];

/// Categorize a statement merchant name. Unknown merchants are `Other`.
pub fn categorize(merchant: &str) -> Category {
    let merchant = merchant.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| merchant.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaming_is_entertainment() {
        assert_eq!(categorize("NETFLIX.COM"), Category::Entertainment);
        assert_eq!(categorize("GOOGLE *YouTube (USA,ARS, 600,00)"), Category::Entertainment);
    }

    #[test]
    fn test_table_order_decides_overlaps() {
        assert_eq!(categorize("UBER EATS"), Category::Food);
        assert_eq!(categorize("UBER TRIP"), Category::Transport);
    }

    #[test]
    fn test_local_merchants() {
        assert_eq!(categorize("PUPPIS"), Category::Pets);
        assert_eq!(categorize("YPF DEHEZA"), Category::Transport);
        assert_eq!(categorize("FARMACITY SUC 12"), Category::Health);
        assert_eq!(categorize("MERPAGO*KIOSCO"), Category::DigitalPayments);
        assert_eq!(categorize("OPENAI *CHATGPT SUBSCR"), Category::Technology);
    }

    #[test]
    fn test_unknown_is_other() {
        assert_eq!(categorize("FERRETERIA LOS ANDES"), Category::Other);
        assert_eq!(categorize(""), Category::Other);
    }
}
