//! Commodity names offered as search suggestions.

/// Commodities commonly reported by Indian mandis.
pub const COMMODITIES: &[&str] = &[
    // Cereals and millets
    "Rice", "Wheat", "Maize", "Millet", "Sorghum", "Pearl Millet", "Barley",
    // Pulses
    "Lentils", "Chickpeas", "Pigeon Pea", "Black Gram", "Green Gram",
    // Oilseeds
    "Groundnut", "Mustard", "Sesame", "Sunflower", "Soybean",
    // Cash crops
    "Sugarcane", "Cotton", "Jute", "Tobacco",
    // Vegetables
    "Tomato", "Potato", "Onion", "Cauliflower", "Cabbage", "Pea", "Bean", "Brinjal", "Okra",
    "Spinach", "Carrot", "Radish", "Cucumber", "Bottle Gourd", "Ridge Gourd", "Snake Gourd",
    "Bitter Gourd",
    // Plantation crops and spices
    "Tea", "Coffee", "Turmeric", "Ginger", "Garlic", "Chilli", "Betel Leaf", "Arecanut",
    "Cashew", "Cardamom", "Pepper", "Rubber", "Coconut",
    // Fruits
    "Apple", "Mango", "Banana", "Orange", "Grapes", "Guava", "Papaya", "Pomegranate",
    "Pineapple", "Lemon", "Lime", "Watermelon", "Muskmelon",
];

/// Default number of suggestions returned.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Case-insensitive substring match over [`COMMODITIES`], in list order.
pub fn suggest(query: &str, limit: usize) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    COMMODITIES
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commodity_list_size() {
        assert_eq!(COMMODITIES.len(), 64);
    }

    #[test]
    fn test_suggest_case_insensitive() {
        assert_eq!(suggest("ONI", 10), vec!["Onion"]);
        assert_eq!(suggest("onion", 10), vec!["Onion"]);
    }

    #[test]
    fn test_suggest_preserves_order() {
        let gourds = suggest("gourd", 10);
        assert_eq!(
            gourds,
            vec!["Bottle Gourd", "Ridge Gourd", "Snake Gourd", "Bitter Gourd"]
        );
    }

    #[test]
    fn test_suggest_respects_limit() {
        let all = suggest("a", 100);
        assert!(all.len() > 10);
        assert_eq!(suggest("a", DEFAULT_SUGGESTION_LIMIT).len(), 10);
        assert_eq!(suggest("a", 3), all[..3].to_vec());
    }

    #[test]
    fn test_suggest_blank_query() {
        assert!(suggest("", 10).is_empty());
        assert!(suggest("   ", 10).is_empty());
    }

    #[test]
    fn test_suggest_no_match() {
        assert!(suggest("quinoa", 10).is_empty());
    }
}
