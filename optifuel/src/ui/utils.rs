use crate::models::{Macros, MealDeliveryOption};

/// Format a price as "KES 650"
pub fn fmt_price(option: &MealDeliveryOption) -> String {
    format!("{} {}", option.currency, option.price)
}

/// Format a rating as "4.6 *"
pub fn fmt_rating(rating: f64) -> String {
    format!("{rating:.1} *")
}

/// Format a macro triple as "P 18g | C 75g | F 12g"
pub fn fmt_macros(macros: &Macros) -> String {
    format!(
        "P {}g | C {}g | F {}g",
        macros.protein, macros.carbs, macros.fats
    )
}

/// Checkbox marker for multi-select lists
pub fn checkbox(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

/// Truncate a string to a maximum display length with an ellipsis
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_and_rating_formatting() {
        let option = MealDeliveryOption {
            partner_name: "Glovo".to_string(),
            meal_name: "Hearty Oats with Banana".to_string(),
            price: 600,
            currency: "KES".to_string(),
            delivery_time: "30-40 min".to_string(),
            rating: 4.4,
            special_offer: None,
        };
        assert_eq!(fmt_price(&option), "KES 600");
        assert_eq!(fmt_rating(option.rating), "4.4 *");
    }

    #[test]
    fn truncate_keeps_short_strings_intact() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer string here", 10), "a longe...");
    }
}
