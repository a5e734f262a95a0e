//! Embedded fixture data standing in for the recommendation backend:
//! nutrition plans keyed by sport and diet, event-day guidance, and the
//! delivery partner catalogue.

use std::collections::HashMap;
use std::sync::OnceLock;

use itertools::Itertools;

use crate::models::{
    DeliveryPartner, Diet, EventRecommendationCategory, MealDeliveryOption, NutritionPlan,
    SportType,
};

const NUTRITION_PLANS_JSON: &str = include_str!("../data/nutrition-plans.json");
const EVENT_RECOMMENDATIONS_JSON: &str = include_str!("../data/event-recommendations.json");

type PlanTable = HashMap<String, HashMap<String, NutritionPlan>>;

fn nutrition_plans() -> &'static PlanTable {
    static PLANS: OnceLock<PlanTable> = OnceLock::new();
    PLANS.get_or_init(|| {
        serde_json::from_str(NUTRITION_PLANS_JSON).expect("embedded nutrition plans parse")
    })
}

/// Resolves the plan for a sport/diet pair. Falls back to the sport's
/// `None` diet, then to the global `default`/`None` plan, which the
/// fixture always contains.
pub fn plan_for(sport: SportType, diet: Diet) -> &'static NutritionPlan {
    let plans = nutrition_plans();
    let sport_plans = plans
        .get(sport.fixture_key())
        .or_else(|| plans.get("default"));
    sport_plans
        .and_then(|by_diet| by_diet.get(diet.fixture_key()).or_else(|| by_diet.get("None")))
        .or_else(|| plans.get("default").and_then(|by_diet| by_diet.get("None")))
        .expect("fixture contains a default/None plan")
}

pub fn event_recommendations() -> &'static [EventRecommendationCategory] {
    static CATEGORIES: OnceLock<Vec<EventRecommendationCategory>> = OnceLock::new();
    CATEGORIES.get_or_init(|| {
        serde_json::from_str(EVENT_RECOMMENDATIONS_JSON).expect("embedded recommendations parse")
    })
}

const DELIVERY_PARTNERS: [DeliveryPartner; 5] = [
    DeliveryPartner {
        name: "Uber Eats",
        areas: &["all"],
    },
    DeliveryPartner {
        name: "Glovo",
        areas: &["all"],
    },
    DeliveryPartner {
        name: "KFC Delivery",
        areas: &["all"],
    },
    DeliveryPartner {
        name: "EldoFresh Meals",
        areas: &["Eldoret, Kenya"],
    },
    DeliveryPartner {
        name: "Nairobi Bites",
        areas: &["Nairobi, Kenya"],
    },
];

fn delivery_options() -> &'static [MealDeliveryOption] {
    static OPTIONS: OnceLock<Vec<MealDeliveryOption>> = OnceLock::new();

    fn option(
        partner_name: &str,
        meal_name: &str,
        price: u32,
        delivery_time: &str,
        rating: f64,
        special_offer: Option<&str>,
    ) -> MealDeliveryOption {
        MealDeliveryOption {
            partner_name: partner_name.to_string(),
            meal_name: meal_name.to_string(),
            price,
            currency: "KES".to_string(),
            delivery_time: delivery_time.to_string(),
            rating,
            special_offer: special_offer.map(str::to_string),
        }
    }

    OPTIONS.get_or_init(|| {
        vec![
            // oatmeal
            option("Uber Eats", "Classic Berry Oatmeal", 650, "25-35 min", 4.6, Some("Free Delivery")),
            option("Glovo", "Hearty Oats with Banana", 600, "30-40 min", 4.4, None),
            option("EldoFresh Meals", "Local Honey Oatmeal", 550, "20-30 min", 4.8, None),
            // chicken
            option("Uber Eats", "Grilled Chicken Caesar Salad", 950, "30-40 min", 4.7, None),
            option("Nairobi Bites", "Kuku Salad Bowl", 850, "25-35 min", 4.9, Some("10% Off")),
            option("Glovo", "Healthy Chicken Greens", 900, "35-45 min", 4.5, None),
            // salmon
            option("Uber Eats", "Baked Salmon & Quinoa", 1400, "40-50 min", 4.8, None),
            option("Nairobi Bites", "Mchuzi wa Samaki with Rice", 1250, "30-40 min", 4.7, None),
            option("Glovo", "Salmon Fillet Dinner", 1450, "45-55 min", 4.6, None),
            // pasta
            option("Glovo", "Chicken & Tomato Pasta", 1100, "30-40 min", 4.5, None),
            option("Uber Eats", "Whole-wheat Chicken Pasta", 1200, "25-35 min", 4.7, Some("Buy 1 Get 1")),
            // tofu
            option("Uber Eats", "Spicy Tofu Scramble", 800, "25-35 min", 4.5, None),
            option("Nairobi Bites", "Vegan Tofu Delight", 750, "30-40 min", 4.8, None),
        ]
    })
}

/// Filters the catalogue down to partners serving `area` and meals whose
/// name contains the first word of `meal_name`. Duplicate
/// (partner, meal) entries are dropped.
pub fn delivery_options_for(meal_name: &str, area: &str) -> Vec<MealDeliveryOption> {
    let area_lower = area.to_lowercase();
    let available: Vec<&str> = DELIVERY_PARTNERS
        .iter()
        .filter(|partner| {
            partner.areas.contains(&"all")
                || partner
                    .areas
                    .iter()
                    .any(|a| area_lower.contains(&a.to_lowercase()))
        })
        .map(|partner| partner.name)
        .collect();

    let keyword = meal_name
        .to_lowercase()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();

    delivery_options()
        .iter()
        .filter(|option| {
            available.contains(&option.partner_name.as_str())
                && option.meal_name.to_lowercase().contains(&keyword)
        })
        .cloned()
        .unique_by(|option| {
            let (partner, meal) = option.key();
            (partner.to_string(), meal.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_fixtures_parse() {
        assert!(nutrition_plans().contains_key("default"));
        assert!(!event_recommendations().is_empty());
    }

    #[test]
    fn plan_lookup_prefers_exact_match() {
        let plan = plan_for(SportType::Sprints, Diet::None);
        assert_eq!(plan[0].meals.breakfast.name, "Oatmeal with Eggs on the Side");
    }

    #[test]
    fn plan_lookup_falls_back_to_sport_none() {
        let vegan = plan_for(SportType::Sprints, Diet::Vegan);
        let none = plan_for(SportType::Sprints, Diet::None);
        assert_eq!(vegan, none);
    }

    #[test]
    fn plan_lookup_falls_back_to_default() {
        let plan = plan_for(SportType::Hurdles, Diet::Keto);
        let default = plan_for(SportType::Hurdles, Diet::None);
        assert_eq!(plan, default);
        assert_eq!(plan[0].meals.breakfast.name, "Oatmeal with Banana & Honey");
    }

    #[test]
    fn regional_partner_requires_matching_area() {
        let eldoret = delivery_options_for("Oatmeal with Banana & Honey", "Eldoret, Kenya");
        assert!(
            eldoret
                .iter()
                .any(|o| o.partner_name == "EldoFresh Meals")
        );

        let kisumu = delivery_options_for("Oatmeal with Banana & Honey", "Kisumu, Kenya");
        assert!(!kisumu.is_empty());
        assert!(
            kisumu
                .iter()
                .all(|o| o.partner_name != "EldoFresh Meals")
        );
    }

    #[test]
    fn keyword_is_first_word_of_meal_name() {
        let options = delivery_options_for("Chicken Salad with Avocado", "Nairobi, Kenya");
        assert!(options.iter().all(|o| o.meal_name.to_lowercase().contains("chicken")));
        assert!(options.iter().any(|o| o.partner_name == "Uber Eats"));
        assert!(options.iter().any(|o| o.partner_name == "Glovo"));
        // "Kuku Salad Bowl" never matches the English keyword
        assert!(options.iter().all(|o| o.partner_name != "Nairobi Bites"));
    }

    #[test]
    fn unknown_meal_yields_no_options() {
        assert!(delivery_options_for("Githeri Special", "Nairobi, Kenya").is_empty());
    }
}
