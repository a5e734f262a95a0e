use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SportType {
    Sprints,
    MiddleDistance,
    LongDistance,
    Steeplechase,
    Relays,
    Hurdles,
    Marathon,
}

impl SportType {
    pub const ALL: [SportType; 7] = [
        SportType::Sprints,
        SportType::MiddleDistance,
        SportType::LongDistance,
        SportType::Steeplechase,
        SportType::Relays,
        SportType::Hurdles,
        SportType::Marathon,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SportType::Sprints => "Sprints (100m, 200m, 400m)",
            SportType::MiddleDistance => "Middle Distance (800m, 1500m)",
            SportType::LongDistance => "Long Distance (3000m, 5000m, 10000m)",
            SportType::Steeplechase => "Steeplechase (3000m barriers)",
            SportType::Relays => "Relays (4x100m, 4x400m)",
            SportType::Hurdles => "Hurdles (100m/110m, 400m)",
            SportType::Marathon => "Marathon & Road Races",
        }
    }

    /// Key used in the nutrition-plan fixture document.
    pub fn fixture_key(self) -> &'static str {
        match self {
            SportType::Sprints => "Sprints",
            SportType::MiddleDistance => "MiddleDistance",
            SportType::LongDistance => "LongDistance",
            SportType::Steeplechase => "Steeplechase",
            SportType::Relays => "Relays",
            SportType::Hurdles => "Hurdles",
            SportType::Marathon => "Marathon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diet {
    None,
    Vegetarian,
    Vegan,
    GlutenFree,
    Pescatarian,
    Paleo,
    Keto,
    LowCarb,
}

impl Diet {
    pub const ALL: [Diet; 8] = [
        Diet::None,
        Diet::Vegetarian,
        Diet::Vegan,
        Diet::GlutenFree,
        Diet::Pescatarian,
        Diet::Paleo,
        Diet::Keto,
        Diet::LowCarb,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Diet::None => "None",
            Diet::Vegetarian => "Vegetarian",
            Diet::Vegan => "Vegan",
            Diet::GlutenFree => "Gluten-Free",
            Diet::Pescatarian => "Pescatarian",
            Diet::Paleo => "Paleo",
            Diet::Keto => "Keto",
            Diet::LowCarb => "Low-Carb",
        }
    }

    pub fn fixture_key(self) -> &'static str {
        match self {
            Diet::None => "None",
            Diet::Vegetarian => "Vegetarian",
            Diet::Vegan => "Vegan",
            Diet::GlutenFree => "GlutenFree",
            Diet::Pescatarian => "Pescatarian",
            Diet::Paleo => "Paleo",
            Diet::Keto => "Keto",
            Diet::LowCarb => "LowCarb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subscription {
    Basic,
    Premium,
}

pub const COMMON_ALLERGIES: [&str; 6] = ["Peanuts", "Dairy", "Eggs", "Soy", "Shellfish", "Wheat"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryRestrictions {
    pub diet: Diet,
    pub allergies: Vec<String>,
    pub other_allergy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub geographical_area: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub sport: SportType,
    pub subscription: Subscription,
    pub dietary_restrictions: DietaryRestrictions,
}

impl UserProfile {
    pub fn is_premium(&self) -> bool {
        self.subscription == Subscription::Premium
    }

    /// All declared allergies, including the free-text one when present.
    pub fn allergy_list(&self) -> Vec<String> {
        let mut list = self.dietary_restrictions.allergies.clone();
        let other = self.dietary_restrictions.other_allergy.trim();
        if !other.is_empty() {
            list.push(other.to_string());
        }
        list
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub description: String,
    pub macros: Macros,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMeals {
    pub breakfast: Meal,
    pub mid_morning_snack: Meal,
    pub lunch: Meal,
    pub afternoon_snack: Meal,
    pub dinner: Meal,
}

impl DayMeals {
    /// Meal slots in day order, with localization keys for their labels.
    pub fn slots(&self) -> [(&'static str, &Meal); 5] {
        [
            ("breakfast", &self.breakfast),
            ("midMorningSnack", &self.mid_morning_snack),
            ("lunch", &self.lunch),
            ("afternoonSnack", &self.afternoon_snack),
            ("dinner", &self.dinner),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    pub day: String,
    pub meals: DayMeals,
    pub daily_summary: DailySummary,
    pub nutritionist_tip: String,
}

pub type NutritionPlan = Vec<DailyPlan>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecommendationItem {
    pub title: String,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecommendationCategory {
    pub category: String,
    pub recommendations: Vec<EventRecommendationItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPartner {
    pub name: &'static str,
    /// Served areas, either the wildcard "all" or specific area names.
    pub areas: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealDeliveryOption {
    pub partner_name: String,
    pub meal_name: String,
    pub price: u32,
    pub currency: String,
    pub delivery_time: String,
    pub rating: f64,
    pub special_offer: Option<String>,
}

impl MealDeliveryOption {
    /// Identity within an option list.
    pub fn key(&self) -> (&str, &str) {
        (&self.partner_name, &self.meal_name)
    }

    /// Leading integer of the delivery-time range ("25-35 min" -> 25).
    pub fn lead_minutes(&self) -> Option<u32> {
        let digits: String = self
            .delivery_time
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(delivery_time: &str) -> MealDeliveryOption {
        MealDeliveryOption {
            partner_name: "Glovo".to_string(),
            meal_name: "Hearty Oats with Banana".to_string(),
            price: 600,
            currency: "KES".to_string(),
            delivery_time: delivery_time.to_string(),
            rating: 4.4,
            special_offer: None,
        }
    }

    #[test]
    fn lead_minutes_takes_range_start() {
        assert_eq!(option("25-35 min").lead_minutes(), Some(25));
        assert_eq!(option("40-50 min").lead_minutes(), Some(40));
        assert_eq!(option("soon").lead_minutes(), None);
    }

    #[test]
    fn allergy_list_includes_other_when_set() {
        let mut profile = UserProfile {
            name: "Amina".to_string(),
            age: 24,
            gender: Gender::Female,
            geographical_area: "Eldoret, Kenya".to_string(),
            height_cm: 168.0,
            weight_kg: 55.0,
            sport: SportType::LongDistance,
            subscription: Subscription::Basic,
            dietary_restrictions: DietaryRestrictions {
                diet: Diet::None,
                allergies: vec!["Peanuts".to_string()],
                other_allergy: "  ".to_string(),
            },
        };
        assert_eq!(profile.allergy_list(), vec!["Peanuts".to_string()]);
        profile.dietary_restrictions.other_allergy = "Sesame".to_string();
        assert_eq!(
            profile.allergy_list(),
            vec!["Peanuts".to_string(), "Sesame".to_string()]
        );
    }
}
