use crate::models::{DietaryRestrictions, Subscription, UserProfile};
use crate::state::ProfileFormState;

/// Validates a sandbox M-PESA number: "254" prefix followed by nine
/// digits, twelve characters total. Errors are localization keys.
pub fn validate_phone_number(phone: &str) -> Result<(), &'static str> {
    let valid = phone.len() == 12
        && phone.starts_with("254")
        && phone.chars().all(|c| c.is_ascii_digit());
    if valid { Ok(()) } else { Err("invalidPhoneNumber") }
}

/// A simulated PIN needs at least four digits.
pub fn validate_pin(pin: &str) -> Result<(), &'static str> {
    let valid = pin.len() >= 4 && pin.chars().all(|c| c.is_ascii_digit());
    if valid { Ok(()) } else { Err("invalidPin") }
}

/// Validate and build a UserProfile from form state
pub fn validate_and_build_profile(form: &ProfileFormState) -> Result<UserProfile, &'static str> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err("nameRequired");
    }

    let age: u32 = form.age.trim().parse().map_err(|_| "invalidAge")?;
    if !(10..=100).contains(&age) {
        return Err("invalidAge");
    }

    let height_cm: f64 = form.height.trim().parse().map_err(|_| "invalidHeight")?;
    if !(100.0..=250.0).contains(&height_cm) {
        return Err("invalidHeight");
    }

    let weight_kg: f64 = form.weight.trim().parse().map_err(|_| "invalidWeight")?;
    if !(30.0..=200.0).contains(&weight_kg) {
        return Err("invalidWeight");
    }

    Ok(UserProfile {
        name: name.to_string(),
        age,
        gender: form.gender,
        geographical_area: form.area.trim().to_string(),
        height_cm,
        weight_kg,
        sport: form.sport,
        subscription: Subscription::Basic,
        dietary_restrictions: DietaryRestrictions {
            diet: form.diet,
            allergies: form.selected_allergies(),
            other_allergy: form.other_allergy.trim().to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_sandbox_format_only() {
        assert!(validate_phone_number("254712345678").is_ok());
        assert!(validate_phone_number("0712345678").is_err());
        assert!(validate_phone_number("25471234567").is_err());
        assert!(validate_phone_number("2547123456789").is_err());
        assert!(validate_phone_number("254712x45678").is_err());
        assert!(validate_phone_number("").is_err());
    }

    #[test]
    fn pin_needs_four_digits() {
        assert!(validate_pin("1234").is_ok());
        assert!(validate_pin("123456").is_ok());
        assert!(validate_pin("123").is_err());
        assert!(validate_pin("12ab").is_err());
    }

    #[test]
    fn profile_requires_name_and_sane_numbers() {
        let mut form = ProfileFormState::default();
        assert_eq!(validate_and_build_profile(&form), Err("nameRequired"));

        form.name = "Kipchoge".to_string();
        form.age = "200".to_string();
        assert_eq!(validate_and_build_profile(&form), Err("invalidAge"));

        form.age = "30".to_string();
        form.height = "abc".to_string();
        assert_eq!(validate_and_build_profile(&form), Err("invalidHeight"));

        form.height = "170".to_string();
        form.weight = "20".to_string();
        assert_eq!(validate_and_build_profile(&form), Err("invalidWeight"));

        form.weight = "60".to_string();
        let profile = validate_and_build_profile(&form).unwrap();
        assert_eq!(profile.name, "Kipchoge");
        assert_eq!(profile.subscription, Subscription::Basic);
    }
}
