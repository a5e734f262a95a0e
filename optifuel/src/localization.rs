//! Key-based string lookup for the two supported languages. Swahili
//! strings fall back to English when missing.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Sw,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Sw,
            Language::Sw => Language::En,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Sw => "SW",
        }
    }
}

/// Looks up `key` in the active language. Unknown keys render as the key
/// itself so a missed entry is visible rather than fatal.
pub fn t(language: Language, key: &'static str) -> &'static str {
    match entry(key) {
        Some((en, sw)) => match language {
            Language::En => en,
            Language::Sw => sw.unwrap_or(en),
        },
        None => key,
    }
}

#[rustfmt::skip]
fn entry(key: &str) -> Option<(&'static str, Option<&'static str>)> {
    let pair = match key {
        // general
        "appName" => ("OptiFuel", None),
        "tagline" => ("Fuel your performance", Some("Ongeza nguvu ya mchezo wako")),
        "language" => ("Language", Some("Lugha")),
        "notifications" => ("Notifications", Some("Arifa")),
        "noNotifications" => ("No notifications yet", Some("Hakuna arifa bado")),
        "markRead" => ("Mark read", Some("Weka imesomwa")),
        "markAllRead" => ("Mark all read", Some("Weka zote zimesomwa")),
        "help" => ("Help", Some("Msaada")),
        "quit" => ("Quit", Some("Toka")),
        "back" => ("Back", Some("Rudi")),
        "next" => ("Next", Some("Endelea")),
        "submit" => ("Submit", Some("Wasilisha")),
        "close" => ("Close", Some("Funga")),
        "loading" => ("Loading...", Some("Inapakia...")),
        "premium" => ("Premium", None),
        "basic" => ("Basic", Some("Kawaida")),
        // profile form
        "getStarted" => ("Get Started", Some("Anza Sasa")),
        "createProfile" => ("Create your athlete profile", Some("Tengeneza wasifu wako wa mwanariadha")),
        "step" => ("Step", Some("Hatua")),
        "of" => ("of", Some("kati ya")),
        "personalInfo" => ("Personal Info", Some("Taarifa Binafsi")),
        "biometrics" => ("Biometrics", Some("Vipimo vya Mwili")),
        "sportDetails" => ("Sport & Diet", Some("Mchezo na Lishe")),
        "fullName" => ("Full Name", Some("Jina Kamili")),
        "age" => ("Age", Some("Umri")),
        "gender" => ("Gender", Some("Jinsia")),
        "geographicalArea" => ("Geographical Area", Some("Eneo la Kijiografia")),
        "height" => ("Height (cm)", Some("Urefu (cm)")),
        "weight" => ("Weight (kg)", Some("Uzito (kg)")),
        "primarySport" => ("Primary Sport", Some("Mchezo Mkuu")),
        "diet" => ("Diet", Some("Lishe")),
        "allergies" => ("Allergies", Some("Mzio")),
        "otherAllergy" => ("Other allergy", Some("Mzio mwingine")),
        "nameRequired" => ("Please enter your name", Some("Tafadhali andika jina lako")),
        "invalidAge" => ("Age must be between 10 and 100", Some("Umri lazima uwe kati ya 10 na 100")),
        "invalidHeight" => ("Height must be between 100 and 250 cm", Some("Urefu lazima uwe kati ya cm 100 na 250")),
        "invalidWeight" => ("Weight must be between 30 and 200 kg", Some("Uzito lazima uwe kati ya kg 30 na 200")),
        // nutrition plan
        "yourPlan" => ("Your Nutrition Plan", Some("Mpango Wako wa Lishe")),
        "generatingPlan" => ("Preparing your personalized plan...", Some("Inaandaa mpango wako maalum...")),
        "dailySummary" => ("Daily Summary", Some("Muhtasari wa Siku")),
        "calories" => ("Calories", Some("Kalori")),
        "protein" => ("Protein", Some("Protini")),
        "carbs" => ("Carbs", Some("Wanga")),
        "fats" => ("Fats", Some("Mafuta")),
        "nutritionistTip" => ("Nutritionist's Tip", Some("Ushauri wa Mtaalamu wa Lishe")),
        "listenToTip" => ("Listen to tip", Some("Sikiliza ushauri")),
        "speechSaved" => ("Tip audio saved to", Some("Sauti ya ushauri imehifadhiwa")),
        "speechFailed" => ("Could not synthesize the tip", Some("Imeshindwa kutengeneza sauti")),
        "mealDetails" => ("Meal Details", Some("Maelezo ya Mlo")),
        "ingredients" => ("Ingredients", Some("Viungo")),
        "preparation" => ("Preparation", Some("Maandalizi")),
        "orderMeal" => ("Order this meal", Some("Agiza mlo huu")),
        "allergyWarningTitle" => ("Allergy notice", Some("Tahadhari ya mzio")),
        "allergyWarningText" => ("You reported: {allergies}. Double-check every meal.", Some("Umetaja: {allergies}. Hakiki kila mlo.")),
        "breakfast" => ("Breakfast", Some("Kifungua kinywa")),
        "midMorningSnack" => ("Mid-morning Snack", Some("Kitafunwa cha Asubuhi")),
        "lunch" => ("Lunch", Some("Chakula cha Mchana")),
        "afternoonSnack" => ("Afternoon Snack", Some("Kitafunwa cha Mchana")),
        "dinner" => ("Dinner", Some("Chakula cha Jioni")),
        // delivery
        "deliveryOptions" => ("Delivery Options", Some("Chaguo za Uwasilishaji")),
        "findingOptions" => ("Finding delivery options...", Some("Inatafuta chaguo za uwasilishaji...")),
        "noDeliveryOptions" => ("No delivery options found for your area", Some("Hakuna chaguo za uwasilishaji katika eneo lako")),
        "compare" => ("Compare", Some("Linganisha")),
        "selectAtLeastTwo" => ("Select at least two options to compare", Some("Chagua angalau chaguo mbili kulinganisha")),
        "bestPrice" => ("Best price", Some("Bei nafuu")),
        "fastestDelivery" => ("Fastest", Some("Haraka zaidi")),
        "highestRating" => ("Top rated", Some("Kiwango cha juu")),
        "confirmOrder" => ("Confirm Order", Some("Thibitisha Agizo")),
        "proceedToPayment" => ("Proceed to payment", Some("Endelea na malipo")),
        "mpesaPhonePrompt" => ("Enter your M-PESA number (2547XXXXXXXX)", Some("Weka nambari yako ya M-PESA (2547XXXXXXXX)")),
        "phoneNumber" => ("Phone number", Some("Nambari ya simu")),
        "invalidPhoneNumber" => ("Enter a valid number starting with 254 (12 digits)", Some("Weka nambari sahihi inayoanza na 254 (tarakimu 12)")),
        "pay" => ("Pay", Some("Lipa")),
        "processingPayment" => ("Sending STK push, check your phone...", Some("Inatuma STK push, angalia simu yako...")),
        "paymentSuccess" => ("Payment received. Your order is on its way!", Some("Malipo yamepokelewa. Agizo lako linakuja!")),
        "paymentFailed" => ("Payment failed. Please try again.", Some("Malipo yameshindikana. Tafadhali jaribu tena.")),
        "orderPlacedNotification" => ("Order placed with {partner} for {meal}", Some("Agizo limewekwa kwa {partner} kwa {meal}")),
        "deliveryTime" => ("Delivery", Some("Uwasilishaji")),
        "rating" => ("Rating", Some("Kiwango")),
        "specialOffer" => ("Offer", Some("Ofa")),
        // premium upgrade
        "premiumFeature" => ("This is a Premium feature", Some("Hii ni huduma ya Premium")),
        "upgradeToPremium" => ("Upgrade to Premium", Some("Boresha hadi Premium")),
        "upgradePrice" => ("KES 999 / month", Some("KES 999 kwa mwezi")),
        "confirmUpgrade" => ("Confirm upgrade for KES 999?", Some("Thibitisha uboreshaji kwa KES 999?")),
        "enterPin" => ("Enter your M-PESA PIN", Some("Weka PIN yako ya M-PESA")),
        "invalidPin" => ("PIN must be at least 4 digits", Some("PIN lazima iwe na tarakimu 4 au zaidi")),
        "processing" => ("Processing...", Some("Inashughulikia...")),
        "upgradeSuccess" => ("Welcome to Premium!", Some("Karibu Premium!")),
        "upgradeNotification" => ("Your account is now Premium", Some("Akaunti yako sasa ni Premium")),
        // event planner
        "eventPlanner" => ("Event Planner", Some("Mpangaji wa Mashindano")),
        "eventName" => ("Event name", Some("Jina la shindano")),
        "eventDate" => ("Event date", Some("Tarehe ya shindano")),
        "getRecommendations" => ("Get recommendations", Some("Pata mapendekezo")),
        "generatingRecommendations" => ("Preparing race-day guidance...", Some("Inaandaa mwongozo wa siku ya mbio...")),
        "rateLimitError" => ("The assistant is busy right now. Please try again in a moment.", Some("Msaidizi ana shughuli kwa sasa. Tafadhali jaribu tena baadaye kidogo.")),
        "aiError" => ("Something went wrong. Please try again.", Some("Hitilafu imetokea. Tafadhali jaribu tena.")),
        "locationDetected" => ("Location detected", Some("Eneo limepatikana")),
        "locationUnavailable" => ("Location unavailable", Some("Eneo halipatikani")),
        // assistant
        "aiAssistant" => ("AI Assistant", Some("Msaidizi wa AI")),
        "askAnything" => ("Ask anything about sports nutrition", Some("Uliza chochote kuhusu lishe ya michezo")),
        "typeMessage" => ("Type a message", Some("Andika ujumbe")),
        "assistantThinking" => ("Thinking...", Some("Inafikiria...")),
        // hydration
        "hydrationTracker" => ("Hydration Tracker", Some("Kifuatiliaji cha Maji")),
        "waterIntake" => ("Water intake", Some("Unywaji wa maji")),
        "goalReached" => ("Goal reached! Great job staying hydrated.", Some("Lengo limefikiwa! Hongera kwa kunywa maji ya kutosha.")),
        "addWater" => ("Add water", Some("Ongeza maji")),
        "reset" => ("Reset", Some("Anza upya")),
        "ofGoal" => ("of goal", Some("ya lengo")),
        // logs
        "logs" => ("Logs", None),
        "noLogsYet" => ("No logs yet", Some("Hakuna kumbukumbu bado")),
        _ => return None,
    };
    Some(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swahili_falls_back_to_english() {
        assert_eq!(t(Language::Sw, "premium"), "Premium");
        assert_eq!(t(Language::Sw, "quit"), "Toka");
    }

    #[test]
    fn unknown_keys_render_as_themselves() {
        assert_eq!(t(Language::En, "definitelyMissing"), "definitelyMissing");
    }

    #[test]
    fn toggling_round_trips() {
        assert_eq!(Language::En.toggled(), Language::Sw);
        assert_eq!(Language::En.toggled().toggled(), Language::En);
    }
}
