//! Carbon-footprint questionnaire and required-answer validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// How a question is answered.
pub enum FieldKind {
    /// Pick one of the listed options.
    Choice,
    /// Free text.
    Text,
}

#[derive(Debug, Clone, Copy, Serialize)]
/// One question of the questionnaire.
pub struct QuizField {
    /// Key used in the submitted answers.
    pub name: &'static str,
    /// Question shown to the user.
    pub label: &'static str,
    /// Answer style.
    pub kind: FieldKind,
    /// Whether a blank answer blocks submission.
    pub required: bool,
    /// Options for [`FieldKind::Choice`] questions.
    pub options: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
/// A titled group of questions.
pub struct QuizSection {
    /// Section heading.
    pub title: &'static str,
    /// Questions in display order.
    pub fields: &'static [QuizField],
}

impl QuizSection {
    /// Labels of required questions in this section left blank.
    #[must_use]
    pub fn missing(&self, answers: &QuizAnswers) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|field| field.required && answers.answer(field.name).is_none())
            .map(|field| field.label)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// Submitted answers keyed by field name.
pub struct QuizAnswers(BTreeMap<String, String>);

impl QuizAnswers {
    /// An empty answer sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any earlier one.
    pub fn insert<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.0.insert(name.into(), value.into());
    }

    /// The trimmed answer for a field, `None` when absent or blank.
    #[must_use]
    pub fn answer(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Iterator over all recorded answers.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of recorded answers, blank ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for QuizAnswers {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Labels of every required question left blank, in questionnaire order.
#[must_use]
pub fn missing_required(answers: &QuizAnswers) -> Vec<&'static str> {
    QUESTIONNAIRE
        .iter()
        .flat_map(|section| section.missing(answers))
        .collect()
}

const REGIONS: &[&str] = &[
    "North America",
    "Europe",
    "Asia",
    "South America",
    "Africa",
    "Oceania",
];

const fn choice(
    name: &'static str,
    label: &'static str,
    required: bool,
    options: &'static [&'static str],
) -> QuizField {
    QuizField {
        name,
        label,
        kind: FieldKind::Choice,
        required,
        options,
    }
}

const fn text(name: &'static str, label: &'static str, required: bool) -> QuizField {
    QuizField {
        name,
        label,
        kind: FieldKind::Text,
        required,
        options: &[],
    }
}

/// The full questionnaire, in display order.
pub const QUESTIONNAIRE: &[QuizSection] = &[
    QuizSection {
        title: "Personal Details",
        fields: &[
            choice(
                "age_range",
                "What is your approximate age range?",
                true,
                &["<18 years", "18-30 years", "31-45 years", "46-60 years", ">60 years"],
            ),
            choice(
                "country_current_residence",
                "In which region are you currently residing?",
                true,
                REGIONS,
            ),
            choice(
                "country_majority_of_life_lived",
                "In which region have you spent the majority of your life living in?",
                true,
                REGIONS,
            ),
            choice(
                "gender",
                "What is your gender?",
                false,
                &["Male", "Female", "Other", "Prefer not to say"],
            ),
            choice(
                "occupation_type",
                "What is your primary occupation type?",
                true,
                &[
                    "Student",
                    "Unemployed/Retired",
                    "Office-based work",
                    "Remote work",
                    "Manual labor/Field work",
                    "Other",
                ],
            ),
        ],
    },
    QuizSection {
        title: "Home & Energy",
        fields: &[
            choice(
                "home_size_number_of_bedrooms",
                "What is the size of your home (in number of bedrooms)?",
                false,
                &[
                    "1 bedroom (or studio)",
                    "2 bedrooms",
                    "3 bedrooms",
                    "4 bedrooms",
                    "5+ bedrooms",
                ],
            ),
            choice(
                "energy_type",
                "What is your main energy source at home?",
                true,
                &[
                    "Fully Renewable (e.g., own solar)",
                    "Grid (certified green/renewable tariff)",
                    "Grid (standard mix, varies by region)",
                    "Mostly Fossil Fuels (e.g., gas heating, mixed grid)",
                    "Primarily Coal/Oil (e.g., oil heating, coal-heavy grid)",
                ],
            ),
            choice(
                "appliance_efficiency",
                "How would you describe the energy efficiency of your appliances?",
                false,
                &[
                    "Most are high-efficiency models",
                    "Some are high-efficiency",
                    "Few are high-efficiency",
                    "Mostly older/standard models",
                ],
            ),
            choice(
                "type_of_heating",
                "What type of heating do you primarily use?",
                false,
                &[
                    "Efficient Electric (Heat Pump)",
                    "Standard Electric (Resistive)",
                    "Natural Gas",
                    "Heating Oil",
                    "Wood/Biomass (sustainable source)",
                    "Wood/Biomass (unknown source)",
                    "No heating / Minimal use",
                ],
            ),
            choice(
                "prompts_to_ai_per_day_on_average",
                "How many prompts do you send to AI assistants on average per day?",
                true,
                &[
                    "0-10 (Minimal use)",
                    "11-50 (Light use)",
                    "51-100 (Moderate use)",
                    "100+ (Heavy use)",
                ],
            ),
        ],
    },
    QuizSection {
        title: "Transportation",
        fields: &[
            text(
                "number_and_types_of_vehicles",
                "Describe the number and types of vehicles you own.",
                true,
            ),
            choice(
                "average_hours_in_a_car_per_day",
                "On average, how many hours do you spend in a car per day?",
                true,
                &[
                    "0 hours (or very rarely)",
                    "Around 30 minutes",
                    "Around 1 hour",
                    "Around 1 hour 30 minutes",
                    "Around 2 hours",
                    "Around 2 hours 30 minutes",
                    "More than 3 hours",
                ],
            ),
            choice(
                "average_international_flights_per_year",
                "How many international round-trip flights do you take per year?",
                true,
                &[
                    "None",
                    "1 short-haul (e.g., within your continent)",
                    "1 long-haul (e.g., intercontinental)",
                    "2-3 short-haul",
                    "2-3 long-haul",
                    "More than 3 long-haul",
                ],
            ),
            choice(
                "average_domestic_flights_per_year",
                "How many domestic round-trip flights do you take per year?",
                true,
                &[
                    "None",
                    "1 flight",
                    "2 flights",
                    "3 flights",
                    "4 flights",
                    "5-7 flights",
                    "8+ flights",
                ],
            ),
        ],
    },
    QuizSection {
        title: "Food",
        fields: &[
            choice(
                "diet_type",
                "What best describes your diet?",
                true,
                &[
                    "Vegan (no animal products)",
                    "Vegetarian (no meat/fish, may include dairy/eggs)",
                    "Pescatarian (vegetarian + fish)",
                    "Omnivore (balanced, eats meat occasionally)",
                    "Meat-heavy (red meat most days)",
                ],
            ),
            choice(
                "consumption_of_beef_or_lamb_per_week",
                "How often do you consume beef or lamb per week?",
                false,
                &["Never/Rarely", "1-2 times a week", "3-4 times a week", "Almost daily"],
            ),
            choice(
                "average_percent_of_meal_wasted",
                "What percentage of your purchased food goes to waste?",
                true,
                &[
                    "Very little (0-10%)",
                    "Some (11-25%)",
                    "Moderate (26-40%)",
                    "A lot (Over 40%)",
                ],
            ),
            choice(
                "yes_or_no_try_to_reduce_food_waste",
                "Do you actively try to reduce food waste (e.g., meal planning, composting)?",
                true,
                &[
                    "Yes, consistently and effectively",
                    "Yes, sometimes or with some methods",
                    "Not actively, but I'm mindful",
                    "No, not a current focus",
                ],
            ),
        ],
    },
    QuizSection {
        title: "Purchases & Other",
        fields: &[
            text("pets_number_and_type", "Describe the pets you have.", false),
            choice(
                "where_investments_go",
                "Do you invest or store money in ethical/green funds or banks?",
                false,
                &[
                    "Yes, primarily or significantly",
                    "Yes, a small portion",
                    "No, but I'm considering it",
                    "No, not aware or not a priority",
                    "I don't have investments/significant savings",
                ],
            ),
            choice(
                "clothes_purchased_per_month",
                "How many new clothing items (incl. accessories) do you buy per month?",
                true,
                &[
                    "0-1 (Rarely buy new, focus on second-hand/repair)",
                    "1-2 items",
                    "3-5 items",
                    "More than 5 items",
                ],
            ),
            choice(
                "water_usage_per_day",
                "Describe your typical daily water usage (e.g., shower length).",
                true,
                &[
                    "Short showers (under 5 mins), water-saving habits",
                    "Average showers (5-10 mins)",
                    "Long showers (over 10 mins), and/or frequent baths",
                    "Very high water usage (e.g. multiple long showers/baths daily)",
                ],
            ),
        ],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn complete_answers() -> QuizAnswers {
        QUESTIONNAIRE
            .iter()
            .flat_map(|section| section.fields.iter())
            .filter(|field| field.required)
            .map(|field| {
                let value = field.options.first().copied().unwrap_or("One small car");
                (field.name, value)
            })
            .collect()
    }

    #[test]
    fn field_names_are_unique() {
        let mut names = HashSet::new();
        for field in QUESTIONNAIRE.iter().flat_map(|section| section.fields.iter()) {
            assert!(names.insert(field.name), "duplicate field {}", field.name);
        }
    }

    #[test]
    fn choice_fields_have_options() {
        for field in QUESTIONNAIRE.iter().flat_map(|section| section.fields.iter()) {
            match field.kind {
                FieldKind::Choice => assert!(!field.options.is_empty(), "{}", field.name),
                FieldKind::Text => assert!(field.options.is_empty(), "{}", field.name),
            }
        }
    }

    #[test]
    fn complete_answers_have_nothing_missing() {
        assert!(missing_required(&complete_answers()).is_empty());
    }

    #[test]
    fn blank_answers_count_as_missing() {
        let mut answers = complete_answers();
        answers.insert("diet_type", "   ");
        answers.insert("gender", "");

        assert_eq!(missing_required(&answers), ["What best describes your diet?"]);
    }

    #[test]
    fn empty_sheet_reports_every_required_label_in_order() {
        let missing = missing_required(&QuizAnswers::new());
        let required: Vec<&str> = QUESTIONNAIRE
            .iter()
            .flat_map(|section| section.fields.iter())
            .filter(|field| field.required)
            .map(|field| field.label)
            .collect();
        assert_eq!(missing, required);
        assert_eq!(missing.first(), Some(&"What is your approximate age range?"));
    }

    #[test]
    fn section_validation_is_local() {
        let Some(food) = QUESTIONNAIRE.iter().find(|section| section.title == "Food") else {
            panic!("food section exists");
        };
        let answers: QuizAnswers = [
            ("diet_type", "Vegan (no animal products)"),
            ("average_percent_of_meal_wasted", "Some (11-25%)"),
            ("yes_or_no_try_to_reduce_food_waste", "Yes, sometimes or with some methods"),
        ]
        .into_iter()
        .collect();
        assert!(food.missing(&answers).is_empty());
        assert!(!missing_required(&answers).is_empty());
    }

    #[test]
    fn answers_deserialize_from_plain_object() {
        let answers: QuizAnswers =
            serde_json::from_str(r#"{"diet_type": " Vegan (no animal products) "}"#)
                .expect("object of strings");
        assert_eq!(answers.answer("diet_type"), Some("Vegan (no animal products)"));
        assert_eq!(answers.len(), 1);
    }
}
