//! Onboarding wizard.
//!
//! Four linear steps collect the answers needed to compute a [`UserProfile`].
//! `next` validates the current step and saves it into a draft before moving on,
//! `previous` moves back without validating or discarding anything, and `finish`
//! is only accepted on the last step. There is no cancel.

use chrono::Utc;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::calc::{compute_bmr, compute_daily_calories, compute_macro_targets};
use crate::error::{FieldErrors, OnboardingError, ValidationError};
use crate::models::{ActivityLevel, CookingSkill, Goal, PreferredUnits, Sex, UserProfile};

pub const TOTAL_STEPS: usize = 4;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_NUMBER_MESSAGE: &str = "Please enter a valid number";
pub const CHOOSE_OPTION_MESSAGE: &str = "Please choose one of the options";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Exactly one of the options.
    Choice(&'static [&'static str]),
    /// Any subset of the options.
    MultiChoice(&'static [&'static str]),
    Number { min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const SEX_OPTIONS: &[&str] = &["male", "female"];
const GOAL_OPTIONS: &[&str] = &["lose", "maintain", "gain"];
const ACTIVITY_OPTIONS: &[&str] = &["sedentary", "light", "moderate", "active", "very_active"];
const RESTRICTION_OPTIONS: &[&str] = &[
    "vegetarian",
    "vegan",
    "gluten_free",
    "lactose_free",
    "keto",
    "halal",
    "kosher",
];
const ALLERGY_OPTIONS: &[&str] = &["nuts", "dairy", "eggs", "fish", "shellfish", "soy", "wheat"];
const SKILL_OPTIONS: &[&str] = &["beginner", "intermediate", "advanced"];
const EQUIPMENT_OPTIONS: &[&str] = &[
    "stove",
    "oven",
    "microwave",
    "blender",
    "multicooker",
    "grill",
];
const UNITS_OPTIONS: &[&str] = &["metric", "imperial"];

const STEP_BODY: &[FieldSpec] = &[
    FieldSpec {
        name: "sex",
        label: "Sex",
        kind: FieldKind::Choice(SEX_OPTIONS),
        required: true,
    },
    FieldSpec {
        name: "age",
        label: "Age (years)",
        kind: FieldKind::Number {
            min: 14.0,
            max: 100.0,
        },
        required: true,
    },
    FieldSpec {
        name: "height",
        label: "Height (cm)",
        kind: FieldKind::Number {
            min: 100.0,
            max: 250.0,
        },
        required: true,
    },
    FieldSpec {
        name: "weight",
        label: "Weight (kg)",
        kind: FieldKind::Number {
            min: 30.0,
            max: 300.0,
        },
        required: true,
    },
];

const STEP_LIFESTYLE: &[FieldSpec] = &[
    FieldSpec {
        name: "goal",
        label: "Goal",
        kind: FieldKind::Choice(GOAL_OPTIONS),
        required: true,
    },
    FieldSpec {
        name: "activity_level",
        label: "Activity level",
        kind: FieldKind::Choice(ACTIVITY_OPTIONS),
        required: true,
    },
];

const STEP_RESTRICTIONS: &[FieldSpec] = &[
    FieldSpec {
        name: "dietary_restrictions",
        label: "Dietary restrictions",
        kind: FieldKind::MultiChoice(RESTRICTION_OPTIONS),
        required: false,
    },
    FieldSpec {
        name: "allergies",
        label: "Allergies",
        kind: FieldKind::MultiChoice(ALLERGY_OPTIONS),
        required: false,
    },
];

const STEP_KITCHEN: &[FieldSpec] = &[
    FieldSpec {
        name: "cooking_skill",
        label: "Cooking skill",
        kind: FieldKind::Choice(SKILL_OPTIONS),
        required: true,
    },
    FieldSpec {
        name: "kitchen_equipment",
        label: "Kitchen equipment",
        kind: FieldKind::MultiChoice(EQUIPMENT_OPTIONS),
        required: false,
    },
    FieldSpec {
        name: "preferred_units",
        label: "Units",
        kind: FieldKind::Choice(UNITS_OPTIONS),
        required: true,
    },
];

/// Fields shown on a 1-based step. Out-of-range steps have none.
pub fn step_fields(step: usize) -> &'static [FieldSpec] {
    match step {
        1 => STEP_BODY,
        2 => STEP_LIFESTYLE,
        3 => STEP_RESTRICTIONS,
        4 => STEP_KITCHEN,
        _ => &[],
    }
}

/// A single answer as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    One(String),
    Many(Vec<String>),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::One(value) => f.write_str(value),
            Answer::Many(values) => f.write_str(&values.join(", ")),
        }
    }
}

/// Answers submitted for one step, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInput(BTreeMap<String, Answer>);

impl StepInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn one(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(field.into(), Answer::One(value.into()));
        self
    }

    pub fn many<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.0.insert(field.into(), Answer::Many(values));
        self
    }

    pub fn get(&self, field: &str) -> Option<&Answer> {
        self.0.get(field)
    }
}

fn validate_field(spec: &FieldSpec, answer: Option<&Answer>) -> Option<String> {
    match spec.kind {
        FieldKind::Number { min, max } => {
            let raw = match answer {
                Some(Answer::One(v)) if !v.trim().is_empty() => v.trim(),
                _ if spec.required => return Some(REQUIRED_MESSAGE.to_string()),
                _ => return None,
            };
            match raw.parse::<f64>() {
                Ok(v) if !v.is_finite() => Some(INVALID_NUMBER_MESSAGE.to_string()),
                Ok(v) if v < min => Some(format!("Minimum value: {}", min)),
                Ok(v) if v > max => Some(format!("Maximum value: {}", max)),
                Ok(_) => None,
                Err(_) => Some(INVALID_NUMBER_MESSAGE.to_string()),
            }
        }
        FieldKind::Choice(options) => match answer {
            Some(Answer::One(v)) if options.contains(&v.trim()) => None,
            Some(Answer::One(v)) if v.trim().is_empty() && !spec.required => None,
            None if !spec.required => None,
            _ => Some(CHOOSE_OPTION_MESSAGE.to_string()),
        },
        FieldKind::MultiChoice(options) => {
            let values: &[String] = match answer {
                Some(Answer::Many(values)) => values,
                Some(Answer::One(v)) => std::slice::from_ref(v),
                None => &[],
            };
            if values.is_empty() && spec.required {
                return Some(CHOOSE_OPTION_MESSAGE.to_string());
            }
            if values.iter().all(|v| options.contains(&v.as_str())) {
                None
            } else {
                Some(CHOOSE_OPTION_MESSAGE.to_string())
            }
        }
    }
}

/// Check `input` against the fields of a step.
pub fn validate_step(step: usize, input: &StepInput) -> Result<(), ValidationError> {
    let mut errors = FieldErrors::new();
    for spec in step_fields(step) {
        if let Some(message) = validate_field(spec, input.get(spec.name)) {
            errors.add(spec.name, message);
        }
    }
    errors.into_result()
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingWizard {
    step: usize,
    draft: BTreeMap<String, Answer>,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self {
            step: 1,
            draft: BTreeMap::new(),
        }
    }

    /// Current 1-based step.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        step_fields(self.step)
    }

    pub fn progress(&self) -> f64 {
        self.step as f64 / TOTAL_STEPS as f64 * 100.0
    }

    pub fn can_go_back(&self) -> bool {
        self.step > 1
    }

    pub fn is_last_step(&self) -> bool {
        self.step == TOTAL_STEPS
    }

    /// Saved answer for a field from any step.
    pub fn answer(&self, field: &str) -> Option<&Answer> {
        self.draft.get(field)
    }

    /// Validate and save the current step, then advance unless already on the
    /// last step. Returns the step now shown.
    pub fn next(&mut self, input: StepInput) -> Result<usize, ValidationError> {
        validate_step(self.step, &input)?;
        self.save(input);
        if self.step < TOTAL_STEPS {
            self.step += 1;
        }
        tracing::debug!("Onboarding moved to step {}", self.step);
        Ok(self.step)
    }

    pub fn previous(&mut self) -> usize {
        if self.step > 1 {
            self.step -= 1;
        }
        self.step
    }

    /// Validate the last step and build the profile from every saved answer.
    pub fn finish(&mut self, input: StepInput) -> Result<UserProfile, OnboardingError> {
        if !self.is_last_step() {
            return Err(OnboardingError::NotOnLastStep(self.step));
        }
        validate_step(self.step, &input)?;
        self.save(input);
        self.build_profile()
    }

    /// Replace this step's answers in the draft. A field left out of `input` is
    /// cleared, so multi-choice fields never accumulate across submissions.
    fn save(&mut self, input: StepInput) {
        let StepInput(mut answers) = input;
        for spec in step_fields(self.step) {
            match answers.remove(spec.name) {
                Some(answer) => {
                    self.draft.insert(spec.name.to_string(), answer);
                }
                None => {
                    self.draft.remove(spec.name);
                }
            }
        }
    }

    fn build_profile(&self) -> Result<UserProfile, OnboardingError> {
        let sex: Sex = self.parse("sex")?;
        let age = self.number("age")?;
        let height = self.number("height")?;
        let weight = self.number("weight")?;
        let activity_level = self
            .one("activity_level")
            .map(ActivityLevel::from_key)
            .unwrap_or(ActivityLevel::Sedentary);

        let bmr = compute_bmr(sex, age, height, weight);
        let daily_calories = compute_daily_calories(bmr, activity_level);
        let targets = compute_macro_targets(daily_calories);

        Ok(UserProfile {
            sex,
            age,
            height,
            weight,
            goal: self.parse::<Goal>("goal")?,
            activity_level,
            dietary_restrictions: self.many("dietary_restrictions"),
            allergies: self.many("allergies"),
            cooking_skill: self.parse::<CookingSkill>("cooking_skill")?,
            kitchen_equipment: self.many("kitchen_equipment"),
            preferred_units: self.parse::<PreferredUnits>("preferred_units")?,
            bmr,
            daily_calories,
            protein_target: targets.protein,
            carbs_target: targets.carbs,
            fats_target: targets.fats,
            calories_target: daily_calories,
            created_at: Utc::now(),
        })
    }

    fn one(&self, field: &str) -> Option<&str> {
        match self.draft.get(field) {
            Some(Answer::One(v)) => Some(v.trim()),
            _ => None,
        }
    }

    fn many(&self, field: &str) -> Vec<String> {
        match self.draft.get(field) {
            Some(Answer::Many(values)) => values.clone(),
            Some(Answer::One(v)) if !v.trim().is_empty() => vec![v.trim().to_string()],
            _ => Vec::new(),
        }
    }

    fn parse<T: FromStr<Err = String>>(&self, field: &'static str) -> Result<T, OnboardingError> {
        let raw = self
            .one(field)
            .ok_or(OnboardingError::MissingAnswer(field))?;
        raw.parse()
            .map_err(|_| OnboardingError::MissingAnswer(field))
    }

    fn number(&self, field: &'static str) -> Result<f64, OnboardingError> {
        self.one(field)
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or(OnboardingError::MissingAnswer(field))
    }
}
