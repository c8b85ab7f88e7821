use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(format!("Invalid sex '{}'. Valid options: male, female", s)),
        }
    }
}

/// Physical activity level used to scale BMR into a daily calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    /// Lenient lookup: anything unrecognised counts as sedentary.
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or(ActivityLevel::Sedentary)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == key)
            .ok_or_else(|| {
                format!(
                    "Invalid activity level '{}'. Valid options: sedentary, light, moderate, active, very_active",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose" => Ok(Goal::Lose),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            _ => Err(format!(
                "Invalid goal '{}'. Valid options: lose, maintain, gain",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookingSkill {
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for CookingSkill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(CookingSkill::Beginner),
            "intermediate" => Ok(CookingSkill::Intermediate),
            "advanced" => Ok(CookingSkill::Advanced),
            _ => Err(format!(
                "Invalid cooking skill '{}'. Valid options: beginner, intermediate, advanced",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredUnits {
    Metric,
    Imperial,
}

impl FromStr for PreferredUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Ok(PreferredUnits::Metric),
            "imperial" => Ok(PreferredUnits::Imperial),
            _ => Err(format!(
                "Invalid units '{}'. Valid options: metric, imperial",
                s
            )),
        }
    }
}

/// The user's onboarding answers together with the targets computed from them.
///
/// Written once when the onboarding wizard finishes and replaced only by running
/// it again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub sex: Sex,
    pub age: f64,
    pub height: f64,
    pub weight: f64,
    pub goal: Goal,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub cooking_skill: CookingSkill,
    #[serde(default)]
    pub kitchen_equipment: Vec<String>,
    pub preferred_units: PreferredUnits,
    pub bmr: f64,
    pub daily_calories: i64,
    pub protein_target: i64,
    pub carbs_target: i64,
    pub fats_target: i64,
    pub calories_target: i64,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profile")?;
        writeln!(f, "=======")?;
        writeln!(
            f,
            "{}, {} years, {} cm, {} kg",
            self.sex, self.age, self.height, self.weight
        )?;
        writeln!(f, "Activity: {}", self.activity_level)?;
        writeln!(f, "BMR: {} kcal", self.bmr)?;
        writeln!(f, "Daily calories: {} kcal", self.daily_calories)?;
        writeln!(
            f,
            "Targets: protein {} g, carbs {} g, fats {} g",
            self.protein_target, self.carbs_target, self.fats_target
        )?;
        write!(f, "Created: {}", self.created_at.format("%Y-%m-%d %H:%M"))
    }
}
