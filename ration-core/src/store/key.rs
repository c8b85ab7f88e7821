//! Keys of the persisted state layout.

use std::fmt;

/// Every slice of state that is persisted, one value per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    UserProfile,
    OnboardingCompleted,
    Products,
    EatenMeals,
    DislikedMeals,
    UnplannedMeals,
    Theme,
}

impl StoreKey {
    pub const ALL: [StoreKey; 7] = [
        StoreKey::UserProfile,
        StoreKey::OnboardingCompleted,
        StoreKey::Products,
        StoreKey::EatenMeals,
        StoreKey::DislikedMeals,
        StoreKey::UnplannedMeals,
        StoreKey::Theme,
    ];

    /// The key name as it appears in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::UserProfile => "userProfile",
            StoreKey::OnboardingCompleted => "onboardingCompleted",
            StoreKey::Products => "products",
            StoreKey::EatenMeals => "eatenMeals",
            StoreKey::DislikedMeals => "dislikedMeals",
            StoreKey::UnplannedMeals => "unplannedMeals",
            StoreKey::Theme => "theme",
        }
    }

    /// Returns the filename used by file-backed stores.
    pub fn filename(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(StoreKey::UserProfile.as_str(), "userProfile");
        assert_eq!(StoreKey::DislikedMeals.as_str(), "dislikedMeals");
        assert_eq!(StoreKey::Theme.filename(), "theme.json");
    }

    #[test]
    fn test_key_names_are_unique() {
        let mut names: Vec<&str> = StoreKey::ALL.iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), StoreKey::ALL.len());
    }
}
