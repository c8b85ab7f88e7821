//! Error types.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::store::StoreKey;

/// Errors from the key/value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: StoreKey,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to parse stored '{key}': {source}")]
    Deserialize {
        key: StoreKey,
        #[source]
        source: serde_json::Error,
    },
    #[error("Storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: StoreKey },
}

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields: self })
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Input rejected before any state was touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid input: {fields}")]
pub struct ValidationError {
    pub fields: FieldErrors,
}

impl ValidationError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.add(field, message);
        Self { fields }
    }
}

/// Errors from the generic request helper.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to encode request body: {0}")]
    Body(#[source] serde_json::Error),
    #[error("Invalid header '{0}'")]
    Header(String),
}

/// Errors from the onboarding wizard.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OnboardingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Finish is only available on the last step (currently on step {0})")]
    NotOnLastStep(usize),
    #[error("No usable answer for '{0}'")]
    MissingAnswer(&'static str),
}

/// Failure inside an interaction handler.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("{0}")]
    Unexpected(String),
}

impl From<OnboardingError> for HandlerError {
    fn from(err: OnboardingError) -> Self {
        match err {
            OnboardingError::Validation(e) => HandlerError::Validation(e),
            other => HandlerError::Unexpected(other.to_string()),
        }
    }
}
