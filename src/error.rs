use thiserror::Error;

use crate::model::Field;

/// Errors that can occur while summarizing a recipe page
#[derive(Error, Debug)]
pub enum SummaryError {
    /// Nothing was typed into the URL box
    #[error("Please enter a recipe URL.")]
    EmptyUrl,

    /// The native adapter has no scraper for this host. Triggers the fallback.
    #[error("No dedicated scraper for site: {0}")]
    UnsupportedSite(String),

    /// Failed to load the page during fallback
    #[error("Could not load page: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The native adapter failed for a reason other than site support
    #[error("Parsing error: {0}")]
    Parse(String),

    /// The generic schema.org adapter could not extract a recipe
    #[error("Fallback failed: {0}")]
    FallbackFailed(String),

    /// Formatting an extracted recipe broke off part way
    #[error("Unexpected parsing issue: {0}")]
    Compose(#[from] ComposeError),

    /// Save was requested before any summary was produced
    #[error("Run a summary first.")]
    NothingToSave,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Failed writing a saved summary
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SummaryError {
    /// Follow-up line shown to the user under the error message
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SummaryError::Fetch(_) => Some("Try another URL."),
            SummaryError::Parse(_) => Some("Try a different recipe site."),
            SummaryError::Compose(_) => Some("Partial data shown above."),
            _ => None,
        }
    }
}

/// Failure reading a single field from an extraction strategy
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("{0} is not provided by this scraper")]
    Unsupported(Field),

    #[error("{field} could not be read: {reason}")]
    Malformed { field: Field, reason: String },
}

/// A normalized field that cannot be laid out as a summary line
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposeError {
    #[error("{part} spans several lines")]
    LineBreak { part: String },

    #[error("{part} is blank")]
    Blank { part: String },
}
