use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{FieldError, SummaryError};

/// Matches a leading `<scheme>://`
static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("Invalid scheme regex"));

const DEFAULT_SCHEME: &str = "https://";

/// The page a summary is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSource {
    url: String,
}

impl RecipeSource {
    /// Build a source from what the user typed, prefixing `https://` when no
    /// scheme is present.
    ///
    /// # Example
    /// ```
    /// use recipecore::RecipeSource;
    ///
    /// let source = RecipeSource::new("www.loveandlemons.com/pesto/").unwrap();
    /// assert_eq!(source.url(), "https://www.loveandlemons.com/pesto/");
    /// ```
    pub fn new(input: &str) -> Result<Self, SummaryError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SummaryError::EmptyUrl);
        }

        let url = if SCHEME_RE.is_match(input) {
            input.to_string()
        } else {
            format!("{DEFAULT_SCHEME}{input}")
        };

        Ok(Self { url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for RecipeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// The capabilities an extraction strategy can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Yields,
    TotalTime,
    PrepTime,
    CookTime,
    Description,
    Ingredients,
    Instructions,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Title,
        Field::Yields,
        Field::TotalTime,
        Field::PrepTime,
        Field::CookTime,
        Field::Description,
        Field::Ingredients,
        Field::Instructions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Yields => "yields",
            Field::TotalTime => "total_time",
            Field::PrepTime => "prep_time",
            Field::CookTime => "cook_time",
            Field::Description => "description",
            Field::Ingredients => "ingredients",
            Field::Instructions => "instructions",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipe duration as the page reports it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TimeValue {
    /// Parsed duration in minutes
    Minutes(f64),
    /// Anything that isn't a plain duration ("varies", "15-20 minutes", ...)
    Text(String),
}

pub type FieldResult<T> = Result<Option<T>, FieldError>;

/// Recipe data produced by one extraction strategy.
///
/// Each accessor distinguishes "no value on this page" (`Ok(None)`) from
/// "this strategy can't provide the field" (`Err(FieldError::Unsupported)`)
/// and "the value is there but unusable" (`Err(FieldError::Malformed)`).
/// Accessors a strategy doesn't override report `Unsupported`.
pub trait ScrapedRecipe {
    /// Short name of the strategy, used in logs
    fn strategy(&self) -> &str;

    /// Whether the strategy provides `field` at all
    fn supports(&self, field: Field) -> bool;

    fn title(&self) -> FieldResult<String> {
        Err(FieldError::Unsupported(Field::Title))
    }

    fn yields(&self) -> FieldResult<String> {
        Err(FieldError::Unsupported(Field::Yields))
    }

    fn total_time(&self) -> FieldResult<TimeValue> {
        Err(FieldError::Unsupported(Field::TotalTime))
    }

    fn prep_time(&self) -> FieldResult<TimeValue> {
        Err(FieldError::Unsupported(Field::PrepTime))
    }

    fn cook_time(&self) -> FieldResult<TimeValue> {
        Err(FieldError::Unsupported(Field::CookTime))
    }

    fn description(&self) -> FieldResult<String> {
        Err(FieldError::Unsupported(Field::Description))
    }

    fn ingredients(&self) -> FieldResult<Vec<String>> {
        Err(FieldError::Unsupported(Field::Ingredients))
    }

    /// Newline-delimited steps
    fn instructions(&self) -> FieldResult<String> {
        Err(FieldError::Unsupported(Field::Instructions))
    }
}
