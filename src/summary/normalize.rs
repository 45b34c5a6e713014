use log::{debug, warn};
use serde::Serialize;

use crate::model::{Field, FieldResult, ScrapedRecipe, TimeValue};

pub const TITLE_MISSING: &str = "Recipe (title not found)";
pub const SERVINGS_MISSING: &str = "N/A";
pub const DESCRIPTION_MISSING: &str = "No description available.";
pub const TIMES_MISSING: &str = "Times not available";
pub const TIMES_FALLBACK_HINT: &str = " (check original page)";
pub const INGREDIENTS_MISSING: &str = "(not found)";
pub const INSTRUCTIONS_MISSING: &str = "(not extracted – see original site)";

/// Longest description kept, ellipsis included
pub const DESCRIPTION_LIMIT: usize = 600;
const ELLIPSIS: &str = "...";

const TIME_FIELDS: [(Field, &str); 3] = [
    (Field::TotalTime, "Total"),
    (Field::PrepTime, "Prep"),
    (Field::CookTime, "Cook"),
];

/// A list section of the summary, or the marker shown in its place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Listing {
    Found(Vec<String>),
    Missing(&'static str),
}

/// Every summary field, with defaults filled in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedFields {
    pub title: String,
    pub servings: String,
    /// Time line, e.g. "Total: 45 min | Cook: varies"
    pub times: String,
    pub description: String,
    pub ingredients: Listing,
    /// Numbered steps, "1. ..."
    pub instructions: Listing,
}

/// Read one field, treating an unsupported field or an unreadable value as
/// absent.
fn resolve<T>(
    recipe: &dyn ScrapedRecipe,
    field: Field,
    read: impl FnOnce(&dyn ScrapedRecipe) -> FieldResult<T>,
) -> Option<T> {
    if !recipe.supports(field) {
        debug!("{} does not provide {field}", recipe.strategy());
        return None;
    }
    match read(recipe) {
        Ok(value) => value,
        Err(e) => {
            warn!("{}: {e}", recipe.strategy());
            None
        }
    }
}

fn resolve_text(
    recipe: &dyn ScrapedRecipe,
    field: Field,
    read: impl FnOnce(&dyn ScrapedRecipe) -> FieldResult<String>,
) -> Option<String> {
    resolve(recipe, field, read)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn truncate_description(description: String) -> String {
    if description.chars().count() <= DESCRIPTION_LIMIT {
        return description;
    }
    let keep = DESCRIPTION_LIMIT - ELLIPSIS.len();
    let mut truncated: String = description.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

fn format_time(label: &str, value: &TimeValue) -> Option<String> {
    match value {
        TimeValue::Minutes(minutes) => Some(format!("{label}: {} min", minutes.trunc() as i64)),
        TimeValue::Text(text) if text.trim().is_empty() => None,
        TimeValue::Text(text) => Some(format!("{label}: {}", text.trim())),
    }
}

fn read_time(recipe: &dyn ScrapedRecipe, field: Field) -> FieldResult<TimeValue> {
    match field {
        Field::TotalTime => recipe.total_time(),
        Field::PrepTime => recipe.prep_time(),
        _ => recipe.cook_time(),
    }
}

fn time_line(recipe: &dyn ScrapedRecipe, used_fallback: bool) -> String {
    let times: Vec<String> = TIME_FIELDS
        .iter()
        .filter_map(|&(field, label)| {
            resolve(recipe, field, |r| read_time(r, field))
                .and_then(|value| format_time(label, &value))
        })
        .collect();

    if !times.is_empty() {
        return times.join(" | ");
    }
    if used_fallback {
        format!("{TIMES_MISSING}{TIMES_FALLBACK_HINT}")
    } else {
        TIMES_MISSING.to_string()
    }
}

/// Fill every summary field from whatever the extraction provided.
///
/// Never fails: a field that is unsupported, empty or unreadable gets its
/// default and the others are still read.
pub fn normalize(recipe: &dyn ScrapedRecipe, used_fallback: bool) -> NormalizedFields {
    let title = resolve_text(recipe, Field::Title, |r| r.title())
        .unwrap_or_else(|| TITLE_MISSING.to_string());
    let servings = resolve_text(recipe, Field::Yields, |r| r.yields())
        .unwrap_or_else(|| SERVINGS_MISSING.to_string());
    let description = resolve_text(recipe, Field::Description, |r| r.description())
        .map(truncate_description)
        .unwrap_or_else(|| DESCRIPTION_MISSING.to_string());

    let ingredients: Vec<String> = resolve(recipe, Field::Ingredients, |r| r.ingredients())
        .unwrap_or_default()
        .iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();

    let steps: Vec<String> = resolve(recipe, Field::Instructions, |r| r.instructions())
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .enumerate()
        .map(|(i, step)| format!("{}. {step}", i + 1))
        .collect();

    NormalizedFields {
        title,
        servings,
        times: time_line(recipe, used_fallback),
        description,
        ingredients: if ingredients.is_empty() {
            Listing::Missing(INGREDIENTS_MISSING)
        } else {
            Listing::Found(ingredients)
        },
        instructions: if steps.is_empty() {
            Listing::Missing(INSTRUCTIONS_MISSING)
        } else {
            Listing::Found(steps)
        },
    }
}
