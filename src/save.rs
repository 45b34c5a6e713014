//! Writing a summary to a text file named after its recipe.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SummaryError;
use crate::summary::FALLBACK_NOTE;

/// Shown in the output area while a summary is running
pub const LOADING_MESSAGE: &str = "Fetching and summarizing recipe...";

const MIN_SAVE_LEN: usize = 100;
const LOADING_MAX_LINES: usize = 5;
const FALLBACK_FILE_STEM: &str = "edited_recipe";
const DEFAULT_TITLE: &str = "Recipe";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M";

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("Invalid filename regex"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// File stem for a title: letters, digits, `_` and `-` only.
///
/// ```
/// assert_eq!(recipecore::sanitize_title("Mom's Apple Pie!"), "Moms_Apple_Pie");
/// assert_eq!(recipecore::sanitize_title("!!!"), "edited_recipe");
/// ```
pub fn sanitize_title(title: &str) -> String {
    let clean = UNSAFE_CHARS.replace_all(title, "");
    let clean = WHITESPACE.replace_all(&clean, "_");
    let clean = clean.trim_matches('_');
    if clean.is_empty() {
        FALLBACK_FILE_STEM.to_string()
    } else {
        clean.to_string()
    }
}

/// Where a summary titled `title` is saved in `dir`. An existing file is
/// never overwritten; the name gets a minute-resolution timestamp instead.
pub fn summary_path<Tz: TimeZone>(dir: &Path, title: &str, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let stem = sanitize_title(title);
    let path = dir.join(format!("{stem}.txt"));
    if !path.exists() {
        return path;
    }
    dir.join(format!("{stem}_{}.txt", now.format(TIMESTAMP_FORMAT)))
}

/// Title of a (possibly edited) summary: its first non-empty line, skipping
/// the fallback note.
pub fn summary_title(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && *line != FALLBACK_NOTE)
        .unwrap_or(DEFAULT_TITLE)
}

/// Saved file contents: a header naming the recipe and its source, then the
/// summary text as displayed.
pub fn render_file(title: &str, url: &str, text: &str) -> String {
    format!(
        "RecipeCore Summary – {title}\n{}\n\nSource URL: {url}\n\n{text}",
        "=".repeat(50)
    )
}

fn is_unsaved(text: &str) -> bool {
    text.chars().count() < MIN_SAVE_LEN
        || (text.contains(LOADING_MESSAGE) && text.lines().count() < LOADING_MAX_LINES)
}

/// Save `text` into `dir`, returning the path written.
pub fn save_summary(dir: &Path, url: &str, text: &str) -> Result<PathBuf, SummaryError> {
    let text = text.trim();
    if is_unsaved(text) {
        return Err(SummaryError::NothingToSave);
    }

    let title = summary_title(text);
    let path = summary_path(dir, title, &Local::now());
    fs::write(&path, render_file(title, url.trim(), text))?;
    info!("Saved summary to {}", path.display());
    Ok(path)
}
