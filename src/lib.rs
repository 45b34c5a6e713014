pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod pipelines;
pub mod save;
pub mod summary;
pub mod text;
pub mod url_to_text;

use log::error;

pub use builder::{Summarizer, SummarizerBuilder};
pub use config::{load_config, FetcherConfig, RecipeCoreConfig};
pub use error::{ComposeError, FieldError, SummaryError};
pub use model::{Field, FieldResult, RecipeSource, ScrapedRecipe, TimeValue};
pub use pipelines::{url::extract, Extraction};
pub use save::{
    render_file, sanitize_title, save_summary, summary_path, summary_title, LOADING_MESSAGE,
};
pub use summary::{
    compose, normalize, Listing, NormalizedFields, SegmentStyle, Summary, SummarySegment,
    FALLBACK_NOTE,
};
pub use url_to_text::fetchers::RequestFetcher;
pub use url_to_text::html::extractors::{SchemaRecipe, SchemaSource};
pub use url_to_text::html::sites::{
    SiteRecipe, SiteRegistry, SiteScraper, SiteSelectors, ALLRECIPES, BBC_GOOD_FOOD,
    FOOD_NETWORK, LOVE_AND_LEMONS,
};

/// Summarize the recipe at `input` with the default fetcher and built-in
/// site scrapers.
///
/// # Example
/// ```no_run
/// let summary = recipecore::summarize("www.loveandlemons.com/pesto/");
/// print!("{}", summary.text());
/// ```
pub fn summarize(input: &str) -> Summary {
    match Summarizer::builder().build() {
        Ok(summarizer) => summarizer.summarize(input),
        Err(e) => {
            error!("Could not create HTTP client: {e}");
            Summary::from_error(&e)
        }
    }
}
