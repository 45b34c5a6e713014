use crate::error::SummaryError;
use crate::model::{RecipeSource, ScrapedRecipe};
use crate::url_to_text::fetchers::RequestFetcher;
use crate::url_to_text::html::extractors::{extract_schema, ParsingContext};
use crate::url_to_text::html::sites::{scrape_native, SiteRegistry};
use log::{debug, info};

use super::Extraction;

/// Extract recipe data from a URL
///
/// This pipeline:
/// 1. Tries the native scraper registered for the site
/// 2. On `UnsupportedSite` only, fetches the page with the RequestFetcher
/// 3. Reads the page with the generic schema.org extractors
///
/// # Arguments
/// * `source` - The page to read
/// * `fetcher` - Fetcher used for both tiers
/// * `sites` - Native scrapers by host
///
/// # Returns
/// * `Ok(Extraction)` - The recipe and whether the fallback was used
/// * `Err(SummaryError::Parse)` - The native scraper failed
/// * `Err(SummaryError::Fetch)` - The fallback could not load the page
/// * `Err(SummaryError::FallbackFailed)` - The page has no usable schema.org recipe
pub fn extract(
    source: &RecipeSource,
    fetcher: &RequestFetcher,
    sites: &SiteRegistry,
) -> Result<Extraction, SummaryError> {
    let url = source.url();

    match scrape_native(url, fetcher, sites) {
        Ok(recipe) => {
            debug!("Native scraper {} handled {url}", recipe.site_name());
            return Ok(Extraction {
                recipe: Box::new(recipe),
                used_fallback: false,
            });
        }
        Err(SummaryError::UnsupportedSite(host)) => {
            info!("No dedicated scraper for {host}, using schema.org fallback");
        }
        Err(e) => return Err(e),
    }

    let html = fetcher.get(url)?;
    let context = ParsingContext::new(url, &html);
    let recipe = extract_schema(&context).map_err(SummaryError::FallbackFailed)?;
    debug!("Fallback read {url} with {}", recipe.strategy());

    Ok(Extraction {
        recipe: Box::new(recipe),
        used_fallback: true,
    })
}
