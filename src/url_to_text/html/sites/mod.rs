//! Native adapters: scrapers tailored to the markup of one recipe site.
//!
//! A site scraper reads each field through its own CSS selectors and falls
//! back to the page's schema.org data for fields its selectors miss. Sites
//! declare which fields they provide; the others report `Unsupported`.

use std::collections::HashMap;

use log::{debug, warn};
use scraper::Selector;
use url::Url;

use crate::error::{FieldError, SummaryError};
use crate::model::{Field, FieldResult, ScrapedRecipe, TimeValue};
use crate::text::{format_yields, normalize_string, parse_time_text};
use crate::url_to_text::fetchers::RequestFetcher;
use crate::url_to_text::html::extractors::{extract_schema, ParsingContext, SchemaRecipe};

mod builtin;

pub use builtin::{ALLRECIPES, BBC_GOOD_FOOD, FOOD_NETWORK, LOVE_AND_LEMONS};

/// CSS selectors per field, tried in order. The first selector that matches
/// any non-empty element wins.
#[derive(Debug, Clone, Copy)]
pub struct SiteSelectors {
    pub title: &'static [&'static str],
    pub yields: &'static [&'static str],
    pub total_time: &'static [&'static str],
    pub prep_time: &'static [&'static str],
    pub cook_time: &'static [&'static str],
    pub description: &'static [&'static str],
    pub ingredients: &'static [&'static str],
    pub instructions: &'static [&'static str],
}

impl SiteSelectors {
    fn for_field(&self, field: Field) -> &'static [&'static str] {
        match field {
            Field::Title => self.title,
            Field::Yields => self.yields,
            Field::TotalTime => self.total_time,
            Field::PrepTime => self.prep_time,
            Field::CookTime => self.cook_time,
            Field::Description => self.description,
            Field::Ingredients => self.ingredients,
            Field::Instructions => self.instructions,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SiteScraper {
    pub name: &'static str,
    pub fields: &'static [Field],
    pub selectors: SiteSelectors,
}

impl SiteScraper {
    pub fn supports(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    fn select_texts(&self, context: &ParsingContext, field: Field) -> Vec<String> {
        for selector_str in self.selectors.for_field(field) {
            let selector = match Selector::parse(selector_str) {
                Ok(selector) => selector,
                Err(e) => {
                    warn!("{}: bad selector {selector_str:?} for {field}: {e}", self.name);
                    continue;
                }
            };

            let texts: Vec<String> = context
                .document
                .select(&selector)
                .map(|el| normalize_string(&el.text().collect::<Vec<_>>().join(" ")))
                .filter(|text| !text.is_empty())
                .collect();

            if !texts.is_empty() {
                debug!("{}: found {field} using {selector_str:?}", self.name);
                return texts;
            }
        }
        Vec::new()
    }

    /// Run the selectors over a fetched page.
    pub fn scrape(&self, context: &ParsingContext) -> SiteRecipe {
        let found = self
            .fields
            .iter()
            .map(|&field| (field, self.select_texts(context, field)))
            .filter(|(_, texts)| !texts.is_empty())
            .collect();

        SiteRecipe {
            site: *self,
            found,
            schema: extract_schema(context).ok(),
        }
    }
}

/// Host -> site scraper table used by the native adapter
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    sites: HashMap<String, SiteScraper>,
}

/// Lower-cased host without a leading `www.`
pub fn site_key(host: &str) -> String {
    let host = host.to_ascii_lowercase();
    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}

impl SiteRegistry {
    pub fn empty() -> Self {
        Self {
            sites: HashMap::new(),
        }
    }

    pub fn register(&mut self, host: &str, scraper: SiteScraper) {
        self.sites.insert(site_key(host), scraper);
    }

    pub fn lookup(&self, host: &str) -> Option<&SiteScraper> {
        self.sites.get(&site_key(host))
    }

    /// Registered hosts, sorted
    pub fn hosts(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = self.sites.keys().map(String::as_str).collect();
        hosts.sort_unstable();
        hosts
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for (host, scraper) in builtin::BUILTIN_SITES {
            registry.register(host, *scraper);
        }
        registry
    }
}

/// Native adapter: scrape `url` with its site's dedicated scraper.
///
/// Returns `UnsupportedSite` when no scraper is registered for the host (or
/// the host can't be determined); every other failure is a `Parse` error.
pub fn scrape_native(
    url: &str,
    fetcher: &RequestFetcher,
    registry: &SiteRegistry,
) -> Result<SiteRecipe, SummaryError> {
    let host = Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(site_key))
        .ok_or_else(|| SummaryError::UnsupportedSite(url.to_string()))?;

    let site = registry
        .lookup(&host)
        .ok_or_else(|| SummaryError::UnsupportedSite(host.clone()))?;
    debug!("Using {} scraper for {host}", site.name);

    let html = fetcher
        .get(url)
        .map_err(|e| SummaryError::Parse(e.to_string()))?;
    let context = ParsingContext::new(url, &html);

    let recipe = site.scrape(&context);
    if !recipe.has_recipe_data() {
        return Err(SummaryError::Parse(format!(
            "no recipe found on {} page",
            site.name
        )));
    }
    Ok(recipe)
}

/// Recipe read by a site scraper
#[derive(Debug, Clone)]
pub struct SiteRecipe {
    site: SiteScraper,
    found: HashMap<Field, Vec<String>>,
    schema: Option<SchemaRecipe>,
}

impl SiteRecipe {
    pub fn site_name(&self) -> &'static str {
        self.site.name
    }

    fn has_recipe_data(&self) -> bool {
        let from_schema = |read: fn(&SchemaRecipe) -> bool| self.schema.as_ref().is_some_and(read);

        [Field::Title, Field::Ingredients, Field::Instructions]
            .iter()
            .any(|field| self.found.contains_key(field))
            || from_schema(|s| matches!(s.title(), Ok(Some(_))))
            || from_schema(|s| matches!(s.ingredients(), Ok(Some(_))))
            || from_schema(|s| matches!(s.instructions(), Ok(Some(_))))
    }

    /// Selector texts for `field`, `None` when the selectors found nothing
    fn texts(&self, field: Field) -> Result<Option<&Vec<String>>, FieldError> {
        if !self.site.supports(field) {
            return Err(FieldError::Unsupported(field));
        }
        Ok(self.found.get(&field))
    }

    fn read<T>(
        &self,
        field: Field,
        from_page: impl FnOnce(&[String]) -> Option<T>,
        from_schema: impl FnOnce(&SchemaRecipe) -> FieldResult<T>,
    ) -> FieldResult<T> {
        if let Some(value) = self.texts(field)?.and_then(|texts| from_page(texts.as_slice())) {
            return Ok(Some(value));
        }
        match &self.schema {
            Some(schema) => from_schema(schema),
            None => Ok(None),
        }
    }

    fn read_time(
        &self,
        field: Field,
        from_schema: fn(&SchemaRecipe) -> FieldResult<TimeValue>,
    ) -> FieldResult<TimeValue> {
        self.read(
            field,
            |texts| texts.first().and_then(|t| parse_time_text(t)),
            from_schema,
        )
    }
}

fn first(texts: &[String]) -> Option<String> {
    texts.first().cloned()
}

impl ScrapedRecipe for SiteRecipe {
    fn strategy(&self) -> &str {
        self.site.name
    }

    fn supports(&self, field: Field) -> bool {
        self.site.supports(field)
    }

    fn title(&self) -> FieldResult<String> {
        self.read(Field::Title, first, SchemaRecipe::title)
    }

    fn yields(&self) -> FieldResult<String> {
        self.read(
            Field::Yields,
            |texts| texts.first().map(|t| format_yields(t)),
            SchemaRecipe::yields,
        )
    }

    fn total_time(&self) -> FieldResult<TimeValue> {
        self.read_time(Field::TotalTime, SchemaRecipe::total_time)
    }

    fn prep_time(&self) -> FieldResult<TimeValue> {
        self.read_time(Field::PrepTime, SchemaRecipe::prep_time)
    }

    fn cook_time(&self) -> FieldResult<TimeValue> {
        self.read_time(Field::CookTime, SchemaRecipe::cook_time)
    }

    fn description(&self) -> FieldResult<String> {
        self.read(
            Field::Description,
            |texts| Some(texts.join(" ")),
            SchemaRecipe::description,
        )
    }

    fn ingredients(&self) -> FieldResult<Vec<String>> {
        self.read(
            Field::Ingredients,
            |texts| Some(texts.to_vec()),
            SchemaRecipe::ingredients,
        )
    }

    fn instructions(&self) -> FieldResult<String> {
        self.read(
            Field::Instructions,
            |texts| Some(texts.join("\n")),
            SchemaRecipe::instructions,
        )
    }
}
