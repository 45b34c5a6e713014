use std::time::Duration;

use log::{debug, error};

use crate::config::RecipeCoreConfig;
use crate::error::SummaryError;
use crate::model::RecipeSource;
use crate::pipelines::{url::extract, Extraction};
use crate::summary::{compose, normalize, SegmentStyle, Summary, SummarySegment};
use crate::url_to_text::fetchers::RequestFetcher;
use crate::url_to_text::html::sites::{SiteRegistry, SiteScraper};

/// Builder for configuring a [`Summarizer`]
#[derive(Debug, Default)]
pub struct SummarizerBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    sites: Vec<(String, SiteScraper)>,
    without_builtin_sites: bool,
}

impl SummarizerBuilder {
    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipecore::Summarizer;
    /// use std::time::Duration;
    ///
    /// let builder = Summarizer::builder().timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the User-Agent header sent with page requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Register a native scraper for a host, replacing any built-in one
    ///
    /// # Example
    /// ```
    /// use recipecore::{Summarizer, LOVE_AND_LEMONS};
    ///
    /// let builder = Summarizer::builder().site("lemons.example.com", LOVE_AND_LEMONS);
    /// ```
    pub fn site(mut self, host: impl Into<String>, scraper: SiteScraper) -> Self {
        self.sites.push((host.into(), scraper));
        self
    }

    /// Start from an empty site registry instead of the built-in scrapers
    pub fn without_builtin_sites(mut self) -> Self {
        self.without_builtin_sites = true;
        self
    }

    /// Take timeout and User-Agent from loaded configuration. Values set
    /// directly on the builder still win.
    pub fn config(mut self, config: &RecipeCoreConfig) -> Self {
        self.timeout.get_or_insert(config.fetcher.timeout());
        self.user_agent
            .get_or_insert_with(|| config.fetcher.user_agent.clone());
        self
    }

    /// Build the summarizer
    ///
    /// # Errors
    /// Returns `SummaryError::Fetch` if the HTTP client cannot be created.
    pub fn build(self) -> Result<Summarizer, SummaryError> {
        let fetcher = RequestFetcher::new(self.timeout, self.user_agent.as_deref())?;

        let mut sites = if self.without_builtin_sites {
            SiteRegistry::empty()
        } else {
            SiteRegistry::default()
        };
        for (host, scraper) in self.sites {
            sites.register(&host, scraper);
        }

        Ok(Summarizer { fetcher, sites })
    }
}

/// Turns recipe URLs into styled summaries
pub struct Summarizer {
    fetcher: RequestFetcher,
    sites: SiteRegistry,
}

impl Summarizer {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipecore::Summarizer;
    ///
    /// let summarizer = Summarizer::builder().build().unwrap();
    /// ```
    pub fn builder() -> SummarizerBuilder {
        SummarizerBuilder::default()
    }

    /// Extract recipe data from what the user typed, without laying it out
    pub fn extract(&self, input: &str) -> Result<Extraction, SummaryError> {
        let source = RecipeSource::new(input)?;
        extract(&source, &self.fetcher, &self.sites)
    }

    /// Summarize the recipe at `input`
    ///
    /// Never fails: a run that cannot produce a recipe returns a summary
    /// holding a single error segment.
    ///
    /// # Example
    /// ```
    /// use recipecore::Summarizer;
    ///
    /// let summary = Summarizer::builder().build().unwrap().summarize("   ");
    /// assert_eq!(summary.text(), "Please enter a recipe URL.\n");
    /// ```
    pub fn summarize(&self, input: &str) -> Summary {
        match self.extract(input) {
            Ok(extraction) => {
                debug!("Summarizing {extraction:?}");
                let fields = normalize(extraction.recipe.as_ref(), extraction.used_fallback);
                Summary::new(compose(&fields, extraction.used_fallback))
            }
            Err(e) => {
                error!("Could not summarize {input:?}: {e}");
                Summary::from_error(&e)
            }
        }
    }

    /// Placeholder shown before the first summary
    pub fn welcome(&self) -> Summary {
        let sites: String = self
            .sites
            .hosts()
            .into_iter()
            .map(|host| format!("• {host}\n"))
            .collect();

        Summary::new(vec![
            SummarySegment::new(
                "Paste a cooking recipe URL above and click the button.\n\n",
                SegmentStyle::Body,
            ),
            SummarySegment::new(
                format!(
                    "Compatible with many recipe blogs such as, but not limited to:\n{sites}\n"
                ),
                SegmentStyle::Note,
            ),
            SummarySegment::new(
                "Recipes provided without the extra unneeded details!\n\n",
                SegmentStyle::Body,
            ),
        ])
    }

    /// The native scrapers this summarizer knows
    pub fn sites(&self) -> &SiteRegistry {
        &self.sites
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetcherConfig;

    #[test]
    fn test_empty_input_never_fetches() {
        let summarizer = Summarizer::builder().build().unwrap();
        let summary = summarizer.summarize("");

        assert!(summary.is_error());
        assert_eq!(summary.text(), "Please enter a recipe URL.\n");
    }

    #[test]
    fn test_welcome_lists_builtin_sites() {
        let welcome = Summarizer::builder().build().unwrap().welcome();
        let note = &welcome.segments[1];

        assert_eq!(note.style, SegmentStyle::Note);
        assert!(note.text.contains("• allrecipes.com\n"));
        assert!(note.text.contains("• loveandlemons.com\n"));
        assert!(note.text.contains("• bbcgoodfood.com\n"));
        assert!(note.text.contains("• foodnetwork.com\n"));
        assert!(!welcome.is_error());
    }

    #[test]
    fn test_custom_sites() {
        let summarizer = Summarizer::builder()
            .without_builtin_sites()
            .site("www.Lemons.Example.com", crate::LOVE_AND_LEMONS)
            .build()
            .unwrap();

        assert_eq!(summarizer.sites().hosts(), vec!["lemons.example.com"]);
    }

    #[test]
    fn test_builder_values_win_over_config() {
        let config = RecipeCoreConfig {
            fetcher: FetcherConfig {
                timeout: 3,
                user_agent: "FromConfig/1.0".to_string(),
            },
        };
        let builder = Summarizer::builder()
            .user_agent("FromBuilder/1.0")
            .config(&config);

        assert_eq!(builder.timeout, Some(Duration::from_secs(3)));
        assert_eq!(builder.user_agent.as_deref(), Some("FromBuilder/1.0"));
    }
}
