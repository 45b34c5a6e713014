use log::debug;
use scraper::Html;

mod json_ld;
mod microdata;
mod schema;

pub use json_ld::JsonLdExtractor;
pub use microdata::MicroDataExtractor;
pub use schema::{SchemaRecipe, SchemaSource};

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Result<SchemaRecipe, Box<dyn std::error::Error>>;
}

/// Generic schema.org adapter: JSON-LD first, then microdata.
pub fn extract_schema(context: &ParsingContext) -> Result<SchemaRecipe, String> {
    let extractors: Vec<(&str, Box<dyn Extractor>)> = vec![
        ("json_ld", Box::new(JsonLdExtractor)),
        ("microdata", Box::new(MicroDataExtractor)),
    ];

    let mut failures = Vec::new();
    for (name, extractor) in extractors {
        match extractor.parse(context) {
            Ok(recipe) => {
                debug!("{name} extractor found a recipe on {}", context.url);
                return Ok(recipe);
            }
            Err(e) => {
                debug!("{name} extractor failed on {}: {e}", context.url);
                failures.push(e.to_string());
            }
        }
    }

    Err(failures.join("; "))
}
