use super::{Extractor, ParsingContext, SchemaRecipe, SchemaSource};
use log::debug;
use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};

use crate::text::normalize_string;

pub struct MicroDataExtractor;

/// Single-valued properties copied into the schema.org object as strings
const TEXT_PROPS: [&str; 6] = [
    "name",
    "description",
    "recipeYield",
    "prepTime",
    "cookTime",
    "totalTime",
];

impl MicroDataExtractor {
    fn find_recipe_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        // Look for elements with itemscope and itemtype containing "Recipe"
        let selector = Selector::parse("[itemscope]").ok()?;
        document.select(&selector).find(|element| {
            element.value().attr("itemtype").is_some_and(|itemtype| {
                itemtype.contains("schema.org/Recipe")
                    || itemtype.contains("data-vocabulary.org/Recipe")
            })
        })
    }

    /// Property elements that belong to `root` itself, not to a nested item
    /// such as the author `Person`.
    fn itemprop_elements<'a>(&self, root: ElementRef<'a>, prop: &str) -> Vec<ElementRef<'a>> {
        let Ok(selector) = Selector::parse(&format!("[itemprop='{prop}']")) else {
            return Vec::new();
        };
        root.select(&selector)
            .filter(|el| {
                !el.ancestors()
                    .take_while(|node| node.id() != root.id())
                    .any(|node| {
                        node.value()
                            .as_element()
                            .is_some_and(|e| e.attr("itemscope").is_some())
                    })
            })
            .collect()
    }

    /// Machine-readable values live in `content`/`datetime`, e.g.
    /// `<meta itemprop="prepTime" content="PT15M">`
    fn property_value(&self, el: ElementRef) -> String {
        let attr = el
            .value()
            .attr("content")
            .or_else(|| el.value().attr("datetime"));
        match attr {
            Some(value) => normalize_string(value),
            None => normalize_string(&el.text().collect::<Vec<_>>().join(" ")),
        }
    }

    fn get_itemprop(&self, root: ElementRef, prop: &str) -> Option<String> {
        self.itemprop_elements(root, prop)
            .into_iter()
            .map(|el| self.property_value(el))
            .find(|value| !value.is_empty())
    }

    fn get_itemprop_list(&self, root: ElementRef, prop: &str) -> Vec<String> {
        self.itemprop_elements(root, prop)
            .into_iter()
            .map(|el| self.property_value(el))
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl Extractor for MicroDataExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<SchemaRecipe, Box<dyn std::error::Error>> {
        debug!("Attempting to extract recipe using MicroData extractor");

        // We strictly enforce finding a Recipe container to avoid false positives.
        // Global searches for 'itemprop' (like "name" or "description") often pick up
        // unrelated page content (site title, author bio, ads, etc.) if not scoped
        // to a specific Schema.org Recipe item.
        let container = self
            .find_recipe_container(&context.document)
            .ok_or("No MicroData Recipe container found")?;

        let mut data = Map::new();
        data.insert("@type".to_string(), Value::from("Recipe"));

        for prop in TEXT_PROPS {
            if let Some(value) = self.get_itemprop(container, prop) {
                data.insert(prop.to_string(), Value::from(value));
            }
        }

        // Try 'recipeIngredient' and the older 'ingredients'
        let mut ingredients = self.get_itemprop_list(container, "recipeIngredient");
        if ingredients.is_empty() {
            ingredients = self.get_itemprop_list(container, "ingredients");
        }

        let mut instructions = self.get_itemprop_list(container, "recipeInstructions");
        if instructions.is_empty() {
            instructions = self.get_itemprop_list(container, "instructions");
        }

        if !data.contains_key("name") && ingredients.is_empty() && instructions.is_empty() {
            return Err("Could not extract recipe content".into());
        }

        if !ingredients.is_empty() {
            data.insert("recipeIngredient".to_string(), Value::from(ingredients));
        }
        if !instructions.is_empty() {
            data.insert("recipeInstructions".to_string(), Value::from(instructions));
        }

        debug!("MicroData recipe properties: {:?}", data.keys().collect::<Vec<_>>());
        Ok(SchemaRecipe::new(Value::Object(data), SchemaSource::MicroData))
    }
}
