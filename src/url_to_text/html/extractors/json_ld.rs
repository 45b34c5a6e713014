use super::{Extractor, ParsingContext, SchemaRecipe, SchemaSource};
use log::debug;
use scraper::Selector;
use serde_json::Value;

pub struct JsonLdExtractor;

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(type_str)) => type_str.eq_ignore_ascii_case("recipe"),
        // e.g. "@type": ["Recipe", "NewsArticle"]
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

fn find_recipe(json_ld: &Value) -> Option<&Value> {
    if let Some(items) = json_ld.as_array() {
        debug!("JsonLdExtractor: JSON-LD is an array");
        return items
            .iter()
            .find(|item| is_recipe_type(item) || item.get("recipeInstructions").is_some())
            .or_else(|| items.iter().find_map(find_recipe));
    }

    if is_recipe_type(json_ld) {
        debug!("JsonLdExtractor: Found Recipe type in root");
        return Some(json_ld);
    }

    if let Some(graph) = json_ld.get("@graph").and_then(Value::as_array) {
        debug!("JsonLdExtractor: Found @graph");
        return graph.iter().find(|item| is_recipe_type(item));
    }

    // Some sites wrap the recipe, e.g. {"mainEntity": {"@type": "Recipe", ...}}
    json_ld.get("mainEntity").filter(|entity| is_recipe_type(entity))
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<SchemaRecipe, Box<dyn std::error::Error>> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);

        let selector = Selector::parse("script[type='application/ld+json']")
            .map_err(|e| e.to_string())?;
        let scripts: Vec<_> = context.document.select(&selector).collect();
        debug!(
            "JsonLdExtractor: Found {} JSON-LD script tags",
            scripts.len()
        );

        // Try each script element until we find a valid recipe
        for (index, script) in scripts.iter().enumerate() {
            let raw_json = script.inner_html();
            let parsed = serde_json::from_str::<Value>(&raw_json)
                .or_else(|_| serde_json::from_str::<Value>(&sanitize_json(&raw_json)));

            match parsed {
                Ok(json_ld) => {
                    if let Some(recipe) = find_recipe(&json_ld) {
                        debug!("JsonLdExtractor: Script {} holds a recipe", index);
                        return Ok(SchemaRecipe::new(recipe.clone(), SchemaSource::JsonLd));
                    }
                    debug!("JsonLdExtractor: No recipe found in script {}", index);
                }
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {}: {}", index, e);
                }
            }
        }

        Err("No valid recipe found in any JSON-LD script".into())
    }
}

/// Repair the hand-written JSON some sites ship: missing commas between
/// members, trailing commas and raw line breaks.
fn sanitize_json(json_str: &str) -> String {
    let mut minified = String::with_capacity(json_str.len());
    let mut in_string = false;
    let mut prev_char = None;
    let mut depth = 0;
    let chars: Vec<char> = json_str.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '"' if prev_char != Some('\\') => {
                in_string = !in_string;
                if !in_string {
                    // We're ending a string - check if we need a comma
                    let rest_chars = chars.get(i + 1..).unwrap_or(&[]);
                    let next_char = rest_chars.iter().find(|c| !c.is_whitespace());
                    if !matches!(prev_char, Some(',') | Some('[') | Some('{'))
                        && matches!(next_char, Some('"' | '[' | '{'))
                    {
                        minified.push('"');
                        minified.push(',');
                        prev_char = Some(',');
                        continue;
                    }
                }
                minified.push(c);
            }
            '[' | '{' if !in_string => {
                depth += 1;
                minified.push(c);
            }
            ']' | '}' if !in_string => {
                depth -= 1;
                minified.push(c);
                if let Some(rest_chars) = chars.get(i + 1..) {
                    let next_char = rest_chars.iter().find(|&&c| !c.is_whitespace());
                    if depth > 0 && matches!(next_char, Some(&'"')) {
                        minified.push(',');
                        prev_char = Some(',');
                        continue;
                    }
                }
            }
            ',' if !in_string => {
                if prev_char != Some(',') {
                    minified.push(c);
                }
            }
            '\n' | '\r' | '\t' if in_string => minified.push(' '),
            _ => {
                if in_string || !c.is_whitespace() {
                    minified.push(c);
                }
            }
        }
        prev_char = Some(c);
    }

    minified
        .replace(",]", "]")
        .replace(",}", "}")
        .replace(",,", ",")
}
