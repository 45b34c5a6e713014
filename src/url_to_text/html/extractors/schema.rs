use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::FieldError;
use crate::model::{Field, FieldResult, ScrapedRecipe, TimeValue};
use crate::text::{
    format_number, format_yields, html_to_lines, normalize_string, parse_time_text,
};

/// Where on the page the schema.org data was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSource {
    JsonLd,
    MicroData,
}

/// A schema.org `Recipe` object. Fields are interpreted on access so that one
/// odd property doesn't spoil the rest of the recipe.
#[derive(Debug, Clone)]
pub struct SchemaRecipe {
    data: Value,
    source: SchemaSource,
}

#[derive(Debug, Deserialize)]
struct TextObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NameType {
    String(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DescriptionType {
    String(String),
    Object(TextObject),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    String(String),
    Number(f64),
    Array(Vec<YieldItem>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YieldItem {
    String(String),
    Number(f64),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Single(String),
    Strings(Vec<String>),
    Objects(Vec<IngredientObject>),
}

#[derive(Debug, Deserialize)]
struct IngredientObject {
    name: String,
    amount: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DurationValue {
    String(String),
    Number(f64),
}

impl SchemaRecipe {
    pub fn new(data: Value, source: SchemaSource) -> Self {
        Self { data, source }
    }

    pub fn source(&self) -> SchemaSource {
        self.source
    }

    fn property(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|v| !v.is_null())
    }

    fn read<T: DeserializeOwned>(&self, field: Field, key: &str) -> FieldResult<T> {
        let Some(value) = self.property(key) else {
            return Ok(None);
        };
        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| FieldError::Malformed {
                field,
                reason: format!("unexpected {key} value ({e})"),
            })
    }

    fn read_time(&self, field: Field, key: &str) -> FieldResult<TimeValue> {
        Ok(match self.read::<DurationValue>(field, key)? {
            Some(DurationValue::String(s)) => parse_time_text(&s),
            Some(DurationValue::Number(n)) => Some(TimeValue::Minutes(n)),
            None => None,
        })
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn collect_steps(value: &Value, steps: &mut Vec<String>) {
    match value {
        Value::String(s) => steps.extend(html_to_lines(s)),
        Value::Array(items) => {
            for item in items {
                collect_steps(item, steps);
            }
        }
        Value::Object(obj) => {
            // HowToSection holds its steps in itemListElement; HowToStep prefers text over name
            if let Some(items) = obj.get("itemListElement") {
                collect_steps(items, steps);
            } else if let Some(text) = obj.get("text").or_else(|| obj.get("name")) {
                collect_steps(text, steps);
            }
        }
        _ => {}
    }
}

impl ScrapedRecipe for SchemaRecipe {
    fn strategy(&self) -> &str {
        match self.source {
            SchemaSource::JsonLd => "schema.org json-ld",
            SchemaSource::MicroData => "schema.org microdata",
        }
    }

    fn supports(&self, _field: Field) -> bool {
        true
    }

    fn title(&self) -> FieldResult<String> {
        Ok(match self.read::<NameType>(Field::Title, "name")? {
            Some(NameType::String(s)) => non_empty(normalize_string(&s)),
            Some(NameType::Multiple(names)) => names
                .iter()
                .map(|s| normalize_string(s))
                .find(|s| !s.is_empty()),
            None => None,
        })
    }

    fn yields(&self) -> FieldResult<String> {
        let yields = match self.read::<RecipeYield>(Field::Yields, "recipeYield")? {
            Some(RecipeYield::String(s)) => normalize_string(&s),
            Some(RecipeYield::Number(n)) => format_number(n),
            Some(RecipeYield::Array(items)) => {
                let items: Vec<String> = items
                    .into_iter()
                    .map(|item| match item {
                        YieldItem::String(s) => normalize_string(&s),
                        YieldItem::Number(n) => format_number(n),
                    })
                    .collect();
                // For arrays, prefer the descriptive version (e.g., "15 Stück") over just the number
                items
                    .iter()
                    .find(|s| s.contains(char::is_alphabetic))
                    .or_else(|| items.iter().find(|s| !s.is_empty()))
                    .cloned()
                    .unwrap_or_default()
            }
            None => return Ok(None),
        };
        Ok(non_empty(yields).map(|y| format_yields(&y)))
    }

    fn total_time(&self) -> FieldResult<TimeValue> {
        if let Some(total) = self.read_time(Field::TotalTime, "totalTime")? {
            return Ok(Some(total));
        }

        // Derive the total from whichever parts the page gives
        let prep = self.read_time(Field::TotalTime, "prepTime")?;
        let cook = self.read_time(Field::TotalTime, "cookTime")?;
        Ok(match (prep, cook) {
            (Some(TimeValue::Minutes(p)), Some(TimeValue::Minutes(c))) => {
                Some(TimeValue::Minutes(p + c))
            }
            (Some(TimeValue::Minutes(m)), None) | (None, Some(TimeValue::Minutes(m))) => {
                Some(TimeValue::Minutes(m))
            }
            _ => None,
        })
    }

    fn prep_time(&self) -> FieldResult<TimeValue> {
        self.read_time(Field::PrepTime, "prepTime")
    }

    fn cook_time(&self) -> FieldResult<TimeValue> {
        self.read_time(Field::CookTime, "cookTime")
    }

    fn description(&self) -> FieldResult<String> {
        let raw = match self.read::<DescriptionType>(Field::Description, "description")? {
            Some(DescriptionType::String(s)) => s,
            Some(DescriptionType::Object(obj)) => obj.text,
            Some(DescriptionType::Multiple(parts)) => parts.join(" "),
            None => return Ok(None),
        };
        Ok(non_empty(html_to_lines(&raw).join(" ")))
    }

    fn ingredients(&self) -> FieldResult<Vec<String>> {
        let ingredients: Vec<String> =
            match self.read::<RecipeIngredients>(Field::Ingredients, "recipeIngredient")? {
                Some(RecipeIngredients::Single(s)) => vec![normalize_string(&s)],
                Some(RecipeIngredients::Strings(items)) => {
                    items.iter().map(|s| normalize_string(s)).collect()
                }
                Some(RecipeIngredients::Objects(items)) => items
                    .into_iter()
                    .map(|ing| {
                        let amount = normalize_string(ing.amount.as_deref().unwrap_or(""));
                        let name = normalize_string(&ing.name);
                        if amount.is_empty() {
                            name
                        } else {
                            format!("{amount} {name}")
                        }
                    })
                    .collect(),
                None => return Ok(None),
            };

        let ingredients: Vec<String> = ingredients.into_iter().filter(|i| !i.is_empty()).collect();
        Ok(if ingredients.is_empty() {
            None
        } else {
            Some(ingredients)
        })
    }

    fn instructions(&self) -> FieldResult<String> {
        let Some(value) = self.property("recipeInstructions") else {
            return Ok(None);
        };
        if !matches!(value, Value::String(_) | Value::Array(_) | Value::Object(_)) {
            return Err(FieldError::Malformed {
                field: Field::Instructions,
                reason: format!("unexpected recipeInstructions value {value}"),
            });
        }

        let mut steps = Vec::new();
        collect_steps(value, &mut steps);
        Ok(non_empty(steps.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recipe(data: Value) -> SchemaRecipe {
        SchemaRecipe::new(data, SchemaSource::JsonLd)
    }

    #[test]
    fn test_reads_plain_fields() {
        let r = recipe(json!({
            "@type": "Recipe",
            "name": "Chocolate Chip Cookies",
            "description": "Delicious &amp; homemade",
            "recipeYield": "24 cookies",
            "recipeIngredient": ["flour ", " sugar", ""],
            "recipeInstructions": "Mix ingredients.\nBake at 350F for 10 minutes.",
            "prepTime": "PT15M",
            "cookTime": "PT10M",
            "totalTime": "PT25M"
        }));

        assert_eq!(r.title(), Ok(Some("Chocolate Chip Cookies".to_string())));
        assert_eq!(r.description(), Ok(Some("Delicious & homemade".to_string())));
        assert_eq!(r.yields(), Ok(Some("24 cookies".to_string())));
        assert_eq!(
            r.ingredients(),
            Ok(Some(vec!["flour".to_string(), "sugar".to_string()]))
        );
        assert_eq!(
            r.instructions(),
            Ok(Some(
                "Mix ingredients.\nBake at 350F for 10 minutes.".to_string()
            ))
        );
        assert_eq!(r.prep_time(), Ok(Some(TimeValue::Minutes(15.0))));
        assert_eq!(r.cook_time(), Ok(Some(TimeValue::Minutes(10.0))));
        assert_eq!(r.total_time(), Ok(Some(TimeValue::Minutes(25.0))));
    }

    #[test]
    fn test_numeric_yields() {
        assert_eq!(
            recipe(json!({"recipeYield": 4})).yields(),
            Ok(Some("4 servings".to_string()))
        );
        assert_eq!(
            recipe(json!({"recipeYield": "1"})).yields(),
            Ok(Some("1 serving".to_string()))
        );
        assert_eq!(
            recipe(json!({"recipeYield": ["15", "15 Stück"]})).yields(),
            Ok(Some("15 Stück".to_string()))
        );
        assert_eq!(recipe(json!({"recipeYield": ""})).yields(), Ok(None));
    }

    #[test]
    fn test_malformed_yields_is_reported() {
        let r = recipe(json!({"recipeYield": {"value": 4}}));
        assert!(matches!(
            r.yields(),
            Err(FieldError::Malformed {
                field: Field::Yields,
                ..
            })
        ));
        // other fields are unaffected
        assert_eq!(r.title(), Ok(None));
    }

    #[test]
    fn test_total_time_from_parts() {
        let r = recipe(json!({"prepTime": "PT10M", "cookTime": "PT1H"}));
        assert_eq!(r.total_time(), Ok(Some(TimeValue::Minutes(70.0))));

        let r = recipe(json!({"prepTime": "PT10M"}));
        assert_eq!(r.total_time(), Ok(Some(TimeValue::Minutes(10.0))));

        let r = recipe(json!({"cookTime": "PT45M"}));
        assert_eq!(r.total_time(), Ok(Some(TimeValue::Minutes(45.0))));

        // an opaque part can't be added up
        let r = recipe(json!({"prepTime": "PT10M", "cookTime": "PT15-20M"}));
        assert_eq!(r.total_time(), Ok(None));

        let r = recipe(json!({}));
        assert_eq!(r.total_time(), Ok(None));
    }

    #[test]
    fn test_opaque_times_stay_text() {
        let r = recipe(json!({"cookTime": "PT15-20M"}));
        assert_eq!(
            r.cook_time(),
            Ok(Some(TimeValue::Text("PT15-20M".to_string())))
        );
    }

    #[test]
    fn test_how_to_sections() {
        let r = recipe(json!({
            "recipeInstructions": [
                {
                    "@type": "HowToSection",
                    "name": "Dough",
                    "itemListElement": [
                        {"@type": "HowToStep", "text": "Mix flour and water."},
                        {"@type": "HowToStep", "name": "Knead for 5 minutes."}
                    ]
                },
                {"@type": "HowToStep", "text": "<p>Bake.</p>"}
            ]
        }));
        assert_eq!(
            r.instructions(),
            Ok(Some(
                "Mix flour and water.\nKnead for 5 minutes.\nBake.".to_string()
            ))
        );
    }

    #[test]
    fn test_ingredient_objects() {
        let r = recipe(json!({
            "recipeIngredient": [
                {"name": "eggs", "amount": "2"},
                {"name": "salt"}
            ]
        }));
        assert_eq!(
            r.ingredients(),
            Ok(Some(vec!["2 eggs".to_string(), "salt".to_string()]))
        );
    }

    #[test]
    fn test_numeric_instructions_are_malformed() {
        let r = recipe(json!({"recipeInstructions": 3}));
        assert!(r.instructions().is_err());
    }
}
