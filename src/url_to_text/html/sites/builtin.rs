//! Selector tables for the sites with a dedicated scraper.

use super::{SiteScraper, SiteSelectors};
use crate::model::Field;

const ALL_FIELDS: &[Field] = &Field::ALL;

/// allrecipes.com (Dotdash Meredith "mm-recipes" templates)
pub const ALLRECIPES: SiteScraper = SiteScraper {
    name: "allrecipes",
    fields: ALL_FIELDS,
    selectors: SiteSelectors {
        title: &["h1.article-heading", "h1"],
        yields: &[".mm-recipes-details__item:nth-child(4) .mm-recipes-details__value"],
        total_time: &[".mm-recipes-details__item:nth-child(3) .mm-recipes-details__value"],
        prep_time: &[".mm-recipes-details__item:nth-child(1) .mm-recipes-details__value"],
        cook_time: &[".mm-recipes-details__item:nth-child(2) .mm-recipes-details__value"],
        description: &["p.article-subheading"],
        ingredients: &[
            ".mm-recipes-structured-ingredients__list-item",
            ".ingredients-item-name",
        ],
        instructions: &[".mm-recipes-steps__content li > p", ".instructions-section-item p"],
    },
};

/// loveandlemons.com (WP Recipe Maker cards)
pub const LOVE_AND_LEMONS: SiteScraper = SiteScraper {
    name: "loveandlemons",
    fields: ALL_FIELDS,
    selectors: SiteSelectors {
        title: &[".wprm-recipe-name", "h1.entry-title"],
        yields: &[".wprm-recipe-servings-with-unit", ".wprm-recipe-servings"],
        total_time: &[".wprm-recipe-total-time-container .wprm-recipe-time"],
        prep_time: &[".wprm-recipe-prep-time-container .wprm-recipe-time"],
        cook_time: &[".wprm-recipe-cook-time-container .wprm-recipe-time"],
        description: &[".wprm-recipe-summary"],
        ingredients: &[".wprm-recipe-ingredient"],
        instructions: &[".wprm-recipe-instruction-text"],
    },
};

/// bbcgoodfood.com. The method list has no reliable description block, and
/// prep/cook live in a single "cook-and-prep-time" list.
pub const BBC_GOOD_FOOD: SiteScraper = SiteScraper {
    name: "bbcgoodfood",
    fields: &[
        Field::Title,
        Field::Yields,
        Field::TotalTime,
        Field::PrepTime,
        Field::CookTime,
        Field::Ingredients,
        Field::Instructions,
    ],
    selectors: SiteSelectors {
        title: &["h1.heading-1", "h1"],
        yields: &[".recipe-cook-and-prep-details__item .icon-with-text__children"],
        total_time: &[],
        prep_time: &[".recipe-cook-and-prep-details__item li:nth-child(1) time"],
        cook_time: &[".recipe-cook-and-prep-details__item li:nth-child(2) time"],
        description: &[],
        ingredients: &[".recipe__ingredients li", ".ingredients-list__item"],
        instructions: &[".recipe__method-steps li p", ".method-steps__list-item p"],
    },
};

/// foodnetwork.com. Only the total is printed on the page.
pub const FOOD_NETWORK: SiteScraper = SiteScraper {
    name: "foodnetwork",
    fields: &[
        Field::Title,
        Field::Yields,
        Field::TotalTime,
        Field::Description,
        Field::Ingredients,
        Field::Instructions,
    ],
    selectors: SiteSelectors {
        title: &[".o-AssetTitle__a-HeadlineText", "h1"],
        yields: &[".o-RecipeInfo__m-Yield .o-RecipeInfo__a-Description"],
        total_time: &[".o-RecipeInfo__m-Time .m-RecipeInfo__a-Description--Total"],
        prep_time: &[],
        cook_time: &[],
        description: &[".o-AssetDescription__a-Description"],
        ingredients: &[".o-Ingredients__a-Ingredient--CheckboxLabel"],
        instructions: &[".o-Method__m-Step"],
    },
};

/// Hosts (without `www.`) served by each built-in scraper
pub const BUILTIN_SITES: &[(&str, SiteScraper)] = &[
    ("allrecipes.com", ALLRECIPES),
    ("loveandlemons.com", LOVE_AND_LEMONS),
    ("bbcgoodfood.com", BBC_GOOD_FOOD),
    ("foodnetwork.com", FOOD_NETWORK),
    ("foodnetwork.co.uk", FOOD_NETWORK),
];
