pub mod url;

use crate::model::ScrapedRecipe;

/// Recipe data read from one page, by whichever strategy succeeded.
pub struct Extraction {
    pub recipe: Box<dyn ScrapedRecipe>,
    /// Whether the generic schema.org fallback produced the data
    pub used_fallback: bool,
}

impl std::fmt::Debug for Extraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extraction")
            .field("strategy", &self.recipe.strategy())
            .field("used_fallback", &self.used_fallback)
            .finish()
    }
}
