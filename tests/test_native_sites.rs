use recipecore::{
    ScrapedRecipe, SegmentStyle, Summarizer, SummaryError, ALLRECIPES, FOOD_NETWORK,
    LOVE_AND_LEMONS,
};

const WPRM_PAGE: &str = r#"
    <!DOCTYPE html>
    <html><body>
        <h2 class="wprm-recipe-name">Lemon Pasta</h2>
        <div class="wprm-recipe-summary">Bright, quick and weeknight friendly.</div>
        <span class="wprm-recipe-servings-with-unit">4 servings</span>
        <div class="wprm-recipe-total-time-container"><span class="wprm-recipe-time">25 mins</span></div>
        <div class="wprm-recipe-cook-time-container"><span class="wprm-recipe-time">15-20 minutes</span></div>
        <ul>
            <li class="wprm-recipe-ingredient">8 oz spaghetti</li>
            <li class="wprm-recipe-ingredient">1 lemon</li>
        </ul>
        <ul>
            <li><div class="wprm-recipe-instruction-text">Boil the pasta.</div></li>
            <li><div class="wprm-recipe-instruction-text">Toss with lemon.</div></li>
        </ul>
    </body></html>
"#;

fn server_with_page(path: &str, body: &str) -> (mockito::ServerGuard, mockito::Mock) {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(body)
        .create();
    (server, mock)
}

#[test]
fn test_native_scraper_has_no_fallback_note() {
    let (server, mock) = server_with_page("/lemon-pasta", WPRM_PAGE);

    let summarizer = Summarizer::builder()
        .site("127.0.0.1", LOVE_AND_LEMONS)
        .build()
        .unwrap();
    let summary = summarizer.summarize(&format!("{}/lemon-pasta", server.url()));

    assert_eq!(
        summary.text(),
        "Lemon Pasta\n\n\
         Servings: 4 servings\n\
         Total: 25 min | Cook: 15-20 minutes\n\
         Notes: Bright, quick and weeknight friendly.\n\n\
         Ingredients:\n\
         • 8 oz spaghetti\n\
         • 1 lemon\n\n\
         Instructions:\n\
         1. Boil the pasta.\n\
         2. Toss with lemon.\n\n"
    );
    assert!(summary.segments.iter().all(|s| s.style != SegmentStyle::Note));
    mock.assert();
}

#[test]
fn test_schema_fills_fields_the_page_lacks() {
    let html = r#"
        <html><head>
        <script type="application/ld+json">
            {
                "@type": "Recipe",
                "name": "Schema Chili",
                "recipeYield": "6",
                "prepTime": "PT15M",
                "recipeIngredient": ["1 lb beef", "1 can beans"]
            }
        </script>
        </head><body>
            <h1 class="article-heading">World's Best Chili</h1>
        </body></html>
    "#;
    let (server, _mock) = server_with_page("/chili", html);

    let summarizer = Summarizer::builder()
        .site("127.0.0.1", ALLRECIPES)
        .build()
        .unwrap();
    let summary = summarizer.summarize(&format!("{}/chili", server.url()));
    let text = summary.text();

    assert_eq!(summary.title(), Some("World's Best Chili"));
    assert!(text.contains("Servings: 6 servings\n"));
    assert!(text.contains("Prep: 15 min\n"));
    assert!(text.contains("• 1 can beans\n\n"));
    assert!(text.contains("Instructions: (not extracted – see original site)\n"));
}

#[test]
fn test_unsupported_fields_are_skipped() {
    let html = r#"
        <html><head>
        <script type="application/ld+json">
            {"@type": "Recipe", "name": "Chili", "prepTime": "PT10M", "cookTime": "PT50M"}
        </script>
        </head><body><h1>Chili</h1></body></html>
    "#;
    let (server, _mock) = server_with_page("/chili", html);

    let summarizer = Summarizer::builder()
        .site("127.0.0.1", FOOD_NETWORK)
        .build()
        .unwrap();
    let summary = summarizer.summarize(&format!("{}/chili", server.url()));

    // prep and cook are not part of this scraper, only the total is
    assert!(summary.text().contains("Total: 60 min\n"));
    assert!(!summary.text().contains("Prep:"));
    assert!(!summary.text().contains("check original page"));
}

#[test]
fn test_page_without_recipe_is_parse_error() {
    let (server, _mock) = server_with_page("/about", "<html><body><p>About us</p></body></html>");

    let summarizer = Summarizer::builder()
        .site("127.0.0.1", LOVE_AND_LEMONS)
        .build()
        .unwrap();
    let url = format!("{}/about", server.url());

    let err = summarizer.extract(&url).unwrap_err();
    assert!(matches!(err, SummaryError::Parse(_)));

    let summary = summarizer.summarize(&url);
    assert!(summary.is_error());
    assert!(summary.text().starts_with("Parsing error: "));
    assert!(summary.text().ends_with("\nTry a different recipe site.\n"));
}

#[test]
fn test_extract_reports_native_strategy() {
    let (server, _mock) = server_with_page("/lemon-pasta", WPRM_PAGE);

    let summarizer = Summarizer::builder()
        .site("127.0.0.1", LOVE_AND_LEMONS)
        .build()
        .unwrap();
    let extraction = summarizer
        .extract(&format!("{}/lemon-pasta", server.url()))
        .unwrap();

    assert!(!extraction.used_fallback);
    assert_eq!(extraction.recipe.strategy(), "loveandlemons");
}
