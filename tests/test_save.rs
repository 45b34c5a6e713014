use std::fs;
use std::path::PathBuf;

use recipecore::{save_summary, summary_title, Summarizer, SummaryError};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("recipecore-it-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_save_fallback_summary() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/pie")
        .with_status(200)
        .with_body(
            r#"<script type="application/ld+json">{"@type": "Recipe", "name": "Mom's Apple Pie!"}</script>"#,
        )
        .create();

    let url = format!("{}/pie", server.url());
    let summary = Summarizer::builder()
        .without_builtin_sites()
        .build()
        .unwrap()
        .summarize(&url);
    let text = summary.text();

    // the fallback note is not the title
    assert_eq!(summary_title(&text), "Mom's Apple Pie!");

    let dir = temp_dir("fallback");
    let first = save_summary(&dir, &url, &text).unwrap();
    assert_eq!(first, dir.join("Moms_Apple_Pie.txt"));

    let saved = fs::read_to_string(&first).unwrap();
    let header = format!(
        "RecipeCore Summary – Mom's Apple Pie!\n{}\n\nSource URL: {url}\n\n",
        "=".repeat(50)
    );
    assert!(saved.starts_with(&header));
    assert!(saved.contains("Times not available (check original page)"));

    let second = save_summary(&dir, &url, &text).unwrap();
    let name = second.file_name().unwrap().to_str().unwrap().to_string();
    let pattern = regex::Regex::new(r"^Moms_Apple_Pie_\d{4}-\d{2}-\d{2}_\d{4}\.txt$").unwrap();
    assert!(pattern.is_match(&name), "{name}");
    assert!(first.exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_error_summary_is_not_saved() {
    let summary = Summarizer::builder().build().unwrap().summarize("");
    let dir = temp_dir("error");

    let err = save_summary(&dir, "", &summary.text()).unwrap_err();
    assert!(matches!(err, SummaryError::NothingToSave));

    fs::remove_dir_all(&dir).unwrap();
}
