use std::env;
use std::path::Path;
use std::process::ExitCode;

use log::debug;
use recipecore::{save_summary, RecipeCoreConfig, Summarizer, SummaryError};

const USAGE: &str = "Usage: recipecore <url> [save-dir]";

fn run() -> Result<bool, SummaryError> {
    let args: Vec<String> = env::args().skip(1).collect();

    let config = RecipeCoreConfig::load()?;
    debug!("{config:?}");
    let summarizer = Summarizer::builder().config(&config).build()?;

    let Some(url) = args.first() else {
        print!("{}", summarizer.welcome().text());
        println!("{USAGE}");
        return Ok(true);
    };

    let summary = summarizer.summarize(url);
    if summary.is_error() {
        eprint!("{}", summary.text());
        return Ok(false);
    }
    print!("{}", summary.text());

    if let Some(dir) = args.get(1) {
        let path = save_summary(Path::new(dir), url, &summary.text())?;
        println!("\nSaved as: {}", path.display());
    }

    Ok(true)
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            if let Some(hint) = e.hint() {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}
