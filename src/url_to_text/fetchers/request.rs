use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; RecipeCore/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Single-attempt blocking page fetcher
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>, user_agent: Option<&str>) -> Result<Self, reqwest::Error> {
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        Ok(Self { client })
    }

    /// Raw markup of `url`. Non-2xx responses are errors.
    pub fn get(&self, url: &str) -> Result<String, reqwest::Error> {
        debug!("Fetching {url}");
        let response = self.client.get(url).send()?.error_for_status()?;
        let html = response.text()?;
        debug!("Fetched {} bytes from {url}", html.len());
        Ok(html)
    }
}
