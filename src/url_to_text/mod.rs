//! Turning a URL into recipe data: fetching pages and reading them with the
//! native site scrapers or the generic schema.org extractors.

pub mod fetchers;
pub mod html;
