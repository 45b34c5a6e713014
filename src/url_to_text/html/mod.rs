pub mod extractors;
pub mod sites;
