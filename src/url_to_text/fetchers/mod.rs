mod request;

pub use request::{RequestFetcher, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
