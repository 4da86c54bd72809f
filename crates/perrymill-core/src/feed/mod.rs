mod fetcher;
mod html;
mod models;
mod normalizer;
mod parser;
mod raw;
mod service;

pub use fetcher::FeedFetcher;
pub use models::{FeedEntry, FeedResult};
pub use normalizer::normalize_entry;
pub use parser::{parse_feed, ParsedFeed};
pub use raw::RawEntry;
pub use service::{build_feed_result, FeedService, DEFAULT_FEED_URL, MAX_ITEMS};
