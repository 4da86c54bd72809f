pub mod ai;
pub mod config;
pub mod error;
pub mod feed;

pub use config::{AppConfig, FeedCategory};
pub use error::{Error, Result};
