//! Data Manager crate for Gaia
//! Loads the event feed and answers time-window queries over it

pub mod parser;
pub mod timeline;

#[cfg(feature = "wasm")]
pub mod fetcher;

pub use parser::parse_feed;
pub use timeline::Timeline;

#[cfg(feature = "wasm")]
pub use fetcher::DataFetcher;
