pub mod admit;
pub mod config;
pub mod query;
mod time;

pub use time::parse_timestamp;
