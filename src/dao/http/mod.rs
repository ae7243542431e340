mod client;
mod config;
mod error;

pub use client::HttpScoreboardApi;
pub use config::HttpApiConfig;
pub use error::{HttpApiError, HttpApiResult};
