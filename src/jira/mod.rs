pub mod client;
pub mod fetcher;
pub mod page;

pub use client::JiraClient;
pub use fetcher::{Credentials, Fetcher, HttpFetcher};
pub use page::PageProgress;
