pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod platform;
pub mod release;
pub mod runtime;

pub use error::FetchError;
pub use fetch::{FetchOutcome, Fetcher, artifact_url, fetch};
pub use platform::Platform;
