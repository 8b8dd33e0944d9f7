//! Failure taxonomy of a fetch.

/// Errors surfaced by [`crate::fetch::Fetcher`].
#[derive(Debug)]
pub enum FetchError {
    /// The host operating system has no published build (currently Windows).
    UnsupportedPlatform(String),
    /// The server answered with a zero-length body.
    EmptyArtifact(String),
    /// Connection, DNS, timeout, or a non-success HTTP status in strict mode.
    Network(anyhow::Error),
    /// The downloaded artifact could not be persisted.
    Io(anyhow::Error),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::UnsupportedPlatform(os) => {
                write!(
                    f,
                    "It is not possible, for now, to use vivadb on {}. We hope to release a version with support for it soon!",
                    os
                )
            }
            FetchError::EmptyArtifact(url) => {
                write!(
                    f,
                    "Unable to download vivadb at this time ({} returned no content), please retry later",
                    url
                )
            }
            FetchError::Network(e) => write!(f, "Network error: {}", e),
            FetchError::Io(e) => write!(f, "Failed to save vivadb: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            // Display already carries the outermost message of `e`
            FetchError::Network(e) | FetchError::Io(e) => std::error::Error::source(&**e),
            _ => None,
        }
    }
}
