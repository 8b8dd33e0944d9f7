//! Location of the published vivadb release artifacts.

use crate::platform::Platform;

/// Release whose artifacts this build downloads.
pub const RELEASE_VERSION: &str = "0.1.0-beta";

/// Host serving the release downloads.
pub const DEFAULT_BASE_URL: &str = "https://github.com";

pub const OWNER: &str = "AstraBert";
pub const PROJECT: &str = "vivadb";

/// File name of the downloaded artifact on disk.
pub const ARTIFACT_NAME: &str = PROJECT;

/// A release on a GitHub-style download host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSource {
    pub base_url: String,
    pub owner: String,
    pub project: String,
    pub version: String,
}

impl Default for ReleaseSource {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            owner: OWNER.to_string(),
            project: PROJECT.to_string(),
            version: RELEASE_VERSION.to_string(),
        }
    }
}

impl ReleaseSource {
    /// Replaces the download host, e.g. for a mirror.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces the release tag.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// `<base>/<owner>/<project>/releases/download/<version>/<project>-<platform>`
    pub fn artifact_url(&self, platform: Platform) -> String {
        format!(
            "{}/{}/{}/releases/download/{}/{}-{}",
            self.base_url.trim_end_matches('/'),
            self.owner,
            self.project,
            self.version,
            self.project,
            platform.id()
        )
    }
}
