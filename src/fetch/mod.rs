//! Downloading the vivadb artifact for the host platform.

use anyhow::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::{
    config::{Config, FetchOptions, release_source},
    error::FetchError,
    http::HttpClient,
    platform::{Platform, detect_platform},
    release::{ARTIFACT_NAME, ReleaseSource},
    runtime::Runtime,
};

/// Permissions given to the downloaded binary on Unix.
const EXECUTABLE_MODE: u32 = 0o755;

/// Result of a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub platform: Platform,
    pub url: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Downloads the vivadb artifact into the configured directory.
#[tracing::instrument(skip(runtime))]
pub async fn fetch<R: Runtime>(runtime: R, options: FetchOptions) -> Result<FetchOutcome> {
    let config = Config::new(runtime, options)?;
    let fetcher = Fetcher::from_config(config);
    Ok(fetcher.fetch_binary().await?)
}

/// Artifact URL for this host without downloading anything.
#[tracing::instrument(skip(runtime))]
pub fn artifact_url<R: Runtime>(runtime: &R, options: &FetchOptions) -> Result<String> {
    let platform = detect_platform(runtime)?;
    Ok(release_source(options).artifact_url(platform))
}

pub struct Fetcher<R: Runtime> {
    runtime: R,
    http: HttpClient,
    source: ReleaseSource,
    install_dir: PathBuf,
}

impl<R: Runtime> Fetcher<R> {
    pub fn new(runtime: R, http: HttpClient, source: ReleaseSource, install_dir: PathBuf) -> Self {
        Self {
            runtime,
            http,
            source,
            install_dir,
        }
    }

    pub fn from_config(config: Config<R>) -> Self {
        Self::new(config.runtime, config.http, config.source, config.install_dir)
    }

    /// Where the artifact ends up.
    pub fn target_path(&self) -> PathBuf {
        self.install_dir.join(ARTIFACT_NAME)
    }

    /// Detects the host platform, then downloads its artifact.
    /// Unsupported hosts fail before any request is sent.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_binary(&self) -> Result<FetchOutcome, FetchError> {
        let platform = detect_platform(&self.runtime)?;
        self.fetch_for(platform).await
    }

    /// Downloads the artifact built for `platform` and replaces the target file.
    ///
    /// The target is only touched once a non-empty body has been received, and
    /// the replacement goes through a rename, so the file is either the previous
    /// artifact or the complete new one.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_for(&self, platform: Platform) -> Result<FetchOutcome, FetchError> {
        let url = self.source.artifact_url(platform);
        info!(
            "Downloading {} {} for {} from {}...",
            self.source.project, self.source.version, platform, url
        );

        let body = self.http.get_bytes(&url).await.map_err(FetchError::Network)?;
        if body.is_empty() {
            return Err(FetchError::EmptyArtifact(url));
        }

        let path = self.target_path();
        self.persist(&path, &body).map_err(FetchError::Io)?;
        info!("Saved {} bytes to {:?}", body.len(), path);

        Ok(FetchOutcome {
            platform,
            url,
            path,
            bytes: body.len(),
        })
    }

    fn persist(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if !self.runtime.exists(&self.install_dir) {
            debug!("Creating install directory {:?}", self.install_dir);
            self.runtime.create_dir_all(&self.install_dir)?;
        }

        let staging = path.with_file_name(format!("{}.part", ARTIFACT_NAME));
        debug!("Staging download at {:?}", staging);

        let result = self
            .runtime
            .write(&staging, contents)
            .and_then(|_| self.runtime.set_permissions(&staging, EXECUTABLE_MODE))
            .and_then(|_| self.runtime.rename(&staging, path));

        if result.is_err() && self.runtime.exists(&staging) {
            if let Err(e) = self.runtime.remove_file(&staging) {
                warn!("Failed to clean up staging file {:?}: {}", staging, e);
            }
        }
        result
    }
}
