use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, redirect};
use std::path::PathBuf;
use std::time::Duration;

use crate::{
    http::{DEFAULT_ATTEMPTS, HttpClient},
    release::ReleaseSource,
    runtime::Runtime,
};

pub const USER_AGENT: &str = concat!("vivadb-fetch/", env!("CARGO_PKG_VERSION"));

/// Whole-request timeout unless overridden.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

const CONNECT_TIMEOUT_SECS: u64 = 30;
const MAX_REDIRECTS: usize = 10;

/// User-facing knobs, usually filled from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Directory receiving the artifact; defaults to the executable's directory.
    pub install_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub release: Option<String>,
    /// Whole-request timeout; 0 disables it.
    pub timeout_secs: u64,
    pub attempts: usize,
    /// Treat non-success HTTP statuses as failures instead of saving the body.
    pub strict_status: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            install_dir: None,
            base_url: None,
            release: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            attempts: DEFAULT_ATTEMPTS,
            strict_status: false,
        }
    }
}

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub http: HttpClient,
    pub source: ReleaseSource,
    pub install_dir: PathBuf,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, options: FetchOptions) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS));
        if options.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(options.timeout_secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        let http = HttpClient::new(client)
            .with_attempts(options.attempts)
            .with_strict_status(options.strict_status);
        let source = release_source(&options);

        let install_dir = match options.install_dir {
            Some(dir) => dir,
            None => default_install_dir(&runtime)?,
        };
        debug!("Install directory: {:?}", install_dir);

        Ok(Self {
            runtime,
            http,
            source,
            install_dir,
        })
    }
}

/// Release location after applying the overrides in `options`.
pub fn release_source(options: &FetchOptions) -> ReleaseSource {
    let mut source = ReleaseSource::default();
    if let Some(base_url) = &options.base_url {
        source = source.with_base_url(base_url.as_str());
    }
    if let Some(release) = &options.release {
        source = source.with_version(release.as_str());
    }
    source
}

/// Directory containing the running executable.
pub fn default_install_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let exe = runtime.current_exe()?;
    exe.parent()
        .map(|dir| dir.to_path_buf())
        .with_context(|| format!("Executable path {:?} has no parent directory", exe))
}
