use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vivadb_fetch::config::{DEFAULT_TIMEOUT_SECS, FetchOptions};
use vivadb_fetch::http::DEFAULT_ATTEMPTS;
use vivadb_fetch::{artifact_url, fetch};

/// vivadb-fetch - download the prebuilt vivadb binary for this machine
///
/// Linux and macOS builds are published; Windows is not supported yet.
///
/// Examples:
///   vivadb-fetch fetch              # Save ./vivadb next to this executable
///   vivadb-fetch fetch -d ~/bin     # Save ~/bin/vivadb
///   vivadb-fetch url                # Show what would be downloaded
#[derive(Parser, Debug)]
#[command(author, version = env!("VIVADB_FETCH_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory to save vivadb into (defaults to this executable's directory)
    #[arg(
        long = "dir",
        short = 'd',
        env = "VIVADB_INSTALL_DIR",
        value_name = "PATH",
        global = true
    )]
    pub install_dir: Option<PathBuf>,

    /// Download host (defaults to https://github.com)
    #[arg(
        long = "base-url",
        env = "VIVADB_RELEASE_URL",
        value_name = "URL",
        global = true
    )]
    pub base_url: Option<String>,

    /// Release tag to download (defaults to the release this build targets)
    #[arg(long = "release", value_name = "TAG", global = true)]
    pub release: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Download vivadb for this platform
    Fetch(FetchArgs),

    /// Print the download URL for this platform
    Url,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Give up on the download after this many seconds
    #[arg(
        long = "timeout",
        value_name = "SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Total attempts for transient network failures
    #[arg(long = "attempts", value_name = "N", default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Fail on HTTP error statuses instead of saving whatever body the server sent
    #[arg(long = "fail-on-http-error")]
    pub fail_on_http_error: bool,
}

impl Cli {
    fn options(&self) -> FetchOptions {
        FetchOptions {
            install_dir: self.install_dir.clone(),
            base_url: self.base_url.clone(),
            release: self.release.clone(),
            ..FetchOptions::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = vivadb_fetch::runtime::RealRuntime;
    let options = cli.options();

    match cli.command {
        Commands::Fetch(args) => {
            let options = FetchOptions {
                timeout_secs: args.timeout_secs,
                attempts: args.attempts,
                strict_status: args.fail_on_http_error,
                ..options
            };
            let outcome = fetch(runtime, options).await?;
            println!(
                "vivadb ({}) saved to {}",
                outcome.platform,
                outcome.path.display()
            );
        }
        Commands::Url => {
            println!("{}", artifact_url(&runtime, &options)?);
        }
    }
    Ok(())
}
