use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::networking::DEFAULT_API_BASE_URL;
use crate::status::poller::DEFAULT_POLL_INTERVAL;
use crate::ui::i18n::{Language, detect_system_language};

#[derive(Parser, Debug)]
#[command(
    name = "Cold Blood Launcher",
    author,
    version,
    about = "Launcher for the COLD BLOOD community server"
)]
pub struct Cli {
    /// Print launcher version and exit without starting the UI.
    #[arg(long)]
    pub version_only: bool,

    /// Base URL of the server status API.
    #[arg(long, env = "COLD_BLOOD_API_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Seconds between two server status refreshes.
    #[arg(
        long,
        env = "COLD_BLOOD_POLL_SECS",
        default_value_t = DEFAULT_POLL_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_secs: u64,

    /// Give up on a status request after this many seconds (no limit by default).
    #[arg(long, env = "COLD_BLOOD_REQUEST_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout_secs: Option<u64>,

    /// Verify the status API certificate instead of trusting it.
    #[arg(long)]
    pub strict_tls: bool,

    /// UI language; detected from the system locale when omitted.
    #[arg(long, value_enum)]
    pub language: Option<Language>,

    /// JSON news feed to show instead of the bundled one.
    #[arg(long, env = "COLD_BLOOD_NEWS_FILE")]
    pub news_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub api_base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub strict_tls: bool,
    pub language: Language,
    pub news_file: Option<PathBuf>,
}

impl From<Cli> for LauncherConfig {
    fn from(cli: Cli) -> Self {
        Self {
            api_base_url: cli.api_base_url,
            poll_interval: Duration::from_secs(cli.poll_interval_secs),
            request_timeout: cli.request_timeout_secs.map(Duration::from_secs),
            strict_tls: cli.strict_tls,
            language: cli.language.unwrap_or_else(detect_system_language),
            news_file: cli.news_file,
        }
    }
}
