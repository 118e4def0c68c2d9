use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

const CRATE_TARGET: &str = "mfv";

/// Transport crates that get chatty at debug level while a calculation waits
/// on the providers.
const QUIET_TARGETS: [&str; 3] = ["hyper_util", "reqwest", "wiremock"];

/// Per-target levels: the crate at debug when `verbose`, HTTP plumbing capped
/// at warn, everything else off.
fn target_filter(verbose: bool) -> Targets {
    let crate_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };

    QUIET_TARGETS
        .iter()
        .fold(Targets::new(), |targets, target| {
            targets.with_target(*target, LevelFilter::WARN.min(crate_level))
        })
        .with_target(CRATE_TARGET, crate_level)
}

/// `RUST_LOG` wins when it parses; otherwise the crate filter stands alone.
fn env_filter(directives: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "off" };
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Installs the global subscriber on stderr so stdout stays clean for tables
/// and `--json` output.
pub fn init_logging(verbose: bool) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(target_filter(verbose))
        .with(env_filter(rust_log.as_deref(), verbose))
        .try_init()
        .context("Failed to install the tracing subscriber")
}
