use anyhow::Context as _;
use clap::Parser;
use showcase_server::{telemetry, LogFormat, ServerConfig};
use std::path::PathBuf;

/// Feature showcase HTTP server
#[derive(Debug, Parser)]
#[command(name = "showcase-server", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8080
    #[arg(long)]
    bind: Option<String>,

    /// Prefix for every route
    #[arg(long)]
    prefix: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Disable simulated latencies
    #[arg(long)]
    fast: bool,

    /// Deadline for the timeout demo, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl Cli {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(bind) = self.bind {
            config = config.with_bind(bind);
        }
        if let Some(prefix) = self.prefix {
            config = config.with_prefix(prefix);
        }
        if let Some(format) = self.log_format {
            config = config.with_log_format(format);
        }
        if self.fast {
            config = config.with_fast_latency();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_timeout_ms(timeout_ms);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::load_or_default(cli.config.as_deref())
        .context("loading configuration")?;
    let config = cli.apply(config);

    telemetry::init(config.log_format)?;
    tracing::info!(
        version = showcase_server::VERSION,
        bind = %config.bind,
        "showcase server starting"
    );

    showcase_server::serve(config).await?;
    Ok(())
}
