use anyhow::Context as _;
use clap::{CommandFactory, Parser, Subcommand};
use proxysix::config::DEFAULT_CONFIG_PATH;
use proxysix::logging::{context_factory, tracing_factory};
use proxysix::{
    Client, Config, ConsoleLogger, Context, HttpClient, ListProxyParams, LogField, Logger, Proxy,
    ProxyState, TracingLogger,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "proxycli", about = "CLI for querying proxy6 service", version)]
struct Cli {
    /// Path to config file (JSON, or TOML with a .toml extension)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enables debug information
    #[arg(long)]
    debug: bool,

    /// Emit logs through tracing instead of plain console lines
    #[arg(long)]
    structured: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List proxies on the account
    List {
        /// Filters by descr param
        #[arg(long, default_value = "")]
        desc: String,

        /// Filters by state: active, expired, expiring or all
        #[arg(long, default_value = "active")]
        state: String,

        /// Show passwords instead of ***
        #[arg(long)]
        reveal: bool,

        /// Print proxy URLs instead of JSON records
        #[arg(long)]
        url: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::load(&cli.config).context("loading config")?;

    let (logger, logger_fn) = if cli.structured {
        let default_filter = if cli.debug {
            "proxysix=debug"
        } else {
            "proxysix=info"
        };
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        (Arc::new(TracingLogger) as Arc<dyn Logger>, tracing_factory())
    } else {
        (
            Arc::new(ConsoleLogger::stderr(cli.debug)) as Arc<dyn Logger>,
            context_factory(),
        )
    };

    let ctx = Context::new().with_logger(logger.clone());

    match command {
        Command::List {
            desc,
            state,
            reveal,
            url,
        } => {
            if !desc.is_empty() {
                logger.debug("using description filter", &[LogField::new("descr", &desc)]);
            }

            let client = HttpClient::builder(config.key.expose().as_str())
                .logger_fn(logger_fn)
                .build()
                .context("making new http client")?;

            if !state.is_empty() {
                logger.debug("using state", &[LogField::new("state", &state)]);
            }
            let state = ProxyState::from_filter(&state).context("parsing proxy state")?;

            let proxies = client
                .list_proxies(&ctx, &ListProxyParams { descr: desc, state })
                .await
                .context("getting proxies")?;

            for mut proxy in proxies {
                match render(&mut proxy, reveal, url)? {
                    Some(line) => println!("{line}"),
                    None => logger.error(
                        "proxy has no url scheme",
                        &[LogField::new("id", &proxy.id)],
                    ),
                }
            }
        }
    }

    Ok(())
}

/// Output line for one proxy: its URL when `as_url` is set, otherwise a JSON
/// record. `None` means the proxy type has no URL scheme.
fn render(proxy: &mut Proxy, reveal: bool, as_url: bool) -> anyhow::Result<Option<String>> {
    if reveal {
        proxy.reveal_password();
    }

    if as_url {
        return Ok(proxy.proxy_url());
    }
    Ok(Some(serde_json::to_string(proxy)?))
}
