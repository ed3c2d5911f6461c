//! CLI entrypoint for the `wikilinks` binary.
//!
//! With no subcommand this launches the interactive TUI. The `lookup`
//! and `route` subcommands run a single request and print the plain
//! result, which keeps the client scriptable and the remote contract
//! easy to poke at from a shell.

use anyhow::bail;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;
use wikilinks_core::PathClient;
use wikilinks_core::RouteOutcome;
use wikilinks_core::SearchError;
use wikilinks_core::ServiceConfig;
use wikilinks_core::Strategy;
use wikilinks_core::config::DEFAULT_SERVICE_URL;

#[derive(Debug, Parser)]
#[command(name = "wikilinks", about = "Find a link path between two Wikipedia articles")]
struct Cli {
    /// Base URL of the lookup service.
    #[arg(long, value_name = "URL", default_value = DEFAULT_SERVICE_URL)]
    search_url: String,

    /// Base URL of the traversal service.
    #[arg(long, value_name = "URL", default_value = DEFAULT_SERVICE_URL)]
    route_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print article names matching the query as a substring.
    Lookup {
        query: String,
    },
    /// Print the path between two articles, one name per line.
    Route {
        start: String,
        end: String,
        #[arg(long, value_enum, default_value = "bfs")]
        strategy: StrategyArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Bfs,
    Dfs,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Bfs => Strategy::BreadthFirst,
            StrategyArg::Dfs => Strategy::DepthFirst,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = ServiceConfig::new(cli.search_url, cli.route_url);

    match cli.command {
        None => wikilinks_tui::run_tui(config).await,
        Some(Command::Lookup { query }) => run_lookup(config, &query).await,
        Some(Command::Route {
            start,
            end,
            strategy,
        }) => run_route(config, strategy.into(), &start, &end).await,
    }
}

async fn run_lookup(config: ServiceConfig, query: &str) -> anyhow::Result<()> {
    let client = PathClient::new(config);
    let names = client.lookup(query).await?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}

async fn run_route(
    config: ServiceConfig,
    strategy: Strategy,
    start: &str,
    end: &str,
) -> anyhow::Result<()> {
    let client = PathClient::new(config);
    match client.find_path(strategy, start, end).await? {
        RouteOutcome::Path(names) => {
            for name in names {
                println!("{name}");
            }
            Ok(())
        }
        RouteOutcome::EndpointNotFound => bail_with(SearchError::EndpointNotFound),
        RouteOutcome::NoPath => bail_with(SearchError::NoPath),
        RouteOutcome::Unknown => bail_with(SearchError::Unknown),
    }
}

fn bail_with(error: SearchError) -> anyhow::Result<()> {
    match error.message() {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
