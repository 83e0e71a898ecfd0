//! frontier CLI - estimate the largest allocated id behind a listing API.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use frontier_lib::SearchConfig;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod progress;

use display::Format;

#[derive(Parser)]
#[command(name = "frontier")]
#[command(about = "Estimate the largest allocated id behind a listing API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Search bounds shared by every command that runs an estimation.
#[derive(Args, Clone, Copy)]
struct SearchArgs {
    /// First power of two probed while bracketing
    #[arg(long, default_value_t = SearchConfig::default().min_power())]
    min_power: u32,

    /// Bracketing gives up once 2^(max-power - 1) is still non-empty
    #[arg(long, default_value_t = SearchConfig::default().max_power())]
    max_power: u32,

    /// Smallest power of two tested during refinement
    #[arg(long, default_value_t = SearchConfig::default().floor_power())]
    floor_power: u32,
}

impl SearchArgs {
    fn config(self) -> Result<SearchConfig> {
        Ok(SearchConfig::new(
            self.min_power,
            self.max_power,
            self.floor_power,
        )?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the frontier of one or more endpoints
    Estimate {
        /// Endpoint identifiers (e.g., github-users). Defaults to github-users and github-repos.
        endpoints: Vec<String>,

        /// Ad-hoc listing URL to estimate in addition to named endpoints
        #[arg(long)]
        url: Option<String>,

        /// Query parameter carrying the tested id for --url
        #[arg(long, default_value = "since", requires = "url")]
        param: String,

        #[command(flatten)]
        search: SearchArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Bearer token sent with every probe
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Retries for 5xx responses and connection failures
        #[arg(long, default_value = "0")]
        retries: u32,

        /// Estimate endpoints one after another
        #[arg(long)]
        sequential: bool,

        /// Wait out rate limits and resume instead of failing
        #[arg(long)]
        resume_on_rate_limit: bool,

        /// Maximum resumes per endpoint
        #[arg(long, default_value = "3", requires = "resume_on_rate_limit")]
        max_resumes: u32,

        /// Longest single wait before resuming, in seconds
        #[arg(long, default_value = "3600", requires = "resume_on_rate_limit")]
        max_wait: u64,
    },

    /// List known endpoints
    List {
        /// Search pattern
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show endpoint details and the probe budget of a search
    Info {
        /// Endpoint identifier
        endpoint: String,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Run the estimator against an in-memory collection
    Simulate {
        /// Largest id present in the simulated collection
        #[arg(long)]
        frontier: u64,

        #[command(flatten)]
        search: SearchArgs,

        /// Throttle the Nth probe (0-based) once, then resume
        #[arg(long)]
        rate_limit_at: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Estimate {
            endpoints,
            url,
            param,
            search,
            format,
            token,
            timeout,
            retries,
            sequential,
            resume_on_rate_limit,
            max_resumes,
            max_wait,
        } => {
            let options = commands::estimate::EstimateOptions {
                config: search.config()?,
                format,
                token,
                timeout,
                retries,
                sequential,
                resume: resume_on_rate_limit.then_some(commands::estimate::ResumePolicy {
                    max_resumes,
                    max_wait: std::time::Duration::from_secs(max_wait),
                }),
                quiet: cli.quiet,
            };
            commands::estimate::estimate(&endpoints, url.as_deref(), &param, &options).await
        }
        Commands::List { search } => commands::list::list_endpoints(search.as_deref()),
        Commands::Info { endpoint, search } => commands::info::show_info(&endpoint, search.config()?),
        Commands::Simulate {
            frontier,
            search,
            rate_limit_at,
            format,
        } => commands::simulate::simulate(frontier, search.config()?, rate_limit_at, format).await,
    }
}
