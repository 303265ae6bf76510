use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use parkfetch::cli;
use parkfetch::cli::scrape_cmd::ScrapeOpts;

#[derive(Parser)]
#[command(
    name = "parkfetch",
    about = "Parkfetch — fetch National Park brochures and extract park data",
    version,
    after_help = "Run 'parkfetch <command> --help' for details on each command.\nRun 'parkfetch' with no command to scrape with defaults."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape park brochures and write the JSON and spreadsheet sinks
    Scrape(ScrapeOpts),
    /// List the static park table
    Parks,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("PARKFETCH_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("PARKFETCH_QUIET", "1");
    }

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("parkfetch=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("parkfetch=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        // No subcommand → scrape with defaults
        None => cli::scrape_cmd::run(ScrapeOpts::default()).await,

        Some(Commands::Scrape(opts)) => cli::scrape_cmd::run(opts).await,
        Some(Commands::Parks) => cli::parks_cmd::run(),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "parkfetch", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success (park failures are batch-internal), 1=unusable setup
    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
