#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    CommandStrategy, InfoStrategy, InitStrategy, SearchInput, SearchStrategy, TelegramInput,
    TelegramStrategy, VersionStrategy, WatchInput, WatchStrategy,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "chessbot")]
#[command(about = "Chess tournament search and news alerts", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot and news watcher
    Run {
        /// Bot token (overrides config)
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Search upcoming tournaments by name, city or date
    Search {
        /// Search text
        query: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Watch the news page and print each new featured item
    Watch {
        /// Print the current featured item and exit
        #[arg(long)]
        once: bool,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run { token } => TelegramStrategy.execute(TelegramInput { token }).await,
        Commands::Search { query, json } => {
            SearchStrategy.execute(SearchInput { query, json }).await
        }
        Commands::Watch { once } => WatchStrategy.execute(WatchInput { once }).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
