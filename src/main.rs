use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_popular::commands;
use yt_popular::config::{Config, load_env};
use yt_popular::error::Result;
use yt_popular::pipeline::Pipeline;
use yt_popular::youtube::YouTubeClient;

#[derive(Parser)]
#[command(name = "yt-popular")]
#[command(about = "Rank a YouTube channel's recent uploads by view count")]
#[command(version)]
struct Cli {
    /// Defaults to the interactive prompt
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for channel, count and time window in a loop
    Interactive,

    /// Resolve a channel name to its channel ID
    Channel {
        /// Channel name to search for
        name: String,
    },

    /// Rank a channel's recent uploads by views
    Recent {
        /// Channel name (or channel ID with --id)
        channel: String,

        /// Treat CHANNEL as a channel ID and skip the name search
        #[arg(long)]
        id: bool,

        /// Number of latest uploads to scan (default: 50)
        #[arg(short = 'n', long, default_value = "50")]
        limit: u32,

        /// Only keep videos from the last N hours (default: 24)
        #[arg(short = 'H', long, default_value = "24")]
        hours: u32,

        /// Print the ranked list as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Serve the ranking pipeline over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "0.0.0.0:3000")]
        bind: String,
    },

    /// Save a YouTube Data API key
    Init {
        /// YouTube Data API key
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    load_env();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Interactive);

    // Keep the console quiet unless serving
    let default_filter = match command {
        Commands::Serve { .. } => "yt_popular=info",
        _ => "yt_popular=warn",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = dispatch(command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Init { api_key, force } => commands::init::run(api_key, force),
        Commands::Interactive => commands::interactive::run(&build_pipeline()?).await,
        Commands::Channel { name } => commands::channel::run(&build_pipeline()?, &name).await,
        Commands::Recent {
            channel,
            id,
            limit,
            hours,
            json,
        } => commands::recent::run(&build_pipeline()?, &channel, id, limit, hours, json).await,
        Commands::Serve { bind } => commands::serve::run(build_pipeline()?, &bind).await,
    }
}

fn build_pipeline() -> Result<Pipeline> {
    let config = Config::from_env()?;
    let client = YouTubeClient::new(&config)?;
    Ok(Pipeline::new(Arc::new(client), config.display_offset))
}
