use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fieldbook-cli", version, about = "Fieldbook visit scheduler CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Book a new visit
    Add {
        /// Calendar day (YYYY-MM-DD)
        date: String,
        /// Start time (HH:MM)
        start: String,
        /// End time (HH:MM); omit for a one-hour default
        #[arg(long)]
        end: Option<String>,
        /// Short description (max 60 characters in the editor)
        #[arg(long, default_value = "")]
        text: String,
        /// Client id
        #[arg(long)]
        client_id: Option<i64>,
    },
    /// List visits
    List {
        /// Only show one calendar day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Edit a visit
    Edit {
        /// Event id
        id: i64,
        /// New calendar day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New start time (HH:MM)
        #[arg(long)]
        start: Option<String>,
        /// New end time (HH:MM)
        #[arg(long)]
        end: Option<String>,
        /// New description
        #[arg(long)]
        text: Option<String>,
        /// New client id
        #[arg(long)]
        client_id: Option<i64>,
    },
    /// Cancel a visit
    Remove {
        /// Event id
        id: i64,
    },
    /// Drain the pending sync queue now
    Sync,
    /// Show sync status
    Status,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Add {
            date,
            start,
            end,
            text,
            client_id,
        } => commands::add::run(&date, &start, end.as_deref(), text, client_id).await,
        Commands::List { date } => commands::list::run(date.as_deref()).await,
        Commands::Edit {
            id,
            date,
            start,
            end,
            text,
            client_id,
        } => {
            commands::edit::run(
                id,
                date.as_deref(),
                start.as_deref(),
                end.as_deref(),
                text,
                client_id,
            )
            .await
        }
        Commands::Remove { id } => commands::remove::run(id).await,
        Commands::Sync => commands::sync::run_sync().await,
        Commands::Status => commands::sync::run_status().await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
