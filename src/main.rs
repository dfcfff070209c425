use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rescue_dashboard::config::DashboardConfig;
use rescue_dashboard::db::Database;
use rescue_dashboard::models::{AnimalRecord, Selector};
use rescue_dashboard::pipeline::Dashboard;
use rescue_dashboard::working_set::WorkingSetManager;
use rescue_dashboard::{api, projection, query};

#[derive(Parser)]
#[command(name = "rescue-dash")]
#[command(about = "Rescue-animal dashboard backend")]
struct Cli {
    /// Path to the SQLite database (defaults to the platform data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard HTTP API
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "8050")]
        port: u16,
    },
    /// Import shelter records from a JSON array of documents
    Import {
        /// JSON file to import
        file: PathBuf,
    },
    /// Print the working set for a selector as JSON
    Query {
        /// water, mountain, disaster or reset
        #[arg(default_value = "reset")]
        selector: String,
    },
}

/// Initialize tracing. Logs go to stderr so `query` output stays clean on stdout.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "rescue_dashboard=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_database(path: Option<PathBuf>) -> anyhow::Result<Database> {
    let db = match path {
        Some(path) => Database::open(path)?,
        None => Database::open_default()?,
    };
    db.migrate()?;
    Ok(db)
}

async fn serve(db: Database, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting rescue dashboard on port {}", port);

    let dashboard = Dashboard::new(Arc::new(db), DashboardConfig::from_env())
        .start()
        .context("Failed to load the initial working set")?;
    let app = api::create_router(dashboard);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Rescue dashboard listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn import(db: &Database, file: PathBuf) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let documents: Vec<serde_json::Value> =
        serde_json::from_str(&content).context("Import file must be a JSON array")?;

    let records = documents
        .into_iter()
        .enumerate()
        .map(|(index, doc)| {
            serde_json::from_value::<AnimalRecord>(doc)
                .with_context(|| format!("Invalid shelter document at index {}", index))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let stored = db.insert_records(records)?;
    tracing::info!(
        "Imported {} records from {} ({} total)",
        stored.len(),
        file.display(),
        db.count_records()?
    );
    Ok(())
}

fn print_query(db: &Database, selector: &str) -> anyhow::Result<()> {
    let selector = Selector::parse(selector);
    let records = WorkingSetManager::new(Arc::new(db.clone())).fetch(&query::build(selector))?;

    for entry in projection::aggregate(&records) {
        tracing::info!(selector = %selector, "{}: {}", entry.breed, entry.count);
    }

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let db = open_database(cli.db)?;

    match cli.command {
        Some(Commands::Serve { port }) => serve(db, port).await?,
        Some(Commands::Import { file }) => import(&db, file)?,
        Some(Commands::Query { selector }) => print_query(&db, &selector)?,
        None => serve(db, 8050).await?,
    }

    Ok(())
}
