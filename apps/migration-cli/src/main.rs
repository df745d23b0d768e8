use clap::Parser;
use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database};

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "GazBot database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | refresh | status
    command: MigrationCommand,

    /// Database URL (postgres:// or sqlite://path?mode=rwc)
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    if args.database_url.contains(":memory:") {
        eprintln!("SQLite in-memory databases are not supported for CLI operations.");
        eprintln!("Each CLI run would migrate a fresh database that is dropped on exit.");
        std::process::exit(1);
    }

    let mut opts = ConnectOptions::new(args.database_url);
    opts.sqlx_logging(false);

    let db = match Database::connect(opts).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, args.command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
