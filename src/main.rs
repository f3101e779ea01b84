//! Command line access to formats, containers, wells, and plans.
//!
//! Usage:
//!   `wellplated format create --prefix f --purpose final-tube`
//!   `wellplated container create H12f --fill`
//!   `wellplated well get H12f00000000001.A01`
//!   `wellplated transfer add <plan-id> --source <well-id>`
//!
//! Every command connects to `DB_URL`, applies pending migrations, and makes
//! sure the start and end wells exist. Created records are printed as JSON.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use console::style;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use wellplated::config::Config;
use wellplated::containers::{models::ContainerCreate, services as containers};
use wellplated::formats::{models::FormatCreate, services as formats};
use wellplated::plans::{models::PlanCreate, services as plans, transfers::models::TransferCreate};
use wellplated::sentinels::ensure_sentinels;
use wellplated::wells::services as wells;

#[derive(Parser, Debug)]
#[command(name = "wellplated", version, about = "Plates, tubes, wells, and planned transfers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending migrations and create the start and end wells
    Migrate,
    #[command(subcommand)]
    Format(FormatCommand),
    #[command(subcommand)]
    Container(ContainerCommand),
    #[command(subcommand)]
    Well(WellCommand),
    #[command(subcommand)]
    Plan(PlanCommand),
    #[command(subcommand)]
    Transfer(TransferCommand),
}

#[derive(Subcommand, Debug)]
enum FormatCommand {
    /// Register a container format
    Create(FormatArgs),
    /// List all formats
    List,
}

#[derive(Args, Debug)]
struct FormatArgs {
    /// Row letter of the bottom row
    #[arg(long, default_value = "H")]
    bottom_row: String,
    /// Number of the right-most column
    #[arg(long, default_value_t = 12, allow_negative_numbers = true)]
    right_column: i32,
    #[arg(long)]
    prefix: String,
    #[arg(long)]
    purpose: String,
}

#[derive(Subcommand, Debug)]
enum ContainerCommand {
    /// Create a container, allocating the next number unless one is given
    Create {
        format_key: String,
        #[arg(long)]
        external_id: Option<u64>,
        /// Create every well of the format as well
        #[arg(long)]
        fill: bool,
    },
    /// List containers, optionally of one format
    List {
        #[arg(long)]
        format_key: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum WellCommand {
    /// Look up a well by key (`H12f00000000001.A01`)
    Get { key: String },
    /// List the wells of a container
    List { container_code: String },
}

#[derive(Subcommand, Debug)]
enum PlanCommand {
    Create {
        name: String,
        #[arg(long)]
        created_by: String,
        #[arg(long)]
        assigned_to: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum TransferCommand {
    /// Plan a transfer; missing source or sink fall back to the start or end well
    Add {
        plan_id: Uuid,
        #[arg(long)]
        source: Option<Uuid>,
        #[arg(long)]
        sink: Option<Uuid>,
    },
    /// List the transfers of a plan
    List { plan_id: Uuid },
}

/// `RUST_LOG` directives, or `info` when unset or unparsable
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn connect(config: &Config) -> Result<DatabaseConnection> {
    let db = Database::connect(config.db_url.as_str())
        .await
        .context("Could not connect to the database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;
    let (start, end) = ensure_sentinels(&db).await?;
    tracing::debug!("Connected, sentinels {start} and {end} in place");
    Ok(db)
}

async fn run(db: &DatabaseConnection, command: Commands) -> Result<()> {
    match command {
        Commands::Migrate => {
            eprintln!("{} Database migrated", style("✔").green());
        }
        Commands::Format(FormatCommand::Create(args)) => {
            let format = formats::create_format(
                db,
                FormatCreate {
                    bottom_row: args.bottom_row,
                    right_column: args.right_column,
                    prefix: args.prefix,
                    purpose: args.purpose,
                },
            )
            .await?;
            print_json(&format)?;
        }
        Commands::Format(FormatCommand::List) => {
            print_json(&formats::list_formats(db).await?)?;
        }
        Commands::Container(ContainerCommand::Create {
            format_key,
            external_id,
            fill,
        }) => {
            let container = containers::create_container(
                db,
                ContainerCreate {
                    format_key,
                    external_id,
                    fill,
                },
            )
            .await?;
            eprintln!("{} {}", style("Created").green(), style(&container).bold());
            print_json(&container)?;
        }
        Commands::Container(ContainerCommand::List { format_key }) => {
            print_json(&containers::list_containers(db, format_key.as_deref()).await?)?;
        }
        Commands::Well(WellCommand::Get { key }) => {
            print_json(&wells::find_well_by_key(db, &key).await?)?;
        }
        Commands::Well(WellCommand::List { container_code }) => {
            print_json(&wells::list_wells(db, &container_code).await?)?;
        }
        Commands::Plan(PlanCommand::Create {
            name,
            created_by,
            assigned_to,
        }) => {
            let plan = plans::create_plan(
                db,
                PlanCreate {
                    name,
                    created_by,
                    assigned_to,
                },
            )
            .await?;
            print_json(&plan)?;
        }
        Commands::Transfer(TransferCommand::Add {
            plan_id,
            source,
            sink,
        }) => {
            let transfer = plans::add_transfer(
                db,
                TransferCreate {
                    plan_id,
                    source_id: source,
                    sink_id: sink,
                },
            )
            .await?;
            eprintln!(
                "{} {}",
                style("Planned").green(),
                style(plans::describe_transfer(db, &transfer).await?).bold()
            );
            print_json(&transfer)?;
        }
        Commands::Transfer(TransferCommand::List { plan_id }) => {
            print_json(&plans::list_transfers(db, plan_id).await?)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    tracing::info!(
        "Starting {} ({} deployment)",
        config.app_name,
        config.deployment.to_uppercase()
    );

    let db = connect(&config).await?;
    if let Err(e) = run(&db, cli.command).await {
        eprintln!("{} {e}", style("✘").red());
        return Err(e);
    }
    Ok(())
}
