use anyhow::Context;
use bookrec_db::Database;
use bookrec_kernel::settings::{DatabaseBackend, Settings};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bookrec", version, about = "Book recommendation catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Keep all data in process memory instead of Postgres
        #[arg(long)]
        memory: bool,
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Apply pending schema migrations and exit
    Migrate,
    /// Print every HTTP route the server would expose
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().context("failed to load bookrec settings")?;

    let command = cli.command.unwrap_or(Command::Serve {
        memory: false,
        port: None,
    });

    match command {
        Command::Serve { memory, port } => {
            bookrec_telemetry::init(&settings.telemetry)?;
            if memory {
                settings.database.backend = DatabaseBackend::Memory;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            tracing::info!(env = ?settings.environment, "bookrec serve");
            bookrec_app::serve(settings).await
        }
        Command::Migrate => {
            bookrec_telemetry::init(&settings.telemetry)?;
            let applied = bookrec_app::migrate(&settings).await?;
            println!("applied {applied} migration(s)");
            Ok(())
        }
        Command::Routes => {
            let registry = bookrec_app::build_registry(&Database::memory(), &settings);
            for route in registry.route_table() {
                println!("{route}");
            }
            Ok(())
        }
    }
}
