use clap::{Parser, Subcommand};
use colored::Colorize;
use pgchisel::{
    commands, FileSettingsStore, InteractiveRepl, PgSessionFactory, SessionManager,
    TerminalPrompter,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pgchisel", version, about = "Guided PostgreSQL schema editing")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, env = "PGCHISEL_SETTINGS", value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Run one command and exit; with no command, start the shell
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a table with a generated Id key
    CreateTable,
    /// Drop a table
    DropTable,
    /// Add a column to a table
    AddColumn,
    /// Drop a column from a table
    DropColumn,
    /// Enter new connection parameters and reconnect
    SetConnection,
    /// List user tables
    Tables,
    /// List columns of a table
    Columns,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pgchisel=debug"
    } else {
        "pgchisel=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> pgchisel::Result<()> {
    let settings_path = match cli.settings {
        Some(path) => path,
        None => FileSettingsStore::default_path()?,
    };
    let manager = SessionManager::new(PgSessionFactory, FileSettingsStore::new(settings_path));

    let Some(command) = cli.command else {
        return InteractiveRepl::new(manager)?.run().await;
    };

    let mut prompter = TerminalPrompter::new()?;
    let mut last_table = None;
    let outcome = match command {
        Command::CreateTable => {
            commands::create_table(&manager, &mut prompter, &mut last_table).await?
        }
        Command::DropTable => {
            commands::drop_table(&manager, &mut prompter, &mut last_table).await?
        }
        Command::AddColumn => {
            commands::add_column(&manager, &mut prompter, &mut last_table).await?
        }
        Command::DropColumn => {
            commands::drop_column(&manager, &mut prompter, &mut last_table).await?
        }
        Command::SetConnection => commands::set_connection(&manager, &mut prompter).await?,
        Command::Tables => commands::list_tables(&manager, &mut prompter).await?,
        Command::Columns => {
            commands::list_columns(&manager, &mut prompter, &mut last_table).await?
        }
    };

    if let Some(message) = outcome {
        println!("{}", message.green());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}
