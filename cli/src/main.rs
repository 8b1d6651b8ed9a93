use std::io::Write;
use std::sync::Arc;

use apnea_cli::CliContext;
use apnea_cli::commands;
use apnea_cli::{notify, readline};
use apnea_core::records;
use apnea_core::session::SessionEvent;
use apnea_types::PracticeRecord;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (ctx, events_rx) = CliContext::new();
    let ctx = Arc::new(ctx);

    // listen for session completion and auto-save practice records
    tokio::spawn(handle_session_events(Arc::clone(&ctx), events_rx));

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "breath-hold training timer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved training tables
    Tables,
    /// Show one table's cycles
    ShowTable {
        #[arg(short, long)]
        id: String,
    },
    /// Create a table from a cycle spec like 90/60,75/60,60/90t
    NewTable {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        cycles: String,
    },
    /// Start a session over a table (by id or name)
    Start {
        #[arg(short, long)]
        id: String,
    },
    Pause,
    Resume,
    /// End the current tap-mode hold
    Tap,
    /// Stop the session; --save records results so far
    Stop {
        #[arg(short, long)]
        save: bool,
    },
    Status,
    Settings,
    SetVolume {
        #[arg(short, long)]
        volume: f32,
    },
    /// Show saved practice records
    History,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "apnea".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Tables) => commands::list_tables(ctx).await?,
        Some(Commands::ShowTable { id }) => commands::show_table(id, ctx).await?,
        Some(Commands::NewTable { name, cycles }) => commands::new_table(name, cycles, ctx).await?,
        Some(Commands::Start { id }) => commands::start(id, ctx).await?,
        Some(Commands::Pause) => commands::pause(ctx).await?,
        Some(Commands::Resume) => commands::resume(ctx).await?,
        Some(Commands::Tap) => commands::tap(ctx).await?,
        Some(Commands::Stop { save }) => commands::stop(*save, ctx).await?,
        Some(Commands::Status) => commands::status(ctx).await?,
        Some(Commands::Settings) => commands::show_settings(ctx).await?,
        Some(Commands::SetVolume { volume }) => commands::set_volume(*volume, ctx).await?,
        Some(Commands::History) => commands::history(ctx).await?,
        Some(Commands::Exit) => return Ok(true),
        None => {}
    }

    Ok(false)
}

/// Save a practice record whenever a session completes with an active table.
async fn handle_session_events(
    ctx: Arc<CliContext>,
    mut events_rx: mpsc::UnboundedReceiver<SessionEvent>,
) {
    while let Some(event) = events_rx.recv().await {
        match event {
            SessionEvent::Completed { results } => {
                ctx.driver.lock().await.stop();

                let Some(table) = ctx.active_table.read().await.clone() else {
                    continue;
                };
                if results.is_empty() {
                    continue;
                }

                let record = PracticeRecord {
                    table_id: table.id,
                    table_name: table.name,
                    completed_at: chrono::Utc::now(),
                    results,
                };
                match records::save_record(&record) {
                    Ok(path) => notify(&format!("saved practice record: {}", path.display())),
                    Err(err) => notify(&format!("failed to save practice record: {err}")),
                }
            }
        }
    }
}
