//! # QuickBill Console Library
//!
//! The operator console for QuickBill: configuration, state, commands, the
//! clock task and receipt export. `main.rs` only parses the launch flags and
//! calls [`run`].
//!
//! ## Module Organization
//! ```text
//! quickbill_terminal/
//! ├── lib.rs          ◄─── You are here (startup & shutdown)
//! ├── cli.rs          ◄─── Launch flags and operator command grammar
//! ├── config.rs       ◄─── Layered configuration
//! ├── console.rs      ◄─── Operator input loop
//! ├── clock.rs        ◄─── Periodic date/time refresh
//! ├── export.rs       ◄─── Background PDF export
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (menu, profile, order, ...)
//! │   └── db.rs       ◄─── Document loading with default fallback
//! ├── commands/
//! │   ├── mod.rs      ◄─── Dispatch
//! │   ├── menu.rs     ◄─── Catalog editing
//! │   ├── order.rs    ◄─── Bill lines
//! │   ├── profile.rs  ◄─── Restaurant profile editing
//! │   └── receipt.rs  ◄─── Preview, export, time
//! └── error.rs        ◄─── AppError for commands and startup
//! ```

pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod state;

use std::sync::Arc;

use quickbill_core::ClockReading;
use quickbill_db::{Database, DbConfig};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::LaunchArgs;
use config::AppConfig;
use error::AppResult;
use export::{Exporter, PdfRenderer};
use state::{AppState, DbState};

/// Runs the console until the operator quits or input ends.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Console Startup                                   │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → config.toml → QUICKBILL_* → flags                      │
/// │                                                                         │
/// │  2. Open Document Store ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │                                                                         │
/// │  3. Start Background Work ────────────────────────────────────────────► │
/// │     • Clock task (watch channel)                                        │
/// │     • Exporter (PDF renderer, idle)                                     │
/// │                                                                         │
/// │  4. Load State ───────────────────────────────────────────────────────► │
/// │     • Menu and profile from the store, or defaults                      │
/// │                                                                         │
/// │  5. Console Loop, then shutdown in reverse order                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: LaunchArgs) -> AppResult<()> {
    info!("Starting QuickBill console");

    let config = AppConfig::load(&args)?;

    let db_path = config.database_path();
    info!(?db_path, "Database path determined");
    let db = Database::new(DbConfig::new(db_path)).await?;

    let clock = clock::spawn_clock(config.refresh_interval(), ClockReading::now);
    let renderer = Arc::new(PdfRenderer::new(config.receipt.width));
    let (exporter, mut events) = Exporter::new(renderer, config.storage.export_dir.clone());

    let mut state = AppState::load(
        DbState::new(db.clone()),
        config,
        clock.subscribe(),
        exporter,
    )
    .await?;

    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    let result = console::run_console(&mut state, &mut events, input, &mut output).await;

    clock.shutdown().await;
    db.close().await;
    info!("QuickBill console stopped");

    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never mix with console output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every dispatched command
/// - `RUST_LOG=quickbill_db=trace` - Trace the document store only
/// - Default: warnings, plus lifecycle events from the quickbill crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,quickbill=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
