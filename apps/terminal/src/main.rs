//! # QuickBill Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuickBill POS                                    │
//! │                                                                         │
//! │  main.rs ────► parse flags, init logging, run, exit code                │
//! │  lib.rs ─────► config, database, clock, exporter, console loop          │
//! │                                                                         │
//! │  stdin ──► commands ──► AppState ──► stdout                             │
//! │                            │                                            │
//! │                            ▼                                            │
//! │                 quickbill.db (SQLite, WAL)    Bill_1024_*.pdf           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process;

use clap::Parser;
use quickbill_terminal::cli::LaunchArgs;

#[tokio::main]
async fn main() {
    let args = LaunchArgs::parse();
    quickbill_terminal::init_tracing();

    let code = match quickbill_terminal::run(args).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    };

    // The stdin reader thread cannot be cancelled; exit without waiting on it.
    process::exit(code);
}
