//! # Console Commands
//!
//! One handler per operator command, grouped by what they touch.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch)
//! ├── menu.rs     ◄─── Catalog listing and draft editing
//! ├── order.rs    ◄─── Add, remove, clear, show the bill
//! ├── profile.rs  ◄─── Restaurant profile listing and draft editing
//! └── receipt.rs  ◄─── Preview, export, clock
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line ──► cli::parse_command ──► dispatch(&mut AppState, cmd)    │
//! │                                              │                          │
//! │                     ┌────────────────────────┼──────────────────────┐   │
//! │                     ▼                        ▼                      ▼   │
//! │               Ok(Flow::Continue(text))   Ok(Flow::Quit)    Err(AppError)│
//! │               printed on stdout          loop ends         printed,     │
//! │                                                            loop goes on │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod menu;
pub mod order;
pub mod profile;
pub mod receipt;

use tracing::debug;

use crate::cli::{Command, MenuAction, ProfileAction};
use crate::error::AppResult;
use crate::state::AppState;

/// What the console loop does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Print the text and read the next line.
    Continue(String),
    /// Leave the loop.
    Quit,
}

impl From<String> for Flow {
    fn from(text: String) -> Self {
        Flow::Continue(text)
    }
}

/// Runs one parsed operator command against the state.
pub async fn dispatch(state: &mut AppState, command: Command) -> AppResult<Flow> {
    debug!(?command, "dispatch");

    let reply = match command {
        Command::Menu { action } => match action {
            None => menu::show(state),
            Some(MenuAction::Edit) => menu::edit(state),
            Some(MenuAction::Name { row, value }) => menu::rename(state, row, &value)?,
            Some(MenuAction::Price { row, value }) => menu::reprice(state, row, &value)?,
            Some(MenuAction::New) => menu::add_row(state)?,
            Some(MenuAction::Drop { row }) => menu::drop_row(state, row)?,
            Some(MenuAction::Save) => menu::save(state).await?,
            Some(MenuAction::Cancel) => menu::cancel(state)?,
        },
        Command::Add { item } => order::add(state, &item)?,
        Command::Remove { id } => order::remove(state, &id),
        Command::Clear => order::clear(state),
        Command::Order => order::show(state),
        Command::Receipt => receipt::preview(state),
        Command::Export => receipt::export(state)?,
        Command::Profile { action } => match action {
            None => profile::show(state),
            Some(ProfileAction::Edit) => profile::edit(state),
            Some(ProfileAction::Set { field, value }) => profile::set(state, field, &value)?,
            Some(ProfileAction::Save) => profile::save(state).await?,
            Some(ProfileAction::Cancel) => profile::cancel(state)?,
        },
        Command::Time => receipt::time(state),
        Command::Quit => return Ok(Flow::Quit),
    };

    Ok(Flow::Continue(reply))
}
