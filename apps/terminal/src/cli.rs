//! # Command-Line and Operator Grammar
//!
//! Two `clap` parsers live here: [`LaunchArgs`] for the process
//! arguments, and [`OperatorLine`] for each line the operator types into
//! the console.
//!
//! ```text
//! quickbill --db ./shop.db --export-dir ./bills
//!
//! > menu                      list the catalog
//! > menu edit                 start editing a draft
//! > menu name 2 Onion Kachori
//! > menu price 2 22
//! > menu save
//! > add 1                     add by menu row
//! > add Masala Tea            add by exact name
//! > order
//! > export
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quickbill_core::RestaurantField;

/// Process arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "quickbill")]
#[command(about = "Point-of-sale billing console for small food counters")]
#[command(version)]
pub struct LaunchArgs {
    /// Config file (defaults to config.toml in the platform config dir)
    #[arg(long, env = "QUICKBILL_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Directory exported bills are written to
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Receipt width in characters
    #[arg(long)]
    pub width: Option<usize>,
}

/// One operator input line.
#[derive(Debug, Parser)]
#[command(name = "quickbill", no_binary_name = true)]
pub struct OperatorLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the menu, or edit it
    Menu {
        #[command(subcommand)]
        action: Option<MenuAction>,
    },

    /// Add an item to the order by menu row or exact name
    Add {
        #[arg(required = true)]
        item: Vec<String>,
    },

    /// Remove an order line by its id
    Remove { id: String },

    /// Empty the order
    Clear,

    /// Show the order lines and totals
    Order,

    /// Preview the receipt
    Receipt,

    /// Export the receipt as PDF
    Export,

    /// Show the restaurant profile, or edit it
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },

    /// Show the current date and time
    Time,

    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum MenuAction {
    /// Start editing a draft copy of the menu
    Edit,

    /// Rename a draft row
    Name {
        row: usize,
        #[arg(required = true)]
        value: Vec<String>,
    },

    /// Set a draft row's price
    Price {
        row: usize,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Append a blank draft row
    New,

    /// Delete a draft row
    Drop { row: usize },

    /// Save the draft
    Save,

    /// Discard the draft
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ProfileAction {
    /// Start editing a draft copy of the profile
    Edit,

    /// Set a draft field (name, tagline, address, gstin)
    Set {
        field: RestaurantField,
        #[arg(allow_hyphen_values = true, num_args = 0..)]
        value: Vec<String>,
    },

    /// Save the draft
    Save,

    /// Discard the draft
    Cancel,
}

/// Parses one operator line. Words are separated by whitespace; multi-word
/// values are joined back with single spaces by the handlers.
pub fn parse_command(line: &str) -> Result<Command, clap::Error> {
    OperatorLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
}

/// Joins the words of a multi-word value.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
