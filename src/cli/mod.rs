pub mod balance;
pub mod categories;
pub mod import;
pub mod init;
pub mod list;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "penny", about = "Import and browse personal finance transactions.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up penny: choose a data directory and initialize the database.
    Init {
        /// Path for penny data (default: ~/Documents/penny)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Import a transactions CSV, creating missing categories on the fly.
    ///
    /// The file must carry a header line; data rows are
    /// `title,type,value,category`. The file is deleted after a
    /// successful import.
    Import {
        /// Path to the CSV file
        file: String,
    },
    /// List imported transactions.
    List,
    /// Show income, outcome and total balance.
    Balance,
    /// List categories.
    Categories,
}
