//! CLI / environment configuration for the `book-store` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Book store CLI
#[derive(Debug, Parser)]
#[command(name = "book-store", version, about = "Insert and list books in a JSON shelf file")]
pub struct Config {
    /// Shelf file path
    #[arg(long, global = true, env = "BOOK_STORE_PATH", default_value = "books.json")]
    pub store: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        year: Option<u16>,
    },
    /// List stored books
    List,
}

impl Config {
    /// `RUST_LOG` が無いときに使うフィルタ
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
