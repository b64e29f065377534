use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lib_notation::ParseMode;

/// A tool for checking and rewriting level documents.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The tile init file
    #[arg(long, value_name = "FILE", global = true)]
    pub tiles: Option<PathBuf>,
    /// The prop init file
    #[arg(long, value_name = "FILE", global = true)]
    pub props: Option<PathBuf>,
    /// The effect init file
    #[arg(long, value_name = "FILE", global = true)]
    pub effects: Option<PathBuf>,
    /// The material init file
    #[arg(long, value_name = "FILE", global = true)]
    pub materials: Option<PathBuf>,
    /// Reject unknown names instead of reading them as zero
    #[arg(long, global = true)]
    pub strict: bool,
    /// Log more. Repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

impl Args {
    pub fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Permissive
        }
    }

    /// The log filter used when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a level and report what is in it
    Check {
        /// The level to check
        #[arg(short, long, value_name = "FILE")]
        level: PathBuf,
    },
    /// Load a level and save it again
    Resave {
        /// The level to load
        #[arg(short, long, value_name = "FILE")]
        level: PathBuf,
        /// The output file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Print the sections of a level as JSON
    Dump {
        /// The level to dump
        #[arg(short, long, value_name = "FILE")]
        level: PathBuf,
        /// Only dump this section
        #[arg(short, long, value_name = "N")]
        section: Option<usize>,
    },
    /// Load an init file and list its categories and errors
    Catalog {
        /// What the file describes
        #[arg(short, long, value_enum)]
        kind: CatalogKind,
        /// The init file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum CatalogKind {
    Tiles,
    Props,
    Effects,
    Materials,
}
