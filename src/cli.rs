use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Correlate system scan files with known vulnerabilities
#[derive(Parser, Debug)]
#[command(name = "vulnscan")]
#[command(version = "0.4.0")]
#[command(about = "Correlate system scan files with known vulnerabilities", long_about = None)]
pub struct Args {
    /// Path to a configuration file (defaults to ./vulnscan.config.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process scan files and correlate them against the vulnerability catalog
    Scan {
        /// Scan files to process (JSON)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Results requested per catalog query
        #[arg(long, value_name = "N")]
        page_size: Option<u32>,

        /// Maximum search terms derived per scan file
        #[arg(long, value_name = "N")]
        max_terms: Option<usize>,

        /// Write the JSON report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pin every vulnerability found by this scan
        #[arg(long)]
        pin: bool,
    },

    /// Search the vulnerability catalog by keyword
    Search {
        /// Keyword to search for (e.g. a product name)
        keyword: String,

        /// Results requested per catalog query
        #[arg(long, value_name = "N")]
        page_size: Option<u32>,
    },

    /// Look up a single vulnerability by CVE identifier
    Lookup {
        /// CVE identifier (e.g. CVE-2024-1234)
        cve_id: String,
    },

    /// Manage the pinned vulnerability set
    Pin {
        #[command(subcommand)]
        action: PinAction,
    },

    /// Submit scan files to a backend for server-side processing
    Submit {
        /// Scan files to submit (JSON)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Backend base URL (e.g. http://127.0.0.1:8000)
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PinAction {
    /// List pinned vulnerabilities, most recently pinned first
    List,

    /// Look up a CVE in the catalog and pin it
    Add {
        /// CVE identifier to pin
        cve_id: String,
    },

    /// Remove a vulnerability from the pinned set
    Remove {
        /// CVE identifier to remove
        cve_id: String,
    },

    /// Export the pinned set as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the pinned set with the contents of a JSON export
    Import {
        /// Path to a previously exported JSON file
        path: PathBuf,
    },

    /// Remove all pinned vulnerabilities
    Clear,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
