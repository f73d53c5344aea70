//! Command-line interface for DineAround.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DineAround - restaurant search gateway
/// Searches Google Places and keeps a local cache of every result
#[derive(Parser)]
#[command(name = "dinearound")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default search path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "web")]
    Serve,

    /// Search restaurants and cache the results
    #[command(alias = "s")]
    Search {
        /// Search text
        #[arg(required = true)]
        query: Vec<String>,
        /// Latitude of the bias center
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,
        /// Longitude of the bias center
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<String>,
        /// Bias radius in meters
        #[arg(long)]
        radius: Option<String>,
    },

    /// Fetch one place by its Google place id
    #[command(alias = "i")]
    Details {
        /// Google place id
        place_id: String,
    },

    /// Create default config file
    #[command(alias = "init")]
    InitConfig,
}

pub use commands::*;
