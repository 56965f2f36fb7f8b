// ABOUTME: CLI argument definitions for the Chevereto uploader
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chevereto")]
#[command(about = "Upload images to Chevereto hosts and check public mirrors", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Force colored output even when piped
    #[arg(long, global = true, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Read configuration from this file instead of the standard locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload an image file
    Upload {
        /// Image file to upload
        file: PathBuf,

        /// Upload URL of a Chevereto instance (e.g., https://host/api/1/upload)
        #[arg(long, requires = "api_key", conflicts_with = "mirror")]
        url: Option<String>,

        /// API key for the instance given with --url
        #[arg(long, requires = "url")]
        api_key: Option<String>,

        /// Upload to a built-in public mirror by host name (see `mirrors`)
        #[arg(long)]
        mirror: Option<String>,

        /// Return the direct image URL instead of the viewer page
        #[arg(long)]
        direct: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// List the built-in public mirrors
    Mirrors {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Upload a sample image to every built-in mirror and report which work
    Test {
        /// Image to upload instead of the generated sample
        #[arg(long, value_name = "FILE")]
        sample: Option<PathBuf>,

        /// Require mirrors to return a direct image URL
        #[arg(long)]
        direct: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
}
