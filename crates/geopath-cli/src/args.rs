use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for geopath-cli
#[derive(Debug, Parser)]
#[command(
    name = "geopath",
    version,
    about = "CLI for resolving classifieds paths against a catalog or the hosted backend"
)]
pub struct CliArgs {
    /// Catalog file (.json, .json.gz, .bin or .bin.gz). Defaults to the built-in demo catalog.
    #[arg(short = 'c', long = "catalog", global = true, conflicts_with = "remote")]
    pub catalog: Option<PathBuf>,

    /// Query the hosted backend (GEOPATH_BACKEND_URL / GEOPATH_BACKEND_KEY) instead of a catalog
    #[arg(long = "remote", global = true)]
    pub remote: bool,

    /// TOML file with `[[routes]]` entries replacing the builtin route table
    #[arg(short = 'r', long = "routes", global = true)]
    pub routes: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve one or more paths and print their route descriptors as JSON
    Resolve {
        /// Paths such as /us/massage/california
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Show which page a path renders (route table first, then resolution)
    Page {
        /// Path or in-app href (query and fragment are ignored)
        path: String,
    },

    /// List active countries
    Countries,

    /// List categories
    Categories,

    /// List active states of a country
    States {
        /// Country code or slug (e.g. US, mexico)
        country: String,
    },

    /// List active cities of a state
    Cities {
        /// Country code or slug
        country: String,
        /// State slug (e.g. california)
        state: String,
    },

    /// List active listings in the scope a path resolves to
    Listings {
        /// Path such as /us/massage/california
        path: String,
        /// Maximum number of listings
        #[arg(short = 'n', long = "limit", default_value_t = geopath_core::listing::DEFAULT_LISTING_LIMIT)]
        limit: usize,
    },

    /// Write the loaded catalog as a bincode snapshot (.bin or .bin.gz)
    Snapshot {
        /// Output path
        out: PathBuf,
    },

    /// Check the loaded catalog for dangling references and duplicate slugs
    Validate,
}
