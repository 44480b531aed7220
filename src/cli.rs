//! Command-line interface definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use treebites::catalog::ALL_CATEGORY;
use treebites::catalog::map::{DEFAULT_ZOOM, MAX_ZOOM};
use treebites::config::DEFAULT_CONFIG_FILE;

/// Tree Bites - share leftover campus food
#[derive(Parser)]
#[command(name = "treebites")]
#[command(version)]
#[command(about = "Campus leftover-food sharing: particle field, event catalog and club sign-up", long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the floating food window (default)
    Field {
        /// Number of food icons, 1 to 30
        #[arg(long)]
        count: Option<usize>,
    },

    /// List food events
    Events {
        /// Case-insensitive text to find in title, description or organizer
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// Category chip, exact match
        #[arg(long, short = 'k', default_value = ALL_CATEGORY)]
        category: String,

        /// Print JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Show where the events sit on the campus map
    Map {
        /// Tile zoom level
        #[arg(
            long,
            short = 'z',
            default_value_t = DEFAULT_ZOOM,
            value_parser = clap::value_parser!(u8).range(..=MAX_ZOOM as i64)
        )]
        zoom: u8,

        /// Percentage layout instead of map tiles
        #[arg(long = "static")]
        static_layout: bool,

        #[arg(long)]
        json: bool,
    },

    /// Sign a club up for early access
    Join {
        /// Club name
        #[arg(long)]
        club: String,

        /// Contact person
        #[arg(long)]
        contact: String,

        #[arg(long)]
        email: String,

        /// Instagram handle or website
        #[arg(long, default_value = "")]
        social: String,

        /// Catered events per quarter
        #[arg(long, default_value = "")]
        events: String,

        #[arg(long, default_value = "")]
        message: String,

        /// The club hosts catered events
        #[arg(long)]
        catered: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}
