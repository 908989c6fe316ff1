//! CLI argument parsing for the eld-trip-planner binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "eld-trip-planner", about = "Hours-of-Service trip planner and compliance checker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Look up the route and plan a single trip
    Plan {
        /// Where the driver is now
        #[arg(long)]
        current: String,
        /// Pickup location
        #[arg(long)]
        pickup: String,
        /// Drop-off location
        #[arg(long)]
        dropoff: String,
        /// Hours already used in the 70-hour cycle
        #[arg(long, default_value_t = 0.0)]
        cycle_used: f64,
        /// Take required rests in the sleeper berth
        #[arg(long)]
        sleeper: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Plan a trip over a known route given as {"trip", "route"} JSON
    Schedule {
        /// Input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        sleeper: bool,
        #[arg(long)]
        pretty: bool,
    },
    /// Plan a JSON array of trip requests concurrently
    Batch {
        /// Input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        sleeper: bool,
        #[arg(long)]
        pretty: bool,
    },
}
