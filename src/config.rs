use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Weekly timetable generator for class sections.
#[derive(Debug, Parser)]
#[command(name = "timetable_builder", version)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the timetable from sections.csv, courses.csv and faculty.csv.
    Generate {
        /// Directory holding the three input tables.
        #[arg(long, env = "TIMETABLE_DATA_DIR", default_value = ".")]
        data_dir: PathBuf,
        /// Where the schedule table is written.
        #[arg(long, env = "TIMETABLE_OUTPUT", default_value = "schedule.csv")]
        output: PathBuf,
        /// Seed for the per-day course shuffle; random when omitted.
        #[arg(long, env = "TIMETABLE_SEED")]
        seed: Option<u64>,
    },
    /// Fit the faculty availability models from a generated schedule.
    Train {
        #[arg(long, env = "TIMETABLE_OUTPUT", default_value = "schedule.csv")]
        schedule: PathBuf,
        #[arg(long, env = "TIMETABLE_MODELS", default_value = "faculty_availability_models.json")]
        models: PathBuf,
    },
    /// Print the faculty ids predicted free at a day (1-6) and hour (1-8).
    Predict {
        #[arg(long, env = "TIMETABLE_MODELS", default_value = "faculty_availability_models.json")]
        models: PathBuf,
        #[arg(long)]
        day: u8,
        #[arg(long)]
        hour: u8,
    },
    /// Serve the HTTP API.
    Serve {
        #[arg(long, env = "TIMETABLE_BIND", default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },
}
