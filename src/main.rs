mod availability;
mod catalog;
mod config;
mod data;
mod emitter;
mod error;
mod grid;
mod prediction;
mod server;
mod solver;

use crate::catalog::Catalog;
use crate::config::{Command, Config};
use crate::prediction::AvailabilityModel;
use clap::Parser;
use itertools::Itertools;
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let result = match config.command {
        Command::Generate {
            data_dir,
            output,
            seed,
        } => generate(&data_dir, &output, seed),
        Command::Train { schedule, models } => train(&schedule, &models),
        Command::Predict { models, day, hour } => predict(&models, day, hour),
        Command::Serve { bind } => server::run_server(bind).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn generate(data_dir: &Path, output: &Path, seed: Option<u64>) -> error::Result<()> {
    let catalog = Catalog::load_dir(data_dir)?;
    let seed = seed.unwrap_or_else(rand::random);
    info!("Shuffle seed: {seed}");

    let mut rng = StdRng::seed_from_u64(seed);
    let schedule = solver::solve(&catalog, &mut rng)?;
    emitter::write_csv(output, &schedule.assignments)?;
    Ok(())
}

fn train(schedule: &Path, models: &Path) -> error::Result<()> {
    let rows = emitter::read_csv(schedule)?;
    AvailabilityModel::train(&rows).save(models)
}

fn predict(models: &Path, day: u8, hour: u8) -> error::Result<()> {
    let model = AvailabilityModel::load(models)?;
    if model.is_empty() {
        info!("No trained models at {}", models.display());
    }
    let free = model.predict_free(day, hour);
    println!(
        "Free at day {day}, hour {hour}: {}",
        free.iter().join(", ")
    );
    Ok(())
}
