use chrono::Local;
use csv::Writer;
use genetic_palindrome::report::{write_history, ConsoleEvaluator};
use genetic_palindrome::sweep::{collect_sweep, SweepSchema};
use genetic_palindrome::visualization::plot_fitness_history;
use genetic_palindrome::{Simulation, SimulationConfig};
use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::process;

const SWEEP_REPETITIONS: usize = 5;

fn load_config(path: Option<&str>) -> Result<SimulationConfig, Box<dyn Error>> {
    let config = match path {
        Some(path) => {
            log::info!("Loading configuration from '{}'...", path);
            SimulationConfig::load(Path::new(path))?
        }
        None => SimulationConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn simulate(config: SimulationConfig, date_str: &str) -> Result<(), Box<dyn Error>> {
    let mut simulation = Simulation::from_config(config)?;
    let mut evaluator = ConsoleEvaluator::new(None);
    let history = simulation.run(&mut evaluator)?;

    let csv_path = format!("fitness_history_{}.csv", date_str);
    let mut writer = Writer::from_writer(File::create(&csv_path)?);
    write_history(history, &mut writer)?;
    log::info!("History saved to {}", csv_path);

    if !history.is_empty() {
        plot_fitness_history(history, &format!("fitness_history_{}.png", date_str))?;
    }

    Ok(())
}

fn sweep(config: SimulationConfig, date_str: &str) -> Result<(), Box<dyn Error>> {
    let path = format!("sweep_results_{}.csv", date_str);
    let mut writer = Writer::from_writer(File::create(&path)?);
    let scenarios = collect_sweep(
        &[SweepSchema::default()],
        &config,
        SWEEP_REPETITIONS,
        &mut writer,
    )?;
    log::info!("{} scenarios saved to {}", scenarios, path);
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (is_sweep, config_path) = match args.first().map(String::as_str) {
        Some("sweep") => (true, args.get(1).map(String::as_str)),
        other => (false, other),
    };

    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let date_str = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let outcome = if is_sweep {
        sweep(config, &date_str)
    } else {
        simulate(config, &date_str)
    };

    if let Err(e) = outcome {
        log::error!("Run failed: {}", e);
        process::exit(1);
    }
}
