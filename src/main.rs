#[macro_use] extern crate log;
extern crate simplelog;
extern crate rand;
extern crate percolation;

use rand::Rng;
use simplelog::{CombinedLogger, Config, SharedLogger, WriteLogger};
use std::env;
use std::fs::File;
use std::io;
use std::process;

use percolation::config::USAGE;
use percolation::{MonteCarlo, Percolation, Result, SimulationConfig, seeded_rng};

fn log_config() -> Config {
	Config {time: None, level: Some(log::Level::Error), target: None, location: None, time_format: None}
}

fn init_logging(config: &SimulationConfig) -> Result<()> {
	let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
	loggers.push(WriteLogger::new(config.log_level, log_config(), io::stderr()));
	if let Some(ref path) = config.log_file {
		loggers.push(WriteLogger::new(config.log_level, log_config(), File::create(path)?));
	}
	if let Err(e) = CombinedLogger::init(loggers) {
		eprintln!("logger already installed: {}", e);
	}
	Ok(())
}

fn run() -> Result<()> {
	let args: Vec<String> = env::args().skip(1).collect();
	if args.iter().any(|a| a == "-h" || a == "--help") {
		println!("{}", USAGE);
		return Ok(());
	}
	let config = SimulationConfig::from_args(args)?;
	init_logging(&config)?;

	let seed = config.seed.unwrap_or_else(rand::random);
	info!("seed: {}", seed);
	let mut rng = seeded_rng(seed);

	let stats = MonteCarlo::run(config.n, config.trials, &mut rng)?;
	print!("{}", stats);

	if config.show {
		let mut model = Percolation::new(config.n)?;
		while !model.percolates() {
			let row = rng.gen_range(0, config.n) as isize;
			let col = rng.gen_range(0, config.n) as isize;
			model.open(row, col)?;
		}
		println!();
		print!("{}", model);
		if let Some(path) = model.spanning_path() {
			println!("sample grid: {:.4} open, spanning path of {} sites", model.open_fraction(), path.len());
		}
	}
	Ok(())
}

fn main() {
	if let Err(e) = run() {
		eprintln!("error: {}", e);
		process::exit(1);
	}
}
