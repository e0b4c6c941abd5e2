use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde_json::Value;

use crate::error::{PercolationError, Result};

pub const DEFAULT_GRID_SIZE: usize = 20;
pub const DEFAULT_TRIALS: usize = 1000;

pub const USAGE: &str = "usage: percolation [N] [TRIALS] [--seed S] [--config FILE] \
[--log-level LEVEL] [--log-file PATH] [--show]";

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub n: usize,
    pub trials: usize,
    pub seed: Option<u64>,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub show: bool,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            n: DEFAULT_GRID_SIZE,
            trials: DEFAULT_TRIALS,
            seed: None,
            log_level: LevelFilter::Info,
            log_file: None,
            show: false,
        }
    }
}

fn parse_num<T: ::std::str::FromStr>(what: &str, s: &str) -> Result<T> {
    s.parse::<T>().map_err(|_| PercolationError::config(format!("{} must be a non-negative integer, got {:?}", what, s)))
}

// negative counts are rejected the same way zero ones are
fn parse_count(what: &str, s: &str) -> Result<usize> {
    if s.starts_with('-') && s[1..].parse::<u64>().is_ok() {
        return Err(PercolationError::invalid_argument(format!("{} must be greater than 0, got {}", what, s)));
    }
    parse_num(what, s)
}

fn parse_level(s: &str) -> Result<LevelFilter> {
    s.parse::<LevelFilter>().map_err(|_| PercolationError::config(format!("unknown log level {:?}", s)))
}

fn json_u64(constants: &Value, key: &str) -> Result<Option<u64>> {
    match constants.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_u64()
            .map(Some)
            .ok_or_else(|| PercolationError::config(format!("{} must be a non-negative integer", key))),
    }
}

fn json_str<'a>(constants: &'a Value, key: &str) -> Result<Option<&'a str>> {
    match constants.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_str()
            .map(Some)
            .ok_or_else(|| PercolationError::config(format!("{} must be a string", key))),
    }
}

impl SimulationConfig {
    /// Overlays settings from a JSON object such as
    /// `{"GRID_SIZE": 50, "TRIALS": 200, "SEED": 7, "LOG_LEVEL": "debug"}`.
    pub fn apply_json(&mut self, text: &str) -> Result<()> {
        let constants: Value = serde_json::from_str(text)?;
        if !constants.is_object() {
            return Err(PercolationError::config("config file must hold a JSON object"));
        }
        if let Some(n) = json_u64(&constants, "GRID_SIZE")? {
            self.n = n as usize;
        }
        if let Some(trials) = json_u64(&constants, "TRIALS")? {
            self.trials = trials as usize;
        }
        if let Some(seed) = json_u64(&constants, "SEED")? {
            self.seed = Some(seed);
        }
        if let Some(level) = json_str(&constants, "LOG_LEVEL")? {
            self.log_level = parse_level(level)?;
        }
        if let Some(path) = json_str(&constants, "LOG_FILE")? {
            self.log_file = Some(PathBuf::from(path));
        }
        Ok(())
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let text = fs::read_to_string(path.as_ref())?;
        debug!("loaded config from {}", path.as_ref().display());
        self.apply_json(&text)
    }

    /// Builds a config from command-line arguments (program name excluded).
    /// A `--config` file is applied first so explicit flags override it.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<SimulationConfig> {
        let args: Vec<String> = args.into_iter().collect();
        let mut config = SimulationConfig::default();

        if let Some(pos) = args.iter().position(|a| a == "--config") {
            let path = args.get(pos + 1)
                .ok_or_else(|| PercolationError::config("--config needs a file path"))?;
            config.load_file(path)?;
        }

        let mut positional = 0;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" => {
                    iter.next();
                }
                "--seed" => {
                    let v = iter.next().ok_or_else(|| PercolationError::config("--seed needs a value"))?;
                    config.seed = Some(parse_num("seed", v)?);
                }
                "--log-level" => {
                    let v = iter.next().ok_or_else(|| PercolationError::config("--log-level needs a value"))?;
                    config.log_level = parse_level(v)?;
                }
                "--log-file" => {
                    let v = iter.next().ok_or_else(|| PercolationError::config("--log-file needs a path"))?;
                    config.log_file = Some(PathBuf::from(v));
                }
                "--show" => config.show = true,
                flag if flag.starts_with("--") => {
                    return Err(PercolationError::config(format!("unknown option {}\n{}", flag, USAGE)));
                }
                value => {
                    match positional {
                        0 => config.n = parse_count("grid size", value)?,
                        1 => config.trials = parse_count("trial count", value)?,
                        _ => return Err(PercolationError::config(format!("unexpected argument {:?}\n{}", value, USAGE))),
                    }
                    positional += 1;
                }
            }
        }
        Ok(config)
    }
}
