use clap::{crate_version, Parser};
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use polysecret::config::SolverConfig;
use polysecret::constants::DEFAULT_CONFIG_DIR;
use polysecret::error::Error as SolveError;
use polysecret::solver::{solve, solve_batch, SolveOptions, SolveOutput};

#[derive(Debug, Parser)]
#[command(name = "polysecret")]
#[command(version = crate_version!())]
#[command(
    about = "Recover a threshold secret from base-encoded shares",
    long_about = "polysecret reads test cases describing a (k, n) threshold scheme, decodes each share from its own base, reconstructs the secret by Lagrange interpolation at x = 0 using exact rational arithmetic, and checks every share against the reconstructed polynomial. A file may hold a single test case object or an array of them. Results are written to stdout as JSON; a failing test case is reported in its own record and does not stop the others. Settings are read from conf.toml in the config directory and can be overridden with POLYSECRET_* environment variables."
)]
enum CliArgument {
    /// Solve the test cases in one or more JSON files.
    Solve {
        /// Files holding a test case object or an array of test cases.
        #[clap(required = true)]
        files: Vec<PathBuf>,

        /// Tolerance for cross-validation, overrides the config file.
        #[clap(long, short)]
        tolerance: Option<f64>,

        /// Pretty-print the JSON output.
        #[clap(long, short)]
        pretty: bool,
    },
    /// Write a default conf.toml into the config directory.
    Init,
}

#[derive(Parser, Debug)]
#[clap(name = "polysecret")]
struct Opt {
    /// Directory holding conf.toml.
    #[clap(long, short, global = true)]
    config_dir: Option<PathBuf>,

    /// Subcommand to run.
    #[clap(subcommand)]
    argument: CliArgument,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Outcome {
    Single(SolveOutput),
    Batch(Vec<polysecret::solver::BatchEntry>),
}

#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    result: Outcome,
}

fn solve_file(path: &Path, options: &SolveOptions) -> Outcome {
    let input = fs::read_to_string(path)
        .map_err(|e| SolveError::MalformedTestCase(format!("cannot read file: {e}")))
        .and_then(|text| {
            serde_json::from_str::<Value>(&text)
                .map_err(|e| SolveError::MalformedTestCase(format!("invalid JSON: {e}")))
        });

    match input {
        Ok(Value::Array(cases)) => {
            debug!("{}: batch of {} test cases", path.display(), cases.len());
            Outcome::Batch(solve_batch(&cases, options))
        }
        Ok(case) => Outcome::Single(solve(&case, options)),
        Err(err) => {
            error!("{}: {}", path.display(), err);
            Outcome::Single((&err).into())
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let opt = Opt::parse();
    let config_dir = opt
        .config_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

    match opt.argument {
        CliArgument::Init => {
            let path = SolverConfig::write_default(&config_dir)?;
            println!("📝 Config at {}", path.display());
        }

        CliArgument::Solve {
            files,
            tolerance,
            pretty,
        } => {
            let config = SolverConfig::load(&config_dir)?;
            let mut options = config.solve_options();
            if let Some(tolerance) = tolerance {
                options.tolerance = tolerance;
            }
            debug!("Using tolerance: {}", options.tolerance);

            let reports: Vec<FileReport> = files
                .iter()
                .map(|path| FileReport {
                    file: path.display().to_string(),
                    result: solve_file(path, &options),
                })
                .collect();

            let out = if pretty || config.pretty {
                serde_json::to_string_pretty(&reports)?
            } else {
                serde_json::to_string(&reports)?
            };
            println!("{out}");
        }
    }

    Ok(())
}
