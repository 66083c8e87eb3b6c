// GBM path simulator - command line driver
// With no arguments, simulates one path with the reference parameters
// (S0=100, mu=0.05, sigma=0.2, T=1, dt=0.01) and prints it to stdout.

use clap::{Parser, Subcommand};
use gbm_sim::{
    estimate_parameters, format_general, load_close_prices, simulate_batch_with, write_path, write_paths,
    BatchProgress, EuropeanOption, GaussianNoise, HestonModel, ModelKind, OptionType, OutputFormat,
    PathModel, SabrModel, SimulationConfig, SimulationError, SimulationResult, TRADING_DAYS_PER_YEAR,
};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, Level};

#[derive(Parser)]
#[command(name = "gbm-sim")]
#[command(version = "0.1.0")]
#[command(about = "Simulate asset price paths under Geometric Brownian Motion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Price process to simulate
    #[arg(short, long, value_enum)]
    model: Option<ModelKind>,

    /// Initial price S0
    #[arg(long, allow_negative_numbers = true)]
    initial_price: Option<f64>,

    /// Drift rate mu
    #[arg(long, allow_negative_numbers = true)]
    drift: Option<f64>,

    /// Volatility sigma
    #[arg(long, allow_negative_numbers = true)]
    volatility: Option<f64>,

    /// Time horizon T
    #[arg(long, allow_negative_numbers = true)]
    horizon: Option<f64>,

    /// Time step dt
    #[arg(long, allow_negative_numbers = true)]
    time_step: Option<f64>,

    /// CSV of closing prices to fit drift and volatility from
    #[arg(long)]
    history: Option<PathBuf>,

    /// Return periods per year in the --history file
    #[arg(long, allow_negative_numbers = true, default_value_t = TRADING_DAYS_PER_YEAR)]
    periods_per_year: f64,

    /// Number of independent paths to simulate
    #[arg(short, long)]
    paths: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Hide the progress bar for multi-path runs
    #[arg(long)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option with the Black-Scholes formula
    Price {
        /// Current price of the underlying
        #[arg(long, allow_negative_numbers = true)]
        spot: f64,
        /// Strike price
        #[arg(long, allow_negative_numbers = true)]
        strike: f64,
        /// Time to maturity in years
        #[arg(long, allow_negative_numbers = true)]
        maturity: f64,
        /// Continuously compounded risk-free rate
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
        /// Volatility of the underlying
        #[arg(long, allow_negative_numbers = true)]
        volatility: f64,
        /// Call or put
        #[arg(long, value_enum, default_value_t = OptionType::Call)]
        option_type: OptionType,
    },
    /// Fit annualised drift and volatility to a CSV of closing prices
    Estimate {
        /// CSV file with a header row and a 'Close' column
        file: PathBuf,
        /// Return periods per year (252 for daily closes)
        #[arg(long, allow_negative_numbers = true, default_value_t = TRADING_DAYS_PER_YEAR)]
        periods_per_year: f64,
    },
}

impl Cli {
    /// Precedence: CLI flag, then --history estimate, then config file, then defaults
    fn apply_overrides(&self, config: &mut SimulationConfig) -> SimulationResult<()> {
        if let Some(history) = &self.history {
            let prices = load_close_prices(history)?;
            let estimate = estimate_parameters(&prices, self.periods_per_year)?;
            info!(
                "📊 Fitted drift={} volatility={} from {} returns",
                estimate.drift, estimate.volatility, estimate.observations
            );
            estimate.apply_to(&mut config.model);
        }

        let model = &mut config.model;
        if let Some(v) = self.initial_price { model.initial_price = v; }
        if let Some(v) = self.drift { model.drift = v; }
        if let Some(v) = self.volatility { model.volatility = v; }
        if let Some(v) = self.horizon { model.horizon = v; }
        if let Some(v) = self.time_step { model.time_step = v; }

        if let Some(kind) = self.model { config.run.model = kind; }
        if let Some(n) = self.paths { config.run.paths = n; }
        if let Some(format) = self.format { config.output.format = format; }
        if self.no_progress { config.run.show_progress = false; }
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load config before logging so the configured level can be used
    let loaded = SimulationConfig::load_or_default(cli.config.as_deref());

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        loaded
            .as_ref()
            .ok()
            .and_then(|c| c.logging.level.parse::<Level>().ok())
            .unwrap_or(Level::INFO)
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    let result = loaded
        .map_err(SimulationError::from)
        .and_then(|mut config| match &cli.command {
            Some(Commands::Price { spot, strike, maturity, rate, volatility, option_type }) => {
                let option = EuropeanOption {
                    spot: *spot,
                    strike: *strike,
                    maturity: *maturity,
                    rate: *rate,
                    volatility: *volatility,
                    option_type: *option_type,
                };
                run_price(&option)
            }
            Some(Commands::Estimate { file, periods_per_year }) => run_estimate(file, *periods_per_year),
            None => {
                cli.apply_overrides(&mut config)?;
                run(&config)
            }
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(category = e.category(), "❌ Command failed: {}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(config: &SimulationConfig) -> SimulationResult<()> {
    config.validate()?;

    let params = config.model;
    info!(
        "🚀 {:?} simulation: S0={} mu={} sigma={} T={} dt={} ({} steps)",
        config.run.model,
        params.initial_price,
        params.drift,
        params.volatility,
        params.horizon,
        params.time_step,
        params.step_count()
    );

    match config.run.model {
        ModelKind::Gbm => simulate_and_write(&params, config),
        ModelKind::Heston => simulate_and_write(&HestonModel::new(params, config.heston), config),
        ModelKind::Sabr => simulate_and_write(&SabrModel::new(params, config.sabr), config),
    }
}

/// Sample and print paths for a model the config has already validated
fn simulate_and_write<M: PathModel>(model: &M, config: &SimulationConfig) -> SimulationResult<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if config.run.paths == 1 {
        let path = model.sample_path(&mut GaussianNoise::from_entropy())?;
        write_path(&mut out, &path, config.output.format)?;
    } else {
        let progress = if config.run.show_progress {
            BatchProgress::new(config.run.paths)
        } else {
            BatchProgress::hidden()
        };
        let paths = simulate_batch_with(model, config.run.paths, GaussianNoise::from_entropy, Some(&progress))?;
        write_paths(&mut out, &paths, config.output.format)?;
    }

    out.flush()?;
    debug!("output flushed");
    Ok(())
}

fn run_price(option: &EuropeanOption) -> SimulationResult<()> {
    let price = option.price()?;
    info!("💰 {:?} option price: {}", option.option_type, price);
    println!("{}", format_general(price));
    Ok(())
}

fn run_estimate(file: &Path, periods_per_year: f64) -> SimulationResult<()> {
    let prices = load_close_prices(file)?;
    let estimate = estimate_parameters(&prices, periods_per_year)?;

    // TOML lines that can be pasted into the [model] section
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "drift = {}", estimate.drift)?;
    writeln!(out, "volatility = {}", estimate.volatility)?;
    writeln!(out, "# from {} log returns", estimate.observations)?;
    Ok(())
}
