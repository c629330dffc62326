use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ferrous_nlod::{defaults, nlod_report, NlodOpt, OdMatrix, ZeroDemandPolicy};

#[derive(Parser)]
#[command(name = "ferrous-nlod")]
#[command(about = "FerrousNLOD - Normalized Levenshtein distance for OD matrices", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the two built-in 4x4 reference matrices and print the NLOD
    Selftest {
        /// Also print the score of every origin row
        #[arg(short = 'r', long)]
        report: bool,

        /// Policy for origin rows with zero demand in both matrices: error or zero
        #[arg(short = 'z', long, value_name = "POLICY", default_value = defaults::ZERO_DEMAND_POLICY)]
        zero_demand: ZeroDemandPolicy,

        /// Process origin rows serially on the main thread
        #[arg(short = 's', long)]
        serial: bool,

        /// Verbose level: 1=error, 2=warning, 3=message, 4+=debugging
        #[arg(short = 'v', long, value_name = "INT", default_value_t = defaults::VERBOSITY)]
        verbosity: i32,

        /// Number of threads (default: all available cores)
        #[arg(short = 't', long, value_name = "INT")]
        threads: Option<usize>,
    },
}

fn init_logger(verbosity: i32) {
    let log_level = match verbosity {
        v if v <= 1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace, // 5+ = trace
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_selftest(opt: &NlodOpt, report: bool) -> Result<()> {
    let x = OdMatrix::from_flat(defaults::SELFTEST_X.to_vec())
        .context("building reference matrix X")?;
    let y = OdMatrix::from_flat(defaults::SELFTEST_Y.to_vec())
        .context("building reference matrix Y")?;

    log::info!(
        "Comparing two {}x{} reference matrices (zero-demand policy: {})",
        x.side(),
        x.side(),
        opt.zero_demand
    );

    let result = nlod_report(&x, &y, opt).context("NLOD computation failed")?;

    if report {
        for row in &result.rows {
            println!(
                "row {}\tdistance={}\tmass={}\tlocal_nlod={}",
                row.row, row.local_distance, row.demand_mass, row.local_nlod
            );
        }
    }
    println!("{}", result.nlod);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Selftest {
            report,
            zero_demand,
            serial,
            verbosity,
            threads,
        } => {
            init_logger(verbosity);

            let mut opt = NlodOpt::default().with_zero_demand(zero_demand);
            opt.parallel = !serial;

            let mut num_threads = threads.unwrap_or_else(num_cpus::get);
            if num_threads < 1 {
                log::warn!("Invalid thread count {}, using 1 thread", num_threads);
                num_threads = 1;
            }
            if num_threads > defaults::MAX_THREADS {
                log::warn!(
                    "Thread count {} exceeds maximum {}, capping",
                    num_threads,
                    defaults::MAX_THREADS
                );
                num_threads = defaults::MAX_THREADS;
            }
            opt.n_threads = num_threads;

            if let Err(errors) = opt.validate() {
                for e in errors {
                    log::error!("{}", e);
                }
                std::process::exit(1);
            }

            if opt.parallel {
                if let Err(e) = rayon::ThreadPoolBuilder::new()
                    .num_threads(opt.n_threads)
                    .build_global()
                {
                    log::warn!("Could not configure thread pool: {}", e);
                }
                log::debug!("Using {} worker threads", opt.n_threads);
            }

            if let Err(e) = run_selftest(&opt, report) {
                log::error!("{:#}", e);
                std::process::exit(1);
            }
        }
    }
}
