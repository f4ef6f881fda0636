use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dilation::format::format_report;
use dilation::numeric::DEFAULT_PRECISION;
use dilation::{CalculationRequest, DistanceUnit, NumericContext, SpeedOfLightUnit, calculate};
use dilation::{metrics, tui};

/// Dilation - relativistic time dilation at 200+ digits of precision
#[derive(Parser)]
#[command(name = "dilation", about = "High-precision relativistic time dilation calculator")]
struct Cli {
    /// Significant digits carried through every calculation
    #[arg(long, global = true, default_value_t = DEFAULT_PRECISION)]
    precision: u64,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one calculation and print the report
    Calc {
        /// Velocity as a percentage of c
        #[arg(long, allow_hyphen_values = true)]
        velocity: String,
        /// Time on Earth in years
        #[arg(long, conflicts_with = "distance", required_unless_present = "distance")]
        years: Option<String>,
        /// Distance to travel, in --unit
        #[arg(long)]
        distance: Option<String>,
        /// ly, km or mi
        #[arg(long, default_value = "ly")]
        unit: DistanceUnit,
        /// m/s, cm/s, mm/s, μm/s (um/s) or nm/s
        #[arg(long, default_value = "m/s")]
        c_unit: SpeedOfLightUnit,
    },
    /// Run interactive TUI calculator
    Tui,
    /// Sweep velocities across (0, 100)% of c and export to CSV
    Sweep {
        /// Time on Earth in years
        #[arg(long, default_value = "1")]
        years: String,
        /// Number of intervals; velocities are 100*i/steps for i in 1..steps
        #[arg(long, default_value_t = 100)]
        steps: u32,
        #[arg(long, default_value = "m/s")]
        c_unit: SpeedOfLightUnit,
        #[arg(long, default_value = "metrics.csv")]
        csv: PathBuf,
        /// Also plot the sweep to this SVG file
        #[arg(long)]
        plot: Option<PathBuf>,
    },
}

fn init_tracing(cli: &Cli, interactive: bool) -> Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match &cli.log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // stderr output would tear the alternate screen
        None if interactive => {}
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_tracing(&cli, interactive)?;

    let ctx = NumericContext::new(cli.precision)?;

    match cli.command {
        Some(Commands::Calc {
            velocity,
            years,
            distance,
            unit,
            c_unit,
        }) => {
            let request = match (years, distance) {
                (Some(years), _) => CalculationRequest::time(&velocity, &years, c_unit),
                (None, Some(distance)) => {
                    CalculationRequest::distance(&velocity, &distance, unit, c_unit)
                }
                (None, None) => anyhow::bail!("either --years or --distance is required"),
            };
            let result = calculate(&ctx, &request)?;
            println!("{}", format_report(&ctx, &result));
        }
        Some(Commands::Sweep {
            years,
            steps,
            c_unit,
            csv,
            plot,
        }) => run_sweep(&ctx, &years, steps, c_unit, &csv, plot.as_deref())?,
        Some(Commands::Tui) | None => tui::start(&ctx)?, // default
    }

    Ok(())
}

fn run_sweep(
    ctx: &NumericContext,
    years: &str,
    steps: u32,
    c_unit: SpeedOfLightUnit,
    csv: &std::path::Path,
    plot: Option<&std::path::Path>,
) -> Result<()> {
    let years = ctx.parse(years, "time")?;
    let log = metrics::sweep(ctx, &years, steps, c_unit)?;
    metrics::export_csv(ctx, csv, &log)?;
    println!("✅ Metrics written to {}", csv.display());

    if let Some(plot) = plot {
        metrics::plot_results(ctx, plot, &log)?;
        println!("✅ Plot written to {}", plot.display());
    }

    info!(points = log.len(), "sweep finished");
    Ok(())
}
