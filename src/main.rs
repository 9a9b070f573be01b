use std::path::PathBuf;

use anyhow::{Context, Result};
use bedshift::plan::config::{PlanOverrides, PlanSettings, load_plan_config};
use bedshift::report::{render_json, render_text};
use bedshift::{ModePolicy, TimeDisplayMode, generate};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliMode {
    Auto,
    Later,
    Earlier,
}

impl From<CliMode> for ModePolicy {
    fn from(value: CliMode) -> Self {
        match value {
            CliMode::Auto => ModePolicy::Automatic,
            CliMode::Later => ModePolicy::ForceLater,
            CliMode::Earlier => ModePolicy::ForceEarlier,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliClock {
    #[value(name = "12h")]
    Hour12,
    #[value(name = "24h")]
    Hour24,
}

impl From<CliClock> for TimeDisplayMode {
    fn from(value: CliClock) -> Self {
        match value {
            CliClock::Hour12 => TimeDisplayMode::Hour12,
            CliClock::Hour24 => TimeDisplayMode::Hour24,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "bedshift",
    version,
    about = "Plan a night-by-night shift from your current bedtime to a target bedtime"
)]
struct Cli {
    /// JSON plan file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Last bedtime, e.g. "7:00 AM", "0700" or "730p"
    #[arg(long, alias = "last-bedtime")]
    bedtime: Option<String>,

    /// Target bedtime
    #[arg(long)]
    target: Option<String>,

    /// Hours of sleep per night; fractions are rounded to the nearest minute
    #[arg(long, conflicts_with = "sleep_minutes", allow_negative_numbers = true)]
    sleep_hours: Option<f64>,

    /// Minutes of sleep per night
    #[arg(long, allow_negative_numbers = true)]
    sleep_minutes: Option<i64>,

    /// Largest shift allowed in one night, in hours
    #[arg(
        long,
        visible_alias = "max-change",
        conflicts_with = "max_shift_minutes",
        allow_negative_numbers = true
    )]
    max_shift_hours: Option<f64>,

    /// Largest shift allowed in one night, in minutes
    #[arg(long, allow_negative_numbers = true)]
    max_shift_minutes: Option<i64>,

    /// Direction policy: shortest path, or always later / always earlier
    #[arg(long, value_enum)]
    mode: Option<CliMode>,

    /// Show times on a 12-hour or 24-hour clock
    #[arg(long, value_enum)]
    clock: Option<CliClock>,

    /// Print the plan as text or JSON
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = match cli.config.as_deref() {
        Some(path) => load_plan_config(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => PlanSettings::default(),
    };
    settings.apply(PlanOverrides {
        bedtime: cli.bedtime,
        target: cli.target,
        sleep_hours: cli.sleep_hours,
        sleep_minutes: cli.sleep_minutes,
        max_shift_hours: cli.max_shift_hours,
        max_shift_minutes: cli.max_shift_minutes,
        mode: cli.mode.map(Into::into),
        clock: cli.clock.map(Into::into),
    })?;
    tracing::debug!(
        bedtime = %settings.bedtime,
        target = %settings.target,
        sleep_minutes = settings.sleep_duration_minutes,
        max_shift_minutes = settings.max_shift_minutes,
        mode = ?settings.mode,
        "resolved plan inputs"
    );

    let result = generate(&settings.step_config())?;
    tracing::info!(
        direction = %result.resolved_direction,
        nights = result.nights(),
        "generated plan"
    );

    let rendered = match cli.format {
        OutputFormat::Text => render_text(&result, settings.clock),
        OutputFormat::Json => render_json(&result, settings.clock)?,
    };
    print!("{rendered}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
