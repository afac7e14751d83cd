use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use study_planner::{
    current_week_number, current_week_number_at, generate_multi_week_plan_with_config,
    generate_slot_sync_with_config, generate_week_plan_with_config, parse_date, validate_slots,
    week_start_date, MultiWeekRequest, PlannerConfig, SlotSyncRequest, WeekRequest,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "study-plan",
    version,
    about = "Pack ordered study sections into weekly availability slots"
)]
struct Cli {
    /// JSON file with planner settings (missing keys use defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Accept unknown weekday names and malformed slots instead of rejecting them
    #[arg(long, global = true)]
    lenient: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project a whole resource across weeks
    Project(InputArgs),
    /// Regenerate a single week, carrying unfinished sessions forward
    Week(InputArgs),
    /// Plan only newly added slots, continuing from existing sessions
    Sync(InputArgs),
    /// Print the current week number of a plan
    CurrentWeek {
        /// Plan start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Date to treat as today (defaults to the current date in --timezone)
        #[arg(long)]
        today: Option<String>,

        /// IANA timezone used to resolve today's date
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Request JSON file (reads stdin if omitted or "-")
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Serialize)]
struct CurrentWeek {
    week_number: u32,
    week_start_date: NaiveDate,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Project(args) => {
            let request: MultiWeekRequest = read_request(args.input.as_deref())?;
            if !cli.lenient {
                validate_slots(&request.slots).context("invalid availability slot")?;
            }
            let result = generate_multi_week_plan_with_config(&request, &config);
            write_json(&result, cli.pretty)
        }
        Command::Week(args) => {
            let request: WeekRequest = read_request(args.input.as_deref())?;
            if !cli.lenient {
                validate_slots(&request.slots).context("invalid availability slot")?;
            }
            let result = generate_week_plan_with_config(&request, &config);
            write_json(&result, cli.pretty)
        }
        Command::Sync(args) => {
            let request: SlotSyncRequest = read_request(args.input.as_deref())?;
            if !cli.lenient {
                validate_slots(&request.new_slots).context("invalid availability slot")?;
            }
            let result = generate_slot_sync_with_config(&request, &config);
            write_json(&result, cli.pretty)
        }
        Command::CurrentWeek {
            start,
            today,
            timezone,
        } => {
            let start = parse_date(&start).context("invalid --start")?;
            let week_number = match today {
                Some(today) => {
                    current_week_number(start, parse_date(&today).context("invalid --today")?)
                }
                None => current_week_number_at(start, Utc::now(), &timezone)?,
            };
            let output = CurrentWeek {
                week_number,
                week_start_date: week_start_date(start, week_number),
            };
            write_json(&output, cli.pretty)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: PlannerConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.validate()?;
    tracing::debug!(?config, "loaded planner config");
    Ok(config)
}

fn read_request<T: DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let text = match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p)
            .with_context(|| format!("failed to read input {}", p.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("failed to parse request JSON")
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}
