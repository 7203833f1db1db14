//! shiftline: keeps the status column of a shift sheet in step with the clock.
//!
//! ## Subcommands
//!
//! - `sync`: one reconciliation pass, then print the board (or one shift's segments)
//! - `watch`: reconcile on an interval; SIGHUP runs a visibility sweep
//! - `classify`: smart status for shifts in a local JSON file (no writes)
//! - `add` / `edit`: write a single-segment shift, then reload
//! - `duration`: hours between two clock times
//! - `pick`: spin the hour/minute/AM-PM wheels from a starting time
//! - `delete` / `complete`: single-shift writes
//! - `config init`: write the resolved settings to the config file

mod http;
mod logging;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use fs_err as fs;
use shift_core::time::{duration_hours, round_hours};
use shift_core::board::shifts_by_date;
use shift_core::{
    detect, get_config_path, load_config, reduce, save_config, BoardAction, BoardState, Clock,
    EditError, Identity, PassOutcome, Reconciler, Shift, ShiftApi, ShiftError, ShiftlineConfig,
    SystemClock, TimePicker, Trigger,
};
use shiftline_protocol::Response;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::http::{shifts_from_response, HttpShiftApi};

#[derive(Parser)]
#[command(name = "shiftline")]
#[command(about = "Shift status reconciliation for the shift sheet")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.shiftline/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the sheet web-app URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Override the employee id
    #[arg(long, global = true)]
    employee_id: Option<String>,

    /// Override the IANA time zone (e.g. Asia/Kolkata)
    #[arg(long, global = true)]
    timezone: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one reconciliation pass and print the board
    Sync {
        /// Print every date from the start of this month, not just shifts
        #[arg(long)]
        calendar: bool,

        /// Print the pass outcome as JSON
        #[arg(long)]
        json: bool,

        /// Show the time segments of one shift instead of the board
        #[arg(long, value_name = "SHIFT_ID", conflicts_with = "json")]
        view: Option<String>,
    },

    /// Reconcile repeatedly until interrupted
    Watch {
        /// Seconds between passes (defaults to poll_interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Classify shifts from a JSON file without touching the sheet
    Classify {
        /// Array of shift rows, or a full `{ success, data }` response
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Local time to classify against, "YYYY-MM-DD HH:MM"
        #[arg(long)]
        now: Option<String>,
    },

    /// Hours between two HH:MM clock times, wrapping past midnight
    Duration {
        #[arg(value_name = "START")]
        start: String,
        #[arg(value_name = "END")]
        end: String,
    },

    /// Add a shift on a date that has none
    Add {
        /// Shift date, YYYY-MM-DD
        #[arg(value_name = "DATE")]
        date: String,

        /// First start time, HH:MM
        #[arg(long)]
        start: String,

        /// Last end time, HH:MM
        #[arg(long)]
        end: String,

        #[arg(long)]
        shift_type: Option<String>,
    },

    /// Replace a shift's segments with one start-to-end segment
    Edit {
        #[arg(value_name = "SHIFT_ID")]
        shift_id: String,

        /// New start time, HH:MM (keeps the current one when omitted)
        #[arg(long)]
        start: Option<String>,

        /// New end time, HH:MM (keeps the current one when omitted)
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        shift_type: Option<String>,
    },

    /// Spin the time picker wheels and print where they land
    Pick {
        /// Starting time, HH:MM
        #[arg(value_name = "TIME")]
        value: String,

        /// Initial hour wheel velocity, pixels per frame
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        hour_fling: f64,

        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        minute_fling: f64,

        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        period_fling: f64,
    },

    /// Delete a shift
    Delete {
        #[arg(value_name = "SHIFT_ID")]
        shift_id: String,
    },

    /// Mark a shift completed
    Complete {
        #[arg(value_name = "SHIFT_ID")]
        shift_id: String,

        /// Shift date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write the resolved settings (file, environment, flags) to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Frames a flung wheel may spin before it is stopped.
const PICK_MAX_FRAMES: usize = 1_000;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] ShiftError),

    #[error("Invalid {field}: {value}")]
    InvalidArgument { field: &'static str, value: String },

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("No shift with id {0}")]
    UnknownShift(String),

    #[error("{date} already has shift {shift_id}; use `edit` instead")]
    ShiftExists { date: NaiveDate, shift_id: String },

    #[error("Config file already exists at {0}; pass --force to overwrite")]
    ConfigExists(PathBuf),

    #[error("{action} rejected: {message}")]
    Rejected {
        action: &'static str,
        message: String,
    },

    #[error("Signal handling failed: {0}")]
    Signal(std::io::Error),
}

type CliResult<T> = std::result::Result<T, CliError>;

#[tokio::main]
async fn main() {
    let _logging_guard = logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "shiftline failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Duration { start, end } => {
            let hours = round_hours(duration_hours(&start, &end));
            println!("{:.2}", hours);
            Ok(())
        }
        Commands::Pick {
            value,
            hour_fling,
            minute_fling,
            period_fling,
        } => {
            println!("{}", pick(&value, [hour_fling, minute_fling, period_fling]));
            Ok(())
        }
        Commands::Classify { file, now } => classify_file(&config, &file, now.as_deref()),
        Commands::Sync {
            calendar,
            json,
            view,
        } => sync(&config, calendar, json, view).await,
        Commands::Add {
            date,
            start,
            end,
            shift_type,
        } => {
            let target = EditTarget::New(parse_date(&date)?);
            let fields = EditFields {
                start: Some(start),
                end: Some(end),
                shift_type,
            };
            save_edit(&config, target, fields).await
        }
        Commands::Edit {
            shift_id,
            start,
            end,
            shift_type,
        } => {
            let fields = EditFields {
                start,
                end,
                shift_type,
            };
            save_edit(&config, EditTarget::Existing(shift_id), fields).await
        }
        Commands::Config {
            action: ConfigCommand::Init { force },
        } => {
            let path = match cli.config {
                Some(path) => path,
                None => get_config_path().ok_or(ShiftError::HomeDirNotFound)?,
            };
            init_config(&config, &path, force)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Commands::Watch { interval } => {
            let secs = interval.unwrap_or(config.poll_interval_secs).max(1);
            watch(&config, Duration::from_secs(secs)).await
        }
        Commands::Delete { shift_id } => {
            let api = http_api(&config)?;
            let outcome = api.delete_shift(&shift_id).await?;
            if !outcome.success {
                return Err(CliError::Rejected {
                    action: "delete",
                    message: outcome.message,
                });
            }
            let state = BoardState::default();
            let state = reduce(state, BoardAction::ShiftDeleted(shift_id));
            println!("{}", state.message);
            Ok(())
        }
        Commands::Complete { shift_id, date } => {
            let date = date.as_deref().map(parse_date).transpose()?;
            let api = http_api(&config)?;
            let outcome = api
                .complete_shift(&shift_id, &config.identity()?, date)
                .await?;
            if !outcome.success {
                return Err(CliError::Rejected {
                    action: "complete",
                    message: outcome.message,
                });
            }
            println!("{}", outcome.message);
            Ok(())
        }
    }
}

/// File values, then `SHIFTLINE_*` environment variables, then flags.
fn resolve_config(cli: &Cli) -> CliResult<ShiftlineConfig> {
    let mut config = load_config(cli.config.clone())?.with_overrides(|key| std::env::var(key).ok());
    if let Some(url) = &cli.api_url {
        config.api_url = Some(url.clone());
    }
    if let Some(id) = &cli.employee_id {
        config.employee_id = Some(id.clone());
    }
    if let Some(tz) = &cli.timezone {
        config.timezone = tz.clone();
    }
    Ok(config)
}

fn http_api(config: &ShiftlineConfig) -> CliResult<HttpShiftApi> {
    let api = HttpShiftApi::new(
        config.api_url()?,
        Duration::from_secs(config.request_timeout_secs),
        config.tz()?,
    )?;
    Ok(api)
}

fn reconciler(config: &ShiftlineConfig) -> CliResult<Reconciler<HttpShiftApi, SystemClock>> {
    let identity: Identity = config.identity()?;
    Ok(Reconciler::new(
        http_api(config)?,
        SystemClock::new(config.tz()?),
        identity,
    ))
}

fn parse_date(value: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CliError::InvalidArgument {
        field: "date",
        value: value.to_string(),
    })
}

fn parse_now(value: &str) -> CliResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d %H:%M").map_err(|_| {
        CliError::InvalidArgument {
            field: "now",
            value: value.to_string(),
        }
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

async fn sync(
    config: &ShiftlineConfig,
    calendar: bool,
    json: bool,
    view: Option<String>,
) -> CliResult<()> {
    let reconciler = reconciler(config)?;
    let state = reduce(BoardState::default(), BoardAction::LoadStarted);

    let outcome = match reconciler.handle(Trigger::Load).await {
        Ok(outcome) => outcome,
        Err(err) => {
            let state = reduce(state, BoardAction::LoadFailed(err.to_string()));
            println!("{}", state.message);
            return Err(err.into());
        }
    };

    if json {
        let text = serde_json::to_string_pretty(&outcome).map_err(|source| ShiftError::Json {
            context: "pass outcome".to_string(),
            source,
        })?;
        println!("{}", text);
        return Ok(());
    }

    match outcome {
        PassOutcome::Completed(load) => {
            let state = reduce(state, BoardAction::Loaded(load));
            match view {
                Some(shift_id) => {
                    let state = reduce(state, BoardAction::ViewSegments(shift_id.clone()));
                    let shift = state
                        .viewing_shift()
                        .ok_or(CliError::UnknownShift(shift_id))?;
                    print!("{}", render::segments(shift));
                }
                None => {
                    let today = reconciler.now().date();
                    print!("{}", render::board(&state, calendar.then_some(today)));
                }
            }
        }
        PassOutcome::Skipped { trigger } => {
            warn!(trigger = trigger.as_str(), "Pass skipped");
        }
    }
    Ok(())
}

enum EditTarget {
    New(NaiveDate),
    Existing(String),
}

/// Form values from the command line; `None` keeps what the form opened with.
#[derive(Default)]
struct EditFields {
    start: Option<String>,
    end: Option<String>,
    shift_type: Option<String>,
}

/// Opens the edit form over `shifts` and fills it in.
fn open_edit(shifts: Vec<Shift>, target: EditTarget, fields: EditFields) -> CliResult<BoardState> {
    let state = BoardState {
        shifts,
        ..Default::default()
    };

    let open = match target {
        EditTarget::New(date) => {
            if let Some(existing) = shifts_by_date(&state.shifts).get(&date) {
                return Err(CliError::ShiftExists {
                    date,
                    shift_id: existing.shift_id.clone(),
                });
            }
            BoardAction::NewShift(date)
        }
        EditTarget::Existing(shift_id) => {
            let shift = state
                .shifts
                .iter()
                .find(|shift| shift.shift_id == shift_id)
                .cloned()
                .ok_or(CliError::UnknownShift(shift_id))?;
            BoardAction::OpenEdit(shift)
        }
    };

    let mut state = reduce(state, open);
    if let Some(start) = fields.start {
        state = reduce(state, BoardAction::SetEditStart(start));
    }
    if let Some(end) = fields.end {
        state = reduce(state, BoardAction::SetEditEnd(end));
    }
    if let Some(shift_type) = fields.shift_type {
        state = reduce(state, BoardAction::SetShiftType(shift_type));
    }
    Ok(state)
}

async fn save_edit(config: &ShiftlineConfig, target: EditTarget, fields: EditFields) -> CliResult<()> {
    let reconciler = reconciler(config)?;
    let shifts = reconciler
        .api()
        .fetch_shifts(reconciler.identity(), true)
        .await?;

    let state = open_edit(shifts, target, fields)?;
    let plan = match state.editing.as_ref() {
        Some(form) => form.plan(reconciler.now())?,
        None => return Ok(()),
    };

    let saved = reconciler.save_edit(&plan).await?;
    if !saved.write.success {
        return Err(CliError::Rejected {
            action: if saved.created { "add" } else { "edit" },
            message: saved.write.message,
        });
    }

    let state = reduce(state, BoardAction::EditSaved { created: saved.created });
    println!("{}", state.message);
    match saved.refresh {
        Some(PassOutcome::Completed(load)) => {
            let state = reduce(state, BoardAction::Loaded(load));
            print!("{}", render::board(&state, None));
        }
        Some(PassOutcome::Skipped { trigger }) => {
            debug!(trigger = trigger.as_str(), "Reload after edit skipped");
        }
        None => {}
    }
    Ok(())
}

/// Flings the hour, minute and AM/PM wheels (in that order) and lets them settle.
fn pick(value: &str, flings: [f64; 3]) -> String {
    let mut picker = TimePicker::new(value);
    let [hours, minutes, period] = flings;
    picker.hours.fling(hours);
    picker.minutes.fling(minutes);
    picker.period.fling(period);
    picker.settle(PICK_MAX_FRAMES);
    picker.clock_time()
}

fn init_config(config: &ShiftlineConfig, path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists(path.to_path_buf()));
    }
    save_config(config, path)?;
    info!(path = %path.display(), "Config written");
    Ok(())
}

async fn watch(config: &ShiftlineConfig, interval: Duration) -> CliResult<()> {
    let reconciler = Arc::new(reconciler(config)?);
    let (tx, mut rx) = mpsc::channel::<Trigger>(8);
    spawn_visibility_listener(tx)?;

    info!(interval_secs = interval.as_secs(), "Watching shift statuses");
    let mut ticker = tokio::time::interval(interval);
    let mut first = true;

    loop {
        let trigger = tokio::select! {
            _ = ticker.tick() => {
                if std::mem::take(&mut first) { Trigger::Load } else { Trigger::Refresh }
            }
            Some(trigger) = rx.recv() => trigger,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted; stopping");
                break;
            }
        };

        let reconciler = reconciler.clone();
        tokio::spawn(async move {
            match reconciler.handle(trigger).await {
                Ok(PassOutcome::Completed(load)) => println!("{}", load.message),
                Ok(PassOutcome::Skipped { trigger }) => {
                    debug!(trigger = trigger.as_str(), "Pass skipped")
                }
                Err(err) => {
                    let state = reduce(BoardState::default(), BoardAction::LoadFailed(err.to_string()));
                    println!("{}", state.message);
                }
            }
        });
    }
    Ok(())
}

/// SIGHUP stands in for "the view became visible again".
#[cfg(unix)]
fn spawn_visibility_listener(tx: mpsc::Sender<Trigger>) -> CliResult<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup()).map_err(CliError::Signal)?;
    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            if tx.send(Trigger::VisibilityRegained).await.is_err() {
                break;
            }
        }
    });
    Ok(())
}

#[cfg(not(unix))]
fn spawn_visibility_listener(_tx: mpsc::Sender<Trigger>) -> CliResult<()> {
    Ok(())
}

fn classify_file(config: &ShiftlineConfig, file: &Path, now: Option<&str>) -> CliResult<()> {
    let tz = config.tz()?;
    let now = match now {
        Some(value) => parse_now(value)?,
        None => SystemClock::new(tz).now(),
    };

    let content = fs::read_to_string(file).map_err(|source| ShiftError::Io {
        context: format!("reading {}", file.display()),
        source,
    })?;
    let response = parse_rows_file(&content)?;
    let shifts = shifts_from_response(&response, tz)?;

    let reports: Vec<_> = shifts
        .iter()
        .map(|shift| (shift, detect(shift, now)))
        .collect();
    print!("{}", render::classifications(&reports));
    Ok(())
}

/// Accepts either a bare array of rows or a full response envelope.
fn parse_rows_file(content: &str) -> CliResult<Response> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|source| ShiftError::Json {
            context: "shift rows file".to_string(),
            source,
        })?;
    if value.get("success").is_some() {
        let response = serde_json::from_value(value).map_err(|source| ShiftError::Json {
            context: "shift rows file".to_string(),
            source,
        })?;
        return Ok(response);
    }
    Ok(Response::ok(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["shiftline", "duration", "23:30", "00:30"]).unwrap();
        assert!(matches!(cli.command, Commands::Duration { .. }));

        let cli = Cli::try_parse_from([
            "shiftline",
            "classify",
            "rows.json",
            "--now",
            "2026-10-16 18:00",
            "--timezone",
            "UTC",
        ])
        .unwrap();
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
        assert!(matches!(cli.command, Commands::Classify { .. }));
    }

    #[test]
    fn test_cli_parses_edit_commands() {
        let cli = Cli::try_parse_from([
            "shiftline", "add", "2026-10-16", "--start", "09:00", "--end", "17:00",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Add { shift_type: None, .. }));

        let cli = Cli::try_parse_from(["shiftline", "edit", "SH-1", "--end", "18:00"]).unwrap();
        match cli.command {
            Commands::Edit { shift_id, start, end, .. } => {
                assert_eq!(shift_id, "SH-1");
                assert_eq!(start, None);
                assert_eq!(end.as_deref(), Some("18:00"));
            }
            _ => panic!("expected edit"),
        }

        let cli = Cli::try_parse_from(["shiftline", "pick", "09:00", "--minute-fling", "-25"]).unwrap();
        assert!(matches!(cli.command, Commands::Pick { minute_fling, .. } if minute_fling == -25.0));

        let cli = Cli::try_parse_from(["shiftline", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config { action: ConfigCommand::Init { force: true } }
        ));

        assert!(Cli::try_parse_from(["shiftline", "sync", "--view", "SH-1", "--json"]).is_err());
    }

    fn existing() -> Shift {
        Shift {
            shift_id: "SH-1".to_string(),
            shift_date: NaiveDate::from_ymd_opt(2026, 10, 16),
            segments: vec![shift_core::Segment::new("09:00", Some("17:00"))],
            shift_type: "Regular".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_refuses_a_taken_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let result = open_edit(vec![existing()], EditTarget::New(date), EditFields::default());
        assert!(matches!(result, Err(CliError::ShiftExists { shift_id, .. }) if shift_id == "SH-1"));

        let free = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let state = open_edit(vec![existing()], EditTarget::New(free), EditFields::default()).unwrap();
        let form = state.editing.unwrap();
        assert!(form.is_new());
        assert_eq!(form.shift_type, "Regular");
    }

    #[test]
    fn test_edit_keeps_unset_fields() {
        let fields = EditFields {
            end: Some("18:30".to_string()),
            ..Default::default()
        };
        let state = open_edit(vec![existing()], EditTarget::Existing("SH-1".to_string()), fields).unwrap();
        let form = state.editing.unwrap();
        assert_eq!(form.shift_id.as_deref(), Some("SH-1"));
        assert_eq!(form.first_start_time, "09:00");
        assert_eq!(form.last_end_time, "18:30");

        let plan = form
            .plan(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(20, 0, 0).unwrap())
            .unwrap();
        assert_eq!(plan.total_duration, 9.5);
    }

    #[test]
    fn test_edit_unknown_shift() {
        let result = open_edit(
            vec![existing()],
            EditTarget::Existing("SH-404".to_string()),
            EditFields::default(),
        );
        assert!(matches!(result, Err(CliError::UnknownShift(id)) if id == "SH-404"));
    }

    #[test]
    fn test_pick_settles_flung_wheels() {
        assert_eq!(pick("09:15", [0.0, 0.0, 0.0]), "09:15");
        // A hard fling on AM/PM always lands on PM.
        assert_eq!(pick("09:15", [0.0, 0.0, 60.0]), "21:15");
        // Flinging back past the first minute clamps to :00.
        assert_eq!(pick("09:15", [0.0, -500.0, 0.0]), "09:00");
    }

    #[test]
    fn test_config_init_refuses_to_overwrite() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("config.toml");
        let config = ShiftlineConfig {
            employee_id: Some("EMP-3".to_string()),
            ..Default::default()
        };

        init_config(&config, &path, false).unwrap();
        assert_eq!(load_config(Some(path.clone())).unwrap(), config);

        assert!(matches!(
            init_config(&ShiftlineConfig::default(), &path, false),
            Err(CliError::ConfigExists(_))
        ));
        assert_eq!(load_config(Some(path.clone())).unwrap(), config);

        init_config(&ShiftlineConfig::default(), &path, true).unwrap();
        assert_eq!(load_config(Some(path)).unwrap(), ShiftlineConfig::default());
    }

    #[test]
    fn test_parse_now() {
        let now = parse_now("2026-10-16 18:00").unwrap();
        assert_eq!(now.date(), NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert!(matches!(
            parse_now("yesterday"),
            Err(CliError::InvalidArgument { field: "now", .. })
        ));
    }

    #[test]
    fn test_rows_file_accepts_array_and_envelope() {
        let bare = parse_rows_file(r#"[{"shiftId":"A"}]"#).unwrap();
        assert!(bare.success);
        assert_eq!(bare.shift_rows().unwrap().len(), 1);

        let envelope = parse_rows_file(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "employee_id = \"FROM-FILE\"\ntimezone = \"UTC\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "shiftline",
            "--config",
            path.to_str().unwrap(),
            "--employee-id",
            "FROM-FLAG",
            "duration",
            "09:00",
            "17:00",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.employee_id.as_deref(), Some("FROM-FLAG"));
    }
}
