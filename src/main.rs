// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use fusionn::app_config::{self, Config};
use fusionn::messages::{BuiltinCatalog, Locale, MessageCatalog, MessageKey};
use fusionn::workflow::StatusKind;
use fusionn::{Controller, KindView, OperationInputs, OperationKind, StatusMessage, SubmitOutcome};

/// CLI Wrapper for OperationKind to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOperationKind {
    Extract,
    Merge,
    Batch,
}

impl From<CliOperationKind> for OperationKind {
    fn from(cli_kind: CliOperationKind) -> Self {
        match cli_kind {
            CliOperationKind::Extract => OperationKind::Extract,
            CliOperationKind::Merge => OperationKind::Merge,
            CliOperationKind::Batch => OperationKind::Batch,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract subtitles from a single video
    Extract {
        /// Video file path as the service sees it
        #[arg(value_name = "VIDEO_PATH")]
        video_path: String,
    },

    /// Merge a Chinese and an English subtitle file
    Merge {
        /// Chinese .srt path
        #[arg(value_name = "CHS_SRT")]
        chs_subtitle_path: String,
        /// English .srt path
        #[arg(value_name = "ENG_SRT")]
        eng_subtitle_path: String,
    },

    /// Process every video in a folder
    Batch {
        #[arg(value_name = "FOLDER")]
        folder_path: String,
    },

    /// Validate paths for an operation without sending anything
    Check {
        #[arg(value_enum)]
        kind: CliOperationKind,
        #[arg(value_name = "PATH")]
        paths: Vec<String>,
    },

    /// Check that the processing service is reachable
    Ping,

    /// Interactive session; several operations can run at once
    Shell,

    /// Generate shell completions for fusionn
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Fusionn - subtitle processing control surface
///
/// Submits extract, merge and batch jobs to a running Fusionn service and
/// reports how they ended. Paths are checked by shape only and are resolved
/// by the service, not on this machine.
#[derive(Parser, Debug)]
#[command(name = "fusionn")]
#[command(version)]
#[command(about = "Control surface for the Fusionn subtitle service")]
#[command(long_about = "Submits subtitle jobs to a Fusionn service and reports the outcome.

EXAMPLES:
    fusionn extract /media/movie.mkv                   # Extract subtitles from one video
    fusionn merge ep1.chs.srt ep1.eng.srt              # Merge two subtitle files
    fusionn batch /media/season1                       # Process a whole folder
    fusionn check extract movie.txt                    # Validate without submitting
    fusionn --endpoint http://nas:4664 shell           # Interactive session
    fusionn completions bash > fusionn.bash            # Generate bash completions

CONFIGURATION:
    Settings live in <config dir>/fusionn/config.json unless --config is given.
    A default file is written when none exists.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    /// Service base URL
    #[arg(short, long, global = true, env = "FUSIONN_ENDPOINT")]
    endpoint: Option<String>,

    /// Request timeout in seconds (0 waits forever)
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Interface language (en or zh)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()), now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize the logger once with warn level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Warn)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "fusionn", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(&config)
        .context("Failed to create service client")?;
    let catalog = BuiltinCatalog::new(config.locale);

    match cli.command {
        Commands::Extract { video_path } => {
            run_once(&controller, &catalog, OperationInputs::extract(video_path)).await
        }
        Commands::Merge { chs_subtitle_path, eng_subtitle_path } => {
            run_once(&controller, &catalog, OperationInputs::merge(chs_subtitle_path, eng_subtitle_path)).await
        }
        Commands::Batch { folder_path } => {
            run_once(&controller, &catalog, OperationInputs::batch(folder_path)).await
        }
        Commands::Check { kind, paths } => {
            let inputs = OperationInputs::from_values(kind.into(), &paths);
            Ok(run_check(&controller, &catalog, &inputs))
        }
        Commands::Ping => run_ping(&controller, &config).await,
        Commands::Shell => run_shell(controller, config.locale).await,
        Commands::Completions { .. } => Ok(ExitCode::SUCCESS),
    }
}

/// Load the config file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = cli.config_path.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    if let Some(endpoint) = &cli.endpoint {
        config.service.endpoint = endpoint.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.service.timeout_secs = timeout;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }

    config.validate()
        .context("Configuration validation failed")?;
    debug!("Using service at {}", config.service.endpoint);
    Ok(config)
}

/// Submit one operation with a spinner and print its outcome
async fn run_once(controller: &Controller, catalog: &dyn MessageCatalog, inputs: OperationInputs) -> Result<ExitCode> {
    let kind = inputs.kind();
    let view = controller.view(&inputs);
    for field in view.fields.iter().filter(|f| !f.display_valid) {
        let (label, _) = field.slot.labels();
        eprintln!("{}: {}", catalog.text(label), field.value);
    }

    let (_, busy_label) = kind.button_labels();
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(catalog.text(busy_label).to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = controller.submit(inputs).await;
    spinner.finish_and_clear();

    if let Some(message) = outcome.status_message() {
        print_status(catalog, kind, &message);
    }
    Ok(if outcome.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn run_check(controller: &Controller, catalog: &dyn MessageCatalog, inputs: &OperationInputs) -> ExitCode {
    let view = controller.view(inputs);
    for field in &view.fields {
        let (label, placeholder) = field.slot.labels();
        let shown = if field.value.is_empty() { catalog.text(placeholder) } else { field.value.as_str() };
        let mark = if field.display_valid { "ok" } else { "invalid" };
        println!("{:<24} {:<8} {}", catalog.text(label), mark, shown);
    }

    match fusionn::validation::check(inputs, &controller.settings().guard_policy()) {
        Ok(()) => {
            println!("{}: ready to submit", catalog.text(view.kind.tab_label()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}: {}", catalog.text(view.kind.tab_label()), e);
            ExitCode::FAILURE
        }
    }
}

async fn run_ping(controller: &Controller, config: &Config) -> Result<ExitCode> {
    match controller.service().health_check().await {
        Ok(()) => {
            println!("Service reachable at {}", config.service.endpoint);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            log::error!("Health check failed: {}", e);
            println!("Failed to connect to the service at {}", config.service.endpoint);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_status(catalog: &dyn MessageCatalog, kind: OperationKind, message: &StatusMessage) {
    let color = match message.kind {
        StatusKind::Success => "1;32",
        StatusKind::Error => "1;31",
    };
    println!("\x1B[{}m[{}] {}\x1B[0m", color, catalog.text(kind.tab_label()), message.message);
}

const SHELL_HELP: &str = "Commands:
  extract <video>            submit an extraction
  merge <chs.srt> <eng.srt>  submit a merge
  batch <folder>             submit a folder
  tab <extract|merge|batch>  switch the active tab
  status                     show the active tab and running operations
  lang                       switch between English and Chinese
  help                       show this text
  quit                       wait for running operations and leave
Quote paths that contain spaces.";

/// Line-oriented session. Submits run in the background so several
/// operations can be in flight while the prompt stays usable.
async fn run_shell(controller: Controller, locale: Locale) -> Result<ExitCode> {
    let mut catalog = BuiltinCatalog::new(locale);
    let mut active = OperationKind::Extract;
    let mut pending: Vec<JoinHandle<()>> = Vec::new();

    println!("{} ({}). Type 'help' for commands.", catalog.text(MessageKey::Title), catalog.locale());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
        pending.retain(|handle| !handle.is_finished());

        let args = match split_args(&line) {
            Ok(args) => args,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        let Some((command, rest)) = args.split_first() else {
            continue;
        };

        match command.as_str() {
            "quit" | "exit" => break,
            "help" => println!("{}", SHELL_HELP),
            "lang" => {
                catalog = BuiltinCatalog::new(catalog.locale().toggle());
                println!("{}", catalog.locale());
            }
            "tab" => match rest.first().map(|k| k.parse::<OperationKind>()) {
                Some(Ok(kind)) => {
                    active = kind;
                    show_view(&catalog, &controller.view(&OperationInputs::empty(kind)));
                }
                _ => println!("Usage: tab <extract|merge|batch>"),
            },
            "status" => {
                show_view(&catalog, &controller.view(&OperationInputs::empty(active)));
                for kind in OperationKind::ALL {
                    let view = controller.view(&OperationInputs::empty(kind));
                    if view.running {
                        let (_, busy) = kind.button_labels();
                        println!("  {}: {} ({} in flight)",
                                 catalog.text(kind.tab_label()), catalog.text(busy), view.in_flight);
                    }
                }
            }
            other => match other.parse::<OperationKind>() {
                Ok(kind) => {
                    active = kind;
                    let inputs = OperationInputs::from_values(kind, rest);
                    if controller.is_running(kind) {
                        let (_, busy) = kind.button_labels();
                        println!("{}: {}", catalog.text(kind.tab_label()), catalog.text(busy));
                        continue;
                    }
                    pending.push(spawn_reporter(controller.spawn_submit(inputs), kind, catalog));
                }
                Err(_) => println!("Unknown command '{}'. Type 'help'.", other),
            },
        }
    }

    if !pending.is_empty() {
        info!("Waiting for {} running operation(s)", pending.len());
        join_all(pending).await;
    }
    Ok(ExitCode::SUCCESS)
}

/// Print a background submit's outcome when it lands
fn spawn_reporter(handle: JoinHandle<SubmitOutcome>, kind: OperationKind, catalog: BuiltinCatalog) -> JoinHandle<()> {
    tokio::spawn(async move {
        match handle.await {
            Ok(outcome) => {
                if let Some(message) = outcome.status_message() {
                    print_status(&catalog, kind, &message);
                }
            }
            Err(e) => log::error!("{} task failed: {}", kind, e),
        }
    })
}

fn show_view(catalog: &dyn MessageCatalog, view: &KindView) {
    let (idle, busy) = view.kind.button_labels();
    let button = if view.running { busy } else { idle };
    println!("[{}] {}", catalog.text(view.kind.tab_label()), catalog.text(button));
    if let Some(message) = &view.status {
        print_status(catalog, view.kind, message);
    }
    if view.may_retry {
        println!("  (failed, resubmit to retry)");
    }
}

/// Split a shell line on whitespace, keeping double-quoted runs together
fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(anyhow!("Unterminated quote"));
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}
