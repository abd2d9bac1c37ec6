//! CLI argument definitions using clap derive macros.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{ArgAction, ColorChoice, Parser, Subcommand, ValueHint};
use mrosc_common_config::{vars, ConfigLoader, MroscConfig};
use mrosc_common_core::parse_date;
use mrosc_common_log::{spans, LogConfig, LogFormat, LogLevel};
use mrosc_documents::{DocumentCatalog, DocumentService, DocumentStore};
use std::sync::Arc;

use crate::commands::{BrandingCommand, CatalogCommand, ExpiryCommand, StatusCommand, SummaryCommand};
use crate::error::CliError;

/// MROSC compliance console
///
/// Track the validity of the documents partner organizations keep on file.
#[derive(Debug, Parser)]
#[command(
    name = "mrosc",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = vars::MROSC_CONFIG,
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Project directory holding `.mrosc/`
    #[arg(
        long,
        global = true,
        env = vars::MROSC_PROJECT_DIR,
        value_hint = ValueHint::DirPath
    )]
    pub project_dir: Option<PathBuf>,

    /// When to use terminal colors
    #[arg(long, global = true, default_value = "auto", value_enum)]
    pub color: ColorChoice,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the document types an organization must keep on file
    Catalog(CatalogCommand),

    /// Compute the default expiry date of a document type
    Expiry(ExpiryCommand),

    /// Show the status of documents in an export file
    Status(StatusCommand),

    /// Dashboard summary for one organization
    Summary(SummaryCommand),

    /// Show or change console branding
    #[command(subcommand)]
    Branding(BrandingCommand),
}

impl Cli {
    /// Directory holding `.mrosc/`, defaulting to the working directory.
    pub fn project_dir(&self) -> PathBuf {
        self.project_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load configuration from `--config`, or from the project directory.
    pub fn load_config(&self) -> Result<MroscConfig, CliError> {
        let loader = ConfigLoader::new(self.project_dir());
        let config = match &self.config {
            Some(path) => loader.load_file(path)?,
            None => loader.load()?,
        };
        Ok(config)
    }

    /// Logging setup from the config file, `MROSC_LOG_*` and `-v`/`-q`.
    pub fn log_config(&self, config: Option<&MroscConfig>) -> LogConfig {
        let mut log = LogConfig {
            level: LogLevel::Warn,
            ..LogConfig::default()
        };
        if let Some(config) = config {
            log.level = LogLevel::parse(&config.logging.level).unwrap_or(LogLevel::Warn);
            log.format = LogFormat::parse(&config.logging.format);
            log.file_path = config.logging.file.clone();
        }
        let mut log = log.with_env_overrides();

        if self.quiet {
            log.level = LogLevel::Error;
        }
        match self.verbose {
            0 => {}
            1 => log.level = LogLevel::Debug,
            _ => log.level = LogLevel::Trace,
        }
        log
    }

    /// Execute the selected command
    pub fn execute(self, config: MroscConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            project_dir: self.project_dir(),
            config,
            format: self.format,
            color: use_color(self.color, self.format),
        };

        let _span = spans::command_span(self.command.name()).entered();
        let result = match self.command {
            Command::Catalog(cmd) => cmd.execute(&ctx),
            Command::Expiry(cmd) => cmd.execute(&ctx),
            Command::Status(cmd) => cmd.execute(&ctx),
            Command::Summary(cmd) => cmd.execute(&ctx),
            Command::Branding(cmd) => cmd.execute(&ctx),
        };
        if let Err(e) = &result {
            spans::record_error(e);
        }
        result
    }
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Catalog(_) => "catalog",
            Self::Expiry(_) => "expiry",
            Self::Status(_) => "status",
            Self::Summary(_) => "summary",
            Self::Branding(_) => "branding",
        }
    }
}

fn use_color(choice: ColorChoice, format: OutputFormat) -> bool {
    if format == OutputFormat::Json {
        return false;
    }
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: MroscConfig,
    pub project_dir: PathBuf,
    pub format: OutputFormat,
    pub color: bool,
}

impl CommandContext {
    /// Resolve a path from the config file against the project directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }

    /// The configured document catalog, or the built-in MROSC catalog.
    pub fn catalog(&self) -> Result<DocumentCatalog, CliError> {
        match &self.config.documents.catalog_path {
            Some(path) => {
                let path = self.resolve(path);
                tracing::debug!(path = %path.display(), "loading document catalog");
                Ok(DocumentCatalog::from_yaml_file(&path)?)
            }
            None => Ok(DocumentCatalog::mrosc_default()),
        }
    }

    /// Document service over `store` with the configured catalog and expiry rule.
    pub fn service(&self, store: Arc<dyn DocumentStore>) -> Result<DocumentService, CliError> {
        Ok(DocumentService::new(store, self.catalog()?).with_expiry_rule(self.config.documents.expiry_rule))
    }
}

/// The reference day: `--today`/`MROSC_TODAY`, else the local calendar date.
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate, CliError> {
    match today {
        Some(value) => parse_date("today", value).map_err(|e| CliError::invalid_field("today", e.to_string())),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
