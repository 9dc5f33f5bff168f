// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record as LogRecord, SetLoggerError, debug, info};
use std::io::Write;
use std::path::PathBuf;

use mothertongue::app_config::{self, Config, ModelConfig};
use mothertongue::context::{RequestContext, User};
use mothertongue::database::{
    DatabaseConnection, RelatedTranslations, Repository, StoredRecord, StoredTranslation,
};
use mothertongue::translation::{FieldMap, FieldValue, TranslatingRecord};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
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

/// Options describing the request a read is made for
#[derive(Args, Debug)]
struct RequestArgs {
    /// Active language code (e.g., 'es'); overrides --accept-language
    #[arg(short = 'L', long)]
    language: Option<String>,

    /// Accept-Language header to negotiate the active language from
    #[arg(short, long)]
    accept_language: Option<String>,

    /// Read as a staff operator
    #[arg(long)]
    staff: bool,

    /// Request path of the read (e.g., '/admin/blog/post/1/change/')
    #[arg(short, long)]
    path: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a record or replace its fields
    AddRecord {
        /// Model name declared in the configuration
        model: String,
        /// Record identifier
        id: String,
        /// Field assignment NAME=VALUE, repeatable
        #[arg(short, long = "field", value_parser = parse_field_assignment)]
        fields: Vec<(String, FieldValue)>,
    },

    /// Delete a record and its translations
    DeleteRecord {
        /// Model name declared in the configuration
        model: String,
        /// Record identifier
        id: String,
    },

    /// Store a translation of a record
    AddTranslation {
        /// Model name declared in the configuration
        model: String,
        /// Record identifier
        id: String,
        /// Language code of the translation
        language: String,
        /// Field assignment NAME=VALUE, repeatable
        #[arg(short, long = "field", value_parser = parse_field_assignment)]
        fields: Vec<(String, FieldValue)>,
    },

    /// List the translations of a record
    ListTranslations {
        model: String,
        id: String,
    },

    /// Delete a translation by its database ID
    DeleteTranslation {
        translation_id: i64,
    },

    /// Read one field of a record as seen by a request
    Get {
        model: String,
        id: String,
        field: String,
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Read every field of a record as seen by a request
    Show {
        model: String,
        id: String,
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Generate shell completions for mothertongue
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// mothertongue - per-language translation overlays for records
#[derive(Parser, Debug)]
#[command(name = "mothertongue")]
#[command(version)]
#[command(about = "Read records through their per-language translations")]
#[command(long_about = "mothertongue stores records and their per-language translations and reads
translatable fields in the language of a request.

EXAMPLES:
    mothertongue add-record post 1 -f content=Hello -f slug=hello
    mothertongue add-translation post 1 es -f content=Hola
    mothertongue get post 1 content -L es                 # Hola
    mothertongue get post 1 content -a 'fr, es;q=0.8'     # negotiated: Hola
    mothertongue get post 1 content -L es --staff -p /admin/blog/post/1/change/   # Hello
    mothertongue delete-record post 1
    mothertongue completions bash > mothertongue.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. Models and their
    translatable fields are declared there. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Database file path, overriding the configuration
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Colored stderr logger
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

    // @returns: ANSI color code for log level
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

    fn log(&self, record: &LogRecord) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Parse a NAME=VALUE field assignment. JSON scalars keep their type,
/// anything else is stored as text.
fn parse_field_assignment(raw: &str) -> Result<(String, FieldValue), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }

    let value = serde_json::from_str::<FieldValue>(value)
        .unwrap_or_else(|_| FieldValue::Text(value.to_string()));

    Ok((name.to_string(), value))
}

fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    // Configuration is only needed by commands that touch the store
    let setup = || -> Result<(Config, Repository)> {
        let mut config = Config::load_or_create(&cli.config_path)?;
        if let Some(log_level) = cli.log_level.clone() {
            config.log_level = log_level.into();
        }
        log::set_max_level(config.log_level.to_level_filter());

        config.validate().context("Configuration validation failed")?;

        let repo = open_repository(&config, cli.database.as_ref())?;
        Ok((config, repo))
    };

    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "mothertongue", &mut std::io::stdout());
        }
        Commands::AddRecord { model, id, fields } => {
            let (config, repo) = setup()?;
            let model = find_model(&config, model)?;
            let fields: FieldMap = fields.iter().cloned().collect();

            repo.save_record(&model.name, id, &fields)?;
            info!("Saved {} '{}'", model.name, id);
        }
        Commands::DeleteRecord { model, id } => {
            let (config, repo) = setup()?;
            let model = find_model(&config, model)?;

            if !repo.delete_record(model, id)? {
                return Err(anyhow!("No {} with ID '{}'", model.name, id));
            }
            info!("Deleted {} '{}'", model.name, id);
        }
        Commands::AddTranslation { model, id, language, fields } => {
            let (config, repo) = setup()?;
            let model = find_model(&config, model)?;
            let fields: FieldMap = fields.iter().cloned().collect();

            if let Some(untranslatable) = fields
                .keys()
                .find(|name| !model.translated_fields.iter().any(|f| f == *name))
            {
                return Err(anyhow!(
                    "Field '{}' is not translatable for model '{}'",
                    untranslatable,
                    model.name
                ));
            }

            let translation = StoredTranslation::new(&model.translation_set, id, language, fields);
            let translation_id = repo.add_translation(&translation)?;
            info!("Saved '{}' translation {} of {} '{}'", language, translation_id, model.name, id);
        }
        Commands::ListTranslations { model, id } => {
            let (config, repo) = setup()?;
            let model = find_model(&config, model)?;

            for translation in repo.list_translations(&model.translation_set, id)? {
                println!(
                    "{}\t{}\t{}",
                    translation.id,
                    translation.language,
                    serde_json::to_string(&translation.fields)?
                );
            }
        }
        Commands::DeleteTranslation { translation_id } => {
            let (_, repo) = setup()?;
            if !repo.delete_translation(*translation_id)? {
                return Err(anyhow!("No translation with ID {}", translation_id));
            }
            info!("Deleted translation {}", translation_id);
        }
        Commands::Get { model, id, field, request } => {
            let (config, repo) = setup()?;
            let model = find_model(&config, model)?;
            let context = build_context(&config, request);
            let record = load_record(&repo, model, id, &context)?;

            println!("{}", record.get(field, &context)?);
        }
        Commands::Show { model, id, request } => {
            let (config, repo) = setup()?;
            let model = find_model(&config, model)?;
            let context = build_context(&config, request);
            let record = load_record(&repo, model, id, &context)?;

            for name in record.record().fields.keys() {
                println!("{}\t{}", name, record.get(name, &context)?);
            }
            debug!("{:?}", record);
        }
    }

    Ok(())
}

fn open_repository(config: &Config, database: Option<&PathBuf>) -> Result<Repository> {
    let path = database
        .cloned()
        .or_else(|| config.database_path.as_ref().map(PathBuf::from));

    let db = match path {
        Some(path) => DatabaseConnection::new(path)?,
        None => DatabaseConnection::new_default()?,
    };

    Ok(Repository::new(db))
}

fn find_model<'a>(config: &'a Config, name: &str) -> Result<&'a ModelConfig> {
    config
        .model(name)
        .ok_or_else(|| anyhow!("Model '{}' is not declared in the configuration", name))
}

fn build_context(config: &Config, request: &RequestArgs) -> RequestContext {
    let user = if request.staff {
        User::staff("cli")
    } else {
        User::anonymous()
    };

    let mut context = match (&request.language, &request.accept_language) {
        (Some(language), _) => RequestContext::new(user).with_language(language),
        (None, Some(header)) => RequestContext::from_accept_language(
            user,
            header,
            &config.supported_languages,
            &config.default_language,
        ),
        (None, None) => RequestContext::new(user).with_language(&config.default_language),
    };

    context = context.with_admin_path_marker(&config.admin_path_marker);
    if let Some(path) = &request.path {
        context = context.with_path(path);
    }

    context
}

fn load_record<'r>(
    repo: &'r Repository,
    model: &ModelConfig,
    id: &str,
    context: &RequestContext,
) -> Result<TranslatingRecord<StoredRecord, RelatedTranslations<'r>>> {
    let record = repo
        .get_record(model, id)?
        .ok_or_else(|| anyhow!("No {} with ID '{}'", model.name, id))?;

    let translations = repo.translation_set(&record);
    Ok(TranslatingRecord::new(record, translations, Some(context))?)
}
