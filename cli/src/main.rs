//! CLI entrypoint for casequery
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use casequery_application::{
    ConnectivityProbe, DispatchParams, DocumentJob, FolderJob, FolderProgressNotifier,
    ModelDispatcher, NoProgress, ProcessDocumentUseCase, ProcessFolderUseCase, QuestionCatalog,
    SettingsRepository,
};
use casequery_domain::{ProviderFamily, config::has_errors};
use casequery_infrastructure::{
    ConfigLoader, Database, DocumentTextExtractor, FileConfig, GeminiGateway,
    HttpConnectivityProbe, LocalFileStore, OllamaRuntime, SqliteQuestionStore, SqliteSettingsStore,
};
use casequery_presentation::{
    Cli, Command, ConsoleFormatter, ModelAction, ProgressReporter, QuestionAction, RunArgs,
    SimpleProgress,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting casequery");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if matches!(cli.command, Command::Config) {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        if issues.is_empty() {
            println!("\nNo configuration issues.");
        }
        for issue in &issues {
            println!("{}", ConsoleFormatter::format_issue(issue));
        }
        return Ok(if has_errors(&issues) {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }
    for issue in &issues {
        eprintln!("{}", ConsoleFormatter::format_issue(issue));
    }
    if has_errors(&issues) {
        bail!("Configuration has errors; run `casequery config` for details");
    }

    match cli.command {
        Command::Process { file, run } => process(&config, &file, &run).await,
        Command::Bulk { root, run } => bulk(&config, root, &run, cli.quiet, cli.verbose).await,
        Command::Questions { action, provider } => {
            questions(&config, ProviderFamily::from(provider), action)
        }
        Command::Models { action } => models(&config, action),
        Command::Probe => probe(&config).await,
        Command::Config => Ok(ExitCode::SUCCESS),
    }
}

/// Console logging by verbosity, plus an optional plain-text log file
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file"))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(console)
        .with(file_layer)
        .init();

    Ok(guard)
}

// === Dependency Injection ===

struct Stores {
    catalog: QuestionCatalog,
    settings: Arc<SqliteSettingsStore>,
}

fn open_stores(config: &FileConfig) -> Result<Stores> {
    let db = Database::open(&config.paths.database)
        .with_context(|| format!("Failed to open {}", config.paths.database.display()))?;
    Ok(Stores {
        catalog: QuestionCatalog::new(
            Arc::new(SqliteQuestionStore::new(db.clone(), ProviderFamily::Gemini)),
            Arc::new(SqliteQuestionStore::new(db.clone(), ProviderFamily::DeepSeek)),
        ),
        settings: Arc::new(SqliteSettingsStore::new(db)),
    })
}

fn dispatch_params(config: &FileConfig, run: &RunArgs) -> Result<DispatchParams> {
    let temperature = run.temperature.unwrap_or(config.dispatch.temperature);
    if !(0.0..=2.0).contains(&temperature) {
        bail!("--temperature must be within 0.0..=2.0, got {}", temperature);
    }
    Ok(DispatchParams::default()
        .with_temperature(temperature)
        .with_local_model(config.dispatch.local_model())
        .with_default_sequence(config.dispatch.default_sequence()))
}

fn build_processor(
    config: &FileConfig,
    run: &RunArgs,
    stores: &Stores,
) -> Result<ProcessDocumentUseCase> {
    let dispatcher = ModelDispatcher::new(
        Arc::new(HttpConnectivityProbe::from_config(&config.network)?),
        Arc::new(GeminiGateway::from_config(&config.providers.gemini)?),
        Arc::new(OllamaRuntime::from_config(&config.providers.ollama)?),
    );
    Ok(ProcessDocumentUseCase::new(
        Arc::new(dispatcher),
        Arc::new(DocumentTextExtractor),
        Arc::new(LocalFileStore::new()),
        stores.settings.clone(),
        dispatch_params(config, run)?,
    ))
}

/// Question texts for the run; unknown ids fail before any processing
fn selected_questions(stores: &Stores, run: &RunArgs) -> Result<Vec<String>> {
    let family = ProviderFamily::from(run.provider);
    let questions = if run.all_questions {
        stores.catalog.select_all(family)?
    } else {
        stores.catalog.select(family, &run.questions)?
    };
    if questions.is_empty() {
        warn!("No questions selected; the prompt will say so");
    }
    Ok(questions)
}

// === Commands ===

async fn process(config: &FileConfig, file: &Path, run: &RunArgs) -> Result<ExitCode> {
    let stores = open_stores(config)?;
    let questions = selected_questions(&stores, run)?;
    let processor = build_processor(config, run, &stores)?;

    let job = DocumentJob::new(
        file,
        questions,
        &config.paths.output_dir,
        &config.paths.completed_dir,
    )
    .with_family(run.provider.into());

    let processed = processor.execute(&job).await?;
    println!("{}", ConsoleFormatter::format_processed(&processed));
    Ok(ExitCode::SUCCESS)
}

async fn bulk(
    config: &FileConfig,
    root: Option<PathBuf>,
    run: &RunArgs,
    quiet: bool,
    verbose: u8,
) -> Result<ExitCode> {
    let stores = open_stores(config)?;
    let questions = selected_questions(&stores, run)?;
    let processor = build_processor(config, run, &stores)?;
    let folder = ProcessFolderUseCase::new(Arc::new(processor));

    let job = FolderJob::new(
        root.unwrap_or_else(|| config.paths.input_dir.clone()),
        questions,
        &config.paths.output_dir,
        &config.paths.completed_dir,
    )
    .with_family(run.provider.into());

    // Log lines and progress bars do not mix; verbose runs get plain lines
    let progress: Box<dyn FolderProgressNotifier> = if quiet {
        Box::new(NoProgress)
    } else if verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let report = folder.execute_with_progress(&job, progress.as_ref()).await?;
    print!("{}", ConsoleFormatter::format_report(&report));

    Ok(if report.retired() == report.attempted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn questions(
    config: &FileConfig,
    family: ProviderFamily,
    action: QuestionAction,
) -> Result<ExitCode> {
    let stores = open_stores(config)?;
    let catalog = &stores.catalog;

    match action {
        QuestionAction::List => {}
        QuestionAction::Add { text } => {
            catalog.add(family, &text)?;
        }
        QuestionAction::Edit { id, text } => {
            catalog.update(family, id, &text)?;
        }
        QuestionAction::Delete { id } => catalog.delete(family, id)?,
    }

    print!("{}", ConsoleFormatter::format_questions(family, &catalog.list(family)?));
    Ok(ExitCode::SUCCESS)
}

fn models(config: &FileConfig, action: ModelAction) -> Result<ExitCode> {
    let settings = open_stores(config)?.settings;

    match action {
        ModelAction::Show => {}
        ModelAction::Set { models } => {
            let sequence = casequery_domain::ModelSequence::parse(&models);
            settings.save_model_sequence(&sequence)?;
        }
        ModelAction::Reset => settings.clear_model_sequence()?,
    }

    let (sequence, from_store) = match settings.load_model_sequence()? {
        Some(sequence) => (sequence, true),
        None => (config.dispatch.default_sequence(), false),
    };
    print!("{}", ConsoleFormatter::format_sequence(&sequence, from_store));
    Ok(ExitCode::SUCCESS)
}

async fn probe(config: &FileConfig) -> Result<ExitCode> {
    let probe = HttpConnectivityProbe::from_config(&config.network)?;
    if probe.is_reachable().await {
        println!("online ({} reachable)", probe.url());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "offline ({} unreachable within {:?})",
            probe.url(),
            config.network.probe_timeout()
        );
        Ok(ExitCode::FAILURE)
    }
}
