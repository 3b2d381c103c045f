//! CLI entrypoint for vte
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use vte_application::{
    ContextRetriever, ConversationLogger, DebateEngine, DebateProgressNotifier, KeywordExtractor,
    KnowledgePartition, KnowledgeStore, NoConversationLogger, NoProgress, QuerySynthesizer,
    ResearchProgressNotifier, ResearchTopicInput, ResearchTopicUseCase, RunDebateInput,
};
use vte_domain::{DebateState, ExpertId, Topic};
use vte_infrastructure::{
    ConfigLoader, EmbedderKind, Embedder, FileConfig, FileKnowledgeStore, HashingEmbedder,
    JsonlConversationLogger, OllamaClient, OllamaEmbedder, OllamaLlmGateway, Severity,
    build_http_client, configured_sources,
};
use vte_presentation::{
    Cli, Command, ConsoleFormatter, DataStats, OutputFormat, OutputFormatter, ProgressReporter,
    ReportWriter, SimpleProgress,
};

/// Progress display picked from `-q`, the output format and the terminal
enum Progress {
    Bars(ProgressReporter),
    Lines(SimpleProgress),
    Silent(NoProgress),
}

impl Progress {
    fn for_cli(cli: &Cli) -> Self {
        if cli.quiet {
            Progress::Silent(NoProgress)
        } else if std::io::stderr().is_terminal() {
            Progress::Bars(ProgressReporter::new())
        } else if cli.output == OutputFormat::Json {
            // plain lines go to stdout and would corrupt the JSON
            Progress::Silent(NoProgress)
        } else {
            Progress::Lines(SimpleProgress)
        }
    }

    fn research(&self) -> &dyn ResearchProgressNotifier {
        match self {
            Progress::Bars(p) => p,
            Progress::Lines(p) => p,
            Progress::Silent(p) => p,
        }
    }

    fn debate(&self) -> &dyn DebateProgressNotifier {
        match self {
            Progress::Bars(p) => p,
            Progress::Lines(p) => p,
            Progress::Silent(p) => p,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_tracing(&cli)?;
    info!("Starting vte");

    let Some(command) = cli.command() else {
        bail!("A topic is required. Use --expert-id, --list or --delete for other actions.");
    };

    if command == Command::ShowConfig {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let partition = KnowledgePartition::new(open_store(&config)?);
    let logger = conversation_logger(&cli);

    match command {
        Command::ShowConfig => Ok(()),
        Command::List => {
            let experts = partition.list_experts().await?;
            print!("{}", ConsoleFormatter::format_experts(&experts));
            Ok(())
        }
        Command::Delete {
            expert_id,
            confirmed,
        } => delete_expert(&partition, &expert_id, confirmed).await,
        Command::Reuse { expert_id } => {
            let topic = partition
                .expert_topic(&expert_id)
                .await?
                .with_context(|| format!("Expert '{}' not found (see --list)", expert_id))?;
            let stats = partition
                .list_experts()
                .await?
                .iter()
                .find(|e| e.expert_id == expert_id)
                .map(DataStats::from)
                .unwrap_or_default();
            info!("Reusing {} for '{}'", expert_id, topic);
            let run = DebateRun {
                topic,
                expert_id,
                stats,
            };
            debate(&cli, &config, partition, logger, run).await
        }
        Command::Research { topic } => {
            let topic = Topic::new(topic)?;
            let progress = Progress::for_cli(&cli);
            let gateway = Arc::new(chat_gateway(&config)?);
            let http = build_http_client(Duration::from_secs(config.llm.timeout_secs))?;
            let sources = configured_sources(&config.sources, &http);

            let research = ResearchTopicUseCase::new(
                QuerySynthesizer::new(KeywordExtractor::new(gateway)),
                sources,
                partition.clone(),
                config.research_config(),
                logger.clone(),
            );
            let input = ResearchTopicInput::new(topic).with_limit(cli.limit);
            let outcome = research
                .execute_with_progress(input, progress.research())
                .await?;

            if cli.output == OutputFormat::Full {
                println!("{}", ConsoleFormatter::format_research(&outcome));
            }

            let run = DebateRun {
                stats: DataStats::from(&outcome),
                topic: outcome.topic,
                expert_id: outcome.expert_id,
            };
            debate(&cli, &config, partition, logger, run).await
        }
    }
}

/// The partition a debate runs on
struct DebateRun {
    topic: String,
    expert_id: ExpertId,
    stats: DataStats,
}

/// Run the debate, print it and write the report. A failed turn still
/// prints and reports the turns that completed before returning the error.
async fn debate(
    cli: &Cli,
    config: &FileConfig,
    partition: KnowledgePartition,
    logger: Arc<dyn ConversationLogger>,
    run: DebateRun,
) -> Result<()> {
    let progress = Progress::for_cli(cli);
    let debate_config = config.debate_config();
    let retriever = ContextRetriever::new(partition, debate_config.retrieve_top_k);
    let engine = DebateEngine::new(
        Arc::new(chat_gateway(config)?),
        retriever,
        config.persona_registry(),
        debate_config,
        logger,
    );

    let mode = cli.mode.unwrap_or_else(|| config.default_mode());
    let missing = engine.missing_personas(mode);
    if !missing.is_empty() {
        let keys: Vec<String> = missing.iter().map(|k| k.to_string()).collect();
        bail!("Mode {} needs personas that are not defined: {}", mode.letter(), keys.join(", "));
    }
    let input = RunDebateInput::new(run.topic, run.expert_id, mode).with_max_turns(cli.turns);

    let (state, failure) = match engine.execute_with_progress(input, progress.debate()).await {
        Ok(state) => (state, None),
        Err(e) => {
            warn!("Debate stopped early: {}", e);
            let message = e.to_string();
            (e.into_partial_state(), Some(message))
        }
    };

    print_state(cli.output, &state);

    if !cli.no_report {
        let writer = ReportWriter::new(&config.report.output_dir);
        match writer.write(&state, &run.stats, chrono::Local::now()) {
            Ok(paths) => {
                if cli.output != OutputFormat::Json {
                    eprintln!("Report saved to {}", paths.markdown.display());
                }
            }
            Err(e) => warn!("Failed to write report: {}", e),
        }
    }

    match failure {
        Some(message) => bail!("Debate stopped after {} turns: {}", state.turn_count(), message),
        None => Ok(()),
    }
}

fn print_state(format: OutputFormat, state: &DebateState) {
    let formatter = ConsoleFormatter;
    let output = match format {
        OutputFormat::Full => formatter.format(state),
        OutputFormat::Transcript => formatter.format_transcript(state),
        OutputFormat::Json => formatter.format_json(state),
    };
    println!("{}", output);
}

async fn delete_expert(
    partition: &KnowledgePartition,
    expert_id: &ExpertId,
    confirmed: bool,
) -> Result<()> {
    if !partition.exists(expert_id).await {
        bail!("Expert '{}' not found (see --list)", expert_id);
    }

    if !confirmed {
        print!("Delete {}? This cannot be undone. [y/N] ", expert_id);
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if partition.delete(expert_id).await {
        println!("Deleted {}", expert_id);
        Ok(())
    } else {
        bail!("Failed to delete {}", expert_id)
    }
}

/// Console or file logging from `-v`. The returned guard flushes the
/// file writer on drop and must live until exit.
fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    match &cli.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, "vte.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("Config: {}", issue.message),
            Severity::Error => eprintln!("Config error: {}", issue.message),
        }
    }
    if issues.iter().any(|i| i.severity == Severity::Error) {
        bail!("Invalid configuration");
    }
    Ok(config)
}

fn ollama_client(config: &FileConfig) -> Result<OllamaClient> {
    Ok(OllamaClient::new(
        &config.llm.base_url,
        Duration::from_secs(config.llm.timeout_secs),
    )?)
}

fn chat_gateway(config: &FileConfig) -> Result<OllamaLlmGateway> {
    Ok(OllamaLlmGateway::new(
        ollama_client(config)?,
        &config.llm.chat_model,
        config.llm.temperature,
    ))
}

fn open_store(config: &FileConfig) -> Result<Arc<dyn KnowledgeStore>> {
    let embedder: Arc<dyn Embedder> = match config.embedder() {
        EmbedderKind::Ollama => Arc::new(OllamaEmbedder::new(
            ollama_client(config)?,
            &config.llm.embedding_model,
        )),
        EmbedderKind::Hashing => Arc::new(HashingEmbedder::default()),
    };
    let path = config.knowledge.resolved_store_path();
    let store = FileKnowledgeStore::open(&path, embedder)
        .with_context(|| format!("Failed to open knowledge store {}", path.display()))?;
    Ok(Arc::new(store))
}

fn conversation_logger(cli: &Cli) -> Arc<dyn ConversationLogger> {
    match cli.log_dir.as_deref().and_then(open_run_log) {
        Some(logger) => Arc::new(logger),
        None => Arc::new(NoConversationLogger),
    }
}

fn open_run_log(dir: &Path) -> Option<JsonlConversationLogger> {
    let logger = JsonlConversationLogger::in_dir(dir)?;
    info!("Run log: {}", logger.path().display());
    Some(logger)
}
