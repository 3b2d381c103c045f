//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use vte_domain::{DebateMode, ExpertId};

/// Output format for the debate result
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Research summary, full transcript and conclusion
    Full,
    /// Only the transcript
    Transcript,
    /// JSON dump of the final debate state
    Json,
}

/// CLI arguments for vte
#[derive(Parser, Debug)]
#[command(name = "vte")]
#[command(author, version, about = "Virtual tech experts - research a topic, then let personas debate it")]
#[command(long_about = r#"
vte builds a knowledge partition ("expert") for a technology topic from
papers, patents and news, then runs a multi-persona debate grounded in it.

Debate modes:
  a  Sequential:  Optimist -> Skeptic -> Moderator
  b  Round-robin: Optimist -> Competitor -> Skeptic -> Regulator -> Moderator
  c  Consensus:   Optimist <-> Skeptic until the turn budget, then Moderator

Configuration files are loaded from (in priority order):
1. VTE_* environment variables
2. --config <path>     Explicit config file
3. ./vte.toml          Project-level config
4. ~/.config/vte/config.toml   Global config

Example:
  vte "ammonia cracking" --mode c --turns 2
  vte --expert-id expert_3 --mode b
  vte --list
  vte --delete expert_3 --yes
"#)]
pub struct Cli {
    /// Technology topic to research and debate
    #[arg(conflicts_with_all = ["expert_id", "list", "delete"])]
    pub topic: Option<String>,

    /// Debate mode: a (sequential), b (round-robin), c (consensus)
    #[arg(short, long, value_parser = parse_mode, value_name = "MODE")]
    pub mode: Option<DebateMode>,

    /// Per-persona turn budget for mode c (values <= 0 use the config default)
    #[arg(short, long, allow_negative_numbers = true, value_name = "N")]
    pub turns: Option<i64>,

    /// Documents to collect per paper or patent source
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Reuse an existing expert partition and skip research
    #[arg(short, long, value_parser = parse_expert_id, value_name = "ID")]
    pub expert_id: Option<ExpertId>,

    /// List stored experts and exit
    #[arg(long, conflicts_with_all = ["expert_id", "delete"])]
    pub list: bool,

    /// Delete an expert partition and exit
    #[arg(long, value_parser = parse_expert_id, value_name = "ID", conflicts_with = "expert_id")]
    pub delete: Option<ExpertId>,

    /// Do not ask for confirmation before deleting
    #[arg(short, long, requires = "delete")]
    pub yes: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostics and the JSONL run log into this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Skip writing the Markdown and JSON report
    #[arg(long)]
    pub no_report: bool,
}

/// What one invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ShowConfig,
    List,
    Delete { expert_id: ExpertId, confirmed: bool },
    /// Debate over an existing partition
    Reuse { expert_id: ExpertId },
    /// Research the topic into a new partition, then debate
    Research { topic: String },
}

impl Cli {
    /// Resolve the flags into a single command. `None` when there is
    /// nothing to do (no topic and no management flag).
    pub fn command(&self) -> Option<Command> {
        if self.show_config {
            return Some(Command::ShowConfig);
        }
        if self.list {
            return Some(Command::List);
        }
        if let Some(expert_id) = &self.delete {
            return Some(Command::Delete {
                expert_id: expert_id.clone(),
                confirmed: self.yes,
            });
        }
        if let Some(expert_id) = &self.expert_id {
            return Some(Command::Reuse {
                expert_id: expert_id.clone(),
            });
        }
        self.topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|topic| Command::Research {
                topic: topic.to_string(),
            })
    }
}

fn parse_mode(s: &str) -> Result<DebateMode, String> {
    s.parse::<DebateMode>().map_err(|e| e.to_string())
}

fn parse_expert_id(s: &str) -> Result<ExpertId, String> {
    ExpertId::new(s).map_err(|e| e.to_string())
}
