//! Console output formatter

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use vte_application::ResearchOutcome;
use vte_domain::{DebateMessage, DebateState, ExpertSummary, PersonaKey};

/// Formats research and debate results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Research summary: keywords, queries and per-source counts
    pub fn format_research(outcome: &ResearchOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Research Summary"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), outcome.topic));
        output.push_str(&format!(
            "{} {}\n",
            "Expert:".cyan().bold(),
            outcome.expert_id
        ));
        let keywords: Vec<&str> = outcome.keywords.iter().map(|k| k.as_str()).collect();
        output.push_str(&format!(
            "{} {}\n",
            "Keywords:".cyan().bold(),
            keywords.join(", ")
        ));

        output.push_str(&Self::section_header("Queries"));
        for (i, query) in outcome.queries.iter().enumerate() {
            output.push_str(&format!(
                "  {:>2}. {} {}\n",
                i + 1,
                query.text(),
                format!("({})", query.strategy().as_str()).dimmed()
            ));
        }

        output.push_str(&Self::section_header("Sources"));
        for summary in &outcome.sources {
            match &summary.skipped {
                Some(reason) => output.push_str(&format!(
                    "  {} {:<12} skipped: {}\n",
                    "-".yellow(),
                    summary.source,
                    reason
                )),
                None => output.push_str(&format!(
                    "  {} {:<12} {} documents ({} queries)\n",
                    "v".green(),
                    summary.source,
                    summary.collected,
                    summary.queries_run
                )),
            }
        }
        output.push_str(&format!(
            "\n{} {}\n",
            "Total documents:".cyan().bold(),
            outcome.document_count()
        ));

        output
    }

    /// Table of stored expert partitions for `--list`
    pub fn format_experts(experts: &[ExpertSummary]) -> String {
        if experts.is_empty() {
            return format!("{}\n", "No experts stored yet.".dimmed());
        }

        let mut output = String::new();
        output.push_str(&format!(
            "{}\n",
            format!(
                "{:<14} {:>6} {:>9} {:>8} {:>6}  {}",
                "ID", "DOCS", "ARTICLES", "PATENTS", "NEWS", "TOPIC"
            )
            .bold()
        ));
        for expert in experts {
            output.push_str(&format!(
                "{:<14} {:>6} {:>9} {:>8} {:>6}  {}\n",
                expert.expert_id.as_str(),
                expert.doc_count,
                expert.articles,
                expert.patents,
                expert.news,
                expert.topic
            ));
        }
        output
    }

    fn format_message(message: &DebateMessage, index: usize) -> String {
        let label = format!("── [{}] {} ──", index + 1, message.speaker);
        let label = if message.persona_key == PersonaKey::moderator() {
            label.magenta().bold()
        } else {
            label.yellow().bold()
        };
        format!("\n{}\n{}\n", label, message.content.trim())
    }

    fn header(title: &str) -> String {
        let line = "═".repeat(60);
        format!(
            "{}\n{}\n{}",
            line.cyan(),
            format!("  {}", title).cyan().bold(),
            line.cyan()
        )
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("━━━ {} ━━━", title).blue().bold())
    }

    fn footer() -> String {
        format!("\n{}\n", "─".repeat(60).dimmed())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, state: &DebateState) -> String {
        let mut output = self.format_transcript(state);

        if let Some(last) = state.last_message()
            && last.persona_key == PersonaKey::moderator()
        {
            output.push_str(&Self::section_header("Conclusion"));
            output.push_str(&format!("\n{}\n", last.content.trim()));
        }

        output.push_str(&Self::footer());
        output
    }

    fn format_json(&self, state: &DebateState) -> String {
        serde_json::to_string_pretty(state).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    fn format_transcript(&self, state: &DebateState) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Debate"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), state.topic()));
        output.push_str(&format!(
            "{} {} ({})\n",
            "Mode:".cyan().bold(),
            state.mode(),
            state.mode().letter()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Expert:".cyan().bold(),
            state.expert_id()
        ));

        output.push_str(&Self::section_header("Transcript"));
        for (i, message) in state.messages().iter().enumerate() {
            output.push_str(&Self::format_message(message, i));
        }

        output
    }
}
