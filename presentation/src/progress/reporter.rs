//! Progress reporting for research and debate execution

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use vte_application::{DebateProgressNotifier, ResearchProgressNotifier};
use vte_domain::{DebateMessage, DebateMode, DebateState, KeywordPhrase, Persona, SearchQuery};

/// Reports progress with indicatif bars: one bar per research source and
/// one bar for the debate turns.
pub struct ProgressReporter {
    multi: MultiProgress,
    source_bar: Mutex<Option<ProgressBar>>,
    debate_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            source_bar: Mutex::new(None),
            debate_bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn replace(slot: &Mutex<Option<ProgressBar>>, bar: Option<ProgressBar>) -> Option<ProgressBar> {
        match slot.lock() {
            Ok(mut guard) => std::mem::replace(&mut *guard, bar),
            Err(_) => None,
        }
    }

    fn with_bar(slot: &Mutex<Option<ProgressBar>>, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = slot.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResearchProgressNotifier for ProgressReporter {
    fn on_queries_ready(&self, keywords: &[KeywordPhrase], queries: &[SearchQuery]) {
        let keywords: Vec<&str> = keywords.iter().map(|k| k.as_str()).collect();
        let _ = self.multi.println(format!(
            "{} {} ({} queries)",
            "Keywords:".cyan().bold(),
            keywords.join(", "),
            queries.len()
        ));
    }

    fn on_source_start(&self, source: &str, limit: usize) {
        let pb = self.multi.add(ProgressBar::new(limit as u64));
        pb.set_style(Self::bar_style());
        pb.set_prefix(source.to_string());
        pb.set_message("Searching...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Some(previous) = Self::replace(&self.source_bar, Some(pb)) {
            previous.finish_and_clear();
        }
    }

    fn on_query_complete(&self, _source: &str, query: &SearchQuery, added: usize, total: usize) {
        Self::with_bar(&self.source_bar, |pb| {
            pb.set_position(total as u64);
            pb.set_message(format!("+{} {}", added, query.strategy().as_str()));
        });
    }

    fn on_source_complete(&self, source: &str, collected: usize) {
        if let Some(pb) = Self::replace(&self.source_bar, None) {
            pb.finish_with_message(format!(
                "{} {} documents",
                "v".green(),
                collected
            ));
        } else {
            let _ = self
                .multi
                .println(format!("{} {}: {} documents", "v".green(), source, collected));
        }
    }

    fn on_source_skipped(&self, source: &str, reason: &str) {
        let _ = self.multi.println(format!(
            "{} {} skipped: {}",
            "-".yellow(),
            source.bold(),
            reason
        ));
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_debate_start(&self, mode: DebateMode, turn_limit: usize) {
        let pb = self.multi.add(ProgressBar::new(turn_limit as u64));
        pb.set_style(Self::bar_style());
        pb.set_prefix(format!("Debate ({})", mode));
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));
        Self::replace(&self.debate_bar, Some(pb));
    }

    fn on_turn_start(&self, persona: &Persona, _turn: usize) {
        Self::with_bar(&self.debate_bar, |pb| {
            pb.set_message(format!("{} is speaking...", persona.name));
        });
    }

    fn on_turn_complete(&self, message: &DebateMessage, _turn: usize) {
        Self::with_bar(&self.debate_bar, |pb| {
            pb.set_message(format!("{} {}", "v".green(), message.speaker));
            pb.inc(1);
        });
    }

    fn on_debate_complete(&self, state: &DebateState) {
        if let Some(pb) = Self::replace(&self.debate_bar, None) {
            pb.finish_with_message(format!(
                "{} ({} turns)",
                "Debate complete!".green(),
                state.turn_count()
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ResearchProgressNotifier for SimpleProgress {
    fn on_queries_ready(&self, keywords: &[KeywordPhrase], queries: &[SearchQuery]) {
        let keywords: Vec<&str> = keywords.iter().map(|k| k.as_str()).collect();
        println!(
            "{} {} ({} queries)",
            "->".cyan(),
            keywords.join(", ").bold(),
            queries.len()
        );
    }

    fn on_source_start(&self, source: &str, limit: usize) {
        println!("{} {} (limit {})", "->".cyan(), source.bold(), limit);
    }

    fn on_query_complete(&self, _source: &str, query: &SearchQuery, added: usize, total: usize) {
        println!("  {} +{} ({} total) {}", "v".green(), added, total, query.text());
    }

    fn on_source_complete(&self, _source: &str, collected: usize) {
        println!("  {} documents collected\n", collected);
    }

    fn on_source_skipped(&self, source: &str, reason: &str) {
        println!("{} {} skipped: {}\n", "-".yellow(), source.bold(), reason);
    }
}

impl DebateProgressNotifier for SimpleProgress {
    fn on_debate_start(&self, mode: DebateMode, turn_limit: usize) {
        println!(
            "{} {} ({} turns)",
            "->".cyan(),
            mode.description().bold(),
            turn_limit
        );
    }

    fn on_turn_start(&self, persona: &Persona, turn: usize) {
        println!("  [{}] {}...", turn, persona.name);
    }

    fn on_turn_complete(&self, message: &DebateMessage, _turn: usize) {
        println!("  {} {}", "v".green(), message.speaker);
    }

    fn on_debate_complete(&self, _state: &DebateState) {
        println!();
    }
}
