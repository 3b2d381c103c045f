//! Run Debate use case
//!
//! Drives personas through a [`DebateGraph`] on a [`DebateState`]. Every
//! turn runs the same primitive: retrieve context, build the system
//! prompt, send the transcript, append the reply. Modes only differ in who
//! speaks next and when the run ends.

use super::retrieve_context::ContextRetriever;
use crate::config::DebateConfig;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, event};
use crate::ports::llm_gateway::{ChatMessage, GatewayError, LlmGateway};
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use vte_domain::{
    DebateGraph, DebateMode, DebateState, DomainError, ExpertId, Persona, PersonaKey,
    PersonaRegistry, PromptTemplate, Transition,
};

/// Errors that abort a debate run.
///
/// Each variant carries the state as it was when the run stopped; completed
/// turns are never discarded.
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Turn {turn} ({speaker}) failed: {source}")]
    TurnFailed {
        speaker: String,
        turn: usize,
        #[source]
        source: GatewayError,
        state: Box<DebateState>,
    },

    #[error("Persona table is missing a speaker: {source}")]
    MissingPersona {
        #[source]
        source: DomainError,
        state: Box<DebateState>,
    },
}

impl RunDebateError {
    pub fn partial_state(&self) -> &DebateState {
        match self {
            RunDebateError::TurnFailed { state, .. } => state,
            RunDebateError::MissingPersona { state, .. } => state,
        }
    }

    pub fn into_partial_state(self) -> DebateState {
        match self {
            RunDebateError::TurnFailed { state, .. } => *state,
            RunDebateError::MissingPersona { state, .. } => *state,
        }
    }
}

/// Input for one debate run
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub topic: String,
    pub expert_id: ExpertId,
    pub mode: DebateMode,
    /// Per-persona turn budget override; values ≤ 0 are ignored
    pub max_turns: Option<i64>,
}

impl RunDebateInput {
    pub fn new(topic: impl Into<String>, expert_id: ExpertId, mode: DebateMode) -> Self {
        Self {
            topic: topic.into(),
            expert_id,
            mode,
            max_turns: None,
        }
    }

    pub fn with_max_turns(mut self, turns: Option<i64>) -> Self {
        self.max_turns = turns;
        self
    }
}

/// The debate orchestration engine
pub struct DebateEngine {
    gateway: Arc<dyn LlmGateway>,
    retriever: ContextRetriever,
    personas: PersonaRegistry,
    config: DebateConfig,
    logger: Arc<dyn ConversationLogger>,
}

impl DebateEngine {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        retriever: ContextRetriever,
        personas: PersonaRegistry,
        config: DebateConfig,
        logger: Arc<dyn ConversationLogger>,
    ) -> Self {
        Self {
            gateway,
            retriever,
            personas,
            config,
            logger,
        }
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    /// Execute with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateState, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateState, RunDebateError> {
        let max_turns = self.config.effective_max_turns(input.max_turns);
        let graph = DebateGraph::new(input.mode, max_turns);
        let mut state = DebateState::new(input.topic, input.expert_id, input.mode);

        info!(
            "Starting debate on '{}' ({}, {}), max {} turns per persona",
            state.topic(),
            input.mode,
            state.expert_id(),
            graph.max_turns()
        );
        progress.on_debate_start(input.mode, graph.turn_limit());

        let mut next = Transition::Speaker(graph.entry());
        while let Transition::Speaker(key) = next {
            let persona = match self.personas.require(&key) {
                Ok(persona) => persona,
                Err(source) => {
                    return Err(RunDebateError::MissingPersona {
                        source,
                        state: Box::new(state),
                    });
                }
            };

            if let Err(source) = self.generate_response(&mut state, persona, progress).await {
                warn!("Debate aborted at turn {}: {}", state.turn_count() + 1, source);
                return Err(RunDebateError::TurnFailed {
                    speaker: persona.name.clone(),
                    turn: state.turn_count() + 1,
                    source,
                    state: Box::new(state),
                });
            }

            next = match graph.next(&key, state.turn_count()) {
                Ok(transition) => transition,
                Err(source) => {
                    return Err(RunDebateError::MissingPersona {
                        source,
                        state: Box::new(state),
                    });
                }
            };
        }

        info!("Debate complete after {} turns", state.turn_count());
        self.logger.log(ConversationEvent::new(
            event::DEBATE_COMPLETE,
            json!({
                "topic": state.topic(),
                "expert_id": state.expert_id().as_str(),
                "mode": state.mode().to_string(),
                "turns": state.turn_count(),
            }),
        ));
        progress.on_debate_complete(&state);

        Ok(state)
    }

    /// One persona turn: the only step that mutates the state.
    ///
    /// A knowledge-store error while retrieving context is logged and the
    /// turn runs with an empty context; only gateway errors abort it.
    async fn generate_response(
        &self,
        state: &mut DebateState,
        persona: &Persona,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(), GatewayError> {
        let turn = state.turn_count() + 1;
        progress.on_turn_start(persona, turn);

        let context = match self.retriever.retrieve(state).await {
            Ok(context) => context,
            Err(e) => {
                warn!("Context retrieval failed for turn {}: {}", turn, e);
                String::new()
            }
        };
        let messages = self.build_messages(state, persona, &context);
        debug!("Turn {} ({}): {} messages", turn, persona.key, messages.len());

        let reply = self.gateway.chat(&messages).await?;
        let reply = reply.trim().to_string();

        self.logger.log(ConversationEvent::new(
            event::DEBATE_TURN,
            json!({
                "turn": turn,
                "persona": persona.key.as_str(),
                "speaker": persona.name,
                "context_chars": context.chars().count(),
                "content": reply,
            }),
        ));

        state.record_turn(persona, reply);
        if let Some(message) = state.last_message() {
            progress.on_turn_complete(message, turn);
        }
        Ok(())
    }

    /// System prompt, then the transcript, then the persona's instruction.
    fn build_messages(&self, state: &DebateState, persona: &Persona, context: &str) -> Vec<ChatMessage> {
        let system = PromptTemplate::debate_system(
            &persona.system_prompt,
            context,
            state.topic(),
            self.config.max_words_per_turn,
        );

        let mut messages = Vec::with_capacity(state.messages().len() + 2);
        messages.push(ChatMessage::system(system));
        messages.extend(
            state
                .messages()
                .iter()
                .map(|m| ChatMessage::assistant(m.speaker.clone(), m.content.clone())),
        );
        messages.push(ChatMessage::user(
            persona.instruction_for(state.topic(), state.is_opening()),
        ));
        messages
    }

    /// Speakers the engine would need for `mode`, minus those missing from
    /// the persona table.
    pub fn missing_personas(&self, mode: DebateMode) -> Vec<PersonaKey> {
        DebateGraph::new(mode, 1)
            .participants()
            .into_iter()
            .filter(|key| self.personas.get(key).is_none())
            .collect()
    }
}
