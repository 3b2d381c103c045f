//! LLM-backed research helpers
//!
//! Keyword extraction, synonym generation and combination ranking. Each
//! helper has a `try_*` form returning [`ExtractionError`] and a fail-soft
//! form that applies the deterministic fallback:
//!
//! | Helper | Fallback |
//! |--------|----------|
//! | [`KeywordExtractor::extract`] | `[topic]` |
//! | [`KeywordExtractor::token_synonyms`] | no synonyms |
//! | [`KeywordExtractor::topic_synonyms`] | no synonyms |
//! | [`KeywordExtractor::rank_combinations`] | first `select` combinations |

use crate::ports::llm_gateway::LlmGateway;
use std::sync::Arc;
use tracing::{debug, warn};
use vte_domain::{
    ExtractionError, KeywordPhrase, PromptTemplate, Topic, parse_index_list,
    parse_keyword_response, parse_synonym_list,
};

/// Synonyms requested per topic token
pub const SYNONYMS_PER_TOKEN: usize = 2;

/// Alternative phrasings requested for the whole topic
pub const TOPIC_SYNONYMS: usize = 3;

#[derive(Clone)]
pub struct KeywordExtractor {
    gateway: Arc<dyn LlmGateway>,
}

impl KeywordExtractor {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    /// Extract up to five phrases; falls back to the raw topic.
    pub async fn extract(&self, topic: &Topic) -> Vec<KeywordPhrase> {
        match self.try_extract(topic).await {
            Ok(phrases) => {
                debug!("Extracted keywords: {:?}", phrases);
                phrases
            }
            Err(e) => {
                warn!("Keyword extraction failed ({}), using the topic as keyword", e);
                vec![KeywordPhrase::unchecked(topic.content())]
            }
        }
    }

    pub async fn try_extract(&self, topic: &Topic) -> Result<Vec<KeywordPhrase>, ExtractionError> {
        let raw = self
            .complete(&PromptTemplate::keyword_extraction(topic.content()))
            .await?;
        parse_keyword_response(&raw)
    }

    /// Up to [`SYNONYMS_PER_TOKEN`] synonyms for one token; empty on failure.
    pub async fn token_synonyms(&self, token: &str, topic: &Topic) -> Vec<String> {
        self.try_token_synonyms(token, topic)
            .await
            .unwrap_or_else(|e| {
                debug!("No synonyms for '{}': {}", token, e);
                Vec::new()
            })
    }

    pub async fn try_token_synonyms(
        &self,
        token: &str,
        topic: &Topic,
    ) -> Result<Vec<String>, ExtractionError> {
        let raw = self
            .complete(&PromptTemplate::token_synonyms(token, topic.content()))
            .await?;
        parse_synonym_list(&raw, token, SYNONYMS_PER_TOKEN)
    }

    /// Up to [`TOPIC_SYNONYMS`] alternative phrasings; empty on failure.
    pub async fn topic_synonyms(&self, topic: &Topic) -> Vec<String> {
        self.try_topic_synonyms(topic).await.unwrap_or_else(|e| {
            debug!("No topic synonyms: {}", e);
            Vec::new()
        })
    }

    pub async fn try_topic_synonyms(&self, topic: &Topic) -> Result<Vec<String>, ExtractionError> {
        let raw = self
            .complete(&PromptTemplate::topic_synonyms(topic.content()))
            .await?;
        parse_synonym_list(&raw, topic.content(), TOPIC_SYNONYMS)
    }

    /// Indices (0-based) of the `select` best combinations.
    ///
    /// Falls back to the first `select` indices in enumeration order.
    pub async fn rank_combinations(
        &self,
        topic: &Topic,
        combinations: &[String],
        select: usize,
    ) -> Vec<usize> {
        match self.try_rank_combinations(topic, combinations, select).await {
            Ok(indices) => indices,
            Err(e) => {
                warn!("Combination ranking failed ({}), using enumeration order", e);
                (0..select.min(combinations.len())).collect()
            }
        }
    }

    pub async fn try_rank_combinations(
        &self,
        topic: &Topic,
        combinations: &[String],
        select: usize,
    ) -> Result<Vec<usize>, ExtractionError> {
        let raw = self
            .complete(&PromptTemplate::combination_ranking(
                topic.content(),
                combinations,
                select,
            ))
            .await?;
        parse_index_list(&raw, combinations.len(), select)
    }

    async fn complete(&self, prompt: &str) -> Result<String, ExtractionError> {
        self.gateway
            .complete(prompt)
            .await
            .map_err(|e| ExtractionError::ModelFailed(e.to_string()))
    }
}
