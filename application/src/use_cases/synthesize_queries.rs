//! Query synthesis
//!
//! Turns a topic into an ordered list of boolean queries, most precise
//! first. Later strategies only append; nothing replaces an earlier query.
//!
//! | Priority | Strategy | Emitted when |
//! |----------|----------|--------------|
//! | 0 | synonym expansion | core word count < 4 |
//! | 1 | exact AND of all phrases | always |
//! | 1.5 | whole-topic synonyms (≤ 3) | topic word count < 10 |
//! | 2 | N-1 relaxation (2 subsets) | phrase count ≥ 3 |

use super::extract_keywords::KeywordExtractor;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};
use vte_domain::{KeywordPhrase, SearchQuery, TermGroup, Topic, relaxation_subsets};

/// Synonym expansion only runs for short topics
pub const EXPANSION_MAX_CORE_WORDS: usize = 4;

/// Whole-topic synonyms only run below this many words
pub const TOPIC_SYNONYM_MAX_WORDS: usize = 10;

/// Relaxation needs at least this many phrases
pub const RELAXATION_MIN_PHRASES: usize = 3;

/// Number of relaxation subsets kept
pub const RELAXATION_PICKS: usize = 2;

/// Result of query synthesis: the extracted phrases and the queries built
/// from them.
#[derive(Debug, Clone, Serialize)]
pub struct QueryPlan {
    pub keywords: Vec<KeywordPhrase>,
    pub queries: Vec<SearchQuery>,
}

#[derive(Clone)]
pub struct QuerySynthesizer {
    extractor: KeywordExtractor,
}

impl QuerySynthesizer {
    pub fn new(extractor: KeywordExtractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    /// Build the prioritized query list for `topic`.
    pub async fn generate_search_queries(&self, topic: &Topic) -> QueryPlan {
        let keywords = self.extractor.extract(topic).await;
        let mut queries = Vec::new();

        if topic.core_word_count() < EXPANSION_MAX_CORE_WORDS
            && let Some(query) = self.synonym_expansion(topic).await
        {
            queries.push(query);
        }

        queries.push(SearchQuery::exact_and(&keywords));

        if topic.word_count() < TOPIC_SYNONYM_MAX_WORDS {
            for synonym in self.extractor.topic_synonyms(topic).await {
                queries.push(SearchQuery::topic_synonym(&synonym));
            }
        }

        if keywords.len() >= RELAXATION_MIN_PHRASES {
            queries.extend(self.relaxations(topic, &keywords).await);
        }

        let queries = dedup_queries(queries);
        info!(
            "Generated {} search queries from {} keywords",
            queries.len(),
            keywords.len()
        );
        for query in &queries {
            debug!("  [{}] {}", query.strategy().priority(), query);
        }

        QueryPlan { keywords, queries }
    }

    async fn synonym_expansion(&self, topic: &Topic) -> Option<SearchQuery> {
        let mut groups = Vec::new();
        for token in topic.core_words() {
            let synonyms = self.extractor.token_synonyms(&token, topic).await;
            groups.push(TermGroup::new(token, synonyms));
        }
        SearchQuery::synonym_expansion(&groups)
    }

    async fn relaxations(&self, topic: &Topic, keywords: &[KeywordPhrase]) -> Vec<SearchQuery> {
        let subsets = relaxation_subsets(keywords);
        let rendered: Vec<String> = subsets
            .iter()
            .map(|s| SearchQuery::relaxation(s).text().to_string())
            .collect();

        let picks = self
            .extractor
            .rank_combinations(topic, &rendered, RELAXATION_PICKS)
            .await;

        picks
            .into_iter()
            .filter_map(|i| subsets.get(i))
            .map(|subset| SearchQuery::relaxation(subset))
            .collect()
    }
}

/// Drop repeated query strings, keeping the first occurrence.
fn dedup_queries(queries: Vec<SearchQuery>) -> Vec<SearchQuery> {
    let mut seen = HashSet::new();
    queries
        .into_iter()
        .filter(|q| seen.insert(q.text().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Reply, ScriptedGateway, text};
    use std::sync::Arc;
    use vte_domain::QueryStrategy;

    fn synthesizer(gateway: Arc<ScriptedGateway>) -> QuerySynthesizer {
        QuerySynthesizer::new(KeywordExtractor::new(gateway))
    }

    fn strategies(plan: &QueryPlan) -> Vec<QueryStrategy> {
        plan.queries.iter().map(|q| q.strategy()).collect()
    }

    #[tokio::test]
    async fn test_ammonia_cracking_end_to_end() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            text("\"ammonia\" \"cracking\""),
            text("NH3"),
            text("decomposition, thermal splitting"),
            text("NH3 decomposition\nammonia splitting"),
        ]));
        let plan = synthesizer(gateway.clone())
            .generate_search_queries(&Topic::new("ammonia cracking").unwrap())
            .await;

        assert_eq!(plan.keywords.len(), 2);
        assert_eq!(
            strategies(&plan),
            vec![
                QueryStrategy::SynonymExpansion,
                QueryStrategy::ExactAnd,
                QueryStrategy::TopicSynonym,
                QueryStrategy::TopicSynonym,
            ]
        );
        assert_eq!(
            plan.queries[0].text(),
            "(ammonia OR NH3) AND (cracking OR decomposition OR \"thermal splitting\")"
        );
        assert_eq!(plan.queries[1].text(), "\"ammonia\" AND \"cracking\"");
        assert!((2..=5).contains(&plan.queries.len()));
        // no ranking call: 1 extraction + 2 token synonym calls + 1 topic synonym call
        assert_eq!(gateway.call_count(), 4);
    }

    #[tokio::test]
    async fn test_no_relaxation_below_three_phrases() {
        let gateway = Arc::new(
            ScriptedGateway::new(vec![text("\"solid electrolyte\" \"lithium metal anode\"")])
                .with_default("-"),
        );
        let plan = synthesizer(gateway)
            .generate_search_queries(&Topic::new("solid electrolyte for lithium metal anode").unwrap())
            .await;
        assert!(!strategies(&plan).contains(&QueryStrategy::Relaxation));
    }

    #[tokio::test]
    async fn test_no_expansion_with_four_core_words() {
        let gateway = Arc::new(ScriptedGateway::new(vec![text("\"perovskite\" \"tandem cells\"")]).with_default("-"));
        let plan = synthesizer(gateway)
            .generate_search_queries(&Topic::new("perovskite silicon tandem solar cells").unwrap())
            .await;
        assert!(!strategies(&plan).contains(&QueryStrategy::SynonymExpansion));
        assert_eq!(plan.queries[0].strategy(), QueryStrategy::ExactAnd);
    }

    #[tokio::test]
    async fn test_relaxation_uses_ranked_subsets() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            text("\"green hydrogen\" \"alkaline electrolysis\" \"cost reduction\""),
            // topic has 6 core words: no expansion; topic synonyms:
            Reply::Fail,
            // ranking picks candidates 3 then 2
            text("3, 2"),
        ]));
        let plan = synthesizer(gateway)
            .generate_search_queries(
                &Topic::new("green hydrogen alkaline electrolysis cost reduction").unwrap(),
            )
            .await;

        let relaxed: Vec<&str> = plan
            .queries
            .iter()
            .filter(|q| q.strategy() == QueryStrategy::Relaxation)
            .map(|q| q.text())
            .collect();
        assert_eq!(
            relaxed,
            vec![
                "\"alkaline electrolysis\" AND \"cost reduction\"",
                "\"green hydrogen\" AND \"cost reduction\"",
            ]
        );
    }

    #[tokio::test]
    async fn test_relaxation_fallback_first_two_subsets() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            text("\"green hydrogen\" \"alkaline electrolysis\" \"cost reduction\""),
            Reply::Fail,
            Reply::Fail,
        ]));
        let plan = synthesizer(gateway)
            .generate_search_queries(
                &Topic::new("green hydrogen alkaline electrolysis cost reduction").unwrap(),
            )
            .await;

        let relaxed: Vec<&str> = plan
            .queries
            .iter()
            .filter(|q| q.strategy() == QueryStrategy::Relaxation)
            .map(|q| q.text())
            .collect();
        assert_eq!(
            relaxed,
            vec![
                "\"green hydrogen\" AND \"alkaline electrolysis\"",
                "\"green hydrogen\" AND \"cost reduction\"",
            ]
        );
    }

    #[tokio::test]
    async fn test_total_model_failure_still_yields_exact_query() {
        let gateway = Arc::new(ScriptedGateway::failing());
        let plan = synthesizer(gateway)
            .generate_search_queries(&Topic::new("zeolite membranes").unwrap())
            .await;
        assert_eq!(plan.keywords[0].as_str(), "zeolite membranes");
        assert!(
            plan.queries
                .iter()
                .any(|q| q.strategy() == QueryStrategy::ExactAnd
                    && q.text() == "\"zeolite membranes\"")
        );
    }

    #[test]
    fn test_dedup_queries_first_wins() {
        let a = SearchQuery::topic_synonym("ammonia");
        let b = SearchQuery::exact_and(&[KeywordPhrase::new("ammonia").unwrap()]);
        let deduped = dedup_queries(vec![b.clone(), a]);
        assert_eq!(deduped, vec![b]);
    }
}
