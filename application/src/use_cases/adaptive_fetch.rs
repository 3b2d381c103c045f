//! Adaptive fetch controller
//!
//! Drives one source through the query list, most precise query first,
//! deduplicating results and stopping as soon as enough unique documents
//! have been collected.
//!
//! Stop rules, checked after each query:
//! 1. after the first query only: it added at least half of `limit`
//! 2. after any query: the collected count reached `limit`
//!
//! A failing query is logged and counts as zero results.

use crate::ports::progress::{NoProgress, ResearchProgressNotifier};
use crate::ports::source_fetcher::SourceError;
use serde::Serialize;
use std::collections::HashSet;
use std::future::Future;
use tracing::{debug, info, warn};
use vte_domain::{DedupKey, Document, SearchQuery};

/// Why the controller stopped issuing queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The first query alone added at least half of the limit
    FirstQuerySufficient,
    /// The limit was reached
    LimitReached,
    /// Every query was tried
    QueriesExhausted,
}

/// Outcome of one executed query
#[derive(Debug, Clone, Serialize)]
pub struct QueryStat {
    pub query: SearchQuery,
    pub returned: usize,
    pub added: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchReport {
    pub source: String,
    pub documents: Vec<Document>,
    pub stats: Vec<QueryStat>,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone, Copy)]
pub struct AdaptiveFetchController {
    limit: usize,
}

impl AdaptiveFetchController {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run `fetch_fn` over `queries` in order.
    ///
    /// Given identical source responses the result and its order are fully
    /// deterministic. A zero limit returns immediately without fetching.
    pub async fn run<F, Fut>(
        &self,
        source: &str,
        queries: &[SearchQuery],
        mut fetch_fn: F,
        progress: &dyn ResearchProgressNotifier,
    ) -> FetchReport
    where
        F: FnMut(SearchQuery) -> Fut,
        Fut: Future<Output = Result<Vec<Document>, SourceError>>,
    {
        let mut documents: Vec<Document> = Vec::new();
        let mut seen: HashSet<DedupKey> = HashSet::new();
        let mut stats = Vec::new();
        let mut stop_reason = StopReason::QueriesExhausted;

        if self.limit == 0 {
            return FetchReport {
                source: source.to_string(),
                documents,
                stats,
                stop_reason: StopReason::LimitReached,
            };
        }

        for (index, query) in queries.iter().enumerate() {
            debug!("[{}] query {}: {}", source, index + 1, query);

            let (batch, error) = match fetch_fn(query.clone()).await {
                Ok(batch) => (batch, None),
                Err(e) => {
                    warn!("[{}] query failed, treating as empty: {}", source, e);
                    (Vec::new(), Some(e.to_string()))
                }
            };

            let returned = batch.len();
            let mut added = 0;
            for doc in batch {
                if seen.insert(doc.dedup_key()) {
                    documents.push(doc);
                    added += 1;
                }
            }

            progress.on_query_complete(source, query, added, documents.len());
            stats.push(QueryStat {
                query: query.clone(),
                returned,
                added,
                error,
            });

            if index == 0 && 2 * added >= self.limit {
                info!(
                    "[{}] first query added {} of {}, skipping broader queries",
                    source, added, self.limit
                );
                stop_reason = StopReason::FirstQuerySufficient;
                break;
            }
            if documents.len() >= self.limit {
                stop_reason = StopReason::LimitReached;
                break;
            }
        }

        documents.truncate(self.limit);
        info!(
            "[{}] collected {} documents with {} queries",
            source,
            documents.len(),
            stats.len()
        );

        FetchReport {
            source: source.to_string(),
            documents,
            stats,
            stop_reason,
        }
    }
}

/// Convenience wrapper returning only the documents.
pub async fn adaptive_fetch<F, Fut>(
    fetch_fn: F,
    queries: &[SearchQuery],
    limit: usize,
    source: &str,
) -> Vec<Document>
where
    F: FnMut(SearchQuery) -> Fut,
    Fut: Future<Output = Result<Vec<Document>, SourceError>>,
{
    AdaptiveFetchController::new(limit)
        .run(source, queries, fetch_fn, &NoProgress)
        .await
        .documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::docs;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use vte_domain::KeywordPhrase;

    fn queries(n: usize) -> Vec<SearchQuery> {
        (0..n)
            .map(|i| SearchQuery::topic_synonym(&format!("query {i}")))
            .collect()
    }

    type Script = Arc<Mutex<VecDeque<Result<Vec<Document>, SourceError>>>>;

    fn script(batches: Vec<Result<Vec<Document>, SourceError>>) -> (Script, Arc<Mutex<usize>>) {
        (Arc::new(Mutex::new(batches.into())), Arc::new(Mutex::new(0)))
    }

    fn fetcher(
        script: Script,
        calls: Arc<Mutex<usize>>,
    ) -> impl FnMut(SearchQuery) -> std::future::Ready<Result<Vec<Document>, SourceError>> {
        move |_query| {
            *calls.lock().unwrap() += 1;
            let next = script
                .lock()
                .unwrap()
                .pop_front()
                .expect("fetch called more often than scripted");
            std::future::ready(next)
        }
    }

    #[tokio::test]
    async fn test_early_stop_after_precise_first_query() {
        // second batch would panic if requested
        let (s, calls) = script(vec![Ok(docs("a", 10))]);
        let result = adaptive_fetch(fetcher(s, calls.clone()), &queries(3), 10, "test").await;
        assert_eq!(result.len(), 10);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_half_limit_on_first_query_stops() {
        let (s, calls) = script(vec![Ok(docs("a", 5))]);
        let report = AdaptiveFetchController::new(10)
            .run("test", &queries(3), fetcher(s, calls.clone()), &NoProgress)
            .await;
        assert_eq!(report.documents.len(), 5);
        assert_eq!(report.stop_reason, StopReason::FirstQuerySufficient);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_continues_and_dedups_until_limit() {
        let (s, calls) = script(vec![
            Ok(docs("a", 3)),
            // a1, a2 repeat, 4 new
            Ok([docs("a", 3), docs("b", 4)].concat()),
            Ok(docs("c", 5)),
        ]);
        let report = AdaptiveFetchController::new(10)
            .run("test", &queries(4), fetcher(s, calls.clone()), &NoProgress)
            .await;

        assert_eq!(report.stop_reason, StopReason::LimitReached);
        assert_eq!(report.documents.len(), 10);
        assert_eq!(*calls.lock().unwrap(), 3);
        assert_eq!(report.stats[1].returned, 7);
        assert_eq!(report.stats[1].added, 4);

        let keys: HashSet<_> = report.documents.iter().map(|d| d.dedup_key()).collect();
        assert_eq!(keys.len(), report.documents.len());
        // insertion order preserved
        assert_eq!(report.documents[0].id.as_deref(), Some("a0"));
        assert_eq!(report.documents[3].id.as_deref(), Some("b0"));
        assert_eq!(report.documents[9].id.as_deref(), Some("c2"));
    }

    #[tokio::test]
    async fn test_failing_query_counts_as_empty() {
        let (s, calls) = script(vec![
            Err(SourceError::RequestFailed("timeout".into())),
            Ok(docs("b", 2)),
        ]);
        let report = AdaptiveFetchController::new(10)
            .run("test", &queries(2), fetcher(s, calls.clone()), &NoProgress)
            .await;

        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.stop_reason, StopReason::QueriesExhausted);
        assert!(report.stats[0].error.is_some());
        assert_eq!(report.stats[0].added, 0);
    }

    #[tokio::test]
    async fn test_never_exceeds_limit() {
        for limit in 1..8 {
            let (s, calls) = script(vec![Ok(docs("a", 2)), Ok(docs("b", 20)), Ok(docs("c", 20))]);
            let result = adaptive_fetch(fetcher(s, calls), &queries(3), limit, "test").await;
            assert!(result.len() <= limit, "limit {limit} gave {}", result.len());
        }
    }

    #[tokio::test]
    async fn test_zero_limit_does_not_fetch() {
        let (s, calls) = script(vec![]);
        let result = adaptive_fetch(fetcher(s, calls.clone()), &queries(2), 0, "test").await;
        assert!(result.is_empty());
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_passes_queries_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = {
            let seen = seen.clone();
            move |q: SearchQuery| {
                seen.lock().unwrap().push(q.text().to_string());
                std::future::ready(Ok::<_, SourceError>(Vec::new()))
            }
        };
        let qs = vec![
            SearchQuery::exact_and(&[KeywordPhrase::new("ammonia").unwrap()]),
            SearchQuery::topic_synonym("NH3 decomposition"),
        ];
        adaptive_fetch(recorder, &qs, 5, "test").await;
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["\"ammonia\"".to_string(), "\"NH3 decomposition\"".to_string()]
        );
    }
}
