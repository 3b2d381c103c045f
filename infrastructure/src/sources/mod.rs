//! Research source adapters
//!
//! Thin mappers from external search APIs to [`Document`](vte_domain::Document)s,
//! each implementing the [`SourceFetcher`](vte_application::SourceFetcher) port:
//!
//! | Adapter | API | Category |
//! |---------|-----|----------|
//! | [`OpenAlexFetcher`] | OpenAlex works search | article |
//! | [`PatentsViewFetcher`] | PatentsView (USPTO) patent search | patent |
//! | [`TavilyNewsFetcher`] | Tavily search | news |

mod http;
mod openalex;
mod patentsview;
mod tavily;

pub use http::build_http_client;
pub use openalex::OpenAlexFetcher;
pub use patentsview::{PatentsViewFetcher, boolean_query_to_patentsview};
pub use tavily::TavilyNewsFetcher;

use crate::config::FileSourcesConfig;
use std::sync::Arc;
use tracing::debug;
use vte_application::SourceFetcher;

/// Enabled sources in fetch order: papers, patents, news.
///
/// Keyed sources are built even without a key; the research pipeline
/// skips them through [`SourceFetcher::check_available`].
pub fn configured_sources(
    config: &FileSourcesConfig,
    http: &reqwest::Client,
) -> Vec<Arc<dyn SourceFetcher>> {
    let mut sources: Vec<Arc<dyn SourceFetcher>> = Vec::new();

    if config.openalex.enabled {
        sources.push(Arc::new(OpenAlexFetcher::new(
            http.clone(),
            &config.openalex.base_url,
            &config.openalex.user_agent_email,
            &config.openalex.from_publication_date,
        )));
    }
    if config.uspto.enabled {
        sources.push(Arc::new(PatentsViewFetcher::new(
            http.clone(),
            &config.uspto.base_url,
            config.uspto.api_key(),
            &config.uspto.api_key_env,
        )));
    }
    if config.tavily.enabled {
        sources.push(Arc::new(TavilyNewsFetcher::new(
            http.clone(),
            &config.tavily.base_url,
            config.tavily.api_key(),
            &config.tavily.api_key_env,
        )));
    }

    debug!(
        "Configured sources: {:?}",
        sources.iter().map(|s| s.name()).collect::<Vec<_>>()
    );
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_sources_are_left_out() {
        let mut config = FileSourcesConfig::default();
        config.tavily.enabled = false;
        let sources = configured_sources(&config, &reqwest::Client::new());
        let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["OpenAlex", "USPTO"]);
    }

    #[test]
    fn test_keyed_source_without_key_is_unavailable() {
        let mut config = FileSourcesConfig::default();
        config.openalex.enabled = false;
        config.tavily.enabled = false;
        config.uspto.api_key_env = "VTE_TEST_UNSET_PATENT_KEY".into();
        let sources = configured_sources(&config, &reqwest::Client::new());
        assert_eq!(sources.len(), 1);
        assert!(sources[0].check_available().is_err());
    }
}
