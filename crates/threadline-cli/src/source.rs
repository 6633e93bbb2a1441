//! Where threads come from
//!
//! The renderer never talks to a backend. Chat and feed go through
//! [`ThreadSource`]; [`FixtureSource`] serves JSON files from a directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use threadline_core::{AnalysisResult, Thread, Trend};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Analysis fixture file name
pub const ANALYSIS_FILE: &str = "analysis.json";
/// Trending fixture file name
pub const TRENDING_FILE: &str = "trending.json";

/// Errors raised while fetching threads
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Fixture not found: {}", .0.display())]
    MissingFixture(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// A thread surfaced by a trending topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingThread {
    pub trend: Trend,
    pub thread: Thread,
}

#[async_trait]
pub trait ThreadSource: Send + Sync {
    /// Threads relevant to a query or pasted article
    async fn analyze(&self, query: &str) -> SourceResult<AnalysisResult>;

    /// Threads attached to currently trending topics
    async fn trending(&self) -> SourceResult<Vec<TrendingThread>>;
}

/// Serves `analysis.json` and `trending.json` from a directory.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    dir: PathBuf,
}

impl FixtureSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read<T: serde::de::DeserializeOwned>(&self, name: &str) -> SourceResult<T> {
        let path = self.dir.join(name);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::MissingFixture(path))
            }
            Err(source) => return Err(SourceError::Io { path, source }),
        };
        serde_json::from_str(&contents).map_err(|source| SourceError::Parse { path, source })
    }
}

/// Case-insensitive match against the topic and article titles.
fn thread_matches(thread: &Thread, terms: &[String]) -> bool {
    let topic = thread.central_topic.to_lowercase();
    terms.iter().any(|term| {
        topic.contains(term)
            || thread
                .articles
                .iter()
                .any(|a| a.title.to_lowercase().contains(term))
    })
}

#[async_trait]
impl ThreadSource for FixtureSource {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn analyze(&self, query: &str) -> SourceResult<AnalysisResult> {
        let mut result: AnalysisResult = self.read(ANALYSIS_FILE).await?;

        let terms: Vec<String> = query
            .split_whitespace()
            .filter(|t| t.len() > 2)
            .map(str::to_lowercase)
            .collect();
        if !terms.is_empty() {
            result.threads.retain(|t| thread_matches(t, &terms));
        }
        if result.query_id.is_empty() {
            result.query_id = Uuid::new_v4().to_string();
        }

        debug!(threads = result.threads.len(), "analysis loaded from fixtures");
        Ok(result)
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn trending(&self) -> SourceResult<Vec<TrendingThread>> {
        let trending: Vec<TrendingThread> = self.read(TRENDING_FILE).await?;
        debug!(count = trending.len(), "trending threads loaded from fixtures");
        Ok(trending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ANALYSIS: &str = r#"{
        "query_id": "",
        "extracted_topics": ["housing"],
        "threads": [
            {"thread_id": "t1", "thread_type": "evergreen", "central_topic": "Housing costs",
             "relevance_score": 0.9, "articles": []},
            {"thread_id": "t2", "thread_type": "event_driven", "central_topic": "Elections",
             "relevance_score": 0.7,
             "articles": [{"article_id": "a1", "title": "The housing vote", "relevance_score": 0.5}]}
        ]
    }"#;

    fn fixtures() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(ANALYSIS_FILE), ANALYSIS).unwrap();
        dir
    }

    #[tokio::test]
    async fn analyze_filters_by_topic_and_titles() {
        let dir = fixtures();
        let source = FixtureSource::new(dir.path());

        let result = source.analyze("housing").await.unwrap();
        let ids: Vec<&str> = result.threads.iter().map(|t| t.thread_id.as_str()).collect();
        assert_eq!(ids, ["t1", "t2"]);
        assert!(!result.query_id.is_empty());

        let result = source.analyze("elections").await.unwrap();
        assert_eq!(result.threads.len(), 1);

        let result = source.analyze("weather").await.unwrap();
        assert!(result.threads.is_empty());
    }

    #[tokio::test]
    async fn missing_fixture_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = FixtureSource::new(dir.path()).trending().await.unwrap_err();
        assert!(matches!(err, SourceError::MissingFixture(_)));
    }

    #[tokio::test]
    async fn malformed_fixture_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TRENDING_FILE), "{not json").unwrap();
        let err = FixtureSource::new(dir.path()).trending().await.unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse"));
    }
}
