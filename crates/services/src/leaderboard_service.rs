use std::sync::Arc;

use log::{info, warn};

use quizera_core::model::{
    ExportError, LeaderboardEntry, RankedEntry, distinct_topics, export_csv, rank_entries,
};

use crate::backend::LeaderboardSource;
use crate::error::LeaderboardError;

/// Leaderboard as fetched once, with the topic list for its filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardSnapshot {
    entries: Vec<LeaderboardEntry>,
    topics: Vec<String>,
}

impl LeaderboardSnapshot {
    #[must_use]
    pub fn new(entries: Vec<LeaderboardEntry>) -> Self {
        let topics = distinct_topics(&entries);
        Self { entries, topics }
    }

    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows for the table; `topic` of `None` or `""` shows everything.
    #[must_use]
    pub fn rows(&self, topic: Option<&str>) -> Vec<RankedEntry> {
        rank_entries(&self.entries, topic)
    }

    /// CSV for the rows currently shown.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Empty` when the filtered view has no rows.
    pub fn csv(&self, topic: Option<&str>) -> Result<String, ExportError> {
        export_csv(&self.rows(topic))
    }
}

#[derive(Clone)]
pub struct LeaderboardService {
    source: Arc<dyn LeaderboardSource>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(source: Arc<dyn LeaderboardSource>) -> Self {
        Self { source }
    }

    /// # Errors
    ///
    /// Returns `LeaderboardError::Load` when the backend call fails.
    pub async fn load(&self) -> Result<LeaderboardSnapshot, LeaderboardError> {
        let entries = self.source.leaderboard().await.map_err(|err| {
            warn!("leaderboard load failed: {err}");
            LeaderboardError::Load(err)
        })?;
        Ok(LeaderboardSnapshot::new(entries))
    }

    /// # Errors
    ///
    /// Returns `LeaderboardError::Clear` when the backend refuses.
    pub async fn clear(&self) -> Result<(), LeaderboardError> {
        self.source.clear().await.map_err(|err| {
            warn!("leaderboard clear failed: {err}");
            LeaderboardError::Clear(err)
        })?;
        info!("leaderboard cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use quizera_core::time::fixed_now;

    fn entry(name: &str, score: u32, topic: &str) -> LeaderboardEntry {
        LeaderboardEntry {
            username: name.into(),
            score,
            topic: Some(topic.into()),
            timestamp: fixed_now(),
        }
    }

    #[tokio::test]
    async fn load_clear_and_filter() {
        let backend = InMemoryBackend::new().with_entries(vec![
            entry("bo", 2, "Go"),
            entry("ann", 5, "Rust"),
        ]);
        let svc = LeaderboardService::new(Arc::new(backend.clone()));

        let snapshot = svc.load().await.unwrap();
        assert_eq!(snapshot.rows(None)[0].entry.username, "ann");
        assert_eq!(snapshot.topics(), ["Rust".to_string(), "Go".to_string()]);
        assert_eq!(snapshot.rows(Some("Go")).len(), 1);
        assert!(snapshot.csv(Some("Python")).is_err());

        svc.clear().await.unwrap();
        assert!(svc.load().await.unwrap().is_empty());
    }
}
