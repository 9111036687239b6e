use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Score payload posted when the player saves a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub username: String,
    pub score: u32,
    /// Empty for sessions started from an upload.
    pub topic: String,
    pub timestamp: DateTime<Utc>,
}

/// A saved score as listed by the leaderboard endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
    #[serde(default, deserialize_with = "empty_topic_as_none")]
    pub topic: Option<String>,
    pub timestamp: DateTime<Utc>,
}

fn empty_topic_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|topic| !topic.trim().is_empty()))
}

impl From<ScoreSubmission> for LeaderboardEntry {
    fn from(submission: ScoreSubmission) -> Self {
        let topic = Some(submission.topic).filter(|topic| !topic.trim().is_empty());
        Self {
            username: submission.username,
            score: submission.score,
            topic,
            timestamp: submission.timestamp,
        }
    }
}

//
// ─── RANKING ───────────────────────────────────────────────────────────────────
//

/// Podium styling for the first three rows of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTier {
    First,
    Second,
    Third,
    Other,
}

impl RankTier {
    #[must_use]
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            1 => RankTier::First,
            2 => RankTier::Second,
            3 => RankTier::Third,
            _ => RankTier::Other,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            RankTier::First => "top-score",
            RankTier::Second => "second-score",
            RankTier::Third => "third-score",
            RankTier::Other => "",
        }
    }
}

/// A leaderboard row with its 1-based rank within the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub rank: usize,
    pub tier: RankTier,
    pub entry: LeaderboardEntry,
}

/// Distinct non-empty topics in first-seen order, for the topic filter.
#[must_use]
pub fn distinct_topics(entries: &[LeaderboardEntry]) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for topic in entries.iter().filter_map(|entry| entry.topic.as_deref()) {
        if !topics.iter().any(|seen| seen == topic) {
            topics.push(topic.to_string());
        }
    }
    topics
}

/// Rank the entries matching `topic` (all entries when `None` or blank).
///
/// Entries keep the backend's order; ranks are positions in the filtered list.
#[must_use]
pub fn rank_entries(entries: &[LeaderboardEntry], topic: Option<&str>) -> Vec<RankedEntry> {
    let topic = topic.filter(|value| !value.trim().is_empty());
    entries
        .iter()
        .filter(|entry| topic.is_none_or(|wanted| entry.topic.as_deref() == Some(wanted)))
        .enumerate()
        .map(|(idx, entry)| RankedEntry {
            rank: idx + 1,
            tier: RankTier::from_rank(idx + 1),
            entry: entry.clone(),
        })
        .collect()
}

//
// ─── CSV EXPORT ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExportError {
    #[error("No data to export")]
    Empty,
}

/// Display format for leaderboard timestamps.
pub const LEADERBOARD_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[must_use]
pub fn format_entry_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format(LEADERBOARD_DATE_FORMAT).to_string()
}

/// Render ranked rows as CSV with a `Rank,User,Score,Topic,Date` header.
///
/// # Errors
///
/// Returns `ExportError::Empty` when there are no rows.
pub fn export_csv(rows: &[RankedEntry]) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut csv = String::from("Rank,User,Score,Topic,Date\n");
    for row in rows {
        let entry = &row.entry;
        // Writing into a String cannot fail.
        let _ = writeln!(
            csv,
            "{},{},{},{},{}",
            row.rank,
            quote(&entry.username),
            entry.score,
            quote(entry.topic.as_deref().unwrap_or_default()),
            format_entry_date(entry.timestamp),
        );
    }
    Ok(csv)
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn entry(name: &str, score: u32, topic: Option<&str>) -> LeaderboardEntry {
        LeaderboardEntry {
            username: name.to_string(),
            score,
            topic: topic.map(str::to_string),
            timestamp: fixed_now(),
        }
    }

    #[test]
    fn topics_are_distinct_in_first_seen_order() {
        let entries = vec![
            entry("a", 3, Some("Rust")),
            entry("b", 2, None),
            entry("c", 2, Some("Go")),
            entry("d", 1, Some("Rust")),
        ];
        assert_eq!(distinct_topics(&entries), vec!["Rust", "Go"]);
    }

    #[test]
    fn filter_reranks_from_one() {
        let entries = vec![
            entry("a", 3, Some("Rust")),
            entry("b", 2, Some("Go")),
            entry("c", 1, Some("Go")),
        ];
        let rows = rank_entries(&entries, Some("Go"));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].entry.username, "b");
        assert_eq!(rows[0].tier.css_class(), "top-score");
        assert_eq!(rows[1].tier, RankTier::Second);

        assert_eq!(rank_entries(&entries, Some("")).len(), 3);
        assert_eq!(rank_entries(&entries, None).len(), 3);
    }

    #[test]
    fn csv_export_quotes_text_columns() {
        let rows = rank_entries(&[entry("Ann \"A\"", 5, None)], None);
        let csv = export_csv(&rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Rank,User,Score,Topic,Date"));
        assert_eq!(
            lines.next(),
            Some("1,\"Ann \"\"A\"\"\",5,\"\",2023-11-14 22:13")
        );
    }

    #[test]
    fn csv_export_refuses_empty() {
        assert_eq!(export_csv(&[]).unwrap_err(), ExportError::Empty);
        assert_eq!(ExportError::Empty.to_string(), "No data to export");
    }

    #[test]
    fn blank_topic_submission_maps_to_none() {
        let submission = ScoreSubmission {
            username: "ann".into(),
            score: 1,
            topic: "  ".into(),
            timestamp: fixed_now(),
        };
        assert_eq!(LeaderboardEntry::from(submission).topic, None);
    }
}
