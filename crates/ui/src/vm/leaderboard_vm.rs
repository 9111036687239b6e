use quizera_core::model::{RankedEntry, format_entry_date};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRowVm {
    pub rank: usize,
    pub class: &'static str,
    pub username: String,
    pub score: u32,
    pub topic: String,
    pub date: String,
}

impl From<&RankedEntry> for LeaderboardRowVm {
    fn from(row: &RankedEntry) -> Self {
        Self {
            rank: row.rank,
            class: row.tier.css_class(),
            username: row.entry.username.clone(),
            score: row.entry.score,
            topic: row.entry.topic.clone().unwrap_or_else(|| "-".into()),
            date: format_entry_date(row.entry.timestamp),
        }
    }
}

#[must_use]
pub fn map_leaderboard_rows(rows: &[RankedEntry]) -> Vec<LeaderboardRowVm> {
    rows.iter().map(LeaderboardRowVm::from).collect()
}
