use crate::model::attempt::AttemptSummary;
use crate::model::grade::PASS_PERCENTAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderboardSort {
    #[default]
    ByPercentage,
    ByDate,
}

/// Podium position; only meaningful while sorted by percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTier {
    Gold,
    Silver,
    Bronze,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderboardStats {
    pub average: f64,
    pub top: f64,
    pub pass_rate: f64,
}

/// Attempts on one quiz, with the viewer's sort and filter choices layered on top.
///
/// Stats are computed over every attempt, not just the filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    rows: Vec<AttemptSummary>,
    sort: LeaderboardSort,
    viewer: Option<String>,
    mine_only: bool,
}

impl Leaderboard {
    /// Build a board sorted by percentage, best first.
    #[must_use]
    pub fn new(rows: Vec<AttemptSummary>, viewer: Option<String>) -> Self {
        let mut board = Self {
            rows,
            sort: LeaderboardSort::ByPercentage,
            viewer,
            mine_only: false,
        };
        board.sort_by(LeaderboardSort::ByPercentage);
        board
    }

    pub fn sort_by(&mut self, sort: LeaderboardSort) {
        self.sort = sort;
        match sort {
            LeaderboardSort::ByPercentage => self
                .rows
                .sort_by(|a, b| b.percentage.total_cmp(&a.percentage)),
            LeaderboardSort::ByDate => self.rows.sort_by(|a, b| b.attempt_date.cmp(&a.attempt_date)),
        }
    }

    #[must_use]
    pub fn sort(&self) -> LeaderboardSort {
        self.sort
    }

    pub fn toggle_mine_only(&mut self) {
        self.mine_only = !self.mine_only;
    }

    #[must_use]
    pub fn mine_only(&self) -> bool {
        self.mine_only
    }

    #[must_use]
    pub fn is_viewer(&self, username: &str) -> bool {
        self.viewer.as_deref() == Some(username)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows after the "my attempts" filter, in the current sort order.
    #[must_use]
    pub fn visible(&self) -> Vec<&AttemptSummary> {
        self.rows
            .iter()
            .filter(|row| !self.mine_only || self.is_viewer(&row.username))
            .collect()
    }

    #[must_use]
    pub fn rank_tier(&self, index: usize) -> RankTier {
        if self.sort != LeaderboardSort::ByPercentage {
            return RankTier::Normal;
        }
        match index {
            0 => RankTier::Gold,
            1 => RankTier::Silver,
            2 => RankTier::Bronze,
            _ => RankTier::Normal,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> LeaderboardStats {
        if self.rows.is_empty() {
            return LeaderboardStats {
                average: 0.0,
                top: 0.0,
                pass_rate: 0.0,
            };
        }
        let count = self.rows.len() as f64;
        let sum: f64 = self.rows.iter().map(|row| row.percentage).sum();
        let top = self
            .rows
            .iter()
            .map(|row| row.percentage)
            .fold(f64::MIN, f64::max);
        let passed = self
            .rows
            .iter()
            .filter(|row| row.percentage >= PASS_PERCENTAGE)
            .count() as f64;

        LeaderboardStats {
            average: sum / count,
            top,
            pass_rate: passed / count * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttemptId;
    use chrono::NaiveDate;

    fn row(id: u64, user: &str, percentage: f64, day: u32) -> AttemptSummary {
        AttemptSummary {
            attempt_id: AttemptId::new(id),
            username: user.into(),
            quiz_title: "Quiz".into(),
            score: 0,
            total_questions: 4,
            percentage,
            grade: "B".into(),
            attempt_date: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    fn board() -> Leaderboard {
        Leaderboard::new(
            vec![
                row(1, "ana", 50.0, 1),
                row(2, "ben", 100.0, 2),
                row(3, "ana", 25.0, 3),
                row(4, "cy", 75.0, 4),
            ],
            Some("ana".into()),
        )
    }

    #[test]
    fn default_sort_is_best_percentage_first() {
        let board = board();
        let ids: Vec<u64> = board.visible().iter().map(|r| r.attempt_id.value()).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
        assert_eq!(board.rank_tier(0), RankTier::Gold);
        assert_eq!(board.rank_tier(2), RankTier::Bronze);
        assert_eq!(board.rank_tier(3), RankTier::Normal);
    }

    #[test]
    fn date_sort_is_newest_first_and_drops_podium() {
        let mut board = board();
        board.sort_by(LeaderboardSort::ByDate);
        let ids: Vec<u64> = board.visible().iter().map(|r| r.attempt_id.value()).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
        assert_eq!(board.rank_tier(0), RankTier::Normal);
    }

    #[test]
    fn mine_only_filters_by_viewer_but_stats_cover_everyone() {
        let mut board = board();
        board.toggle_mine_only();
        let visible = board.visible();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|r| board.is_viewer(&r.username)));

        let stats = board.stats();
        assert!((stats.average - 62.5).abs() < f64::EPSILON);
        assert!((stats.top - 100.0).abs() < f64::EPSILON);
        assert!((stats.pass_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_board_stats_are_zero() {
        let board = Leaderboard::new(Vec::new(), None);
        assert!(board.is_empty());
        let stats = board.stats();
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.top, 0.0);
        assert_eq!(stats.pass_rate, 0.0);
    }
}
