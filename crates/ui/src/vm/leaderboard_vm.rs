use quiz_core::model::{AttemptId, GradeBand, Leaderboard, RankTier};

use crate::vm::time_fmt::{format_attempt_date, format_percentage};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRowVm {
    pub attempt_id: AttemptId,
    pub rank_label: String,
    pub rank_class: &'static str,
    pub username: String,
    pub is_me: bool,
    pub score_label: String,
    pub percentage_label: String,
    pub percentage_class: &'static str,
    pub grade: String,
    pub grade_class: &'static str,
    pub date_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardStatsVm {
    pub attempts: usize,
    pub average: String,
    pub top: String,
    pub pass_rate: String,
}

/// Visible rows in display order. Medals only apply while sorted by percentage.
#[must_use]
pub fn map_leaderboard_rows(board: &Leaderboard) -> Vec<LeaderboardRowVm> {
    board
        .visible()
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let tier = board.rank_tier(index);
            LeaderboardRowVm {
                attempt_id: row.attempt_id,
                rank_label: rank_label(tier, index),
                rank_class: rank_class(tier),
                username: row.username.clone(),
                is_me: board.is_viewer(&row.username),
                score_label: format!("{} / {}", row.score, row.total_questions),
                percentage_label: format_percentage(row.percentage),
                percentage_class: GradeBand::from_percentage(row.percentage).css_class(),
                grade: row.grade.clone(),
                grade_class: row.band().css_class(),
                date_label: format_attempt_date(row.attempt_date),
            }
        })
        .collect()
}

#[must_use]
pub fn map_leaderboard_stats(board: &Leaderboard) -> LeaderboardStatsVm {
    let stats = board.stats();
    LeaderboardStatsVm {
        attempts: board.len(),
        average: format_percentage(stats.average),
        top: format_percentage(stats.top),
        pass_rate: format_percentage(stats.pass_rate),
    }
}

fn rank_label(tier: RankTier, index: usize) -> String {
    match tier {
        RankTier::Gold => "🥇".to_string(),
        RankTier::Silver => "🥈".to_string(),
        RankTier::Bronze => "🥉".to_string(),
        RankTier::Normal => format!("#{}", index + 1),
    }
}

fn rank_class(tier: RankTier) -> &'static str {
    match tier {
        RankTier::Gold => "gold",
        RankTier::Silver => "silver",
        RankTier::Bronze => "bronze",
        RankTier::Normal => "normal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quiz_core::model::{AttemptSummary, LeaderboardSort};

    fn row(id: u64, username: &str, percentage: f64, day: u32) -> AttemptSummary {
        AttemptSummary {
            attempt_id: AttemptId::new(id),
            username: username.into(),
            quiz_title: "Rust".into(),
            score: 0,
            total_questions: 4,
            percentage,
            grade: "C".into(),
            attempt_date: NaiveDate::from_ymd_opt(2024, 2, day)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    fn board() -> Leaderboard {
        Leaderboard::new(
            vec![
                row(1, "ana", 40.0, 1),
                row(2, "bo", 90.0, 2),
                row(3, "cy", 70.0, 3),
                row(4, "ana", 60.0, 4),
            ],
            Some("ana".into()),
        )
    }

    #[test]
    fn podium_medals_then_numbers() {
        let rows = map_leaderboard_rows(&board());
        let labels: Vec<&str> = rows.iter().map(|r| r.rank_label.as_str()).collect();
        assert_eq!(labels, vec!["🥇", "🥈", "🥉", "#4"]);
        assert_eq!(rows[0].rank_class, "gold");
        assert!(rows[2].is_me);
        assert!(!rows[0].is_me);
    }

    #[test]
    fn date_sort_drops_medals() {
        let mut board = board();
        board.sort_by(LeaderboardSort::ByDate);
        let rows = map_leaderboard_rows(&board);
        assert_eq!(rows[0].rank_label, "#1");
        assert_eq!(rows[0].attempt_id, AttemptId::new(4));
    }

    #[test]
    fn stats_cover_all_rows_even_when_filtered() {
        let mut board = board();
        board.toggle_mine_only();
        assert_eq!(map_leaderboard_rows(&board).len(), 2);
        let stats = map_leaderboard_stats(&board);
        assert_eq!(stats.attempts, 4);
        assert_eq!(stats.average, "65.0%");
        assert_eq!(stats.top, "90.0%");
        assert_eq!(stats.pass_rate, "75.0%");
    }
}
