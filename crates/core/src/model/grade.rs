/// Display category for a grade. The grade itself is computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeBand {
    Excellent,
    Good,
    Average,
    Poor,
}

impl GradeBand {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Self::Excellent
        } else if percentage >= 60.0 {
            Self::Good
        } else if percentage >= 40.0 {
            Self::Average
        } else {
            Self::Poor
        }
    }

    /// Letters the backend does not document (`D`, `F`, empty) fall into `Poor`.
    #[must_use]
    pub fn from_letter(grade: &str) -> Self {
        match grade.trim() {
            "A+" | "A" => Self::Excellent,
            "B" => Self::Good,
            "C" => Self::Average,
            _ => Self::Poor,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::Poor => "poor",
        }
    }
}

/// Percentage at or above which an attempt counts as passed in leaderboard stats.
pub const PASS_PERCENTAGE: f64 = 50.0;
