/// Position summary for a take-session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    /// `position / total`, in `(0, 1]`.
    pub fraction: f64,
}

impl SessionProgress {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn new(current_index: usize, total: usize, answered: usize) -> Self {
        let position = current_index + 1;
        let fraction = if total == 0 {
            0.0
        } else {
            position as f64 / total as f64
        };
        Self {
            position,
            total,
            answered,
            fraction,
        }
    }

    /// Fraction as a whole percentage, rounded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        (self.fraction * 100.0).round().clamp(0.0, 100.0) as u8
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position == self.total
    }
}
