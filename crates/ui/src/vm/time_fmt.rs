use chrono::NaiveDateTime;

/// Short date for attempt rows, e.g. `Mar 4, 09:30`.
#[must_use]
pub fn format_attempt_date(value: NaiveDateTime) -> String {
    value.format("%b %-d, %H:%M").to_string()
}

/// One decimal place with a percent sign.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}
