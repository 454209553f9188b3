use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Monday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Whole weeks between today's week and the week of `target`. Past weeks
/// clamp to 0 because the backend only pages forward from the current week.
pub fn week_offset_from_today(target: NaiveDate, today: NaiveDate) -> i64 {
    let diff = start_of_week(target) - start_of_week(today);
    (diff.num_days() / 7).max(0)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
