use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Serialize;

/// Width of every query window, in seconds.
pub const WINDOW_SECS: i64 = 3600;

pub const DEFAULT_HOUR: u32 = 12;

/// One-hour UTC window `[start, end)` in UNIX seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    /// Window ending at `hour`:00 UTC on `date`. Hours above 23 are clamped.
    pub fn ending_at(date: NaiveDate, hour: u32) -> Self {
        let hour = hour.min(23);
        let end = date.and_time(NaiveTime::MIN).and_utc().timestamp() + i64::from(hour) * 3600;
        Self {
            start: end - WINDOW_SECS,
            end,
        }
    }
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_one_hour_wide() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        for hour in 0..24 {
            let window = TimeWindow::ending_at(date, hour);
            assert_eq!(window.end - window.start, WINDOW_SECS);
        }
    }

    #[test]
    fn window_ends_at_selected_hour() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let window = TimeWindow::ending_at(date, 12);
        // 2024-01-01T12:00:00Z
        assert_eq!(window.end, 1_704_110_400);
        assert_eq!(window.start, 1_704_106_800);
    }

    #[test]
    fn midnight_reaches_into_previous_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let window = TimeWindow::ending_at(date, 0);
        assert_eq!(window.end, 1_704_067_200);
        assert_eq!(window.start, 1_704_063_600);
    }

    #[test]
    fn hour_is_clamped() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(TimeWindow::ending_at(date, 99), TimeWindow::ending_at(date, 23));
    }
}
