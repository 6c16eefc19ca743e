use chrono::{Datelike, Days, NaiveDate};

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    next.expect("valid month start")
        .pred_opt()
        .expect("month start has a predecessor")
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// The Saturday on or after `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    date + Days::new(u64::from(6 - date.weekday().num_days_from_sunday()))
}

/// Every date shown for the month containing `reference`: whole
/// Sunday-start weeks from the week of the 1st through the week of the
/// last day. Always 28 to 42 entries.
pub fn month_grid(reference: NaiveDate) -> Vec<NaiveDate> {
    let start = week_start(month_start(reference));
    let end = week_end(month_end(reference));
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Reference date for the previous month: one day before the current
/// month's start, i.e. the last day of the previous month.
pub fn prev_month(reference: NaiveDate) -> NaiveDate {
    month_start(reference)
        .pred_opt()
        .expect("month start has a predecessor")
}

/// Reference date for the next month: one day after the current month's
/// end, i.e. the first day of the next month.
pub fn next_month(reference: NaiveDate) -> NaiveDate {
    month_end(reference)
        .succ_opt()
        .expect("month end has a successor")
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn grid_spans_whole_weeks() {
        for (y, m) in [(2024, 1), (2024, 2), (2024, 6), (2025, 2), (2030, 12)] {
            let grid = month_grid(d(y, m, 15));
            assert_eq!(grid.len() % 7, 0, "{y}-{m}");
            assert_eq!(grid.first().unwrap().weekday(), Weekday::Sun);
            assert_eq!(grid.last().unwrap().weekday(), Weekday::Sat);
        }
    }

    #[test]
    fn grid_contains_every_day_of_the_month() {
        let grid = month_grid(d(2024, 2, 10));
        let mut day = d(2024, 2, 1);
        while day <= d(2024, 2, 29) {
            assert!(grid.contains(&day), "missing {day}");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn june_2024_grid_is_42_days() {
        // 2024-06-01 is a Saturday, so the grid reaches back to the
        // previous Sunday and forward to the Saturday after the 30th.
        let grid = month_grid(d(2024, 6, 1));
        assert_eq!(grid.len(), 42);
        assert_eq!(grid[0], d(2024, 5, 26));
        assert_eq!(*grid.last().unwrap(), d(2024, 7, 6));
    }

    #[test]
    fn month_starting_on_sunday_gets_no_leading_week() {
        // September 2024 starts on a Sunday.
        let grid = month_grid(d(2024, 9, 1));
        assert_eq!(grid[0], d(2024, 9, 1));
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn perfectly_aligned_february_is_four_weeks() {
        // February 2026: 28 days, the 1st a Sunday, the 28th a Saturday.
        let grid = month_grid(d(2026, 2, 14));
        assert_eq!(grid.len(), 28);
        assert_eq!(grid[0], d(2026, 2, 1));
        assert_eq!(*grid.last().unwrap(), d(2026, 2, 28));
    }

    #[test]
    fn next_then_prev_round_trips_the_grid() {
        let reference = d(2024, 6, 15);
        let back = prev_month(next_month(reference));
        assert_eq!(month_grid(back), month_grid(reference));
    }

    #[test]
    fn navigation_steps_over_year_boundaries() {
        assert_eq!(next_month(d(2024, 12, 3)), d(2025, 1, 1));
        assert_eq!(prev_month(d(2025, 1, 20)), d(2024, 12, 31));
    }
}
