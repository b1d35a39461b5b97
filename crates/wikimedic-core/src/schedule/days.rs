//! Day-range generation: the weekly strip and the monthly calendar grid.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Number of days in the agenda's day strip.
pub const WEEK_LENGTH: usize = 7;

/// Sunday-first weekday abbreviations.
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// One selectable calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayDescriptor {
    /// Day of month, 1-31
    pub day_number: u32,
    /// Localized weekday abbreviation
    pub day_name: &'static str,
    /// The calendar date itself
    pub full_date: NaiveDate,
}

impl DayDescriptor {
    pub fn new(full_date: NaiveDate) -> Self {
        Self {
            day_number: full_date.day(),
            day_name: WEEKDAY_ABBREVIATIONS[full_date.weekday().num_days_from_sunday() as usize],
            full_date,
        }
    }

    /// The date truncated to 00:00:00.
    pub fn midnight(&self) -> NaiveDateTime {
        self.full_date.and_time(NaiveTime::MIN)
    }

    /// Zero-padded day number, as shown in the calendar grid.
    pub fn padded_number(&self) -> String {
        format!("{:02}", self.day_number)
    }
}

/// `count` consecutive calendar days starting at `start`.
///
/// Steps by calendar day, not by 24h, so DST transitions never skip or
/// repeat a date.
pub fn day_range(start: NaiveDate, count: usize) -> Vec<DayDescriptor> {
    start.iter_days().take(count).map(DayDescriptor::new).collect()
}

/// The agenda strip: today and the following six days.
pub fn week_from(today: NaiveDate) -> Vec<DayDescriptor> {
    day_range(today, WEEK_LENGTH)
}

/// Today's date as seen in `tz`.
pub fn today_in<Tz: TimeZone>(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

/// A (year, month) position in the appointment-creation calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthCursor {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl MonthCursor {
    /// Returns `None` for a month outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Move by `delta` months, wrapping across years. `None` when the
    /// resulting year does not fit in an `i32`.
    pub fn shift(self, delta: i32) -> Option<Self> {
        let month_index = i32::try_from(self.month).ok()?.checked_sub(1)?;
        let index = self
            .year
            .checked_mul(12)?
            .checked_add(month_index)?
            .checked_add(delta)?;
        Some(Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        })
    }

    /// e.g. "Março 2024"
    pub fn title(&self) -> String {
        let name = self
            .month
            .checked_sub(1)
            .and_then(|i| MONTH_NAMES.get(i as usize))
            .copied()
            .unwrap_or_default();
        format!("{} {}", name, self.year)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.shift(1)?.first_day()?.pred_opt()
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().map(|d| d.day()).unwrap_or(0)
    }

    /// Placeholders before the 1st in a Sunday-first grid.
    pub fn first_day_of_week(&self) -> u32 {
        self.first_day()
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// Calendar grid: `first_day_of_week` blanks, then every day of the month.
    pub fn grid(&self) -> Vec<Option<DayDescriptor>> {
        let Some(first) = self.first_day() else {
            return Vec::new();
        };
        let blanks = self.first_day_of_week() as usize;

        std::iter::repeat(None)
            .take(blanks)
            .chain(
                day_range(first, self.days_in_month() as usize)
                    .into_iter()
                    .map(Some),
            )
            .collect()
    }
}

/// Calendar grid for a month; an out-of-range month gives an empty grid.
pub fn month_grid(year: i32, month: u32) -> Vec<Option<DayDescriptor>> {
    MonthCursor::new(year, month)
        .map(|cursor| cursor.grid())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_from_march_first() {
        let week = week_from(date(2024, 3, 1));

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].full_date, date(2024, 3, 1));
        assert_eq!(week[6].full_date, date(2024, 3, 7));
        assert_eq!(week[0].day_name, "Sex");
        assert_eq!(week[2].day_name, "Dom");
        assert_eq!(week[0].midnight(), date(2024, 3, 1).and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_range_crosses_month_and_year() {
        let days = day_range(date(2023, 12, 30), 4);
        let dates: Vec<_> = days.iter().map(|d| d.full_date).collect();
        assert_eq!(
            dates,
            vec![date(2023, 12, 30), date(2023, 12, 31), date(2024, 1, 1), date(2024, 1, 2)]
        );
    }

    #[test]
    fn test_empty_range() {
        assert!(day_range(date(2024, 3, 1), 0).is_empty());
    }

    #[test]
    fn test_march_2024_grid() {
        let grid = month_grid(2024, 3);
        // March 1st 2024 is a Friday
        assert_eq!(grid.iter().take_while(|d| d.is_none()).count(), 5);
        assert_eq!(grid.iter().filter(|d| d.is_some()).count(), 31);
        assert_eq!(grid[5].as_ref().unwrap().day_number, 1);
        assert_eq!(grid.last().unwrap().as_ref().unwrap().day_number, 31);
    }

    #[test]
    fn test_february_lengths() {
        assert_eq!(MonthCursor::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthCursor::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthCursor::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthCursor::new(2000, 2).unwrap().days_in_month(), 29);
    }

    #[test]
    fn test_sunday_start_has_no_blanks() {
        // September 2024 starts on a Sunday
        let grid = month_grid(2024, 9);
        assert!(grid[0].is_some());
        assert_eq!(grid.len(), 30);
    }

    #[test]
    fn test_invalid_month() {
        assert!(MonthCursor::new(2024, 13).is_none());
        assert!(month_grid(2024, 0).is_empty());
    }

    #[test]
    fn test_shift_wraps_years() {
        let jan = MonthCursor::new(2024, 1).unwrap();
        assert_eq!(jan.shift(-1), MonthCursor::new(2023, 12));
        assert_eq!(jan.shift(11), MonthCursor::new(2024, 12));
        assert_eq!(jan.shift(12), MonthCursor::new(2025, 1));
        assert_eq!(jan.shift(-25), MonthCursor::new(2021, 12));
    }

    #[test]
    fn test_shift_out_of_range() {
        let jan = MonthCursor::new(2024, 1).unwrap();
        assert_eq!(jan.shift(i32::MAX), None);

        let far = MonthCursor::new(i32::MAX, 12).unwrap();
        assert_eq!(far.shift(1), None);
        assert_eq!(far.last_day(), None);
        assert!(far.grid().is_empty());
    }

    #[test]
    fn test_title_and_padding() {
        assert_eq!(MonthCursor::new(2024, 3).unwrap().title(), "Março 2024");
        assert_eq!(DayDescriptor::new(date(2024, 3, 5)).padded_number(), "05");
    }
}
