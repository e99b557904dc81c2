use time::{Date, Month};

use crate::models::holiday::{DatedHoliday, Holiday};

/// Read-only view over the holiday store.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: Vec<Holiday>,
}

impl HolidayCalendar {
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self { holidays }
    }

    pub fn is_holiday(&self, date: Date) -> bool {
        self.holidays.iter().any(|h| h.matches(date))
    }

    pub fn holiday_name(&self, date: Date) -> Option<&str> {
        self.holidays
            .iter()
            .find(|h| h.matches(date))
            .map(|h| h.name.as_str())
    }

    /// Recurring holidays projected onto `year` plus that year's one-off
    /// holidays, in date order. Entries with no such date in `year` (29 Feb in
    /// a common year) are skipped.
    pub fn holidays_for_year(&self, year: i32) -> Vec<DatedHoliday> {
        let mut dated: Vec<DatedHoliday> = self
            .holidays
            .iter()
            .filter(|h| h.year.map_or(true, |y| y == year))
            .filter_map(|h| {
                let month = Month::try_from(h.month).ok()?;
                let date = Date::from_calendar_date(year, month, h.day).ok()?;
                Some(DatedHoliday {
                    date,
                    name: h.name.clone(),
                })
            })
            .collect();
        dated.sort_by_key(|h| h.date);
        dated
    }
}

/// Built-in Kazakhstan public holidays, seeded into an empty holiday store.
pub fn default_holidays() -> Vec<Holiday> {
    [
        (1, 1, "New Year"),
        (2, 1, "New Year (second day)"),
        (7, 1, "Orthodox Christmas"),
        (8, 3, "International Women's Day"),
        (21, 3, "Nauryz"),
        (22, 3, "Nauryz (second day)"),
        (23, 3, "Nauryz (third day)"),
        (1, 5, "Unity Day of the People of Kazakhstan"),
        (7, 5, "Defender of the Fatherland Day"),
        (9, 5, "Victory Day"),
        (6, 7, "Capital Day"),
        (30, 8, "Constitution Day"),
        (1, 12, "First President Day"),
        (16, 12, "Independence Day"),
        (17, 12, "Independence Day (second day)"),
    ]
    .into_iter()
    .map(|(day, month, name)| Holiday::recurring(day, month, name))
    .collect()
}
