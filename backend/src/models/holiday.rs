use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;
use validator::Validate;

/// A public holiday. Without a year it recurs on the same day every year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Holiday {
    pub id: Uuid,
    pub day: u8,
    pub month: u8,
    pub year: Option<i32>,
    pub name: String,
}

impl Holiday {
    pub fn recurring(day: u8, month: u8, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            day,
            month,
            year: None,
            name: name.into(),
        }
    }

    pub fn one_off(day: u8, month: u8, year: i32, name: impl Into<String>) -> Self {
        Self {
            year: Some(year),
            ..Self::recurring(day, month, name)
        }
    }

    pub fn matches(&self, date: Date) -> bool {
        self.day == date.day()
            && self.month == u8::from(date.month())
            && self.year.map_or(true, |y| y == date.year())
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHolidayRequest {
    #[validate(range(min = 1, max = 31))]
    pub day: u8,
    #[validate(range(min = 1, max = 12))]
    pub month: u8,
    pub year: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// A holiday projected onto a concrete date of one year.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DatedHoliday {
    pub date: Date,
    pub name: String,
}
