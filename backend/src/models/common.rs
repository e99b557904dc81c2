use serde::Deserialize;
use validator::Validate;

/// `?year=&month=` query shared by the per-month endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct MonthParams {
    #[validate(range(min = 1970, max = 9999))]
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: u8,
}

/// Optional year filter for holiday listings.
#[derive(Debug, Deserialize)]
pub struct YearParams {
    pub year: Option<i32>,
}
