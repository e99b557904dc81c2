//! Schedule engine.
//!
//! Everything under this module is pure and synchronous: it takes an employee's
//! schedule policy, a holiday calendar and a month, and produces day records or
//! attendance verdicts. Persistence, submission and transport live elsewhere.

pub mod attendance;
pub mod clock;
pub mod complex;
pub mod holiday;
pub mod month;
pub mod pattern;
pub mod policy;
pub mod shift;
pub mod stats;
pub mod synth;

use time::{macros::date, Date, UtcOffset};

pub use attendance::{classify_arrival, merge_check_in, ArrivalStatus, ArrivalVerdict, CheckIn};
pub use complex::{ComplexSchedule, CycleSlot, ScheduleBlock, WorkDay};
pub use holiday::HolidayCalendar;
pub use month::{generate_month, summarize};
pub use pattern::{is_work_day, rotation_offset};
pub use policy::{BreakWindow, DailyShift, Pattern, Rotation, Tolerances, WorkSchedule, WorkWeek};
pub use shift::{build_shift, shift_for, standard_breaks, Shift};
pub use stats::calculate_stats;
pub use synth::{fill_missing, synthesize};

/// Anchor used for rotating patterns when an employee has none of their own.
pub const DEFAULT_ANCHOR: Date = date!(2024 - 01 - 01);

/// Process-wide inputs to every schedule computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSettings {
    /// Local reference used to turn local clock times into instants.
    pub utc_offset: UtcOffset,
    pub default_anchor: Date,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            utc_offset: UtcOffset::UTC,
            default_anchor: DEFAULT_ANCHOR,
        }
    }
}
