//! Validated schedule policy.
//!
//! [`WorkSchedule`] is the checked form of [`WorkScheduleConfig`]: local times
//! are parsed, rotating patterns carry their shift length and complex schedules
//! carry their blocks, so evaluators can match exhaustively.

use time::{Date, Time, Weekday};

use crate::{
    error::ScheduleError,
    models::schedule::{
        BreakConfig, ComplexScheduleConfig, ScheduleMode, ScheduleType, WorkDayConfig,
        WorkScheduleConfig,
    },
};

use super::{
    clock::{parse_local_time, span_minutes},
    complex::{ComplexSchedule, ScheduleBlock, WorkDay},
};

pub const DEFAULT_EARLY_ARRIVAL_MINUTES: u32 = 120;
pub const DEFAULT_LATE_ARRIVAL_MINUTES: u32 = 10;
const DEFAULT_PLAN_HOURS: f64 = 8.0;
const MAX_SHIFT_HOURS: f64 = 24.0;

/// Set of ISO weekdays (Monday = 1 .. Sunday = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkWeek(u8);

impl WorkWeek {
    pub fn from_numbers(days: &[u8]) -> Result<Self, ScheduleError> {
        days.iter().try_fold(WorkWeek(0), |week, &day| {
            if (1..=7).contains(&day) {
                Ok(WorkWeek(week.0 | 1 << day))
            } else {
                Err(ScheduleError::Configuration(format!(
                    "weekday {day} is not in 1..=7"
                )))
            }
        })
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.number_from_monday()) != 0
    }
}

/// Fixed on/off rotations, evaluated relative to an anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    TwoOnTwoOff,
    OneOnThreeOff,
}

impl Rotation {
    pub const fn cycle(self) -> &'static [bool] {
        match self {
            Rotation::TwoOnTwoOff => &[true, true, false, false],
            Rotation::OneOnThreeOff => &[true, false, false, false],
        }
    }

    /// Whether the day `offset` days after the anchor is a work day.
    pub fn is_on(self, offset: i64) -> bool {
        let cycle = self.cycle();
        cycle[offset.rem_euclid(cycle.len() as i64) as usize]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    FixedWeekly(WorkWeek),
    Flexible(WorkWeek),
    Rotating { rotation: Rotation, shift_hours: f64 },
    Complex(ComplexSchedule),
}

/// Nominal daily shift of a simple (non-complex) schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyShift {
    pub start: Time,
    pub end: Time,
    pub mode: ScheduleMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tolerances {
    pub early_arrival_minutes: u32,
    pub late_arrival_minutes: u32,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            early_arrival_minutes: DEFAULT_EARLY_ARRIVAL_MINUTES,
            late_arrival_minutes: DEFAULT_LATE_ARRIVAL_MINUTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakWindow {
    pub name: String,
    pub start: Time,
    pub end: Time,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkSchedule {
    pub pattern: Pattern,
    pub shift: DailyShift,
    pub shift_hours: Option<f64>,
    pub tolerances: Tolerances,
    pub anchor: Option<Date>,
}

impl WorkSchedule {
    /// The shift end always lands on the following day.
    pub fn forces_rollover(&self) -> bool {
        self.shift.mode == ScheduleMode::Overnight
            || matches!(
                self.pattern,
                Pattern::Rotating {
                    rotation: Rotation::OneOnThreeOff,
                    ..
                }
            )
    }

    /// Hours recorded as planned on a generated work day.
    pub fn plan_hours(&self) -> f64 {
        match self.pattern {
            Pattern::Rotating { shift_hours, .. } => shift_hours,
            _ => self.shift_hours.unwrap_or(DEFAULT_PLAN_HOURS),
        }
    }

    /// Length of the nominal shift in hours, used to lay out synthetic
    /// check-outs and to measure overtime.
    pub fn nominal_hours(&self) -> f64 {
        if let Pattern::Rotating { shift_hours, .. } = self.pattern {
            return shift_hours;
        }
        if let Some(hours) = self.shift_hours {
            return hours;
        }
        let minutes = match span_minutes(self.shift.start, self.shift.end) {
            0 if self.forces_rollover() => 24 * 60,
            m => m,
        };
        minutes as f64 / 60.0
    }
}

impl TryFrom<&WorkScheduleConfig> for WorkSchedule {
    type Error = ScheduleError;

    fn try_from(config: &WorkScheduleConfig) -> Result<Self, Self::Error> {
        let shift = DailyShift {
            start: parse_local_time(&config.start_time)?,
            end: parse_local_time(&config.end_time)?,
            mode: config.mode,
        };
        let mut tolerances = Tolerances {
            early_arrival_minutes: config
                .early_arrival_tolerance_minutes
                .unwrap_or(DEFAULT_EARLY_ARRIVAL_MINUTES),
            late_arrival_minutes: config
                .late_arrival_tolerance_minutes
                .unwrap_or(DEFAULT_LATE_ARRIVAL_MINUTES),
        };

        let pattern = if config.is_complex {
            let complex = config.complex_schedule.as_ref().ok_or_else(|| {
                ScheduleError::Configuration(
                    "schedule is marked complex but has no complex schedule".into(),
                )
            })?;
            if let Some([early, late]) = complex.arrival_tolerance_minutes {
                tolerances = Tolerances {
                    early_arrival_minutes: early,
                    late_arrival_minutes: late,
                };
            }
            Pattern::Complex(ComplexSchedule::try_from(complex)?)
        } else {
            match config.schedule_type {
                ScheduleType::FixedWeekly => {
                    Pattern::FixedWeekly(WorkWeek::from_numbers(&config.work_days)?)
                }
                ScheduleType::Flexible => {
                    Pattern::Flexible(WorkWeek::from_numbers(&config.work_days)?)
                }
                ScheduleType::TwoOnTwoOff => Pattern::Rotating {
                    rotation: Rotation::TwoOnTwoOff,
                    shift_hours: rotating_shift_hours(config)?,
                },
                ScheduleType::OneOnThreeOff => Pattern::Rotating {
                    rotation: Rotation::OneOnThreeOff,
                    shift_hours: rotating_shift_hours(config)?,
                },
            }
        };

        Ok(Self {
            pattern,
            shift,
            shift_hours: config
                .shift_duration_hours
                .map(|hours| checked_hours("shift_duration_hours", hours))
                .transpose()?,
            tolerances,
            anchor: config.anchor_date,
        })
    }
}

/// Shift lengths must be positive and fit in one day.
fn checked_hours(field: &str, hours: f64) -> Result<f64, ScheduleError> {
    if hours.is_finite() && hours > 0.0 && hours <= MAX_SHIFT_HOURS {
        Ok(hours)
    } else {
        Err(ScheduleError::Configuration(format!(
            "{field} must be in (0, {MAX_SHIFT_HOURS}], got {hours}"
        )))
    }
}

fn rotating_shift_hours(config: &WorkScheduleConfig) -> Result<f64, ScheduleError> {
    match config.shift_duration_hours {
        Some(hours) => checked_hours("shift_duration_hours", hours),
        None => Err(ScheduleError::Configuration(format!(
            "{:?} schedule requires shift_duration_hours",
            config.schedule_type
        ))),
    }
}

impl TryFrom<&ComplexScheduleConfig> for ComplexSchedule {
    type Error = ScheduleError;

    fn try_from(config: &ComplexScheduleConfig) -> Result<Self, Self::Error> {
        let blocks = config
            .blocks
            .iter()
            .map(|block| {
                Ok(ScheduleBlock {
                    work_days: block
                        .work_days
                        .iter()
                        .map(WorkDay::try_from)
                        .collect::<Result<_, ScheduleError>>()?,
                    off_days: block.off_days,
                })
            })
            .collect::<Result<Vec<_>, ScheduleError>>()?;

        let schedule = ComplexSchedule {
            id: config.id,
            name: config.name.clone(),
            blocks,
        };
        if schedule.cycle_length() == 0 {
            return Err(ScheduleError::Configuration(format!(
                "complex schedule {:?} has an empty cycle",
                config.name
            )));
        }
        Ok(schedule)
    }
}

impl TryFrom<&WorkDayConfig> for WorkDay {
    type Error = ScheduleError;

    fn try_from(config: &WorkDayConfig) -> Result<Self, Self::Error> {
        Ok(WorkDay {
            start: parse_local_time(&config.start_time)?,
            end: parse_local_time(&config.end_time)?,
            overnight: config.overnight,
            work_hours: checked_hours("work_hours", config.work_hours)?,
            breaks: parse_breaks(&config.breaks)?,
            overnight_breaks: parse_breaks(&config.overnight_breaks)?,
        })
    }
}

fn parse_breaks(configs: &[BreakConfig]) -> Result<Vec<BreakWindow>, ScheduleError> {
    configs
        .iter()
        .map(|b| {
            Ok(BreakWindow {
                name: b.name.clone(),
                start: parse_local_time(&b.start)?,
                end: parse_local_time(&b.end)?,
            })
        })
        .collect()
}
