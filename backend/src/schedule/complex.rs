//! Multi-block cyclic schedules.
//!
//! A complex schedule is a sequence of blocks, each a run of rostered work
//! days followed by days off. The blocks repeat back to back, so every date
//! maps to exactly one slot of the cycle.

use time::{Date, Time};

use crate::models::{
    employee::Employee,
    schedule::{Reconciliation, ScheduleDay},
};
use crate::error::ScheduleError;

use super::{
    clock::{first_of_month, month_days, span_minutes},
    holiday::HolidayCalendar,
    policy::{BreakWindow, WorkSchedule},
    shift::{anchored_breaks, build_shift},
    ScheduleSettings,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSchedule {
    pub id: Option<u32>,
    pub name: String,
    pub blocks: Vec<ScheduleBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleBlock {
    pub work_days: Vec<WorkDay>,
    pub off_days: u32,
}

impl ScheduleBlock {
    pub fn len(&self) -> u32 {
        self.work_days.len() as u32 + self.off_days
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One rostered day inside a block, with its own times and breaks.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkDay {
    pub start: Time,
    pub end: Time,
    pub overnight: bool,
    pub work_hours: f64,
    pub breaks: Vec<BreakWindow>,
    pub overnight_breaks: Vec<BreakWindow>,
}

impl WorkDay {
    /// Clock length of the shift; an overnight shift that starts and ends on
    /// the same clock time spans a full day.
    pub fn span_hours(&self) -> f64 {
        let minutes = match span_minutes(self.start, self.end) {
            0 if self.overnight => 24 * 60,
            m => m,
        };
        minutes as f64 / 60.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleSlot<'a> {
    Work {
        block: usize,
        index: usize,
        day: &'a WorkDay,
    },
    Off {
        block: usize,
    },
}

impl CycleSlot<'_> {
    pub fn is_work(&self) -> bool {
        matches!(self, CycleSlot::Work { .. })
    }
}

impl ComplexSchedule {
    pub fn cycle_length(&self) -> u32 {
        self.blocks.iter().map(ScheduleBlock::len).sum()
    }

    /// Resolves a position in the cycle to its block and work-day config.
    pub fn slot(&self, offset: u32) -> CycleSlot<'_> {
        let mut remaining = offset % self.cycle_length().max(1);
        for (block_index, block) in self.blocks.iter().enumerate() {
            if remaining < block.len() {
                return match block.work_days.get(remaining as usize) {
                    Some(day) => CycleSlot::Work {
                        block: block_index,
                        index: remaining as usize,
                        day,
                    },
                    None => CycleSlot::Off { block: block_index },
                };
            }
            remaining -= block.len();
        }
        CycleSlot::Off {
            block: self.blocks.len().saturating_sub(1),
        }
    }

    /// Cycle position of `date`.
    ///
    /// With an anchor the cycle runs continuously from it; without one the
    /// cycle restarts on the first day of every month.
    pub fn offset_for(&self, date: Date, anchor: Option<Date>) -> u32 {
        let origin = anchor.unwrap_or_else(|| first_of_month(date));
        let length = i64::from(self.cycle_length().max(1));
        (date - origin).whole_days().rem_euclid(length) as u32
    }

    pub fn slot_for(&self, date: Date, anchor: Option<Date>) -> CycleSlot<'_> {
        self.slot(self.offset_for(date, anchor))
    }
}

/// Expands a complex schedule over one calendar month.
pub fn expand(
    employee: &Employee,
    schedule: &WorkSchedule,
    complex: &ComplexSchedule,
    year: i32,
    month: u8,
    calendar: &HolidayCalendar,
    settings: &ScheduleSettings,
) -> Result<Vec<ScheduleDay>, ScheduleError> {
    let dates = month_days(year, month)?;
    let length = complex.cycle_length().max(1);
    let mut offset = match dates.first() {
        Some(&first) => complex.offset_for(first, schedule.anchor),
        None => 0,
    };

    let mut days = Vec::with_capacity(dates.len());
    for date in dates {
        let is_holiday = calendar.is_holiday(date);
        let record = match complex.slot(offset) {
            CycleSlot::Work { day, .. } if !is_holiday => {
                work_day_record(employee, date, day, settings)?
            }
            _ => ScheduleDay::off(employee.id, employee.company_id, date, is_holiday),
        };
        days.push(record);
        offset = (offset + 1) % length;
    }
    Ok(days)
}

fn work_day_record(
    employee: &Employee,
    date: Date,
    day: &WorkDay,
    settings: &ScheduleSettings,
) -> Result<ScheduleDay, ScheduleError> {
    let shift = build_shift(date, day.start, day.end, day.overnight, settings.utc_offset)?;
    Ok(ScheduleDay {
        is_work_day: true,
        overnight: day.overnight,
        unix_start: shift.start,
        unix_end: shift.end,
        plan_hours: day.work_hours,
        day_breaks: anchored_breaks(date, &day.breaks, false, settings.utc_offset)?,
        overnight_breaks: anchored_breaks(date, &day.overnight_breaks, true, settings.utc_offset)?,
        reconciliation: Some(Reconciliation::default()),
        ..ScheduleDay::off(employee.id, employee.company_id, date, false)
    })
}
