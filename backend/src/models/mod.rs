pub mod attendance;
pub mod common;
pub mod employee;
pub mod holiday;
pub mod schedule;
