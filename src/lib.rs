//! Night-by-night bedtime shifting plans.
//!
//! [`plan::time::parse`] turns loosely written clock times into [`TimeOfDay`]
//! values and [`plan::generator::generate`] walks a bedtime toward a target in
//! bounded nightly steps around the 24-hour clock.

pub mod error;
pub mod plan;
pub mod report;

pub use error::{PlanError, PlanResult};
pub use plan::generator::{
    DayResult, Direction, ModePolicy, ScheduleResult, StepConfig, generate,
};
pub use plan::time::{TimeDisplayMode, TimeOfDay, parse};
