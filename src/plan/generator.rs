use std::fmt;

use serde::Serialize;

use crate::error::{PlanError, PlanResult};
use crate::plan::time::{MINUTES_PER_DAY, TimeOfDay};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Later,
    Earlier,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Later => f.write_str("later"),
            Direction::Earlier => f.write_str("earlier"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ModePolicy {
    Automatic,
    ForceLater,
    ForceEarlier,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StepConfig {
    pub start_time: TimeOfDay,
    pub target_time: TimeOfDay,
    pub sleep_duration_minutes: i64,
    pub max_step_minutes: i64,
    pub mode: ModePolicy,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DayResult {
    pub day: u32,
    pub sleep_time: TimeOfDay,
    pub wake_time: TimeOfDay,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScheduleResult {
    pub days: Vec<DayResult>,
    pub resolved_direction: Direction,
}

impl ScheduleResult {
    pub fn nights(&self) -> usize {
        self.days.len()
    }

    pub fn is_noop(&self) -> bool {
        self.days.is_empty()
    }

    pub fn final_sleep_time(&self) -> Option<TimeOfDay> {
        self.days.last().map(|entry| entry.sleep_time)
    }
}

/// Forward and backward distances from `start` to `target`; both zero when they coincide.
pub fn circular_distances(start: TimeOfDay, target: TimeOfDay) -> (i64, i64) {
    let forward = start.minutes_until(target);
    if forward == 0 {
        (0, 0)
    } else {
        (forward, MINUTES_PER_DAY - forward)
    }
}

pub fn resolve_direction(mode: ModePolicy, forward: i64, backward: i64) -> Direction {
    match mode {
        ModePolicy::ForceLater => Direction::Later,
        ModePolicy::ForceEarlier => Direction::Earlier,
        ModePolicy::Automatic if forward <= backward => Direction::Later,
        ModePolicy::Automatic => Direction::Earlier,
    }
}

struct StepState {
    current: TimeOfDay,
    remaining: i64,
    day: u32,
}

impl StepState {
    fn advance(&mut self, direction: Direction, max_step: i64) -> TimeOfDay {
        let step = max_step.min(self.remaining);
        self.current = match direction {
            Direction::Later => self.current.add_minutes(step),
            Direction::Earlier => self.current.sub_minutes(step),
        };
        self.remaining -= step;
        self.current
    }
}

/// Builds the night-by-night plan that walks `start_time` to `target_time`.
///
/// Each night moves the bedtime by `max_step_minutes` in the resolved direction,
/// except the last one which covers whatever distance is left. A start equal to
/// the target produces no nights.
pub fn generate(config: &StepConfig) -> PlanResult<ScheduleResult> {
    validate_positive("sleep duration", config.sleep_duration_minutes)?;
    validate_positive("max nightly shift", config.max_step_minutes)?;

    let (forward, backward) = circular_distances(config.start_time, config.target_time);
    let resolved_direction = resolve_direction(config.mode, forward, backward);
    let remaining = match resolved_direction {
        Direction::Later => forward,
        Direction::Earlier => backward,
    };

    let mut days = Vec::new();
    let mut state = StepState {
        current: config.start_time,
        remaining,
        day: 1,
    };
    while state.remaining > 0 {
        let sleep_time = state.advance(resolved_direction, config.max_step_minutes);
        days.push(DayResult {
            day: state.day,
            sleep_time,
            wake_time: sleep_time.add_minutes(config.sleep_duration_minutes),
        });
        state.day += 1;
    }

    Ok(ScheduleResult {
        days,
        resolved_direction,
    })
}

/// Converts a possibly fractional hour count into whole minutes, rounding to the nearest minute.
///
/// Non-positive results are returned as-is so [`generate`] reports them.
pub fn minutes_from_hours(field: &'static str, hours: f64) -> PlanResult<i64> {
    if !hours.is_finite() {
        return Err(PlanError::NonFiniteHours { field });
    }
    Ok((hours * 60.0).round() as i64)
}

fn validate_positive(field: &'static str, value: i64) -> PlanResult<()> {
    if value <= 0 {
        return Err(PlanError::InvalidDuration { field, value });
    }
    Ok(())
}
