use thiserror::Error;

pub const ACCEPTED_TIME_SHAPES: &str =
    "H, HH, H:MM, HH:MM, HMM or HHMM, optionally followed by A, P, AM or PM";

#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlanError {
    #[error("invalid time '{input}', expected {shapes}", shapes = ACCEPTED_TIME_SHAPES)]
    Format { input: String },

    #[error("time '{input}' is out of range: hour {hour} must be 0-23 and minute {minute} must be 0-59")]
    Range {
        input: String,
        hour: u32,
        minute: u32,
    },

    #[error("{field} must be greater than zero (got {value})")]
    InvalidDuration { field: &'static str, value: i64 },

    #[error("{field} must be a finite number of hours")]
    NonFiniteHours { field: &'static str },
}

pub type PlanResult<T> = Result<T, PlanError>;
