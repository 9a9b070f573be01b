use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::plan::generator::{ModePolicy, StepConfig, minutes_from_hours};
use crate::plan::time::{self, TimeDisplayMode, TimeOfDay};

const DEFAULT_SLEEP_MINUTES: i64 = 9 * 60;
const DEFAULT_MAX_SHIFT_MINUTES: i64 = 90;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PlanSettings {
    pub bedtime: TimeOfDay,
    pub target: TimeOfDay,
    pub sleep_duration_minutes: i64,
    pub max_shift_minutes: i64,
    pub mode: ModePolicy,
    pub clock: TimeDisplayMode,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            bedtime: TimeOfDay::from_minutes(7 * 60),
            target: TimeOfDay::MIDNIGHT,
            sleep_duration_minutes: DEFAULT_SLEEP_MINUTES,
            max_shift_minutes: DEFAULT_MAX_SHIFT_MINUTES,
            mode: ModePolicy::Automatic,
            clock: TimeDisplayMode::Hour12,
        }
    }
}

/// Values supplied on the command line; each one that is set wins over the plan file.
#[derive(Debug, Clone, Default)]
pub struct PlanOverrides {
    pub bedtime: Option<String>,
    pub target: Option<String>,
    pub sleep_hours: Option<f64>,
    pub sleep_minutes: Option<i64>,
    pub max_shift_hours: Option<f64>,
    pub max_shift_minutes: Option<i64>,
    pub mode: Option<ModePolicy>,
    pub clock: Option<TimeDisplayMode>,
}

impl PlanSettings {
    pub fn apply(&mut self, overrides: PlanOverrides) -> Result<()> {
        if let Some(raw) = overrides.bedtime {
            self.bedtime = parse_named_time("bedtime", &raw)?;
        }
        if let Some(raw) = overrides.target {
            self.target = parse_named_time("target", &raw)?;
        }
        if let Some(minutes) = pick_minutes(
            "sleep",
            "sleep duration",
            overrides.sleep_hours,
            overrides.sleep_minutes,
        )? {
            self.sleep_duration_minutes = minutes;
        }
        if let Some(minutes) = pick_minutes(
            "max_shift",
            "max nightly shift",
            overrides.max_shift_hours,
            overrides.max_shift_minutes,
        )? {
            self.max_shift_minutes = minutes;
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(clock) = overrides.clock {
            self.clock = clock;
        }
        Ok(())
    }

    pub fn step_config(&self) -> StepConfig {
        StepConfig {
            start_time: self.bedtime,
            target_time: self.target,
            sleep_duration_minutes: self.sleep_duration_minutes,
            max_step_minutes: self.max_shift_minutes,
            mode: self.mode,
        }
    }
}

pub fn load_plan_config(path: &Path) -> Result<PlanSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read plan file {}", path.display()))?;
    let settings = parse_plan_config_text(&content)?;
    tracing::debug!(path = %path.display(), ?settings, "loaded plan file");
    Ok(settings)
}

pub fn parse_plan_config_text(content: &str) -> Result<PlanSettings> {
    let raw = serde_json::from_str::<PlanConfigFile>(content).map_err(|err| {
        let line = err.line();
        let column = err.column();
        anyhow::anyhow!("invalid JSON at line {line}, column {column}: {err}")
    })?;

    if raw.version != 1 {
        bail!(
            "unsupported plan config version {}; expected version 1",
            raw.version
        );
    }

    let mut settings = PlanSettings::default();
    settings.apply(PlanOverrides {
        bedtime: raw.bedtime,
        target: raw.target,
        sleep_hours: raw.sleep_hours,
        sleep_minutes: raw.sleep_minutes,
        max_shift_hours: raw.max_shift_hours,
        max_shift_minutes: raw.max_shift_minutes,
        mode: raw.mode.map(ModeToken::to_policy),
        clock: raw.clock.map(ClockToken::to_display_mode),
    })?;
    Ok(settings)
}

fn parse_named_time(field: &str, raw: &str) -> Result<TimeOfDay> {
    time::parse(raw).with_context(|| format!("invalid {field}"))
}

fn pick_minutes(
    field: &str,
    label: &'static str,
    hours: Option<f64>,
    minutes: Option<i64>,
) -> Result<Option<i64>> {
    match (hours, minutes) {
        (Some(_), Some(_)) => {
            bail!("{field}_hours and {field}_minutes cannot both be set")
        }
        (Some(hours), None) => Ok(Some(minutes_from_hours(label, hours)?)),
        (None, minutes) => Ok(minutes),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanConfigFile {
    version: u32,
    #[serde(default)]
    bedtime: Option<String>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    sleep_hours: Option<f64>,
    #[serde(default)]
    sleep_minutes: Option<i64>,
    #[serde(default)]
    max_shift_hours: Option<f64>,
    #[serde(default)]
    max_shift_minutes: Option<i64>,
    #[serde(default)]
    mode: Option<ModeToken>,
    #[serde(default)]
    clock: Option<ClockToken>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModeToken {
    #[serde(alias = "auto")]
    Automatic,
    Later,
    Earlier,
}

impl ModeToken {
    fn to_policy(self) -> ModePolicy {
        match self {
            ModeToken::Automatic => ModePolicy::Automatic,
            ModeToken::Later => ModePolicy::ForceLater,
            ModeToken::Earlier => ModePolicy::ForceEarlier,
        }
    }
}

#[derive(Debug, Deserialize)]
enum ClockToken {
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "24h")]
    Hour24,
}

impl ClockToken {
    fn to_display_mode(self) -> TimeDisplayMode {
        match self {
            ClockToken::Hour12 => TimeDisplayMode::Hour12,
            ClockToken::Hour24 => TimeDisplayMode::Hour24,
        }
    }
}
