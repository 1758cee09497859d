//! Anneal schedules.
//!
//! A schedule is a piecewise-linear curve of anneal fraction `s` over time in
//! microseconds. The rules every schedule obeys:
//!
//! - between 2 and [`MAX_SCHEDULE_POINTS`] points
//! - the first point is at time 0
//! - times are finite, non-negative and strictly increasing
//! - fractions lie in `[0, 1]` and never decrease
//!
//! A flat segment (equal fractions at two times) is a pause.

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Most points a schedule may have.
pub const MAX_SCHEDULE_POINTS: usize = 4;

/// One `(time, fraction)` point on a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulePoint {
    /// Time in microseconds.
    pub time_us: f64,
    /// Anneal fraction `s` in `[0, 1]`.
    pub fraction: f64,
}

/// A validated anneal schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SchedulePoint>", into = "Vec<SchedulePoint>")]
pub struct AnnealSchedule {
    points: Vec<SchedulePoint>,
}

impl AnnealSchedule {
    /// Build a schedule from `(time_us, fraction)` pairs.
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> HalResult<Self> {
        let points: Vec<SchedulePoint> = points
            .into_iter()
            .map(|(time_us, fraction)| SchedulePoint { time_us, fraction })
            .collect();
        Self::try_from(points)
    }

    /// A straight ramp from 0 to 1 over `duration_us`.
    pub fn linear(duration_us: f64) -> HalResult<Self> {
        Self::new([(0.0, 0.0), (duration_us, 1.0)])
    }

    /// The schedule points.
    pub fn points(&self) -> &[SchedulePoint] {
        &self.points
    }

    /// Time of the last point.
    pub fn duration_us(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.time_us)
    }

    /// Fraction at time `t`, interpolated linearly and clamped to the ends.
    pub fn fraction_at(&self, t: f64) -> f64 {
        let first = self.points[0];
        if t <= first.time_us {
            return first.fraction;
        }
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time_us {
                let w = (t - a.time_us) / (b.time_us - a.time_us);
                return a.fraction + w * (b.fraction - a.fraction);
            }
        }
        self.points[self.points.len() - 1].fraction
    }

    /// Fraction at a position in `[0, 1]` along the whole schedule.
    pub fn fraction_at_progress(&self, progress: f64) -> f64 {
        self.fraction_at(progress.clamp(0.0, 1.0) * self.duration_us())
    }
}

impl TryFrom<Vec<SchedulePoint>> for AnnealSchedule {
    type Error = HalError;

    fn try_from(points: Vec<SchedulePoint>) -> HalResult<Self> {
        if points.len() < 2 || points.len() > MAX_SCHEDULE_POINTS {
            return Err(HalError::InvalidSchedule(format!(
                "expected 2 to {MAX_SCHEDULE_POINTS} points, got {}",
                points.len()
            )));
        }
        for (i, p) in points.iter().enumerate() {
            if !p.time_us.is_finite() || p.time_us < 0.0 {
                return Err(HalError::InvalidSchedule(format!(
                    "point {i}: time {} must be finite and non-negative",
                    p.time_us
                )));
            }
            if !(0.0..=1.0).contains(&p.fraction) {
                return Err(HalError::InvalidSchedule(format!(
                    "point {i}: fraction {} outside [0, 1]",
                    p.fraction
                )));
            }
        }
        if points[0].time_us != 0.0 {
            return Err(HalError::InvalidSchedule(format!(
                "schedule must start at time 0, starts at {}",
                points[0].time_us
            )));
        }
        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].time_us <= pair[0].time_us {
                return Err(HalError::InvalidSchedule(format!(
                    "point {}: time must increase ({} after {})",
                    i + 1,
                    pair[1].time_us,
                    pair[0].time_us
                )));
            }
            if pair[1].fraction < pair[0].fraction {
                return Err(HalError::InvalidSchedule(format!(
                    "point {}: fraction must not decrease ({} after {})",
                    i + 1,
                    pair[1].fraction,
                    pair[0].fraction
                )));
            }
        }
        Ok(Self { points })
    }
}

impl From<AnnealSchedule> for Vec<SchedulePoint> {
    fn from(schedule: AnnealSchedule) -> Self {
        schedule.points
    }
}
