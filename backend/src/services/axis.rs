//! Hour ticks along the timeline's time axis.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AxisDrawable, AxisTick};

/// Candidate distances between ticks, in hours. All divide a day evenly.
/// Wider timelines step in whole days.
pub const STEP_CANDIDATES_HOURS: [u32; 8] = [1, 2, 3, 4, 6, 8, 12, 24];

const HOURS_PER_DAY: u32 = 24;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Rendering assumptions used to space the ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    /// Width the chart is expected to be drawn at, in pixels.
    pub expected_width_px: f64,
    /// Minimum distance between two ticks, in pixels.
    pub min_tick_spacing_px: f64,
    /// Width of one label character, in pixels.
    pub char_width_px: f64,
    /// Offset of the local time zone labels are written in.
    pub utc_offset_minutes: i32,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            expected_width_px: 400.0,
            min_tick_spacing_px: 40.0,
            char_width_px: 8.0,
            utc_offset_minutes: 0,
        }
    }
}

impl AxisOptions {
    pub fn time_zone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

/// Smallest step whose ticks are at least `min_tick_spacing_px` apart.
pub fn choose_step_hours(total_width: qtty::Seconds, options: &AxisOptions) -> u32 {
    let px_per_hour = options.expected_width_px / total_width.value() * 3600.0;
    if let Some(step) = STEP_CANDIDATES_HOURS
        .into_iter()
        .find(|step| f64::from(*step) * px_per_hour >= options.min_tick_spacing_px)
    {
        return step;
    }

    let days = (options.min_tick_spacing_px / px_per_hour / f64::from(HOURS_PER_DAY)).ceil();
    let max_days = u32::MAX / HOURS_PER_DAY;
    if days.is_finite() && days < f64::from(max_days) {
        days as u32 * HOURS_PER_DAY
    } else {
        max_days * HOURS_PER_DAY
    }
}

/// Hour-aligned ticks between `start` and `start + total_width`.
pub fn build_axis(
    start: DateTime<Utc>,
    total_width: qtty::Seconds,
    options: &AxisOptions,
) -> AxisDrawable {
    let total = total_width.value();
    if !total.is_finite() || total <= 0.0 {
        return AxisDrawable {
            step_hours: 1,
            ticks: Vec::new(),
        };
    }

    let step = choose_step_hours(total_width, options);
    let step_hours = i64::from(step);
    let tz = options.time_zone();
    let offset_ms = i64::from(tz.local_minus_utc()) * 1000;

    let start_local_ms = start.timestamp_millis() + offset_ms;
    let end_local_ms = start_local_ms.saturating_add((total * 1000.0).floor() as i64);

    // Hours are counted from the local epoch, so multiples of the step fall
    // on local midnight for day steps and divide the day for shorter ones.
    let mut hour = start_local_ms.div_euclid(MILLIS_PER_HOUR);
    if start_local_ms.rem_euclid(MILLIS_PER_HOUR) != 0 {
        hour += 1;
    }
    hour += (step_hours - hour.rem_euclid(step_hours)) % step_hours;

    let mut ticks = Vec::new();
    while let Some(tick_local_ms) = hour
        .checked_mul(MILLIS_PER_HOUR)
        .filter(|ms| *ms <= end_local_ms)
    {
        hour = hour.saturating_add(step_hours);

        let Some(time) = DateTime::<Utc>::from_timestamp_millis(tick_local_ms - offset_ms) else {
            continue;
        };
        let offset = (tick_local_ms - start_local_ms) as f64 / 1000.0;
        ticks.push(AxisTick {
            time,
            offset: qtty::Seconds::new(offset),
            x: offset / total,
            label: time.with_timezone(&tz).format("%H:%M").to_string(),
        });
    }

    let width = options.expected_width_px;
    if ticks
        .first()
        .is_some_and(|tick| tick.x * width < options.char_width_px)
    {
        ticks.remove(0);
    }
    if ticks
        .last()
        .is_some_and(|tick| (1.0 - tick.x) * width < options.char_width_px)
    {
        ticks.pop();
    }

    AxisDrawable {
        step_hours: step,
        ticks,
    }
}
