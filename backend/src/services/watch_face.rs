//! Watch-face view of a computed timeline.
//!
//! A round 12-hour dial has no room for the x/y curves, so each ingestion
//! becomes an arc: where it starts, where it peaks and where it ends. The
//! arcs are read off the line model of the shared [`TimelineModel`]; no
//! geometry is computed here.

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{shift_time, SubstanceColor, TimelineModel};

const SECONDS_PER_DIAL: f64 = 12.0 * 3600.0;

/// One ingestion drawn around the dial. Angles run clockwise from twelve o'clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchFaceArc {
    pub substance_name: String,
    pub color: SubstanceColor,
    pub inset_level: usize,
    pub start_angle: qtty::Degrees,
    pub peak_start_angle: qtty::Degrees,
    pub peak_end_angle: qtty::Degrees,
    pub end_angle: qtty::Degrees,
    /// True when the effects last a full turn of the dial or longer.
    pub wraps_dial: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchFaceModel {
    pub utc_offset_minutes: i32,
    pub arcs: Vec<WatchFaceArc>,
    /// Rating markers as dial angles, in timeline order.
    pub rating_angles: Vec<qtty::Degrees>,
}

/// Dial angle of `time` read in the `offset` time zone.
pub fn dial_angle(time: DateTime<Utc>, offset: FixedOffset) -> qtty::Degrees {
    let local = time.with_timezone(&offset);
    let seconds = f64::from(local.num_seconds_from_midnight())
        + f64::from(local.nanosecond() % 1_000_000_000) / 1e9;
    qtty::Degrees::new(seconds.rem_euclid(SECONDS_PER_DIAL) / SECONDS_PER_DIAL * 360.0)
}

impl WatchFaceModel {
    pub fn from_timeline(model: &TimelineModel, offset: FixedOffset) -> Self {
        let total = model.total_width.value();
        let angle = |x: f64| dial_angle(shift_time(model.start_time, x * total), offset);

        let arcs = model
            .ingestion_drawables
            .iter()
            .map(|drawable| {
                let line = &drawable.line;
                let start = line.lead_in_start.x;
                let end = line.fall.point_at(1.0).x;
                WatchFaceArc {
                    substance_name: drawable.substance_name.clone(),
                    color: drawable.color,
                    inset_level: drawable.inset_level,
                    start_angle: angle(start),
                    peak_start_angle: angle(line.rise.point_at(1.0).x),
                    peak_end_angle: angle(line.plateau_end.x),
                    end_angle: angle(end),
                    wraps_dial: (end - start) * total >= SECONDS_PER_DIAL,
                }
            })
            .collect();

        let rating_angles = model
            .rating_drawables
            .iter()
            .map(|rating| dial_angle(rating.time, offset))
            .collect();

        Self {
            utc_offset_minutes: offset.local_minus_utc() / 60,
            arcs,
            rating_angles,
        }
    }
}
