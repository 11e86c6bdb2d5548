//! Timeline assembly: from journal entries to a complete [`TimelineModel`].
//!
//! This is the single entry point renderers use. It is a pure function of
//! its inputs: the caller injects the duration lookup and the current
//! instant, and every call recomputes the model from scratch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::DurationLookup;
use crate::error::{Result, TimelineError};
use crate::models::{
    seconds_between, shift_time, CompleteDurations, DurationAvailability, Ingestion,
    IngestionDrawable, Rating, RatingDrawable, SkipReason, SkippedIngestion, TimedNote,
    TimedNoteDrawable, TimelineModel,
};
use crate::services::axis::{build_axis, AxisOptions};
use crate::services::geometry::{build_curve_geometry, curve_extent, CurveInput, DEFAULT_BEZIER_RATIO};
use crate::services::layering::{assign_inset_levels, peak_window};
use crate::services::weights::{horizontal_weight, vertical_weights};

/// Tuning parameters of the assembled timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineOptions {
    /// Space added before the first event and after the last curve end.
    pub padding: qtty::Seconds,
    /// Content width used when there is nothing to measure.
    pub fallback_width: qtty::Seconds,
    /// Horizontal position of Bezier control points, in `[0, 0.5]`.
    pub bezier_ratio: f64,
    pub axis: AxisOptions,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            padding: qtty::Seconds::new(10.0 * 60.0),
            fallback_width: qtty::Seconds::new(2.0 * 3600.0),
            bezier_ratio: DEFAULT_BEZIER_RATIO,
            axis: AxisOptions::default(),
        }
    }
}

impl TimelineOptions {
    /// Reject parameters the geometry cannot work with.
    pub fn validate(&self) -> Result<()> {
        let padding = self.padding.value();
        if !padding.is_finite() || padding < 0.0 {
            return Err(TimelineError::InvalidParameter(format!(
                "padding must be a non-negative number of seconds, got {padding}"
            )));
        }
        let fallback = self.fallback_width.value();
        if !fallback.is_finite() || fallback <= 0.0 {
            return Err(TimelineError::InvalidParameter(format!(
                "fallback width must be positive, got {fallback}"
            )));
        }
        if !(0.0..=0.5).contains(&self.bezier_ratio) {
            return Err(TimelineError::InvalidParameter(format!(
                "bezier ratio must be within [0, 0.5], got {}",
                self.bezier_ratio
            )));
        }
        let axis = &self.axis;
        let positive = [
            ("expected width", axis.expected_width_px),
            ("minimum tick spacing", axis.min_tick_spacing_px),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidParameter(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !axis.char_width_px.is_finite() || axis.char_width_px < 0.0 {
            return Err(TimelineError::InvalidParameter(format!(
                "character width must be non-negative, got {}",
                axis.char_width_px
            )));
        }
        if axis.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(TimelineError::InvalidParameter(format!(
                "UTC offset must be within a day, got {} minutes",
                axis.utc_offset_minutes
            )));
        }
        Ok(())
    }
}

/// Journal entries to lay out on one timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineInput {
    #[serde(default)]
    pub ingestions: Vec<Ingestion>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub timed_notes: Vec<TimedNote>,
}

impl TimelineInput {
    pub fn is_empty(&self) -> bool {
        self.ingestions.is_empty() && self.ratings.is_empty() && self.timed_notes.is_empty()
    }

    fn earliest_time(&self) -> Option<DateTime<Utc>> {
        let ingestions = self.ingestions.iter().map(|i| i.time);
        let ratings = self.ratings.iter().map(|r| r.time);
        let notes = self.timed_notes.iter().map(|n| n.time);
        ingestions.chain(ratings).chain(notes).min()
    }
}

/// One drawable ingestion with everything its curve needs.
struct LineEntry<'a> {
    ingestion: &'a Ingestion,
    durations: CompleteDurations,
    start_offset: qtty::Seconds,
    vertical_weight: f64,
    horizontal_weight: f64,
}

impl LineEntry<'_> {
    fn curve_input(&self) -> CurveInput<'_> {
        CurveInput {
            start_offset: self.start_offset,
            durations: &self.durations,
            vertical_weight: self.vertical_weight,
            horizontal_weight: self.horizontal_weight,
        }
    }
}

fn offset_from(start: DateTime<Utc>, time: DateTime<Utc>) -> qtty::Seconds {
    qtty::Seconds::new(seconds_between(start, time))
}

/// Compute the drawable timeline for a set of journal entries.
///
/// Ingestions are laid out in ascending time order (stable for equal
/// times). Ingestions whose substance and route lack any of onset, comeup,
/// peak or offset get no curve and are listed in
/// [`TimelineModel::skipped_ingestions`]. With no entries at all the
/// timeline starts at `now - padding` and spans the fallback width. A start
/// before the earliest representable instant is clamped to it.
pub fn compute_timeline<L: DurationLookup + ?Sized>(
    input: &TimelineInput,
    lookup: &L,
    now: DateTime<Utc>,
    options: &TimelineOptions,
) -> TimelineModel {
    let start_time = shift_time(input.earliest_time().unwrap_or(now), -options.padding.value());

    let mut sorted: Vec<&Ingestion> = input.ingestions.iter().collect();
    sorted.sort_by_key(|ingestion| ingestion.time);
    let vertical = vertical_weights(&sorted);

    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    for (ingestion, vertical_weight) in sorted.iter().copied().zip(vertical) {
        let reason = match lookup
            .roa_duration(&ingestion.substance_name, ingestion.route)
            .map(|duration| duration.availability())
        {
            Some(DurationAvailability::Complete(durations)) => {
                let dose = lookup.roa_dose(&ingestion.substance_name, ingestion.route);
                entries.push(LineEntry {
                    ingestion,
                    durations,
                    start_offset: offset_from(start_time, ingestion.time),
                    vertical_weight,
                    horizontal_weight: horizontal_weight(ingestion, dose.as_ref()),
                });
                continue;
            }
            Some(DurationAvailability::Incomplete { missing }) => SkipReason::Incomplete { missing },
            None => SkipReason::NoDurationData,
        };
        log::debug!(
            "No curve for {} ({}): {:?}",
            ingestion.substance_name,
            ingestion.route,
            reason
        );
        skipped.push(SkippedIngestion {
            substance_name: ingestion.substance_name.clone(),
            route: ingestion.route,
            time: ingestion.time,
            reason,
        });
    }

    let windows: Vec<_> = entries
        .iter()
        .map(|e| peak_window(e.start_offset, &e.durations, e.horizontal_weight))
        .collect();
    let levels = assign_inset_levels(&windows);

    let extents = entries
        .iter()
        .map(|e| curve_extent(e.start_offset, &e.durations).value());
    let rating_offsets = input
        .ratings
        .iter()
        .map(|r| seconds_between(start_time, r.time));
    let note_offsets = input
        .timed_notes
        .iter()
        .map(|n| seconds_between(start_time, n.time));
    let skipped_offsets = skipped.iter().map(|s| seconds_between(start_time, s.time));
    let content_width = extents
        .chain(rating_offsets)
        .chain(note_offsets)
        .chain(skipped_offsets)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
        .filter(|width| *width > 0.0)
        .unwrap_or_else(|| options.fallback_width.value());
    let total_width = qtty::Seconds::new(content_width + options.padding.value());
    let total = total_width.value();

    let ingestion_drawables = entries
        .iter()
        .zip(windows)
        .zip(levels)
        .map(|((entry, peak_window), inset_level)| {
            let geometry = build_curve_geometry(&entry.curve_input(), total_width, options.bezier_ratio);
            IngestionDrawable {
                substance_name: entry.ingestion.substance_name.clone(),
                route: entry.ingestion.route,
                color: entry.ingestion.color,
                time: entry.ingestion.time,
                start_offset: entry.start_offset,
                end_offset: geometry.end_offset,
                vertical_weight: entry.vertical_weight,
                horizontal_weight: entry.horizontal_weight,
                inset_level,
                peak_window,
                line: geometry.line,
                around: geometry.around,
            }
        })
        .collect();

    let mut rating_drawables: Vec<RatingDrawable> = input
        .ratings
        .iter()
        .map(|rating| {
            let offset = offset_from(start_time, rating.time);
            RatingDrawable {
                option: rating.option,
                time: rating.time,
                offset,
                x: offset.value() / total,
            }
        })
        .collect();
    rating_drawables.sort_by_key(|r| r.time);

    let mut timed_note_drawables: Vec<TimedNoteDrawable> = input
        .timed_notes
        .iter()
        .map(|note| {
            let offset = offset_from(start_time, note.time);
            TimedNoteDrawable {
                time: note.time,
                color: note.color,
                offset,
                x: offset.value() / total,
            }
        })
        .collect();
    timed_note_drawables.sort_by_key(|n| n.time);

    let axis = build_axis(start_time, total_width, &options.axis);

    log::debug!(
        "Computed timeline: {} curves, {} skipped, width {}s",
        entries.len(),
        skipped.len(),
        total
    );

    TimelineModel {
        start_time,
        total_width,
        ingestion_drawables,
        rating_drawables,
        timed_note_drawables,
        skipped_ingestions: skipped,
        axis,
    }
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod timeline_tests;
