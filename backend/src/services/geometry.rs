//! Curve geometry for a single ingestion.
//!
//! Positions are computed in seconds from the timeline start and divided by
//! the timeline width, so every point lands in the unit square as long as
//! the width covers [`curve_extent`].

use crate::models::{AroundShapeModel, CompleteDurations, Curve, DataPoint, LineModel};
use crate::services::layering::FIXED_PHASE_WEIGHT;

/// Default horizontal position of Bezier control points (20 % / 80 %).
pub const DEFAULT_BEZIER_RATIO: f64 = 0.2;

/// Inputs for one curve.
#[derive(Debug, Clone, Copy)]
pub struct CurveInput<'a> {
    /// Seconds from the timeline start to the ingestion.
    pub start_offset: qtty::Seconds,
    pub durations: &'a CompleteDurations,
    pub vertical_weight: f64,
    pub horizontal_weight: f64,
}

/// Both drawable shapes of a curve plus its extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveGeometry {
    pub line: LineModel,
    pub around: AroundShapeModel,
    /// Latest possible end of effects, seconds from the timeline start.
    pub end_offset: qtty::Seconds,
}

/// Latest point in time the curve can reach, seconds from the timeline start.
///
/// Summed phase by phase in the same order as the outer corners of the
/// around shape, so the widest corner lands exactly on this value.
pub fn curve_extent(start_offset: qtty::Seconds, durations: &CompleteDurations) -> qtty::Seconds {
    let d = durations;
    let end = start_offset.value()
        + d.onset.max().value()
        + d.comeup.max().value()
        + d.peak.max().value()
        + d.offset.max().value();
    qtty::Seconds::new(end)
}

struct Frame {
    total_width: f64,
    height: f64,
    ratio: f64,
}

impl Frame {
    fn new(total_width: qtty::Seconds, vertical_weight: f64, ratio: f64) -> Self {
        debug_assert!(total_width.value() > 0.0, "timeline width must be positive");
        debug_assert!((0.0..=0.5).contains(&ratio), "bezier ratio out of range: {ratio}");
        Self {
            total_width: total_width.value(),
            height: vertical_weight.clamp(0.0, 1.0),
            ratio,
        }
    }

    fn baseline(&self, seconds: f64) -> DataPoint {
        DataPoint::new(seconds / self.total_width, 0.0)
    }

    fn top(&self, seconds: f64) -> DataPoint {
        DataPoint::new(seconds / self.total_width, self.height)
    }

    fn curve(&self, start: DataPoint, end: DataPoint) -> Curve {
        Curve::s_curve(start, end, self.ratio)
    }
}

/// Stroked curve through the point estimates of each phase.
pub fn build_line_model(input: &CurveInput<'_>, total_width: qtty::Seconds, ratio: f64) -> LineModel {
    let frame = Frame::new(total_width, input.vertical_weight, ratio);
    let d = input.durations;

    let ingested = input.start_offset.value();
    let rise_start = ingested + d.onset.one_value(FIXED_PHASE_WEIGHT).value();
    let peak_start = rise_start + d.comeup.one_value(FIXED_PHASE_WEIGHT).value();
    let peak_end = peak_start + d.peak.one_value(input.horizontal_weight).value();
    let end = peak_end + d.offset.one_value(input.horizontal_weight).value();

    let plateau_start = frame.top(peak_start);
    let plateau_end = frame.top(peak_end);
    LineModel {
        lead_in_start: frame.baseline(ingested),
        rise: frame.curve(frame.baseline(rise_start), plateau_start),
        plateau_end,
        fall: frame.curve(plateau_end, frame.baseline(end)),
    }
}

/// Closed region between the earliest and latest documented curves.
pub fn build_around_shape(
    input: &CurveInput<'_>,
    total_width: qtty::Seconds,
    ratio: f64,
) -> AroundShapeModel {
    let frame = Frame::new(total_width, input.vertical_weight, ratio);
    let d = input.durations;
    let offset = input.start_offset.value();

    let bottom_left_s = offset + d.onset.min().value();
    let bottom_right_s = offset + d.onset.max().value();
    let top_left_s = bottom_left_s + d.comeup.min().value();
    let top_right_s = bottom_right_s + d.comeup.max().value();
    let peak_end_min_s = top_left_s + d.peak.min().value();
    let peak_end_max_s = top_right_s + d.peak.max().value();
    let end_min_s = peak_end_min_s + d.offset.min().value();
    let end_max_s = peak_end_max_s + d.offset.max().value();

    let bottom_left = frame.baseline(bottom_left_s);
    let bottom_right = frame.baseline(bottom_right_s);
    let top_left = frame.top(top_left_s);
    let top_right = frame.top(top_right_s);
    let peak_end_min = frame.top(peak_end_min_s);
    let peak_end_max = frame.top(peak_end_max_s);
    let end_min = frame.baseline(end_min_s);
    let end_max = frame.baseline(end_max_s);

    AroundShapeModel {
        bottom_left,
        bottom_right,
        rise_outer: frame.curve(bottom_right, top_right),
        peak_end_max,
        fall_outer: frame.curve(peak_end_max, end_max),
        end_min,
        fall_inner: frame.curve(peak_end_min, end_min),
        top_left,
        rise_inner: frame.curve(bottom_left, top_left),
    }
}

/// Line and around shape for one ingestion.
pub fn build_curve_geometry(
    input: &CurveInput<'_>,
    total_width: qtty::Seconds,
    ratio: f64,
) -> CurveGeometry {
    CurveGeometry {
        line: build_line_model(input, total_width, ratio),
        around: build_around_shape(input, total_width, ratio),
        end_offset: curve_extent(input.start_offset, input.durations),
    }
}
