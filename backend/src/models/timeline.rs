//! Normalized timeline geometry handed to renderers.
//!
//! All positions are fractions of the drawing rectangle: `x` runs from the
//! timeline start (0) to its end (1), `y` from the baseline (0) to full
//! height (1). Renderers map these into pixels and apply
//! `inset_level * line_width` as inward padding.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::duration::DurationPhase;
use super::ingestion::{AdministrationRoute, RatingOption, SubstanceColor};

fn in_unit(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// A fractional position inside the timeline rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    /// Create a point, clamping into `[0, 1]`.
    ///
    /// Out-of-range input is a geometry bug: debug builds assert, release
    /// builds log and clamp.
    pub fn new(x: f64, y: f64) -> Self {
        debug_assert!(
            in_unit(x) && in_unit(y),
            "data point outside unit square: ({x}, {y})"
        );
        if !(in_unit(x) && in_unit(y)) {
            log::warn!("Clamping data point ({}, {}) into the unit square", x, y);
        }
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    pub fn is_normalized(&self) -> bool {
        in_unit(self.x) && in_unit(self.y)
    }
}

/// Cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub start: DataPoint,
    pub end: DataPoint,
    pub control0: DataPoint,
    pub control1: DataPoint,
}

impl Curve {
    /// S-shaped transition with horizontal tangents at both ends.
    ///
    /// `ratio` is the fraction of the horizontal span at which each control
    /// point sits, measured from its own endpoint.
    pub fn s_curve(start: DataPoint, end: DataPoint, ratio: f64) -> Self {
        let dx = end.x - start.x;
        let (lo, hi) = (start.x.min(end.x), start.x.max(end.x));
        Self {
            start,
            end,
            control0: DataPoint::new((start.x + ratio * dx).clamp(lo, hi), start.y),
            control1: DataPoint::new((end.x - ratio * dx).clamp(lo, hi), end.y),
        }
    }

    /// Evaluate the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> DataPoint {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        let x = b0 * self.start.x + b1 * self.control0.x + b2 * self.control1.x + b3 * self.end.x;
        let y = b0 * self.start.y + b1 * self.control0.y + b2 * self.control1.y + b3 * self.end.y;
        DataPoint::new(clamp_unit(x), clamp_unit(y))
    }

    /// The reversed segment, same shape traversed end to start.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            control0: self.control1,
            control1: self.control0,
        }
    }

    pub fn points(&self) -> [DataPoint; 4] {
        [self.start, self.control0, self.control1, self.end]
    }
}

/// Flattened drawing instructions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathElement {
    MoveTo { to: DataPoint },
    LineTo { to: DataPoint },
    CurveTo {
        control0: DataPoint,
        control1: DataPoint,
        to: DataPoint,
    },
    Close,
}

impl PathElement {
    fn curve(curve: &Curve) -> Self {
        PathElement::CurveTo {
            control0: curve.control0,
            control1: curve.control1,
            to: curve.end,
        }
    }
}

/// Stroked effect curve of one ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineModel {
    /// Ingestion instant on the baseline.
    pub lead_in_start: DataPoint,
    /// Rising transition; starts where the flat lead-in ends.
    pub rise: Curve,
    /// End of the flat peak.
    pub plateau_end: DataPoint,
    /// Falling transition back to the baseline.
    pub fall: Curve,
}

impl LineModel {
    pub fn path(&self) -> Vec<PathElement> {
        vec![
            PathElement::MoveTo { to: self.lead_in_start },
            PathElement::LineTo { to: self.rise.start },
            PathElement::curve(&self.rise),
            PathElement::LineTo { to: self.plateau_end },
            PathElement::curve(&self.fall),
        ]
    }

    pub fn points(&self) -> Vec<DataPoint> {
        let mut points = vec![self.lead_in_start, self.plateau_end];
        points.extend(self.rise.points());
        points.extend(self.fall.points());
        points
    }
}

/// Closed region spanning the documented min/max variability of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AroundShapeModel {
    /// Earliest possible end of onset.
    pub bottom_left: DataPoint,
    /// Latest possible end of onset.
    pub bottom_right: DataPoint,
    /// `bottom_right` up to the latest peak start.
    pub rise_outer: Curve,
    pub peak_end_max: DataPoint,
    /// `peak_end_max` down to the latest end.
    pub fall_outer: Curve,
    pub end_min: DataPoint,
    /// Earliest peak end down to the earliest end.
    pub fall_inner: Curve,
    pub top_left: DataPoint,
    /// Earliest onset end up to the earliest peak start.
    pub rise_inner: Curve,
}

impl AroundShapeModel {
    /// Outline: bottom-left, bottom-right, curve up, across, curve down,
    /// back along the baseline, curve up, across, curve down to close.
    pub fn path(&self) -> Vec<PathElement> {
        let fall_inner_back = self.fall_inner.reversed();
        let rise_inner_back = self.rise_inner.reversed();
        vec![
            PathElement::MoveTo { to: self.bottom_left },
            PathElement::LineTo { to: self.bottom_right },
            PathElement::curve(&self.rise_outer),
            PathElement::LineTo { to: self.peak_end_max },
            PathElement::curve(&self.fall_outer),
            PathElement::LineTo { to: self.end_min },
            PathElement::curve(&fall_inner_back),
            PathElement::LineTo { to: self.top_left },
            PathElement::curve(&rise_inner_back),
            PathElement::Close,
        ]
    }

    pub fn points(&self) -> Vec<DataPoint> {
        let mut points = vec![
            self.bottom_left,
            self.bottom_right,
            self.peak_end_max,
            self.end_min,
            self.top_left,
        ];
        for curve in [&self.rise_outer, &self.fall_outer, &self.fall_inner, &self.rise_inner] {
            points.extend(curve.points());
        }
        points
    }
}

/// Interval during which an ingestion is expected to peak, in seconds from the timeline start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub start: qtty::Seconds,
    pub end: qtty::Seconds,
}

impl PeakWindow {
    /// Inclusive overlap test.
    pub fn overlaps(&self, other: &PeakWindow) -> bool {
        self.start.value() <= other.end.value() && other.start.value() <= self.end.value()
    }
}

/// Everything needed to draw one ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionDrawable {
    pub substance_name: String,
    pub route: AdministrationRoute,
    pub color: SubstanceColor,
    pub time: DateTime<Utc>,
    /// Seconds from the timeline start to the ingestion.
    pub start_offset: qtty::Seconds,
    /// Seconds from the timeline start to the latest possible end of effects.
    pub end_offset: qtty::Seconds,
    pub vertical_weight: f64,
    pub horizontal_weight: f64,
    pub inset_level: usize,
    pub peak_window: PeakWindow,
    pub line: LineModel,
    pub around: AroundShapeModel,
}

/// Why an ingestion has no curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// No duration data is documented for the substance and route.
    NoDurationData,
    /// Some of the four curve phases are undocumented.
    Incomplete { missing: Vec<DurationPhase> },
}

/// An ingestion that could not be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedIngestion {
    pub substance_name: String,
    pub route: AdministrationRoute,
    pub time: DateTime<Utc>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingDrawable {
    pub option: RatingOption,
    pub time: DateTime<Utc>,
    pub offset: qtty::Seconds,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedNoteDrawable {
    pub time: DateTime<Utc>,
    pub color: SubstanceColor,
    pub offset: qtty::Seconds,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub time: DateTime<Utc>,
    pub offset: qtty::Seconds,
    pub x: f64,
    pub label: String,
}

/// Hour labels along the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDrawable {
    pub step_hours: u32,
    pub ticks: Vec<AxisTick>,
}

/// Complete drawable timeline, recomputed from scratch for every input set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineModel {
    pub start_time: DateTime<Utc>,
    pub total_width: qtty::Seconds,
    pub ingestion_drawables: Vec<IngestionDrawable>,
    pub rating_drawables: Vec<RatingDrawable>,
    pub timed_note_drawables: Vec<TimedNoteDrawable>,
    pub skipped_ingestions: Vec<SkippedIngestion>,
    pub axis: AxisDrawable,
}

impl TimelineModel {
    pub fn end_time(&self) -> DateTime<Utc> {
        shift_time(self.start_time, self.total_width.value())
    }

    /// Fraction of the width at which `time` falls, or `None` outside the timeline.
    pub fn x_for(&self, time: DateTime<Utc>) -> Option<f64> {
        let width = self.total_width.value();
        if width <= 0.0 {
            return None;
        }
        let x = seconds_between(self.start_time, time) / width;
        in_unit(x).then_some(x)
    }

    /// True when no curve could be drawn.
    pub fn has_no_curves(&self) -> bool {
        self.ingestion_drawables.is_empty()
    }
}

/// `time` moved by `seconds` (millisecond precision), saturating at the
/// bounds of [`DateTime<Utc>`].
pub fn shift_time(time: DateTime<Utc>, seconds: f64) -> DateTime<Utc> {
    let millis = (seconds * 1000.0).round() as i64;
    Duration::try_milliseconds(millis)
        .and_then(|delta| time.checked_add_signed(delta))
        .unwrap_or(if seconds < 0.0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// Signed seconds from `from` to `to`, with millisecond precision.
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_data_point_in_range() {
        let p = DataPoint::new(0.25, 1.0);
        assert_eq!(p.x, 0.25);
        assert_eq!(p.y, 1.0);
        assert!(p.is_normalized());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "data point outside unit square")]
    fn test_data_point_out_of_range_asserts_in_debug() {
        let _ = DataPoint::new(1.5, 0.0);
    }

    #[test]
    fn test_s_curve_control_points() {
        let curve = Curve::s_curve(DataPoint::new(0.1, 0.0), DataPoint::new(0.5, 0.8), 0.2);
        assert!((curve.control0.x - 0.18).abs() < 1e-12);
        assert_eq!(curve.control0.y, 0.0);
        assert!((curve.control1.x - 0.42).abs() < 1e-12);
        assert_eq!(curve.control1.y, 0.8);
    }

    #[test]
    fn test_point_at_endpoints_and_monotonic() {
        let curve = Curve::s_curve(DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 1.0), 0.2);
        assert_eq!(curve.point_at(0.0), curve.start);
        let end = curve.point_at(1.0);
        assert!((end.x - 1.0).abs() < 1e-12 && (end.y - 1.0).abs() < 1e-12);

        let mut last = -1.0;
        for i in 0..=20 {
            let p = curve.point_at(i as f64 / 20.0);
            assert!(p.y >= last);
            last = p.y;
        }
    }

    #[test]
    fn test_peak_window_overlap_is_inclusive() {
        let a = PeakWindow {
            start: qtty::Seconds::new(0.0),
            end: qtty::Seconds::new(10.0),
        };
        let touching = PeakWindow {
            start: qtty::Seconds::new(10.0),
            end: qtty::Seconds::new(20.0),
        };
        let apart = PeakWindow {
            start: qtty::Seconds::new(10.5),
            end: qtty::Seconds::new(20.0),
        };
        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_x_for_inside_and_outside() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let model = TimelineModel {
            start_time: start,
            total_width: qtty::Seconds::new(3600.0),
            ingestion_drawables: vec![],
            rating_drawables: vec![],
            timed_note_drawables: vec![],
            skipped_ingestions: vec![],
            axis: AxisDrawable {
                step_hours: 1,
                ticks: vec![],
            },
        };
        let half = start + Duration::minutes(30);
        assert_eq!(model.x_for(half), Some(0.5));
        assert_eq!(model.x_for(start - Duration::minutes(1)), None);
        assert_eq!(model.end_time(), start + Duration::hours(1));
        assert!(model.has_no_curves());
    }

    #[test]
    fn test_shift_time_saturates() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(shift_time(start, 90.0), start + Duration::seconds(90));
        assert_eq!(shift_time(start, -0.5), start - Duration::milliseconds(500));
        assert_eq!(shift_time(DateTime::<Utc>::MIN_UTC, -600.0), DateTime::<Utc>::MIN_UTC);
        assert_eq!(shift_time(DateTime::<Utc>::MAX_UTC, 600.0), DateTime::<Utc>::MAX_UTC);
        assert_eq!(shift_time(start, f64::INFINITY), DateTime::<Utc>::MAX_UTC);
        assert_eq!(shift_time(start, f64::NEG_INFINITY), DateTime::<Utc>::MIN_UTC);
    }
}
