//! Documented duration data for one substance/route pair.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// Named phases of a substance's effect timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationPhase {
    Onset,
    Comeup,
    Peak,
    Offset,
    Total,
    Afterglow,
}

impl DurationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationPhase::Onset => "onset",
            DurationPhase::Comeup => "comeup",
            DurationPhase::Peak => "peak",
            DurationPhase::Offset => "offset",
            DurationPhase::Total => "total",
            DurationPhase::Afterglow => "afterglow",
        }
    }
}

/// Units a documented duration range may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnits {
    #[default]
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DurationUnits {
    /// Number of seconds in one unit.
    pub fn seconds_per_unit(&self) -> f64 {
        match self {
            DurationUnits::Seconds => 1.0,
            DurationUnits::Minutes => 60.0,
            DurationUnits::Hours => 3600.0,
            DurationUnits::Days => 86400.0,
        }
    }
}

/// Raw range as it appears in catalog files, before validation.
#[derive(Debug, Clone, Deserialize)]
struct RawDurationRange {
    min: f64,
    max: f64,
    #[serde(default)]
    units: DurationUnits,
}

impl TryFrom<RawDurationRange> for DurationRange {
    type Error = TimelineError;

    fn try_from(raw: RawDurationRange) -> Result<Self> {
        let factor = raw.units.seconds_per_unit();
        DurationRange::new(raw.min * factor, raw.max * factor)
    }
}

/// A documented `[min, max]` duration for one phase, stored in seconds.
///
/// Invariant: `0 <= min <= max`, both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDurationRange")]
pub struct DurationRange {
    min: qtty::Seconds,
    max: qtty::Seconds,
}

impl DurationRange {
    /// Create a validated range from bounds in seconds.
    pub fn new(min_seconds: f64, max_seconds: f64) -> Result<Self> {
        let valid = min_seconds.is_finite()
            && max_seconds.is_finite()
            && min_seconds >= 0.0
            && min_seconds <= max_seconds;
        if !valid {
            return Err(TimelineError::InvalidDurationRange {
                min: min_seconds,
                max: max_seconds,
            });
        }
        Ok(Self {
            min: qtty::Seconds::new(min_seconds),
            max: qtty::Seconds::new(max_seconds),
        })
    }

    pub fn from_minutes(min: f64, max: f64) -> Result<Self> {
        Self::new(min * 60.0, max * 60.0)
    }

    pub fn from_hours(min: f64, max: f64) -> Result<Self> {
        Self::new(min * 3600.0, max * 3600.0)
    }

    pub fn min(&self) -> qtty::Seconds {
        self.min
    }

    pub fn max(&self) -> qtty::Seconds {
        self.max
    }

    /// Point estimate inside the range: `min + weight * (max - min)`.
    ///
    /// The weight is not clamped; callers keep it within `[0, 1]`.
    pub fn one_value(&self, weight: f64) -> qtty::Seconds {
        let min = self.min.value();
        let max = self.max.value();
        qtty::Seconds::new((min + weight * (max - min)).clamp(min, max))
    }
}

/// Duration ranges documented for one route of administration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoaDuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset: Option<DurationRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comeup: Option<DurationRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak: Option<DurationRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<DurationRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<DurationRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afterglow: Option<DurationRange>,
}

/// The four phases a curve needs, all present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompleteDurations {
    pub onset: DurationRange,
    pub comeup: DurationRange,
    pub peak: DurationRange,
    pub offset: DurationRange,
}

/// Whether a [`RoaDuration`] carries enough data to draw a curve.
#[derive(Debug, Clone, PartialEq)]
pub enum DurationAvailability {
    Complete(CompleteDurations),
    Incomplete { missing: Vec<DurationPhase> },
}

impl RoaDuration {
    /// Check the four curve phases once and report which are missing.
    pub fn availability(&self) -> DurationAvailability {
        match (self.onset, self.comeup, self.peak, self.offset) {
            (Some(onset), Some(comeup), Some(peak), Some(offset)) => {
                DurationAvailability::Complete(CompleteDurations {
                    onset,
                    comeup,
                    peak,
                    offset,
                })
            }
            (onset, comeup, peak, offset) => {
                let missing = [
                    (DurationPhase::Onset, onset.is_none()),
                    (DurationPhase::Comeup, comeup.is_none()),
                    (DurationPhase::Peak, peak.is_none()),
                    (DurationPhase::Offset, offset.is_none()),
                ]
                .into_iter()
                .filter_map(|(phase, absent)| absent.then_some(phase))
                .collect();
                DurationAvailability::Incomplete { missing }
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.availability(), DurationAvailability::Complete(_))
    }
}

impl CompleteDurations {
    /// Longest possible extent of the curve, every phase at its maximum.
    pub fn max_total(&self) -> qtty::Seconds {
        qtty::Seconds::new(
            self.onset.max().value()
                + self.comeup.max().value()
                + self.peak.max().value()
                + self.offset.max().value(),
        )
    }
}
