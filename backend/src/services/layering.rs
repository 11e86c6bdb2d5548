//! Inset levels for curves whose peaks coincide.
//!
//! Each curve is compared against every curve before it in the input order;
//! the number of earlier peak windows it overlaps is its inset level. A
//! renderer draws a curve at level `k` that many line widths further in, so
//! concurrent peaks stay visually separate.

use crate::models::{CompleteDurations, PeakWindow};

/// Weight used for onset and comeup, which are not dose-sensitive.
pub const FIXED_PHASE_WEIGHT: f64 = 0.5;

/// Peak window of an ingestion starting `start_offset` seconds into the timeline.
pub fn peak_window(
    start_offset: qtty::Seconds,
    durations: &CompleteDurations,
    horizontal_weight: f64,
) -> PeakWindow {
    let start = start_offset
        + durations.onset.one_value(FIXED_PHASE_WEIGHT)
        + durations.comeup.one_value(FIXED_PHASE_WEIGHT);
    let end = start + durations.peak.one_value(horizontal_weight);
    PeakWindow { start, end }
}

/// Inset level of every window, index-aligned with `windows`.
///
/// Windows are expected in ascending time order. The result only depends on
/// that order, so repeated calls agree.
pub fn assign_inset_levels(windows: &[PeakWindow]) -> Vec<usize> {
    windows
        .iter()
        .enumerate()
        .map(|(i, window)| {
            let level = windows[..i]
                .iter()
                .filter(|earlier| earlier.overlaps(window))
                .count();
            if level > 0 {
                log::debug!("Peak window {} overlaps {} earlier window(s)", i, level);
            }
            level
        })
        .collect()
}
