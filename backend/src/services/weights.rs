//! Dose weights used to scale and stretch effect curves.

use std::borrow::Borrow;
use std::collections::HashMap;

use crate::models::{Ingestion, RoaDose};

/// Weight used when nothing is known about where a dose sits in its range.
pub const DEFAULT_HORIZONTAL_WEIGHT: f64 = 0.5;

/// Height of each ingestion's curve relative to the largest dose of the same substance.
///
/// The result is index-aligned with `ingestions`. A substance whose doses
/// are all zero or unknown gets weight 1.0 for every ingestion; a zero dose
/// next to a non-zero maximum gets 0.0.
pub fn vertical_weights<I: Borrow<Ingestion>>(ingestions: &[I]) -> Vec<f64> {
    let mut max_doses: HashMap<&str, f64> = HashMap::new();
    for ingestion in ingestions.iter().map(<I as Borrow<Ingestion>>::borrow) {
        let max = max_doses.entry(ingestion.substance_name.as_str()).or_insert(0.0);
        *max = max.max(ingestion.effective_dose());
    }

    ingestions
        .iter()
        .map(<I as Borrow<Ingestion>>::borrow)
        .map(|ingestion| {
            let max_dose = max_doses
                .get(ingestion.substance_name.as_str())
                .copied()
                .unwrap_or(0.0);
            if max_dose == 0.0 {
                1.0
            } else {
                ingestion.effective_dose() / max_dose
            }
        })
        .collect()
}

/// Position of the dose within the documented range, used to stretch peak and offset.
///
/// A weight supplied on the ingestion wins (clamped to `[0, 1]`). Otherwise
/// the dose is placed between the common and strong thresholds of `roa_dose`.
/// Without usable data the weight is [`DEFAULT_HORIZONTAL_WEIGHT`].
pub fn horizontal_weight(ingestion: &Ingestion, roa_dose: Option<&RoaDose>) -> f64 {
    if let Some(weight) = ingestion.horizontal_weight {
        if weight.is_finite() {
            return weight.clamp(0.0, 1.0);
        }
        log::warn!(
            "Ignoring non-finite horizontal weight for {}",
            ingestion.substance_name
        );
        return DEFAULT_HORIZONTAL_WEIGHT;
    }

    let dose = match ingestion.dose {
        Some(dose) if dose.is_finite() && dose >= 0.0 => dose,
        _ => return DEFAULT_HORIZONTAL_WEIGHT,
    };

    match roa_dose.and_then(|d| d.common_min.zip(d.strong_min)) {
        Some((common_min, strong_min)) if common_min < strong_min => {
            ((dose - common_min) / (strong_min - common_min)).clamp(0.0, 1.0)
        }
        _ => DEFAULT_HORIZONTAL_WEIGHT,
    }
}
