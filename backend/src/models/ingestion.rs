//! Journal entries consumed by the timeline: ingestions, ratings and notes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

/// Route of administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdministrationRoute {
    Oral,
    Sublingual,
    Buccal,
    Insufflated,
    Rectal,
    Transdermal,
    Subcutaneous,
    Intramuscular,
    Intravenous,
    Smoked,
    Inhaled,
}

impl AdministrationRoute {
    pub const ALL: [AdministrationRoute; 11] = [
        AdministrationRoute::Oral,
        AdministrationRoute::Sublingual,
        AdministrationRoute::Buccal,
        AdministrationRoute::Insufflated,
        AdministrationRoute::Rectal,
        AdministrationRoute::Transdermal,
        AdministrationRoute::Subcutaneous,
        AdministrationRoute::Intramuscular,
        AdministrationRoute::Intravenous,
        AdministrationRoute::Smoked,
        AdministrationRoute::Inhaled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdministrationRoute::Oral => "oral",
            AdministrationRoute::Sublingual => "sublingual",
            AdministrationRoute::Buccal => "buccal",
            AdministrationRoute::Insufflated => "insufflated",
            AdministrationRoute::Rectal => "rectal",
            AdministrationRoute::Transdermal => "transdermal",
            AdministrationRoute::Subcutaneous => "subcutaneous",
            AdministrationRoute::Intramuscular => "intramuscular",
            AdministrationRoute::Intravenous => "intravenous",
            AdministrationRoute::Smoked => "smoked",
            AdministrationRoute::Inhaled => "inhaled",
        }
    }
}

impl fmt::Display for AdministrationRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdministrationRoute {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|route| route.as_str() == lowered)
            .ok_or_else(|| TimelineError::UnknownRoute(s.to_string()))
    }
}

/// Color a substance is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstanceColor {
    Red,
    Orange,
    Yellow,
    Green,
    Mint,
    Teal,
    Cyan,
    #[default]
    Blue,
    Indigo,
    Purple,
    Pink,
    Brown,
}

/// One logged ingestion, as read from the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingestion {
    pub substance_name: String,
    pub route: AdministrationRoute,
    /// Dose in the substance's units; `None` when the user did not know it
    #[serde(default)]
    pub dose: Option<f64>,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub color: SubstanceColor,
    /// Position of the dose within the documented range, when the caller knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_weight: Option<f64>,
}

impl Ingestion {
    pub fn new(
        substance_name: impl Into<String>,
        route: AdministrationRoute,
        dose: Option<f64>,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            substance_name: substance_name.into(),
            route,
            dose,
            time,
            color: SubstanceColor::default(),
            horizontal_weight: None,
        }
    }

    pub fn with_color(mut self, color: SubstanceColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_horizontal_weight(mut self, weight: f64) -> Self {
        self.horizontal_weight = Some(weight);
        self
    }

    /// Dose usable for weighting: unknown, negative and non-finite doses count as zero.
    pub fn effective_dose(&self) -> f64 {
        match self.dose {
            Some(dose) if dose.is_finite() && dose > 0.0 => dose,
            _ => 0.0,
        }
    }
}

/// Documented dose thresholds for one route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoaDose {
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub light_min: Option<f64>,
    #[serde(default)]
    pub common_min: Option<f64>,
    #[serde(default)]
    pub strong_min: Option<f64>,
    #[serde(default)]
    pub heavy_min: Option<f64>,
}

/// Shulgin rating scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingOption {
    Minus,
    PlusMinus,
    Plus,
    TwoPlus,
    ThreePlus,
    FourPlus,
}

impl RatingOption {
    pub fn sign(&self) -> &'static str {
        match self {
            RatingOption::Minus => "-",
            RatingOption::PlusMinus => "±",
            RatingOption::Plus => "+",
            RatingOption::TwoPlus => "++",
            RatingOption::ThreePlus => "+++",
            RatingOption::FourPlus => "++++",
        }
    }
}

/// A rating placed on the timeline at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub time: DateTime<Utc>,
    pub option: RatingOption,
}

/// A free-text note pinned to the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedNote {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub color: SubstanceColor,
}
