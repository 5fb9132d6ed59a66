//! Proficiency levels and the band scale used to label skills.
//!
//! A [`ProficiencyScale`] is an ordered list of inclusive percentage bands,
//! highest threshold first. Classification walks the bands in order and
//! returns the first one containing the value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result};

/// Qualitative proficiency label
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    /// 90-100 on the default scale
    Expert,
    /// 70-89
    Advanced,
    /// 50-69
    Intermediate,
    /// 30-49
    Beginner,
    /// 10-29
    Familiar,
}

impl ProficiencyLevel {
    /// All levels, highest first.
    pub const ALL: [Self; 5] = [
        Self::Expert,
        Self::Advanced,
        Self::Intermediate,
        Self::Beginner,
        Self::Familiar,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expert => "expert",
            Self::Advanced => "advanced",
            Self::Intermediate => "intermediate",
            Self::Beginner => "beginner",
            Self::Familiar => "familiar",
        }
    }

    /// Human label used by the matrix legend.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Expert => "Expert",
            Self::Advanced => "Advanced",
            Self::Intermediate => "Intermediate",
            Self::Beginner => "Beginner",
            Self::Familiar => "Familiar",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "expert" => Ok(Self::Expert),
            "advanced" => Ok(Self::Advanced),
            "intermediate" => Ok(Self::Intermediate),
            "beginner" => Ok(Self::Beginner),
            "familiar" => Ok(Self::Familiar),
            other => Err(MatrixError::InvalidBands(format!(
                "unknown proficiency level '{other}'"
            ))),
        }
    }
}

/// One labelled band of the scale. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProficiencyBand {
    pub level: ProficiencyLevel,
    #[serde(alias = "minPercentage")]
    pub min_percentage: u8,
    #[serde(alias = "maxPercentage")]
    pub max_percentage: u8,
}

impl ProficiencyBand {
    #[must_use]
    pub const fn new(level: ProficiencyLevel, min_percentage: u8, max_percentage: u8) -> Self {
        Self {
            level,
            min_percentage,
            max_percentage,
        }
    }

    /// Whether `proficiency` falls inside this band.
    #[must_use]
    pub fn contains(&self, proficiency: i32) -> bool {
        i32::from(self.min_percentage) <= proficiency
            && proficiency <= i32::from(self.max_percentage)
    }
}

/// Bands from the published skills matrix.
pub const DEFAULT_BANDS: [ProficiencyBand; 5] = [
    ProficiencyBand::new(ProficiencyLevel::Expert, 90, 100),
    ProficiencyBand::new(ProficiencyLevel::Advanced, 70, 89),
    ProficiencyBand::new(ProficiencyLevel::Intermediate, 50, 69),
    ProficiencyBand::new(ProficiencyLevel::Beginner, 30, 49),
    ProficiencyBand::new(ProficiencyLevel::Familiar, 10, 29),
];

/// Find the first band (in declared order) containing `proficiency`.
///
/// Input is not validated: anything no band contains, including values
/// outside 0-100, returns `default_band`.
#[must_use]
pub fn classify_proficiency<'a>(
    proficiency: i32,
    bands: &'a [ProficiencyBand],
    default_band: &'a ProficiencyBand,
) -> &'a ProficiencyBand {
    bands
        .iter()
        .find(|band| band.contains(proficiency))
        .unwrap_or(default_band)
}

/// A validated, ordered set of bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProficiencyScale {
    bands: Vec<ProficiencyBand>,
}

impl Default for ProficiencyScale {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS.to_vec(),
        }
    }
}

impl ProficiencyScale {
    /// Build a scale, rejecting empty, unordered, overlapping or gapped bands.
    ///
    /// The top band must reach 100; only values under the lowest band go
    /// unlabelled.
    pub fn new(bands: Vec<ProficiencyBand>) -> Result<Self> {
        let problems = validate_bands(&bands);
        if !problems.is_empty() {
            return Err(MatrixError::InvalidBands(problems.join("; ")));
        }
        Ok(Self { bands })
    }

    #[must_use]
    pub fn bands(&self) -> &[ProficiencyBand] {
        &self.bands
    }

    /// The band with the lowest thresholds.
    #[must_use]
    pub fn lowest(&self) -> &ProficiencyBand {
        // Non-empty is checked on construction.
        &self.bands[self.bands.len() - 1]
    }

    #[must_use]
    pub fn highest(&self) -> &ProficiencyBand {
        &self.bands[0]
    }

    /// Classify with input clamped to 0-100 and the lowest band as fallback.
    ///
    /// Values under the lowest band's minimum are labelled with the lowest
    /// band, values over 100 with the highest.
    #[must_use]
    pub fn classify(&self, proficiency: i32) -> &ProficiencyBand {
        let clamped = proficiency.clamp(0, 100);
        classify_proficiency(clamped, &self.bands, self.lowest())
    }

    /// Band for `proficiency` without any fallback.
    #[must_use]
    pub fn band_for(&self, proficiency: i32) -> Option<&ProficiencyBand> {
        self.bands.iter().find(|band| band.contains(proficiency))
    }

    /// Whether `proficiency` sits in the documented fallback range under the
    /// lowest band.
    #[must_use]
    pub fn is_fallback(&self, proficiency: i32) -> bool {
        proficiency < i32::from(self.lowest().min_percentage)
    }
}

fn validate_bands(bands: &[ProficiencyBand]) -> Vec<String> {
    let mut problems = Vec::new();
    if bands.is_empty() {
        problems.push("scale has no bands".to_string());
        return problems;
    }

    for band in bands {
        if band.min_percentage > band.max_percentage {
            problems.push(format!(
                "{} band has min {} above max {}",
                band.level, band.min_percentage, band.max_percentage
            ));
        }
        if band.max_percentage > 100 {
            problems.push(format!(
                "{} band max {} exceeds 100",
                band.level, band.max_percentage
            ));
        }
    }

    let top = &bands[0];
    if top.max_percentage < 100 {
        problems.push(format!(
            "gap above {} ({}-100 unlabelled)",
            top.level,
            top.max_percentage + 1
        ));
    }

    for pair in bands.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        if lower.min_percentage >= upper.min_percentage {
            problems.push(format!(
                "bands out of order: {} must sit below {}",
                lower.level, upper.level
            ));
        } else if lower.max_percentage >= upper.min_percentage {
            problems.push(format!(
                "{} ({}-{}) overlaps {} ({}-{})",
                lower.level,
                lower.min_percentage,
                lower.max_percentage,
                upper.level,
                upper.min_percentage,
                upper.max_percentage
            ));
        } else if u16::from(lower.max_percentage) + 1 != u16::from(upper.min_percentage) {
            problems.push(format!(
                "gap between {} and {} ({}-{} unlabelled)",
                lower.level,
                upper.level,
                lower.max_percentage + 1,
                upper.min_percentage - 1
            ));
        }
    }

    problems
}
