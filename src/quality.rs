//! Photo-quality grading of the pose indicators.

use serde::{Deserialize, Serialize};

use crate::metrics::QualityMetrics;

/// Limits beyond which measurements are flagged as unreliable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Maximum absolute head roll in degrees
    pub max_roll_degrees: f64,
    /// Accepted eye-width ratio range (inclusive)
    pub yaw_range: (f64, f64),
    /// Minimum inter-pupillary distance in pixels
    pub min_ipd_pixels: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            max_roll_degrees: 8.0,
            yaw_range: (0.85, 1.15),
            min_ipd_pixels: 120.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityIssue {
    HeadTilted,
    HeadTurned,
    LowResolution,
}

impl QualityIssue {
    pub fn message(&self) -> &'static str {
        match self {
            QualityIssue::HeadTilted => "Head is tilted",
            QualityIssue::HeadTurned => "Head is turned to the side",
            QualityIssue::LowResolution => "Low resolution or face too far",
        }
    }
}

impl std::fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub issues: Vec<QualityIssue>,
}

impl QualityReport {
    /// True when no issue was raised.
    pub fn is_reliable(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Grade pose indicators against `thresholds`. NaN inputs raise no issue.
pub fn assess_quality(quality: &QualityMetrics, thresholds: &QualityThresholds) -> QualityReport {
    let mut issues = Vec::new();

    if quality.roll.abs() > thresholds.max_roll_degrees {
        issues.push(QualityIssue::HeadTilted);
    }
    let (yaw_min, yaw_max) = thresholds.yaw_range;
    if quality.yaw < yaw_min || quality.yaw > yaw_max {
        issues.push(QualityIssue::HeadTurned);
    }
    if quality.ipd < thresholds.min_ipd_pixels {
        issues.push(QualityIssue::LowResolution);
    }

    QualityReport { issues }
}
