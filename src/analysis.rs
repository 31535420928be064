//! One-shot analysis: landmarks in, every derived output out.

use log::warn;
use serde::Serialize;

use crate::error::Result;
use crate::interpret::{interpret, Gender, InterpretedMetric};
use crate::metrics::{extract, FacialMetrics, QualityMetrics};
use crate::quality::{assess_quality, QualityReport, QualityThresholds};
use crate::score::{harmony_summary, overall_score};
use crate::types::{LandmarkSet, Point};

/// Everything derived from one landmark set.
///
/// Serialize-only: JSON writes undefined (NaN) metrics as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub gender: Gender,
    pub metrics: FacialMetrics,
    pub quality: QualityMetrics,
    pub quality_report: QualityReport,
    pub interpreted: Vec<InterpretedMetric>,
    pub score: u8,
    pub summary: String,
}

/// Run extraction, interpretation, quality grading and scoring.
pub fn analyze(
    landmarks: &LandmarkSet,
    gender: Gender,
    thresholds: &QualityThresholds,
) -> Analysis {
    let (metrics, quality) = extract(landmarks);

    let quality_report = assess_quality(&quality, thresholds);
    if !quality_report.is_reliable() {
        let issues: Vec<_> = quality_report.issues.iter().map(|i| i.message()).collect();
        warn!("measurements may be unreliable: {}", issues.join(", "));
    }

    let score = overall_score(&metrics, gender);
    Analysis {
        gender,
        metrics,
        quality,
        quality_report,
        interpreted: interpret(&metrics, gender),
        score,
        summary: harmony_summary(score, &metrics),
    }
}

/// Validate `points` as a 68-point set, then [`analyze`].
pub fn analyze_points(
    points: &[Point],
    gender: Gender,
    thresholds: &QualityThresholds,
) -> Result<Analysis> {
    let landmarks = LandmarkSet::from_points(points)?;
    Ok(analyze(&landmarks, gender, thresholds))
}
