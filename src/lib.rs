//! # face-harmony
//!
//! Facial proportion, symmetry and shape measurements from 68-point facial
//! landmarks, plus their human-readable interpretation and an aggregate
//! "harmony" score.
//!
//! This crate provides:
//! - **Geometry Extraction**: IPD-normalized ratios, angles and facial thirds
//!   from a [`LandmarkSet`], with head-pose quality indicators
//! - **Interpretation**: per-metric feedback and confidence from a central
//!   threshold table, conditioned on [`Gender`]
//! - **Scoring**: a bounded 0-100 heuristic score with a templated summary
//!
//! Landmark localization is out of scope: points come from any detector that
//! emits the iBUG 68-point layout (dlib, face-api.js, ...).
//!
//! ## Pipeline
//!
//! 1. Validate that exactly 68 points were supplied
//! 2. Locate the pupils as eye-corner midpoints; their distance (IPD) is the
//!    unit for every length-based metric
//! 3. Measure ratios, angles, symmetry and facial thirds
//! 4. Classify each metric against its reference band
//! 5. Accumulate weighted bonuses into the overall score
//!
//! ## Quick Start
//!
//! ```rust
//! use face_harmony::{analyze, Gender, LandmarkSet, Point, QualityThresholds};
//!
//! // Landmarks from your detector
//! let points: Vec<Point> = (0..68)
//!     .map(|i| Point::new(i as f64 * 2.0, (i % 9) as f64 * 10.0))
//!     .collect();
//! let landmarks = LandmarkSet::from_points(&points)?;
//!
//! let analysis = analyze(&landmarks, Gender::Female, &QualityThresholds::default());
//! println!("{}/100: {}", analysis.score, analysis.summary);
//! for metric in &analysis.interpreted {
//!     println!("{}: {} ({})", metric.name, metric.value, metric.feedback);
//! }
//! # Ok::<(), face_harmony::Error>(())
//! ```

mod analysis;
mod config;
mod error;
pub mod geometry;
mod interpret;
mod metrics;
mod quality;
mod score;
mod types;

pub use analysis::{analyze, analyze_points, Analysis};
pub use config::{load_config, Config};
pub use error::{Error, Result};
pub use interpret::{
    interpret, to_fixed, Band, Confidence, Format, Gender, InterpretedMetric, MetricKind,
    MetricRule, CANTHAL_NEUTRAL, FACE_WIDTH_IDEAL, FACIAL_INDEX_IDEAL, ICD_IDEAL, IDEAL_THIRD,
    METRIC_RULES, THIRDS_TOLERANCE,
};
pub use metrics::{
    extract, extract_points, symmetry_score, FacialMetrics, FacialThirds, QualityMetrics,
};
pub use quality::{assess_quality, QualityIssue, QualityReport, QualityThresholds};
pub use score::{
    harmony_summary, jawline_threshold, overall_score, raw_score, score, HarmonyScore,
};
pub use types::{landmarks, mirror_index, LandmarkSet, Point, NUM_LANDMARKS};
