//! Facial proportion metrics extracted from landmark geometry.
//!
//! Every length-based measurement is divided by the inter-pupillary distance
//! (IPD), so the values are comparable across image resolutions and zoom
//! levels. Angles are in degrees and thirds are percentages.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{angle, distance, line_angle};
use crate::types::{landmarks as lm, LandmarkSet, Point};

/// Bilateral pairs compared against the midline for the symmetry score:
/// jaw corners, outer eye corners, mouth corners.
const SYMMETRY_PAIRS: [(usize, usize); 3] = [
    (lm::JAW_LEFT, lm::JAW_RIGHT),
    (lm::LEFT_EYE_OUTER, lm::RIGHT_EYE_OUTER),
    (lm::MOUTH_LEFT, lm::MOUTH_RIGHT),
];

/// Vertical division of the face as percentages of the summed segment lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FacialThirds {
    /// Brow peak to nasion
    pub upper: f64,
    /// Nasion to subnasale
    pub mid: f64,
    /// Subnasale to menton
    pub lower: f64,
}

impl FacialThirds {
    fn from_lengths(upper: f64, mid: f64, lower: f64) -> Self {
        let total = upper + mid + lower;
        Self {
            upper: upper / total * 100.0,
            mid: mid / total * 100.0,
            lower: lower / total * 100.0,
        }
    }
}

/// Geometric facial measurements derived from one [`LandmarkSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FacialMetrics {
    /// Inter-pupillary distance in pixels (the normalization unit)
    pub ipd: f64,
    /// Inner canthus distance / IPD
    pub icd_ratio: f64,
    /// Jaw-corner to jaw-corner width / IPD
    pub face_width_ratio: f64,
    /// Brow peak to chin / IPD
    pub face_height_ratio: f64,
    /// 0-100, 100 = perfectly mirrored about the pupil midline
    pub symmetry_score: f64,
    /// Degrees, positive = outer corner higher than inner ("upturned")
    pub canthal_tilt: f64,
    pub brow_eye_distance: f64,
    pub nasal_width: f64,
    pub nasal_length: f64,
    pub mouth_width: f64,
    /// Upper lip height / lower lip height
    pub lip_ratio: f64,
    /// Bizygomatic width / bigonial width
    pub bizygomatic_bigonial_ratio: f64,
    pub chin_height: f64,
    pub chin_width: f64,
    /// Horizontal chin offset from the midline / IPD. Rough frontal proxy.
    pub chin_projection: f64,
    /// Degrees at the chin between the upper jaw contour points
    pub jawline_sharpness: f64,
    /// Degrees at the jaw corner between the jaw line and the chin
    pub gonial_angle: f64,
    pub ramus_height: f64,
    pub facial_thirds: FacialThirds,
    /// Face height / face width
    pub facial_index: f64,
    /// Horizontal subnasale offset from the midline / nasion-to-menton.
    /// Frontal-photo proxy for profile convexity, not an anatomical measurement.
    pub facial_convexity: f64,
}

/// Head-pose and resolution indicators. They never affect the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Absolute in-plane head tilt in degrees
    pub roll: f64,
    /// Smaller / larger eye width, in (0, 1]; drops as the head turns
    pub yaw: f64,
    /// Inter-pupillary distance in pixels
    pub ipd: f64,
}

/// Extract facial metrics and pose quality from a validated landmark set.
pub fn extract(landmarks: &LandmarkSet) -> (FacialMetrics, QualityMetrics) {
    let p = |idx: usize| landmarks[idx];

    let left_outer = p(lm::LEFT_EYE_OUTER);
    let left_inner = p(lm::LEFT_EYE_INNER);
    let right_outer = p(lm::RIGHT_EYE_OUTER);
    let right_inner = p(lm::RIGHT_EYE_INNER);
    let menton = p(lm::MENTON);
    let nasion = p(lm::NASION);
    let subnasale = p(lm::SUBNASALE);
    let brow_top = p(lm::BROW_LEFT_PEAK);
    let upper_lip = p(lm::UPPER_LIP_CENTER);
    let lower_lip = p(lm::LOWER_LIP_CENTER);

    // Pass 1: pupil anchors and the normalization unit
    let left_pupil = left_outer.midpoint(&left_inner);
    let right_pupil = right_outer.midpoint(&right_inner);
    let ipd = distance(&left_pupil, &right_pupil);
    let midline_x = (left_pupil.x + right_pupil.x) / 2.0;

    let roll = line_angle(&left_pupil, &right_pupil).abs();
    let left_eye_width = distance(&left_outer, &left_inner);
    let right_eye_width = distance(&right_outer, &right_inner);
    let yaw = left_eye_width.min(right_eye_width) / left_eye_width.max(right_eye_width);

    // Pass 2: normalized measurements
    let face_width = distance(&p(lm::JAW_LEFT), &p(lm::JAW_RIGHT));
    let face_height = distance(&brow_top, &menton);

    let brow_eye = (distance(&brow_top, &left_inner)
        + distance(&p(lm::BROW_RIGHT_PEAK), &right_inner))
        / 2.0;

    let upper_lip_height = distance(&upper_lip, &subnasale);
    let lower_lip_height = distance(&lower_lip, &upper_lip);

    let thirds = FacialThirds::from_lengths(
        distance(&brow_top, &nasion),
        distance(&nasion, &subnasale),
        distance(&subnasale, &menton),
    );

    let metrics = FacialMetrics {
        ipd,
        icd_ratio: distance(&left_inner, &right_inner) / ipd,
        face_width_ratio: face_width / ipd,
        face_height_ratio: face_height / ipd,
        symmetry_score: symmetry_score(landmarks, midline_x, ipd),
        canthal_tilt: (canthal_tilt(&left_outer, &left_inner)
            + canthal_tilt(&right_outer, &right_inner))
            / 2.0,
        brow_eye_distance: brow_eye / ipd,
        nasal_width: distance(&p(lm::NOSE_LEFT), &p(lm::NOSE_RIGHT)) / ipd,
        nasal_length: distance(&nasion, &subnasale) / ipd,
        mouth_width: distance(&p(lm::MOUTH_LEFT), &p(lm::MOUTH_RIGHT)) / ipd,
        lip_ratio: upper_lip_height / lower_lip_height,
        bizygomatic_bigonial_ratio: face_width
            / distance(&p(lm::GONION_LEFT), &p(lm::GONION_RIGHT)),
        chin_height: distance(&lower_lip, &menton) / ipd,
        chin_width: distance(&p(lm::CHIN_LEFT), &p(lm::CHIN_RIGHT)) / ipd,
        chin_projection: (menton.x - midline_x).abs() / ipd,
        jawline_sharpness: angle(&p(lm::JAW_UPPER_LEFT), &menton, &p(lm::JAW_UPPER_RIGHT)),
        gonial_angle: angle(&p(lm::JAW_LEFT), &p(lm::GONION_LEFT), &menton),
        ramus_height: distance(&p(lm::JAW_RAMUS_LEFT), &p(lm::JAW_LEFT)) / ipd,
        facial_thirds: thirds,
        facial_index: face_height / face_width,
        facial_convexity: (subnasale.x - midline_x) / distance(&nasion, &menton),
    };

    let quality = QualityMetrics { roll, yaw, ipd };

    debug!(
        "extracted metrics: ipd={:.1}px roll={:.1}° yaw={:.2} symmetry={:.1}",
        ipd, roll, yaw, metrics.symmetry_score
    );

    (metrics, quality)
}

/// Validate an arbitrary point slice, then [`extract`].
pub fn extract_points(points: &[Point]) -> Result<(FacialMetrics, QualityMetrics)> {
    let landmarks = LandmarkSet::from_points(points)?;
    Ok(extract(&landmarks))
}

/// Bilateral symmetry score in [0, 100].
///
/// Sums, over [`SYMMETRY_PAIRS`], the IPD-normalized difference between each
/// point's horizontal distance from the midline. A zero IPD yields 0.
pub fn symmetry_score(landmarks: &LandmarkSet, midline_x: f64, ipd: f64) -> f64 {
    let deviation: f64 = SYMMETRY_PAIRS
        .iter()
        .map(|&(left, right)| {
            let left_dist = (landmarks[left].x - midline_x).abs();
            let right_dist = (landmarks[right].x - midline_x).abs();
            (left_dist - right_dist).abs() / ipd
        })
        .sum();

    // f64::max maps a NaN deviation to 0
    (100.0 - deviation * 100.0).max(0.0)
}

/// Tilt of one eye's canthus line in degrees; positive when the outer corner
/// sits higher in the image than the inner corner.
fn canthal_tilt(outer: &Point, inner: &Point) -> f64 {
    (inner.y - outer.y).atan2((outer.x - inner.x).abs()).to_degrees()
}
