//! Aggregate harmony score and templated summary.
//!
//! The score is a hand-tuned heuristic: a base of 50 plus independently
//! gated bonuses, clamped to [0, 100]. The bonuses deliberately do not sum
//! to a fixed total.

use serde::{Deserialize, Serialize};

use crate::interpret::{
    Gender, CANTHAL_NEUTRAL, FACE_WIDTH_IDEAL, FACIAL_INDEX_IDEAL, ICD_IDEAL, IDEAL_THIRD,
    THIRDS_TOLERANCE,
};
use crate::metrics::FacialMetrics;

const BASE_SCORE: f64 = 50.0;
const SYMMETRY_WEIGHT: f64 = 20.0;
const PROPORTION_BONUS: f64 = 5.0;
const CANTHAL_IDEAL: (f64, f64) = (2.0, 10.0);
const JAWLINE_SHARP_MALE: f64 = 125.0;
const JAWLINE_SHARP_FEMALE: f64 = 135.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonyScore {
    /// 0-100
    pub score: u8,
    pub summary: String,
}

fn in_range(v: f64, (low, high): (f64, f64)) -> bool {
    v >= low && v <= high
}

/// Jawline threshold below which the full jawline bonus applies.
pub fn jawline_threshold(gender: Gender) -> f64 {
    match gender {
        Gender::Male => JAWLINE_SHARP_MALE,
        Gender::Female => JAWLINE_SHARP_FEMALE,
    }
}

/// Unclamped weighted total before rounding.
pub fn raw_score(metrics: &FacialMetrics, gender: Gender) -> f64 {
    let mut score = BASE_SCORE;

    // Symmetry, 0-20. An undefined symmetry contributes nothing.
    if !metrics.symmetry_score.is_nan() {
        score += metrics.symmetry_score / 100.0 * SYMMETRY_WEIGHT;
    }

    // Proportions, up to 15
    if in_range(metrics.icd_ratio, ICD_IDEAL) {
        score += PROPORTION_BONUS;
    }
    if in_range(metrics.face_width_ratio, FACE_WIDTH_IDEAL) {
        score += PROPORTION_BONUS;
    }
    if (metrics.facial_thirds.upper - IDEAL_THIRD).abs() < THIRDS_TOLERANCE {
        score += PROPORTION_BONUS;
    }

    // Canthal tilt, up to 10
    let (tilt_low, tilt_high) = CANTHAL_IDEAL;
    if metrics.canthal_tilt > tilt_low && metrics.canthal_tilt < tilt_high {
        score += 10.0;
    } else if metrics.canthal_tilt >= 0.0 {
        score += 5.0;
    }

    // Jawline, 5 or 10
    if metrics.jawline_sharpness < jawline_threshold(gender) {
        score += 10.0;
    } else {
        score += 5.0;
    }

    if in_range(metrics.facial_index, FACIAL_INDEX_IDEAL) {
        score += PROPORTION_BONUS;
    }

    score
}

/// Overall harmony score, always an integer in [0, 100].
pub fn overall_score(metrics: &FacialMetrics, gender: Gender) -> u8 {
    raw_score(metrics, gender).clamp(0.0, 100.0).round() as u8
}

/// Templated natural-language summary selected by score band.
pub fn harmony_summary(score: u8, metrics: &FacialMetrics) -> String {
    let symmetry = if metrics.symmetry_score >= 90.0 {
        "excellent facial symmetry"
    } else if metrics.symmetry_score >= 80.0 {
        "good facial symmetry"
    } else {
        "moderate facial symmetry"
    };
    let proportion = if in_range(metrics.facial_index, FACIAL_INDEX_IDEAL) {
        "well-balanced facial proportions"
    } else {
        "unique facial proportions"
    };
    let canthal = if metrics.canthal_tilt > CANTHAL_NEUTRAL {
        "positive canthal tilt"
    } else if metrics.canthal_tilt < -CANTHAL_NEUTRAL {
        "neutral eye positioning"
    } else {
        "balanced eye shape"
    };

    match score {
        80..=u8::MAX => format!(
            "Outstanding facial harmony with {symmetry}, {proportion}, and {canthal}. \
             Features are well-balanced and aesthetically pleasing."
        ),
        65..=79 => format!(
            "Above-average attractiveness with {symmetry} and {proportion}. \
             Several features align with aesthetic ideals."
        ),
        50..=64 => format!(
            "Average facial characteristics with {symmetry}. \
             Features show natural variation within normal ranges."
        ),
        _ => format!(
            "Unique facial features with {proportion}. Remember that attractiveness is \
             subjective and these are just mathematical approximations."
        ),
    }
}

/// Score and summary in one call.
pub fn score(metrics: &FacialMetrics, gender: Gender) -> HarmonyScore {
    let score = overall_score(metrics, gender);
    HarmonyScore {
        score,
        summary: harmony_summary(score, metrics),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FacialThirds;
    use rstest::rstest;

    fn thirds(upper: f64) -> FacialThirds {
        let rest = (100.0 - upper) / 2.0;
        FacialThirds {
            upper,
            mid: rest,
            lower: rest,
        }
    }

    #[test]
    fn ideal_face_is_clamped_to_hundred() {
        let m = FacialMetrics {
            symmetry_score: 95.0,
            icd_ratio: 0.5,
            face_width_ratio: 3.0,
            facial_thirds: thirds(33.3),
            canthal_tilt: 5.0,
            jawline_sharpness: 120.0,
            facial_index: 1.0,
            ..Default::default()
        };
        assert!((raw_score(&m, Gender::Male) - 104.0).abs() < 1e-9);
        assert_eq!(overall_score(&m, Gender::Male), 100);
    }

    #[test]
    fn minimal_face() {
        let m = FacialMetrics {
            symmetry_score: 0.0,
            canthal_tilt: -5.0,
            jawline_sharpness: 170.0,
            facial_thirds: thirds(50.0),
            ..Default::default()
        };
        // base + jawline fallback
        assert_eq!(overall_score(&m, Gender::Female), 55);
    }

    #[rstest]
    #[case::ideal_band(5.0, 10.0)]
    #[case::lower_edge_excluded(2.0, 5.0)]
    #[case::upper_edge_excluded(10.0, 5.0)]
    #[case::neutral(0.0, 5.0)]
    #[case::negative(-0.1, 0.0)]
    fn canthal_bonus(#[case] canthal_tilt: f64, #[case] bonus: f64) {
        let base = FacialMetrics {
            canthal_tilt: -100.0,
            jawline_sharpness: 200.0,
            facial_thirds: thirds(80.0),
            ..Default::default()
        };
        let m = FacialMetrics {
            canthal_tilt,
            ..base
        };
        let delta = raw_score(&m, Gender::Male) - raw_score(&base, Gender::Male);
        assert!((delta - bonus).abs() < 1e-9);
    }

    #[derive(Debug, Clone, Copy)]
    enum Field {
        Icd,
        FaceWidth,
        FacialIndex,
        UpperThird,
    }

    #[rstest]
    #[case::icd_lower_edge(Field::Icd, 0.45, 5.0)]
    #[case::icd_upper_edge(Field::Icd, 0.55, 5.0)]
    #[case::icd_just_below(Field::Icd, 0.449, 0.0)]
    #[case::icd_just_above(Field::Icd, 0.551, 0.0)]
    #[case::face_width_lower_edge(Field::FaceWidth, 2.8, 5.0)]
    #[case::face_width_upper_edge(Field::FaceWidth, 3.2, 5.0)]
    #[case::face_width_just_below(Field::FaceWidth, 2.79, 0.0)]
    #[case::face_width_just_above(Field::FaceWidth, 3.21, 0.0)]
    #[case::facial_index_lower_edge(Field::FacialIndex, 1.2, 5.0)]
    #[case::facial_index_upper_edge(Field::FacialIndex, 1.4, 5.0)]
    #[case::facial_index_just_below(Field::FacialIndex, 1.19, 0.0)]
    #[case::facial_index_just_above(Field::FacialIndex, 1.41, 0.0)]
    #[case::upper_third_ideal(Field::UpperThird, 33.3, 5.0)]
    #[case::upper_third_inside(Field::UpperThird, 36.2, 5.0)]
    #[case::upper_third_edge_excluded(Field::UpperThird, 36.3, 0.0)]
    fn proportion_band_edges(#[case] field: Field, #[case] v: f64, #[case] bonus: f64) {
        let base = FacialMetrics {
            canthal_tilt: -100.0,
            jawline_sharpness: 200.0,
            facial_thirds: thirds(80.0),
            ..Default::default()
        };
        let mut m = base;
        match field {
            Field::Icd => m.icd_ratio = v,
            Field::FaceWidth => m.face_width_ratio = v,
            Field::FacialIndex => m.facial_index = v,
            Field::UpperThird => m.facial_thirds = thirds(v),
        }
        let delta = raw_score(&m, Gender::Male) - raw_score(&base, Gender::Male);
        assert!((delta - bonus).abs() < 1e-9, "{field:?} = {v}: delta {delta}");
    }

    #[test]
    fn jawline_threshold_depends_on_gender() {
        let m = FacialMetrics {
            jawline_sharpness: 130.0,
            ..Default::default()
        };
        let male = raw_score(&m, Gender::Male);
        let female = raw_score(&m, Gender::Female);
        assert!((female - male - 5.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    #[case(f64::NAN)]
    #[case(1e300)]
    #[case(-1e300)]
    fn adversarial_values_stay_in_range(#[case] v: f64) {
        let m = FacialMetrics {
            ipd: v,
            icd_ratio: v,
            face_width_ratio: v,
            symmetry_score: v,
            canthal_tilt: v,
            jawline_sharpness: v,
            facial_thirds: FacialThirds {
                upper: v,
                mid: v,
                lower: v,
            },
            facial_index: v,
            ..Default::default()
        };
        for gender in [Gender::Male, Gender::Female] {
            assert!(overall_score(&m, gender) <= 100);
        }
    }

    #[rstest]
    #[case(100, "Outstanding facial harmony with excellent facial symmetry")]
    #[case(80, "Outstanding facial harmony")]
    #[case(79, "Above-average attractiveness with excellent facial symmetry and well-balanced")]
    #[case(65, "Above-average attractiveness")]
    #[case(64, "Average facial characteristics with excellent facial symmetry.")]
    #[case(50, "Average facial characteristics")]
    #[case(49, "Unique facial features with well-balanced facial proportions.")]
    fn summary_bands(#[case] score: u8, #[case] prefix: &str) {
        let m = FacialMetrics {
            symmetry_score: 92.0,
            facial_index: 1.3,
            canthal_tilt: 4.0,
            ..Default::default()
        };
        let summary = harmony_summary(score, &m);
        assert!(summary.starts_with(prefix), "{summary}");
    }

    #[test]
    fn summary_phrases() {
        let m = FacialMetrics {
            symmetry_score: 85.0,
            facial_index: 1.6,
            canthal_tilt: -3.0,
            ..Default::default()
        };
        assert_eq!(
            harmony_summary(90, &m),
            "Outstanding facial harmony with good facial symmetry, unique facial proportions, \
             and neutral eye positioning. Features are well-balanced and aesthetically pleasing."
        );
    }
}
