//! Human-readable interpretation of [`FacialMetrics`].
//!
//! All reference bands, feedback strings and confidence tiers live in
//! [`METRIC_RULES`], one row per displayed metric, so thresholds can be
//! reviewed and tested without touching the formatting code.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::metrics::FacialMetrics;

/// Declared gender category; selects the anatomical expectation for
/// jaw-related feedback and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(Error::UnknownGender(s.to_string())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
        })
    }
}

/// How anatomically reliable a 2D-landmark proxy is for a measurement.
/// Fixed per metric, never computed from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretedMetric {
    pub name: String,
    pub value: String,
    pub feedback: String,
    pub confidence: Confidence,
}

/// Which field of [`FacialMetrics`] a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Ipd,
    IcdRatio,
    FaceWidthRatio,
    FaceHeightRatio,
    Symmetry,
    CanthalTilt,
    BrowEyeDistance,
    NasalWidth,
    NasalLength,
    MouthWidth,
    LipRatio,
    JawWidthRatio,
    ChinHeight,
    ChinWidth,
    ChinProjection,
    JawlineSharpness,
    GonialAngle,
    RamusHeight,
    FacialThirds,
    FacialIndex,
}

/// Ideal percentage for each facial third.
pub const IDEAL_THIRD: f64 = 33.3;

/// Largest deviation from [`IDEAL_THIRD`] still read as balanced (exclusive).
pub const THIRDS_TOLERANCE: f64 = 3.0;

/// Inclusive ideal band for the intercanthal ratio.
pub const ICD_IDEAL: (f64, f64) = (0.45, 0.55);

/// Inclusive ideal band for the face width ratio.
pub const FACE_WIDTH_IDEAL: (f64, f64) = (2.8, 3.2);

/// Inclusive mesocephalic band for the facial index.
pub const FACIAL_INDEX_IDEAL: (f64, f64) = (1.2, 1.4);

/// Canthal tilts within ±this many degrees are neutral.
pub const CANTHAL_NEUTRAL: f64 = 2.0;

impl MetricKind {
    /// Scalar used for classification. Facial thirds classify on the largest
    /// deviation of any third from [`IDEAL_THIRD`] (NaN if any third is NaN).
    pub fn value(&self, m: &FacialMetrics) -> f64 {
        match self {
            MetricKind::Ipd => m.ipd,
            MetricKind::IcdRatio => m.icd_ratio,
            MetricKind::FaceWidthRatio => m.face_width_ratio,
            MetricKind::FaceHeightRatio => m.face_height_ratio,
            MetricKind::Symmetry => m.symmetry_score,
            MetricKind::CanthalTilt => m.canthal_tilt,
            MetricKind::BrowEyeDistance => m.brow_eye_distance,
            MetricKind::NasalWidth => m.nasal_width,
            MetricKind::NasalLength => m.nasal_length,
            MetricKind::MouthWidth => m.mouth_width,
            MetricKind::LipRatio => m.lip_ratio,
            MetricKind::JawWidthRatio => m.bizygomatic_bigonial_ratio,
            MetricKind::ChinHeight => m.chin_height,
            MetricKind::ChinWidth => m.chin_width,
            MetricKind::ChinProjection => m.chin_projection,
            MetricKind::JawlineSharpness => m.jawline_sharpness,
            MetricKind::GonialAngle => m.gonial_angle,
            MetricKind::RamusHeight => m.ramus_height,
            MetricKind::FacialThirds => {
                let t = m.facial_thirds;
                [t.upper, t.mid, t.lower]
                    .iter()
                    .map(|v| (v - IDEAL_THIRD).abs())
                    .fold(0.0, |acc, d| if d.is_nan() || d > acc { d } else { acc })
            }
            MetricKind::FacialIndex => m.facial_index,
        }
    }
}

/// Display form of a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One decimal with a `px` suffix
    Pixels,
    /// Two decimals
    Ratio,
    /// One decimal with a `%` suffix
    Percent,
    /// One decimal with a `°` suffix
    Degrees,
    /// `upper% / mid% / lower%`, no decimals
    Thirds,
}

impl Format {
    pub fn render(&self, kind: MetricKind, m: &FacialMetrics) -> String {
        match self {
            Format::Pixels => format!("{}px", to_fixed(kind.value(m), 1)),
            Format::Ratio => to_fixed(kind.value(m), 2),
            Format::Percent => format!("{}%", to_fixed(kind.value(m), 1)),
            Format::Degrees => format!("{}°", to_fixed(kind.value(m), 1)),
            Format::Thirds => {
                let t = m.facial_thirds;
                format!(
                    "{}% / {}% / {}%",
                    to_fixed(t.upper, 0),
                    to_fixed(t.mid, 0),
                    to_fixed(t.lower, 0)
                )
            }
        }
    }
}

/// Fixed-point rendering with `digits` decimals.
///
/// Values exactly halfway between two outputs round away from zero
/// (`64.25` gives `"64.3"`, `0.5` gives `"1"`), where `{:.N}` alone would
/// round to even. NaN renders as `"NaN"`.
pub fn to_fixed(v: f64, digits: usize) -> String {
    // An exact tie is an odd multiple of 2^-(digits + 1).
    let scaled = v * 2f64.powi(digits as i32 + 1);
    let is_tie = scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 != 0.0;
    // Stepping one ulp outward breaks the tie; the bit pattern is sign-magnitude.
    let v = if is_tie {
        f64::from_bits(v.to_bits() + 1)
    } else {
        v
    };
    format!("{:.*}", digits, v)
}

/// A reference band mapping a value to a feedback string.
///
/// Comparisons involving NaN are false, so NaN always lands on the
/// fall-through text (`outside`, `otherwise`, or `between`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    /// Same feedback regardless of value
    Fixed(&'static str),
    /// `inside` when `low <= v <= high`
    Range {
        low: f64,
        high: f64,
        inside: &'static str,
        outside: &'static str,
    },
    /// First tier with `v >= limit`, checked in order
    AtLeast {
        tiers: &'static [(f64, &'static str)],
        otherwise: &'static str,
    },
    /// First tier with `v <= limit`, checked in order
    AtMost {
        tiers: &'static [(f64, &'static str)],
        otherwise: &'static str,
    },
    /// First tier with `v < limit`, checked in order
    Below {
        tiers: &'static [(f64, &'static str)],
        otherwise: &'static str,
    },
    /// `below` when `v < low`, `above` when `v > high`, else `between`
    Split {
        low: f64,
        high: f64,
        below: &'static str,
        above: &'static str,
        between: &'static str,
    },
    /// Gender-conditioned band
    ByGender {
        male: &'static Band,
        female: &'static Band,
    },
}

impl Band {
    pub fn classify(&self, v: f64, gender: Gender) -> &'static str {
        match *self {
            Band::Fixed(text) => text,
            Band::Range {
                low,
                high,
                inside,
                outside,
            } => {
                if v >= low && v <= high {
                    inside
                } else {
                    outside
                }
            }
            Band::AtLeast { tiers, otherwise } => first_tier(tiers, otherwise, |limit| v >= limit),
            Band::AtMost { tiers, otherwise } => first_tier(tiers, otherwise, |limit| v <= limit),
            Band::Below { tiers, otherwise } => first_tier(tiers, otherwise, |limit| v < limit),
            Band::Split {
                low,
                high,
                below,
                above,
                between,
            } => {
                if v < low {
                    below
                } else if v > high {
                    above
                } else {
                    between
                }
            }
            Band::ByGender { male, female } => match gender {
                Gender::Male => male.classify(v, gender),
                Gender::Female => female.classify(v, gender),
            },
        }
    }
}

fn first_tier(
    tiers: &'static [(f64, &'static str)],
    otherwise: &'static str,
    hit: impl Fn(f64) -> bool,
) -> &'static str {
    tiers
        .iter()
        .find(|&&(limit, _)| hit(limit))
        .map_or(otherwise, |&(_, text)| text)
}

/// One row of the interpretation table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRule {
    pub kind: MetricKind,
    pub name: &'static str,
    pub format: Format,
    pub band: Band,
    pub confidence: Confidence,
}

impl MetricRule {
    pub fn apply(&self, metrics: &FacialMetrics, gender: Gender) -> InterpretedMetric {
        InterpretedMetric {
            name: self.name.to_string(),
            value: self.format.render(self.kind, metrics),
            feedback: self
                .band
                .classify(self.kind.value(metrics), gender)
                .to_string(),
            confidence: self.confidence,
        }
    }
}

const JAW_WIDTH_MALE: Band = Band::AtLeast {
    tiers: &[(1.2, "Strong, angular jaw")],
    otherwise: "Softer jaw definition",
};
const JAW_WIDTH_FEMALE: Band = Band::AtLeast {
    tiers: &[(1.15, "Well-defined jaw")],
    otherwise: "Softer jaw contour",
};
const RAMUS_MALE: Band = Band::AtLeast {
    tiers: &[(1.0, "Long ramus (masculine)")],
    otherwise: "Average ramus length",
};
const RAMUS_FEMALE: Band = Band::Fixed("Proportional ramus length");

/// Display order, reference bands and confidence of every interpreted metric.
pub static METRIC_RULES: [MetricRule; 20] = [
    MetricRule {
        kind: MetricKind::Ipd,
        name: "IPD (Normalization Unit)",
        format: Format::Pixels,
        band: Band::Fixed("Used as scale reference for all measurements"),
        confidence: Confidence::High,
    },
    MetricRule {
        kind: MetricKind::IcdRatio,
        name: "Intercanthal Ratio",
        format: Format::Ratio,
        band: Band::Range {
            low: ICD_IDEAL.0,
            high: ICD_IDEAL.1,
            inside: "Ideal spacing",
            outside: "Slightly wider/narrower than ideal",
        },
        confidence: Confidence::High,
    },
    MetricRule {
        kind: MetricKind::FaceWidthRatio,
        name: "Face Width Ratio",
        format: Format::Ratio,
        band: Band::Range {
            low: FACE_WIDTH_IDEAL.0,
            high: FACE_WIDTH_IDEAL.1,
            inside: "Well-proportioned",
            outside: "Narrower/wider than average",
        },
        confidence: Confidence::Medium,
    },
    MetricRule {
        kind: MetricKind::FaceHeightRatio,
        name: "Face Height Ratio",
        format: Format::Ratio,
        band: Band::Range {
            low: 3.5,
            high: 4.0,
            inside: "Balanced proportions",
            outside: "Longer/shorter than typical",
        },
        confidence: Confidence::Medium,
    },
    MetricRule {
        kind: MetricKind::Symmetry,
        name: "Facial Symmetry",
        format: Format::Percent,
        band: Band::AtLeast {
            tiers: &[(90.0, "Excellent symmetry"), (80.0, "Good symmetry")],
            otherwise: "Some asymmetry detected",
        },
        confidence: Confidence::High,
    },
    MetricRule {
        kind: MetricKind::CanthalTilt,
        name: "Canthal Tilt",
        format: Format::Degrees,
        band: Band::Split {
            low: -CANTHAL_NEUTRAL,
            high: CANTHAL_NEUTRAL,
            below: "Negative tilt",
            above: "Positive tilt (hunter eyes)",
            between: "Neutral tilt",
        },
        confidence: Confidence::High,
    },
    MetricRule {
        kind: MetricKind::BrowEyeDistance,
        name: "Brow-Eye Distance",
        format: Format::Ratio,
        band: Band::Range {
            low: 0.5,
            high: 0.7,
            inside: "Ideal spacing",
            outside: "Closer/farther than typical",
        },
        confidence: Confidence::Medium,
    },
    MetricRule {
        kind: MetricKind::NasalWidth,
        name: "Nasal Width",
        format: Format::Ratio,
        band: Band::AtMost {
            tiers: &[(0.45, "Narrow nose"), (0.55, "Average width")],
            otherwise: "Wide nose",
        },
        confidence: Confidence::Medium,
    },
    MetricRule {
        kind: MetricKind::NasalLength,
        name: "Nasal Length",
        format: Format::Ratio,
        band: Band::Fixed("Proportional to facial height"),
        confidence: Confidence::Medium,
    },
    MetricRule {
        kind: MetricKind::MouthWidth,
        name: "Mouth Width",
        format: Format::Ratio,
        band: Band::Range {
            low: 0.9,
            high: 1.1,
            inside: "Balanced width",
            outside: "Narrower/wider than typical",
        },
        confidence: Confidence::High,
    },
    MetricRule {
        kind: MetricKind::LipRatio,
        name: "Lip Ratio (Upper/Lower)",
        format: Format::Ratio,
        band: Band::Range {
            low: 0.45,
            high: 0.55,
            inside: "Ideal lip proportion",
            outside: "Upper/lower lip imbalance",
        },
        confidence: Confidence::Medium,
    },
    MetricRule {
        kind: MetricKind::JawWidthRatio,
        name: "Jaw Width Ratio",
        format: Format::Ratio,
        band: Band::ByGender {
            male: &JAW_WIDTH_MALE,
            female: &JAW_WIDTH_FEMALE,
        },
        confidence: Confidence::Medium,
    },
    MetricRule {
        kind: MetricKind::ChinHeight,
        name: "Chin Height",
        format: Format::Ratio,
        band: Band::Fixed("Balanced lower third proportion"),
        confidence: Confidence::Medium,
    },
    MetricRule {
        kind: MetricKind::ChinWidth,
        name: "Chin Width",
        format: Format::Ratio,
        band: Band::Fixed("Proportional to jaw width"),
        confidence: Confidence::Low,
    },
    MetricRule {
        kind: MetricKind::ChinProjection,
        name: "Chin Projection",
        format: Format::Ratio,
        band: Band::Below {
            tiers: &[(0.1, "Strong forward projection")],
            otherwise: "Adequate projection",
        },
        confidence: Confidence::Low,
    },
    MetricRule {
        kind: MetricKind::JawlineSharpness,
        name: "Jawline Sharpness",
        format: Format::Degrees,
        band: Band::Below {
            tiers: &[(130.0, "Sharp, defined jawline")],
            otherwise: "Softer jawline angle",
        },
        confidence: Confidence::Low,
    },
    MetricRule {
        kind: MetricKind::GonialAngle,
        name: "Gonial Angle (Approx)",
        format: Format::Degrees,
        band: Band::Range {
            low: 110.0,
            high: 130.0,
            inside: "Ideal jaw angle",
            outside: "Wider/sharper than typical",
        },
        confidence: Confidence::Low,
    },
    MetricRule {
        kind: MetricKind::RamusHeight,
        name: "Ramus Height (Approx)",
        format: Format::Ratio,
        band: Band::ByGender {
            male: &RAMUS_MALE,
            female: &RAMUS_FEMALE,
        },
        confidence: Confidence::Low,
    },
    MetricRule {
        kind: MetricKind::FacialThirds,
        name: "Facial Thirds",
        format: Format::Thirds,
        band: Band::Below {
            tiers: &[(THIRDS_TOLERANCE, "Perfectly balanced thirds")],
            otherwise: "Some variation from ideal thirds",
        },
        confidence: Confidence::High,
    },
    MetricRule {
        kind: MetricKind::FacialIndex,
        name: "Facial Index",
        format: Format::Ratio,
        band: Band::Split {
            low: FACIAL_INDEX_IDEAL.0,
            high: FACIAL_INDEX_IDEAL.1,
            below: "Wide face (brachycephalic)",
            above: "Long face (dolichocephalic)",
            between: "Average facial proportion (mesocephalic)",
        },
        confidence: Confidence::High,
    },
];

/// Interpret every metric in [`METRIC_RULES`] order.
pub fn interpret(metrics: &FacialMetrics, gender: Gender) -> Vec<InterpretedMetric> {
    METRIC_RULES
        .iter()
        .map(|rule| rule.apply(metrics, gender))
        .collect()
}
