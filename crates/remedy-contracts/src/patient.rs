//! Patient vitals for the hypertension risk pipeline.
//!
//! A `PatientForm` is what a caller collects: numeric fields default to 0 and
//! categorical fields to `None`, both meaning "not filled in". `validate()`
//! turns a complete form into `PatientVitals`, the only type the risk model
//! accepts.

use serde::{Deserialize, Serialize};

use crate::error::{RemedyError, RemedyResult};

/// Feature names, in the order the risk model was fitted with.
pub const RISK_FEATURES: [&str; 11] = [
    "gender",
    "height",
    "weight",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
    "age_years",
];

pub const MAX_AGE_YEARS: u32 = 120;
pub const MAX_HEIGHT_CM: u32 = 220;
pub const MAX_WEIGHT_KG: u32 = 200;
pub const MAX_SYSTOLIC: u32 = 250;
pub const MAX_DIASTOLIC: u32 = 200;

/// Systolic reading at or above which blood pressure counts as hypertensive.
pub const SYSTOLIC_THRESHOLD: u32 = 140;
/// Diastolic reading at or above which blood pressure counts as hypertensive.
pub const DIASTOLIC_THRESHOLD: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn code(self) -> f64 {
        match self {
            Gender::Female => 1.0,
            Gender::Male => 2.0,
        }
    }
}

/// Three-step category used for both cholesterol and glucose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    /// Cholesterol < 200 mg/dL, glucose < 100 mg/dL.
    Normal,
    /// Cholesterol 200–239 mg/dL, glucose 100–125 mg/dL.
    AboveNormal,
    /// Cholesterol ≥ 240 mg/dL, glucose ≥ 126 mg/dL.
    WellAboveNormal,
}

impl Level {
    pub fn code(self) -> f64 {
        match self {
            Level::Normal => 1.0,
            Level::AboveNormal => 2.0,
            Level::WellAboveNormal => 3.0,
        }
    }
}

/// Raw patient entry as collected from a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientForm {
    #[serde(default)]
    pub age_years: u32,
    #[serde(default)]
    pub height_cm: u32,
    #[serde(default)]
    pub weight_kg: u32,
    #[serde(default)]
    pub systolic: u32,
    #[serde(default)]
    pub diastolic: u32,
    pub gender: Option<Gender>,
    pub cholesterol: Option<Level>,
    pub glucose: Option<Level>,
    pub smoker: Option<bool>,
    pub alcohol: Option<bool>,
    pub active: Option<bool>,
}

impl PatientForm {
    /// Check the form and produce validated vitals.
    ///
    /// - any zero numeric field or unselected category → `InsufficientInput`
    /// - a value beyond the entry form's range → `InvalidInput`
    /// - diastolic not below systolic → `InvalidInput`
    pub fn validate(&self) -> RemedyResult<PatientVitals> {
        let numeric_missing = [
            self.age_years,
            self.height_cm,
            self.weight_kg,
            self.systolic,
            self.diastolic,
        ]
        .contains(&0);

        let (gender, cholesterol, glucose, smoker, alcohol, active) = match (
            self.gender,
            self.cholesterol,
            self.glucose,
            self.smoker,
            self.alcohol,
            self.active,
        ) {
            (Some(g), Some(c), Some(gl), Some(s), Some(al), Some(ac)) if !numeric_missing => {
                (g, c, gl, s, al, ac)
            }
            _ => {
                return Err(RemedyError::insufficient_input(
                    "Please fill in all fields correctly",
                ));
            }
        };

        let limits = [
            ("age", self.age_years, MAX_AGE_YEARS),
            ("height", self.height_cm, MAX_HEIGHT_CM),
            ("weight", self.weight_kg, MAX_WEIGHT_KG),
            ("systolic blood pressure", self.systolic, MAX_SYSTOLIC),
            ("diastolic blood pressure", self.diastolic, MAX_DIASTOLIC),
        ];
        for (field, value, max) in limits {
            if value > max {
                return Err(RemedyError::invalid_input(format!(
                    "{field} must not exceed {max} (got {value})"
                )));
            }
        }

        if self.diastolic >= self.systolic {
            return Err(RemedyError::invalid_input(
                "Diastolic BP should be lower than Systolic BP",
            ));
        }

        Ok(PatientVitals {
            gender,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            systolic: self.systolic,
            diastolic: self.diastolic,
            cholesterol,
            glucose,
            smoker,
            alcohol,
            active,
            age_years: self.age_years,
        })
    }
}

/// A complete, range-checked set of patient vitals.
///
/// Only obtainable through `PatientForm::validate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientVitals {
    gender: Gender,
    height_cm: u32,
    weight_kg: u32,
    systolic: u32,
    diastolic: u32,
    cholesterol: Level,
    glucose: Level,
    smoker: bool,
    alcohol: bool,
    active: bool,
    age_years: u32,
}

impl PatientVitals {
    /// Encode the vitals in `RISK_FEATURES` order.
    pub fn features(&self) -> RiskFeatures {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        RiskFeatures([
            self.gender.code(),
            f64::from(self.height_cm),
            f64::from(self.weight_kg),
            f64::from(self.systolic),
            f64::from(self.diastolic),
            self.cholesterol.code(),
            self.glucose.code(),
            flag(self.smoker),
            flag(self.alcohol),
            flag(self.active),
            f64::from(self.age_years),
        ])
    }

    /// True when the blood pressure reading alone meets the hypertension
    /// cut-off (systolic ≥ 140 or diastolic ≥ 90).
    pub fn meets_hypertension_threshold(&self) -> bool {
        self.systolic >= SYSTOLIC_THRESHOLD || self.diastolic >= DIASTOLIC_THRESHOLD
    }

    pub fn systolic(&self) -> u32 {
        self.systolic
    }

    pub fn diastolic(&self) -> u32 {
        self.diastolic
    }
}

/// Unscaled model input, in `RISK_FEATURES` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskFeatures(pub [f64; 11]);

impl RiskFeatures {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Whole years from a day count, as the risk model's training data was prepared.
pub fn age_years_from_days(days: u32) -> u32 {
    days / 365
}
