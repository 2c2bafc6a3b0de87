//! # Body Mass Index
//!
//! BMI = weight (kg) / height (m)². Imperial input is converted to metric
//! first (1 lb = 0.45359237 kg, 1 in = 2.54 cm).
//!
//! | Category    | BMI             |
//! |-------------|-----------------|
//! | Underweight | below 18.5      |
//! | Normal      | 18.5 to < 25    |
//! | Overweight  | 25 to < 30      |
//! | Obese       | 30 and above    |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

const KG_PER_LB: f64 = 0.45359237;
const CM_PER_IN: f64 = 2.54;

/// Lower bound of the healthy BMI band
pub const HEALTHY_BMI_MIN: f64 = 18.5;
/// Upper bound of the healthy BMI band used for the weight range
pub const HEALTHY_BMI_MAX: f64 = 24.9;

/// Body measurements in either unit system.
///
/// ## JSON Examples
///
/// ```json
/// { "system": "metric", "weight_kg": 70, "height_cm": 175 }
/// { "system": "imperial", "weight_lb": 154, "height_ft": 5, "height_in": 9 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "snake_case")]
pub enum BmiInput {
    Metric {
        weight_kg: f64,
        height_cm: f64,
    },
    Imperial {
        weight_lb: f64,
        height_ft: f64,
        #[serde(default)]
        height_in: f64,
    },
}

impl BmiInput {
    /// Weight in kilograms and height in metres.
    pub fn to_metric(&self) -> (f64, f64) {
        match *self {
            BmiInput::Metric { weight_kg, height_cm } => (weight_kg, height_cm / 100.0),
            BmiInput::Imperial { weight_lb, height_ft, height_in } => {
                let inches = height_ft * 12.0 + height_in;
                (weight_lb * KG_PER_LB, inches * CM_PER_IN / 100.0)
            }
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        let fields: Vec<(&str, f64)> = match *self {
            BmiInput::Metric { weight_kg, height_cm } => vec![("weight_kg", weight_kg), ("height_cm", height_cm)],
            BmiInput::Imperial { weight_lb, height_ft, height_in } => {
                if height_in < 0.0 {
                    return Err(CalcError::invalid_input(
                        "height_in",
                        height_in.to_string(),
                        "Inches cannot be negative",
                    ));
                }
                vec![("weight_lb", weight_lb), ("height", height_ft * 12.0 + height_in)]
            }
        };
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be greater than zero"));
            }
        }
        Ok(())
    }
}

/// Weight status category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Category for a BMI value
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// Results from the BMI calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    pub weight_kg: f64,
    pub height_m: f64,
    /// Lightest healthy weight for this height (kg)
    pub healthy_min_kg: f64,
    /// Heaviest healthy weight for this height (kg)
    pub healthy_max_kg: f64,
}

/// Calculate BMI and category.
pub fn calculate(input: &BmiInput) -> CalcResult<BmiResult> {
    input.validate()?;
    let (weight_kg, height_m) = input.to_metric();
    let height_sq = height_m * height_m;
    let bmi = weight_kg / height_sq;
    debug!(bmi, "body mass index");

    Ok(BmiResult {
        bmi,
        category: BmiCategory::from_bmi(bmi),
        weight_kg,
        height_m,
        healthy_min_kg: HEALTHY_BMI_MIN * height_sq,
        healthy_max_kg: HEALTHY_BMI_MAX * height_sq,
    })
}
