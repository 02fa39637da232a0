use serde::{Deserialize, Serialize};

use super::domain::DiseaseType;
use super::gateway::PredictionFlag;

/// Ordered risk buckets derived from the predicted probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskTier {
    /// Half-open intervals with inclusive lower bounds. Negative inputs fall
    /// into the first bucket; anything from 0.7 up, including probabilities
    /// above 1, lands in `VeryHigh`. No clamping.
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.2 {
            RiskTier::Low
        } else if probability < 0.4 {
            RiskTier::Moderate
        } else if probability < 0.7 {
            RiskTier::High
        } else {
            RiskTier::VeryHigh
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
            RiskTier::VeryHigh => "Very High",
        }
    }
}

/// Risk summary handed to the display layer. Derived per screening attempt
/// and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub is_positive: bool,
    pub narrative: String,
}

/// Classify one prediction into a tier, a positivity verdict, and the
/// patient-facing narrative for the disease. Deterministic, no locale
/// handling; calling it twice with the same inputs yields identical values.
pub fn classify(disease: DiseaseType, probability: f64, flag: &PredictionFlag) -> RiskAssessment {
    let tier = RiskTier::from_probability(probability);
    RiskAssessment {
        tier,
        is_positive: flag.is_positive(),
        narrative: narrative_for(disease, tier),
    }
}

fn narrative_for(disease: DiseaseType, tier: RiskTier) -> String {
    let name = disease.display_name().to_lowercase();
    match tier {
        RiskTier::Low => format!(
            "Your risk factors for {name} appear to be low based on the information provided."
        ),
        RiskTier::Moderate => {
            format!("You have some risk factors for {name}. Consider discussing with your doctor.")
        }
        RiskTier::High => format!(
            "You have several risk factors for {name}. Consultation with a healthcare provider is recommended."
        ),
        RiskTier::VeryHigh => format!(
            "You have significant risk factors for {name}. Please consult with a healthcare provider soon."
        ),
    }
}
