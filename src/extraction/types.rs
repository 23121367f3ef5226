//! Types produced by free-text extraction and smart action derivation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::flow::Priority;

// ═══════════════════════════════════════════
// Intensity hint (text heuristic)
// ═══════════════════════════════════════════

/// Severity inferred from intensity words in free text.
///
/// Advisory only. Not the clinician-reported `Severity` of a `PatientContext`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityHint {
    Leve,
    Moderado,
    Severo,
}

impl IntensityHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leve => "leve",
            Self::Moderado => "moderado",
            Self::Severo => "severo",
        }
    }
}

// ═══════════════════════════════════════════
// Extracted data
// ═══════════════════════════════════════════

/// Structured partial record parsed from transcript + analysis text.
/// Every field is optional for downstream consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    pub symptoms: BTreeSet<String>,
    /// In order of appearance; repeated mentions are kept.
    pub medications: Vec<String>,
    /// e.g. "3 días"
    pub duration: Option<String>,
    pub pain_location: Option<String>,
    /// "SYS/DIA"
    pub blood_pressure: Option<String>,
    /// Beats per minute.
    pub heart_rate: Option<u32>,
    /// Degrees Celsius.
    pub temperature: Option<f32>,
    pub severity: Option<IntensityHint>,
}

impl ExtractedData {
    /// Nothing recognisable was found.
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
            && self.medications.is_empty()
            && self.duration.is_none()
            && self.pain_location.is_none()
            && self.blood_pressure.is_none()
            && self.heart_rate.is_none()
            && self.temperature.is_none()
    }

    /// Medications with repeated mentions collapsed, first occurrence order.
    pub fn unique_medications(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for med in &self.medications {
            if !seen.contains(med) {
                seen.push(med.clone());
            }
        }
        seen
    }

    pub fn mentions_pain(&self) -> bool {
        self.symptoms.iter().any(|s| s.contains("dolor"))
    }
}

/// A parsed blood pressure reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
}

// ═══════════════════════════════════════════
// Smart actions
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AutoFill,
    Suggest,
    Validate,
    Optimize,
}

/// Numeric pain scale bounds shown by the pain assessment section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainScale {
    pub min: u8,
    pub max: u8,
}

impl PainScale {
    pub const ONE_TO_TEN: PainScale = PainScale { min: 1, max: 10 };
}

/// Action target and its typed payload.
///
/// Serialized as `{"target": "...", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", content = "data", rename_all = "snake_case")]
pub enum ActionPayload {
    Symptoms(Vec<String>),
    Medications(Vec<String>),
    GeriatricAssessment {
        priority: Priority,
        recommended: bool,
    },
    PainAssessment {
        scale: PainScale,
        location: Option<String>,
    },
    BloodPressure {
        reading: String,
        #[serde(rename = "isNormal")]
        is_normal: bool,
    },
    HeartRate {
        bpm: u32,
        #[serde(rename = "isNormal")]
        is_normal: bool,
    },
    Temperature {
        celsius: f32,
        #[serde(rename = "isNormal")]
        is_normal: bool,
    },
}

impl ActionPayload {
    /// Field or section this payload applies to.
    pub fn target(&self) -> &'static str {
        match self {
            Self::Symptoms(_) => "symptoms",
            Self::Medications(_) => "medications",
            Self::GeriatricAssessment { .. } => "geriatric_assessment",
            Self::PainAssessment { .. } => "pain_assessment",
            Self::BloodPressure { .. } => "blood_pressure",
            Self::HeartRate { .. } => "heart_rate",
            Self::Temperature { .. } => "temperature",
        }
    }
}

/// A system-suggested change to the in-progress form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(flatten)]
    pub payload: ActionPayload,
    /// 0.0-1.0
    pub confidence: f32,
}

impl SmartAction {
    pub fn target(&self) -> &'static str {
        self.payload.target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smart_action_serializes_flat() {
        let action = SmartAction {
            kind: ActionKind::Validate,
            payload: ActionPayload::BloodPressure {
                reading: "140/85".into(),
                is_normal: true,
            },
            confidence: 0.88,
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "validate");
        assert_eq!(value["target"], "blood_pressure");
        assert_eq!(value["data"]["reading"], "140/85");
        assert_eq!(value["data"]["isNormal"], true);
    }

    #[test]
    fn auto_fill_payload_is_plain_list() {
        let action = SmartAction {
            kind: ActionKind::AutoFill,
            payload: ActionPayload::Symptoms(vec!["fiebre".into(), "tos".into()]),
            confidence: 0.85,
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "auto_fill");
        assert_eq!(value["target"], "symptoms");
        assert_eq!(value["data"], serde_json::json!(["fiebre", "tos"]));
        assert_eq!(action.target(), "symptoms");
    }

    #[test]
    fn empty_extraction_reports_empty() {
        assert!(ExtractedData::default().is_empty());
        let data = ExtractedData {
            duration: Some("2 semanas".into()),
            ..Default::default()
        };
        assert!(!data.is_empty());
    }

    #[test]
    fn unique_medications_keeps_first_occurrence_order() {
        let data = ExtractedData {
            medications: vec![
                "ibuprofeno".into(),
                "paracetamol".into(),
                "ibuprofeno".into(),
            ],
            ..Default::default()
        };
        assert_eq!(data.unique_medications(), vec!["ibuprofeno", "paracetamol"]);
    }

    #[test]
    fn intensity_hint_is_lowercase_on_the_wire() {
        assert_eq!(serde_json::to_string(&IntensityHint::Severo).unwrap(), "\"severo\"");
        assert_eq!(IntensityHint::Moderado.as_str(), "moderado");
    }
}
