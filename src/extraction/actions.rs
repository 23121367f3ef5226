//! Smart action derivation.
//!
//! Each rule is evaluated independently against the extracted record and the
//! patient context; several actions may fire for one transcript. Confidence
//! values are fixed per rule, so identical input always yields identical actions.

use tracing::debug;

use super::types::{ActionKind, ActionPayload, ExtractedData, PainScale, SmartAction};
use super::vitals::{is_normal_blood_pressure, is_normal_heart_rate, is_normal_temperature};
use crate::config::Thresholds;
use crate::flow::{PatientContext, Priority};

/// Per-rule confidence.
pub mod confidence {
    pub const SYMPTOMS_AUTO_FILL: f32 = 0.85;
    pub const MEDICATIONS_AUTO_FILL: f32 = 0.90;
    pub const GERIATRIC_SUGGESTION: f32 = 0.95;
    pub const PAIN_SUGGESTION: f32 = 0.80;
    pub const BLOOD_PRESSURE_VALIDATION: f32 = 0.88;
    pub const HEART_RATE_VALIDATION: f32 = 0.85;
    pub const TEMPERATURE_VALIDATION: f32 = 0.85;
}

/// Turn an extracted record into form actions for this patient.
pub fn actions_for(
    context: &PatientContext,
    data: &ExtractedData,
    thresholds: &Thresholds,
) -> Vec<SmartAction> {
    let mut actions = Vec::new();

    if !data.symptoms.is_empty() {
        actions.push(SmartAction {
            kind: ActionKind::AutoFill,
            payload: ActionPayload::Symptoms(data.symptoms.iter().cloned().collect()),
            confidence: confidence::SYMPTOMS_AUTO_FILL,
        });
    }

    if !data.medications.is_empty() {
        actions.push(SmartAction {
            kind: ActionKind::AutoFill,
            payload: ActionPayload::Medications(data.medications.clone()),
            confidence: confidence::MEDICATIONS_AUTO_FILL,
        });
    }

    if context.age > thresholds.geriatric_age {
        actions.push(SmartAction {
            kind: ActionKind::Suggest,
            payload: ActionPayload::GeriatricAssessment {
                priority: Priority::High,
                recommended: true,
            },
            confidence: confidence::GERIATRIC_SUGGESTION,
        });
    }

    if data.mentions_pain() {
        actions.push(SmartAction {
            kind: ActionKind::Suggest,
            payload: ActionPayload::PainAssessment {
                scale: PainScale::ONE_TO_TEN,
                location: data.pain_location.clone(),
            },
            confidence: confidence::PAIN_SUGGESTION,
        });
    }

    if let Some(reading) = &data.blood_pressure {
        actions.push(SmartAction {
            kind: ActionKind::Validate,
            payload: ActionPayload::BloodPressure {
                reading: reading.clone(),
                is_normal: is_normal_blood_pressure(reading),
            },
            confidence: confidence::BLOOD_PRESSURE_VALIDATION,
        });
    }

    if let Some(bpm) = data.heart_rate {
        actions.push(SmartAction {
            kind: ActionKind::Validate,
            payload: ActionPayload::HeartRate {
                bpm,
                is_normal: is_normal_heart_rate(bpm),
            },
            confidence: confidence::HEART_RATE_VALIDATION,
        });
    }

    if let Some(celsius) = data.temperature {
        actions.push(SmartAction {
            kind: ActionKind::Validate,
            payload: ActionPayload::Temperature {
                celsius,
                is_normal: is_normal_temperature(celsius),
            },
            confidence: confidence::TEMPERATURE_VALIDATION,
        });
    }

    debug!(count = actions.len(), "Smart actions derived");
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::TextExtractor;

    fn make_context(age: u32) -> PatientContext {
        PatientContext {
            age,
            ..Default::default()
        }
    }

    fn derive(age: u32, transcript: &str) -> Vec<SmartAction> {
        let data = TextExtractor::default().extract(transcript, "");
        actions_for(&make_context(age), &data, &Thresholds::default())
    }

    fn find<'a>(actions: &'a [SmartAction], target: &str) -> Option<&'a SmartAction> {
        actions.iter().find(|a| a.target() == target)
    }

    #[test]
    fn no_signals_no_actions() {
        assert!(derive(30, "").is_empty());
        assert!(derive(30, "vengo a control").is_empty());
    }

    #[test]
    fn symptoms_and_medications_auto_fill() {
        let actions = derive(30, "fiebre y tos, tomo paracetamol");
        let symptoms = find(&actions, "symptoms").unwrap();
        assert_eq!(symptoms.kind, ActionKind::AutoFill);
        assert_eq!(symptoms.confidence, 0.85);
        assert_eq!(
            symptoms.payload,
            ActionPayload::Symptoms(vec!["fiebre".into(), "tos".into()])
        );

        let meds = find(&actions, "medications").unwrap();
        assert_eq!(meds.kind, ActionKind::AutoFill);
        assert_eq!(meds.confidence, 0.90);
    }

    #[test]
    fn geriatric_suggestion_above_65_only() {
        assert!(find(&derive(65, "tos"), "geriatric_assessment").is_none());
        let actions = derive(66, "tos");
        let geriatric = find(&actions, "geriatric_assessment").unwrap();
        assert_eq!(geriatric.kind, ActionKind::Suggest);
        assert_eq!(geriatric.confidence, 0.95);
        assert_eq!(
            geriatric.payload,
            ActionPayload::GeriatricAssessment {
                priority: Priority::High,
                recommended: true
            }
        );
    }

    #[test]
    fn geriatric_fires_even_without_text() {
        let actions = derive(80, "");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].target(), "geriatric_assessment");
    }

    #[test]
    fn pain_suggestion_carries_scale_and_location() {
        let actions = derive(40, "dolor de espalda desde hace 2 semanas");
        let pain = find(&actions, "pain_assessment").unwrap();
        assert_eq!(pain.kind, ActionKind::Suggest);
        assert_eq!(pain.confidence, 0.80);
        assert_eq!(
            pain.payload,
            ActionPayload::PainAssessment {
                scale: PainScale::ONE_TO_TEN,
                location: Some("espalda".into())
            }
        );
    }

    #[test]
    fn blood_pressure_validation() {
        let actions = derive(40, "presión de 160/95 mmHg");
        let bp = find(&actions, "blood_pressure").unwrap();
        assert_eq!(bp.kind, ActionKind::Validate);
        assert_eq!(bp.confidence, 0.88);
        assert_eq!(
            bp.payload,
            ActionPayload::BloodPressure {
                reading: "160/95".into(),
                is_normal: false
            }
        );

        let normal = derive(40, "140/85 mmHg");
        assert_eq!(
            find(&normal, "blood_pressure").unwrap().payload,
            ActionPayload::BloodPressure {
                reading: "140/85".into(),
                is_normal: true
            }
        );
    }

    #[test]
    fn other_vitals_validated() {
        let actions = derive(40, "pulso 120 lpm, 39 grados");
        assert_eq!(
            find(&actions, "heart_rate").unwrap().payload,
            ActionPayload::HeartRate { bpm: 120, is_normal: false }
        );
        assert_eq!(
            find(&actions, "temperature").unwrap().payload,
            ActionPayload::Temperature { celsius: 39.0, is_normal: false }
        );
    }

    #[test]
    fn confidences_are_stable() {
        let text = "dolor de cabeza muy intenso, tomo ibuprofeno, 130/85 mmHg";
        let first = derive(70, text);
        assert_eq!(first.len(), 5);
        for _ in 0..5 {
            let again = derive(70, text);
            let a: Vec<f32> = first.iter().map(|a| a.confidence).collect();
            let b: Vec<f32> = again.iter().map(|a| a.confidence).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn confidences_within_unit_interval() {
        let actions = derive(90, "dolor, fiebre, paracetamol, 150/100 mmHg, 110 lpm, 38 grados");
        assert_eq!(actions.len(), 7);
        assert!(actions.iter().all(|a| (0.0..=1.0).contains(&a.confidence)));
    }
}
