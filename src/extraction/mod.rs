//! Free-text extraction and smart actions.
//!
//! Turns transcription + AI-analysis text into a structured partial record and
//! a list of form actions (auto-fill / suggest / validate) with confidence scores.
//!
//! ```text
//! transcript + analysis → TextExtractor → ExtractedData → actions_for → apply_actions
//! ```

pub mod types;
pub mod vocabulary;
pub mod extractor;
pub mod vitals;
pub mod actions;
pub mod merge;

pub use types::*;
pub use vocabulary::Vocabulary;
pub use extractor::TextExtractor;
pub use vitals::{is_normal_blood_pressure, parse_blood_pressure};
pub use actions::actions_for;
pub use merge::{apply_actions, merge_extracted, ConsultationDraft, MergeOutcome, ValidationFlag};

use crate::config::Thresholds;
use crate::flow::PatientContext;

/// Extract with the built-in vocabulary.
pub fn extract(transcript: &str, analysis: &str) -> ExtractedData {
    extractor::DEFAULT_EXTRACTOR.extract(transcript, analysis)
}

/// Extract with the built-in vocabulary and derive actions with default thresholds.
pub fn derive_actions(context: &PatientContext, transcript: &str, analysis: &str) -> Vec<SmartAction> {
    let data = extract(transcript, analysis);
    actions_for(context, &data, &Thresholds::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_functions_extract_headache_transcript() {
        let data = extract("Tengo dolor de cabeza desde hace 3 días y tomo paracetamol", "");
        assert!(data.symptoms.contains("dolor de cabeza"));
        assert_eq!(data.duration.as_deref(), Some("3 días"));
        assert!(data.medications.contains(&"paracetamol".to_string()));
    }

    #[test]
    fn blood_pressure_end_to_end() {
        let data = extract("TA 140/85 mmHg", "");
        assert_eq!(data.blood_pressure.as_deref(), Some("140/85"));
        assert!(is_normal_blood_pressure("140/85"));
        assert!(!is_normal_blood_pressure("160/95"));
    }

    #[test]
    fn derive_actions_uses_transcript_and_analysis() {
        let ctx = PatientContext {
            age: 30,
            ..Default::default()
        };
        let actions = derive_actions(&ctx, "tengo fiebre", "posible uso de omeprazol");
        let targets: Vec<&str> = actions.iter().map(|a| a.target()).collect();
        assert_eq!(targets, vec!["symptoms", "medications"]);
    }
}
