//! Apply smart actions to the in-progress consultation form.
//!
//! The auto-fill level from the flow decision controls how far extracted data
//! may write into fields. Anything not written is queued as a pending
//! suggestion so the clinician always confirms it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{ActionKind, ActionPayload, ExtractedData, SmartAction};
use crate::flow::AutoFillLevel;

/// An advisory result attached to a vital sign field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFlag {
    pub target: String,
    pub reading: String,
    pub is_normal: bool,
}

/// Caller-side partial consultation form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationDraft {
    pub symptoms: Vec<String>,
    pub medications: Vec<String>,
    pub duration: Option<String>,
    pub pain_location: Option<String>,
    pub blood_pressure: Option<String>,
    pub heart_rate: Option<u32>,
    pub temperature: Option<f32>,
    /// Actions awaiting clinician confirmation.
    pub pending: Vec<SmartAction>,
    pub validations: Vec<ValidationFlag>,
}

/// Summary of one `apply_actions` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub applied: usize,
    pub queued: usize,
    pub validated: usize,
}

pub fn apply_actions(
    draft: &mut ConsultationDraft,
    actions: &[SmartAction],
    level: AutoFillLevel,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for action in actions {
        match action.kind {
            ActionKind::AutoFill => {
                if auto_fill(draft, &action.payload, level) {
                    outcome.applied += 1;
                } else {
                    queue(draft, action);
                    outcome.queued += 1;
                }
            }
            ActionKind::Suggest | ActionKind::Optimize => {
                queue(draft, action);
                outcome.queued += 1;
            }
            ActionKind::Validate => {
                if let Some(flag) = validation_flag(&action.payload) {
                    draft.validations.retain(|v| v.target != flag.target);
                    draft.validations.push(flag);
                    outcome.validated += 1;
                }
            }
        }
    }

    debug!(
        applied = outcome.applied,
        queued = outcome.queued,
        validated = outcome.validated,
        level = ?level,
        "Smart actions merged into draft"
    );
    outcome
}

/// Copy scalar extracted fields into empty draft slots. Existing values are kept.
pub fn merge_extracted(draft: &mut ConsultationDraft, data: &ExtractedData) {
    fill_empty(&mut draft.duration, &data.duration);
    fill_empty(&mut draft.pain_location, &data.pain_location);
    fill_empty(&mut draft.blood_pressure, &data.blood_pressure);
    fill_empty(&mut draft.heart_rate, &data.heart_rate);
    fill_empty(&mut draft.temperature, &data.temperature);
}

fn fill_empty<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(value);
    }
}

/// Returns false when the level does not allow writing this payload.
fn auto_fill(draft: &mut ConsultationDraft, payload: &ActionPayload, level: AutoFillLevel) -> bool {
    let (field, values) = match payload {
        ActionPayload::Symptoms(values) => (&mut draft.symptoms, values),
        ActionPayload::Medications(values) => (&mut draft.medications, values),
        _ => return false,
    };

    match level {
        AutoFillLevel::Minimal => false,
        AutoFillLevel::Partial if !field.is_empty() => false,
        AutoFillLevel::Partial | AutoFillLevel::Complete => {
            for value in values {
                if !field.contains(value) {
                    field.push(value.clone());
                }
            }
            true
        }
    }
}

fn queue(draft: &mut ConsultationDraft, action: &SmartAction) {
    if !draft.pending.contains(action) {
        draft.pending.push(action.clone());
    }
}

fn validation_flag(payload: &ActionPayload) -> Option<ValidationFlag> {
    let (reading, is_normal) = match payload {
        ActionPayload::BloodPressure { reading, is_normal } => (reading.clone(), *is_normal),
        ActionPayload::HeartRate { bpm, is_normal } => (bpm.to_string(), *is_normal),
        ActionPayload::Temperature { celsius, is_normal } => (celsius.to_string(), *is_normal),
        _ => return None,
    };
    Some(ValidationFlag {
        target: payload.target().to_string(),
        reading,
        is_normal,
    })
}
