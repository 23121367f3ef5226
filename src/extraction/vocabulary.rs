//! Keyword tables driving free-text extraction.
//!
//! Kept as data so they can be replaced from config (localisation, clinic
//! formularies) without touching the matching logic.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

static DEFAULT_SYMPTOMS: &[&str] = &[
    "dolor",
    "fiebre",
    "tos",
    "fatiga",
    "náusea",
    "vómito",
    "diarrea",
    "mareo",
    "dolor de cabeza",
    "dolor de estómago",
    "dolor de espalda",
    "estreñimiento",
    "insomnio",
    "ansiedad",
    "depresión",
];

static DEFAULT_MEDICATIONS: &[&str] = &[
    "paracetamol",
    "ibuprofeno",
    "aspirina",
    "omeprazol",
    "metformina",
    "losartán",
];

static DEFAULT_BODY_LOCATIONS: &[&str] = &[
    "cabeza",
    "estómago",
    "espalda",
    "pecho",
    "garganta",
    "abdomen",
    "vientre",
    "cuello",
    "hombro",
    "brazo",
    "pierna",
    "rodilla",
    "tobillo",
    "pie",
    "mano",
    "oído",
    "oídos",
    "ojo",
    "ojos",
    "muela",
    "muelas",
    "articulaciones",
];

/// Intensity cues that escalate the inferred severity to `severo`.
static DEFAULT_ESCALATION_CUES: &[&str] = &["muy", "intenso", "severo"];

/// Cues for `moderado`.
static DEFAULT_MODERATE_CUES: &[&str] = &["moderado", "regular"];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vocabulary {
    /// Substring-matched, lowercase.
    pub symptoms: Vec<String>,
    /// Whole-word matched.
    pub medications: Vec<String>,
    pub body_locations: Vec<String>,
    /// Substring-matched, like symptoms.
    pub escalation_cues: Vec<String>,
    pub moderate_cues: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            symptoms: owned(DEFAULT_SYMPTOMS),
            medications: owned(DEFAULT_MEDICATIONS),
            body_locations: owned(DEFAULT_BODY_LOCATIONS),
            escalation_cues: owned(DEFAULT_ESCALATION_CUES),
            moderate_cues: owned(DEFAULT_MODERATE_CUES),
        }
    }
}

impl Vocabulary {
    /// Reject blank terms; they would match every text.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lists = [
            ("symptoms", &self.symptoms),
            ("medications", &self.medications),
            ("bodyLocations", &self.body_locations),
            ("escalationCues", &self.escalation_cues),
            ("moderateCues", &self.moderate_cues),
        ];
        for (name, list) in lists {
            if list.iter().any(|term| term.trim().is_empty()) {
                return Err(ConfigError::InvalidVocabulary(format!(
                    "blank term in '{name}'"
                )));
            }
        }
        Ok(())
    }

    /// Lowercased, trimmed copy used for matching.
    pub fn normalized(&self) -> Self {
        fn norm(list: &[String]) -> Vec<String> {
            list.iter().map(|s| s.trim().to_lowercase()).collect()
        }
        Self {
            symptoms: norm(&self.symptoms),
            medications: norm(&self.medications),
            body_locations: norm(&self.body_locations),
            escalation_cues: norm(&self.escalation_cues),
            moderate_cues: norm(&self.moderate_cues),
        }
    }
}
