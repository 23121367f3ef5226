//! Keyword and pattern extraction over transcript + analysis text.
//!
//! Matching is case-insensitive over the lowercased concatenation of both
//! inputs. Malformed or empty text yields empty fields, never an error.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::types::{ExtractedData, IntensityHint};
use super::vocabulary::Vocabulary;
use crate::config::ConfigError;

// ═══════════════════════════════════════════
// Fixed patterns
// ═══════════════════════════════════════════

/// Longer unit spellings come first so the alternation takes the full word.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(días|dias|día|dia|semanas|semana|meses|mes|años|año)\b")
        .expect("Invalid duration regex")
});

static BLOOD_PRESSURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2,3}/\d{2,3})\s*(?:mmhg|presión|tensión)")
        .expect("Invalid blood pressure regex")
});

static HEART_RATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{2,3})\s*(?:lpm|latidos)").expect("Invalid heart rate regex")
});

static TEMPERATURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{2}(?:[.,]\d{1,2})?)\s*(?:°\s*c?|grados)")
        .expect("Invalid temperature regex")
});

/// Readings outside this band are not body temperatures (room temperature, typos).
const PLAUSIBLE_TEMPERATURE_C: std::ops::RangeInclusive<f32> = 30.0..=45.0;

/// Built once from the default vocabulary for the free functions.
pub(crate) static DEFAULT_EXTRACTOR: LazyLock<TextExtractor> = LazyLock::new(|| {
    TextExtractor::new(&Vocabulary::default()).expect("Invalid default vocabulary")
});

// ═══════════════════════════════════════════
// Extractor
// ═══════════════════════════════════════════

/// Vocabulary compiled into matchers.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    symptoms: Vec<String>,
    medication_re: Option<Regex>,
    pain_location_re: Option<Regex>,
    /// Substring-matched, so inflected forms ("intensos", "severas") still count.
    escalation_cues: Vec<String>,
    moderate_cues: Vec<String>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        DEFAULT_EXTRACTOR.clone()
    }
}

impl TextExtractor {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, ConfigError> {
        vocabulary.validate()?;
        let vocab = vocabulary.normalized();

        let pain_location_re = match alternation(&vocab.body_locations) {
            Some(locations) => Some(compile(&format!(
                r"(?:dolor(?:es)?(?:\s+\w+){{0,2}}?\s+(?:de|en)|me\s+duelen?)\s+(?:(?:la|el|los|las|mi|mis)\s+)?({locations})\b"
            ))?),
            None => None,
        };

        Ok(Self {
            symptoms: dedup(vocab.symptoms),
            medication_re: word_matcher(&vocab.medications)?,
            pain_location_re,
            escalation_cues: dedup(vocab.escalation_cues),
            moderate_cues: dedup(vocab.moderate_cues),
        })
    }

    /// Parse transcript and AI-analysis text into a structured partial record.
    pub fn extract(&self, transcript: &str, analysis: &str) -> ExtractedData {
        let text = format!("{transcript}\n{analysis}").to_lowercase();

        let data = ExtractedData {
            symptoms: self.find_symptoms(&text),
            medications: self.find_medications(&text),
            duration: find_duration(&text),
            pain_location: self.find_pain_location(&text),
            blood_pressure: find_blood_pressure(&text),
            heart_rate: find_heart_rate(&text),
            temperature: find_temperature(&text),
            severity: self.infer_severity(&text),
        };

        // Counts only: transcript text is patient data.
        debug!(
            symptoms = data.symptoms.len(),
            medications = data.medications.len(),
            has_duration = data.duration.is_some(),
            has_blood_pressure = data.blood_pressure.is_some(),
            "Extracted clinical signals from text"
        );

        data
    }

    fn find_symptoms(&self, text: &str) -> BTreeSet<String> {
        self.symptoms
            .iter()
            .filter(|term| text.contains(term.as_str()))
            .cloned()
            .collect()
    }

    fn find_medications(&self, text: &str) -> Vec<String> {
        match &self.medication_re {
            Some(re) => re.find_iter(text).map(|m| m.as_str().to_string()).collect(),
            None => Vec::new(),
        }
    }

    fn find_pain_location(&self, text: &str) -> Option<String> {
        let re = self.pain_location_re.as_ref()?;
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Escalation cues win over moderate cues; any other non-blank text is `leve`.
    fn infer_severity(&self, text: &str) -> Option<IntensityHint> {
        if text.trim().is_empty() {
            return None;
        }
        let hit = |cues: &[String]| cues.iter().any(|cue| text.contains(cue.as_str()));
        if hit(&self.escalation_cues) {
            Some(IntensityHint::Severo)
        } else if hit(&self.moderate_cues) {
            Some(IntensityHint::Moderado)
        } else {
            Some(IntensityHint::Leve)
        }
    }
}

// ═══════════════════════════════════════════
// Pattern helpers
// ═══════════════════════════════════════════

fn find_duration(text: &str) -> Option<String> {
    let caps = DURATION_RE.captures(text)?;
    Some(format!("{} {}", &caps[1], &caps[2]))
}

fn find_blood_pressure(text: &str) -> Option<String> {
    BLOOD_PRESSURE_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
}

fn find_heart_rate(text: &str) -> Option<u32> {
    HEART_RATE_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

fn find_temperature(text: &str) -> Option<f32> {
    TEMPERATURE_RE.captures_iter(text).find_map(|caps| {
        let value: f32 = caps[1].replace(',', ".").parse().ok()?;
        PLAUSIBLE_TEMPERATURE_C.contains(&value).then_some(value)
    })
}

/// Escaped alternation, longest terms first. `None` for an empty list.
fn alternation(terms: &[String]) -> Option<String> {
    let mut terms = dedup(terms.to_vec());
    if terms.is_empty() {
        return None;
    }
    terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    Some(
        terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|"),
    )
}

fn word_matcher(terms: &[String]) -> Result<Option<Regex>, ConfigError> {
    match alternation(terms) {
        Some(alt) => compile(&format!(r"\b(?:{alt})\b")).map(Some),
        None => Ok(None),
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidVocabulary(e.to_string()))
}

fn dedup(terms: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        if !out.contains(&term) {
            out.push(term);
        }
    }
    out
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
