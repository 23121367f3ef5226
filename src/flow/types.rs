//! Core types for the consultation flow classifier.
//!
//! These types model one routing decision:
//! PatientContext → FlowClassifier → FlowDecision → wizard steps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ═══════════════════════════════════════════
// Clinical severity (caller-provided)
// ═══════════════════════════════════════════

/// Severity reported by the clinician or intake form.
///
/// Distinct from the free-text `IntensityHint` produced by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Leve,
    Moderado,
    Grave,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leve => "leve",
            Self::Moderado => "moderado",
            Self::Grave => "grave",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "leve" => Some(Self::Leve),
            "moderado" => Some(Self::Moderado),
            "grave" => Some(Self::Grave),
            _ => None,
        }
    }
}

/// Unknown or non-string severity values deserialize as absent instead of failing the whole context.
fn lenient_severity<'de, D>(deserializer: D) -> Result<Option<Severity>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(Severity::from_str))
}

// ═══════════════════════════════════════════
// Patient Context (input)
// ═══════════════════════════════════════════

/// Snapshot of what is known about the patient when a consultation starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientContext {
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub has_history: Option<bool>,
    /// ISO date or timestamp of the previous visit.
    #[serde(default)]
    pub last_visit: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub medications: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_severity")]
    pub severity: Option<Severity>,
    /// Set by the triage form. Kept separate from `is_emergency`, which the
    /// intake screen sets; either one routes to emergency.
    #[serde(default)]
    pub emergency: Option<bool>,
    #[serde(default)]
    pub is_emergency: Option<bool>,
    #[serde(default)]
    pub is_follow_up: Option<bool>,
    #[serde(default)]
    pub has_transcription: Option<bool>,
}

impl PatientContext {
    /// True when either emergency flag is set.
    pub fn is_emergency_flagged(&self) -> bool {
        self.emergency.unwrap_or(false) || self.is_emergency.unwrap_or(false)
    }

    /// Prior visits on record, or flagged as a follow-up.
    pub fn is_returning(&self) -> bool {
        self.has_history.unwrap_or(false) || self.is_follow_up.unwrap_or(false)
    }

    /// Whole days elapsed between `last_visit` and `now`, floored.
    ///
    /// `None` when there is no last visit or it cannot be parsed.
    /// A visit in the future yields a negative count.
    pub fn days_since_last_visit(&self, now: DateTime<Utc>) -> Option<i64> {
        let last = parse_visit_timestamp(self.last_visit.as_deref()?)?;
        let elapsed_ms = (now - last).num_milliseconds();
        Some(elapsed_ms.div_euclid(MILLIS_PER_DAY))
    }
}

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parse a visit timestamp: RFC 3339, naive datetime (UTC), or plain date (midnight UTC).
pub fn parse_visit_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ═══════════════════════════════════════════
// Decision enums
// ═══════════════════════════════════════════

/// Consultation pathway chosen by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Emergency,
    Quick,
    Evolution,
    Complete,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Quick => "quick",
            Self::Evolution => "evolution",
            Self::Complete => "complete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "emergency" => Some(Self::Emergency),
            "quick" => Some(Self::Quick),
            "evolution" => Some(Self::Evolution),
            "complete" => Some(Self::Complete),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Requested depth of the external generative analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiAnalysisLevel {
    Basic,
    Detailed,
    Comprehensive,
}

/// How aggressively extracted data may pre-populate form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoFillLevel {
    Minimal,
    Partial,
    Complete,
}

// ═══════════════════════════════════════════
// Wizard steps
// ═══════════════════════════════════════════

/// A named stage of the consultation wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Identification,
    CriticalData,
    ImmediateAction,
    DetailedHistory,
    Changes,
    EvolutionData,
    FullHistory,
    AiAnalysis,
    BasicSymptoms,
    QuickAssessment,
    DetailedSymptoms,
    AdditionalTests,
    SpecialistReferral,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identification => "identification",
            Self::CriticalData => "critical_data",
            Self::ImmediateAction => "immediate_action",
            Self::DetailedHistory => "detailed_history",
            Self::Changes => "changes",
            Self::EvolutionData => "evolution_data",
            Self::FullHistory => "full_history",
            Self::AiAnalysis => "ai_analysis",
            Self::BasicSymptoms => "basic_symptoms",
            Self::QuickAssessment => "quick_assessment",
            Self::DetailedSymptoms => "detailed_symptoms",
            Self::AdditionalTests => "additional_tests",
            Self::SpecialistReferral => "specialist_referral",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|step| step.as_str() == s)
    }

    pub fn all() -> &'static [Step] {
        &[
            Self::Identification,
            Self::CriticalData,
            Self::ImmediateAction,
            Self::DetailedHistory,
            Self::Changes,
            Self::EvolutionData,
            Self::FullHistory,
            Self::AiAnalysis,
            Self::BasicSymptoms,
            Self::QuickAssessment,
            Self::DetailedSymptoms,
            Self::AdditionalTests,
            Self::SpecialistReferral,
        ]
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ═══════════════════════════════════════════
// Flow Decision (output)
// ═══════════════════════════════════════════

/// The classifier's routing decision for one patient context.
///
/// Never mutated in place: a changed context produces a new decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDecision {
    pub route: Route,
    /// Minutes.
    pub estimated_time: u32,
    pub priority: Priority,
    /// Ordered; always starts with `Step::Identification`.
    pub required_steps: Vec<Step>,
    pub optional_steps: Vec<Step>,
    pub ai_analysis_level: AiAnalysisLevel,
    pub auto_fill_level: AutoFillLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!(Severity::from_str("GRAVE"), Some(Severity::Grave));
        assert_eq!(Severity::from_str(" leve "), Some(Severity::Leve));
        assert_eq!(Severity::from_str("severo"), None);
    }

    #[test]
    fn context_deserializes_camel_case_with_defaults() {
        let json = r#"{"age": 42, "hasHistory": true, "lastVisit": "2026-01-10", "symptoms": ["tos"]}"#;
        let ctx: PatientContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.age, 42);
        assert_eq!(ctx.has_history, Some(true));
        assert_eq!(ctx.last_visit.as_deref(), Some("2026-01-10"));
        assert_eq!(ctx.symptoms, vec!["tos".to_string()]);
        assert!(ctx.severity.is_none());
        assert!(!ctx.is_emergency_flagged());
    }

    #[test]
    fn unknown_severity_becomes_absent() {
        let json = r#"{"age": 30, "symptoms": [], "severity": "critico"}"#;
        let ctx: PatientContext = serde_json::from_str(json).unwrap();
        assert!(ctx.severity.is_none());
    }

    #[test]
    fn non_string_severity_becomes_absent() {
        for raw in ["3", "true", "null"] {
            let json = format!(r#"{{"age": 30, "symptoms": [], "severity": {raw}}}"#);
            let ctx: PatientContext = serde_json::from_str(&json).unwrap();
            assert!(ctx.severity.is_none(), "severity {raw}");
        }
    }

    #[test]
    fn either_emergency_flag_counts() {
        let a = PatientContext { emergency: Some(true), ..Default::default() };
        let b = PatientContext { is_emergency: Some(true), ..Default::default() };
        let c = PatientContext { emergency: Some(false), is_emergency: Some(false), ..Default::default() };
        assert!(a.is_emergency_flagged());
        assert!(b.is_emergency_flagged());
        assert!(!c.is_emergency_flagged());
    }

    #[test]
    fn days_since_last_visit_floors_partial_days() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let ctx = PatientContext {
            last_visit: Some("2026-03-08T18:00:00Z".into()),
            ..Default::default()
        };
        // 1 day 18 hours
        assert_eq!(ctx.days_since_last_visit(now), Some(1));
    }

    #[test]
    fn days_since_last_visit_across_dst_offsets() {
        // -05:00 to -04:00: 28 days 23 hours elapsed in UTC
        let now = DateTime::parse_from_rfc3339("2026-03-30T00:00:00-04:00")
            .unwrap()
            .with_timezone(&Utc);
        let ctx = PatientContext {
            last_visit: Some("2026-03-01T00:00:00-05:00".into()),
            ..Default::default()
        };
        assert_eq!(ctx.days_since_last_visit(now), Some(28));
    }

    #[test]
    fn days_since_last_visit_accepts_plain_dates() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        let ctx = PatientContext { last_visit: Some("2026-02-08".into()), ..Default::default() };
        assert_eq!(ctx.days_since_last_visit(now), Some(30));
    }

    #[test]
    fn unparseable_last_visit_is_absent() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        let ctx = PatientContext { last_visit: Some("la semana pasada".into()), ..Default::default() };
        assert_eq!(ctx.days_since_last_visit(now), None);
    }

    #[test]
    fn future_visit_is_negative() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        let ctx = PatientContext { last_visit: Some("2026-03-12".into()), ..Default::default() };
        assert_eq!(ctx.days_since_last_visit(now), Some(-2));
    }

    #[test]
    fn step_round_trips_through_str() {
        for step in Step::all() {
            assert_eq!(Step::from_str(step.as_str()), Some(*step));
        }
        assert_eq!(Step::from_str("recording"), None);
    }

    #[test]
    fn decision_serializes_camel_case() {
        let decision = FlowDecision {
            route: Route::Quick,
            estimated_time: 8,
            priority: Priority::Medium,
            required_steps: vec![Step::Identification, Step::BasicSymptoms],
            optional_steps: vec![Step::AiAnalysis],
            ai_analysis_level: AiAnalysisLevel::Basic,
            auto_fill_level: AutoFillLevel::Partial,
        };
        let json = serde_json::to_string(&decision).unwrap();
        assert!(json.contains("\"route\":\"quick\""));
        assert!(json.contains("\"estimatedTime\":8"));
        assert!(json.contains("\"requiredSteps\":[\"identification\",\"basic_symptoms\"]"));
        assert!(json.contains("\"autoFillLevel\":\"partial\""));
    }
}
