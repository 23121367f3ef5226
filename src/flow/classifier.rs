//! Rule-based consultation router.
//!
//! Rules are evaluated in strict priority order and the first match wins:
//! emergency → evolution → quick → complete. No I/O, no hidden state.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::types::*;
use crate::config::Thresholds;

/// Maps a patient context to a consultation route and its parameters.
#[derive(Debug, Clone, Default)]
pub struct FlowClassifier {
    thresholds: Thresholds,
}

impl FlowClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Classify against the current wall clock.
    pub fn classify(&self, context: &PatientContext) -> FlowDecision {
        self.classify_at(context, Utc::now())
    }

    /// Classify with an explicit "now". Same inputs always give the same decision.
    pub fn classify_at(&self, context: &PatientContext, now: DateTime<Utc>) -> FlowDecision {
        let decision = if is_emergency(context) {
            emergency_flow()
        } else if self.is_recent_follow_up(context, now) {
            evolution_flow()
        } else if self.is_quick(context) {
            quick_flow()
        } else {
            complete_flow()
        };

        debug!(
            route = %decision.route,
            estimated_time = decision.estimated_time,
            symptom_count = context.symptoms.len(),
            "Consultation route selected"
        );

        decision
    }

    fn is_recent_follow_up(&self, context: &PatientContext, now: DateTime<Utc>) -> bool {
        if !context.is_returning() {
            return false;
        }
        match context.days_since_last_visit(now) {
            Some(days) => days < self.thresholds.evolution_window_days,
            None => false,
        }
    }

    fn is_quick(&self, context: &PatientContext) -> bool {
        let mild_or_unknown = matches!(context.severity, None | Some(Severity::Leve));
        mild_or_unknown && context.symptoms.len() <= self.thresholds.quick_max_symptoms
    }
}

fn is_emergency(context: &PatientContext) -> bool {
    context.is_emergency_flagged() || context.severity == Some(Severity::Grave)
}

// ═══════════════════════════════════════════
// Route templates
// ═══════════════════════════════════════════

fn emergency_flow() -> FlowDecision {
    FlowDecision {
        route: Route::Emergency,
        estimated_time: 5,
        priority: Priority::High,
        required_steps: vec![Step::Identification, Step::CriticalData, Step::ImmediateAction],
        optional_steps: vec![Step::DetailedHistory],
        ai_analysis_level: AiAnalysisLevel::Basic,
        auto_fill_level: AutoFillLevel::Minimal,
    }
}

fn evolution_flow() -> FlowDecision {
    FlowDecision {
        route: Route::Evolution,
        estimated_time: 10,
        priority: Priority::Medium,
        required_steps: vec![Step::Identification, Step::Changes, Step::EvolutionData],
        optional_steps: vec![Step::FullHistory, Step::AiAnalysis],
        ai_analysis_level: AiAnalysisLevel::Detailed,
        auto_fill_level: AutoFillLevel::Partial,
    }
}

fn quick_flow() -> FlowDecision {
    FlowDecision {
        route: Route::Quick,
        estimated_time: 8,
        priority: Priority::Medium,
        required_steps: vec![Step::Identification, Step::BasicSymptoms, Step::QuickAssessment],
        optional_steps: vec![Step::AiAnalysis],
        ai_analysis_level: AiAnalysisLevel::Basic,
        auto_fill_level: AutoFillLevel::Partial,
    }
}

fn complete_flow() -> FlowDecision {
    FlowDecision {
        route: Route::Complete,
        estimated_time: 20,
        priority: Priority::Medium,
        required_steps: vec![
            Step::Identification,
            Step::FullHistory,
            Step::DetailedSymptoms,
            Step::AiAnalysis,
        ],
        optional_steps: vec![Step::AdditionalTests, Step::SpecialistReferral],
        ai_analysis_level: AiAnalysisLevel::Comprehensive,
        auto_fill_level: AutoFillLevel::Complete,
    }
}

/// Classify with default thresholds against the current wall clock.
pub fn classify(context: &PatientContext) -> FlowDecision {
    FlowClassifier::default().classify(context)
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
