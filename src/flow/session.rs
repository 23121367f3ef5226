//! Consultation wizard state.
//!
//! Tracks the active step over a `FlowDecision` and re-routes when the patient
//! context changes (e.g. a transcription becomes available mid-consultation).

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::classifier::FlowClassifier;
use super::error::FlowError;
use super::types::{FlowDecision, PatientContext, Step};

pub struct ConsultationFlow {
    classifier: FlowClassifier,
    context: PatientContext,
    decision: FlowDecision,
    /// `None` once every required step is done.
    current: Option<Step>,
    completed: Vec<Step>,
}

impl ConsultationFlow {
    /// Classify `context` and sit on the first required step.
    pub fn start(classifier: FlowClassifier, context: PatientContext, now: DateTime<Utc>) -> Self {
        let decision = classifier.classify_at(&context, now);
        let current = decision.required_steps.first().copied();
        info!(route = %decision.route, "Consultation flow started");
        Self {
            classifier,
            context,
            decision,
            current,
            completed: Vec::new(),
        }
    }

    pub fn decision(&self) -> &FlowDecision {
        &self.decision
    }

    pub fn context(&self) -> &PatientContext {
        &self.context
    }

    pub fn current_step(&self) -> Option<Step> {
        self.current
    }

    pub fn completed_steps(&self) -> &[Step] {
        &self.completed
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    /// Mark the current step done and move on.
    ///
    /// Returns the new current step, or `Ok(None)` when the last required step completes.
    pub fn advance(&mut self) -> Result<Option<Step>, FlowError> {
        let step = self.current.ok_or(FlowError::Completed)?;
        if !self.completed.contains(&step) {
            self.completed.push(step);
        }

        let next = self
            .decision
            .next_step(step)
            .filter(|s| !self.completed.contains(s))
            .or_else(|| self.first_pending_required());

        debug!(from = %step, to = ?next.map(|s| s.as_str()), "Consultation step advanced");
        self.current = next;
        Ok(next)
    }

    /// Jump to any required or optional step of the current route.
    pub fn jump_to(&mut self, step: Step) -> Result<(), FlowError> {
        if !self.decision.all_steps().any(|s| s == step) {
            return Err(FlowError::StepNotInRoute {
                step,
                route: self.decision.route,
            });
        }
        self.current = Some(step);
        Ok(())
    }

    /// Fraction of required steps completed, in [0, 1].
    pub fn progress(&self) -> f32 {
        let required = &self.decision.required_steps;
        if required.is_empty() {
            return 1.0;
        }
        let done = required.iter().filter(|s| self.completed.contains(s)).count();
        done as f32 / required.len() as f32
    }

    /// Minutes left from the current step.
    pub fn time_remaining(&self) -> u32 {
        match self.current {
            Some(step) => self.decision.estimated_time_remaining(step),
            None => 0,
        }
    }

    /// Replace the context and recompute the decision.
    ///
    /// The current step survives if the new route still has it; otherwise the
    /// wizard restarts at the new route's first pending required step.
    pub fn update_context(&mut self, context: PatientContext, now: DateTime<Utc>) {
        let decision = self.classifier.classify_at(&context, now);
        if decision.route != self.decision.route {
            info!(
                from = %self.decision.route,
                to = %decision.route,
                "Consultation re-routed after context change"
            );
        }

        self.context = context;
        self.decision = decision;
        let decision = &self.decision;
        self.completed.retain(|s| decision.all_steps().any(|d| d == *s));

        let keep_current = self
            .current
            .is_some_and(|s| self.decision.all_steps().any(|d| d == s));
        if !keep_current {
            self.current = self.first_pending_required();
        }
    }

    fn first_pending_required(&self) -> Option<Step> {
        self.decision
            .required_steps
            .iter()
            .copied()
            .find(|s| !self.completed.contains(s))
    }
}
