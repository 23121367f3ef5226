//! Step navigation over a `FlowDecision`'s required steps.

use super::types::{FlowDecision, Step};

impl FlowDecision {
    /// Position of `step` in the required sequence.
    pub fn step_index(&self, step: Step) -> Option<usize> {
        self.required_steps.iter().position(|s| *s == step)
    }

    /// The step right after `current`, or `None` if `current` is last or not required.
    pub fn next_step(&self, current: Step) -> Option<Step> {
        let idx = self.step_index(current)?;
        self.required_steps.get(idx + 1).copied()
    }

    /// `next_step` for callers holding a raw step id.
    pub fn next_step_id(&self, current: &str) -> Option<Step> {
        self.next_step(Step::from_str(current)?)
    }

    /// A step is skipped when it is not part of the required sequence.
    pub fn should_skip_step(&self, step: Step) -> bool {
        !self.required_steps.contains(&step)
    }

    /// Unknown step ids are always skipped.
    pub fn should_skip_step_id(&self, step: &str) -> bool {
        Step::from_str(step).map_or(true, |s| self.should_skip_step(s))
    }

    pub fn is_last_step(&self, step: Step) -> bool {
        self.required_steps.last() == Some(&step)
    }

    /// Minutes left after `current`: remaining steps × average minutes per step, rounded.
    ///
    /// A step outside the required sequence counts as not started, giving the full estimate.
    pub fn estimated_time_remaining(&self, current: Step) -> u32 {
        let total = self.required_steps.len();
        if total == 0 {
            return 0;
        }
        let remaining = match self.step_index(current) {
            Some(idx) => total - idx - 1,
            None => total,
        };
        let per_step = self.estimated_time as f64 / total as f64;
        (remaining as f64 * per_step).round() as u32
    }

    /// Required steps followed by optional ones.
    pub fn all_steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.required_steps
            .iter()
            .chain(self.optional_steps.iter())
            .copied()
    }
}
