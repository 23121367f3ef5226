//! Errors raised by the consultation wizard.
//!
//! Classification itself is total and never fails.

use thiserror::Error;

use super::types::{Route, Step};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Consultation flow already completed")]
    Completed,

    #[error("Step '{step}' is not part of the {route} route")]
    StepNotInRoute { step: Step, route: Route },
}
