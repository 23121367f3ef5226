//! Smart Flow decision engine.
//!
//! Picks a consultation route for a patient context and drives the
//! consultation wizard over that route's steps.
//!
//! ```text
//! PatientContext → FlowClassifier → FlowDecision → ConsultationFlow
//! ```

pub mod error;
pub mod types;
pub mod classifier;
pub mod steps;
pub mod session;

pub use error::FlowError;
pub use types::*;
pub use classifier::{classify, FlowClassifier};
pub use session::ConsultationFlow;
