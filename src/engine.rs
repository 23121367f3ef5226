//! Configured entry point tying the classifier and the extractor together.

use chrono::{DateTime, Utc};

use crate::config::{ConfigError, SmartFlowConfig, Thresholds};
use crate::extraction::{actions_for, ExtractedData, SmartAction, TextExtractor};
use crate::flow::{ConsultationFlow, FlowClassifier, FlowDecision, PatientContext};

/// Classifier + extractor built from one `SmartFlowConfig`.
#[derive(Debug, Clone)]
pub struct SmartFlow {
    classifier: FlowClassifier,
    extractor: TextExtractor,
}

impl Default for SmartFlow {
    fn default() -> Self {
        Self {
            classifier: FlowClassifier::default(),
            extractor: TextExtractor::default(),
        }
    }
}

impl SmartFlow {
    pub fn new(config: &SmartFlowConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            classifier: FlowClassifier::new(config.thresholds.clone()),
            extractor: TextExtractor::new(&config.vocabulary)?,
        })
    }

    /// Build from `SMARTFLOW_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(&SmartFlowConfig::from_env()?)
    }

    pub fn thresholds(&self) -> &Thresholds {
        self.classifier.thresholds()
    }

    pub fn classify(&self, context: &PatientContext) -> FlowDecision {
        self.classifier.classify(context)
    }

    pub fn classify_at(&self, context: &PatientContext, now: DateTime<Utc>) -> FlowDecision {
        self.classifier.classify_at(context, now)
    }

    pub fn extract(&self, transcript: &str, analysis: &str) -> ExtractedData {
        self.extractor.extract(transcript, analysis)
    }

    pub fn derive_actions(
        &self,
        context: &PatientContext,
        transcript: &str,
        analysis: &str,
    ) -> Vec<SmartAction> {
        let data = self.extract(transcript, analysis);
        actions_for(context, &data, self.thresholds())
    }

    /// Start a wizard using this engine's thresholds.
    pub fn start_consultation(&self, context: PatientContext, now: DateTime<Utc>) -> ConsultationFlow {
        ConsultationFlow::start(self.classifier.clone(), context, now)
    }
}
