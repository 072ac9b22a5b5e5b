use crate::enums::request_state::RequestState;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::schema_validation_error::SchemaValidationError;

/// What the classification contract hands back when the model produced output.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Validated(AnalysisResult),
    Degraded {
        result: AnalysisResult,
        reason: SchemaValidationError,
    },
}

impl AnalysisOutcome {
    pub fn result(&self) -> &AnalysisResult {
        match self {
            AnalysisOutcome::Validated(result) => result,
            AnalysisOutcome::Degraded { result, .. } => result,
        }
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            AnalysisOutcome::Validated(result) => result,
            AnalysisOutcome::Degraded { result, .. } => result,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, AnalysisOutcome::Degraded { .. })
    }

    pub fn request_state(&self) -> RequestState {
        match self {
            AnalysisOutcome::Validated(_) => RequestState::Succeeded,
            AnalysisOutcome::Degraded { .. } => RequestState::Degraded,
        }
    }
}
