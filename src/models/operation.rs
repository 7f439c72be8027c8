/// Per-photo result of a batch save or export. One bad photo never aborts the
/// batch; its failure is recorded here and the batch continues.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaveOutcome {
    pub photo_name: String,
    pub success: bool,
    pub error: Option<String>,
}

impl SaveOutcome {
    pub fn success(photo_name: impl Into<String>) -> Self {
        Self {
            photo_name: photo_name.into(),
            success: true,
            error: None,
        }
    }

    pub fn failure(photo_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            photo_name: photo_name.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SaveSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl SaveSummary {
    pub fn from_outcomes(outcomes: &[SaveOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|outcome| outcome.success).count();

        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len().saturating_sub(succeeded),
        }
    }
}
