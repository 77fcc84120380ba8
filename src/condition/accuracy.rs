use crate::model::judgement::JudgementResult;

/// Running accuracy over all judgements that affect accuracy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AccuracyTracker {
    base_score: u64,
    max_base_score: u64,
}

impl AccuracyTracker {
    pub const fn new() -> Self {
        Self {
            base_score: 0,
            max_base_score: 0,
        }
    }

    /// Add a judgement's score.
    ///
    /// Unscorable and bonus results are ignored. A result scoring more than
    /// its judgement's maximum only counts up to that maximum.
    pub fn accumulate(&mut self, result: &JudgementResult) {
        if !result.result.affects_accuracy() {
            return;
        }

        let max = result.judgement.max_numeric_result();

        self.base_score += u64::from(result.numeric_result().min(max));
        self.max_base_score += u64::from(max);
    }

    /// The current accuracy in `[0, 1]`.
    ///
    /// Without any scored judgements the accuracy is `1.0`.
    pub fn accuracy(&self) -> f64 {
        if self.max_base_score == 0 {
            return 1.0;
        }

        self.base_score as f64 / self.max_base_score as f64
    }

    pub const fn base_score(&self) -> u64 {
        self.base_score
    }

    pub const fn max_base_score(&self) -> u64 {
        self.max_base_score
    }
}
