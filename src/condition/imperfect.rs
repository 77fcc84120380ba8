use crate::model::{hit_result::HitResult, judgement::JudgementResult};

/// Whether a judgement counts as imperfect.
///
/// That is the case if the result affects combo but is not the best possible
/// one. Large tick hits are never imperfect.
pub fn is_imperfect(result: &JudgementResult) -> bool {
    !result.is_max()
        && result.result != HitResult::LargeTickHit
        && result.result.affects_combo()
}

/// Counts imperfect judgements.
///
/// A disabled tracker ignores everything and its count stays at zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ImperfectTracker {
    enabled: bool,
    count: u32,
}

impl ImperfectTracker {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled, count: 0 }
    }

    pub fn observe(&mut self, result: &JudgementResult) {
        if self.enabled && is_imperfect(result) {
            self.count += 1;
        }
    }

    pub const fn count(&self) -> u32 {
        self.count
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}
