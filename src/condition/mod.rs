use crate::model::{hit_result::HitResult, judgement::JudgementResult};

pub use self::{
    accuracy::AccuracyTracker,
    challenge::{JudgementChallengeEvaluator, JudgementChallengeSettings},
    evaluator::ClearConditionEvaluator,
    imperfect::{is_imperfect, ImperfectTracker},
    settings::{CheckInterval, ClearConditionSettings},
    timeline::{Checkpoints, JudgementError, Timeline},
};

mod accuracy;
mod challenge;
mod evaluator;
mod imperfect;
mod settings;
mod timeline;

/// Decides after each judgement whether a performance fails.
///
/// Judgements must be passed in timeline order, exactly one per hit object.
pub trait FailCondition {
    /// Process the next judgement.
    ///
    /// `health` is the current health in `[0, 1]` as tracked by the caller.
    fn on_judgement(
        &mut self,
        result: &JudgementResult,
        health: f64,
    ) -> Result<Verdict, JudgementError>;
}

/// Settings that turn into a [`FailCondition`] once the beatmap's timeline
/// is known.
pub trait ApplyToTimeline {
    type Condition: FailCondition;

    /// Prepare the condition for a performance on the given timeline.
    fn apply_to_timeline(self, timeline: Timeline<'_>) -> Self::Condition;
}

/// The outcome of processing a judgement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The performance goes on.
    Continue,
    /// The performance failed.
    Fail(FailReason),
}

impl Verdict {
    /// Whether the performance failed.
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// The reason of the failure, if any.
    pub const fn fail_reason(self) -> Option<FailReason> {
        match self {
            Self::Continue => None,
            Self::Fail(reason) => Some(reason),
        }
    }
}

/// Which condition caused a performance to fail.
///
/// If multiple conditions are violated at once, the first one in declaration
/// order is reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailReason {
    /// Health dropped below the minimum.
    Health,
    /// Accuracy dropped below the minimum.
    Accuracy,
    /// Too many imperfect judgements.
    ImperfectJudgements,
    /// Too many judgements of the given result.
    JudgementLimit(HitResult),
}
