use crate::model::{hit_result::HitResult, judgement::JudgementResult, GameMode};

use super::{
    timeline::ObjectCursor, ApplyToTimeline, FailCondition, FailReason, JudgementError, Timeline,
    Verdict,
};

/// Upper limits on how often each [`HitResult`] may occur.
///
/// # Example
///
/// ```
/// use rosu_clear::{condition::JudgementChallengeSettings, model::hit_result::HitResult};
///
/// let settings = JudgementChallengeSettings::new()
///     .max(HitResult::Miss, Some(0))
///     .max(HitResult::Meh, Some(5));
///
/// assert_eq!(settings.get_max(HitResult::Miss), Some(0));
/// assert_eq!(settings.get_max(HitResult::Great), None);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct JudgementChallengeSettings {
    max_counts: [Option<u32>; HitResult::COUNT],
}

impl JudgementChallengeSettings {
    /// Settings without any limits.
    pub const fn new() -> Self {
        Self {
            max_counts: [None; HitResult::COUNT],
        }
    }

    /// Fail once `result` occurs more than `max` times.
    ///
    /// `None` removes the limit.
    pub fn max(mut self, result: HitResult, max: Option<u32>) -> Self {
        self.max_counts[result.ordinal()] = max;

        self
    }

    pub const fn get_max(&self, result: HitResult) -> Option<u32> {
        self.max_counts[result.ordinal()]
    }

    /// The results that are commonly limited for a mode.
    pub const fn configurable_results(mode: GameMode) -> &'static [HitResult] {
        match mode {
            GameMode::Osu => &[HitResult::Miss, HitResult::Meh, HitResult::Ok, HitResult::Great],
            GameMode::Taiko => &[HitResult::Miss, HitResult::Ok, HitResult::Great],
            GameMode::Catch => &[HitResult::Miss, HitResult::Meh, HitResult::Ok, HitResult::Good],
            GameMode::Mania => &[
                HitResult::Miss,
                HitResult::Meh,
                HitResult::Ok,
                HitResult::Good,
                HitResult::Great,
            ],
        }
    }
}

impl ApplyToTimeline for JudgementChallengeSettings {
    type Condition = JudgementChallengeEvaluator;

    fn apply_to_timeline(self, timeline: Timeline<'_>) -> Self::Condition {
        JudgementChallengeEvaluator::new(self, timeline)
    }
}

/// Fails a performance as soon as any [`HitResult`] exceeds its limit.
///
/// Limits are checked after every judgement and health plays no role.
#[derive(Clone, Debug)]
pub struct JudgementChallengeEvaluator {
    settings: JudgementChallengeSettings,
    cursor: ObjectCursor,
    counts: [u32; HitResult::COUNT],
    failed: Option<FailReason>,
}

impl JudgementChallengeEvaluator {
    pub fn new(settings: JudgementChallengeSettings, timeline: Timeline<'_>) -> Self {
        Self {
            settings,
            cursor: ObjectCursor::new(timeline.hit_objects.len()),
            counts: [0; HitResult::COUNT],
            failed: None,
        }
    }

    /// Process the next judgement.
    ///
    /// Returns an error if `result` does not belong to the next object of
    /// the timeline, in which case nothing is processed.
    pub fn on_judgement(&mut self, result: &JudgementResult) -> Result<Verdict, JudgementError> {
        if let Some(reason) = self.failed {
            return Ok(Verdict::Fail(reason));
        }

        self.cursor.advance(result.object_idx)?;

        let hit_result = result.result;
        let count = &mut self.counts[hit_result.ordinal()];
        *count += 1;

        match self.settings.get_max(hit_result) {
            Some(max) if *count > max => {
                let reason = FailReason::JudgementLimit(hit_result);

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    object = result.object_idx,
                    ?hit_result,
                    count = *count,
                    max,
                    "judgement limit exceeded",
                );

                self.failed = Some(reason);

                Ok(Verdict::Fail(reason))
            }
            _ => Ok(Verdict::Continue),
        }
    }

    /// How often `result` occurred so far.
    pub const fn count(&self, result: HitResult) -> u32 {
        self.counts[result.ordinal()]
    }

    pub const fn passed_objects(&self) -> usize {
        self.cursor.passed()
    }

    pub const fn is_failed(&self) -> bool {
        self.failed.is_some()
    }

    pub const fn settings(&self) -> &JudgementChallengeSettings {
        &self.settings
    }
}

impl FailCondition for JudgementChallengeEvaluator {
    fn on_judgement(
        &mut self,
        result: &JudgementResult,
        _health: f64,
    ) -> Result<Verdict, JudgementError> {
        JudgementChallengeEvaluator::on_judgement(self, result)
    }
}
