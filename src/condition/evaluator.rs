use crate::model::judgement::JudgementResult;

use super::{
    accuracy::AccuracyTracker, imperfect::ImperfectTracker, timeline::ObjectCursor, Checkpoints,
    ClearConditionSettings, FailCondition, FailReason, JudgementError, Timeline, Verdict,
};

/// Evaluates a [`ClearConditionSettings`] throughout a performance.
///
/// Every judgement updates the running accuracy and imperfect judgement count.
/// Only at checkpoints, as specified by the [`CheckInterval`], are the
/// thresholds compared against.
///
/// Once the performance failed, the evaluator keeps returning the same
/// failure without processing further judgements.
///
/// # Example
///
/// ```
/// use rosu_clear::{
///     condition::{CheckInterval, ClearConditionEvaluator, ClearConditionSettings, Timeline},
///     model::{
///         hit_object::{HitObject, HitObjectKind, Pos},
///         hit_result::HitResult,
///         judgement::{Judgement, JudgementResult},
///     },
/// };
///
/// let hit_objects: Vec<_> = (0..3_u32)
///     .map(|i| HitObject {
///         pos: Pos::new(256.0, 192.0),
///         start_time: f64::from(i) * 500.0,
///         kind: HitObjectKind::Circle,
///     })
///     .collect();
///
/// let settings = ClearConditionSettings::new()
///     .check_interval(CheckInterval::AtEnd)
///     .min_accuracy(90.0);
///
/// let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &[]));
/// let judgement = Judgement::default();
///
/// // Only the last object is checked
/// let miss = JudgementResult::new(0, judgement, HitResult::Miss);
/// assert!(!evaluator.on_judgement(&miss, 1.0)?.is_fail());
///
/// let great = JudgementResult::new(1, judgement, HitResult::Great);
/// assert!(!evaluator.on_judgement(&great, 1.0)?.is_fail());
///
/// let great = JudgementResult::new(2, judgement, HitResult::Great);
/// assert!(evaluator.on_judgement(&great, 1.0)?.is_fail());
/// # Ok::<_, rosu_clear::condition::JudgementError>(())
/// ```
///
/// [`CheckInterval`]: super::CheckInterval
#[derive(Clone, Debug)]
pub struct ClearConditionEvaluator {
    settings: ClearConditionSettings,
    checkpoints: Checkpoints,
    cursor: ObjectCursor,
    accuracy: AccuracyTracker,
    imperfect: ImperfectTracker,
    failed: Option<FailReason>,
}

impl ClearConditionEvaluator {
    /// Prepare a new evaluator for a performance on the given timeline.
    pub fn new(settings: ClearConditionSettings, timeline: Timeline<'_>) -> Self {
        Self {
            checkpoints: Checkpoints::new(timeline),
            cursor: ObjectCursor::new(timeline.hit_objects.len()),
            accuracy: AccuracyTracker::new(),
            imperfect: ImperfectTracker::new(settings.imperfect_enabled()),
            failed: None,
            settings,
        }
    }

    /// Process the next judgement and check the conditions if its object is
    /// a checkpoint.
    ///
    /// `health` is the current health in `[0, 1]`.
    ///
    /// Returns an error if `result` does not belong to the next object of
    /// the timeline, in which case nothing is processed.
    pub fn on_judgement(
        &mut self,
        result: &JudgementResult,
        health: f64,
    ) -> Result<Verdict, JudgementError> {
        if let Some(reason) = self.failed {
            return Ok(Verdict::Fail(reason));
        }

        self.cursor.advance(result.object_idx)?;
        self.accuracy.accumulate(result);
        self.imperfect.observe(result);

        let interval = self.settings.get_check_interval();

        if !self.checkpoints.is_checkpoint(result.object_idx, interval) {
            return Ok(Verdict::Continue);
        }

        let verdict = self.check(health);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            object = result.object_idx,
            health,
            accuracy = self.accuracy.accuracy(),
            imperfect = self.imperfect.count(),
            ?verdict,
            "checked clear condition",
        );

        if let Verdict::Fail(reason) = verdict {
            #[cfg(feature = "tracing")]
            tracing::debug!(object = result.object_idx, ?reason, "clear condition failed");

            self.failed = Some(reason);
        }

        Ok(verdict)
    }

    fn check(&self, health: f64) -> Verdict {
        if self.settings.health_violated(health) {
            Verdict::Fail(FailReason::Health)
        } else if self.settings.accuracy_violated(self.accuracy.accuracy()) {
            Verdict::Fail(FailReason::Accuracy)
        } else if self.settings.imperfect_violated(self.imperfect.count()) {
            Verdict::Fail(FailReason::ImperfectJudgements)
        } else {
            Verdict::Continue
        }
    }

    /// The current accuracy in `[0, 1]`.
    pub fn accuracy(&self) -> f64 {
        self.accuracy.accuracy()
    }

    /// The amount of imperfect judgements so far.
    ///
    /// Always zero if imperfect judgements are not limited.
    pub const fn imperfect_count(&self) -> u32 {
        self.imperfect.count()
    }

    /// The amount of judgements processed so far.
    pub const fn passed_objects(&self) -> usize {
        self.cursor.passed()
    }

    /// Whether the performance failed.
    pub const fn is_failed(&self) -> bool {
        self.failed.is_some()
    }

    pub const fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    pub const fn settings(&self) -> &ClearConditionSettings {
        &self.settings
    }
}

impl FailCondition for ClearConditionEvaluator {
    fn on_judgement(
        &mut self,
        result: &JudgementResult,
        health: f64,
    ) -> Result<Verdict, JudgementError> {
        ClearConditionEvaluator::on_judgement(self, result, health)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{
        condition::CheckInterval,
        model::{
            beatmap::BreakPeriod,
            hit_object::{HitObject, HitObjectKind, Pos},
            hit_result::HitResult,
            judgement::Judgement,
        },
    };

    use super::*;

    fn circles(n: usize) -> Vec<HitObject> {
        (0..n)
            .map(|i| HitObject {
                pos: Pos::new(256.0, 192.0),
                start_time: i as f64 * 100.0,
                kind: HitObjectKind::Circle,
            })
            .collect()
    }

    fn result(idx: usize, result: HitResult) -> JudgementResult {
        JudgementResult::new(idx, Judgement::default(), result)
    }

    #[test]
    fn fresh_evaluator() {
        let hit_objects = circles(3);
        let evaluator =
            ClearConditionEvaluator::new(ClearConditionSettings::new(), Timeline::new(&hit_objects, &[]));

        assert_eq!(evaluator.accuracy(), 1.0);
        assert_eq!(evaluator.imperfect_count(), 0);
        assert_eq!(evaluator.passed_objects(), 0);
        assert!(!evaluator.is_failed());
    }

    #[test]
    fn accuracy_drops_below_minimum() {
        let hit_objects = circles(12);
        let settings = ClearConditionSettings::new().min_accuracy(90.0);
        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &[]));

        for i in 0..10 {
            let verdict = evaluator.on_judgement(&result(i, HitResult::Great), 1.0).unwrap();
            assert_eq!(verdict, Verdict::Continue);
            assert_eq!(evaluator.accuracy(), 1.0);
        }

        // 3000 / 3300 is still above 90%
        let verdict = evaluator.on_judgement(&result(10, HitResult::Miss), 1.0).unwrap();
        assert_eq!(verdict, Verdict::Continue);

        // 3000 / 3600 is not
        let verdict = evaluator.on_judgement(&result(11, HitResult::Miss), 1.0).unwrap();
        assert_eq!(verdict, Verdict::Fail(FailReason::Accuracy));
        assert!(evaluator.is_failed());
    }

    #[test]
    fn single_miss_fails_strict_minimum() {
        let hit_objects = circles(11);
        let settings = ClearConditionSettings::new().min_accuracy(91.0);
        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &[]));

        for i in 0..10 {
            let verdict = evaluator.on_judgement(&result(i, HitResult::Great), 1.0).unwrap();
            assert_eq!(verdict, Verdict::Continue);
        }

        let verdict = evaluator.on_judgement(&result(10, HitResult::Miss), 1.0).unwrap();
        assert_eq!(verdict.fail_reason(), Some(FailReason::Accuracy));
    }

    #[test]
    fn health_floor_is_exclusive() {
        let hit_objects = circles(2);
        let settings = ClearConditionSettings::new().min_health(50.0);
        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &[]));

        let verdict = evaluator.on_judgement(&result(0, HitResult::Great), 0.5).unwrap();
        assert_eq!(verdict, Verdict::Continue);

        let verdict = evaluator.on_judgement(&result(1, HitResult::Great), 0.4999).unwrap();
        assert_eq!(verdict, Verdict::Fail(FailReason::Health));
    }

    #[test]
    fn inexact_floors_pass() {
        let hit_objects = circles(100);
        let settings = ClearConditionSettings::new()
            .check_interval(CheckInterval::AtEnd)
            .min_health(57.0)
            .min_accuracy(57.0);

        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &[]));

        // 17100 / 30000 is exactly 57%
        for i in 0..100 {
            let hit_result = if i < 57 { HitResult::Great } else { HitResult::Miss };
            let verdict = evaluator.on_judgement(&result(i, hit_result), 0.57).unwrap();
            assert_eq!(verdict, Verdict::Continue);
        }

        let settings = ClearConditionSettings::new().min_health(29.0);
        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &[]));

        let verdict = evaluator.on_judgement(&result(0, HitResult::Great), 0.29).unwrap();
        assert_eq!(verdict, Verdict::Continue);

        let verdict = evaluator.on_judgement(&result(1, HitResult::Great), 0.289).unwrap();
        assert_eq!(verdict, Verdict::Fail(FailReason::Health));
    }

    #[test]
    fn imperfect_ceiling() {
        let hit_objects = circles(4);
        let settings = ClearConditionSettings::new().max_imperfect_judgements(Some(2));
        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &[]));

        for i in 0..2 {
            let verdict = evaluator.on_judgement(&result(i, HitResult::Ok), 1.0).unwrap();
            assert_eq!(verdict, Verdict::Continue);
        }

        assert_eq!(evaluator.imperfect_count(), 2);

        let verdict = evaluator.on_judgement(&result(2, HitResult::Meh), 1.0).unwrap();
        assert_eq!(verdict, Verdict::Fail(FailReason::ImperfectJudgements));
        assert_eq!(evaluator.imperfect_count(), 3);
    }

    #[test]
    fn zero_ceiling_fails_on_first_imperfect() {
        let hit_objects = circles(2);
        let settings = ClearConditionSettings::new().max_imperfect_judgements(Some(0));
        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &[]));

        let verdict = evaluator.on_judgement(&result(0, HitResult::Great), 1.0).unwrap();
        assert_eq!(verdict, Verdict::Continue);

        let verdict = evaluator.on_judgement(&result(1, HitResult::Good), 1.0).unwrap();
        assert!(verdict.is_fail());
    }

    #[test]
    fn at_end_only_checks_last_object() {
        let hit_objects = circles(5);
        let settings = ClearConditionSettings::new()
            .check_interval(CheckInterval::AtEnd)
            .min_health(50.0)
            .min_accuracy(100.0);

        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &[]));

        for i in 0..4 {
            let verdict = evaluator.on_judgement(&result(i, HitResult::Miss), 0.0).unwrap();
            assert_eq!(verdict, Verdict::Continue);
        }

        let verdict = evaluator.on_judgement(&result(4, HitResult::Great), 1.0).unwrap();
        assert_eq!(verdict, Verdict::Fail(FailReason::Accuracy));
    }

    #[test]
    fn at_break_accumulates_between_checkpoints() {
        let hit_objects = circles(4);

        // Between the objects at 100 and 200
        let breaks = [BreakPeriod {
            start_time: 120.0,
            end_time: 180.0,
        }];

        let settings = ClearConditionSettings::new()
            .check_interval(CheckInterval::AtBreak)
            .min_accuracy(60.0);

        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &breaks));

        let verdict = evaluator.on_judgement(&result(0, HitResult::Miss), 1.0).unwrap();
        assert_eq!(verdict, Verdict::Continue);

        // 300 / 600 at the checkpoint
        let verdict = evaluator.on_judgement(&result(1, HitResult::Great), 1.0).unwrap();
        assert_eq!(verdict, Verdict::Fail(FailReason::Accuracy));
    }

    #[test]
    fn first_violated_condition_is_reported() {
        let hit_objects = circles(1);
        let settings = ClearConditionSettings::new()
            .min_health(50.0)
            .min_accuracy(50.0)
            .max_imperfect_judgements(Some(0));

        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &[]));

        let verdict = evaluator.on_judgement(&result(0, HitResult::Miss), 0.0).unwrap();
        assert_eq!(verdict, Verdict::Fail(FailReason::Health));
    }

    #[test]
    fn failure_is_sticky() {
        let hit_objects = circles(3);
        let settings = ClearConditionSettings::new().min_health(50.0);
        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&hit_objects, &[]));

        let verdict = evaluator.on_judgement(&result(0, HitResult::Great), 0.1).unwrap();
        assert_eq!(verdict, Verdict::Fail(FailReason::Health));

        let verdict = evaluator.on_judgement(&result(1, HitResult::Great), 1.0).unwrap();
        assert_eq!(verdict, Verdict::Fail(FailReason::Health));
        assert_eq!(evaluator.passed_objects(), 1);
    }

    #[test]
    fn bad_order_leaves_state_untouched() {
        let hit_objects = circles(3);
        let mut evaluator =
            ClearConditionEvaluator::new(ClearConditionSettings::new(), Timeline::new(&hit_objects, &[]));

        let err = evaluator.on_judgement(&result(1, HitResult::Miss), 1.0).unwrap_err();
        assert_eq!(err, JudgementError::OutOfOrder { idx: 1, expected: 0 });
        assert_eq!(evaluator.accuracy(), 1.0);
        assert_eq!(evaluator.passed_objects(), 0);

        let err = evaluator.on_judgement(&result(7, HitResult::Miss), 1.0).unwrap_err();
        assert_eq!(err, JudgementError::UnknownObject { idx: 7, len: 3 });
    }

    #[test]
    fn empty_timeline_never_fails_at_end() {
        let settings = ClearConditionSettings::new()
            .check_interval(CheckInterval::AtEnd)
            .min_accuracy(100.0);

        let mut evaluator = ClearConditionEvaluator::new(settings, Timeline::new(&[], &[]));

        assert_eq!(evaluator.checkpoints().terminal(), None);
        assert!(evaluator.on_judgement(&result(0, HitResult::Miss), 0.0).is_err());
        assert!(!evaluator.is_failed());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn disabled_imperfect_never_fails(
            results in prop::collection::vec(
                prop::sample::select(vec![HitResult::Miss, HitResult::Meh, HitResult::Ok, HitResult::Good]),
                1..100,
            ),
        ) {
            let hit_objects = circles(results.len());
            let mut evaluator = ClearConditionEvaluator::new(
                ClearConditionSettings::new(),
                Timeline::new(&hit_objects, &[]),
            );

            for (i, &hit_result) in results.iter().enumerate() {
                let verdict = evaluator.on_judgement(&result(i, hit_result), 1.0).unwrap();
                prop_assert_eq!(verdict, Verdict::Continue);
            }

            prop_assert_eq!(evaluator.imperfect_count(), 0);
        }
    }
}
