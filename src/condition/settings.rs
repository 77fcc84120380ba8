use super::{ApplyToTimeline, ClearConditionEvaluator, Timeline};

/// When the clear conditions are checked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckInterval {
    /// After every judgement.
    #[default]
    Continuous,
    /// After the last object before each break.
    AtBreak,
    /// After the last object of the beatmap.
    AtEnd,
}

/// Thresholds of a clear condition.
///
/// Percentages are given in `[0, 100]`, values outside are clamped. This
/// also applies when deserializing.
///
/// # Example
///
/// ```
/// use rosu_clear::condition::{CheckInterval, ClearConditionSettings};
///
/// let settings = ClearConditionSettings::new()
///     .check_interval(CheckInterval::AtBreak)
///     .min_accuracy(95.0)
///     .min_health(20.0)
///     .max_imperfect_judgements(Some(10));
///
/// assert_eq!(settings.get_max_imperfect_judgements(), Some(10));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ClearConditionSettings {
    check_interval: CheckInterval,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_percentage"))]
    min_accuracy: f64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_percentage"))]
    min_health: f64,
    max_imperfect: Option<u32>,
}

impl ClearConditionSettings {
    /// Create new settings that never fail a performance.
    pub const fn new() -> Self {
        Self {
            check_interval: CheckInterval::Continuous,
            min_accuracy: 0.0,
            min_health: 0.0,
            max_imperfect: None,
        }
    }

    /// Specify when conditions are checked.
    pub const fn check_interval(mut self, check_interval: CheckInterval) -> Self {
        self.check_interval = check_interval;

        self
    }

    /// Fail if the accuracy goes under this value, e.g. `98.5` for 98.5%.
    pub fn min_accuracy(mut self, min_accuracy: f64) -> Self {
        self.min_accuracy = min_accuracy.clamp(0.0, 100.0);

        self
    }

    /// Fail if the health goes under this value, e.g. `50.0` for half health.
    pub fn min_health(mut self, min_health: f64) -> Self {
        self.min_health = min_health.clamp(0.0, 100.0);

        self
    }

    /// Fail if the amount of imperfect judgements goes above this value.
    ///
    /// `None` disables the condition.
    pub const fn max_imperfect_judgements(mut self, max: Option<u32>) -> Self {
        self.max_imperfect = max;

        self
    }

    /// Specify the imperfect judgement limit through a separate toggle as
    /// stored by older settings.
    pub const fn legacy_imperfect_judgements(self, enabled: bool, max: u32) -> Self {
        if enabled {
            self.max_imperfect_judgements(Some(max))
        } else {
            self.max_imperfect_judgements(None)
        }
    }

    pub const fn get_check_interval(&self) -> CheckInterval {
        self.check_interval
    }

    pub const fn get_min_accuracy(&self) -> f64 {
        self.min_accuracy
    }

    pub const fn get_min_health(&self) -> f64 {
        self.min_health
    }

    pub const fn get_max_imperfect_judgements(&self) -> Option<u32> {
        self.max_imperfect
    }

    /// Whether imperfect judgements are limited.
    pub const fn imperfect_enabled(&self) -> bool {
        self.max_imperfect.is_some()
    }

    // Values on the floor pass, which `value * 100.0` would not guarantee
    pub(crate) fn health_violated(&self, health: f64) -> bool {
        health < self.min_health / 100.0
    }

    pub(crate) fn accuracy_violated(&self, accuracy: f64) -> bool {
        accuracy < self.min_accuracy / 100.0
    }

    pub(crate) fn imperfect_violated(&self, count: u32) -> bool {
        self.max_imperfect.is_some_and(|max| count > max)
    }
}

#[cfg(feature = "serde")]
fn deserialize_percentage<'de, D: serde::Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    <f64 as serde::Deserialize>::deserialize(d).map(|value| value.clamp(0.0, 100.0))
}

impl ApplyToTimeline for ClearConditionSettings {
    type Condition = ClearConditionEvaluator;

    fn apply_to_timeline(self, timeline: Timeline<'_>) -> Self::Condition {
        ClearConditionEvaluator::new(self, timeline)
    }
}
