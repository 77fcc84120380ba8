use rosu_map::section::general::GameMode;

use super::hit_result::HitResult;

/// Describes the best and worst outcome of judging a hit object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Judgement {
    pub max_result: HitResult,
}

impl Judgement {
    /// Create a new [`Judgement`] with the given maximum result.
    pub const fn new(max_result: HitResult) -> Self {
        Self { max_result }
    }

    /// The judgement of a basic object in the given mode.
    ///
    /// osu!mania's notes may be judged as [`HitResult::Perfect`], all other
    /// modes top out at [`HitResult::Great`].
    pub const fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Mania => Self::new(HitResult::Perfect),
            GameMode::Osu | GameMode::Taiko | GameMode::Catch => Self::new(HitResult::Great),
        }
    }

    /// The judgement of a tick that affects combo.
    pub const fn large_tick() -> Self {
        Self::new(HitResult::LargeTickHit)
    }

    /// The judgement of a tick that does not affect combo.
    pub const fn small_tick() -> Self {
        Self::new(HitResult::SmallTickHit)
    }

    /// The worst possible result for this judgement.
    pub const fn min_result(&self) -> HitResult {
        match self.max_result {
            HitResult::SmallTickHit => HitResult::SmallTickMiss,
            HitResult::LargeTickHit => HitResult::LargeTickMiss,
            HitResult::SmallBonus | HitResult::LargeBonus | HitResult::IgnoreHit => {
                HitResult::IgnoreMiss
            }
            _ => HitResult::Miss,
        }
    }

    /// The numeric score of the best possible result.
    pub const fn max_numeric_result(&self) -> u32 {
        self.max_result.base_score()
    }
}

impl Default for Judgement {
    fn default() -> Self {
        Self::new(HitResult::Great)
    }
}

/// The outcome of judging a single hit object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct JudgementResult {
    /// Index of the judged object within the beatmap's hit objects.
    pub object_idx: usize,
    pub judgement: Judgement,
    pub result: HitResult,
}

impl JudgementResult {
    pub const fn new(object_idx: usize, judgement: Judgement, result: HitResult) -> Self {
        Self {
            object_idx,
            judgement,
            result,
        }
    }

    /// The numeric score that was achieved.
    pub const fn numeric_result(&self) -> u32 {
        if self.result.is_hit() {
            self.result.base_score()
        } else {
            0
        }
    }

    /// Whether the best possible result was achieved.
    pub fn is_max(&self) -> bool {
        self.result == self.judgement.max_result
    }
}
