use std::{io, path::Path, str::FromStr};

use rosu_map::{section::general::GameMode, LATEST_FORMAT_VERSION};

pub use rosu_map::section::events::BreakPeriod;

use crate::condition::{
    ClearConditionEvaluator, ClearConditionSettings, JudgementChallengeEvaluator,
    JudgementChallengeSettings, Timeline,
};

pub use self::decode::{BeatmapState, ParseBeatmapError};

use super::{
    control_point::{DifficultyPoint, TimingPoint},
    hit_object::HitObject,
};

mod decode;

/// All beatmap data that is relevant for clear condition evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Beatmap {
    pub version: i32,

    // General
    pub mode: GameMode,

    // Difficulty
    pub slider_multiplier: f64,

    // Events
    pub breaks: Vec<BreakPeriod>,

    // TimingPoints
    pub timing_points: Vec<TimingPoint>,
    pub difficulty_points: Vec<DifficultyPoint>,

    // HitObjects
    pub hit_objects: Vec<HitObject>,
}

impl Beatmap {
    /// Parse a [`Beatmap`] by providing a path to a `.osu` file.
    #[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        rosu_map::from_path(path)
    }

    /// Parse a [`Beatmap`] by providing a path to a `.osu` file.
    #[cfg(feature = "async_tokio")]
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let bytes = tokio::fs::read(path).await?;

        Self::from_bytes(&bytes)
    }

    /// Parse a [`Beatmap`] by providing a path to a `.osu` file.
    #[cfg(all(feature = "async_std", not(feature = "async_tokio")))]
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let path: async_std::path::PathBuf = path.as_ref().to_path_buf().into();
        let bytes = async_std::fs::read(path).await?;

        Self::from_bytes(&bytes)
    }

    /// Parse a [`Beatmap`] by providing the content of a `.osu` file as a
    /// slice of bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, io::Error> {
        rosu_map::from_bytes(bytes)
    }

    /// The hit objects and breaks of this [`Beatmap`].
    pub fn timeline(&self) -> Timeline<'_> {
        Timeline::new(&self.hit_objects, &self.breaks)
    }

    /// Create a [`ClearConditionEvaluator`] for a performance on this
    /// [`Beatmap`].
    pub fn clear_condition(&self, settings: ClearConditionSettings) -> ClearConditionEvaluator {
        ClearConditionEvaluator::new(settings, self.timeline())
    }

    /// Create a [`JudgementChallengeEvaluator`] for a performance on this
    /// [`Beatmap`].
    pub fn judgement_challenge(
        &self,
        settings: JudgementChallengeSettings,
    ) -> JudgementChallengeEvaluator {
        JudgementChallengeEvaluator::new(settings, self.timeline())
    }

    /// Sum up the duration of all breaks (in milliseconds).
    pub fn total_break_time(&self) -> f64 {
        self.breaks.iter().map(BreakPeriod::duration).sum()
    }
}

impl FromStr for Beatmap {
    type Err = io::Error;

    /// Parse a [`Beatmap`] by providing the content of a `.osu` file as a
    /// string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        rosu_map::from_str(s)
    }
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            version: LATEST_FORMAT_VERSION,
            mode: GameMode::default(),
            slider_multiplier: 1.4,
            breaks: Vec::default(),
            timing_points: Vec::default(),
            difficulty_points: Vec::default(),
            hit_objects: Vec::default(),
        }
    }
}
