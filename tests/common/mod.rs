#![allow(unused)]

use rosu_clear::{
    model::{
        hit_result::HitResult,
        judgement::{Judgement, JudgementResult},
    },
    Beatmap,
};

pub use self::paths::*;

/// Paths to .osu files
mod paths {
    pub const BREAKS: &str = "./resources/breaks.osu";
    pub const HOLDS: &str = "./resources/holds.osu";
}

#[macro_export]
#[rustfmt::skip]
macro_rules! test_map {
    ($path:expr) => {{
        #[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
        { rosu_clear::Beatmap::from_path($path).unwrap() }
        #[cfg(any(feature = "async_tokio", feature = "async_std"))]
        { rosu_clear::Beatmap::from_path($path).await.unwrap() }
    }};
}

/// Decode a map independent of the async features.
pub fn test_map(path: &str) -> Beatmap {
    let bytes = std::fs::read(path).unwrap();

    Beatmap::from_bytes(&bytes).unwrap()
}

/// Judgement results for consecutive objects, starting at the first one.
pub fn judgements(
    judgement: Judgement,
    results: &[HitResult],
) -> impl Iterator<Item = JudgementResult> + '_ {
    results
        .iter()
        .enumerate()
        .map(move |(i, &result)| JudgementResult::new(i, judgement, result))
}

#[track_caller]
pub fn assert_eq_float<F: Float>(a: F, b: F) {
    assert!((a - b).abs() < F::EPSILON, "{a} != {b}")
}

/// Trait to provide flexibility in the `assert_eq_float` function.
pub trait Float:
    Copy + std::fmt::Display + std::ops::Sub<Output = Self> + PartialOrd + Sized
{
    const EPSILON: Self;

    fn abs(self) -> Self;
}

macro_rules! impl_float {
    ( $( $ty:ty )* ) => {
        $(
            impl Float for $ty {
                const EPSILON: Self = Self::EPSILON;

                fn abs(self) -> Self {
                    self.abs()
                }
            }
        )*
    }
}

impl_float!(f32 f64);
