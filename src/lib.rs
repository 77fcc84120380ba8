//! Library to decide whether a performance on an [osu!] beatmap fails a clear
//! condition.
//!
//! ## Description
//!
//! A clear condition consists of a minimum health, a minimum accuracy, and a
//! maximum amount of imperfect judgements. While a performance is being
//! played, every judgement is passed to an evaluator which keeps track of the
//! running accuracy and imperfect judgements. Depending on the
//! [`CheckInterval`], the thresholds are checked after every judgement, only
//! at the last object before each break, or only at the last object.
//!
//! Additionally, a [`JudgementChallengeEvaluator`] limits how often each
//! [`HitResult`] may occur.
//!
//! ## Usage
//!
//! ```
//! use rosu_clear::{
//!     condition::{CheckInterval, ClearConditionSettings},
//!     model::{
//!         hit_result::HitResult,
//!         judgement::{Judgement, JudgementResult},
//!     },
//!     Beatmap,
//! };
//!
//! // Decode the map
//! let bytes = std::fs::read("./resources/breaks.osu").unwrap();
//! let map = Beatmap::from_bytes(&bytes).unwrap();
//!
//! // Check for at least 95% accuracy whenever a break starts
//! let settings = ClearConditionSettings::new()
//!     .check_interval(CheckInterval::AtBreak)
//!     .min_accuracy(95.0);
//!
//! let mut condition = map.clear_condition(settings);
//! let judgement = Judgement::for_mode(map.mode);
//!
//! // Feed each judgement alongside the current health
//! for (i, result) in [HitResult::Great, HitResult::Great, HitResult::Ok].into_iter().enumerate() {
//!     let verdict = condition.on_judgement(&JudgementResult::new(i, judgement, result), 1.0).unwrap();
//!
//!     // The third object precedes a break so its judgement is checked.
//!     assert_eq!(verdict.is_fail(), i == 2);
//! }
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `async_tokio` | Beatmap decoding through a path will be async through tokio | [`tokio`]
//! | `async_std` | Beatmap decoding through a path will be async through async-std | [`async-std`]
//! | `serde` | Settings can be (de)serialized | [`serde`]
//! | `tracing` | Decoding errors and failed conditions are logged through `tracing`. | [`tracing`]
//!
//! [osu!]: https://osu.ppy.sh/home
//! [`CheckInterval`]: condition::CheckInterval
//! [`JudgementChallengeEvaluator`]: condition::JudgementChallengeEvaluator
//! [`HitResult`]: model::hit_result::HitResult
//! [`tokio`]: https://docs.rs/tokio
//! [`async-std`]: https://docs.rs/async-std
//! [`serde`]: https://docs.rs/serde
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[doc(inline)]
pub use self::{
    condition::{
        ApplyToTimeline, ClearConditionEvaluator, ClearConditionSettings, FailCondition,
        FailReason, Verdict,
    },
    model::beatmap::Beatmap,
};

/// Clear conditions and their evaluation throughout a performance.
pub mod condition;

/// Types used in and around this crate.
pub mod model;
