use crate::model::{beatmap::BreakPeriod, hit_object::HitObject};

use super::CheckInterval;

/// The hit objects and breaks of a beatmap.
#[derive(Copy, Clone, Debug)]
pub struct Timeline<'a> {
    /// Hit objects sorted by start time.
    pub hit_objects: &'a [HitObject],
    pub breaks: &'a [BreakPeriod],
}

impl<'a> Timeline<'a> {
    pub const fn new(hit_objects: &'a [HitObject], breaks: &'a [BreakPeriod]) -> Self {
        Self {
            hit_objects,
            breaks,
        }
    }

    /// Whether `time` lies within any break.
    ///
    /// Breaks include their start but not their end.
    pub fn in_break(&self, time: f64) -> bool {
        self.breaks
            .iter()
            .any(|b| b.start_time <= time && time < b.end_time)
    }
}

/// The hit objects after which clear conditions may be checked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checkpoints {
    at_break: Vec<bool>,
    terminal: Option<usize>,
}

impl Checkpoints {
    /// Find the objects preceding a break as well as the last object.
    ///
    /// An object precedes a break if the time halfway between its end and the
    /// next object's end lies within a break.
    pub fn new(timeline: Timeline<'_>) -> Self {
        let hit_objects = timeline.hit_objects;

        let mut at_break: Vec<_> = hit_objects
            .windows(2)
            .map(|pair| timeline.in_break((pair[0].end_time() + pair[1].end_time()) / 2.0))
            .collect();

        if !hit_objects.is_empty() {
            at_break.push(false);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            objects = hit_objects.len(),
            breaks = timeline.breaks.len(),
            checkpoints = at_break.iter().filter(|&&b| b).count(),
            "prepared break checkpoints",
        );

        Self {
            at_break,
            terminal: hit_objects.len().checked_sub(1),
        }
    }

    /// Whether the object at index `idx` is followed by a break.
    pub fn is_break_checkpoint(&self, idx: usize) -> bool {
        self.at_break.get(idx).copied().unwrap_or(false)
    }

    /// Index of the last object, if there are any.
    pub const fn terminal(&self) -> Option<usize> {
        self.terminal
    }

    /// Indices of all objects that are followed by a break.
    pub fn break_checkpoints(&self) -> impl Iterator<Item = usize> + '_ {
        self.at_break
            .iter()
            .enumerate()
            .filter_map(|(i, &at_break)| at_break.then_some(i))
    }

    /// Whether the object at index `idx` is a checkpoint for the given
    /// interval.
    pub fn is_checkpoint(&self, idx: usize, interval: CheckInterval) -> bool {
        match interval {
            CheckInterval::Continuous => true,
            CheckInterval::AtBreak => self.is_break_checkpoint(idx),
            CheckInterval::AtEnd => self.terminal == Some(idx),
        }
    }
}

/// Ways in which the order of judgements can be violated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum JudgementError {
    #[error("judged object {idx} but the beatmap only has {len} objects")]
    UnknownObject { idx: usize, len: usize },
    #[error("judged object {idx} but expected object {expected}")]
    OutOfOrder { idx: usize, expected: usize },
}

/// Keeps track of which object is to be judged next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ObjectCursor {
    next: usize,
    len: usize,
}

impl ObjectCursor {
    pub(crate) const fn new(len: usize) -> Self {
        Self { next: 0, len }
    }

    /// Move past the object at `idx` if it is the next one.
    pub(crate) fn advance(&mut self, idx: usize) -> Result<(), JudgementError> {
        if idx >= self.len {
            return Err(JudgementError::UnknownObject { idx, len: self.len });
        } else if idx != self.next {
            return Err(JudgementError::OutOfOrder {
                idx,
                expected: self.next,
            });
        }

        self.next += 1;

        Ok(())
    }

    /// Amount of objects judged so far.
    pub(crate) const fn passed(&self) -> usize {
        self.next
    }
}
