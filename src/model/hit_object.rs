use rosu_map::section::{
    general::GameMode,
    hit_objects::{BorrowedCurve, CurveBuffers},
};

pub use rosu_map::{
    section::hit_objects::{PathControlPoint, PathType},
    util::Pos,
};

/// A hit object of a beatmap's timeline.
///
/// Only the data needed to place the object on the timeline is kept.
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: HitObjectKind,
}

impl HitObject {
    /// Whether the hitobject is a circle.
    pub const fn is_circle(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Circle)
    }

    /// Whether the hitobject is a slider.
    pub const fn is_slider(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Slider(_))
    }

    /// Whether the hitobject is a spinner.
    pub const fn is_spinner(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Spinner(_))
    }

    /// Whether the hitobject is a hold note.
    pub const fn is_hold_note(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Hold(_))
    }

    /// The end time of the object.
    ///
    /// Circles end at their start time.
    pub const fn end_time(&self) -> f64 {
        match &self.kind {
            HitObjectKind::Circle => self.start_time,
            HitObjectKind::Slider(Slider { end_time, .. })
            | HitObjectKind::Spinner(Spinner { end_time })
            | HitObjectKind::Hold(HoldNote { end_time }) => *end_time,
        }
    }

    /// Time between start and end of the object.
    pub fn duration(&self) -> f64 {
        self.end_time() - self.start_time
    }
}

/// Additional data for a [`HitObject`].
#[derive(Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    Circle,
    Slider(Slider),
    Spinner(Spinner),
    Hold(HoldNote),
}

/// A slider.
#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    pub expected_dist: Option<f64>,
    pub repeats: usize,
    pub control_points: Box<[PathControlPoint]>,
    /// Calculated while decoding from the path length and the active
    /// control points.
    pub end_time: f64,
}

impl Slider {
    /// The amount of spans of the slider.
    pub const fn span_count(&self) -> usize {
        self.repeats + 1
    }

    pub(crate) fn curve<'a>(
        &self,
        mode: GameMode,
        bufs: &'a mut CurveBuffers,
    ) -> BorrowedCurve<'a> {
        BorrowedCurve::new(mode, &self.control_points, self.expected_dist, bufs)
    }
}

/// A spinner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spinner {
    pub end_time: f64,
}

/// A hold note.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HoldNote {
    pub end_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_times() {
        let circle = HitObject {
            pos: Pos::new(0.0, 0.0),
            start_time: 100.0,
            kind: HitObjectKind::Circle,
        };

        assert!(circle.is_circle());
        assert_eq!(circle.end_time(), 100.0);
        assert_eq!(circle.duration(), 0.0);

        let hold = HitObject {
            pos: Pos::new(64.0, 192.0),
            start_time: 100.0,
            kind: HitObjectKind::Hold(HoldNote { end_time: 350.0 }),
        };

        assert!(hold.is_hold_note());
        assert_eq!(hold.end_time(), 350.0);
        assert_eq!(hold.duration(), 250.0);
    }
}
