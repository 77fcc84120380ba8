/// A control point that changes the slider velocity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DifficultyPoint {
    pub time: f64,
    pub slider_velocity: f64,
}

impl DifficultyPoint {
    pub const DEFAULT_SLIDER_VELOCITY: f64 = 1.0;

    /// Create a new [`DifficultyPoint`] from a timing line's raw beat length.
    ///
    /// Negative beat lengths encode the slider velocity as inverse
    /// percentage.
    pub fn new(time: f64, beat_len: f64) -> Self {
        let slider_velocity = if beat_len < 0.0 {
            100.0 / -beat_len
        } else {
            Self::DEFAULT_SLIDER_VELOCITY
        };

        Self {
            time,
            slider_velocity: slider_velocity.clamp(0.1, 10.0),
        }
    }

    /// Whether the point would not change anything after `existing`.
    pub fn is_redundant(&self, existing: &Self) -> bool {
        (self.slider_velocity - existing.slider_velocity).abs() < f64::EPSILON
    }
}

impl Default for DifficultyPoint {
    fn default() -> Self {
        Self {
            time: 0.0,
            slider_velocity: Self::DEFAULT_SLIDER_VELOCITY,
        }
    }
}

/// The [`DifficultyPoint`] active at `time`.
///
/// Unlike timing points, objects before the first difficulty point have
/// none.
pub fn difficulty_point_at(points: &[DifficultyPoint], time: f64) -> Option<&DifficultyPoint> {
    points
        .binary_search_by(|probe| probe.time.total_cmp(&time))
        .map_or_else(|i| i.checked_sub(1), Some)
        .map(|i| &points[i])
}
