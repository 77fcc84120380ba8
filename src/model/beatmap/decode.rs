use rosu_map::{
    section::{
        difficulty::{Difficulty, DifficultyState, ParseDifficultyError},
        events::{BreakPeriod, EventType, ParseEventTypeError},
        general::{GameMode, GeneralKey, ParseGameModeError},
        hit_objects::{
            CurveBuffers, HitObjectType, ParseHitObjectTypeError, PathControlPoint, PathType,
        },
    },
    util::{KeyValue, ParseNumber, ParseNumberError, Pos, StrExt, MAX_PARSE_VALUE},
    DecodeBeatmap, DecodeState,
};

use crate::model::{
    control_point::{difficulty_point_at, timing_point_at, DifficultyPoint, TimingPoint},
    hit_object::{HitObject, HitObjectKind, HoldNote, Slider, Spinner},
};

use super::Beatmap;

/// The state of a [`Beatmap`] for [`DecodeBeatmap`].
pub struct BeatmapState {
    version: i32,
    mode: GameMode,
    difficulty: DifficultyState,
    breaks: Vec<BreakPeriod>,
    timing_points: Vec<TimingPoint>,
    difficulty_points: Vec<DifficultyPoint>,
    hit_objects: Vec<HitObject>,

    pending_control_points_time: f64,
    pending_timing_point: Option<TimingPoint>,
    pending_difficulty_point: Option<DifficultyPoint>,

    curve_points: Vec<PathControlPoint>,
    vertices: Vec<PathControlPoint>,
}

impl BeatmapState {
    fn add_pending_point<P: Pending>(&mut self, time: f64, point: P, timing_change: bool) {
        if (time - self.pending_control_points_time).abs() >= f64::EPSILON {
            self.flush_pending_points();
        }

        if timing_change {
            point.push_front(self);
        } else {
            point.push_back(self);
        }

        self.pending_control_points_time = time;
    }

    fn flush_pending_points(&mut self) {
        if let Some(point) = self.pending_timing_point.take() {
            self.add_timing_point(point);
        }

        if let Some(point) = self.pending_difficulty_point.take() {
            self.add_difficulty_point(point);
        }
    }

    fn add_timing_point(&mut self, point: TimingPoint) {
        match self
            .timing_points
            .binary_search_by(|probe| probe.time.total_cmp(&point.time))
        {
            Err(i) => self.timing_points.insert(i, point),
            Ok(i) => self.timing_points[i] = point,
        }
    }

    fn add_difficulty_point(&mut self, point: DifficultyPoint) {
        let redundant = match difficulty_point_at(&self.difficulty_points, point.time) {
            Some(existing) => point.is_redundant(existing),
            None => point.is_redundant(&DifficultyPoint::default()),
        };

        if redundant {
            return;
        }

        match self
            .difficulty_points
            .binary_search_by(|probe| probe.time.total_cmp(&point.time))
        {
            Err(i) => self.difficulty_points.insert(i, point),
            Ok(i) => self.difficulty_points[i] = point,
        }
    }

    /// Converts a slider's `|`-separated point string into control points
    /// relative to the slider's position.
    ///
    /// Each letter starts a new segment whose path type applies until the
    /// next letter.
    fn convert_path_str(&mut self, point_str: &str, offset: Pos) -> Result<(), ParseBeatmapError> {
        let point_split: Vec<&str> = point_str.split('|').collect();

        let mut start_idx = 0;
        let mut first = true;

        for end_idx in 1..point_split.len() {
            let is_letter = point_split[end_idx]
                .chars()
                .next()
                .ok_or(ParseBeatmapError::InvalidHitObjectLine)?
                .is_ascii_alphabetic();

            if !is_letter {
                continue;
            }

            let end_point = point_split.get(end_idx + 1).copied();
            self.convert_points(&point_split[start_idx..end_idx], end_point, first, offset)?;

            start_idx = end_idx;
            first = false;
        }

        if point_split.len() > start_idx {
            self.convert_points(&point_split[start_idx..], None, first, offset)?;
        }

        Ok(())
    }

    fn convert_points(
        &mut self,
        points: &[&str],
        end_point: Option<&str>,
        first: bool,
        offset: Pos,
    ) -> Result<(), ParseBeatmapError> {
        fn read_point(value: &str, start_pos: Pos) -> Result<PathControlPoint, ParseBeatmapError> {
            let mut v = value
                .split(':')
                .map(|s| s.parse_with_limits(f64::from(MAX_COORDINATE_VALUE)));

            let (x, y) = v
                .next()
                .zip(v.next())
                .ok_or(ParseBeatmapError::InvalidHitObjectLine)?;

            let pos = Pos::new(x? as i32 as f32, y? as i32 as f32);

            Ok(PathControlPoint::new(pos - start_pos))
        }

        fn is_linear(p0: Pos, p1: Pos, p2: Pos) -> bool {
            let lhs = (p1.y - p0.y) * (p2.x - p0.x);
            let rhs = (p1.x - p0.x) * (p2.y - p0.y);

            (lhs - rhs).abs() < f32::EPSILON
        }

        let mut path_type = points
            .first()
            .copied()
            .map(PathType::new_from_str)
            .ok_or(ParseBeatmapError::InvalidHitObjectLine)?;

        self.vertices.clear();

        if first {
            self.vertices.push(PathControlPoint::default());
        }

        for &point in points.iter().skip(1) {
            self.vertices.push(read_point(point, offset)?);
        }

        let end_point_len = usize::from(end_point.is_some());

        if let Some(end_point) = end_point {
            self.vertices.push(read_point(end_point, offset)?);
        }

        if path_type == PathType::PERFECT_CURVE {
            if let [a, b, c] = self.vertices.as_slice() {
                if is_linear(a.pos, b.pos, c.pos) {
                    path_type = PathType::LINEAR;
                }
            } else {
                path_type = PathType::BEZIER;
            }
        }

        let Some(head) = self.vertices.first_mut() else {
            return Ok(());
        };

        head.path_type = Some(path_type);

        // Consecutive duplicate vertices mark the start of a new segment
        // of the same path type.
        let readable_len = self.vertices.len() - end_point_len;
        let mut start_idx = 0;

        for end_idx in 1..readable_len {
            if self.vertices[end_idx].pos != self.vertices[end_idx - 1].pos {
                continue;
            }

            if path_type == PathType::CATMULL && end_idx > 1 {
                continue;
            }

            if end_idx == readable_len - 1 {
                continue;
            }

            self.vertices[end_idx - 1].path_type = Some(path_type);
            self.curve_points
                .extend(&self.vertices[start_idx..end_idx]);

            start_idx = end_idx + 1;
        }

        let end_idx = readable_len.max(1);

        if end_idx > start_idx {
            self.curve_points
                .extend(&self.vertices[start_idx..end_idx]);
        }

        Ok(())
    }
}

impl DecodeState for BeatmapState {
    fn create(version: i32) -> Self {
        Self {
            version,
            mode: GameMode::Osu,
            difficulty: DifficultyState::create(version),
            breaks: Vec::new(),
            timing_points: Vec::with_capacity(1),
            difficulty_points: Vec::new(),
            hit_objects: Vec::with_capacity(512),
            pending_control_points_time: 0.0,
            pending_timing_point: None,
            pending_difficulty_point: None,
            curve_points: Vec::with_capacity(8),
            vertices: Vec::with_capacity(8),
        }
    }
}

impl From<BeatmapState> for Beatmap {
    fn from(mut state: BeatmapState) -> Self {
        state.flush_pending_points();

        let Difficulty {
            slider_multiplier, ..
        } = state.difficulty.into();

        let BeatmapState {
            version,
            mode,
            breaks,
            timing_points,
            difficulty_points,
            mut hit_objects,
            ..
        } = state;

        let mut curve_bufs = CurveBuffers::default();

        for h in hit_objects.iter_mut() {
            if let HitObjectKind::Slider(ref mut slider) = h.kind {
                let beat_len = timing_point_at(&timing_points, h.start_time)
                    .map_or(TimingPoint::DEFAULT_BEAT_LEN, |point| point.beat_len);

                let slider_velocity = difficulty_point_at(&difficulty_points, h.start_time)
                    .map_or(DifficultyPoint::DEFAULT_SLIDER_VELOCITY, |point| {
                        point.slider_velocity
                    });

                let scoring_dist = BASE_SCORING_DIST * slider_multiplier * slider_velocity;
                let velocity = scoring_dist / beat_len;
                let dist = slider.curve(mode, &mut curve_bufs).dist();

                slider.end_time = h.start_time + (slider.span_count() as f64) * dist / velocity;
            }
        }

        hit_objects.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        Beatmap {
            version,
            mode,
            slider_multiplier,
            breaks,
            timing_points,
            difficulty_points,
            hit_objects,
        }
    }
}

/// All the ways that parsing a [`Beatmap`] can fail.
#[derive(Debug, thiserror::Error)]
pub enum ParseBeatmapError {
    #[error("failed to parse event type")]
    EventType(#[from] ParseEventTypeError),
    #[error("failed to parse hit object type")]
    HitObjectType(#[from] ParseHitObjectTypeError),
    #[error("invalid event line")]
    InvalidEventLine,
    #[error("repeat count is way too high")]
    InvalidRepeatCount,
    #[error("invalid timing point line")]
    InvalidTimingPointLine,
    #[error("invalid hit object line")]
    InvalidHitObjectLine,
    #[error("failed to parse mode")]
    Mode(#[from] ParseGameModeError),
    #[error("failed to parse number")]
    Number(#[from] ParseNumberError),
    #[error("beat length cannot be NaN in a timing control point")]
    TimingControlPointNaN,
    #[error("unknown hit object type")]
    UnknownHitObjectType,
}

impl From<ParseDifficultyError> for ParseBeatmapError {
    fn from(e: ParseDifficultyError) -> Self {
        match e {
            ParseDifficultyError::Number(e) => Self::Number(e),
        }
    }
}

const MAX_COORDINATE_VALUE: i32 = 131_072;
const BASE_SCORING_DIST: f64 = 100.0;

impl DecodeBeatmap for Beatmap {
    type Error = ParseBeatmapError;
    type State = BeatmapState;

    fn parse_general(state: &mut Self::State, line: &str) -> Result<(), Self::Error> {
        let Ok(KeyValue { key, value }) = KeyValue::parse(line.trim_comment()) else {
            return Ok(());
        };

        if let GeneralKey::Mode = key {
            state.mode = value.parse()?;
        }

        Ok(())
    }

    fn parse_editor(_: &mut Self::State, _: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn parse_metadata(_: &mut Self::State, _: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn parse_difficulty(state: &mut Self::State, line: &str) -> Result<(), Self::Error> {
        Difficulty::parse_difficulty(&mut state.difficulty, line).map_err(ParseBeatmapError::from)
    }

    fn parse_events(state: &mut Self::State, line: &str) -> Result<(), Self::Error> {
        let mut split = line.trim_comment().split(',');

        let event_type: EventType = split
            .next()
            .ok_or(ParseBeatmapError::InvalidEventLine)?
            .parse()?;

        if event_type == EventType::Break {
            let Some((start_time, end_time)) = split.next().zip(split.next()) else {
                return Err(ParseBeatmapError::InvalidEventLine);
            };

            let start_time = f64::parse(start_time)?;
            let end_time = start_time.max(f64::parse(end_time)?);

            state.breaks.push(BreakPeriod {
                start_time,
                end_time,
            });
        }

        Ok(())
    }

    fn parse_timing_points(state: &mut Self::State, line: &str) -> Result<(), Self::Error> {
        let mut split = line.trim_comment().split(',');

        let (time, beat_len) = split
            .next()
            .zip(split.next())
            .ok_or(ParseBeatmapError::InvalidTimingPointLine)?;

        let time = time.parse_num::<f64>()?;

        // Manual `str::parse_num::<f64>` so that NaN does not cause an error
        let beat_len = beat_len
            .trim()
            .parse::<f64>()
            .map_err(ParseNumberError::InvalidFloat)?;

        if beat_len < f64::from(-MAX_PARSE_VALUE) {
            return Err(ParseNumberError::NumberUnderflow.into());
        } else if beat_len > f64::from(MAX_PARSE_VALUE) {
            return Err(ParseNumberError::NumberOverflow.into());
        }

        // timing signature, sample set, custom sample bank, sample volume
        let timing_change = split
            .nth(4)
            .map_or(true, |next| matches!(next.chars().next(), Some('1')));

        if timing_change {
            if beat_len.is_nan() {
                return Err(ParseBeatmapError::TimingControlPointNaN);
            }

            state.add_pending_point(time, TimingPoint::new(time, beat_len), timing_change);
        }

        let difficulty = DifficultyPoint::new(time, beat_len);
        state.add_pending_point(time, difficulty, timing_change);

        state.pending_control_points_time = time;

        Ok(())
    }

    fn parse_colors(_: &mut Self::State, _: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn parse_hit_objects(state: &mut Self::State, line: &str) -> Result<(), Self::Error> {
        let mut split = line.trim_comment().split(',');

        let (Some(x), Some(y), Some(start_time), Some(kind), Some(_sound_type)) = (
            split.next(),
            split.next(),
            split.next(),
            split.next(),
            split.next(),
        ) else {
            return Err(ParseBeatmapError::InvalidHitObjectLine);
        };

        let pos = Pos {
            x: x.parse_with_limits(MAX_COORDINATE_VALUE as f32)? as i32 as f32,
            y: y.parse_with_limits(MAX_COORDINATE_VALUE as f32)? as i32 as f32,
        };

        let start_time = f64::parse(start_time)?;
        let hit_object_type: HitObjectType = kind.parse()?;

        let kind = if hit_object_type.has_flag(HitObjectType::CIRCLE) {
            HitObjectKind::Circle
        } else if hit_object_type.has_flag(HitObjectType::SLIDER) {
            let (point_str, repeat_count) = split
                .next()
                .zip(split.next())
                .ok_or(ParseBeatmapError::InvalidHitObjectLine)?;

            let repeats = repeat_count.parse_num::<i32>()?;

            if repeats > 9000 {
                return Err(ParseBeatmapError::InvalidRepeatCount);
            }

            let expected_dist = match split.next() {
                Some(len) => {
                    let len = len
                        .parse_with_limits(f64::from(MAX_COORDINATE_VALUE))?
                        .max(0.0);

                    (len.abs() >= f64::EPSILON).then_some(len)
                }
                None => None,
            };

            state.convert_path_str(point_str, pos)?;
            let control_points = std::mem::take(&mut state.curve_points);

            HitObjectKind::Slider(Slider {
                expected_dist,
                repeats: (repeats - 1).max(0) as usize,
                control_points: control_points.into_boxed_slice(),
                // Depends on control points so it's set once all are known
                end_time: start_time,
            })
        } else if hit_object_type.has_flag(HitObjectType::SPINNER) {
            let end_time = split
                .next()
                .ok_or(ParseBeatmapError::InvalidHitObjectLine)?
                .parse_num::<f64>()?;

            HitObjectKind::Spinner(Spinner {
                end_time: end_time.max(start_time),
            })
        } else if hit_object_type.has_flag(HitObjectType::HOLD) {
            let end_time = match split.next().filter(|s| !s.is_empty()) {
                Some(s) => s
                    .split(':')
                    .next()
                    .ok_or(ParseBeatmapError::InvalidHitObjectLine)?
                    .parse_num::<f64>()?
                    .max(start_time),
                None => start_time,
            };

            HitObjectKind::Hold(HoldNote { end_time })
        } else {
            return Err(ParseBeatmapError::UnknownHitObjectType);
        };

        state.hit_objects.push(HitObject {
            pos,
            start_time,
            kind,
        });

        Ok(())
    }

    fn parse_variables(_: &mut Self::State, _: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn parse_catch_the_beat(_: &mut Self::State, _: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn parse_mania(_: &mut Self::State, _: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}

trait Pending: Sized {
    fn pending(state: &mut BeatmapState) -> &mut Option<Self>;

    fn push_front(self, state: &mut BeatmapState) {
        let pending = Self::pending(state);

        if pending.is_none() {
            *pending = Some(self);
        }
    }

    fn push_back(self, state: &mut BeatmapState) {
        *Self::pending(state) = Some(self);
    }
}

impl Pending for TimingPoint {
    fn pending(state: &mut BeatmapState) -> &mut Option<Self> {
        &mut state.pending_timing_point
    }
}

impl Pending for DifficultyPoint {
    fn pending(state: &mut BeatmapState) -> &mut Option<Self> {
        &mut state.pending_difficulty_point
    }
}
