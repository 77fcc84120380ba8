pub use rosu_map::section::general::GameMode;

/// Beatmap related types.
pub mod beatmap;

/// Control point related types.
pub mod control_point;

/// Hitobject related types.
pub mod hit_object;

/// Hitresult related types.
pub mod hit_result;

/// Judgement related types.
pub mod judgement;
