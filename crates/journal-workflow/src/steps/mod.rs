//! The three journal stages, in pipeline order.

mod classify;
mod expand;
mod map_skill;

pub use classify::ClassifyStep;
pub use expand::ExpandImpactStep;
pub use map_skill::MapSkillStep;
