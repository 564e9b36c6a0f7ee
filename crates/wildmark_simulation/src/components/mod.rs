//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики живых существ (Health, MainStats)
//! - movement: контракт navigation driver'а (MovementCommand, MovementSpeed)
//! - animation: strategic view engine-аниматора (Animator, имена клипов)

pub mod actor;
pub mod animation;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use animation::*;
pub use movement::*;
