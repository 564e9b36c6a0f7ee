//! Combat system module (engine-driven combat architecture)
//!
//! ECS ответственность:
//! - Game state: skill cooldowns, contact windows, damage math
//! - Combat rules: кто, когда и сколько урона получает
//! - Events: DamageDealt, EntityDied
//!
//! Engine ответственность:
//! - AnimationTree: weapon swing timing
//! - Hit-volume collision detection (ContactEvent → ECS)

use bevy::prelude::*;

pub mod contact;
pub mod damage;
pub mod scheduler;
pub mod skills;
pub mod spatial;

// Re-export основных типов
pub use contact::{ContactEvent, ContactWindow, ContactWindows, HandSide};
pub use damage::{calculate_damage, Damage, DamageDealt, Dead, EntityDied, WeaponData};
pub use scheduler::{ArmTimer, ArmTimerQueue};
pub use skills::{tick_skill_cooldowns, SkillDefinition, SkillRegistry, ANY_RANGE, DEFAULT_SKILL_ID};
pub use spatial::{
    angle_direction, in_range, is_facing, look_rotation, rotate_towards, TurnDirection,
    FACING_TOLERANCE_DEG,
};

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (set `SimulationSet::Combat`,
/// до AI-решений текущего тика).
///
/// Порядок выполнения:
/// 1. tick_skill_cooldowns — обновление cooldown таймеров
/// 2. tick_arm_timers — отложенное взведение contact windows
/// 3. process_contact_hits — ContactEvent → damage application
/// 4. handle_deaths — пометка умерших, остановка движения
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<ContactEvent>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                skills::tick_skill_cooldowns,
                scheduler::tick_arm_timers,
                contact::process_contact_hits,
                damage::handle_deaths,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(crate::SimulationSet::Combat),
        );
    }
}
