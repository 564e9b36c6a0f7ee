//! Boss AI module: supervisor state machine + боевой цикл.
//!
//! Иерархия:
//! - `BossMachine` (supervisor) владеет текущим состоянием и generation'ом
//!   активации; переходы — через `TransitionRequest` события.
//! - Attacking — единственное "толстое" состояние: цикл замах → решение →
//!   следующий замах (см. systems::attacking).
//! - Chasing — преследование до дистанции начала боя.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod selector;
pub mod systems;

// Re-export основных типов
pub use components::{AttackingState, BossMachine, BossState, CurrentTarget, CyclePhase};
pub use events::{StateChanged, TransitionRequest};
pub use selector::{choose_attack, AttackChoice, CandidateBuffer, ENGAGEMENT_BREAK_DISTANCE};

/// Boss AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (set `SimulationSet::Ai`).
/// Порядок выполнения:
/// 1. apply_transitions — применение запрошенных переходов + enter/exit hooks
/// 2. detect_boss_death — health == 0 → запрос перехода в Dead
/// 3. chase_target — погоня и запрос входа в бой
/// 4. attacking_cycle — боевой цикл активного атакующего состояния
/// 5. apply_movement_commands — headless-интегратор движения
pub struct BossAiPlugin;

impl Plugin for BossAiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TransitionRequest>().add_event::<StateChanged>();

        app.add_systems(
            FixedUpdate,
            (
                systems::supervisor::apply_transitions,
                systems::supervisor::detect_boss_death,
                systems::chasing::chase_target,
                systems::attacking::attacking_cycle,
                crate::components::movement::apply_movement_commands,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(crate::SimulationSet::Ai),
        );
    }
}
