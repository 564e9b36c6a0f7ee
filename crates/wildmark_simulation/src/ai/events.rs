//! События supervisor state machine.

use bevy::prelude::*;

use super::components::BossState;

/// Запрос на смену состояния босса.
///
/// Применяется `apply_transitions` в НАЧАЛЕ следующего тика — состояние
/// никогда не меняется посреди цикла принятия решений. Запрос в уже
/// текущее состояние — no-op, из Dead переходов нет.
#[derive(Event, Debug, Clone)]
pub struct TransitionRequest {
    pub boss: Entity,
    pub to: BossState,
}

/// Уведомление: переход состоялся (для engine bridge, дебага, тестов)
#[derive(Event, Debug, Clone)]
pub struct StateChanged {
    pub boss: Entity,
    pub from: BossState,
    pub to: BossState,
}
