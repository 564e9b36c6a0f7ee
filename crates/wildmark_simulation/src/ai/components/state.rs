//! Состояния босса: supervisor machine и состояние атакующей активации.

use bevy::prelude::*;

use crate::combat::{ArmTimerQueue, ContactWindows, SkillRegistry, WeaponData};
use crate::components::{Animator, Health, MainStats, MovementCommand, MovementSpeed};

/// Attack time первого замаха активации — до того, как отсчёт пересеется
/// длиной реально заигравшего клипа.
pub const INITIAL_ATTACK_TIME: f32 = 1.5;

/// Состояния supervisor'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum BossState {
    /// Преследование цели до дистанции начала боя
    Chasing,
    /// Боевой цикл (замахи, выбор скиллов)
    Attacking,
    /// Терминальное: health == 0, AI выключен
    Dead,
}

/// Supervisor state machine босса.
///
/// Живёт на boss entity постоянно (в отличие от `AttackingState`).
/// `activation` — generation счётчик входов в Attacking: отложенные
/// таймеры и хвостовые события сверяются с ним и отбрасываются, если
/// активация уже не та.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(
    Health,
    MainStats,
    WeaponData,
    SkillRegistry,
    Animator,
    ContactWindows,
    ArmTimerQueue,
    MovementCommand,
    MovementSpeed
)]
pub struct BossMachine {
    pub current: BossState,
    pub activation: u32,
    /// Босс в боевом состоянии (читается внешними системами агро/музыки)
    pub is_battle_state: bool,
    /// Состояние можно вытеснить извне
    pub can_exit: bool,
}

impl Default for BossMachine {
    fn default() -> Self {
        Self {
            current: BossState::Chasing,
            activation: 0,
            is_battle_state: false,
            can_exit: true,
        }
    }
}

/// Текущая цель босса
#[derive(Component, Debug, Clone, Copy)]
pub struct CurrentTarget(pub Entity);

/// Фазы боевого цикла внутри атакующего состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum CyclePhase {
    /// Замах идёт: отсчитываем attack time
    Countdown,
    /// Замах закончен: доворот к цели и выбор следующей атаки
    Deciding,
}

/// Состояние одной активации атакующего состояния.
///
/// Создаётся enter hook'ом, удаляется при выходе — ничего из него не
/// переживает активацию (cooldown'ы живут в `SkillRegistry`).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AttackingState {
    pub phase: CyclePhase,
    pub remaining_attack_time: f32,
    pub selected_skill: usize,
}

impl Default for AttackingState {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackingState {
    pub fn new() -> Self {
        Self {
            phase: CyclePhase::Countdown,
            remaining_attack_time: INITIAL_ATTACK_TIME,
            selected_skill: crate::combat::DEFAULT_SKILL_ID,
        }
    }
}
