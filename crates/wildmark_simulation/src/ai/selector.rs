//! Селектор атак: фильтрация реестра по готовности и дистанции, выбор.
//!
//! Random draw идёт через инжектированный `Rng` — при одинаковом seed
//! выбор воспроизводим (см. `DeterministicRng`).

use bevy::prelude::*;
use rand::Rng;

use crate::combat::skills::{SkillRegistry, DEFAULT_SKILL_ID};
use crate::combat::spatial::in_range;

/// Дистанция разрыва боя: когда пул кандидатов пуст И цель не ближе этой
/// дистанции, бой сменяется погоней.
pub const ENGAGEMENT_BREAK_DISTANCE: f32 = 4.0;

/// Результат одного цикла выбора
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackChoice {
    /// Использовать скилл с этим registry-индексом
    Use(usize),
    /// Кандидатов нет, цель ушла — запросить переход в погоню.
    /// Это запрос смены состояния, не ошибка.
    ExitToChase,
}

/// Переиспользуемый пул кандидатов одного цикла выбора.
///
/// Dense index → registry index. Буфер чистится, не реаллоцируется;
/// между циклами не персистится ничего.
#[derive(Debug, Default)]
pub struct CandidateBuffer {
    indices: Vec<usize>,
}

impl CandidateBuffer {
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}

/// Выбор атаки для текущих позиций босса и цели.
///
/// 1. Пул = скиллы, одновременно готовые и в эффективной дистанции
///    (стабильный порядок = порядок реестра).
/// 2. Пул пуст и дистанция ≥ break distance → `ExitToChase`.
/// 3. Иначе равновероятный выбор из пула; пустой-но-близкий пул или
///    `force_default` → default-скилл (индекс 0, без ограничения дистанции
///    по контракту реестра).
///
/// Функция не использует скилл сама — `use_skill` вызывает тот, кто выбрал.
pub fn choose_attack(
    registry: &SkillRegistry,
    candidates: &mut CandidateBuffer,
    boss_position: Vec3,
    target_position: Vec3,
    rng: &mut impl Rng,
    force_default: bool,
) -> AttackChoice {
    candidates.indices.clear();

    for (index, skill) in registry.skills.iter().enumerate() {
        if skill.is_ready()
            && in_range(boss_position, target_position, skill.range_min, skill.range_max)
        {
            candidates.indices.push(index);
        }
    }

    if candidates.indices.is_empty()
        && boss_position.distance(target_position) >= ENGAGEMENT_BREAK_DISTANCE
    {
        return AttackChoice::ExitToChase;
    }

    if !force_default && !candidates.indices.is_empty() {
        let pick = rng.gen_range(0..candidates.indices.len());
        return AttackChoice::Use(candidates.indices[pick]);
    }

    AttackChoice::Use(DEFAULT_SKILL_ID)
}
