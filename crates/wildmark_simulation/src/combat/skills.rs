//! Skill registry босса: определения атак, cooldown-учёт, использование.
//!
//! Реестр живёт на boss entity ВНЕ атакующего состояния — cooldown'ы
//! переживают выходы в погоню и возвраты в бой. Единственный писатель —
//! боевой цикл, читатель — селектор атак.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::Animator;

/// Sentinel "скилл не ограничен дистанцией" (range_min == -1)
pub const ANY_RANGE: f32 = -1.0;

/// Индекс default-атаки. Контракт реестра: скилл 0 существует и имеет
/// range_min == ANY_RANGE — fallback-выбор не должен сам упереться в
/// пустой пул. Нарушение — ошибка конфигурации, здесь не защищаемся.
pub const DEFAULT_SKILL_ID: usize = 0;

/// Определение одной атаки босса
#[derive(Debug, Clone, Reflect, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: usize,
    /// Минимальная эффективная дистанция; ANY_RANGE = всегда в радиусе
    pub range_min: f32,
    pub range_max: f32,
    /// Полный cooldown (секунды)
    pub cooldown: f32,
    /// Остаток cooldown'а; скилл готов при <= 0
    pub cooldown_remaining: f32,
    /// Атакующий клип аниматора
    pub clip: String,
    pub clip_length: f32,
}

impl SkillDefinition {
    pub fn new(
        id: usize,
        range_min: f32,
        range_max: f32,
        cooldown: f32,
        clip: &str,
        clip_length: f32,
    ) -> Self {
        Self {
            id,
            range_min,
            range_max,
            cooldown,
            cooldown_remaining: 0.0,
            clip: clip.to_string(),
            clip_length,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }
}

/// Упорядоченный реестр атак босса
#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct SkillRegistry {
    pub skills: Vec<SkillDefinition>,
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::boss_moveset()
    }
}

impl SkillRegistry {
    /// Стандартный набор из пяти атак: default swipe (без ограничения
    /// дистанции) + четыре гейченных по дальности и cooldown'у.
    pub fn boss_moveset() -> Self {
        Self {
            skills: vec![
                // Cooldown default'а длиннее его замаха: между замахами есть
                // окно с пустым пулом, в котором далёкая цель разрывает бой
                SkillDefinition::new(0, ANY_RANGE, ANY_RANGE, 3.0, "boss_attack_swipe", 1.4),
                SkillDefinition::new(1, 0.0, 3.0, 5.0, "boss_attack_double_slash", 1.8),
                SkillDefinition::new(2, 0.0, 4.0, 8.0, "boss_attack_ground_slam", 2.2),
                SkillDefinition::new(3, 2.0, 6.0, 12.0, "boss_attack_lunge", 1.6),
                SkillDefinition::new(4, 3.0, 8.0, 15.0, "boss_attack_spine_volley", 2.5),
            ],
        }
    }

    pub fn get(&self, id: usize) -> Option<&SkillDefinition> {
        self.skills.get(id)
    }

    pub fn is_ready(&self, id: usize) -> bool {
        self.skills.get(id).is_some_and(SkillDefinition::is_ready)
    }

    /// Выставить остаток cooldown'а скилла.
    ///
    /// Вызывается по разу на скилл при входе в атакующее состояние
    /// (grace period: бой не начинается с полного залпа).
    pub fn cooldown_reset(&mut self, id: usize, duration: f32) {
        if let Some(skill) = self.skills.get_mut(id) {
            skill.cooldown_remaining = duration;
        }
    }

    /// Использовать скилл: запустить его клип и начать cooldown.
    pub fn use_skill(&mut self, id: usize, animator: &mut Animator) {
        let Some(skill) = self.skills.get_mut(id) else {
            crate::log_warning(&format!("SkillRegistry: use_skill({}) — скилла нет в реестре", id));
            return;
        };

        skill.cooldown_remaining = skill.cooldown;
        animator.play(&skill.clip, skill.clip_length);

        crate::log(&format!(
            "🗡️ Skill {} used: clip '{}' ({:.2}s), cooldown {:.1}s",
            id, skill.clip, skill.clip_length, skill.cooldown
        ));
    }

    /// Продвинуть все cooldown'ы на delta (клампится в 0)
    pub fn tick(&mut self, delta: f32) {
        for skill in &mut self.skills {
            if skill.cooldown_remaining > 0.0 {
                skill.cooldown_remaining = (skill.cooldown_remaining - delta).max(0.0);
            }
        }
    }
}

/// Система: обновление skill cooldown таймеров
pub fn tick_skill_cooldowns(mut registries: Query<&mut SkillRegistry>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();
    for mut registry in registries.iter_mut() {
        registry.tick(delta);
    }
}
