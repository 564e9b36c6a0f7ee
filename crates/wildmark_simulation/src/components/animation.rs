//! Strategic view engine-аниматора.
//!
//! ECS не проигрывает анимации — он запрашивает клип и читает его длину.
//! Engine-side bridge подхватывает `current_clip` и ведёт реальный
//! AnimationTree; в headless прогоне длины клипов берутся из запроса как есть.

use bevy::prelude::*;

// Служебные клипы боевого цикла (атакующие клипы приходят из SkillDefinition)
pub const CLIP_IDLE: &str = "boss_idle";
pub const CLIP_TURN_LEFT: &str = "boss_turn_left";
pub const CLIP_TURN_RIGHT: &str = "boss_turn_right";

pub const TURN_CLIP_LENGTH: f32 = 0.5;
pub const IDLE_CLIP_LENGTH: f32 = 1.0;

/// Аниматор актора (модель animation driver'а)
///
/// `just_started` — флаг "новый клип начал играть": взводится `play()`,
/// сбрасывается потребителем (боевой цикл перечитывает длину клипа ровно
/// один раз на запуск).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Animator {
    pub current_clip: String,
    pub clip_length: f32,
    pub just_started: bool,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            current_clip: CLIP_IDLE.to_string(),
            clip_length: IDLE_CLIP_LENGTH,
            just_started: false,
        }
    }
}

impl Animator {
    /// Запустить клип с начала (повторный запуск того же клипа — тоже рестарт)
    pub fn play(&mut self, clip: &str, length: f32) {
        self.current_clip = clip.to_string();
        self.clip_length = length;
        self.just_started = true;
    }
}
