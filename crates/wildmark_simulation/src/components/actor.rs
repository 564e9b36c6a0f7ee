//! Базовые компоненты живых существ: Health, MainStats

use bevy::prelude::*;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Основные боевые характеристики актора
///
/// Читаются combat-math сервисом (`calculate_damage`) с обеих сторон:
/// attack_power атакующего, armor цели.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MainStats {
    /// Бонус к урону, процентные пункты поверх базового урона оружия
    pub attack_power: f32,
    /// Снижение входящего урона, проценты (эффективный cap 75)
    pub armor: f32,
}

impl Default for MainStats {
    fn default() -> Self {
        Self {
            attack_power: 10.0,
            armor: 0.0,
        }
    }
}
