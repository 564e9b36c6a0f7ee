//! Combat math сервис и события урона.
//!
//! Формула специально простая (base × attack power × armor reduction) —
//! баланс живёт в tuning data, не в коде.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{MainStats, MovementCommand, MovementSpeed};

/// Данные оружия босса (оба hit-volume бьют одним оружием)
#[derive(Component, Debug, Clone, Copy, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct WeaponData {
    /// Базовый урон (без модификаторов)
    pub base_damage: u32,
    /// Вес attack_power атакующего в формуле
    pub power_scale: f32,
}

impl Default for WeaponData {
    fn default() -> Self {
        Self {
            base_damage: 35,
            power_scale: 1.0,
        }
    }
}

/// Рассчитанный пакет урона
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub amount: u32,
}

/// Combat math: (weapon, stats атакующего, stats цели) → урон.
///
/// None — урон полностью поглощён (armor cap 75%, но base может быть 0);
/// вызывающий обязан трактовать None как no-op, не как ошибку.
pub fn calculate_damage(
    weapon: &WeaponData,
    attacker: &MainStats,
    target: &MainStats,
) -> Option<Damage> {
    let raw = weapon.base_damage as f32 * (1.0 + attacker.attack_power * weapon.power_scale / 100.0);
    let reduced = raw * (1.0 - target.armor.clamp(0.0, 75.0) / 100.0);

    let amount = reduced.round() as u32;
    (amount > 0).then_some(Damage { amount })
}

/// Событие: урон нанесён
///
/// Генерируется после применения damage к Health.
/// Используется UI, звуками, damage-number эффектами.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв
///
/// Для визуальных эффектов (death animation, fade-out).
/// Деспавн не автоматический — трупы остаются на месте.
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Система: обработка смертей.
///
/// Останавливает движение умершего и вешает маркер Dead. Смерть самого
/// босса дополнительно обрабатывает supervisor (переход в BossState::Dead).
pub fn handle_deaths(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut movers: Query<(&mut MovementCommand, &mut MovementSpeed)>,
) {
    for event in death_events.read() {
        if let Ok((mut movement, mut speed)) = movers.get_mut(event.entity) {
            *movement = MovementCommand::Stop;
            speed.speed = 0.0;
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
            crate::log_info(&format!(
                "💀 Entity {:?} died (killer: {:?})",
                event.entity, event.killer
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_no_modifiers() {
        let weapon = WeaponData {
            base_damage: 40,
            power_scale: 1.0,
        };
        let attacker = MainStats {
            attack_power: 0.0,
            armor: 0.0,
        };
        let target = MainStats::default();

        let damage = calculate_damage(&weapon, &attacker, &target).unwrap();
        assert_eq!(damage.amount, 40);
    }

    #[test]
    fn test_damage_attack_power_bonus() {
        let weapon = WeaponData {
            base_damage: 40,
            power_scale: 1.0,
        };
        let attacker = MainStats {
            attack_power: 50.0,
            armor: 0.0,
        };
        let target = MainStats {
            attack_power: 0.0,
            armor: 0.0,
        };

        // 40 × 1.5 = 60
        let damage = calculate_damage(&weapon, &attacker, &target).unwrap();
        assert_eq!(damage.amount, 60);
    }

    #[test]
    fn test_damage_armor_reduction_and_cap() {
        let weapon = WeaponData {
            base_damage: 100,
            power_scale: 1.0,
        };
        let attacker = MainStats {
            attack_power: 0.0,
            armor: 0.0,
        };

        let armored = MainStats {
            attack_power: 0.0,
            armor: 50.0,
        };
        assert_eq!(calculate_damage(&weapon, &attacker, &armored).unwrap().amount, 50);

        // Armor выше cap'а режется до 75%
        let overcapped = MainStats {
            attack_power: 0.0,
            armor: 200.0,
        };
        assert_eq!(
            calculate_damage(&weapon, &attacker, &overcapped).unwrap().amount,
            25
        );
    }

    #[test]
    fn test_zero_damage_is_absent() {
        let weapon = WeaponData {
            base_damage: 0,
            power_scale: 1.0,
        };
        let stats = MainStats::default();
        assert!(calculate_damage(&weapon, &stats, &stats).is_none());
    }
}
