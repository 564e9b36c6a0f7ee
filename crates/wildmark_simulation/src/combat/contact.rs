//! Contact windows: урон по касанию weapon hit-volume.
//!
//! # Architecture
//!
//! **ECS (Strategic Layer):**
//! - `ContactWindows`: armed/disarmed состояние двух hit-volume (left/right)
//! - `process_contact_hits`: фильтрация событий + damage application
//!
//! **Engine (Tactical Layer):**
//! - Коллизия weapon hit-volume с телом цели → `ContactEvent` (Engine → ECS)
//!
//! # Контракт "одно попадание за замах"
//!
//! Окно взводится отложенным таймером (см. scheduler), гаснет при ПЕРВОМ
//! валидном касании. Пока окно не взведено заново следующим замахом, тот же
//! hit-volume урона не наносит — сколько бы контактов engine ни прислал.

use bevy::prelude::*;

use super::damage::{calculate_damage, DamageDealt, EntityDied};
use super::WeaponData;
use crate::ai::{BossMachine, BossState};
use crate::components::{Health, MainStats};

/// Какой из двух weapon hit-volume сработал
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum HandSide {
    Left,
    Right,
}

/// Состояние одного weapon hit-volume
#[derive(Debug, Clone, Copy, Default, Reflect)]
pub struct ContactWindow {
    /// Взведено ли окно (может нанести ровно один удар)
    pub armed: bool,
    /// Включен ли engine-side коллайдер (ECS → Engine)
    pub collider_enabled: bool,
}

/// Пара независимых contact windows босса (левая/правая конечность)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ContactWindows {
    pub left: ContactWindow,
    pub right: ContactWindow,
}

impl ContactWindows {
    pub fn window(&self, side: HandSide) -> &ContactWindow {
        match side {
            HandSide::Left => &self.left,
            HandSide::Right => &self.right,
        }
    }

    pub fn window_mut(&mut self, side: HandSide) -> &mut ContactWindow {
        match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        }
    }

    /// Погасить оба окна и выключить коллайдеры (конец замаха / выход из боя)
    pub fn disarm_all(&mut self) {
        self.left = ContactWindow::default();
        self.right = ContactWindow::default();
    }

    /// Взвести окно: касание станет ударом, коллайдер включается
    pub fn arm(&mut self, side: HandSide) {
        let window = self.window_mut(side);
        window.armed = true;
        window.collider_enabled = true;
    }
}

/// Коллизия weapon hit-volume (Engine → ECS)
#[derive(Event, Debug, Clone)]
pub struct ContactEvent {
    /// Босс, чей hit-volume сработал
    pub boss: Entity,
    pub side: HandSide,
    /// Кого задели
    pub target: Entity,
    /// Контакт с non-solid trigger volume (не тело)
    pub collider_is_trigger: bool,
}

/// Система: обработка контактов weapon hit-volume.
///
/// Фильтр отбрасывает:
/// - trigger-коллайдеры (не твёрдое тело);
/// - события, когда босс уже не в Attacking (хвост прошлой активации);
/// - касания невзведённым окном.
///
/// Валидный контакт: combat math → Health цели → DamageDealt, окно гаснет.
pub fn process_contact_hits(
    mut contact_events: EventReader<ContactEvent>,
    mut bosses: Query<(&BossMachine, &mut ContactWindows, &WeaponData, &MainStats)>,
    mut targets: Query<(&mut Health, &MainStats), Without<BossMachine>>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
) {
    for event in contact_events.read() {
        if event.collider_is_trigger {
            continue;
        }

        let Ok((machine, mut windows, weapon, attacker_stats)) = bosses.get_mut(event.boss) else {
            crate::log_warning(&format!(
                "ContactEvent: boss {:?} не найден (despawned?)",
                event.boss
            ));
            continue;
        };

        // Stale event: замах прошлой активации долетел после выхода из боя
        if machine.current != BossState::Attacking {
            crate::log(&format!(
                "ContactEvent: boss {:?} не в Attacking ({:?}) — событие отброшено",
                event.boss, machine.current
            ));
            continue;
        }

        if !windows.window(event.side).armed {
            continue;
        }

        // Цель без Health — no-op с предупреждением, не ошибка
        let Ok((mut health, target_stats)) = targets.get_mut(event.target) else {
            crate::log_warning(&format!(
                "ContactEvent: target {:?} без Health/MainStats — урон не применён",
                event.target
            ));
            continue;
        };

        let Some(damage) = calculate_damage(weapon, attacker_stats, target_stats) else {
            continue;
        };

        let was_alive = health.is_alive();
        health.take_damage(damage.amount);
        let died = was_alive && !health.is_alive();

        // Одно попадание за armed window: гасим сразу после применения
        windows.window_mut(event.side).armed = false;

        crate::log(&format!(
            "💥 Contact hit: {:?} {:?} → {:?}, damage {}, HP осталось {}",
            event.boss, event.side, event.target, damage.amount, health.current
        ));

        damage_dealt_events.write(DamageDealt {
            attacker: event.boss,
            target: event.target,
            damage: damage.amount,
            target_died: died,
        });

        if died {
            entity_died_events.write(EntityDied {
                entity: event.target,
                killer: Some(event.boss),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_arm_and_disarm() {
        let mut windows = ContactWindows::default();
        assert!(!windows.window(HandSide::Left).armed);

        windows.arm(HandSide::Left);
        assert!(windows.left.armed);
        assert!(windows.left.collider_enabled);
        assert!(!windows.right.armed);

        windows.disarm_all();
        assert!(!windows.left.armed);
        assert!(!windows.left.collider_enabled);
    }

    #[test]
    fn test_windows_are_independent() {
        let mut windows = ContactWindows::default();
        windows.arm(HandSide::Right);

        windows.window_mut(HandSide::Right).armed = false; // попадание правой
        assert!(!windows.right.armed);
        assert!(windows.right.collider_enabled); // коллайдер гаснет только в disarm_all

        windows.arm(HandSide::Left);
        assert!(windows.left.armed);
    }
}
