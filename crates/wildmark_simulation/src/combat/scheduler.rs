//! Отложенное взведение contact windows (one-shot таймеры против tick-часов).
//!
//! Замах длится секунды, окно удара открывается на его доле. Таймер несёт
//! generation активации, в которой был поставлен: после teardown атакующего
//! состояния хвостовые таймеры обязаны НЕ сработать против новой активации —
//! они отбрасываются, как только generation перестаёт совпадать.

use bevy::prelude::*;

use super::contact::{ContactWindows, HandSide};
use crate::ai::BossMachine;

/// Одноразовый таймер "взвести окно через fire_in секунд"
#[derive(Debug, Clone, Reflect)]
pub struct ArmTimer {
    /// Остаток до срабатывания (секунды, tick-часы)
    pub fire_in: f32,
    pub side: HandSide,
    /// Активация, поставившая таймер (guard от stale-срабатываний)
    pub activation: u32,
}

/// Очередь arm-таймеров босса
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ArmTimerQueue {
    pub timers: Vec<ArmTimer>,
}

impl ArmTimerQueue {
    pub fn schedule(&mut self, fire_in: f32, side: HandSide, activation: u32) {
        self.timers.push(ArmTimer {
            fire_in,
            side,
            activation,
        });
    }

    /// Продвинуть таймеры на delta. Сработавшие взводят окно, чужая
    /// активация — молча в корзину.
    pub fn tick(&mut self, delta: f32, current_activation: u32, windows: &mut ContactWindows) {
        self.timers.retain_mut(|timer| {
            if timer.activation != current_activation {
                return false;
            }

            timer.fire_in -= delta;
            if timer.fire_in > 0.0 {
                return true;
            }

            windows.arm(timer.side);
            crate::log(&format!("⏰ Contact window {:?} armed", timer.side));
            false
        });
    }
}

/// Система: tick arm-таймеров всех боссов
pub fn tick_arm_timers(
    mut bosses: Query<(&mut ArmTimerQueue, &mut ContactWindows, &BossMachine)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut queue, mut windows, machine) in bosses.iter_mut() {
        queue.tick(delta, machine.activation, &mut windows);
    }
}
