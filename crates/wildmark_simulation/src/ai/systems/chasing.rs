//! Chasing: преследование цели до дистанции начала боя.

use bevy::prelude::*;

use crate::ai::components::{BossMachine, BossState, CurrentTarget};
use crate::ai::events::TransitionRequest;
use crate::ai::selector::ENGAGEMENT_BREAK_DISTANCE;
use crate::components::{MovementCommand, MovementSpeed};

/// Скорость погони (метры/сек)
pub const CHASE_SPEED: f32 = 3.5;

/// Система: погоня за целью.
///
/// Пока цель дальше break distance — следуем за ней; как только дистанция
/// сомкнулась, запрашиваем вход в атакующее состояние (переход применится
/// в начале следующего тика).
pub fn chase_target(
    mut bosses: Query<(
        Entity,
        &BossMachine,
        &Transform,
        &CurrentTarget,
        &mut MovementCommand,
        &mut MovementSpeed,
    )>,
    targets: Query<&Transform, Without<BossMachine>>,
    mut requests: EventWriter<TransitionRequest>,
) {
    for (entity, machine, transform, current_target, mut movement, mut speed) in bosses.iter_mut() {
        if machine.current != BossState::Chasing {
            continue;
        }

        let Ok(target_transform) = targets.get(current_target.0) else {
            continue; // цель despawned — стоим
        };

        let distance = transform.translation.distance(target_transform.translation);
        if distance < ENGAGEMENT_BREAK_DISTANCE {
            requests.write(TransitionRequest {
                boss: entity,
                to: BossState::Attacking,
            });
            continue;
        }

        *movement = MovementCommand::FollowEntity {
            target: current_target.0,
        };
        speed.speed = CHASE_SPEED;
    }
}
