//! Контракт navigation driver'а: команды перемещения и скорость.
//!
//! Архитектура:
//! - ECS пишет MovementCommand + MovementSpeed (high-level intent)
//! - Engine-side NavigationAgent читает и ведёт actor по navmesh
//! - В headless прогоне ту же пару интерпретирует `apply_movement_commands`

use bevy::prelude::*;

/// Команда движения для актора (выполняется engine NavigationAgent'ом)
#[derive(Component, Debug, Clone, PartialEq)]
pub enum MovementCommand {
    /// Стоять на месте (не обновлять navigation target)
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec3 },
    /// Следовать за entity (target обновляется каждый тик)
    FollowEntity { target: Entity },
    /// Остановиться немедленно (сбросить velocity)
    Stop,
}

impl Default for MovementCommand {
    fn default() -> Self {
        Self::Idle
    }
}

/// Скорость движения актора (метры/сек)
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 2.0 }
    }
}

/// Система: headless-интегратор движения.
///
/// В production позициями владеет engine (physics + navmesh), здесь —
/// прямолинейный шаг к цели, чтобы погоня работала в тестах и в headless
/// binary. Скорость 0 — валидный способ "встать" не меняя команду.
pub fn apply_movement_commands(
    mut movers: Query<(&MovementCommand, &MovementSpeed, &mut Transform)>,
    targets: Query<&Transform, Without<MovementCommand>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (command, speed, mut transform) in movers.iter_mut() {
        let destination = match command {
            MovementCommand::Idle | MovementCommand::Stop => continue,
            MovementCommand::MoveToPosition { target } => *target,
            MovementCommand::FollowEntity { target } => match targets.get(*target) {
                Ok(target_transform) => target_transform.translation,
                Err(_) => continue, // target despawned — команда устарела
            },
        };

        let to_target = destination - transform.translation;
        let step = speed.speed * delta;

        if to_target.length() <= step {
            transform.translation = destination;
        } else if to_target.length_squared() > f32::EPSILON {
            transform.translation += to_target.normalize() * step;
        }
    }
}
