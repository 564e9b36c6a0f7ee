//! Геометрия боевых решений: дистанция, facing, направление доворота.
//!
//! Чистые функции без доступа к миру — используются селектором атак и
//! боевым циклом, тестируются напрямую.

use bevy::prelude::*;

use super::skills::ANY_RANGE;

/// Допуск по углу "смотрим на цель" (градусы)
pub const FACING_TOLERANCE_DEG: f32 = 20.0;

/// Дискретное направление доворота к цели
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    /// Dead-zone: цель в пределах допуска, доворот не нужен
    Idle,
    Right,
}

/// Цель в эффективной дистанции скилла?
///
/// range_min == ANY_RANGE — скилл без ограничения. Дистанция полная
/// 3D-евклидова (метры, engine convention).
pub fn in_range(actor: Vec3, target: Vec3, range_min: f32, range_max: f32) -> bool {
    if range_min == ANY_RANGE {
        return true;
    }

    let distance = actor.distance(target);
    distance >= range_min && distance <= range_max
}

/// Повёрнут ли актор к desired-ориентации в пределах допуска (градусы)
pub fn is_facing(rotation: Quat, desired: Quat, tolerance_deg: f32) -> bool {
    rotation.angle_between(desired).to_degrees() <= tolerance_deg
}

/// Классификация направления доворота: слева/справа ли цель от forward.
///
/// Знак берётся из проекции cross(forward, heading) на up; зона
/// `dead_zone_deg` вокруг нуля — Idle (полоса, не точное совпадение).
/// Вырожденные вектора (цель в той же точке) — Idle.
pub fn angle_direction(forward: Vec3, heading: Vec3, up: Vec3, dead_zone_deg: f32) -> TurnDirection {
    // Работаем в плоскости земли: доворот — это yaw
    let forward_flat = Vec3::new(forward.x, 0.0, forward.z);
    let heading_flat = Vec3::new(heading.x, 0.0, heading.z);

    if forward_flat.length_squared() < f32::EPSILON || heading_flat.length_squared() < f32::EPSILON
    {
        return TurnDirection::Idle;
    }

    let angle = forward_flat.angle_between(heading_flat).to_degrees();
    if angle <= dead_zone_deg {
        return TurnDirection::Idle;
    }

    if forward_flat.cross(heading_flat).dot(up) > 0.0 {
        TurnDirection::Left
    } else {
        TurnDirection::Right
    }
}

/// Ориентация "смотреть из from на to" (yaw в плоскости земли).
///
/// Вертикальная составляющая отбрасывается — босс не задирает корпус.
pub fn look_rotation(from: Vec3, to: Vec3) -> Quat {
    let heading = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    if heading.length_squared() < f32::EPSILON {
        return Quat::IDENTITY;
    }

    Quat::from_rotation_arc(Vec3::NEG_Z, heading.normalize())
}

/// Инкрементальный доворот: не больше max_degrees за вызов.
///
/// Вызывающий передаёт ANGLE_SPEED × delta — скорость в градусах/сек.
pub fn rotate_towards(current: Quat, desired: Quat, max_degrees: f32) -> Quat {
    let angle = current.angle_between(desired).to_degrees();
    if angle <= max_degrees || angle < f32::EPSILON {
        return desired;
    }

    current.slerp(desired, max_degrees / angle)
}
