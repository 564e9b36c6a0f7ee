//! Боевой цикл атакующего состояния (combat cycle controller).
//!
//! # Cycle Flow
//!
//! ```text
//! Countdown: клип заиграл → attack time = длина клипа + буфер,
//!            arm-таймеры окон поставлены │ иначе − delta
//!   ↓ (attack time ≤ 0)
//! Deciding:  окна погашены, стоим
//!   ├─ не смотрим на цель → доворот (turn клип + ANGLE_SPEED°/с),
//!   │                        остаёмся в Deciding до следующего тика
//!   └─ смотрим → choose_attack()
//!        ├─ Use(skill) → use_skill (клип заиграет) → Countdown
//!        └─ ExitToChase → TransitionRequest { to: Chasing }
//! ```
//!
//! Deciding — подцикл, не одноразовый переход: facing переоценивается
//! каждый тик, пока не сойдётся.

use bevy::prelude::*;

use crate::ai::components::{AttackingState, BossMachine, BossState, CurrentTarget, CyclePhase};
use crate::ai::events::TransitionRequest;
use crate::ai::selector::{choose_attack, AttackChoice, CandidateBuffer};
use crate::combat::spatial::{
    angle_direction, is_facing, look_rotation, rotate_towards, TurnDirection,
    FACING_TOLERANCE_DEG,
};
use crate::combat::{ArmTimerQueue, ContactWindows, HandSide, SkillRegistry};
use crate::components::{
    Animator, Health, MovementCommand, MovementSpeed, CLIP_IDLE, CLIP_TURN_LEFT, CLIP_TURN_RIGHT,
    IDLE_CLIP_LENGTH, TURN_CLIP_LENGTH,
};
use crate::DeterministicRng;

/// Буфер поверх длины клипа: blend-хвост анимации тоже часть замаха
pub const ATTACK_TIME_BUFFER: f32 = 0.2;

/// Скорость доворота к цели (градусы/сек)
pub const ANGLE_SPEED: f32 = 150.0;

/// Доли attack time, на которых взводятся окна конечностей.
/// Левая бьёт раньше правой — тайминги replика реального замаха.
pub const ARM_FRACTION_LEFT: f32 = 0.15;
pub const ARM_FRACTION_RIGHT: f32 = 0.3;

/// Система: один тик боевого цикла для всех активных атакующих состояний.
#[allow(clippy::type_complexity)]
pub fn attacking_cycle(
    mut bosses: Query<(
        Entity,
        &BossMachine,
        &mut AttackingState,
        &mut Transform,
        &CurrentTarget,
        &mut SkillRegistry,
        &mut Animator,
        &mut ContactWindows,
        &mut ArmTimerQueue,
        &mut MovementCommand,
        &mut MovementSpeed,
        &Health,
    )>,
    targets: Query<&Transform, Without<BossMachine>>,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut candidates: Local<CandidateBuffer>,
    mut requests: EventWriter<TransitionRequest>,
) {
    let delta = time.delta_secs();

    for (
        entity,
        machine,
        mut state,
        mut transform,
        current_target,
        mut skills,
        mut animator,
        mut windows,
        mut arm_queue,
        mut movement,
        mut speed,
        health,
    ) in bosses.iter_mut()
    {
        if machine.current != BossState::Attacking {
            continue;
        }

        let Ok(target_transform) = targets.get(current_target.0) else {
            continue; // цель despawned — решений не принимаем
        };

        match state.phase {
            CyclePhase::Countdown => {
                if animator.just_started {
                    // Отсчёт от длины реально заигравшего клипа
                    state.remaining_attack_time = animator.clip_length + ATTACK_TIME_BUFFER;
                    animator.just_started = false;

                    // Окна взводятся на долях attack time, известного СЕЙЧАС;
                    // при позднейшем пересеве отсчёта смещения не пересчитываются
                    arm_queue.schedule(
                        state.remaining_attack_time * ARM_FRACTION_LEFT,
                        HandSide::Left,
                        machine.activation,
                    );
                    arm_queue.schedule(
                        state.remaining_attack_time * ARM_FRACTION_RIGHT,
                        HandSide::Right,
                        machine.activation,
                    );

                    crate::log(&format!(
                        "⚔️ Boss {:?}: swing '{}', attack time {:.2}s",
                        entity, animator.current_clip, state.remaining_attack_time
                    ));
                } else if state.remaining_attack_time > 0.0 {
                    state.remaining_attack_time -= delta;
                }

                if state.remaining_attack_time <= 0.0 {
                    // Замах закончен: окна гаснут, встаём и решаем дальше
                    state.phase = CyclePhase::Deciding;
                    windows.disarm_all();
                    *movement = MovementCommand::MoveToPosition {
                        target: transform.translation,
                    };
                    speed.speed = 0.0;
                }
            }

            CyclePhase::Deciding => {
                if !health.is_alive() {
                    continue; // смертью займётся supervisor
                }

                let desired = look_rotation(transform.translation, target_transform.translation);
                if !is_facing(transform.rotation, desired, FACING_TOLERANCE_DEG) {
                    // Довернуться к цели; решение переоценим следующим тиком
                    let heading = target_transform.translation - transform.translation;
                    match angle_direction(
                        *transform.forward(),
                        heading,
                        Vec3::Y,
                        FACING_TOLERANCE_DEG,
                    ) {
                        TurnDirection::Left => animator.play(CLIP_TURN_LEFT, TURN_CLIP_LENGTH),
                        TurnDirection::Idle => animator.play(CLIP_IDLE, IDLE_CLIP_LENGTH),
                        TurnDirection::Right => animator.play(CLIP_TURN_RIGHT, TURN_CLIP_LENGTH),
                    }

                    transform.rotation =
                        rotate_towards(transform.rotation, desired, ANGLE_SPEED * delta);
                    continue;
                }

                match choose_attack(
                    &skills,
                    &mut candidates,
                    transform.translation,
                    target_transform.translation,
                    &mut rng.rng,
                    false,
                ) {
                    AttackChoice::Use(skill_id) => {
                        state.selected_skill = skill_id;
                        skills.use_skill(skill_id, &mut animator);
                        state.phase = CyclePhase::Countdown;
                    }
                    AttackChoice::ExitToChase => {
                        crate::log(&format!(
                            "🏃 Boss {:?}: кандидатов нет, цель ушла — выходим в погоню",
                            entity
                        ));
                        requests.write(TransitionRequest {
                            boss: entity,
                            to: BossState::Chasing,
                        });
                    }
                }
            }
        }
    }
}
