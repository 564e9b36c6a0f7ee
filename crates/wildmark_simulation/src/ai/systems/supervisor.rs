//! Supervisor state machine: применение переходов и lifecycle hooks.
//!
//! # Lifecycle
//!
//! Переход = exit hook старого состояния + enter hook нового, строго в
//! начале тика (до систем, принимающих решения). Enter hook атакующего
//! состояния — это "Entering" боевого цикла:
//!
//! ```text
//! TransitionRequest { to: Attacking }
//!   ↓
//! activation += 1, halt движения, reset всех cooldown'ов (grace period)
//!   ↓
//! первичный choose_attack()
//!   ├─ Use(skill) → insert AttackingState (phase = Countdown)
//!   └─ ExitToChase → откат в Chasing тем же тиком
//! ```

use bevy::prelude::*;

use crate::ai::components::{AttackingState, BossMachine, BossState, CurrentTarget};
use crate::ai::events::{StateChanged, TransitionRequest};
use crate::ai::selector::{choose_attack, AttackChoice, CandidateBuffer};
use crate::ai::systems::chasing::CHASE_SPEED;
use crate::combat::{ArmTimerQueue, ContactWindows, Dead, SkillRegistry};
use crate::components::{Animator, Health, MovementCommand, MovementSpeed};
use crate::DeterministicRng;

/// Система: применение запрошенных переходов состояния.
///
/// Запросы прошлого тика применяются до того, как chasing/attacking
/// системы примут новые решения. Запрос в текущее состояние — no-op;
/// Dead терминален.
pub fn apply_transitions(
    mut requests: EventReader<TransitionRequest>,
    mut bosses: Query<(
        &mut BossMachine,
        &Transform,
        &CurrentTarget,
        &mut SkillRegistry,
        &mut Animator,
        &mut ContactWindows,
        &mut ArmTimerQueue,
        &mut MovementCommand,
        &mut MovementSpeed,
    )>,
    targets: Query<&Transform, Without<BossMachine>>,
    mut rng: ResMut<DeterministicRng>,
    mut candidates: Local<CandidateBuffer>,
    mut state_changed: EventWriter<StateChanged>,
    mut commands: Commands,
) {
    for request in requests.read() {
        let Ok((
            mut machine,
            transform,
            current_target,
            mut skills,
            mut animator,
            mut windows,
            mut arm_queue,
            mut movement,
            mut speed,
        )) = bosses.get_mut(request.boss)
        else {
            continue;
        };

        if machine.current == request.to || machine.current == BossState::Dead {
            continue;
        }

        let from = machine.current;

        // ── Exit hook ──
        if from == BossState::Attacking {
            exit_attacking(
                request.boss,
                &mut machine,
                &mut windows,
                &mut arm_queue,
                &mut commands,
            );
        }

        machine.current = request.to;
        let mut settled = request.to;

        // ── Enter hook ──
        match request.to {
            BossState::Attacking => {
                let target_position = targets.get(current_target.0).map(|t| t.translation).ok();
                let entered = enter_attacking(
                    request.boss,
                    &mut machine,
                    transform,
                    target_position,
                    &mut skills,
                    &mut animator,
                    &mut movement,
                    &mut speed,
                    &mut candidates,
                    &mut rng,
                    &mut commands,
                );

                if !entered {
                    // Первичный выбор сразу запросил погоню — цель уже далеко
                    machine.current = BossState::Chasing;
                    enter_chasing(&mut machine, current_target.0, &mut movement, &mut speed);
                    settled = BossState::Chasing;
                }
            }
            BossState::Chasing => {
                enter_chasing(&mut machine, current_target.0, &mut movement, &mut speed)
            }
            BossState::Dead => {
                *movement = MovementCommand::Stop;
                speed.speed = 0.0;
                commands.entity(request.boss).insert(Dead);
            }
        }

        crate::log_info(&format!(
            "🔁 Boss {:?}: {:?} → {:?}",
            request.boss, from, settled
        ));
        state_changed.write(StateChanged {
            boss: request.boss,
            from,
            to: settled,
        });
    }
}

/// Teardown атакующей активации.
///
/// Окна гаснут, отложенные таймеры снимаются — хвост старого замаха не
/// должен выстрелить в новой активации.
fn exit_attacking(
    boss: Entity,
    machine: &mut BossMachine,
    windows: &mut ContactWindows,
    arm_queue: &mut ArmTimerQueue,
    commands: &mut Commands,
) {
    commands.entity(boss).remove::<AttackingState>();
    windows.disarm_all();
    arm_queue.timers.clear();
    machine.is_battle_state = false;
    machine.can_exit = true;
}

/// Entering боевого цикла. false — первичный выбор вернул ExitToChase
/// (или цели больше нет) и состояние не активировано.
#[allow(clippy::too_many_arguments)]
fn enter_attacking(
    boss: Entity,
    machine: &mut BossMachine,
    transform: &Transform,
    target_position: Option<Vec3>,
    skills: &mut SkillRegistry,
    animator: &mut Animator,
    movement: &mut MovementCommand,
    speed: &mut MovementSpeed,
    candidates: &mut CandidateBuffer,
    rng: &mut DeterministicRng,
    commands: &mut Commands,
) -> bool {
    machine.can_exit = false;
    machine.is_battle_state = true;
    machine.activation = machine.activation.wrapping_add(1);

    // Halt: бьём стоя на месте
    *movement = MovementCommand::MoveToPosition {
        target: transform.translation,
    };
    speed.speed = 0.0;

    // Grace period: каждый скилл уходит на свой полный cooldown, бой не
    // начинается с полного залпа
    for index in 0..skills.skills.len() {
        let cooldown = skills.skills[index].cooldown;
        skills.cooldown_reset(index, cooldown);
    }

    let Some(target_position) = target_position else {
        crate::log_warning(&format!("Boss {:?}: цель пропала на входе в бой", boss));
        return false;
    };

    match choose_attack(
        skills,
        candidates,
        transform.translation,
        target_position,
        &mut rng.rng,
        false,
    ) {
        AttackChoice::Use(skill_id) => {
            skills.use_skill(skill_id, animator);
            let mut state = AttackingState::new();
            state.selected_skill = skill_id;
            commands.entity(boss).insert(state);
            crate::log(&format!(
                "⚔️ Boss {:?}: activation {} начата, первый скилл {}",
                boss, machine.activation, skill_id
            ));
            true
        }
        AttackChoice::ExitToChase => false,
    }
}

fn enter_chasing(
    machine: &mut BossMachine,
    target: Entity,
    movement: &mut MovementCommand,
    speed: &mut MovementSpeed,
) {
    machine.is_battle_state = false;
    machine.can_exit = true;
    *movement = MovementCommand::FollowEntity { target };
    speed.speed = CHASE_SPEED;
}

/// Система: health == 0 → запрос перехода в Dead.
///
/// Сам переход (остановка движения, teardown атаки) применит
/// `apply_transitions` следующим тиком.
pub fn detect_boss_death(
    bosses: Query<(Entity, &Health, &BossMachine)>,
    mut requests: EventWriter<TransitionRequest>,
) {
    for (entity, health, machine) in bosses.iter() {
        if !health.is_alive() && machine.current != BossState::Dead {
            requests.write(TransitionRequest {
                boss: entity,
                to: BossState::Dead,
            });
        }
    }
}
