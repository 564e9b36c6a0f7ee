//! Tests for boss state components.

use super::state::{AttackingState, BossMachine, BossState, CyclePhase, INITIAL_ATTACK_TIME};

#[test]
fn test_boss_machine_default() {
    let machine = BossMachine::default();
    assert_eq!(machine.current, BossState::Chasing);
    assert_eq!(machine.activation, 0);
    assert!(!machine.is_battle_state);
    assert!(machine.can_exit);
}

#[test]
fn test_attacking_state_starts_in_countdown() {
    let state = AttackingState::new();
    assert_eq!(state.phase, CyclePhase::Countdown);
    assert_eq!(state.remaining_attack_time, INITIAL_ATTACK_TIME);
}

#[test]
fn test_countdown_timer_logic() {
    let mut remaining = INITIAL_ATTACK_TIME;
    let delta = 0.5;

    remaining -= delta;
    remaining -= delta;
    assert!(remaining > 0.0);

    remaining -= delta;
    assert!(remaining <= 0.0); // Замах закончен
}
