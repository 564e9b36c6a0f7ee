//! Boss combat integration tests
//!
//! Headless прогон полного цикла: погоня → бой → выход из боя → повторный
//! вход. Тики двигаем вручную через run_fixed_ticks — никакого wall-clock.

use bevy::prelude::*;
use wildmark_simulation::*;

/// Helper: создать полный combat App со всеми plugins
fn create_boss_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    app
}

/// Helper: spawn цели (манекен с Health)
fn spawn_target(app: &mut App, position: Vec3, hp: u32) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            Health::new(hp),
            MainStats::default(),
        ))
        .id()
}

/// Helper: spawn босса (required components дотянут остальное)
fn spawn_boss(app: &mut App, position: Vec3, target: Entity) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            BossMachine::default(),
            CurrentTarget(target),
        ))
        .id()
}

/// Helper: тикаем по одному, пока предикат не сработает (или паника)
fn run_until(app: &mut App, max_ticks: usize, what: &str, mut predicate: impl FnMut(&mut App) -> bool) {
    for _ in 0..max_ticks {
        if predicate(app) {
            return;
        }
        run_fixed_ticks(app, 1);
    }
    panic!("условие '{}' не наступило за {} тиков", what, max_ticks);
}

#[test]
fn test_chase_closes_distance_and_enters_attacking() {
    let mut app = create_boss_app(42);
    let target = spawn_target(&mut app, Vec3::new(10.0, 0.0, 0.0), 1000);
    let boss = spawn_boss(&mut app, Vec3::ZERO, target);

    run_until(&mut app, 600, "boss вошёл в Attacking", |app| {
        app.world()
            .get::<BossMachine>(boss)
            .is_some_and(|m| m.current == BossState::Attacking)
    });

    let machine = app.world().get::<BossMachine>(boss).unwrap();
    assert_eq!(machine.activation, 1);
    assert!(machine.is_battle_state);
    assert!(!machine.can_exit);
    assert!(app.world().get::<AttackingState>(boss).is_some());

    // Движение остановлено: бьём стоя
    let speed = app.world().get::<MovementSpeed>(boss).unwrap();
    assert_eq!(speed.speed, 0.0);

    // Босс дошёл до дистанции начала боя
    let boss_pos = app.world().get::<Transform>(boss).unwrap().translation;
    let target_pos = app.world().get::<Transform>(target).unwrap().translation;
    assert!(boss_pos.distance(target_pos) < ENGAGEMENT_BREAK_DISTANCE + 0.5);
}

#[test]
fn test_entering_resets_all_cooldowns() {
    let mut app = create_boss_app(42);
    let target = spawn_target(&mut app, Vec3::new(2.0, 0.0, 0.0), 1000);
    let boss = spawn_boss(&mut app, Vec3::ZERO, target);

    run_until(&mut app, 20, "boss вошёл в Attacking", |app| {
        app.world().get::<AttackingState>(boss).is_some()
    });

    // Grace period: сразу после входа ни один скилл с cooldown > 0 не готов
    let registry = app.world().get::<SkillRegistry>(boss).unwrap();
    for skill in &registry.skills {
        if skill.cooldown > 1.0 {
            assert!(
                !skill.is_ready(),
                "skill {} готов сразу после входа в бой",
                skill.id
            );
        }
    }
}

#[test]
fn test_exit_to_chase_once_and_reentry() {
    let mut app = create_boss_app(42);
    let target = spawn_target(&mut app, Vec3::new(2.0, 0.0, 0.0), 1000);
    let boss = spawn_boss(&mut app, Vec3::ZERO, target);

    run_until(&mut app, 20, "boss вошёл в Attacking", |app| {
        app.world().get::<AttackingState>(boss).is_some()
    });

    // Цель телепортируется далеко (по тому же направлению — без доворота)
    app.world_mut()
        .get_mut::<Transform>(target)
        .unwrap()
        .translation = Vec3::new(30.0, 0.0, 0.0);

    // Замах доигрывается, решение видит пустой пул и дистанцию ≥ break
    run_until(&mut app, 600, "boss вышел в Chasing", |app| {
        app.world()
            .get::<BossMachine>(boss)
            .is_some_and(|m| m.current == BossState::Chasing)
    });
    assert!(app.world().get::<AttackingState>(boss).is_none());

    // Погоня смыкает дистанцию → повторный вход с новой активацией
    run_until(&mut app, 2000, "boss вернулся в Attacking", |app| {
        app.world()
            .get::<BossMachine>(boss)
            .is_some_and(|m| m.current == BossState::Attacking)
    });
    assert_eq!(app.world().get::<BossMachine>(boss).unwrap().activation, 2);

    // Выход из боя случился ровно один раз
    let events = app.world().resource::<Events<StateChanged>>();
    let exits = events
        .get_cursor()
        .read(events)
        .filter(|e| e.from == BossState::Attacking && e.to == BossState::Chasing)
        .count();
    assert_eq!(exits, 1);
}

#[test]
fn test_contact_window_applies_damage_once() {
    let mut app = create_boss_app(42);
    // Цель прямо по курсу (forward = -Z): доворот не нужен
    let target = spawn_target(&mut app, Vec3::new(0.0, 0.0, -2.0), 1000);
    let boss = spawn_boss(&mut app, Vec3::ZERO, target);

    // Ждём взведения левого окна (≈15% attack time первого замаха)
    run_until(&mut app, 200, "левое окно взведено", |app| {
        app.world()
            .get::<ContactWindows>(boss)
            .is_some_and(|w| w.left.armed)
    });

    let expected = {
        let weapon = app.world().get::<WeaponData>(boss).unwrap();
        let attacker = app.world().get::<MainStats>(boss).unwrap();
        let victim = app.world().get::<MainStats>(target).unwrap();
        calculate_damage(weapon, attacker, victim).unwrap().amount
    };

    // Первый валидный контакт наносит урон и гасит окно
    app.world_mut().send_event(ContactEvent {
        boss,
        side: HandSide::Left,
        target,
        collider_is_trigger: false,
    });
    run_fixed_ticks(&mut app, 1);

    let hp_after_first = app.world().get::<Health>(target).unwrap().current;
    assert_eq!(hp_after_first, 1000 - expected);
    assert!(!app.world().get::<ContactWindows>(boss).unwrap().left.armed);

    // Повторный контакт тем же окном — no-op до следующего взведения
    app.world_mut().send_event(ContactEvent {
        boss,
        side: HandSide::Left,
        target,
        collider_is_trigger: false,
    });
    run_fixed_ticks(&mut app, 1);
    assert_eq!(app.world().get::<Health>(target).unwrap().current, hp_after_first);
}

#[test]
fn test_trigger_collider_contact_rejected() {
    let mut app = create_boss_app(42);
    let target = spawn_target(&mut app, Vec3::new(0.0, 0.0, -2.0), 1000);
    let boss = spawn_boss(&mut app, Vec3::ZERO, target);

    run_until(&mut app, 200, "левое окно взведено", |app| {
        app.world()
            .get::<ContactWindows>(boss)
            .is_some_and(|w| w.left.armed)
    });

    // Касание non-solid trigger volume не считается попаданием
    app.world_mut().send_event(ContactEvent {
        boss,
        side: HandSide::Left,
        target,
        collider_is_trigger: true,
    });
    run_fixed_ticks(&mut app, 1);

    assert_eq!(app.world().get::<Health>(target).unwrap().current, 1000);
    // Окно остаётся взведённым — удар ещё впереди
    assert!(app.world().get::<ContactWindows>(boss).unwrap().left.armed);
}

#[test]
fn test_stale_contact_event_after_exit_ignored() {
    let mut app = create_boss_app(42);
    let target = spawn_target(&mut app, Vec3::new(0.0, 0.0, -2.0), 1000);
    let boss = spawn_boss(&mut app, Vec3::ZERO, target);

    run_until(&mut app, 200, "левое окно взведено", |app| {
        app.world()
            .get::<ContactWindows>(boss)
            .is_some_and(|w| w.left.armed)
    });

    // Цель уходит, бой разрывается
    app.world_mut()
        .get_mut::<Transform>(target)
        .unwrap()
        .translation = Vec3::new(0.0, 0.0, -40.0);
    run_until(&mut app, 600, "boss вышел в Chasing", |app| {
        app.world()
            .get::<BossMachine>(boss)
            .is_some_and(|m| m.current == BossState::Chasing)
    });

    // Хвостовое событие прошлой активации долетело после teardown'а
    app.world_mut().send_event(ContactEvent {
        boss,
        side: HandSide::Left,
        target,
        collider_is_trigger: false,
    });
    run_fixed_ticks(&mut app, 1);

    assert_eq!(app.world().get::<Health>(target).unwrap().current, 1000);
}

#[test]
fn test_boss_death_tears_down_combat() {
    let mut app = create_boss_app(42);
    let target = spawn_target(&mut app, Vec3::new(0.0, 0.0, -2.0), 1000);
    let boss = spawn_boss(&mut app, Vec3::ZERO, target);

    run_until(&mut app, 20, "boss вошёл в Attacking", |app| {
        app.world().get::<AttackingState>(boss).is_some()
    });

    // Босс убит внешним уроном
    app.world_mut().get_mut::<Health>(boss).unwrap().current = 0;
    run_fixed_ticks(&mut app, 2);

    let machine = app.world().get::<BossMachine>(boss).unwrap();
    assert_eq!(machine.current, BossState::Dead);
    assert!(app.world().get::<AttackingState>(boss).is_none());
    assert!(app.world().get::<wildmark_simulation::Dead>(boss).is_some());
    assert_eq!(app.world().get::<MovementSpeed>(boss).unwrap().speed, 0.0);
}
