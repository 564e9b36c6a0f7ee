//! Headless прогон симуляции боя босса
//!
//! Запускает Bevy App без рендера: босс гонится за неподвижной целью,
//! входит в бой и крутит боевой цикл. Для проверки детерминизма и
//! профилирования без engine'а.

use bevy::prelude::*;
use wildmark_simulation::{
    create_headless_app, log_info, run_fixed_ticks, BossMachine, CurrentTarget, Health, MainStats,
    SimulationPlugin,
};

fn main() {
    let seed = 42;
    log_info(&format!(
        "Starting WILDMARK headless simulation (seed: {})",
        seed
    ));

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    // Цель: неподвижный манекен с запасом здоровья
    let target = app
        .world_mut()
        .spawn((
            Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)),
            Health::new(5000),
            MainStats::default(),
        ))
        .id();

    // Босс стартует в Chasing и сам дойдёт до дистанции боя
    let boss = app
        .world_mut()
        .spawn((
            Transform::from_translation(Vec3::ZERO),
            BossMachine::default(),
            CurrentTarget(target),
        ))
        .id();

    // 1000 тиков ≈ 16.7 секунд симуляции при 60Hz
    for batch in 0..10 {
        run_fixed_ticks(&mut app, 100);

        let machine = app.world().get::<BossMachine>(boss).unwrap();
        let target_health = app.world().get::<Health>(target).unwrap();
        log_info(&format!(
            "Tick {}: boss state {:?} (activation {}), target HP {}/{}",
            (batch + 1) * 100,
            machine.current,
            machine.activation,
            target_health.current,
            target_health.max
        ));
    }

    log_info("Simulation complete!");
}
