//! WILDMARK Simulation Core
//!
//! ECS-симуляция боевого AI босса на Bevy 0.16 (strategic layer).
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (boss state machine, skill selection, combat rules)
//! - Engine = tactical layer (rendering, физика weapon hit-volume, pathfinding)
//!
//! Engine → ECS: `ContactEvent` (weapon hit-volume touch)
//! ECS → Engine: `MovementCommand`, `Animator` clip requests

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod logger;

// Re-export базовых типов для удобства
pub use ai::{
    choose_attack, AttackChoice, AttackingState, BossMachine, BossState, CandidateBuffer,
    CurrentTarget, CyclePhase, StateChanged, TransitionRequest, ENGAGEMENT_BREAK_DISTANCE,
};
pub use combat::{
    calculate_damage, ArmTimerQueue, ContactEvent, ContactWindows, Damage, DamageDealt, Dead,
    EntityDied, HandSide, SkillDefinition, SkillRegistry, WeaponData, ANY_RANGE,
    DEFAULT_SKILL_ID, FACING_TOLERANCE_DEG,
};
pub use components::*;
pub use logger::{log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel};

/// Фазы одного simulation tick.
///
/// Combat (cooldowns, таймеры, урон) выполняется строго ДО Ai (решения) —
/// иначе порядок конфликтующих систем между плагинами зависел бы от
/// executor'а и ломал детерминизм.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Combat,
    Ai,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Детерминистичный RNG: не перетираем seed, выбранный хостом
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .configure_sets(
                FixedUpdate,
                (SimulationSet::Combat, SimulationSet::Ai).chain(),
            )
            // Подсистемы (ECS strategic layer)
            .add_plugins((combat::CombatPlugin, ai::BossAiPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Все случайные решения симуляции (выбор скилла из пула кандидатов)
/// идут через него — одинаковый seed ⇒ одинаковый бой.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Прогоняет ровно `ticks` fixed-тиков симуляции.
///
/// `app.update()` шагает FixedUpdate по wall-clock аккумулятору (0..N шагов
/// за кадр) — для воспроизводимых прогонов двигаем часы Time<Fixed> вручную
/// и запускаем schedule напрямую.
pub fn run_fixed_ticks(app: &mut App, ticks: usize) {
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    for _ in 0..ticks {
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(timestep);
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Snapshot компонентов мира для сравнения детерминизма.
///
/// Сортировка по Entity ID — порядок итерации query не гарантирован.
/// Сериализация через Debug (простейший способ, полный snapshot позже).
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
