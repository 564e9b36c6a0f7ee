//! AI systems (supervisor transitions, chasing, боевой цикл)

pub mod attacking;
pub mod chasing;
pub mod supervisor;
