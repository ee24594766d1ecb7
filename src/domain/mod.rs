// Domain layer module exports
// Entities, the in-memory roster and repository ports

pub mod errors;
pub mod hello;
pub mod member;
pub mod repositories;
pub mod roster;
pub mod team;
