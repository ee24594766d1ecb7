//! Roster API Library
//!
//! Members, teams and a typed query builder over them, with SQLite
//! repositories and a small HTTP surface.

pub mod api;
pub mod config;
pub mod domain;
pub mod dto;
pub mod infrastructure;
pub mod query;
