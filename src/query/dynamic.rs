//! Optional search parameters turned into predicates
//!
//! Each helper maps an absent parameter to `None`, which every combinator
//! in this crate treats as "no constraint".

use super::condition::Condition;
use super::path::{QMember, QTeam};
use super::predicate::Predicate;

pub fn username_eq(username: Option<&str>) -> Option<Predicate> {
    username.map(|username| QMember::member().username.eq(username))
}

pub fn age_eq(age: Option<i32>) -> Option<Predicate> {
    age.map(|age| QMember::member().age.eq(age))
}

pub fn team_name_eq(team_name: Option<&str>) -> Option<Predicate> {
    team_name.map(|team_name| QTeam::team().name.eq(team_name))
}

pub fn age_goe(age: Option<i32>) -> Option<Predicate> {
    age.map(|age| QMember::member().age.goe(age))
}

pub fn age_loe(age: Option<i32>) -> Option<Predicate> {
    age.map(|age| QMember::member().age.loe(age))
}

/// `username = ? AND age = ?`, dropping whichever side is absent
pub fn all_eq(username: Option<&str>, age: Option<i32>) -> Condition {
    [username_eq(username), age_eq(age)].into_iter().collect()
}

/// Same result as [`all_eq`], accumulated step by step into a builder
pub fn all_eq_builder(username: Option<&str>, age: Option<i32>) -> Condition {
    let mut builder = Condition::new();
    if let Some(username) = username {
        builder = builder.and(QMember::member().username.eq(username));
    }
    if let Some(age) = age {
        builder = builder.and(QMember::member().age.eq(age));
    }
    builder
}
