use serde::Serialize;
use sqlx::FromRow;

use crate::query::{Expr, QMember};

/// Username and age of a member, decoded by column label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i32,
}

impl MemberDto {
    pub fn new(username: Option<String>, age: i32) -> Self {
        Self { username, age }
    }

    /// Select list whose labels match the field names
    pub fn projection(member: &QMember) -> Vec<Expr> {
        vec![member.username.clone().into(), member.age.clone().into()]
    }
}
