use serde::Serialize;
use sqlx::FromRow;

use crate::query::{Expr, QMember, TypedExpr};

/// Member data under different field names
///
/// `name` has no matching column, so the projection labels
/// `username` explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserDto {
    pub name: Option<String>,
    pub age: i32,
}

impl UserDto {
    pub fn projection(member: &QMember) -> Vec<Expr> {
        vec![member.username.as_("name"), member.age.clone().into()]
    }
}
