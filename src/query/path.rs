use super::expr::{Aggregate, Expr, IdExpr, NumberExpr, StringExpr};

/// Alias of the member table in the outer query
pub const MEMBER_ALIAS: &str = "m";
/// Alias of the team table in the outer query
pub const TEAM_ALIAS: &str = "t";

/// Typed column paths of the `member` table
///
/// [`QMember::member`] addresses the outer query; [`QMember::new`] gives a
/// separately aliased copy for sub-queries.
#[derive(Debug, Clone)]
pub struct QMember {
    alias: &'static str,
    pub id: IdExpr,
    pub username: StringExpr,
    pub age: NumberExpr,
    pub team_id: IdExpr,
}

impl QMember {
    pub fn new(alias: &'static str) -> Self {
        Self {
            alias,
            id: IdExpr(Expr::column(alias, "id")),
            username: StringExpr(Expr::column(alias, "username")),
            age: NumberExpr(Expr::column(alias, "age")),
            team_id: IdExpr(Expr::column(alias, "team_id")),
        }
    }

    pub fn member() -> Self {
        Self::new(MEMBER_ALIAS)
    }

    pub fn alias(&self) -> &'static str {
        self.alias
    }

    /// `COUNT(<alias>.id)`
    pub fn count(&self) -> NumberExpr {
        NumberExpr(Expr::Aggregate(
            Aggregate::Count,
            Box::new(Expr::column(self.alias, "id")),
        ))
    }
}

/// Typed column paths of the `team` table
#[derive(Debug, Clone)]
pub struct QTeam {
    alias: &'static str,
    pub id: IdExpr,
    pub name: StringExpr,
}

impl QTeam {
    pub fn new(alias: &'static str) -> Self {
        Self {
            alias,
            id: IdExpr(Expr::column(alias, "id")),
            name: StringExpr(Expr::column(alias, "name")),
        }
    }

    pub fn team() -> Self {
        Self::new(TEAM_ALIAS)
    }

    pub fn alias(&self) -> &'static str {
        self.alias
    }
}
