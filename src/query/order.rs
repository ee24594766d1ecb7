use sqlx::{QueryBuilder, Sqlite};

use super::expr::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Where NULLs sort relative to other values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullHandling {
    /// Whatever the database does (SQLite: NULLs first ascending)
    #[default]
    Default,
    NullsFirst,
    NullsLast,
}

/// One `ORDER BY` term, produced by `asc()` / `desc()` on an expression
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpecifier {
    expr: Expr,
    direction: Direction,
    nulls: NullHandling,
}

impl OrderSpecifier {
    pub fn new(expr: Expr, direction: Direction) -> Self {
        Self {
            expr,
            direction,
            nulls: NullHandling::Default,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullHandling::NullsFirst;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullHandling::NullsLast;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn push_sql<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>) {
        self.expr.push_sql(qb);
        qb.push(match self.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        });
        match self.nulls {
            NullHandling::Default => {}
            NullHandling::NullsFirst => {
                qb.push(" NULLS FIRST");
            }
            NullHandling::NullsLast => {
                qb.push(" NULLS LAST");
            }
        }
    }
}
